//! Descriptive statistics for delimited text files.
//!
//! csvscope turns raw CSV bytes into a structured summary: shape, column
//! types, missing values, duplicate rows, numeric distribution summary,
//! a row preview, and a memory estimate. The pipeline is pure per call:
//! decode (UTF-8 with Latin-1 fallback), sniff the delimiter for display,
//! parse into a typed table, then profile.
//!
//! ```
//! let csv = b"name,score\nAlice,90\nBob,82\n";
//! let result = csvscope::analyze(csv, Some("scores.csv")).unwrap();
//!
//! assert_eq!(result.rows, 2);
//! assert_eq!(result.columns, 2);
//! assert!(!result.has_missing);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use application::use_cases::CsvAnalyzer;
pub use domain::analysis::AnalysisResult;
pub use domain::error::{AppError, Result};

/// Analyze raw input bytes, optionally tagged with a filename.
///
/// Convenience wrapper over [`CsvAnalyzer::analyze`]. The caller is
/// responsible for any input-size limit; the core does not self-limit.
pub fn analyze(bytes: &[u8], filename: Option<&str>) -> Result<AnalysisResult> {
    CsvAnalyzer::new().analyze(bytes, filename)
}
