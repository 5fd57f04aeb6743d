// ============================================================
// ANALYZER USE CASE
// ============================================================
// Orchestrate decoding, sniffing, parsing, and profiling

use std::time::Instant;

use crate::application::use_cases::profiler::Profiler;
use crate::domain::analysis::AnalysisResult;
use crate::domain::error::Result;
use crate::infrastructure::csv::{decode, sniff, CsvParser};

/// Full analysis pipeline from raw bytes to an [`AnalysisResult`].
///
/// Pure per invocation: no I/O beyond the input bytes, no shared state.
/// Identical input always produces an identical result.
pub struct CsvAnalyzer {
    profiler: Profiler,
}

impl CsvAnalyzer {
    pub fn new() -> Self {
        Self {
            profiler: Profiler::new(),
        }
    }

    /// Analyze raw input bytes, optionally tagged with a filename.
    ///
    /// Size limits are the caller's job; this function accepts whatever
    /// it is handed.
    pub fn analyze(&self, bytes: &[u8], filename: Option<&str>) -> Result<AnalysisResult> {
        let start = Instant::now();

        let (text, encoding) = decode(bytes)?;
        let detected_delimiter = sniff(&text);
        let parsed = CsvParser::parse_auto(&text)?;

        let mut result = self.profiler.profile(&parsed.table)?;
        result.filename = filename.map(|f| f.to_string());
        result.encoding = encoding.label().to_string();
        result.detected_delimiter = detected_delimiter;
        result.warnings = parsed.warnings;

        tracing::debug!(
            rows = result.rows,
            columns = result.columns,
            encoding = %result.encoding,
            duplicates = result.duplicates.count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "CSV analysis complete"
        );

        Ok(result)
    }
}

impl Default for CsvAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
