// ============================================================
// ANALYSIS RESULT TYPES
// ============================================================
// Read-only snapshot of a table's summary statistics

use serde::{Deserialize, Serialize};

use super::table::DataType;

/// Per-column type entry for the dtypes section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDtype {
    pub column: String,
    pub dtype: DataType,
}

/// Missing-value counts for a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,

    /// Number of missing cells
    pub count: usize,

    /// Percentage of the column that is missing, rounded to one decimal
    pub pct: f64,
}

/// A sampled duplicate row, annotated with its position in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateRow {
    /// 0-based row index
    pub index: usize,

    /// Display-rendered cell values, in column order
    pub values: Vec<String>,
}

/// Duplicate-row statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateStats {
    /// Every row beyond the first occurrence in each equal-group
    pub count: usize,

    /// Up to [`DUPLICATE_PREVIEW_ROWS`](crate::application::use_cases::profiler::DUPLICATE_PREVIEW_ROWS)
    /// sample duplicate rows
    pub preview: Vec<DuplicateRow>,
}

/// Descriptive statistics for one numeric column.
///
/// Standard deviation uses the sample (n-1) denominator; with fewer than
/// two non-missing values it is 0.0 by convention. Quartiles use linear
/// interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnSummary {
    pub column: String,

    /// Count of non-missing values
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// First rows of the table, rendered for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Approximate in-memory footprint of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEstimate {
    pub bytes: usize,

    /// Human-readable form, e.g. "1.25 MB"
    pub human: String,
}

/// Complete result of one analysis call.
///
/// Fully populated or not returned at all; a failed pipeline stage
/// surfaces an [`AppError`](super::error::AppError) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Filename supplied by the caller, if any
    pub filename: Option<String>,

    /// Encoding that succeeded during decoding ("utf-8" or "latin-1")
    pub encoding: String,

    /// Sniffed delimiter, informational only
    pub detected_delimiter: char,

    pub rows: usize,
    pub columns: usize,
    pub dtypes: Vec<ColumnDtype>,

    pub missing: Vec<ColumnMissing>,
    pub overall_missing: usize,

    /// Overall missing percentage over all cells, rounded to two decimals
    pub overall_missing_pct: f64,

    /// Presentation hint: false when no cell in the table is missing,
    /// letting renderers collapse the missing-values section
    pub has_missing: bool,

    pub duplicates: DuplicateStats,

    /// Presentation hint mirroring `has_missing` for the numeric section
    pub has_numeric: bool,
    pub numeric_summary: Vec<NumericColumnSummary>,

    pub preview: PreviewRows,
    pub memory: MemoryEstimate,

    /// Malformed-row warnings collected during parsing
    pub warnings: Vec<String>,
}
