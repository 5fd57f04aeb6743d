// ============================================================
// PROFILER USE CASE
// ============================================================
// Derive summary statistics from a parsed Table

use std::collections::HashSet;

use crate::domain::analysis::{
    AnalysisResult, ColumnDtype, ColumnMissing, DuplicateRow, DuplicateStats, MemoryEstimate,
    NumericColumnSummary, PreviewRows,
};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{DataType, Table};
use crate::shared::format::human_bytes;

/// Rows shown in the table preview
pub const PREVIEW_ROWS: usize = 10;

/// Sample duplicate rows carried in the result
pub const DUPLICATE_PREVIEW_ROWS: usize = 10;

/// Statistical profiler over a parsed [`Table`].
///
/// Produces an [`AnalysisResult`] with the envelope fields (filename,
/// encoding, delimiter, warnings) left at their defaults; the analyzer
/// use case fills those in.
pub struct Profiler {
    preview_rows: usize,
    duplicate_preview_rows: usize,
}

impl Default for Profiler {
    fn default() -> Self {
        Self {
            preview_rows: PREVIEW_ROWS,
            duplicate_preview_rows: DUPLICATE_PREVIEW_ROWS,
        }
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many rows the preview holds
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Set how many sample duplicate rows are carried
    pub fn with_duplicate_preview_rows(mut self, rows: usize) -> Self {
        self.duplicate_preview_rows = rows;
        self
    }

    /// Compute the full summary for a table.
    ///
    /// Fails with `ProfileError` only on an internal invariant violation,
    /// which would indicate a parser bug.
    pub fn profile(&self, table: &Table) -> Result<AnalysisResult> {
        let rows = table.row_count();
        let cols = table.column_count();

        for col in table.columns() {
            if col.len() != rows {
                return Err(AppError::ProfileError(format!(
                    "column '{}' length {} does not match row count {}",
                    col.name,
                    col.len(),
                    rows
                )));
            }
        }

        let dtypes = table
            .columns()
            .iter()
            .map(|c| ColumnDtype {
                column: c.name.clone(),
                dtype: c.dtype,
            })
            .collect();

        let missing: Vec<ColumnMissing> = table
            .columns()
            .iter()
            .map(|c| {
                let count = c.missing_count();
                let pct = if rows > 0 {
                    round_to(count as f64 / rows as f64 * 100.0, 1)
                } else {
                    0.0
                };
                ColumnMissing {
                    column: c.name.clone(),
                    count,
                    pct,
                }
            })
            .collect();

        let overall_missing: usize = missing.iter().map(|m| m.count).sum();
        let total_cells = rows * cols;
        let overall_missing_pct = if total_cells > 0 {
            round_to(overall_missing as f64 / total_cells as f64 * 100.0, 2)
        } else {
            0.0
        };

        let duplicates = self.find_duplicates(table);
        let numeric_summary = Self::numeric_summaries(table);
        let has_numeric = !numeric_summary.is_empty();

        let preview = PreviewRows {
            columns: table.column_names(),
            rows: (0..rows.min(self.preview_rows))
                .map(|i| table.row(i).iter().map(|v| v.display()).collect())
                .collect(),
        };

        let bytes = Self::estimate_memory(table);

        Ok(AnalysisResult {
            filename: None,
            encoding: String::new(),
            detected_delimiter: ',',
            rows,
            columns: cols,
            dtypes,
            missing,
            overall_missing,
            overall_missing_pct,
            has_missing: overall_missing > 0,
            duplicates,
            has_numeric,
            numeric_summary,
            preview,
            memory: MemoryEstimate {
                bytes,
                human: human_bytes(bytes as u64),
            },
            warnings: Vec::new(),
        })
    }

    /// Count rows equal (missing equals missing) to an earlier row,
    /// sampling the first few for display
    fn find_duplicates(&self, table: &Table) -> DuplicateStats {
        // One key component per cell; keeping the Vec avoids any joined-string
        // ambiguity between cell boundaries
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let mut count = 0usize;
        let mut preview = Vec::new();

        for i in 0..table.row_count() {
            let row = table.row(i);
            let key: Vec<String> = row.iter().map(|v| v.group_key()).collect();

            if !seen.insert(key) {
                count += 1;
                if preview.len() < self.duplicate_preview_rows {
                    preview.push(DuplicateRow {
                        index: i,
                        values: row.iter().map(|v| v.display()).collect(),
                    });
                }
            }
        }

        DuplicateStats { count, preview }
    }

    /// Descriptive statistics for every integer or float column
    fn numeric_summaries(table: &Table) -> Vec<NumericColumnSummary> {
        table
            .columns()
            .iter()
            .filter(|c| c.dtype.is_numeric())
            .filter_map(|c| {
                let mut values: Vec<f64> =
                    c.values.iter().filter_map(|v| v.as_f64()).collect();
                if values.is_empty() {
                    return None;
                }
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

                let count = values.len();
                let mean = values.iter().sum::<f64>() / count as f64;
                let std = sample_std(&values, mean);

                Some(NumericColumnSummary {
                    column: c.name.clone(),
                    count,
                    mean,
                    std,
                    min: values[0],
                    q25: percentile(&values, 0.25),
                    median: percentile(&values, 0.50),
                    q75: percentile(&values, 0.75),
                    max: values[count - 1],
                })
            })
            .collect()
    }

    /// Approximate byte footprint: 8 bytes per numeric or datetime element,
    /// 1 per boolean, string byte length for text
    fn estimate_memory(table: &Table) -> usize {
        table
            .columns()
            .iter()
            .map(|c| match c.dtype {
                DataType::Integer | DataType::Float | DataType::Datetime => c.len() * 8,
                DataType::Boolean => c.len(),
                DataType::Text => c.values.iter().map(|v| v.estimated_bytes()).sum(),
            })
            .sum()
    }
}

/// Sample standard deviation (n-1 denominator); 0.0 below two values
fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Linear-interpolation percentile over sorted values, `p` in [0, 1]
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + frac * (sorted[upper] - sorted[lower])
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{CellValue, Column};

    fn table(columns: Vec<Column>) -> Table {
        Table::new(columns).unwrap()
    }

    fn int_col(name: &str, values: Vec<Option<i64>>) -> Column {
        Column::new(
            name.to_string(),
            DataType::Integer,
            values
                .into_iter()
                .map(|v| v.map(CellValue::Int).unwrap_or(CellValue::Missing))
                .collect(),
        )
    }

    fn text_col(name: &str, values: Vec<&str>) -> Column {
        Column::new(
            name.to_string(),
            DataType::Text,
            values
                .into_iter()
                .map(|v| CellValue::Text(v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_no_missing_sets_flag_false() {
        let t = table(vec![int_col("a", vec![Some(1), Some(2)])]);
        let result = Profiler::new().profile(&t).unwrap();

        assert!(!result.has_missing);
        assert_eq!(result.overall_missing, 0);
        assert_eq!(result.overall_missing_pct, 0.0);
    }

    #[test]
    fn test_missing_percentage() {
        // 2 missing out of 10 rows reports 20.0%
        let values = vec![
            Some(1),
            Some(2),
            None,
            Some(4),
            Some(5),
            None,
            Some(7),
            Some(8),
            Some(9),
            Some(10),
        ];
        let t = table(vec![int_col("a", values)]);
        let result = Profiler::new().profile(&t).unwrap();

        assert!(result.has_missing);
        assert_eq!(result.missing[0].count, 2);
        assert_eq!(result.missing[0].pct, 20.0);
    }

    #[test]
    fn test_duplicate_detection() {
        // [1,"a"], [1,"a"], [2,"b"] has one extra occurrence of the first group
        let t = table(vec![
            int_col("x", vec![Some(1), Some(1), Some(2)]),
            text_col("y", vec!["a", "a", "b"]),
        ]);
        let result = Profiler::new().profile(&t).unwrap();

        assert_eq!(result.duplicates.count, 1);
        assert_eq!(result.duplicates.preview.len(), 1);
        assert_eq!(result.duplicates.preview[0].index, 1);
        assert_eq!(result.duplicates.preview[0].values, vec!["1", "a"]);
    }

    #[test]
    fn test_separator_lookalike_text_is_not_duplicate() {
        // Cell contents that mimic key syntax must not merge distinct rows
        let t = table(vec![
            text_col("x", vec!["a\u{1f}t:b", "a"]),
            text_col("y", vec!["c", "b\u{1f}t:c"]),
        ]);
        let result = Profiler::new().profile(&t).unwrap();
        assert_eq!(result.duplicates.count, 0);
    }

    #[test]
    fn test_missing_equals_missing_for_duplicates() {
        let t = table(vec![int_col("x", vec![None, None, Some(1)])]);
        let result = Profiler::new().profile(&t).unwrap();
        assert_eq!(result.duplicates.count, 1);
    }

    #[test]
    fn test_numeric_summary() {
        let t = table(vec![int_col(
            "x",
            vec![Some(1), Some(2), Some(3), Some(4)],
        )]);
        let result = Profiler::new().profile(&t).unwrap();
        let summary = &result.numeric_summary[0];

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.q25, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q75, 3.25);
        assert!((summary.std - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_std_is_zero_below_two_values() {
        let t = table(vec![int_col("x", vec![Some(5), None])]);
        let result = Profiler::new().profile(&t).unwrap();
        assert_eq!(result.numeric_summary[0].count, 1);
        assert_eq!(result.numeric_summary[0].std, 0.0);
    }

    #[test]
    fn test_no_numeric_columns() {
        let t = table(vec![text_col("y", vec!["a", "b"])]);
        let result = Profiler::new().profile(&t).unwrap();
        assert!(!result.has_numeric);
        assert!(result.numeric_summary.is_empty());
    }

    #[test]
    fn test_preview_caps_at_limit() {
        let values: Vec<Option<i64>> = (0..25).map(Some).collect();
        let t = table(vec![int_col("x", values)]);
        let result = Profiler::new().profile(&t).unwrap();

        assert_eq!(result.preview.rows.len(), PREVIEW_ROWS);
        assert_eq!(result.preview.columns, vec!["x"]);
        assert_eq!(result.preview.rows[0], vec!["0"]);
    }

    #[test]
    fn test_preview_renders_missing_marker() {
        let t = table(vec![int_col("x", vec![None, Some(2)])]);
        let result = Profiler::new().profile(&t).unwrap();
        assert_eq!(result.preview.rows[0], vec!["—"]);
    }

    #[test]
    fn test_memory_estimate() {
        let t = table(vec![
            int_col("x", vec![Some(1), Some(2)]),
            text_col("y", vec!["ab", "cdef"]),
        ]);
        let result = Profiler::new().profile(&t).unwrap();

        // 2 ints at 8 bytes plus 6 bytes of text
        assert_eq!(result.memory.bytes, 22);
        assert!(result.memory.human.ends_with(" B"));
    }

    #[test]
    fn test_percentile_interpolation() {
        let values = vec![10.0, 20.0, 30.0];
        assert_eq!(percentile(&values, 0.5), 20.0);
        assert_eq!(percentile(&values, 0.25), 15.0);
        assert_eq!(percentile(&values, 0.0), 10.0);
        assert_eq!(percentile(&values, 1.0), 30.0);
        assert_eq!(percentile(&[7.0], 0.75), 7.0);
    }
}
