// ============================================================
// CSV PARSER
// ============================================================
// Split text into a typed Table with delimiter auto-detection

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Column, DataType, Table};

/// Values treated as missing during parsing
const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "na", "n/a", "null", "NULL", "None", "none", "NaN", "nan", "NAN",
];

/// Boolean tokens accepted during type inference (case-insensitive).
/// Bare 0/1 columns infer as integer because integer inference runs first.
const BOOL_TOKENS: &[&str] = &["true", "false", "yes", "no"];

/// Date/time layouts accepted during datetime inference
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Rows wider than the header by more than this many fields are an error;
/// narrower overflows are truncated with a warning
const ROW_OVERFLOW_TOLERANCE: usize = 3;

/// Parsed table together with malformed-row warnings
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub table: Table,
    pub warnings: Vec<String>,
}

/// CSV parser configuration and entry point
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse text with automatic delimiter detection
    pub fn parse_auto(text: &str) -> Result<ParsedTable> {
        let delimiter = Self::detect_delimiter(text);
        Self::new().with_delimiter(delimiter).parse_content(text)
    }

    /// Parse CSV content into a typed [`Table`].
    ///
    /// The first record is the header; blank header cells synthesize
    /// positional names and duplicates are disambiguated by suffixing.
    /// Short rows are padded with missing, overlong rows truncated with a
    /// warning (or rejected past [`ROW_OVERFLOW_TOLERANCE`]).
    pub fn parse_content(&self, content: &str) -> Result<ParsedTable> {
        if content.trim().is_empty() {
            return Err(AppError::ParseError("input is empty".to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .has_headers(false)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("failed to read row {}: {}", i + 1, e))
            })?;
            records.push(record);
        }

        let mut iter = records.into_iter();
        let header_record = iter
            .next()
            .ok_or_else(|| AppError::ParseError("input has no rows".to_string()))?;

        let headers = Self::resolve_headers(&header_record);
        if headers.is_empty() {
            return Err(AppError::ParseError("input has no columns".to_string()));
        }

        let mut warnings = Vec::new();
        let mut grid: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        let mut row_index = 0usize;

        for record in iter {
            if record.len() > headers.len() + ROW_OVERFLOW_TOLERANCE {
                return Err(AppError::ParseError(format!(
                    "row {} has {} fields, expected {}",
                    row_index + 1,
                    record.len(),
                    headers.len()
                )));
            }
            if record.len() > headers.len() {
                warnings.push(format!(
                    "row {}: truncated {} extra field(s)",
                    row_index + 1,
                    record.len() - headers.len()
                ));
            }

            // Pad short rows with empty fields, which read back as missing
            for (col, cell) in grid.iter_mut().enumerate() {
                cell.push(record.get(col).unwrap_or("").to_string());
            }
            row_index += 1;
        }

        if row_index == 0 {
            return Err(AppError::ParseError("input has no data rows".to_string()));
        }

        let columns = headers
            .into_iter()
            .zip(grid)
            .map(|(name, raw)| Self::build_column(name, raw))
            .collect();

        let table = Table::new(columns)?;
        Ok(ParsedTable { table, warnings })
    }

    /// Turn a header record into non-empty, unique column names
    fn resolve_headers(record: &StringRecord) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(record.len());

        for (i, raw) in record.iter().enumerate() {
            let base = if raw.trim().is_empty() {
                format!("column_{}", i + 1)
            } else {
                raw.trim().to_string()
            };

            if names.iter().any(|n| n == &base) {
                let mut suffix = 2;
                while names.iter().any(|n| *n == format!("{}_{}", base, suffix)) {
                    suffix += 1;
                }
                names.push(format!("{}_{}", base, suffix));
            } else {
                names.push(base);
            }
        }

        names
    }

    /// Infer the column type and convert raw strings into typed cells
    fn build_column(name: String, raw: Vec<String>) -> Column {
        let dtype = Self::infer_type(&raw);

        let values = raw
            .into_iter()
            .map(|v| {
                if Self::is_missing(&v) {
                    return CellValue::Missing;
                }
                match dtype {
                    // Unparseable-for-type falls through to missing
                    DataType::Integer => v
                        .parse::<i64>()
                        .map(CellValue::Int)
                        .unwrap_or(CellValue::Missing),
                    DataType::Float => v
                        .parse::<f64>()
                        .map(CellValue::Float)
                        .unwrap_or(CellValue::Missing),
                    DataType::Boolean => match v.to_lowercase().as_str() {
                        "true" | "yes" => CellValue::Bool(true),
                        "false" | "no" => CellValue::Bool(false),
                        _ => CellValue::Missing,
                    },
                    DataType::Datetime | DataType::Text => CellValue::Text(v),
                }
            })
            .collect();

        Column::new(name, dtype, values)
    }

    /// Single inference pass over all non-missing values.
    /// Priority: integer, float, boolean, datetime, text.
    fn infer_type(raw: &[String]) -> DataType {
        let present: Vec<&str> = raw
            .iter()
            .map(|v| v.as_str())
            .filter(|v| !Self::is_missing(v))
            .collect();

        if present.is_empty() {
            return DataType::Text;
        }

        if present.iter().all(|v| v.parse::<i64>().is_ok()) {
            return DataType::Integer;
        }
        if present.iter().all(|v| v.parse::<f64>().is_ok()) {
            return DataType::Float;
        }
        if present
            .iter()
            .all(|v| BOOL_TOKENS.contains(&v.to_lowercase().as_str()))
        {
            return DataType::Boolean;
        }
        if present.iter().all(|v| Self::parses_as_datetime(v)) {
            return DataType::Datetime;
        }

        DataType::Text
    }

    fn parses_as_datetime(value: &str) -> bool {
        DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
            || DATETIME_FORMATS
                .iter()
                .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
    }

    fn is_missing(value: &str) -> bool {
        NULL_MARKERS.contains(&value.trim())
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe, colon).
    /// Scores each candidate by mean per-line count over consistency.
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|', b':'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&c| c == delimiter).count())
                .collect();

            if field_counts.is_empty() {
                continue;
            }

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParsedTable {
        CsvParser::parse_auto(content).unwrap()
    }

    #[test]
    fn test_parse_simple_csv() {
        let parsed = parse("name,age,city\nAlice,30,NYC\nBob,25,LA\n");

        assert_eq!(parsed.table.row_count(), 2);
        assert_eq!(parsed.table.column_count(), 3);
        assert_eq!(parsed.table.column_names(), vec!["name", "age", "city"]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_row_count_matches_data_lines() {
        let parsed = parse("a,b\n1,2\n3,4\n5,6\n");
        assert_eq!(parsed.table.row_count(), 3);
        assert_eq!(parsed.table.column_count(), 2);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a|b|c\nd|e|f"), b'|');
    }

    #[test]
    fn test_parse_semicolon_auto_detected() {
        let parsed = parse("a;b\n1;2\n");
        assert_eq!(parsed.table.column_count(), 2);
        assert_eq!(parsed.table.columns()[0].values[0], CellValue::Int(1));
    }

    #[test]
    fn test_type_inference() {
        let parsed = parse(
            "int,float,bool,date,text\n\
             1,1.5,true,2024-01-01,hello\n\
             2,2.5,no,2024-02-15,world\n",
        );
        let dtypes: Vec<DataType> = parsed.table.columns().iter().map(|c| c.dtype).collect();
        assert_eq!(
            dtypes,
            vec![
                DataType::Integer,
                DataType::Float,
                DataType::Boolean,
                DataType::Datetime,
                DataType::Text
            ]
        );
    }

    #[test]
    fn test_integers_promote_to_float_on_mixed() {
        let parsed = parse("x\n1\n2.5\n");
        assert_eq!(parsed.table.columns()[0].dtype, DataType::Float);
        assert_eq!(parsed.table.columns()[0].values[0], CellValue::Float(1.0));
    }

    #[test]
    fn test_zero_one_column_is_integer() {
        let parsed = parse("flag\n0\n1\n0\n");
        assert_eq!(parsed.table.columns()[0].dtype, DataType::Integer);
    }

    #[test]
    fn test_null_markers_become_missing() {
        let parsed = parse("x\n1\nNA\nnull\n4\n");
        let col = &parsed.table.columns()[0];
        assert_eq!(col.dtype, DataType::Integer);
        assert_eq!(col.missing_count(), 2);
    }

    #[test]
    fn test_uppercase_nan_is_missing_not_float() {
        let parsed = parse("x\n1\nNAN\n3\n");
        let col = &parsed.table.columns()[0];
        assert_eq!(col.dtype, DataType::Integer);
        assert_eq!(col.missing_count(), 1);
    }

    #[test]
    fn test_blank_header_synthesizes_name() {
        let parsed = parse(",b\n1,2\n");
        assert_eq!(parsed.table.column_names(), vec!["column_1", "b"]);
    }

    #[test]
    fn test_duplicate_headers_get_suffixes() {
        let parsed = parse("a,a,a\n1,2,3\n");
        assert_eq!(parsed.table.column_names(), vec!["a", "a_2", "a_3"]);
    }

    #[test]
    fn test_short_rows_padded_with_missing() {
        let parsed = parse("a,b,c\n1,2\n4,5,6\n");
        let last = &parsed.table.columns()[2];
        assert_eq!(last.values[0], CellValue::Missing);
        assert_eq!(last.values[1], CellValue::Int(6));
    }

    #[test]
    fn test_long_rows_truncated_with_warning() {
        let parsed = parse("a,b\n1,2,3\n4,5\n");
        assert_eq!(parsed.table.column_count(), 2);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("row 1"));
    }

    #[test]
    fn test_row_overflow_beyond_tolerance_errors() {
        let result = CsvParser::parse_auto("a,b\n1,2,3,4,5,6,7\n");
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_empty_input_errors() {
        assert!(matches!(
            CsvParser::parse_auto(""),
            Err(AppError::ParseError(_))
        ));
        assert!(matches!(
            CsvParser::parse_auto("   \n  \n"),
            Err(AppError::ParseError(_))
        ));
    }

    #[test]
    fn test_header_only_input_errors() {
        assert!(matches!(
            CsvParser::parse_auto("a,b,c\n"),
            Err(AppError::ParseError(_))
        ));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let parsed = parse("a,b\n1,2\n\n3,4\n");
        assert_eq!(parsed.table.row_count(), 2);
    }

    #[test]
    fn test_all_empty_row_kept_as_missing() {
        // A bare "," line is a data row of all-missing cells, not a blank line
        let parsed = parse("a,b\n1,2\n,\n3,4\n");

        assert_eq!(parsed.table.row_count(), 3);
        for col in parsed.table.columns() {
            assert_eq!(col.missing_count(), 1);
            assert_eq!(col.values[1], CellValue::Missing);
        }
    }

    #[test]
    fn test_quoted_fields_keep_delimiter() {
        let parsed = parse("name,notes\nAlice,\"likes a, b and c\"\nBob,ok\n");
        assert_eq!(parsed.table.column_count(), 2);
        assert_eq!(
            parsed.table.columns()[1].values[0],
            CellValue::Text("likes a, b and c".to_string())
        );
    }

    #[test]
    fn test_all_missing_column_is_text() {
        let parsed = parse("a,b\n1,NA\n2,\n");
        assert_eq!(parsed.table.columns()[1].dtype, DataType::Text);
        assert_eq!(parsed.table.columns()[1].missing_count(), 2);
    }
}
