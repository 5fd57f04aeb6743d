// ============================================================
// TABLE TYPES
// ============================================================
// In-memory tabular structure produced by parsing

use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};

/// Inferred type tag for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Integer,
    Float,
    Boolean,
    Datetime,
    Text,
}

impl DataType {
    /// Display label used in the dtypes section of a report
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Datetime => "datetime",
            DataType::Text => "text",
        }
    }

    /// Whether columns of this type contribute to the numeric summary
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

/// A single typed cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Numeric view of the cell, if it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Render the cell for previews; missing becomes a distinct marker
    pub fn display(&self) -> String {
        match self {
            CellValue::Int(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Bool(v) => v.to_string(),
            CellValue::Text(v) => v.clone(),
            CellValue::Missing => "—".to_string(),
        }
    }

    /// Per-cell component of a row's duplicate-detection key.
    /// Tagged so `Int(1)` and `Text("1")` can never collide across columns;
    /// callers keep one component per cell rather than joining them.
    pub fn group_key(&self) -> String {
        match self {
            CellValue::Int(v) => format!("i:{}", v),
            CellValue::Float(v) => format!("f:{}", v),
            CellValue::Bool(v) => format!("b:{}", v),
            CellValue::Text(v) => format!("t:{}", v),
            CellValue::Missing => "m".to_string(),
        }
    }

    /// Approximate in-memory footprint of this cell in bytes
    pub fn estimated_bytes(&self) -> usize {
        match self {
            CellValue::Int(_) | CellValue::Float(_) => 8,
            CellValue::Bool(_) => 1,
            CellValue::Text(v) => v.len(),
            CellValue::Missing => 0,
        }
    }
}

/// A named, typed column of equal length with its table's row count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub dtype: DataType,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: String, dtype: DataType, values: Vec<CellValue>) -> Self {
        Self { name, dtype, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells in this column
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }
}

/// Ordered collection of named, equal-length columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, enforcing the equal-length and unique-name invariants
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(AppError::ParseError("table has no columns".to_string()));
        }

        let row_count = columns[0].len();
        for col in &columns {
            if col.name.is_empty() {
                return Err(AppError::ParseError(
                    "table has a column with an empty name".to_string(),
                ));
            }
            if col.len() != row_count {
                return Err(AppError::ParseError(format!(
                    "column '{}' has {} rows, expected {}",
                    col.name,
                    col.len(),
                    row_count
                )));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(AppError::ParseError(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Cells of row `index`, in column order. Panics if out of range.
    pub fn row(&self, index: usize) -> Vec<&CellValue> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }
}
