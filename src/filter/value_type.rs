//! Semantic value type of a column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sheet::CellValue;

/// Value type inferred for a column from its sampled cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnValueType {
    /// Free text, also the fallback for mixed columns
    Text,
    /// Integer or floating point numbers
    Number,
    /// Dates, compared at day granularity
    Date,
}

impl ColumnValueType {
    /// Display name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnValueType::Text => "Text",
            ColumnValueType::Number => "Number",
            ColumnValueType::Date => "Date",
        }
    }

    /// Classify a single non-empty cell by its native kind.
    ///
    /// Booleans, errors and numeric-looking strings are all text.
    pub fn of_cell(value: &CellValue) -> Self {
        match value {
            CellValue::DateTime(_) => ColumnValueType::Date,
            CellValue::Int(_) | CellValue::Float(_) => ColumnValueType::Number,
            _ => ColumnValueType::Text,
        }
    }
}

impl fmt::Display for ColumnValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
