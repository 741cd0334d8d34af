//! Common types for spreadsheet operations.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::date::ExcelDateTime;
use crate::common::format::format_number;

/// Types of data that can be stored in a cell.
///
/// The typed probes (`as_number`, `as_date`, `as_text`) only succeed for the
/// matching native kind; they never fail on a mismatch, they return `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// Empty cell
    #[default]
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
    /// Date/time value (stored as serial number)
    DateTime(ExcelDateTime),
    /// Error value (e.g. `#N/A`)
    Error(String),
}

impl CellValue {
    /// Check if the cell holds no value. An empty string counts as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Native numeric value, if the cell holds a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Native date/time value, if the cell holds a valid date.
    #[inline]
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => dt.to_naive(),
            _ => None,
        }
    }

    /// Native text, if the cell holds a string.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the cell contains a date/time value.
    #[inline]
    pub fn is_date(&self) -> bool {
        matches!(self, CellValue::DateTime(_))
    }

    /// Text shown for the value, independent of its number format.
    ///
    /// Numbers use their shortest invariant form, dates print as
    /// `yyyy-MM-dd` (plus `HH:mm:ss` when a time of day is present) and
    /// booleans as `TRUE`/`FALSE`.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
            CellValue::Int(i) => itoa::Buffer::new().format(*i).to_string(),
            CellValue::Float(f) => format_number(*f),
            CellValue::String(s) => s.clone(),
            CellValue::DateTime(dt) => match dt.to_naive() {
                Some(value) if value.num_seconds_from_midnight() == 0 => {
                    value.format("%Y-%m-%d").to_string()
                },
                Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => format_number(dt.serial()),
            },
            CellValue::Error(e) => e.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<ExcelDateTime> for CellValue {
    fn from(value: ExcelDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// Opaque reference to a cell format in the workbook stylesheet.
///
/// The id is an index into the `cellXfs` table of `xl/styles.xml`. Copying
/// a cell between workbooks that share a stylesheet copies its number format,
/// font, fill, border and alignment together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleId(pub u32);

impl StyleId {
    /// The workbook's default cell format.
    pub const DEFAULT: StyleId = StyleId(0);

    /// Short date (`m/d/yyyy`) in the built-in writer stylesheet.
    pub const DATE: StyleId = StyleId(1);

    /// Date and time (`m/d/yy h:mm`) in the built-in writer stylesheet.
    pub const DATE_TIME: StyleId = StyleId(2);

    /// Bold text in the built-in writer stylesheet.
    pub const BOLD: StyleId = StyleId(3);

    /// Index into `cellXfs`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the default cell format.
    #[inline]
    pub fn is_default(self) -> bool {
        self.0 == 0
    }
}

/// A cell's value together with its style.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Cell value
    pub value: CellValue,
    /// Cell format
    pub style: StyleId,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub fn new(value: impl Into<CellValue>, style: StyleId) -> Self {
        Self {
            value: value.into(),
            style,
        }
    }

    /// Check if the cell holds no value (it may still carry a style).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
