//! Styles and formatting for Excel files.
//!
//! The filter engine never rewrites styles: exported workbooks inherit the
//! source `styles.xml` verbatim and cells keep their `cellXfs` index. What
//! the reader needs from the stylesheet is narrower, namely which cell
//! formats display their number as a date.
//!
//! - `parser`: streaming parser for `numFmts` and `cellXfs`
//! - `number_format`: number format records and date detection
//! - `cell_style`: cell format records
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetsift::ooxml::xlsx::Styles;
//! use sheetsift::sheet::StyleId;
//!
//! let styles_xml = std::fs::read_to_string("xl/styles.xml")?;
//! let styles = Styles::parse(&styles_xml)?;
//! println!("style 1 is a date: {}", styles.is_date_style(StyleId(1)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cell_style;
mod number_format;
mod parser;

pub use cell_style::CellStyle;
pub use number_format::{
    FIRST_CUSTOM_FORMAT_ID, NumberFormat, is_builtin_date_format, is_date_format,
};

use std::collections::HashMap;

use crate::ooxml::error::Result;
use crate::sheet::StyleId;

/// Styles collection for an Excel workbook.
#[derive(Debug, Default)]
pub struct Styles {
    /// Custom number formats (ID -> format code)
    pub number_formats: HashMap<u32, NumberFormat>,
    /// Cell format records (cellXfs, the formats cells refer to)
    pub cell_xfs: Vec<CellStyle>,
}

impl Styles {
    /// Create a new empty styles collection.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse styles from xl/styles.xml content.
    pub fn parse(content: &str) -> Result<Self> {
        parser::parse_styles(content)
    }

    /// Get a custom number format by ID.
    #[inline]
    pub fn get_number_format(&self, id: u32) -> Option<&NumberFormat> {
        self.number_formats.get(&id)
    }

    /// Get a cell format by style ID.
    #[inline]
    pub fn get_cell_style(&self, style: StyleId) -> Option<&CellStyle> {
        self.cell_xfs.get(style.index())
    }

    /// Get the number of cell formats defined.
    #[inline]
    pub fn cell_style_count(&self) -> usize {
        self.cell_xfs.len()
    }

    /// Check if a number format ID displays dates, built-in or custom.
    pub fn is_date_format_id(&self, num_fmt_id: u32) -> bool {
        match self.get_number_format(num_fmt_id) {
            Some(format) => format.is_date_format(),
            None => is_builtin_date_format(num_fmt_id),
        }
    }

    /// Check if cells with this style display their number as a date.
    ///
    /// Unknown style IDs are treated as the default (non-date) format.
    pub fn is_date_style(&self, style: StyleId) -> bool {
        self.get_cell_style(style)
            .is_some_and(|xf| self.is_date_format_id(xf.num_fmt_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_styles() {
        let mut styles = Styles::new();
        styles.cell_xfs.push(CellStyle::default());
        styles.cell_xfs.push(CellStyle::with_number_format(14));
        styles.cell_xfs.push(CellStyle::with_number_format(164));
        styles.cell_xfs.push(CellStyle::with_number_format(165));
        styles
            .number_formats
            .insert(164, NumberFormat::new(164, "dd.mm.yyyy".to_string()));
        styles
            .number_formats
            .insert(165, NumberFormat::new(165, "0.000".to_string()));

        assert!(!styles.is_date_style(StyleId(0)));
        assert!(styles.is_date_style(StyleId(1)));
        assert!(styles.is_date_style(StyleId(2)));
        assert!(!styles.is_date_style(StyleId(3)));
        assert!(!styles.is_date_style(StyleId(42)));
    }
}
