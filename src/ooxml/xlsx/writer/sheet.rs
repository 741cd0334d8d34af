//! Writer module for creating Excel worksheets.

use std::fmt::Write as FmtWrite;

use super::strings::MutableSharedStrings;
use crate::common::format::format_number;
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::xlsx::cell::{column_to_letters, coords_to_reference};
use crate::sheet::{Cell, CellGrid, CellValue, ExcelDateTime, StyleId, Worksheet as WorksheetTrait};

/// A worksheet being built for a new workbook.
///
/// Cells are stored sparsely with their style; rows and columns are 1-based.
#[derive(Debug, Clone)]
pub struct MutableWorksheet {
    name: String,
    sheet_id: u32,
    cells: CellGrid,
}

impl MutableWorksheet {
    /// Create an empty worksheet.
    pub fn new(name: String, sheet_id: u32) -> Self {
        Self {
            name,
            sheet_id,
            cells: CellGrid::new(),
        }
    }

    /// Get the sheet ID.
    #[inline]
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    /// Set a cell value together with its style.
    ///
    /// An empty value with the default style is not written; with any other
    /// style it becomes a formatted blank cell.
    pub fn set_cell<V: Into<CellValue>>(&mut self, row: u32, column: u32, value: V, style: StyleId) {
        self.cells.insert(row, column, Cell::new(value, style));
    }

    /// Set a cell value using the default style.
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, row: u32, column: u32, value: V) {
        self.set_cell(row, column, value, StyleId::DEFAULT);
    }

    /// Copy a cell (value and style) into this worksheet.
    #[inline]
    pub fn put_cell(&mut self, row: u32, column: u32, cell: Cell) {
        self.cells.insert(row, column, cell);
    }

    /// Number of stored cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Used range as `(min_row, min_col, max_row, max_col)` over written cells.
    fn used_range(&self) -> Option<(u32, u32, u32, u32)> {
        let mut range: Option<(u32, u32, u32, u32)> = None;
        for row in self.cells.row_numbers() {
            for (column, cell) in self.cells.row(row) {
                if !is_written(cell) {
                    continue;
                }
                range = Some(match range {
                    None => (row, column, row, column),
                    Some((r0, c0, r1, c1)) => (r0.min(row), c0.min(column), r1.max(row), c1.max(column)),
                });
            }
        }
        range
    }

    /// Serialize the worksheet part.
    ///
    /// Strings go to the shared strings table. Date values are converted when
    /// their date system differs from the workbook's.
    pub fn to_xml(&self, shared_strings: &mut MutableSharedStrings, date1904: bool) -> String {
        let mut xml = String::with_capacity(1024 + self.cells.len() * 32);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(
            xml,
            r#"<worksheet xmlns="{}" xmlns:r="{}">"#,
            namespace::SML_MAIN,
            namespace::OFC_RELATIONSHIPS
        );

        match self.used_range() {
            Some((min_row, min_col, max_row, max_col)) if (min_row, min_col) != (max_row, max_col) => {
                let _ = write!(
                    xml,
                    r#"<dimension ref="{}{}:{}{}"/>"#,
                    column_to_letters(min_col),
                    min_row,
                    column_to_letters(max_col),
                    max_row
                );
            },
            Some((row, column, ..)) => {
                let _ = write!(xml, r#"<dimension ref="{}"/>"#, coords_to_reference(column, row));
            },
            None => xml.push_str(r#"<dimension ref="A1"/>"#),
        }

        xml.push_str(r#"<sheetViews><sheetView workbookViewId="0"/></sheetViews>"#);
        xml.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

        xml.push_str("<sheetData>");
        for row in self.cells.row_numbers() {
            let mut cells = self.cells.row(row).filter(|(_, cell)| is_written(cell)).peekable();
            if cells.peek().is_none() {
                continue;
            }

            let _ = write!(xml, r#"<row r="{}">"#, row);
            for (column, cell) in cells {
                write_cell(&mut xml, &coords_to_reference(column, row), cell, shared_strings, date1904);
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");

        xml.push_str(
            r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
        );
        xml.push_str("</worksheet>");
        xml
    }
}

impl WorksheetTrait for MutableWorksheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.cells.get(row, column)
    }

    fn row_cells(&self, row: u32) -> Box<dyn Iterator<Item = (u32, &Cell)> + '_> {
        Box::new(self.cells.row(row))
    }

    fn first_used_row(&self) -> Option<u32> {
        self.cells.first_used_row()
    }

    fn last_used_row(&self) -> Option<u32> {
        self.cells.last_used_row()
    }
}

/// Whether a cell produces a `<c>` element.
#[inline]
fn is_written(cell: &Cell) -> bool {
    !cell.is_empty() || !cell.style.is_default()
}

/// Write a single cell to XML.
fn write_cell(
    xml: &mut String,
    cell_ref: &str,
    cell: &Cell,
    shared_strings: &mut MutableSharedStrings,
    date1904: bool,
) {
    let style_attr = if cell.style.is_default() {
        String::new()
    } else {
        format!(r#" s="{}""#, cell.style.0)
    };

    match &cell.value {
        CellValue::Empty => {
            let _ = write!(xml, r#"<c r="{}"{}/>"#, cell_ref, style_attr);
        },
        CellValue::String(s) if s.is_empty() => {
            let _ = write!(xml, r#"<c r="{}"{}/>"#, cell_ref, style_attr);
        },
        CellValue::String(s) => {
            let string_index = shared_strings.add_string(s);
            let _ = write!(
                xml,
                r#"<c r="{}"{} t="s"><v>{}</v></c>"#,
                cell_ref, style_attr, string_index
            );
        },
        CellValue::Int(i) => {
            let _ = write!(xml, r#"<c r="{}"{}><v>{}</v></c>"#, cell_ref, style_attr, i);
        },
        CellValue::Float(f) if !f.is_finite() => {
            let _ = write!(xml, r#"<c r="{}"{} t="e"><v>#NUM!</v></c>"#, cell_ref, style_attr);
        },
        CellValue::Float(f) => {
            let _ = write!(
                xml,
                r#"<c r="{}"{}><v>{}</v></c>"#,
                cell_ref,
                style_attr,
                format_number(*f)
            );
        },
        CellValue::Bool(b) => {
            let _ = write!(
                xml,
                r#"<c r="{}"{} t="b"><v>{}</v></c>"#,
                cell_ref,
                style_attr,
                if *b { "1" } else { "0" }
            );
        },
        CellValue::DateTime(d) => {
            let serial = serial_in_system(*d, date1904);
            let _ = write!(
                xml,
                r#"<c r="{}"{}><v>{}</v></c>"#,
                cell_ref,
                style_attr,
                format_number(serial)
            );
        },
        CellValue::Error(e) => {
            let _ = write!(
                xml,
                r#"<c r="{}"{} t="e"><v>{}</v></c>"#,
                cell_ref,
                style_attr,
                escape_xml(e)
            );
        },
    }
}

/// Serial of a date value in the target date system.
fn serial_in_system(value: ExcelDateTime, date1904: bool) -> f64 {
    if value.is_1904() == date1904 {
        return value.serial();
    }
    match value.to_naive() {
        Some(naive) => ExcelDateTime::from_naive(naive, date1904).serial(),
        None => value.serial(),
    }
}
