//! Traits for spreadsheet abstraction.

use super::types::{Cell, CellValue, StyleId};

static EMPTY_VALUE: CellValue = CellValue::Empty;

/// Read access to a worksheet (1-based rows and columns).
///
/// Implemented by the `.xlsx` reader and by the mutable worksheet of the
/// writer, so type inference and row matching work on either.
pub trait Worksheet {
    /// Get the worksheet name.
    fn name(&self) -> &str;

    /// Get a cell by row and column. `None` when nothing is stored there.
    fn cell(&self, row: u32, column: u32) -> Option<&Cell>;

    /// Cells of one row in ascending column order.
    fn row_cells(&self, row: u32) -> Box<dyn Iterator<Item = (u32, &Cell)> + '_>;

    /// First row holding a non-empty value.
    fn first_used_row(&self) -> Option<u32>;

    /// Last row holding a non-empty value.
    fn last_used_row(&self) -> Option<u32>;

    /// Get cell value by row and column; missing cells read as `Empty`.
    fn cell_value(&self, row: u32, column: u32) -> &CellValue {
        self.cell(row, column)
            .map(|cell| &cell.value)
            .unwrap_or(&EMPTY_VALUE)
    }

    /// Get cell style by row and column; missing cells use the default style.
    fn cell_style(&self, row: u32, column: u32) -> StyleId {
        self.cell(row, column)
            .map(|cell| cell.style)
            .unwrap_or_default()
    }

    /// Check if the cell holds no value.
    fn is_empty(&self, row: u32, column: u32) -> bool {
        self.cell_value(row, column).is_empty()
    }
}
