//! Worksheet implementation for Excel files.

use crate::sheet::{Cell, CellGrid, Worksheet as WorksheetTrait};

/// Information about a worksheet, as declared in `xl/workbook.xml`.
#[derive(Debug, Clone, Default)]
pub struct WorksheetInfo {
    /// Worksheet name
    pub name: String,
    /// Relationship ID for the worksheet part
    pub relationship_id: String,
    /// Sheet ID
    pub sheet_id: u32,
    /// Whether the sheet is hidden (or very hidden)
    pub hidden: bool,
}

/// A fully loaded worksheet of an `.xlsx` workbook.
///
/// Values are already typed: shared strings are resolved and numbers in
/// date-formatted cells are dates.
#[derive(Debug, Clone)]
pub struct Worksheet {
    info: WorksheetInfo,
    cells: CellGrid,
}

impl Worksheet {
    pub(crate) fn new(info: WorksheetInfo, cells: CellGrid) -> Self {
        Self { info, cells }
    }

    /// Worksheet information from the workbook.
    pub fn info(&self) -> &WorksheetInfo {
        &self.info
    }

    /// The underlying cell storage.
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }
}

impl WorksheetTrait for Worksheet {
    fn name(&self) -> &str {
        &self.info.name
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
