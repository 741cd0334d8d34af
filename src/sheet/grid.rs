//! Sparse row/column cell storage shared by readers and writers.

use std::collections::BTreeMap;

use super::types::Cell;

/// Sparse cell storage keyed by 1-based row and column numbers.
///
/// Rows and cells are kept in ascending order, so iteration always follows
/// the sheet's top-to-bottom, left-to-right layout.
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    rows: BTreeMap<u32, BTreeMap<u32, Cell>>,
}

impl CellGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cell, replacing any previous cell at the same position.
    pub fn insert(&mut self, row: u32, column: u32, cell: Cell) {
        self.rows.entry(row).or_default().insert(column, cell);
    }

    /// Get a cell by row and column (1-based).
    #[inline]
    pub fn get(&self, row: u32, column: u32) -> Option<&Cell> {
        self.rows.get(&row).and_then(|cells| cells.get(&column))
    }

    /// Cells of one row in column order, including styled blanks.
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, &Cell)> + '_ {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cells| cells.iter().map(|(column, cell)| (*column, cell)))
    }

    /// All stored row numbers in ascending order.
    pub fn row_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    /// First row holding at least one non-empty value.
    pub fn first_used_row(&self) -> Option<u32> {
        self.rows
            .iter()
            .find(|(_, cells)| cells.values().any(|cell| !cell.is_empty()))
            .map(|(row, _)| *row)
    }

    /// Last row holding at least one non-empty value.
    pub fn last_used_row(&self) -> Option<u32> {
        self.rows
            .iter()
            .rev()
            .find(|(_, cells)| cells.values().any(|cell| !cell.is_empty()))
            .map(|(row, _)| *row)
    }

    /// Total number of stored cells.
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Whether the grid stores no cells at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellValue, StyleId};

    #[test]
    fn test_used_rows_skip_styled_blanks() {
        let mut grid = CellGrid::new();
        grid.insert(1, 1, Cell::new(CellValue::Empty, StyleId(3)));
        grid.insert(2, 2, Cell::new("header", StyleId::DEFAULT));
        grid.insert(5, 1, Cell::new(1, StyleId::DEFAULT));
        grid.insert(7, 1, Cell::new("", StyleId(2)));

        assert_eq!(grid.first_used_row(), Some(2));
        assert_eq!(grid.last_used_row(), Some(5));
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_row_order() {
        let mut grid = CellGrid::new();
        grid.insert(1, 3, Cell::new("c", StyleId::DEFAULT));
        grid.insert(1, 1, Cell::new("a", StyleId::DEFAULT));

        let columns: Vec<u32> = grid.row(1).map(|(column, _)| column).collect();
        assert_eq!(columns, vec![1, 3]);
        assert_eq!(grid.row(2).count(), 0);
    }
}
