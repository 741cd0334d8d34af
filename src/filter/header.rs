//! Header row resolution.

use std::collections::HashMap;

use crate::common::{Error, Result};
use crate::sheet::Worksheet;

/// Column names of a header row mapped to their 1-based column index.
///
/// Names are trimmed and blank names are skipped. When a name repeats, the
/// leftmost column wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    /// Distinct names in left-to-right order
    columns: Vec<(String, u32)>,
    index: HashMap<String, u32>,
    /// Rightmost column holding a non-empty header cell
    last_column: u32,
}

impl HeaderMap {
    /// Read the header names of `row`.
    pub fn from_row<W: Worksheet + ?Sized>(sheet: &W, row: u32) -> Self {
        let mut header = HeaderMap::default();
        for (column, cell) in sheet.row_cells(row) {
            if cell.is_empty() {
                continue;
            }
            header.last_column = header.last_column.max(column);

            let name = cell.value.display_text().trim().to_string();
            if name.is_empty() || header.index.contains_key(&name) {
                continue;
            }
            header.index.insert(name.clone(), column);
            header.columns.push((name, column));
        }
        header
    }

    /// Locate the header of a worksheet: its first used row.
    ///
    /// # Errors
    ///
    /// `NoHeaderRow` when the worksheet has no used row, `EmptyHeader` when
    /// the first used row has no non-blank name.
    pub fn locate<W: Worksheet + ?Sized>(sheet: &W) -> Result<(u32, Self)> {
        let row = sheet.first_used_row().ok_or(Error::NoHeaderRow)?;
        let header = Self::from_row(sheet, row);
        if header.is_empty() {
            return Err(Error::EmptyHeader);
        }
        Ok((row, header))
    }

    /// Column index of a name, compared after trimming.
    pub fn column(&self, name: &str) -> Option<u32> {
        self.index.get(name.trim()).copied()
    }

    /// Column index of a name.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` when no header cell carries the name.
    pub fn resolve(&self, name: &str) -> Result<u32> {
        self.column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.trim().to_string()))
    }

    /// Header names in left-to-right order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Rightmost header column; rows are copied up to this column.
    #[inline]
    pub fn last_column(&self) -> u32 {
        self.last_column
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
