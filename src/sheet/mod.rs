//! Format-independent spreadsheet model.
//!
//! This module defines the cell model shared by the `.xlsx` reader and
//! writer and the filter engine: typed cell values with non-failing probes,
//! opaque cell styles, Excel serial dates, and the [`Worksheet`] trait that
//! type inference and row matching are written against.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetsift::ooxml::xlsx::Workbook;
//! use sheetsift::sheet::Worksheet;
//!
//! let mut workbook = Workbook::open("data.xlsx")?;
//! let sheet = workbook.first_worksheet()?;
//! if let Some(header) = sheet.first_used_row() {
//!     for (column, cell) in sheet.row_cells(header) {
//!         println!("{}: {}", column, cell.value);
//!     }
//! }
//! # Ok::<(), sheetsift::Error>(())
//! ```

// Submodule declarations
pub mod date;
pub mod grid;
pub mod traits;
pub mod types;

// Re-exports
pub use date::ExcelDateTime;
pub use grid::CellGrid;
pub use traits::Worksheet;
pub use types::{Cell, CellValue, StyleId};
