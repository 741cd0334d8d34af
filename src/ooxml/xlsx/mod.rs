//! Excel (.xlsx) spreadsheet support.
//!
//! This module reads and writes Microsoft Excel workbooks in the Office Open
//! XML SpreadsheetML format:
//!
//! - [`Workbook`]: opens a package and loads typed worksheets
//! - [`WorkbookWriter`]: builds a new package and saves it atomically
//! - [`Styles`]: the subset of `styles.xml` needed to recognize dates
//! - [`SharedStrings`]: the shared string table
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetsift::ooxml::xlsx::{Workbook, WorkbookWriter};
//! use sheetsift::sheet::Worksheet;
//!
//! let mut source = Workbook::open("input.xlsx")?;
//! let sheet = source.first_worksheet()?;
//!
//! let mut writer = WorkbookWriter::with_stylesheet(source.stylesheet_xml().unwrap_or_default());
//! let copy = writer.add_worksheet(sheet.name())?;
//! if let Some(header) = sheet.first_used_row() {
//!     for (column, cell) in sheet.row_cells(header) {
//!         copy.put_cell(1, column, cell.clone());
//!     }
//! }
//! writer.save("header-only.xlsx")?;
//! # Ok::<(), sheetsift::Error>(())
//! ```

pub mod cell;
pub mod parsers;
pub mod shared_strings;
pub mod styles;
pub mod template;
pub mod workbook;
pub mod worksheet;
pub mod writer;

pub use shared_strings::SharedStrings;
pub use styles::Styles;
pub use workbook::Workbook;
pub use worksheet::{Worksheet, WorksheetInfo};
pub use writer::{MutableWorksheet, WorkbookWriter};
