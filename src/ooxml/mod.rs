//! Office Open XML (OOXML) spreadsheet implementation.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): ZIP package access, relationships and the
//!    content-type and relationship constants
//! 2. **SpreadsheetML** (`xlsx`): workbook reading, typed worksheets and the
//!    workbook writer
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetsift::ooxml::xlsx::Workbook;
//! use sheetsift::sheet::Worksheet;
//!
//! let mut workbook = Workbook::open("data.xlsx")?;
//! let sheet = workbook.first_worksheet()?;
//! println!("{} rows used", sheet.last_used_row().unwrap_or(0));
//! # Ok::<(), sheetsift::Error>(())
//! ```
pub mod error;
pub mod opc;
pub mod xlsx;

pub use error::OoxmlError;
