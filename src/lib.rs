//! Sheetsift - column type inference and filtered export for Excel workbooks
//!
//! This library reads the first worksheet of an `.xlsx` workbook, infers the
//! value type of its columns and writes a new workbook holding only the rows
//! that satisfy a set of typed criteria, with the original cell styles.
//!
//! # Features
//!
//! - **Type inference**: classify a column as Text, Number or Date from a
//!   bounded sample of its cells
//! - **Typed criteria**: equality, substring, inclusive ranges and lists, with
//!   culture-tolerant parsing of user input and a canonical stored form
//! - **Style-preserving export**: matching rows keep their values and cell
//!   formats; the source stylesheet is carried over unchanged
//! - **Cancellation**: long scans poll a `CancellationToken` on every row
//!
//! # Example - Listing columns
//!
//! ```no_run
//! use sheetsift::filter::SheetFilter;
//! use tokio_util::sync::CancellationToken;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = SheetFilter::default();
//! let token = CancellationToken::new();
//!
//! for name in filter.column_names("sales.xlsx")? {
//!     let definition = filter.column_filter_definition("sales.xlsx", &name, &token)?;
//!     println!("{}: {} {:?}", name, definition.value_type, definition.operations);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Exporting matching rows
//!
//! ```no_run
//! use sheetsift::filter::{ColumnValueType, Culture, FilterCriterion, FilterOperation, SheetFilter};
//! use tokio_util::sync::CancellationToken;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let criteria = vec![
//!     FilterCriterion::new("Amount", ColumnValueType::Number, FilterOperation::Equals, "100", Culture::Invariant)?,
//!     FilterCriterion::new("Region", ColumnValueType::Text, FilterOperation::InList, "North, South", Culture::Invariant)?,
//! ];
//!
//! let result = SheetFilter::default().export(
//!     "sales.xlsx",
//!     "out/sales-filtered.xlsx",
//!     &criteria,
//!     &CancellationToken::new(),
//! )?;
//! println!("exported {} rows to {}", result.exported_row_count, result.output_path.display());
//! # Ok(())
//! # }
//! ```

/// Common types shared across modules: errors and text formatting helpers
pub mod common;

/// Column type inference, criteria and filtered export
pub mod filter;

/// OOXML (Office Open XML) package and SpreadsheetML reader/writer
///
/// This module reads and writes the parts of `.xlsx` workbooks needed to
/// copy rows between workbooks.
pub mod ooxml;

/// Format-independent worksheet model: cell values, styles and dates
pub mod sheet;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use filter::{
    ColumnFilterDefinition, ColumnValueType, Culture, ExportResult, FilterCriterion, FilterOperation,
    FilterSettings, SheetFilter,
};
pub use sheet::{Cell, CellValue, StyleId};
