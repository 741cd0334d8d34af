//! Column type inference and filtered export.
//!
//! The pieces fit together in the order a host uses them:
//!
//! 1. [`column_names`] lists the header of the first worksheet.
//! 2. [`column_filter_definition`] samples a column, infers its
//!    [`ColumnValueType`] and offers the [`FilterOperation`]s of that type.
//! 3. [`FilterCriterion::new`] validates a user-entered value and stores it
//!    in canonical form (see [`codec`]).
//! 4. [`export_filtered`] copies the header and every row matching all
//!    criteria to a new workbook, keeping cell styles.
//!
//! [`SheetFilter`] wraps these calls with argument checks.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetsift::filter::{
//!     export_filtered, ColumnValueType, Culture, FilterCriterion, FilterOperation, FilterSettings,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! let criteria = [
//!     FilterCriterion::new("Amount", ColumnValueType::Number, FilterOperation::Equals, "100", Culture::Invariant)?,
//!     FilterCriterion::new("Region", ColumnValueType::Text, FilterOperation::InList, "North, South", Culture::Invariant)?,
//! ];
//! let result = export_filtered(
//!     "sales.xlsx",
//!     "filtered/sales.xlsx",
//!     &criteria,
//!     &FilterSettings::default(),
//!     &CancellationToken::new(),
//! )?;
//! assert!(result.output_path.ends_with("sales.xlsx"));
//! # Ok::<(), sheetsift::Error>(())
//! ```

pub mod codec;
pub mod columns;
pub mod criterion;
pub mod culture;
pub mod export;
pub mod facade;
pub mod header;
pub mod inference;
pub mod matcher;
pub mod operation;
pub mod settings;
pub mod value_type;

#[cfg(test)]
mod tests;

pub use codec::{CriterionValue, decode, encode, split_list};
pub use columns::{column_filter_definition, column_names};
pub use criterion::{ColumnFilterDefinition, ExportResult, FilterCriterion};
pub use culture::Culture;
pub use export::export_filtered;
pub use facade::SheetFilter;
pub use header::HeaderMap;
pub use inference::infer_column_type;
pub use matcher::{CompiledCriterion, NUMBER_TOLERANCE, RowMatcher, numbers_equal};
pub use operation::{FilterOperation, default_operation, operations_for};
pub use settings::{DEFAULT_SAMPLE_LIMIT, FilterSettings};
pub use value_type::ColumnValueType;
