//! Workbook round-trip tests for inference and export.

mod fixtures;
mod inference;
