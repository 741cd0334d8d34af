//! Common types and utilities shared across the crate.
//!
//! This module hosts the unified error type and the XML helpers used by both
//! the workbook reader and the workbook writer.

// Submodule declarations
pub mod error;
pub mod format;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
