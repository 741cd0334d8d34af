//! Unified error types for sheetsift.
//!
//! This module provides a single error type that covers package I/O,
//! workbook structure problems, criterion parsing failures and cancellation,
//! presenting a consistent API to callers.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result, ValueError};
