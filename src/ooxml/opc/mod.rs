//! Open Packaging Conventions (OPC) support.
//!
//! This module provides the small subset of the OPC specification that a
//! SpreadsheetML package needs:
//!
//! - ZIP-based physical packaging (`phys_pkg`)
//! - Relationship parsing, target resolution and serialization (`rel`)
//! - Content type and relationship type constants (`constants`)

pub mod constants;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use phys_pkg::{PhysPkgReader, PhysPkgWriter};
pub use rel::{Relationship, Relationships};
