//! XML helpers shared by the SpreadsheetML reader and writer.

mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
