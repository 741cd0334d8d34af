//! XML parsers for the SpreadsheetML parts of a workbook.
//!
//! Every parser streams its part with quick-xml. Text nodes arrive split
//! around entity references, so the helpers below turn both halves back into
//! plain text.

pub mod workbook_parser;
pub mod worksheet_parser;

use quick_xml::events::{BytesCData, BytesRef, BytesText};

use crate::common::xml::{resolve_entity, unescape_xml};

/// Decoded content of a text event.
#[inline]
pub(crate) fn text_content(text: &BytesText<'_>) -> String {
    unescape_xml(&String::from_utf8_lossy(text))
}

/// Decoded content of a general entity reference (`&amp;`, `&#10;`).
#[inline]
pub(crate) fn entity_content(entity: &BytesRef<'_>) -> String {
    resolve_entity(&String::from_utf8_lossy(entity))
}

/// Content of a CDATA section, taken verbatim.
#[inline]
pub(crate) fn cdata_content(cdata: &BytesCData<'_>) -> String {
    String::from_utf8_lossy(cdata).into_owned()
}

/// Interpret an OOXML boolean attribute (`1`, `true`, `on`).
#[inline]
pub(crate) fn parse_bool_attr(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "on")
}
