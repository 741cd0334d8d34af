//! Shared strings table for XLSX workbooks being written.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;

/// Mutable shared strings table.
///
/// Excel stores frequently used strings in a shared table to reduce file size.
/// This structure manages the collection of unique strings and their indices.
#[derive(Debug, Default)]
pub struct MutableSharedStrings {
    /// List of unique strings
    strings: Vec<String>,
    /// Map from string to index for fast lookup
    string_to_index: HashMap<String, usize>,
    /// Number of references handed out, including repeats
    references: usize,
}

impl MutableSharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string to the shared strings table and return its index.
    ///
    /// If the string already exists, returns the existing index.
    pub fn add_string(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&index) = self.string_to_index.get(s) {
            return index;
        }

        let index = self.strings.len();
        self.strings.push(s.to_string());
        self.string_to_index.insert(s.to_string(), index);
        index
    }

    /// Get the number of unique strings.
    pub fn count(&self) -> usize {
        self.strings.len()
    }

    /// Check if no string has been added.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Serialize the shared strings table to XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.strings.len() * 32);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(
            xml,
            r#"<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            namespace::SML_MAIN,
            self.references,
            self.strings.len()
        );

        for s in &self.strings {
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                let _ = write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s));
            } else {
                let _ = write!(xml, "<si><t>{}</t></si>", escape_xml(s));
            }
        }

        xml.push_str("</sst>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::SharedStrings;

    #[test]
    fn test_deduplication() {
        let mut sst = MutableSharedStrings::new();
        assert_eq!(sst.add_string("North"), 0);
        assert_eq!(sst.add_string("South"), 1);
        assert_eq!(sst.add_string("North"), 0);
        assert_eq!(sst.count(), 2);

        let xml = sst.to_xml();
        assert!(xml.contains(r#"count="3" uniqueCount="2""#));
    }

    #[test]
    fn test_whitespace_and_escaping_survive_reparse() {
        let mut sst = MutableSharedStrings::new();
        sst.add_string(" padded ");
        sst.add_string("R&D <east>");

        let parsed = SharedStrings::parse(&sst.to_xml()).unwrap();
        assert_eq!(parsed.get(0), Some(" padded "));
        assert_eq!(parsed.get(1), Some("R&D <east>"));
    }
}
