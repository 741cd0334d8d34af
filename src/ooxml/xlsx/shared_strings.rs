//! Shared strings table for Excel files.
//!
//! Excel stores most cell text once in `xl/sharedStrings.xml` and refers to
//! it by index. Rich-text entries (`<r>` runs) are flattened to their plain
//! text; phonetic hints (`<rPh>`) are skipped.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::parsers::{cdata_content, entity_content, text_content};
use crate::ooxml::error::{OoxmlError, Result};

const INITIAL_STRINGS_CAPACITY: usize = 1024;

/// Shared strings table, indexed by position.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse shared strings from `xl/sharedStrings.xml` content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        // Leading and trailing spaces are significant inside <t>.
        reader.config_mut().trim_text(false);

        let mut strings = Vec::with_capacity(INITIAL_STRINGS_CAPACITY);
        let mut current = String::new();
        let mut in_item = false;
        let mut in_text = false;
        let mut phonetic_depth = 0usize;
        let mut buf = Vec::with_capacity(512);

        loop {
            buf.clear();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_item = true;
                        current.clear();
                    },
                    b"rPh" => phonetic_depth += 1,
                    b"t" if in_item && phonetic_depth == 0 => in_text = true,
                    _ => {},
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_item = false;
                        strings.push(std::mem::take(&mut current));
                    },
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {},
                },
                Ok(Event::Text(t)) if in_text => current.push_str(&text_content(&t)),
                Ok(Event::GeneralRef(r)) if in_text => current.push_str(&entity_content(&r)),
                Ok(Event::CData(c)) if in_text => current.push_str(&cdata_content(&c)),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OoxmlError::Xml(format!("XML error in shared strings: {}", e)));
                },
                _ => {},
            }
        }

        Ok(Self { strings })
    }

    /// Get a string by its index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Get the number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_rich_text() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>Region</t></si>
  <si><r><rPr><b/></rPr><t>Bold </t></r><r><t>tail</t></r></si>
  <si><t xml:space="preserve">  padded  </t></si>
  <si><t>A &amp; B</t><rPh sb="0" eb="1"><t>ignored</t></rPh></si>
  <si/>
</sst>"#;

        let sst = SharedStrings::parse(xml).unwrap();
        assert_eq!(sst.len(), 5);
        assert_eq!(sst.get(0), Some("Region"));
        assert_eq!(sst.get(1), Some("Bold tail"));
        assert_eq!(sst.get(2), Some("  padded  "));
        assert_eq!(sst.get(3), Some("A & B"));
        assert_eq!(sst.get(4), Some(""));
        assert_eq!(sst.get(5), None);
    }

    #[test]
    fn test_character_references() {
        let xml = r#"<sst><si><t>line&#10;break &#x263A;</t></si></sst>"#;
        let sst = SharedStrings::parse(xml).unwrap();
        assert_eq!(sst.get(0), Some("line\nbreak \u{263A}"));
    }
}
