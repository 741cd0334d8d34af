//! Relationship-related objects for OPC packages.
//!
//! This module parses `.rels` parts, resolves relationship targets against
//! the source part, and serializes relationship sets for the writer.
use std::fmt::Write as FmtWrite;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{namespace, target_mode};

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    pub r_id: String,
    /// Relationship type URI
    pub reltype: String,
    /// Target reference, relative to the source part unless it starts with `/`
    pub target_ref: String,
    /// Whether this is an external relationship
    pub is_external: bool,
}

impl Relationship {
    /// Create an internal relationship.
    pub fn new(r_id: impl Into<String>, reltype: &str, target_ref: impl Into<String>) -> Self {
        Self {
            r_id: r_id.into(),
            reltype: reltype.to_string(),
            target_ref: target_ref.into(),
            is_external: false,
        }
    }

    /// Resolve the target to a package member name (no leading slash).
    ///
    /// `base_dir` is the directory of the source part, e.g. `xl` for
    /// `xl/workbook.xml`.
    pub fn target_membername(&self, base_dir: &str) -> String {
        resolve_target(base_dir, &self.target_ref)
    }
}

/// Relationships of one source part.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty relationship set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.rels` part.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut rels = Vec::new();
        let mut buf = Vec::with_capacity(256);

        loop {
            buf.clear();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target = None;
                    let mut is_external = false;

                    for attr in e.attributes().flatten() {
                        let value = match attr.decode_and_unescape_value(reader.decoder()) {
                            Ok(value) => value.to_string(),
                            Err(_) => continue,
                        };
                        match attr.key.local_name().as_ref() {
                            b"Id" => r_id = Some(value),
                            b"Type" => reltype = Some(value),
                            b"Target" => target = Some(value),
                            b"TargetMode" => is_external = value == target_mode::EXTERNAL,
                            _ => {},
                        }
                    }

                    match (r_id, reltype, target) {
                        (Some(r_id), Some(reltype), Some(target_ref)) => rels.push(Relationship {
                            r_id,
                            reltype,
                            target_ref,
                            is_external,
                        }),
                        _ => {
                            return Err(OoxmlError::InvalidRelationship(
                                "relationship without Id, Type or Target".to_string(),
                            ));
                        },
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(format!("XML error in rels: {}", e))),
                _ => {},
            }
        }

        Ok(Self { rels })
    }

    /// Add a relationship and return its generated ID.
    pub fn add(&mut self, reltype: &str, target_ref: &str) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship::new(r_id.clone(), reltype, target_ref));
        r_id
    }

    /// Look up a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// First internal relationship of the given type.
    pub fn first_of_type(&self, reltype: &str) -> Option<&Relationship> {
        self.rels
            .iter()
            .find(|rel| !rel.is_external && reltype_matches(&rel.reltype, reltype))
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize the set as a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS);
        for rel in &self.rels {
            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                escape_xml(&rel.r_id),
                escape_xml(&rel.reltype),
                escape_xml(&rel.target_ref)
            );
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// Compare two relationship types on their final path segment.
///
/// Strict OOXML packages use `http://purl.oclc.org/ooxml/...` prefixes for
/// the same relationships that transitional packages spell with
/// `http://schemas.openxmlformats.org/...`.
pub fn reltype_matches(actual: &str, expected: &str) -> bool {
    fn last_segment(uri: &str) -> &str {
        uri.rsplit('/').next().unwrap_or(uri)
    }
    actual == expected || last_segment(actual) == last_segment(expected)
}

/// Member name of the `.rels` part for a source member.
///
/// `xl/workbook.xml` maps to `xl/_rels/workbook.xml.rels`; the package
/// itself (empty name) maps to `_rels/.rels`.
pub fn rels_membername(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if source.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", source),
    }
}

/// Directory part of a member name (`xl/workbook.xml` → `xl`).
pub fn base_dir(membername: &str) -> &str {
    membername.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target against the source part's directory.
///
/// Absolute targets (leading `/`) are taken from the package root; `.` and
/// `..` segments are normalized.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let joined = if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if base_dir.is_empty() {
        target.to_string()
    } else {
        format!("{}/{}", base_dir, target)
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_and_lookup() {
        let rels = Relationships::parse(WORKBOOK_RELS).unwrap();
        assert_eq!(rels.len(), 3);

        let sheet = rels.get("rId1").unwrap();
        assert_eq!(sheet.target_membername("xl"), "xl/worksheets/sheet1.xml");

        let styles = rels.first_of_type(rt::STYLES).unwrap();
        assert_eq!(styles.r_id, "rId3");
        assert!(rels.get("rId9").unwrap().is_external);
    }

    #[test]
    fn test_strict_reltype() {
        assert!(reltype_matches(
            "http://purl.oclc.org/ooxml/officeDocument/relationships/worksheet",
            rt::WORKSHEET
        ));
        assert!(!reltype_matches(rt::STYLES, rt::WORKSHEET));
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("xl", "/xl/styles.xml"), "xl/styles.xml");
        assert_eq!(resolve_target("xl/worksheets", "../sharedStrings.xml"), "xl/sharedStrings.xml");
        assert_eq!(resolve_target("", "xl/workbook.xml"), "xl/workbook.xml");
        assert_eq!(resolve_target("xl", "./worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn test_rels_membername() {
        assert_eq!(rels_membername(""), "_rels/.rels");
        assert_eq!(rels_membername("xl/workbook.xml"), "xl/_rels/workbook.xml.rels");
        assert_eq!(base_dir("xl/workbook.xml"), "xl");
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut rels = Relationships::new();
        let first = rels.add(rt::WORKSHEET, "worksheets/sheet1.xml");
        rels.add(rt::STYLES, "styles.xml");
        assert_eq!(first, "rId1");

        let parsed = Relationships::parse(&rels.to_xml()).unwrap();
        assert_eq!(parsed.get("rId2").unwrap().target_ref, "styles.xml");
    }
}
