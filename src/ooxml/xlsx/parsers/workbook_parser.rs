//! Parser for Excel workbook.xml files.
//!
//! Extracts the ordered sheet list and the workbook date system.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::parse_bool_attr;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::worksheet::WorksheetInfo;

const INITIAL_SHEETS_CAPACITY: usize = 16;

/// Workbook-level information from `xl/workbook.xml`.
#[derive(Debug, Clone, Default)]
pub struct WorkbookInfo {
    /// Sheets in tab order
    pub sheets: Vec<WorksheetInfo>,
    /// Whether serial dates count from 1904-01-01
    pub date1904: bool,
}

/// Parse workbook.xml content.
///
/// Sheets lacking a name or relationship ID are skipped.
pub fn parse_workbook_xml(content: &str) -> Result<WorkbookInfo> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut info = WorkbookInfo {
        sheets: Vec::with_capacity(INITIAL_SHEETS_CAPACITY),
        date1904: false,
    };
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"workbookPr" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"date1904"
                            && let Ok(value) = attr.decode_and_unescape_value(reader.decoder())
                        {
                            info.date1904 = parse_bool_attr(&value);
                        }
                    }
                },
                b"sheet" => {
                    let mut name = None;
                    let mut relationship_id = None;
                    let mut sheet_id = 0u32;
                    let mut hidden = false;

                    for attr in e.attributes().flatten() {
                        let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) else {
                            continue;
                        };
                        match attr.key.local_name().as_ref() {
                            b"name" => name = Some(value.into_owned()),
                            // r:id, whatever the relationships prefix is
                            b"id" => relationship_id = Some(value.into_owned()),
                            b"sheetId" => {
                                sheet_id = atoi_simd::parse::<u32, false, false>(value.trim().as_bytes()).unwrap_or(0)
                            },
                            b"state" => hidden = value != "visible",
                            _ => {},
                        }
                    }

                    if let (Some(name), Some(relationship_id)) = (name, relationship_id) {
                        info.sheets.push(WorksheetInfo {
                            name,
                            relationship_id,
                            sheet_id,
                            hidden,
                        });
                    }
                },
                _ => {},
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"sheets" => {
                // Nothing after <sheets> matters except workbookPr, which precedes it.
                break;
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in workbook: {}", e))),
            _ => {},
        }
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheets() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <workbookPr date1904="1"/>
  <sheets>
    <sheet name="Sales &amp; Costs" sheetId="1" r:id="rId1"/>
    <sheet name="Hidden" sheetId="7" state="hidden" r:id="rId2"/>
  </sheets>
</workbook>"#;

        let info = parse_workbook_xml(xml).unwrap();
        assert!(info.date1904);
        assert_eq!(info.sheets.len(), 2);
        assert_eq!(info.sheets[0].name, "Sales & Costs");
        assert_eq!(info.sheets[0].relationship_id, "rId1");
        assert!(!info.sheets[0].hidden);
        assert_eq!(info.sheets[1].sheet_id, 7);
        assert!(info.sheets[1].hidden);
    }

    #[test]
    fn test_default_date_system() {
        let xml = r#"<workbook><sheets><sheet name="A" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
        let info = parse_workbook_xml(xml).unwrap();
        assert!(!info.date1904);
        assert_eq!(info.sheets.len(), 1);
    }
}
