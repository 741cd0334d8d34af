//! XML parser for styles.xml.
//!
//! Only the parts needed to classify cell values are read: custom number
//! formats and the cell format records.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{CellStyle, NumberFormat, Styles};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::parsers::parse_bool_attr;

/// Parse styles from xl/styles.xml XML content.
pub fn parse_styles(content: &str) -> Result<Styles> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut styles = Styles::new();
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"numFmts" => {
                    parse_number_formats(&mut reader, &mut styles.number_formats)?;
                },
                b"cellXfs" => {
                    parse_cell_xfs(&mut reader, &mut styles.cell_xfs)?;
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OoxmlError::Xml(format!("XML parsing error: {}", e)));
            },
            _ => {},
        }
    }

    Ok(styles)
}

/// Parse number formats section.
fn parse_number_formats(
    reader: &mut Reader<&[u8]>,
    number_formats: &mut HashMap<u32, NumberFormat>,
) -> Result<()> {
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"numFmt" => {
                let mut id = None;
                let mut code = None;

                for attr in e.attributes().flatten() {
                    let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) else {
                        continue;
                    };
                    match attr.key.local_name().as_ref() {
                        b"numFmtId" => id = value.trim().parse::<u32>().ok(),
                        b"formatCode" => code = Some(value.into_owned()),
                        _ => {},
                    }
                }

                if let (Some(id), Some(code)) = (id, code) {
                    number_formats.insert(id, NumberFormat::new(id, code));
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"numFmts" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in numFmts: {}", e))),
            _ => {},
        }
    }

    Ok(())
}

/// Parse the cell format records.
fn parse_cell_xfs(reader: &mut Reader<&[u8]>, cell_xfs: &mut Vec<CellStyle>) -> Result<()> {
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"xf" => {
                cell_xfs.push(parse_xf(reader, &e));
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"cellXfs" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in cellXfs: {}", e))),
            _ => {},
        }
    }

    Ok(())
}

/// Read the attributes of one `<xf>` element.
fn parse_xf(reader: &Reader<&[u8]>, element: &BytesStart<'_>) -> CellStyle {
    let mut style = CellStyle::default();

    for attr in element.attributes().flatten() {
        let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) else {
            continue;
        };
        let number = || value.trim().parse::<u32>().ok();
        match attr.key.local_name().as_ref() {
            b"numFmtId" => style.num_fmt_id = number().unwrap_or(0),
            b"fontId" => style.font_id = number(),
            b"fillId" => style.fill_id = number(),
            b"borderId" => style.border_id = number(),
            b"xfId" => style.xf_id = number(),
            b"applyNumberFormat" => style.apply_number_format = parse_bool_attr(&value),
            _ => {},
        }
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES_XML: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="2">
    <numFmt numFmtId="164" formatCode="dd\.mm\.yyyy"/>
    <numFmt numFmtId="165" formatCode="#,##0.00&quot; EUR&quot;"/>
  </numFmts>
  <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="4">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="164" fontId="1" fillId="2" borderId="0" xfId="0" applyNumberFormat="1">
      <alignment horizontal="center"/>
    </xf>
    <xf numFmtId="165" fontId="0" fillId="0" borderId="1" xfId="0"/>
  </cellXfs>
</styleSheet>"##;

    #[test]
    fn test_parse_formats_and_xfs() {
        let styles = parse_styles(STYLES_XML).unwrap();

        assert_eq!(styles.number_formats.len(), 2);
        assert_eq!(styles.number_formats[&165].code, "#,##0.00\" EUR\"");

        // cellStyleXfs must not leak into cellXfs.
        assert_eq!(styles.cell_xfs.len(), 4);
        assert_eq!(styles.cell_xfs[1].num_fmt_id, 14);
        assert!(styles.cell_xfs[1].apply_number_format);
        assert_eq!(styles.cell_xfs[2].font_id, Some(1));
        assert_eq!(styles.cell_xfs[2].fill_id, Some(2));
        assert_eq!(styles.cell_xfs[3].border_id, Some(1));
    }
}
