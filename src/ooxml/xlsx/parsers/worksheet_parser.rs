//! Parser for Excel worksheet XML files.
//!
//! Streams `<sheetData>` and turns every `<c>` element into a typed
//! [`Cell`]. Shared string indices are resolved immediately and numbers
//! whose cell format is a date format become date values, so the resulting
//! grid needs no further lookups.
//!
//! Cells without an `r` attribute are placed after the previous cell of the
//! row, and rows without an `r` attribute follow the previous row.

use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};

use super::{cdata_content, entity_content, text_content};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::cell::{MAX_COLUMN, MAX_ROW, coords_to_reference, reference_to_coords};
use crate::ooxml::xlsx::{SharedStrings, Styles};
use crate::sheet::{Cell, CellGrid, CellValue, ExcelDateTime, StyleId};

/// Workbook-wide lookups needed to type cell values.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// Shared strings table
    pub shared_strings: &'a SharedStrings,
    /// Parsed stylesheet
    pub styles: &'a Styles,
    /// Whether the workbook uses the 1904 date system
    pub date1904: bool,
}

/// Parse worksheet XML content into a cell grid.
pub fn parse_worksheet_xml(content: &str, context: ParseContext<'_>) -> Result<CellGrid> {
    let mut reader = Reader::from_str(content);
    // Inline string text keeps its surrounding whitespace.
    reader.config_mut().trim_text(false);

    let mut state = SheetState::new(context);
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => state.start(&e, reader.decoder(), false)?,
            Ok(Event::Empty(e)) => state.start(&e, reader.decoder(), true)?,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"c" => state.finish_cell()?,
                b"v" | b"t" => state.target = TextTarget::None,
                b"is" => state.in_inline = false,
                b"rPh" => state.phonetic_depth = state.phonetic_depth.saturating_sub(1),
                b"sheetData" => break,
                _ => {},
            },
            Ok(Event::Text(t)) => state.push_text(&text_content(&t)),
            Ok(Event::GeneralRef(r)) => state.push_text(&entity_content(&r)),
            Ok(Event::CData(c)) => state.push_text(&cdata_content(&c)),
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in worksheet: {}", e))),
            _ => {},
        }
    }

    Ok(state.grid)
}

/// Where text events currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    Inline,
}

/// A `<c>` element whose children are still being read.
#[derive(Debug, Default)]
struct PendingCell {
    row: u32,
    column: u32,
    kind: Option<String>,
    style: StyleId,
    value: String,
    inline: String,
}

struct SheetState<'a> {
    context: ParseContext<'a>,
    grid: CellGrid,
    row: u32,
    next_column: u32,
    pending: Option<PendingCell>,
    target: TextTarget,
    in_inline: bool,
    phonetic_depth: usize,
}

impl<'a> SheetState<'a> {
    fn new(context: ParseContext<'a>) -> Self {
        Self {
            context,
            grid: CellGrid::new(),
            row: 0,
            next_column: 1,
            pending: None,
            target: TextTarget::None,
            in_inline: false,
            phonetic_depth: 0,
        }
    }

    fn start(&mut self, e: &BytesStart<'_>, decoder: Decoder, is_empty: bool) -> Result<()> {
        match e.local_name().as_ref() {
            b"row" => {
                let explicit: Option<u32> = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.local_name().as_ref() == b"r")
                    .and_then(|attr| atoi_simd::parse::<u32, false, false>(attr.value.as_ref()).ok());
                self.row = explicit.unwrap_or(self.row + 1);
                if self.row == 0 || self.row > MAX_ROW {
                    return Err(OoxmlError::InvalidFormat(format!(
                        "row number {} out of range",
                        self.row
                    )));
                }
                self.next_column = 1;
            },
            b"c" => {
                let cell = self.open_cell(e, decoder)?;
                if is_empty {
                    self.store(cell)?;
                } else {
                    self.pending = Some(cell);
                }
            },
            b"v" if !is_empty && self.pending.is_some() => self.target = TextTarget::Value,
            b"is" if !is_empty => self.in_inline = true,
            b"rPh" if !is_empty => self.phonetic_depth += 1,
            b"t" if !is_empty && self.in_inline && self.phonetic_depth == 0 => {
                self.target = TextTarget::Inline;
            },
            _ => {},
        }
        Ok(())
    }

    fn open_cell(&mut self, e: &BytesStart<'_>, decoder: Decoder) -> Result<PendingCell> {
        let mut cell = PendingCell {
            row: self.row,
            column: self.next_column,
            ..PendingCell::default()
        };

        for attr in e.attributes().flatten() {
            let Ok(value) = attr.decode_and_unescape_value(decoder) else {
                continue;
            };
            match attr.key.local_name().as_ref() {
                b"r" => {
                    let (column, row) = reference_to_coords(&value).ok_or_else(|| {
                        OoxmlError::InvalidFormat(format!("invalid cell reference '{}'", value))
                    })?;
                    cell.column = column;
                    cell.row = row;
                },
                b"t" => cell.kind = Some(value.into_owned()),
                b"s" => cell.style = StyleId(value.trim().parse().unwrap_or(0)),
                _ => {},
            }
        }

        if cell.row == 0 {
            return Err(OoxmlError::InvalidFormat("cell outside of a row".to_string()));
        }
        if cell.column > MAX_COLUMN {
            return Err(OoxmlError::InvalidFormat(format!(
                "column {} out of range",
                cell.column
            )));
        }
        self.next_column = cell.column + 1;
        Ok(cell)
    }

    fn push_text(&mut self, text: &str) {
        let Some(cell) = self.pending.as_mut() else {
            return;
        };
        match self.target {
            TextTarget::Value => cell.value.push_str(text),
            TextTarget::Inline => cell.inline.push_str(text),
            TextTarget::None => {},
        }
    }

    fn finish_cell(&mut self) -> Result<()> {
        self.target = TextTarget::None;
        self.in_inline = false;
        match self.pending.take() {
            Some(cell) => self.store(cell),
            None => Ok(()),
        }
    }

    fn store(&mut self, cell: PendingCell) -> Result<()> {
        let value = self.typed_value(&cell)?;
        // Unstyled blanks carry nothing worth keeping.
        if value.is_empty() && cell.style.is_default() {
            return Ok(());
        }
        self.grid.insert(cell.row, cell.column, Cell::new(value, cell.style));
        Ok(())
    }

    fn typed_value(&self, cell: &PendingCell) -> Result<CellValue> {
        let raw = cell.value.as_str();
        let value = match cell.kind.as_deref() {
            Some("inlineStr") => CellValue::String(cell.inline.clone()),
            _ if raw.is_empty() => CellValue::Empty,
            Some("s") => {
                let index: usize = raw.trim().parse().map_err(|_| {
                    OoxmlError::InvalidFormat(format!(
                        "invalid shared string index '{}' in {}",
                        raw,
                        coords_to_reference(cell.column, cell.row)
                    ))
                })?;
                let text = self.context.shared_strings.get(index).ok_or_else(|| {
                    OoxmlError::InvalidFormat(format!(
                        "shared string index {} out of range in {}",
                        index,
                        coords_to_reference(cell.column, cell.row)
                    ))
                })?;
                CellValue::String(text.to_string())
            },
            Some("str") => CellValue::String(raw.to_string()),
            Some("b") => CellValue::Bool(matches!(raw.trim(), "1" | "true")),
            Some("e") => CellValue::Error(raw.to_string()),
            Some("d") => match parse_iso_datetime(raw.trim()) {
                Some(value) => {
                    CellValue::DateTime(ExcelDateTime::from_naive(value, self.context.date1904))
                },
                None => CellValue::String(raw.to_string()),
            },
            _ => self.numeric_value(cell, raw.trim())?,
        };
        Ok(value)
    }

    fn numeric_value(&self, cell: &PendingCell, raw: &str) -> Result<CellValue> {
        let number = if let Ok(int_val) = atoi_simd::parse::<_, false, false>(raw.as_bytes()) {
            CellValue::Int(int_val)
        } else if let Ok(float_val) = fast_float2::parse(raw) {
            CellValue::Float(float_val)
        } else {
            return Err(OoxmlError::InvalidFormat(format!(
                "invalid number '{}' in {}",
                raw,
                coords_to_reference(cell.column, cell.row)
            )));
        };

        if self.context.styles.is_date_style(cell.style)
            && let Some(serial) = number.as_number()
        {
            return Ok(CellValue::DateTime(ExcelDateTime::new(serial, self.context.date1904)));
        }
        Ok(number)
    }
}

/// Parse an ISO 8601 date or date-time as written in `t="d"` cells.
fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::styles::CellStyle;
    use crate::sheet::Worksheet as _;

    fn styles() -> Styles {
        let mut styles = Styles::new();
        styles.cell_xfs.push(CellStyle::default());
        styles.cell_xfs.push(CellStyle::with_number_format(14));
        styles.cell_xfs.push(CellStyle::with_number_format(2));
        styles
    }

    fn parse(xml: &str, shared: &SharedStrings, styles: &Styles) -> CellGrid {
        let context = ParseContext {
            shared_strings: shared,
            styles,
            date1904: false,
        };
        parse_worksheet_xml(xml, context).unwrap()
    }

    #[test]
    fn test_typed_cells() {
        let shared = SharedStrings::parse("<sst><si><t>Region</t></si><si><t>North</t></si></sst>")
            .unwrap();
        let styles = styles();
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="inlineStr"><is><t> Amount </t></is></c></row>
<row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2" s="2"><v>100.5</v></c><c r="C2" s="1"><v>45306</v></c>
<c r="D2" t="b"><v>1</v></c><c r="E2" t="e"><v>#N/A</v></c><c r="F2" t="str"><f>A2</f><v>North</v></c>
<c r="G2" t="d"><v>2024-01-15T00:00:00Z</v></c><c r="H2"><v>7</v></c></row>
</sheetData></worksheet>"#;

        let grid = parse(xml, &shared, &styles);
        let value = |row, column| grid.get(row, column).map(|c| c.value.clone());

        assert_eq!(value(1, 1), Some(CellValue::from("Region")));
        assert_eq!(value(1, 2), Some(CellValue::from(" Amount ")));
        assert_eq!(value(2, 1), Some(CellValue::from("North")));
        assert_eq!(value(2, 2), Some(CellValue::Float(100.5)));
        assert_eq!(grid.get(2, 2).unwrap().style, StyleId(2));
        assert_eq!(
            value(2, 3),
            Some(CellValue::DateTime(ExcelDateTime::new(45306.0, false)))
        );
        assert_eq!(value(2, 4), Some(CellValue::Bool(true)));
        assert_eq!(value(2, 5), Some(CellValue::Error("#N/A".to_string())));
        assert_eq!(value(2, 6), Some(CellValue::from("North")));
        assert_eq!(
            grid.get(2, 7).and_then(|c| c.value.as_date()).map(|d| d.date()),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(value(2, 8), Some(CellValue::Int(7)));
    }

    #[test]
    fn test_styled_blanks_and_missing_references() {
        let shared = SharedStrings::new();
        let styles = styles();
        let xml = r#"<worksheet><sheetData>
<row><c s="2"/><c><v>3</v></c><c/></row>
<row><c t="inlineStr"><is><t>x</t></is></c></row>
</sheetData></worksheet>"#;

        let grid = parse(xml, &shared, &styles);
        assert_eq!(grid.get(1, 1).map(|c| c.style), Some(StyleId(2)));
        assert!(grid.get(1, 1).unwrap().is_empty());
        assert_eq!(grid.get(1, 2).map(|c| c.value.clone()), Some(CellValue::Int(3)));
        // Unstyled blanks are dropped.
        assert!(grid.get(1, 3).is_none());
        assert_eq!(grid.get(2, 1).map(|c| c.value.clone()), Some(CellValue::from("x")));
        assert_eq!(grid.first_used_row(), Some(1));
    }

    #[test]
    fn test_bad_shared_string_index() {
        let shared = SharedStrings::new();
        let styles = styles();
        let context = ParseContext {
            shared_strings: &shared,
            styles: &styles,
            date1904: false,
        };
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>4</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            parse_worksheet_xml(xml, context),
            Err(OoxmlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_worksheet_trait_over_grid() {
        let shared = SharedStrings::new();
        let styles = styles();
        let xml = r#"<worksheet><sheetData><row r="3"><c r="B3"><v>1</v></c></row></sheetData></worksheet>"#;
        let grid = parse(xml, &shared, &styles);
        let sheet = crate::ooxml::xlsx::Worksheet::new(Default::default(), grid);
        assert_eq!(sheet.first_used_row(), Some(3));
        assert_eq!(sheet.cell_value(3, 2), &CellValue::Int(1));
        assert!(sheet.is_empty(3, 1));
    }
}
