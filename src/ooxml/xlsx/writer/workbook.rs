//! Workbook writer for XLSX packages.

use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::sheet::MutableWorksheet;
use super::strings::MutableSharedStrings;
use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace, part_name, relationship_type as rt};
use crate::ooxml::opc::rel::rels_membername;
use crate::ooxml::opc::{PhysPkgWriter, Relationships};
use crate::ooxml::xlsx::template;
use crate::sheet::Worksheet as _;

/// Characters Excel refuses in sheet names.
const INVALID_SHEET_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// Longest sheet name Excel accepts.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Builds a new `.xlsx` workbook in memory and saves it.
///
/// # Examples
///
/// ```rust,no_run
/// use sheetsift::ooxml::xlsx::WorkbookWriter;
/// use sheetsift::sheet::StyleId;
///
/// let mut writer = WorkbookWriter::new();
/// let sheet = writer.add_worksheet("Report")?;
/// sheet.set_cell(1, 1, "Region", StyleId::BOLD);
/// sheet.set_cell(2, 1, "North", StyleId::DEFAULT);
/// writer.save("out/report.xlsx")?;
/// # Ok::<(), sheetsift::Error>(())
/// ```
#[derive(Debug)]
pub struct WorkbookWriter {
    worksheets: Vec<MutableWorksheet>,
    stylesheet: String,
    date1904: bool,
}

impl WorkbookWriter {
    /// Create an empty workbook using the built-in stylesheet.
    pub fn new() -> Self {
        Self::with_stylesheet(template::default_styles_xml())
    }

    /// Create an empty workbook whose `xl/styles.xml` is the given content.
    ///
    /// Style IDs set on cells index into this stylesheet's `cellXfs`.
    pub fn with_stylesheet(stylesheet: impl Into<String>) -> Self {
        Self {
            worksheets: Vec::new(),
            stylesheet: stylesheet.into(),
            date1904: false,
        }
    }

    /// Use the 1904 date system for date values.
    pub fn set_date1904(&mut self, date1904: bool) {
        self.date1904 = date1904;
    }

    /// Add a worksheet and return it for editing.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the name is empty, longer than 31 characters,
    /// contains a character Excel rejects, or duplicates an existing sheet
    /// name (case-insensitively).
    pub fn add_worksheet(&mut self, name: &str) -> Result<&mut MutableWorksheet> {
        validate_sheet_name(name)?;
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().eq_ignore_ascii_case(name))
        {
            return Err(Error::InvalidArgument(format!("duplicate sheet name '{}'", name)));
        }

        let sheet_id = self.worksheets.len() as u32 + 1;
        self.worksheets.push(MutableWorksheet::new(name.to_string(), sheet_id));
        let index = self.worksheets.len() - 1;
        Ok(&mut self.worksheets[index])
    }

    /// Get a worksheet by its 0-based index.
    pub fn worksheet(&self, index: usize) -> Option<&MutableWorksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by its 0-based index.
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut MutableWorksheet> {
        self.worksheets.get_mut(index)
    }

    /// Number of worksheets.
    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Serialize the workbook into `.xlsx` bytes.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the workbook has no worksheet.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.worksheets.is_empty() {
            return Err(Error::InvalidArgument(
                "a workbook needs at least one worksheet".to_string(),
            ));
        }

        let mut shared_strings = MutableSharedStrings::new();
        let sheet_xmls: Vec<String> = self
            .worksheets
            .iter()
            .map(|ws| ws.to_xml(&mut shared_strings, self.date1904))
            .collect();

        let mut workbook_rels = Relationships::new();
        let sheet_rel_ids: Vec<String> = (1..=self.worksheets.len())
            .map(|i| workbook_rels.add(rt::WORKSHEET, &format!("worksheets/sheet{}.xml", i)))
            .collect();
        workbook_rels.add(rt::STYLES, "styles.xml");
        if !shared_strings.is_empty() {
            workbook_rels.add(rt::SHARED_STRINGS, "sharedStrings.xml");
        }

        let mut package_rels = Relationships::new();
        package_rels.add(rt::OFFICE_DOCUMENT, part_name::WORKBOOK);

        let mut pkg = PhysPkgWriter::new();
        pkg.write(
            part_name::CONTENT_TYPES,
            self.generate_content_types_xml(!shared_strings.is_empty()).as_bytes(),
        )?;
        pkg.write(part_name::PACKAGE_RELS, package_rels.to_xml().as_bytes())?;
        pkg.write(
            part_name::WORKBOOK,
            self.generate_workbook_xml_with_rels(&sheet_rel_ids).as_bytes(),
        )?;
        pkg.write(
            &rels_membername(part_name::WORKBOOK),
            workbook_rels.to_xml().as_bytes(),
        )?;
        for (i, xml) in sheet_xmls.iter().enumerate() {
            pkg.write(&format!("xl/worksheets/sheet{}.xml", i + 1), xml.as_bytes())?;
        }
        pkg.write("xl/styles.xml", self.stylesheet.as_bytes())?;
        if !shared_strings.is_empty() {
            pkg.write("xl/sharedStrings.xml", shared_strings.to_xml().as_bytes())?;
        }

        Ok(pkg.finish()?)
    }

    /// Save the workbook to a file.
    ///
    /// Missing parent directories are created. The package is written to a
    /// temporary file in the destination directory and renamed into place,
    /// so a failed save never leaves a partial file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| Error::Io(e.error))?;

        debug!(path = %path.display(), bytes = bytes.len(), "workbook saved");
        Ok(())
    }

    /// Generate `[Content_Types].xml`.
    fn generate_content_types_xml(&self, has_shared_strings: bool) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);
        let _ = write!(
            xml,
            r#"<Default Extension="rels" ContentType="{}"/>"#,
            ct::OPC_RELATIONSHIPS
        );
        let _ = write!(xml, r#"<Default Extension="xml" ContentType="{}"/>"#, ct::XML);
        let _ = write!(
            xml,
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            part_name::WORKBOOK,
            ct::SML_SHEET_MAIN
        );
        for i in 1..=self.worksheets.len() {
            let _ = write!(
                xml,
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="{}"/>"#,
                i,
                ct::SML_WORKSHEET
            );
        }
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/styles.xml" ContentType="{}"/>"#,
            ct::SML_STYLES
        );
        if has_shared_strings {
            let _ = write!(
                xml,
                r#"<Override PartName="/xl/sharedStrings.xml" ContentType="{}"/>"#,
                ct::SML_SHARED_STRINGS
            );
        }
        xml.push_str("</Types>");
        xml
    }

    /// Generate workbook.xml content with the worksheet relationship IDs.
    fn generate_workbook_xml_with_rels(&self, worksheet_rel_ids: &[String]) -> String {
        let mut xml = String::with_capacity(512 + self.worksheets.len() * 64);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(
            xml,
            r#"<workbook xmlns="{}" xmlns:r="{}">"#,
            namespace::SML_MAIN,
            namespace::OFC_RELATIONSHIPS
        );

        if self.date1904 {
            xml.push_str(r#"<workbookPr date1904="1"/>"#);
        }
        xml.push_str(r#"<bookViews><workbookView activeTab="0"/></bookViews>"#);

        xml.push_str("<sheets>");
        for (ws, rel_id) in self.worksheets.iter().zip(worksheet_rel_ids) {
            let _ = write!(
                xml,
                r#"<sheet name="{}" sheetId="{}" r:id="{}"/>"#,
                escape_xml(ws.name()),
                ws.sheet_id(),
                rel_id
            );
        }
        xml.push_str("</sheets>");
        xml.push_str("</workbook>");
        xml
    }
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a sheet name against Excel's naming rules.
fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("sheet name is empty".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidArgument(format!(
            "sheet name '{}' is longer than {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(ch) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(Error::InvalidArgument(format!(
            "sheet name '{}' contains '{}'",
            name, ch
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::Workbook;
    use crate::sheet::{CellValue, ExcelDateTime, StyleId};

    #[test]
    fn test_round_trip_through_reader() {
        let mut writer = WorkbookWriter::new();
        let sheet = writer.add_worksheet("Sales & Costs").unwrap();
        sheet.set_cell(1, 1, "Region", StyleId::BOLD);
        sheet.set_cell(1, 2, "Date", StyleId::BOLD);
        sheet.set_cell(2, 1, "North", StyleId::DEFAULT);
        sheet.set_cell(2, 2, ExcelDateTime::new(45306.0, false), StyleId::DATE);
        sheet.set_cell(3, 1, 12.25, StyleId::DEFAULT);

        let mut workbook = Workbook::from_bytes(writer.to_bytes().unwrap()).unwrap();
        assert_eq!(workbook.worksheet_names(), vec!["Sales & Costs"]);

        let ws = workbook.first_worksheet().unwrap();
        assert_eq!(ws.cell_value(1, 1), &CellValue::from("Region"));
        assert_eq!(ws.cell_style(1, 1), StyleId::BOLD);
        assert!(ws.cell_value(2, 2).is_date());
        assert_eq!(ws.cell_value(3, 1), &CellValue::Float(12.25));
        assert_eq!(ws.last_used_row(), Some(3));
    }

    #[test]
    fn test_1904_round_trip() {
        let mut writer = WorkbookWriter::new();
        writer.set_date1904(true);
        writer
            .add_worksheet("S")
            .unwrap()
            .set_cell(1, 1, ExcelDateTime::new(45306.0, false), StyleId::DATE);

        let mut workbook = Workbook::from_bytes(writer.to_bytes().unwrap()).unwrap();
        assert!(workbook.is_1904());
        let ws = workbook.first_worksheet().unwrap();
        assert_eq!(
            ws.cell_value(1, 1),
            &CellValue::DateTime(ExcelDateTime::new(43844.0, true))
        );
    }

    #[test]
    fn test_sheet_names_are_validated() {
        let mut writer = WorkbookWriter::new();
        assert!(writer.add_worksheet("").is_err());
        assert!(writer.add_worksheet("a/b").is_err());
        assert!(writer.add_worksheet(&"x".repeat(32)).is_err());
        writer.add_worksheet("Data").unwrap();
        assert!(matches!(
            writer.add_worksheet("DATA"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_workbook_is_rejected() {
        assert!(WorkbookWriter::new().to_bytes().is_err());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.xlsx");

        let mut writer = WorkbookWriter::new();
        writer.add_worksheet("S").unwrap().set_cell_value(1, 1, "x");
        writer.save(&path).unwrap();

        assert!(path.is_file());
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .flatten()
            .filter(|entry| entry.path() != path)
            .collect();
        assert!(leftovers.is_empty());
    }
}
