//! Excel workbook reader.
//!
//! Opens an `.xlsx` package, resolves its parts through the package and
//! workbook relationships, and loads worksheets on demand.

use std::path::Path;

use tracing::{debug, warn};

use crate::common::{Error, Result};
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::constants::{part_name, relationship_type as rt};
use crate::ooxml::opc::rel::{base_dir, rels_membername};
use crate::ooxml::opc::{PhysPkgReader, Relationships};
use crate::ooxml::xlsx::parsers::workbook_parser;
use crate::ooxml::xlsx::parsers::worksheet_parser::{self, ParseContext};
use crate::ooxml::xlsx::{SharedStrings, Styles};

use super::worksheet::{Worksheet, WorksheetInfo};

/// An `.xlsx` workbook opened for reading.
///
/// The whole package is read into memory by [`Workbook::open`]; no file
/// handle is kept afterwards.
///
/// # Examples
///
/// ```rust,no_run
/// use sheetsift::ooxml::xlsx::Workbook;
///
/// let mut workbook = Workbook::open("sales.xlsx")?;
/// println!("sheets: {:?}", workbook.worksheet_names());
/// let sheet = workbook.first_worksheet()?;
/// # Ok::<(), sheetsift::Error>(())
/// ```
#[derive(Debug)]
pub struct Workbook {
    package: PhysPkgReader,
    /// Sheets in tab order, each with its resolved part name
    worksheets: Vec<(WorksheetInfo, String)>,
    shared_strings: SharedStrings,
    styles: Styles,
    /// Raw `xl/styles.xml`, carried over to derived workbooks
    stylesheet_xml: Option<String>,
    date1904: bool,
}

impl Workbook {
    /// Open a workbook from a file path.
    ///
    /// # Errors
    ///
    /// `NotFound` when the file does not exist; `Zip`/`Xml`/`Corrupt` when
    /// the package cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()));
        }

        debug!(path = %path.display(), "opening workbook");
        let package = PhysPkgReader::open(path)?;
        Self::from_package(package)
    }

    /// Open a workbook from the bytes of an `.xlsx` file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_package(PhysPkgReader::from_bytes(data)?)
    }

    fn from_package(mut package: PhysPkgReader) -> Result<Self> {
        let workbook_part = locate_workbook_part(&mut package)?;
        let workbook_xml = read_part(&mut package, &workbook_part)?;
        let info = workbook_parser::parse_workbook_xml(&workbook_xml)?;

        let workbook_rels = match package.optional_blob_for(&rels_membername(&workbook_part))? {
            Some(blob) => Relationships::parse(&decode_part(blob)?)?,
            None => Relationships::new(),
        };
        let dir = base_dir(&workbook_part);

        let mut worksheets = Vec::with_capacity(info.sheets.len());
        for sheet in info.sheets {
            match workbook_rels.get(&sheet.relationship_id) {
                Some(rel) if !rel.is_external => {
                    let target = rel.target_membername(dir);
                    worksheets.push((sheet, target));
                },
                _ => {
                    warn!(
                        sheet = %sheet.name,
                        r_id = %sheet.relationship_id,
                        "skipping sheet without a worksheet relationship"
                    );
                },
            }
        }

        let shared_strings = match workbook_rels.first_of_type(rt::SHARED_STRINGS) {
            Some(rel) => {
                let name = rel.target_membername(dir);
                match package.optional_blob_for(&name)? {
                    Some(blob) => SharedStrings::parse(&decode_part(blob)?)?,
                    None => SharedStrings::new(),
                }
            },
            None => SharedStrings::new(),
        };

        let stylesheet_xml = match workbook_rels.first_of_type(rt::STYLES) {
            Some(rel) => package
                .optional_blob_for(&rel.target_membername(dir))?
                .map(decode_part)
                .transpose()?,
            None => None,
        };
        let styles = match &stylesheet_xml {
            Some(xml) => Styles::parse(xml)?,
            None => Styles::new(),
        };

        debug!(
            sheets = worksheets.len(),
            shared_strings = shared_strings.len(),
            cell_formats = styles.cell_style_count(),
            date1904 = info.date1904,
            "workbook loaded"
        );

        Ok(Self {
            package,
            worksheets,
            shared_strings,
            styles,
            stylesheet_xml,
            date1904: info.date1904,
        })
    }

    /// Names of all worksheets in tab order.
    pub fn worksheet_names(&self) -> Vec<&str> {
        self.worksheets
            .iter()
            .map(|(info, _)| info.name.as_str())
            .collect()
    }

    /// Number of worksheets.
    #[inline]
    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Load a worksheet by its 0-based tab index.
    pub fn worksheet(&mut self, index: usize) -> Result<Worksheet> {
        let (info, part) = self
            .worksheets
            .get(index)
            .cloned()
            .ok_or(Error::NoWorksheet)?;

        let content = read_part(&mut self.package, &part)?;
        let context = ParseContext {
            shared_strings: &self.shared_strings,
            styles: &self.styles,
            date1904: self.date1904,
        };
        let cells = worksheet_parser::parse_worksheet_xml(&content, context)?;
        debug!(sheet = %info.name, cells = cells.len(), "worksheet loaded");

        Ok(Worksheet::new(info, cells))
    }

    /// Load the first worksheet.
    ///
    /// # Errors
    ///
    /// `NoWorksheet` when the workbook declares no worksheet.
    pub fn first_worksheet(&mut self) -> Result<Worksheet> {
        self.worksheet(0)
    }

    /// Parsed stylesheet.
    #[inline]
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Raw `xl/styles.xml` content, if the workbook has a stylesheet.
    #[inline]
    pub fn stylesheet_xml(&self) -> Option<&str> {
        self.stylesheet_xml.as_deref()
    }

    /// Whether serial dates use the 1904 date system.
    #[inline]
    pub fn is_1904(&self) -> bool {
        self.date1904
    }
}

/// Find the main workbook part through the package relationships.
fn locate_workbook_part(package: &mut PhysPkgReader) -> Result<String> {
    if let Some(blob) = package.optional_blob_for(part_name::PACKAGE_RELS)? {
        let rels = Relationships::parse(&decode_part(blob)?)?;
        if let Some(rel) = rels.first_of_type(rt::OFFICE_DOCUMENT) {
            return Ok(rel.target_membername(""));
        }
    }

    if package.contains(part_name::WORKBOOK) {
        warn!("package relationships do not name a workbook, using default part");
        return Ok(part_name::WORKBOOK.to_string());
    }
    Err(Error::Corrupt("package contains no workbook part".to_string()))
}

fn read_part(package: &mut PhysPkgReader, name: &str) -> Result<String> {
    decode_part(package.blob_for(name)?)
}

/// Decode a part as UTF-8 text, dropping a byte order mark.
fn decode_part(blob: Vec<u8>) -> Result<String> {
    let mut text = String::from_utf8(blob).map_err(|e| OoxmlError::from(e.utf8_error()))?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}
