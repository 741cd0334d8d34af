//! Filtered export of the first worksheet.

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::criterion::{ExportResult, FilterCriterion};
use super::header::HeaderMap;
use super::matcher::RowMatcher;
use super::settings::FilterSettings;
use crate::common::{Error, Result};
use crate::ooxml::xlsx::{MutableWorksheet, Workbook, WorkbookWriter};
use crate::sheet::Worksheet;

/// Write the rows of `source` that satisfy every criterion to `output`.
///
/// The header row of the first worksheet is copied first, followed by the
/// matching rows in their original order. Cells keep their values and
/// styles; the source stylesheet is carried over unchanged. Rows without any
/// non-empty cell are never exported. An empty criteria list exports every
/// data row.
///
/// Nothing is written until every row has been scanned. The output
/// directory is created when missing and the file is replaced atomically.
///
/// # Errors
///
/// - `NotFound`, `Corrupt`, `XmlError`, `ZipError` when the source cannot be read
/// - `NoWorksheet`, `NoHeaderRow`, `EmptyHeader` for unusable sources
/// - `ColumnNotFound`, `InvalidValue` for bad criteria, before any row is scanned
/// - `Cancelled` when the token fires; the output path is left untouched
/// - `Io` when the destination cannot be written
pub fn export_filtered<S: AsRef<Path>, O: AsRef<Path>>(
    source: S,
    output: O,
    criteria: &[FilterCriterion],
    settings: &FilterSettings,
    token: &CancellationToken,
) -> Result<ExportResult> {
    let source = source.as_ref();
    let output = output.as_ref();

    // The package is released once the sheet and stylesheet are extracted.
    let (sheet, stylesheet, date1904) = {
        let mut workbook = Workbook::open(source)?;
        let sheet = workbook.first_worksheet()?;
        (sheet, workbook.stylesheet_xml().map(str::to_owned), workbook.is_1904())
    };

    let (header_row, header) = HeaderMap::locate(&sheet)?;
    let matcher = RowMatcher::new(criteria, &header, settings.culture)?;
    let last_column = header.last_column();
    debug!(
        sheet = sheet.name(),
        header_row,
        columns = header.len(),
        last_column,
        criteria = matcher.len(),
        "export prepared"
    );

    let mut writer = match stylesheet {
        Some(xml) => WorkbookWriter::with_stylesheet(xml),
        None => WorkbookWriter::new(),
    };
    writer.set_date1904(date1904);
    let target = writer.add_worksheet(sheet.name())?;
    copy_row(&sheet, header_row, target, 1, last_column);

    let mut exported = 0usize;
    let mut next_row = 2u32;
    let last_row = sheet.last_used_row().unwrap_or(header_row);
    for row in header_row.saturating_add(1)..=last_row {
        if token.is_cancelled() {
            debug!(row, "export cancelled");
            return Err(Error::Cancelled);
        }
        if !has_values(&sheet, row, last_column) || !matcher.matches(&sheet, row) {
            continue;
        }

        copy_row(&sheet, row, target, next_row, last_column);
        next_row += 1;
        exported += 1;
    }

    writer.save(output)?;
    info!(
        source = %source.display(),
        output = %output.display(),
        rows = exported,
        "filtered export complete"
    );

    Ok(ExportResult {
        output_path: output.to_path_buf(),
        exported_row_count: exported,
    })
}

/// Copy columns `1..=last_column` of a source row, values and styles.
fn copy_row<W: Worksheet + ?Sized>(
    sheet: &W,
    row: u32,
    target: &mut MutableWorksheet,
    target_row: u32,
    last_column: u32,
) {
    for (column, cell) in sheet.row_cells(row).take_while(|(column, _)| *column <= last_column) {
        target.put_cell(target_row, column, cell.clone());
    }
}

/// Whether a row holds a non-empty value within the header's columns.
fn has_values<W: Worksheet + ?Sized>(sheet: &W, row: u32, last_column: u32) -> bool {
    sheet
        .row_cells(row)
        .take_while(|(column, _)| *column <= last_column)
        .any(|(_, cell)| !cell.is_empty())
}
