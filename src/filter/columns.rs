//! Header names and per-column filter definitions of a workbook.

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::criterion::ColumnFilterDefinition;
use super::header::HeaderMap;
use super::inference::infer_column_type;
use super::settings::FilterSettings;
use crate::common::{Error, Result};
use crate::ooxml::xlsx::Workbook;

/// Header names of the first worksheet, left to right.
///
/// Names are trimmed and blank names are dropped. A workbook without a
/// worksheet or without a header yields an empty list.
pub fn column_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let sheet = match Workbook::open(path)?.first_worksheet() {
        Ok(sheet) => sheet,
        Err(Error::NoWorksheet) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    match HeaderMap::locate(&sheet) {
        Ok((_, header)) => Ok(header.names().map(str::to_string).collect()),
        Err(Error::NoHeaderRow | Error::EmptyHeader) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Infer the type of a named column and list the operations it offers.
///
/// # Errors
///
/// `NoWorksheet`/`NoHeaderRow`/`EmptyHeader` for unusable workbooks,
/// `ColumnNotFound` when no header cell carries the name and `Cancelled`
/// when the token fires during sampling.
pub fn column_filter_definition<P: AsRef<Path>>(
    path: P,
    column_name: &str,
    settings: &FilterSettings,
    token: &CancellationToken,
) -> Result<ColumnFilterDefinition> {
    let sheet = Workbook::open(path)?.first_worksheet()?;
    let (header_row, header) = HeaderMap::locate(&sheet)?;
    let column = header.resolve(column_name)?;
    debug!(column_name = column_name.trim(), column, header_row, "resolved column");

    let value_type = infer_column_type(&sheet, header_row, column, settings.sample_limit, token)?;
    Ok(ColumnFilterDefinition::new(column_name.trim(), value_type))
}
