//! Entry point with argument checks for hosts.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use super::columns;
use super::criterion::{ColumnFilterDefinition, ExportResult, FilterCriterion};
use super::export::export_filtered;
use super::settings::FilterSettings;
use crate::common::{Error, Result};

/// Filters workbooks with a fixed set of [`FilterSettings`].
///
/// Arguments are checked before any file is opened: blank paths, blank
/// column names and empty criteria lists are rejected with
/// `InvalidArgument`, and a missing source file with `NotFound`.
///
/// # Examples
///
/// ```rust,no_run
/// use sheetsift::filter::{FilterOperation, SheetFilter};
/// use tokio_util::sync::CancellationToken;
///
/// let filter = SheetFilter::default();
/// let token = CancellationToken::new();
///
/// let amount = filter.column_filter_definition("sales.xlsx", "Amount", &token)?;
/// let criterion = amount.criterion(FilterOperation::InRange, "100; 500", filter.settings().culture)?;
///
/// let result = filter.export("sales.xlsx", "out/filtered.xlsx", &[criterion], &token)?;
/// println!("{} rows written", result.exported_row_count);
/// # Ok::<(), sheetsift::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SheetFilter {
    settings: FilterSettings,
}

impl SheetFilter {
    pub fn new(settings: FilterSettings) -> Self {
        Self { settings }
    }

    #[inline]
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Header names of the first worksheet.
    pub fn column_names<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = existing_source(path.as_ref())?;
        columns::column_names(path)
    }

    /// Type and operations of a named column.
    pub fn column_filter_definition<P: AsRef<Path>>(
        &self,
        path: P,
        column_name: &str,
        token: &CancellationToken,
    ) -> Result<ColumnFilterDefinition> {
        let path = path.as_ref();
        require_path(path, "Excel file path is empty")?;
        if column_name.trim().is_empty() {
            return Err(Error::InvalidArgument("Column name is empty".to_string()));
        }
        let path = existing_source(path)?;
        columns::column_filter_definition(path, column_name, &self.settings, token)
    }

    /// Export the rows matching every criterion.
    pub fn export<S: AsRef<Path>, O: AsRef<Path>>(
        &self,
        source: S,
        output: O,
        criteria: &[FilterCriterion],
        token: &CancellationToken,
    ) -> Result<ExportResult> {
        let source = existing_source(source.as_ref())?;
        let output = output.as_ref();
        require_path(output, "Output file path is empty")?;
        if criteria.is_empty() {
            return Err(Error::InvalidArgument("Filter list is empty".to_string()));
        }
        export_filtered(source, output, criteria, &self.settings, token)
    }
}

fn require_path(path: &Path, message: &str) -> Result<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(Error::InvalidArgument(message.to_string()));
    }
    Ok(())
}

fn existing_source(path: &Path) -> Result<&Path> {
    require_path(path, "Excel file path is empty")?;
    if !path.is_file() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    Ok(path)
}
