//! Unified error types for sheetsift.
//!
//! The variants are grouped the way callers react to them: the source file
//! is missing, the package cannot be read, the workbook lacks the structure
//! a filter needs, a criterion value does not parse, or the caller cancelled
//! the operation.
use thiserror::Error;

/// Main error type for sheetsift operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source workbook does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// Corrupted or malformed workbook package
    #[error("Corrupted workbook: {0}")]
    Corrupt(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Workbook contains no worksheet
    #[error("Source workbook does not contain worksheets")]
    NoWorksheet,

    /// First worksheet has no used row to act as a header
    #[error("Header row was not found in source worksheet")]
    NoHeaderRow,

    /// Header row has no non-blank cell
    #[error("Header row is empty")]
    EmptyHeader,

    /// A criterion or query references a column absent from the header
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A criterion value does not follow the grammar of its operation
    #[error("Invalid value for column '{column}': {source}")]
    InvalidValue {
        column: String,
        #[source]
        source: ValueError,
    },

    /// A caller-supplied argument failed a precondition
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation was cancelled through its cancellation token
    #[error("Operation was cancelled")]
    Cancelled,
}

impl Error {
    /// Whether this error reports a user cancellation rather than a failure.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Attach a column name to a criterion value error.
    pub(crate) fn invalid_value(column: impl Into<String>, source: ValueError) -> Self {
        Error::InvalidValue {
            column: column.into(),
            source,
        }
    }
}

/// Failure to parse or validate a criterion value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Single value is empty after trimming
    #[error("value is empty")]
    EmptyValue,

    /// Value is not a number in the configured or invariant culture
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// Value is not a date in the configured or invariant culture
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Range does not have two parts or its start exceeds its end
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// List has no entries once blanks are dropped
    #[error("list is empty")]
    EmptyList,

    /// One list entry does not parse for the column type
    #[error("invalid list item: {0}")]
    InvalidListItem(String),

    /// Operation is not offered for the column type
    #[error("operation '{operation}' is not supported for {value_type} columns")]
    UnsupportedOperation {
        operation: String,
        value_type: String,
    },

    /// Operation name is not one of the known operations
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// Result type for sheetsift operations.
pub type Result<T> = std::result::Result<T, Error>;
