//! Filter definitions, criteria and export results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::codec::{self, CriterionValue};
use super::culture::Culture;
use super::operation::{FilterOperation, operations_for};
use super::value_type::ColumnValueType;
use crate::common::{Error, Result};

/// A column together with its inferred type and the operations it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilterDefinition {
    /// Trimmed header name
    pub column_name: String,
    /// Inferred value type
    pub value_type: ColumnValueType,
    /// Legal operations; the first one is the default
    pub operations: Vec<FilterOperation>,
}

impl ColumnFilterDefinition {
    /// Definition with the catalog operations of `value_type`.
    pub fn new(column_name: impl Into<String>, value_type: ColumnValueType) -> Self {
        Self {
            column_name: column_name.into(),
            value_type,
            operations: operations_for(value_type).to_vec(),
        }
    }

    /// The operation preselected when the column is chosen.
    pub fn default_operation(&self) -> Option<FilterOperation> {
        self.operations.first().copied()
    }

    /// Build a criterion for this column from a user-entered value.
    ///
    /// # Errors
    ///
    /// `InvalidValue` when the operation is not offered by this definition or
    /// the value does not parse.
    pub fn criterion(&self, operation: FilterOperation, raw: &str, culture: Culture) -> Result<FilterCriterion> {
        if !self.operations.contains(&operation) {
            return Err(Error::invalid_value(
                self.column_name.as_str(),
                operation.unsupported_for(self.value_type),
            ));
        }
        FilterCriterion::new(self.column_name.as_str(), self.value_type, operation, raw, culture)
    }
}

/// One `(column, operation, value)` rule. Criteria of a request are ANDed.
///
/// The value is stored in its canonical form; see [`codec`](super::codec).
///
/// # Examples
///
/// ```
/// use sheetsift::filter::{ColumnValueType, Culture, FilterCriterion, FilterOperation};
///
/// let amount = FilterCriterion::new("Amount", ColumnValueType::Number, FilterOperation::InRange, "5;10", Culture::Invariant)?;
/// assert_eq!(amount.value(), "[5; 10]");
/// # Ok::<(), sheetsift::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    column_name: String,
    value_type: ColumnValueType,
    operation: FilterOperation,
    value: String,
}

impl FilterCriterion {
    /// Validate a raw value and build a criterion holding its canonical form.
    ///
    /// # Errors
    ///
    /// `InvalidValue` naming the column when the operation is not offered for
    /// the type or the value does not follow its grammar.
    pub fn new(
        column_name: impl Into<String>,
        value_type: ColumnValueType,
        operation: FilterOperation,
        raw: &str,
        culture: Culture,
    ) -> Result<Self> {
        let column_name = column_name.into();
        let value = codec::encode(value_type, operation, raw, culture)
            .map_err(|e| Error::invalid_value(column_name.as_str(), e))?;

        Ok(Self {
            column_name,
            value_type,
            operation,
            value,
        })
    }

    #[inline]
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    #[inline]
    pub fn value_type(&self) -> ColumnValueType {
        self.value_type
    }

    #[inline]
    pub fn operation(&self) -> FilterOperation {
        self.operation
    }

    /// Canonical value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Decode the stored value for matching.
    ///
    /// Criteria restored through serde are validated here.
    pub fn decode(&self, culture: Culture) -> Result<CriterionValue> {
        codec::decode(self.value_type, self.operation, &self.value, culture)
            .map_err(|e| Error::invalid_value(self.column_name.as_str(), e))
    }
}

/// Outcome of a filtered export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    /// Path of the written workbook
    pub output_path: PathBuf,
    /// Number of data rows written below the header
    pub exported_row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ValueError;

    #[test]
    fn test_definition_operations() {
        let def = ColumnFilterDefinition::new("Region", ColumnValueType::Text);
        assert_eq!(def.default_operation(), Some(FilterOperation::Equals));
        assert_eq!(
            def.operations,
            vec![FilterOperation::Equals, FilterOperation::Contains, FilterOperation::InList]
        );
    }

    #[test]
    fn test_definition_builds_criteria_of_its_type() {
        let def = ColumnFilterDefinition::new("Amount", ColumnValueType::Number);
        let criterion = def.criterion(FilterOperation::Equals, " 100 ", Culture::Invariant).unwrap();
        assert_eq!(criterion.column_name(), "Amount");
        assert_eq!(criterion.value_type(), ColumnValueType::Number);
        assert_eq!(criterion.value(), "100");

        let err = def.criterion(FilterOperation::Contains, "1", Culture::Invariant).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValue {
                source: ValueError::UnsupportedOperation { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_value_names_column() {
        let err = FilterCriterion::new(
            "Date",
            ColumnValueType::Date,
            FilterOperation::Equals,
            "someday",
            Culture::Invariant,
        )
        .unwrap_err();
        match err {
            Error::InvalidValue { column, source } => {
                assert_eq!(column, "Date");
                assert_eq!(source, ValueError::InvalidDate("someday".to_string()));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_canonical() {
        let criterion = FilterCriterion::new(
            "Region",
            ColumnValueType::Text,
            FilterOperation::InList,
            "North, South",
            Culture::Invariant,
        )
        .unwrap();
        assert_eq!(
            criterion.decode(Culture::Invariant).unwrap(),
            CriterionValue::TextList(vec!["North".to_string(), "South".to_string()])
        );
    }
}
