//! Filter operations and the catalog of operations per value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::value_type::ColumnValueType;
use crate::common::error::ValueError;

/// Comparison applied by a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperation {
    #[serde(rename = "Equals")]
    Equals,
    #[serde(rename = "Contains")]
    Contains,
    #[serde(rename = "In range")]
    InRange,
    #[serde(rename = "In list")]
    InList,
}

const TEXT_OPERATIONS: &[FilterOperation] = &[
    FilterOperation::Equals,
    FilterOperation::Contains,
    FilterOperation::InList,
];

const ORDERED_OPERATIONS: &[FilterOperation] = &[
    FilterOperation::Equals,
    FilterOperation::InRange,
    FilterOperation::InList,
];

impl FilterOperation {
    /// Display name, also accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperation::Equals => "Equals",
            FilterOperation::Contains => "Contains",
            FilterOperation::InRange => "In range",
            FilterOperation::InList => "In list",
        }
    }

    /// Whether this operation is offered for the value type.
    pub fn is_supported(self, value_type: ColumnValueType) -> bool {
        operations_for(value_type).contains(&self)
    }

    /// Error reported when this operation is used with a type that lacks it.
    pub(crate) fn unsupported_for(self, value_type: ColumnValueType) -> ValueError {
        ValueError::UnsupportedOperation {
            operation: self.to_string(),
            value_type: value_type.to_string(),
        }
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperation {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Equals" => Ok(FilterOperation::Equals),
            "Contains" => Ok(FilterOperation::Contains),
            "In range" => Ok(FilterOperation::InRange),
            "In list" => Ok(FilterOperation::InList),
            other => Err(ValueError::UnknownOperation(other.to_string())),
        }
    }
}

/// Operations legal for a value type, in presentation order.
pub fn operations_for(value_type: ColumnValueType) -> &'static [FilterOperation] {
    match value_type {
        ColumnValueType::Text => TEXT_OPERATIONS,
        ColumnValueType::Number | ColumnValueType::Date => ORDERED_OPERATIONS,
    }
}

/// The operation preselected for a value type.
#[inline]
pub fn default_operation(value_type: ColumnValueType) -> FilterOperation {
    operations_for(value_type)[0]
}
