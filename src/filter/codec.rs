//! Criterion value grammar.
//!
//! A criterion value is entered by a user, stored in a canonical string form
//! and decoded again before matching:
//!
//! | Operation            | Input                 | Canonical      |
//! |----------------------|-----------------------|----------------|
//! | `Equals`, `Contains` | `  North `            | `North`        |
//! | `In range`           | `5;10`, `[5 ; 10]`    | `[5; 10]`      |
//! | `In list`            | `a, b ,,c`            | `a, b, c`      |
//!
//! Numbers are canonicalized in their shortest invariant form and dates as
//! `yyyy-MM-dd`.

use std::fmt;

use chrono::NaiveDate;
use memchr::memchr_iter;

use super::culture::Culture;
use super::operation::FilterOperation;
use super::value_type::ColumnValueType;
use crate::common::error::ValueError;
use crate::common::format::format_number;

/// Separator between list entries.
const LIST_SEPARATOR: u8 = b',';

/// Separator between range bounds.
const RANGE_SEPARATOR: char = ';';

/// Typed criterion value.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionValue {
    Text(String),
    TextList(Vec<String>),
    Number(f64),
    NumberRange(f64, f64),
    NumberList(Vec<f64>),
    Date(NaiveDate),
    DateRange(NaiveDate, NaiveDate),
    DateList(Vec<NaiveDate>),
}

impl fmt::Display for CriterionValue {
    /// Writes the canonical form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionValue::Text(text) => f.write_str(text),
            CriterionValue::TextList(items) => f.write_str(&items.join(", ")),
            CriterionValue::Number(n) => f.write_str(&format_number(*n)),
            CriterionValue::NumberRange(from, to) => {
                write!(f, "[{}; {}]", format_number(*from), format_number(*to))
            },
            CriterionValue::NumberList(items) => {
                let items: Vec<String> = items.iter().copied().map(format_number).collect();
                f.write_str(&items.join(", "))
            },
            CriterionValue::Date(date) => write!(f, "{}", format_date(*date)),
            CriterionValue::DateRange(from, to) => {
                write!(f, "[{}; {}]", format_date(*from), format_date(*to))
            },
            CriterionValue::DateList(items) => {
                let items: Vec<String> = items.iter().copied().map(format_date).collect();
                f.write_str(&items.join(", "))
            },
        }
    }
}

/// Parse a raw or canonical value for a type and operation.
///
/// # Errors
///
/// `UnsupportedOperation` when the type does not offer the operation, and
/// the grammar errors of [`ValueError`] otherwise.
pub fn decode(
    value_type: ColumnValueType,
    operation: FilterOperation,
    raw: &str,
    culture: Culture,
) -> Result<CriterionValue, ValueError> {
    use ColumnValueType as T;
    use FilterOperation as Op;

    match (value_type, operation) {
        (T::Text, Op::Equals | Op::Contains) => single(raw).map(|text| CriterionValue::Text(text.to_string())),
        (T::Text, Op::InList) => {
            let items = non_empty_list(raw)?;
            Ok(CriterionValue::TextList(items.into_iter().map(str::to_string).collect()))
        },
        (T::Number, Op::Equals) => number(single(raw)?, culture).map(CriterionValue::Number),
        (T::Number, Op::InRange) => {
            let (from, to) = split_range(raw)?;
            let (from, to) = (number(from, culture)?, number(to, culture)?);
            ordered(raw, from, to).map(|_| CriterionValue::NumberRange(from, to))
        },
        (T::Number, Op::InList) => non_empty_list(raw)?
            .into_iter()
            .map(|item| culture.parse_number(item).ok_or_else(|| ValueError::InvalidListItem(item.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(CriterionValue::NumberList),
        (T::Date, Op::Equals) => date(single(raw)?, culture).map(CriterionValue::Date),
        (T::Date, Op::InRange) => {
            let (from, to) = split_range(raw)?;
            let (from, to) = (date(from, culture)?, date(to, culture)?);
            ordered(raw, from, to).map(|_| CriterionValue::DateRange(from, to))
        },
        (T::Date, Op::InList) => non_empty_list(raw)?
            .into_iter()
            .map(|item| culture.parse_date(item).ok_or_else(|| ValueError::InvalidListItem(item.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(CriterionValue::DateList),
        (value_type, operation) => Err(operation.unsupported_for(value_type)),
    }
}

/// Validate a raw value and return its canonical form.
///
/// ```
/// use sheetsift::filter::{encode, ColumnValueType, Culture, FilterOperation};
///
/// let canonical = encode(ColumnValueType::Number, FilterOperation::InRange, "5;10", Culture::Invariant)?;
/// assert_eq!(canonical, "[5; 10]");
/// # Ok::<(), sheetsift::common::error::ValueError>(())
/// ```
pub fn encode(
    value_type: ColumnValueType,
    operation: FilterOperation,
    raw: &str,
    culture: Culture,
) -> Result<String, ValueError> {
    decode(value_type, operation, raw, culture).map(|value| value.to_string())
}

/// Split a comma separated list, trimming entries and dropping empty ones.
///
/// ```
/// use sheetsift::filter::split_list;
/// assert_eq!(split_list("a, b ,,c"), vec!["a", "b", "c"]);
/// assert!(split_list("  , , ").is_empty());
/// ```
pub fn split_list(raw: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    for end in memchr_iter(LIST_SEPARATOR, raw.as_bytes()).chain(std::iter::once(raw.len())) {
        let item = raw[start..end].trim();
        if !item.is_empty() {
            items.push(item);
        }
        start = end + 1;
    }
    items
}

fn single(raw: &str) -> Result<&str, ValueError> {
    let value = raw.trim();
    if value.is_empty() {
        Err(ValueError::EmptyValue)
    } else {
        Ok(value)
    }
}

fn non_empty_list(raw: &str) -> Result<Vec<&str>, ValueError> {
    let items = split_list(raw);
    if items.is_empty() {
        Err(ValueError::EmptyList)
    } else {
        Ok(items)
    }
}

fn number(text: &str, culture: Culture) -> Result<f64, ValueError> {
    culture
        .parse_number(text)
        .ok_or_else(|| ValueError::InvalidNumber(text.to_string()))
}

fn date(text: &str, culture: Culture) -> Result<NaiveDate, ValueError> {
    culture
        .parse_date(text)
        .ok_or_else(|| ValueError::InvalidDate(text.to_string()))
}

/// Strip optional brackets and split `from; to`.
fn split_range(raw: &str) -> Result<(&str, &str), ValueError> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let mut parts = inner
        .split(RANGE_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty());

    match (parts.next(), parts.next(), parts.next()) {
        (Some(from), Some(to), None) => Ok((from, to)),
        _ => Err(ValueError::InvalidRange(raw.trim().to_string())),
    }
}

fn ordered<T: PartialOrd>(raw: &str, from: T, to: T) -> Result<(), ValueError> {
    if from > to {
        Err(ValueError::InvalidRange(raw.trim().to_string()))
    } else {
        Ok(())
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
