//! Row matching.
//!
//! Criteria are decoded and bound to their column once per export; each row
//! is then checked against the compiled criteria with logical AND. A cell
//! that cannot be read as the criterion's type does not match.

use chrono::NaiveDate;

use super::codec::CriterionValue;
use super::criterion::FilterCriterion;
use super::culture::Culture;
use super::header::HeaderMap;
use super::operation::FilterOperation;
use crate::common::Result;
use crate::sheet::{CellValue, Worksheet};

/// Absolute tolerance of numeric equality.
pub const NUMBER_TOLERANCE: f64 = 1e-7;

/// Whether two numbers are equal within [`NUMBER_TOLERANCE`].
///
/// The bound is widened by the rounding error of the operands, so a value
/// entered as `10.0000001` equals a stored `10`.
#[inline]
pub fn numbers_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < NUMBER_TOLERANCE + f64::EPSILON * a.abs().max(b.abs())
}

/// Comparison bound to decoded operands.
///
/// Text operands are lowercased for case-insensitive comparison.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    TextEquals(String),
    TextContains(String),
    TextIn(Vec<String>),
    NumberEquals(f64),
    NumberBetween(f64, f64),
    NumberIn(Vec<f64>),
    DateEquals(NaiveDate),
    DateBetween(NaiveDate, NaiveDate),
    DateIn(Vec<NaiveDate>),
}

impl Predicate {
    fn new(operation: FilterOperation, value: CriterionValue) -> Self {
        match value {
            CriterionValue::Text(text) if operation == FilterOperation::Contains => {
                Predicate::TextContains(text.to_lowercase())
            },
            CriterionValue::Text(text) => Predicate::TextEquals(text.to_lowercase()),
            CriterionValue::TextList(items) => {
                Predicate::TextIn(items.iter().map(|item| item.to_lowercase()).collect())
            },
            CriterionValue::Number(n) => Predicate::NumberEquals(n),
            CriterionValue::NumberRange(from, to) => Predicate::NumberBetween(from, to),
            CriterionValue::NumberList(items) => Predicate::NumberIn(items),
            CriterionValue::Date(d) => Predicate::DateEquals(d),
            CriterionValue::DateRange(from, to) => Predicate::DateBetween(from, to),
            CriterionValue::DateList(items) => Predicate::DateIn(items),
        }
    }

    fn test(&self, value: &CellValue, culture: Culture) -> bool {
        match self {
            Predicate::TextEquals(expected) => cell_text(value) == *expected,
            Predicate::TextContains(expected) => cell_text(value).contains(expected.as_str()),
            Predicate::TextIn(items) => {
                let actual = cell_text(value);
                items.iter().any(|item| *item == actual)
            },
            Predicate::NumberEquals(expected) => {
                cell_number(value, culture).is_some_and(|n| numbers_equal(n, *expected))
            },
            Predicate::NumberBetween(from, to) => {
                cell_number(value, culture).is_some_and(|n| n >= *from && n <= *to)
            },
            Predicate::NumberIn(items) => cell_number(value, culture)
                .is_some_and(|n| items.iter().any(|item| numbers_equal(n, *item))),
            Predicate::DateEquals(expected) => cell_date(value, culture).is_some_and(|d| d == *expected),
            Predicate::DateBetween(from, to) => {
                cell_date(value, culture).is_some_and(|d| d >= *from && d <= *to)
            },
            Predicate::DateIn(items) => cell_date(value, culture).is_some_and(|d| items.contains(&d)),
        }
    }
}

/// Trimmed, lowercased display text of a cell.
fn cell_text(value: &CellValue) -> String {
    value.display_text().trim().to_lowercase()
}

/// Native number, else the number written in a text cell.
fn cell_number(value: &CellValue, culture: Culture) -> Option<f64> {
    match value {
        CellValue::String(text) => culture.parse_number(text),
        other => other.as_number(),
    }
}

/// Native date without its time of day, else the date written in a text cell.
fn cell_date(value: &CellValue, culture: Culture) -> Option<NaiveDate> {
    match value {
        CellValue::String(text) => culture.parse_date(text),
        other => other.as_date().map(|dt| dt.date()),
    }
}

/// A criterion decoded and bound to its column.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCriterion {
    column: u32,
    predicate: Predicate,
}

impl CompiledCriterion {
    /// Decode a criterion for a known column index.
    pub fn new(criterion: &FilterCriterion, column: u32, culture: Culture) -> Result<Self> {
        let value = criterion.decode(culture)?;
        Ok(Self {
            column,
            predicate: Predicate::new(criterion.operation(), value),
        })
    }

    /// 1-based column the criterion reads.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Whether a cell value satisfies the criterion.
    pub fn matches(&self, value: &CellValue, culture: Culture) -> bool {
        self.predicate.test(value, culture)
    }
}

/// All criteria of an export request, ready to test rows.
#[derive(Debug, Clone)]
pub struct RowMatcher {
    criteria: Vec<CompiledCriterion>,
    culture: Culture,
}

impl RowMatcher {
    /// Resolve and decode every criterion.
    ///
    /// All column names are resolved before any value is decoded.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` for the first unknown column, then `InvalidValue` for
    /// the first value that fails its grammar.
    pub fn new(criteria: &[FilterCriterion], header: &HeaderMap, culture: Culture) -> Result<Self> {
        let columns = criteria
            .iter()
            .map(|criterion| header.resolve(criterion.column_name()))
            .collect::<Result<Vec<_>>>()?;

        let criteria = criteria
            .iter()
            .zip(columns)
            .map(|(criterion, column)| CompiledCriterion::new(criterion, column, culture))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { criteria, culture })
    }

    /// Whether every criterion holds for `row`. An empty matcher accepts all rows.
    pub fn matches<W: Worksheet + ?Sized>(&self, sheet: &W, row: u32) -> bool {
        self.criteria
            .iter()
            .all(|criterion| criterion.matches(sheet.cell_value(row, criterion.column), self.culture))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
