//! Column type inference.
//!
//! Non-empty cells below the header are sampled in row order and classified
//! by their native kind. A column is `Date` or `Number` only when every
//! sampled cell agrees; any mixture, and a column without samples, is `Text`.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::value_type::ColumnValueType;
use crate::common::{Error, Result};
use crate::sheet::Worksheet;

/// Per-kind counts of the sampled cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    dates: usize,
    numbers: usize,
    texts: usize,
}

impl Tally {
    fn add(&mut self, value_type: ColumnValueType) {
        match value_type {
            ColumnValueType::Date => self.dates += 1,
            ColumnValueType::Number => self.numbers += 1,
            ColumnValueType::Text => self.texts += 1,
        }
    }

    fn sampled(&self) -> usize {
        self.dates + self.numbers + self.texts
    }

    fn decide(&self) -> ColumnValueType {
        let sampled = self.sampled();
        if sampled > 0 && self.dates == sampled {
            ColumnValueType::Date
        } else if sampled > 0 && self.numbers == sampled {
            ColumnValueType::Number
        } else {
            ColumnValueType::Text
        }
    }
}

/// Infer the value type of `column` from the rows below `header_row`.
///
/// At most `sample_limit` non-empty cells are examined. The token is checked
/// before every row.
///
/// # Errors
///
/// `Cancelled` when the token fires during the scan.
pub fn infer_column_type<W: Worksheet + ?Sized>(
    sheet: &W,
    header_row: u32,
    column: u32,
    sample_limit: usize,
    token: &CancellationToken,
) -> Result<ColumnValueType> {
    let mut tally = Tally::default();
    let last_row = sheet.last_used_row().unwrap_or(header_row);

    for row in header_row.saturating_add(1)..=last_row {
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if tally.sampled() >= sample_limit {
            break;
        }

        let value = sheet.cell_value(row, column);
        if value.is_empty() {
            continue;
        }
        tally.add(ColumnValueType::of_cell(value));
    }

    let value_type = tally.decide();
    debug!(
        sheet = sheet.name(),
        column,
        sampled = tally.sampled(),
        dates = tally.dates,
        numbers = tally.numbers,
        texts = tally.texts,
        %value_type,
        "inferred column type"
    );
    Ok(value_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::MutableWorksheet;
    use crate::sheet::{CellValue, ExcelDateTime, StyleId};

    fn column_sheet(values: Vec<CellValue>) -> MutableWorksheet {
        let mut sheet = MutableWorksheet::new("Data".to_string(), 1);
        sheet.set_cell_value(1, 1, "Header");
        for (i, value) in values.into_iter().enumerate() {
            sheet.set_cell_value(i as u32 + 2, 1, value);
        }
        sheet
    }

    fn infer(sheet: &MutableWorksheet, limit: usize) -> ColumnValueType {
        infer_column_type(sheet, 1, 1, limit, &CancellationToken::new()).unwrap()
    }

    fn date(serial: f64) -> CellValue {
        CellValue::DateTime(ExcelDateTime::new(serial, false))
    }

    #[test]
    fn test_pure_columns() {
        let numbers = column_sheet(vec![CellValue::Int(1), CellValue::Float(2.5), CellValue::Int(-4)]);
        assert_eq!(infer(&numbers, 300), ColumnValueType::Number);

        let dates = column_sheet(vec![date(45306.0), date(45307.75)]);
        assert_eq!(infer(&dates, 300), ColumnValueType::Date);

        let texts = column_sheet(vec!["a".into(), "b".into()]);
        assert_eq!(infer(&texts, 300), ColumnValueType::Text);
    }

    #[test]
    fn test_mixtures_are_text() {
        let numeric_string = column_sheet(vec![CellValue::Int(1), "2".into()]);
        assert_eq!(infer(&numeric_string, 300), ColumnValueType::Text);

        let date_and_number = column_sheet(vec![date(45306.0), CellValue::Int(2)]);
        assert_eq!(infer(&date_and_number, 300), ColumnValueType::Text);

        let with_bool = column_sheet(vec![CellValue::Int(1), CellValue::Bool(true)]);
        assert_eq!(infer(&with_bool, 300), ColumnValueType::Text);
    }

    #[test]
    fn test_empty_cells_are_not_sampled() {
        let mut sheet = column_sheet(vec![CellValue::Int(1)]);
        sheet.set_cell(3, 1, CellValue::Empty, StyleId(4));
        sheet.set_cell_value(4, 1, "");
        sheet.set_cell_value(9, 1, 2.0);
        sheet.set_cell_value(12, 2, "other column");
        assert_eq!(infer(&sheet, 300), ColumnValueType::Number);
    }

    #[test]
    fn test_no_samples_is_text() {
        let sheet = column_sheet(Vec::new());
        assert_eq!(infer(&sheet, 300), ColumnValueType::Text);

        let mut other_column_only = column_sheet(Vec::new());
        other_column_only.set_cell_value(2, 2, 5);
        assert_eq!(infer(&other_column_only, 300), ColumnValueType::Text);
    }

    #[test]
    fn test_sample_limit() {
        let mut values: Vec<CellValue> = (0..300).map(CellValue::Int).collect();
        values.push("not a number".into());
        let sheet = column_sheet(values);
        assert_eq!(infer(&sheet, 300), ColumnValueType::Number);
        assert_eq!(infer(&sheet, 301), ColumnValueType::Text);
    }

    #[test]
    fn test_cancelled() {
        let sheet = column_sheet(vec![CellValue::Int(1)]);
        let token = CancellationToken::new();
        token.cancel();
        let result = infer_column_type(&sheet, 1, 1, 300, &token);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
