#![cfg(test)]

use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

use super::fixtures::{write_sales_workbook, write_workbook};
use crate::common::Error;
use crate::filter::{
    ColumnValueType, FilterOperation, FilterSettings, SheetFilter, column_filter_definition, column_names,
};
use crate::sheet::{CellValue, StyleId};

fn definition_type(path: &std::path::Path, column: &str) -> ColumnValueType {
    column_filter_definition(path, column, &FilterSettings::default(), &CancellationToken::new())
        .expect("definition")
        .value_type
}

#[test]
fn sales_columns_are_typed() {
    let dir = tempdir().expect("create temp dir");
    let path = write_sales_workbook(dir.path(), "sales.xlsx");

    assert_eq!(column_names(&path).expect("names"), vec!["Region", "Amount", "Date"]);
    assert_eq!(definition_type(&path, "Region"), ColumnValueType::Text);
    assert_eq!(definition_type(&path, "Amount"), ColumnValueType::Number);
    assert_eq!(definition_type(&path, "Date"), ColumnValueType::Date);

    let amount = column_filter_definition(&path, " Amount ", &FilterSettings::default(), &CancellationToken::new())
        .expect("definition");
    assert_eq!(amount.column_name, "Amount");
    assert_eq!(
        amount.operations,
        vec![FilterOperation::Equals, FilterOperation::InRange, FilterOperation::InList]
    );
}

#[test]
fn numbers_stored_as_text_make_a_text_column() {
    let dir = tempdir().expect("create temp dir");
    let path = write_workbook(dir.path(), "codes.xlsx", false, |sheet| {
        sheet.set_cell_value(1, 1, "Code");
        sheet.set_cell_value(1, 2, "Count");
        for row in 2..40 {
            sheet.set_cell_value(row, 1, i64::from(row));
            sheet.set_cell_value(row, 2, i64::from(row) * 3);
        }
        sheet.set_cell_value(40, 1, "0042");
        sheet.set_cell(41, 2, CellValue::Empty, StyleId::BOLD);
    });

    assert_eq!(definition_type(&path, "Code"), ColumnValueType::Text);
    assert_eq!(definition_type(&path, "Count"), ColumnValueType::Number);
}

#[test]
fn sample_limit_comes_from_settings() {
    let dir = tempdir().expect("create temp dir");
    let path = write_workbook(dir.path(), "late-text.xlsx", false, |sheet| {
        sheet.set_cell_value(1, 1, "Value");
        for row in 2..=11 {
            sheet.set_cell_value(row, 1, 1.5);
        }
        sheet.set_cell_value(12, 1, "late text");
    });

    let token = CancellationToken::new();
    let capped = FilterSettings::default().with_sample_limit(10);
    let definition = column_filter_definition(&path, "Value", &capped, &token).expect("definition");
    assert_eq!(definition.value_type, ColumnValueType::Number);
    assert_eq!(definition_type(&path, "Value"), ColumnValueType::Text);
}

#[test]
fn header_names_skip_blanks_and_keep_order() {
    let dir = tempdir().expect("create temp dir");
    let path = write_workbook(dir.path(), "header.xlsx", false, |sheet| {
        sheet.set_cell_value(2, 4, " Zeta ");
        sheet.set_cell_value(2, 2, "Alpha");
        sheet.set_cell_value(2, 3, "  ");
        sheet.set_cell_value(2, 6, "Alpha");
        sheet.set_cell_value(3, 2, "x");
    });

    assert_eq!(column_names(&path).expect("names"), vec!["Alpha", "Zeta"]);
}

#[test]
fn workbooks_without_header_have_no_columns() {
    let dir = tempdir().expect("create temp dir");
    let path = write_workbook(dir.path(), "empty.xlsx", false, |sheet| {
        sheet.set_cell(1, 1, CellValue::Empty, StyleId::BOLD);
    });

    assert!(column_names(&path).expect("names").is_empty());
    assert!(matches!(
        column_filter_definition(&path, "Any", &FilterSettings::default(), &CancellationToken::new()),
        Err(Error::NoHeaderRow)
    ));
}

#[test]
fn unknown_column_and_cancellation() {
    let dir = tempdir().expect("create temp dir");
    let path = write_sales_workbook(dir.path(), "sales.xlsx");
    let settings = FilterSettings::default();

    let result = column_filter_definition(&path, "Country", &settings, &CancellationToken::new());
    assert!(matches!(result, Err(Error::ColumnNotFound(ref name)) if name == "Country"));

    let token = CancellationToken::new();
    token.cancel();
    let result = column_filter_definition(&path, "Amount", &settings, &token);
    assert!(result.expect_err("cancelled").is_cancelled());
}

#[test]
fn sheet_filter_checks_query_arguments() {
    let dir = tempdir().expect("create temp dir");
    let path = write_sales_workbook(dir.path(), "sales.xlsx");
    let filter = SheetFilter::default();
    let token = CancellationToken::new();

    assert!(matches!(filter.column_names(""), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        filter.column_names(dir.path().join("missing.xlsx")),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        filter.column_filter_definition(&path, "  ", &token),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        filter.column_filter_definition(" ", "Amount", &token),
        Err(Error::InvalidArgument(_))
    ));

    let definition = filter
        .column_filter_definition(&path, "Date", &token)
        .expect("definition");
    assert_eq!(definition.value_type, ColumnValueType::Date);
    assert_eq!(definition.default_operation(), Some(FilterOperation::Equals));
}
