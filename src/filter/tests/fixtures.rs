#![cfg(test)]

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::ooxml::xlsx::template::default_styles_xml;
use crate::ooxml::xlsx::{MutableWorksheet, Workbook, WorkbookWriter};
use crate::sheet::{CellValue, ExcelDateTime, StyleId};

/// Number format `0.00` on top of the built-in cell formats.
pub const AMOUNT_STYLE: StyleId = StyleId(4);

/// Built-in stylesheet with one extra cell format for amounts.
pub fn sales_stylesheet() -> String {
    default_styles_xml()
        .replace(r#"<cellXfs count="4">"#, r#"<cellXfs count="5">"#)
        .replace(
            "</cellXfs>",
            r#"<xf numFmtId="2" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs>"#,
        )
}

pub fn date(y: i32, m: u32, d: u32) -> CellValue {
    let value = NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    CellValue::DateTime(ExcelDateTime::from_date(value, false))
}

pub fn datetime(text: &str) -> CellValue {
    let value = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").expect("valid datetime");
    CellValue::DateTime(ExcelDateTime::from_naive(value, false))
}

/// Sales rows: `(region, amount, date)`.
pub fn sales_rows() -> Vec<(&'static str, f64, CellValue)> {
    vec![
        ("North", 100.0, date(2024, 1, 15)),
        ("East", 100.0, date(2024, 1, 16)),
        ("South", 250.0, date(2024, 2, 1)),
        ("South", 100.00000001, datetime("2024-02-02 23:59")),
        ("West", 100.0, date(2024, 2, 3)),
        ("NORTH", 100.0, date(2024, 3, 1)),
        ("North", 99.5, date(2024, 3, 2)),
    ]
}

/// Fill a worksheet with the sales table, header on row 1.
pub fn fill_sales(sheet: &mut MutableWorksheet) {
    for (column, name) in ["Region", "Amount", "Date"].into_iter().enumerate() {
        sheet.set_cell(1, column as u32 + 1, name, StyleId::BOLD);
    }

    for (i, (region, amount, when)) in sales_rows().into_iter().enumerate() {
        let row = i as u32 + 2;
        sheet.set_cell_value(row, 1, region);
        sheet.set_cell(row, 2, amount, AMOUNT_STYLE);
        let style = if when.display_text().contains(':') {
            StyleId::DATE_TIME
        } else {
            StyleId::DATE
        };
        sheet.set_cell(row, 3, when, style);
    }
}

/// Write the sales workbook to `dir/name`.
pub fn write_sales_workbook(dir: &Path, name: &str) -> PathBuf {
    write_workbook(dir, name, false, fill_sales)
}

/// Write a single-sheet workbook built by `fill`.
pub fn write_workbook<F>(dir: &Path, name: &str, date1904: bool, fill: F) -> PathBuf
where
    F: FnOnce(&mut MutableWorksheet),
{
    let mut writer = WorkbookWriter::with_stylesheet(sales_stylesheet());
    writer.set_date1904(date1904);
    fill(writer.add_worksheet("Sales").expect("add worksheet"));

    let path = dir.join(name);
    writer.save(&path).expect("save workbook");
    path
}

/// Open a workbook and load its first worksheet.
pub fn read_first_sheet(path: &Path) -> (Workbook, crate::ooxml::xlsx::Worksheet) {
    let mut workbook = Workbook::open(path).expect("open workbook");
    let sheet = workbook.first_worksheet().expect("first worksheet");
    (workbook, sheet)
}
