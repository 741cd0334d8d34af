//! Culture-tolerant parsing of numbers and dates typed by a user.
//!
//! Every parse first tries the configured culture and then falls back to the
//! invariant culture, so `10.5` is accepted everywhere and `10,5` is accepted
//! under [`Culture::European`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Date layouts of the invariant culture.
const INVARIANT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Date layouts of the European culture.
const EUROPEAN_DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Accepted time-of-day layouts after a date.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Conventions used to read numbers and dates from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Culture {
    /// `.` decimal separator; `yyyy-MM-dd` and `MM/dd/yyyy` dates
    #[default]
    Invariant,
    /// `,` decimal separator; `dd.MM.yyyy` and `dd/MM/yyyy` dates
    European,
}

impl Culture {
    /// Parse a floating point number, trying this culture then the invariant one.
    ///
    /// Thousands separators are not accepted. Non-finite results are rejected.
    pub fn parse_number(self, text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let localized = match self {
            Culture::European if !text.contains('.') => parse_invariant_number(&text.replace(',', ".")),
            _ => None,
        };
        localized.or_else(|| parse_invariant_number(text))
    }

    /// Parse a date, trying this culture then the invariant one.
    ///
    /// A trailing time of day is accepted and discarded.
    pub fn parse_date(self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let (date_part, time_part) = split_time(text);
        if let Some(time) = time_part
            && !TIME_FORMATS
                .iter()
                .any(|format| NaiveTime::parse_from_str(time, format).is_ok())
        {
            return None;
        }

        let localized = match self {
            Culture::European => parse_with(date_part, EUROPEAN_DATE_FORMATS),
            Culture::Invariant => None,
        };
        localized.or_else(|| parse_with(date_part, INVARIANT_DATE_FORMATS))
    }
}

fn parse_invariant_number(text: &str) -> Option<f64> {
    let value: f64 = fast_float2::parse(text).ok()?;
    value.is_finite().then_some(value)
}

fn parse_with(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Split `2024-01-15 10:30` or `2024-01-15T10:30` into date and time parts.
fn split_time(text: &str) -> (&str, Option<&str>) {
    match text.find([' ', 'T']) {
        Some(pos) => {
            let time = text[pos + 1..].trim();
            (&text[..pos], (!time.is_empty()).then_some(time))
        },
        None => (text, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_invariant_numbers() {
        let c = Culture::Invariant;
        assert_eq!(c.parse_number("100"), Some(100.0));
        assert_eq!(c.parse_number(" 10.5 "), Some(10.5));
        assert_eq!(c.parse_number("-2e3"), Some(-2000.0));
        assert_eq!(c.parse_number("10,5"), None);
        assert_eq!(c.parse_number("abc"), None);
        assert_eq!(c.parse_number(""), None);
        assert_eq!(c.parse_number("inf"), None);
    }

    #[test]
    fn test_european_numbers_fall_back() {
        let c = Culture::European;
        assert_eq!(c.parse_number("10,5"), Some(10.5));
        assert_eq!(c.parse_number("10.5"), Some(10.5));
        assert_eq!(c.parse_number("1.000,5"), None);
    }

    #[test]
    fn test_invariant_dates() {
        let c = Culture::Invariant;
        assert_eq!(c.parse_date("2024-01-15"), ymd(2024, 1, 15));
        assert_eq!(c.parse_date("01/15/2024"), ymd(2024, 1, 15));
        assert_eq!(c.parse_date("1/5/2024"), ymd(2024, 1, 5));
        assert_eq!(c.parse_date("2024-01-15 10:30"), ymd(2024, 1, 15));
        assert_eq!(c.parse_date("2024-01-15T10:30:15"), ymd(2024, 1, 15));
        assert_eq!(c.parse_date("15.01.2024"), None);
        assert_eq!(c.parse_date("2024-02-30"), None);
        assert_eq!(c.parse_date("2024-01-15 noon"), None);
    }

    #[test]
    fn test_european_dates() {
        let c = Culture::European;
        assert_eq!(c.parse_date("15.01.2024"), ymd(2024, 1, 15));
        assert_eq!(c.parse_date("05/01/2024"), ymd(2024, 1, 5));
        assert_eq!(c.parse_date("2024-01-15"), ymd(2024, 1, 15));
    }
}
