//! Excel serial date handling.
//!
//! Excel stores dates as floating-point numbers representing the number of
//! days since a base date:
//! - **1900 system**: day 1 is January 1, 1900 (default). Excel treats 1900
//!   as a leap year for Lotus 1-2-3 compatibility, so serial 60 is the
//!   nonexistent February 29, 1900 and serials below 60 are shifted by one.
//! - **1904 system**: day 0 is January 1, 1904 (legacy Mac workbooks).
//!
//! The fractional part represents the time of day (0.0 = midnight, 0.5 = noon).

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Milliseconds per day
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// First serial after the phantom February 29, 1900.
const FIRST_SERIAL_AFTER_LEAP_BUG: f64 = 61.0;

/// Upper bound (exclusive) of valid serials: January 1, 10000.
const MAX_SERIAL_1900: f64 = 2_958_466.0;
const MAX_SERIAL_1904: f64 = 2_957_004.0;

/// A date/time cell value as stored in the workbook.
///
/// Keeps the raw serial together with the date system it belongs to, so a
/// value copied between workbooks with the same date system is written back
/// bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcelDateTime {
    serial: f64,
    is_1904: bool,
}

impl ExcelDateTime {
    /// Wrap a raw serial number.
    #[inline]
    pub fn new(serial: f64, is_1904: bool) -> Self {
        Self { serial, is_1904 }
    }

    /// Convert a calendar date/time to a serial in the given date system.
    pub fn from_naive(value: NaiveDateTime, is_1904: bool) -> Self {
        let base = base_date(value.date(), is_1904);
        let since_base = value - base.and_hms_opt(0, 0, 0).unwrap_or_default();
        let serial = since_base.num_milliseconds() as f64 / MILLIS_PER_DAY;
        Self { serial, is_1904 }
    }

    /// Convert a calendar date (midnight) to a serial.
    pub fn from_date(value: NaiveDate, is_1904: bool) -> Self {
        Self::from_naive(value.and_hms_opt(0, 0, 0).unwrap_or_default(), is_1904)
    }

    /// The raw serial number.
    #[inline]
    pub fn serial(&self) -> f64 {
        self.serial
    }

    /// Whether the serial uses the 1904 date system.
    #[inline]
    pub fn is_1904(&self) -> bool {
        self.is_1904
    }

    /// Convert to a calendar date/time, rounded to the millisecond.
    ///
    /// Returns `None` for negative serials and serials past December 31, 9999.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let serial = self.serial;
        let max = if self.is_1904 { MAX_SERIAL_1904 } else { MAX_SERIAL_1900 };
        if !serial.is_finite() || serial < 0.0 || serial >= max {
            return None;
        }

        let base = if self.is_1904 {
            NaiveDate::from_ymd_opt(1904, 1, 1)?
        } else if serial < FIRST_SERIAL_AFTER_LEAP_BUG {
            // Serial 60 (the phantom leap day) collapses onto March 1.
            if serial >= 60.0 {
                return NaiveDate::from_ymd_opt(1900, 3, 1)?.and_hms_opt(0, 0, 0);
            }
            NaiveDate::from_ymd_opt(1899, 12, 31)?
        } else {
            NaiveDate::from_ymd_opt(1899, 12, 30)?
        };

        let millis = (serial * MILLIS_PER_DAY).round() as i64;
        base.and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::milliseconds(millis))
    }

    /// Calendar date with the time of day discarded.
    #[inline]
    pub fn date(&self) -> Option<NaiveDate> {
        self.to_naive().map(|value| value.date())
    }
}

/// Base date for a calendar date, honoring the 1900 leap year bug.
fn base_date(date: NaiveDate, is_1904: bool) -> NaiveDate {
    let fallback = NaiveDate::default();
    if is_1904 {
        return NaiveDate::from_ymd_opt(1904, 1, 1).unwrap_or(fallback);
    }

    let leap_bug_start = NaiveDate::from_ymd_opt(1900, 3, 1).unwrap_or(fallback);
    if date < leap_bug_start {
        NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or(fallback)
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_serials_1900() {
        assert_eq!(ExcelDateTime::new(1.0, false).date(), Some(ymd(1900, 1, 1)));
        assert_eq!(ExcelDateTime::new(59.0, false).date(), Some(ymd(1900, 2, 28)));
        assert_eq!(ExcelDateTime::new(61.0, false).date(), Some(ymd(1900, 3, 1)));
        assert_eq!(ExcelDateTime::new(45306.0, false).date(), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_known_serials_1904() {
        assert_eq!(ExcelDateTime::new(0.0, true).date(), Some(ymd(1904, 1, 1)));
        assert_eq!(ExcelDateTime::new(43844.0, true).date(), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_time_of_day() {
        let late = ymd(2024, 1, 15).and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        let value = ExcelDateTime::from_naive(late, false);
        assert!((value.serial() - 45306.999_305_555).abs() < 1e-6);
        assert_eq!(value.to_naive(), Some(late));
        assert_eq!(value.date(), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_round_trip_before_leap_bug() {
        let date = ymd(1900, 2, 10);
        let value = ExcelDateTime::from_date(date, false);
        assert_eq!(value.serial(), 41.0);
        assert_eq!(value.date(), Some(date));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(ExcelDateTime::new(-1.0, false).to_naive(), None);
        assert_eq!(ExcelDateTime::new(3_000_000.0, false).to_naive(), None);
        assert_eq!(ExcelDateTime::new(f64::NAN, true).to_naive(), None);
    }
}
