//! Number format definitions and date detection.
//!
//! Cell values in SpreadsheetML carry no date type of their own: a date is a
//! serial number whose cell format uses a date/time number format. This
//! module decides which formats count as dates.

/// First ID available for custom number formats.
pub const FIRST_CUSTOM_FORMAT_ID: u32 = 164;

/// A custom number format declared in `<numFmts>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Format ID
    pub id: u32,
    /// Format code (e.g., "0.00", "dd.mm.yyyy")
    pub code: String,
}

impl NumberFormat {
    /// Create a new number format.
    #[inline]
    pub fn new(id: u32, code: String) -> Self {
        Self { id, code }
    }

    /// Check if this format represents a date/time format.
    #[inline]
    pub fn is_date_format(&self) -> bool {
        is_date_format(&self.code)
    }
}

/// Check if a built-in number format ID displays a date or time.
///
/// Covers the universal built-ins (14-22, 45-47) and the East Asian
/// locale-dependent date formats (27-36, 50-58).
#[inline]
pub fn is_builtin_date_format(id: u32) -> bool {
    matches!(id, 14..=22 | 27..=36 | 45..=47 | 50..=58)
}

/// Check if a format code represents a date/time format.
///
/// Only the first section (before `;`) is inspected. Quoted literals,
/// escaped characters and bracketed elapsed-time tokens (`[h]`) are not
/// treated as date parts.
pub fn is_date_format(format: &str) -> bool {
    let mut escaped = false;
    let mut is_quote = false;
    let mut brackets = 0u8;
    let mut prev = ' ';
    let mut hms = false;
    let mut ap = false;

    for s in format.chars() {
        match (s, escaped, is_quote, ap, brackets) {
            (_, true, ..) => escaped = false,
            ('_' | '\\', ..) => escaped = true,
            ('"', _, true, _, _) => is_quote = false,
            (_, _, true, _, _) => (),
            ('"', _, _, _, _) => is_quote = true,
            (';', ..) => return false,
            ('[', ..) => brackets += 1,
            (']', .., 1) if hms => return false,
            (']', ..) => brackets = brackets.saturating_sub(1),
            ('a' | 'A', _, _, false, 0) => ap = true,
            ('p' | 'm' | '/' | 'P' | 'M', _, _, true, 0) => return true,
            ('d' | 'm' | 'h' | 'y' | 's' | 'D' | 'M' | 'H' | 'Y' | 'S', _, _, false, 0) => {
                return true;
            },
            _ => {
                if !(hms && s.eq_ignore_ascii_case(&prev)) {
                    hms = prev == '[' && matches!(s, 'm' | 'h' | 's' | 'M' | 'H' | 'S');
                }
            },
        }
        prev = s;
    }
    false
}
