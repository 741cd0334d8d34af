//! A1-style cell reference helpers for Excel worksheets.

/// Largest column number a worksheet may use (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

/// Largest row number a worksheet may use.
pub const MAX_ROW: u32 = 1_048_576;

/// Convert column number to Excel column letters (e.g., 1 -> "A", 26 -> "Z", 27 -> "AA").
pub fn column_to_letters(column: u32) -> String {
    let mut letters = Vec::with_capacity(3);
    let mut column = column;

    while column > 0 {
        column -= 1;
        letters.push((column % 26) as u8 + b'A');
        column /= 26;
    }

    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert column letters to a column number (`"AA"` -> 27).
///
/// Returns `None` for empty input, non-letters, or columns past `XFD`.
pub fn letters_to_column(letters: &[u8]) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let mut column = 0u32;
    for &byte in letters {
        if !byte.is_ascii_alphabetic() {
            return None;
        }
        column = column * 26 + (byte.to_ascii_uppercase() - b'A' + 1) as u32;
    }

    (column <= MAX_COLUMN).then_some(column)
}

/// Convert an Excel reference (e.g., "B3") to `(column, row)` numbers.
///
/// Absolute markers (`$B$3`) are accepted.
pub fn reference_to_coords(reference: &str) -> Option<(u32, u32)> {
    let bytes: Vec<u8> = reference.bytes().filter(|&b| b != b'$').collect();
    let split = bytes.iter().position(u8::is_ascii_digit)?;

    let column = letters_to_column(&bytes[..split])?;
    let row: u32 = atoi_simd::parse::<u32, false, false>(&bytes[split..]).ok()?;

    (1..=MAX_ROW).contains(&row).then_some((column, row))
}

/// Build an A1-style reference from 1-based coordinates.
pub fn coords_to_reference(column: u32, row: u32) -> String {
    let mut reference = column_to_letters(column);
    reference.push_str(itoa::Buffer::new().format(row));
    reference
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_to_letters(1), "A");
        assert_eq!(column_to_letters(26), "Z");
        assert_eq!(column_to_letters(27), "AA");
        assert_eq!(column_to_letters(MAX_COLUMN), "XFD");

        assert_eq!(letters_to_column(b"A"), Some(1));
        assert_eq!(letters_to_column(b"az"), Some(52));
        assert_eq!(letters_to_column(b"XFE"), None);
        assert_eq!(letters_to_column(b""), None);
    }

    #[test]
    fn test_reference_to_coords() {
        assert_eq!(reference_to_coords("A1"), Some((1, 1)));
        assert_eq!(reference_to_coords("$C$12"), Some((3, 12)));
        assert_eq!(reference_to_coords("AB100"), Some((28, 100)));
        assert_eq!(reference_to_coords("A0"), None);
        assert_eq!(reference_to_coords("12"), None);
        assert_eq!(reference_to_coords("A1B"), None);
    }

    #[test]
    fn test_coords_to_reference() {
        assert_eq!(coords_to_reference(1, 1), "A1");
        assert_eq!(coords_to_reference(28, 100), "AB100");
    }
}
