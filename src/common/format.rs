//! Invariant text forms for numbers.

/// Largest magnitude printed through the integer path.
const INTEGER_LIMIT: f64 = 1e15;

/// Format a number in its shortest invariant form.
///
/// Whole numbers print without a fractional part (`100`, `-3`), everything
/// else uses the shortest representation that round-trips (`10.5`,
/// `0.1`). Non-finite values print as `NaN`, `inf` or `-inf`.
///
/// ```
/// use sheetsift::common::format::format_number;
/// assert_eq!(format_number(100.0), "100");
/// assert_eq!(format_number(-0.25), "-0.25");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGER_LIMIT {
        let mut buffer = itoa::Buffer::new();
        // -0.0 prints as 0
        return buffer.format(value as i64).to_string();
    }

    let mut buffer = ryu::Buffer::new();
    buffer.format(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(10.5), "10.5");
        assert_eq!(format_number(10.0000001), "10.0000001");
        assert_eq!(format_number(1234567.0), "1234567");
    }
}
