//! Cell format records (`<xf>` entries of `cellXfs`).

/// Cell format as referenced by the `s` attribute of a cell.
///
/// Only the component references are kept; the fonts, fills and borders
/// themselves stay in the raw stylesheet that is copied to exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStyle {
    /// Number format ID (built-in or custom)
    pub num_fmt_id: u32,
    /// Font ID (index into fonts)
    pub font_id: Option<u32>,
    /// Fill ID (index into fills)
    pub fill_id: Option<u32>,
    /// Border ID (index into borders)
    pub border_id: Option<u32>,
    /// Parent cell style format (index into cellStyleXfs)
    pub xf_id: Option<u32>,
    /// Apply number format flag
    pub apply_number_format: bool,
}

impl CellStyle {
    /// Create a cell format using the given number format.
    #[inline]
    pub fn with_number_format(num_fmt_id: u32) -> Self {
        Self {
            num_fmt_id,
            ..Self::default()
        }
    }
}
