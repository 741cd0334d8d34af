use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// Use LeftmostLongest to ensure longer entities are matched first (e.g., &amp; instead of &lt;)
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use sheetsift::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape XML special characters.
///
/// Replaces the five standard XML entities with their corresponding characters.
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use sheetsift::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"])
}

/// Resolve the body of a general entity reference (the part between `&` and `;`).
///
/// Handles the predefined entities and decimal/hexadecimal character
/// references. Unknown entities are returned verbatim, including the
/// surrounding `&` and `;`.
///
/// ```
/// use sheetsift::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp"), "&");
/// assert_eq!(resolve_entity("#65"), "A");
/// assert_eq!(resolve_entity("#x263A"), "\u{263A}");
/// assert_eq!(resolve_entity("nbsp"), "&nbsp;");
/// ```
pub fn resolve_entity(name: &str) -> String {
    if let Some(reference) = name.strip_prefix('#') {
        let code = match reference.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => reference.parse::<u32>().ok(),
        };
        if let Some(ch) = code.and_then(char::from_u32) {
            return ch.to_string();
        }
    }

    unescape_xml(&format!("&{};", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_round_trip() {
        let raw = r#"Tom & "Jerry" <cat>"#;
        assert_eq!(unescape_xml(&escape_xml(raw)), raw);
    }

    #[test]
    fn test_resolve_invalid_char_ref() {
        assert_eq!(resolve_entity("#xZZ"), "&#xZZ;");
        assert_eq!(resolve_entity("quot"), "\"");
    }
}
