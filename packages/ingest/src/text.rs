//! Text normalization shared by the TEI walker and the field rules.

use unicode_normalization::UnicodeNormalization;

use crate::config::UNRENDERABLE_GLYPH;

/// Rewrite marker-delimited enumerations into a numbered list.
///
/// The text is split on `symbol`; the first segment is kept as-is and every
/// following segment is prefixed with its 1-based ordinal and `". "`.
/// Text without the marker is returned unchanged. Output still containing
/// ordinals must not be fed through again.
///
/// # Examples
/// ```
/// use refresher_ingest::text::replace_symbols_with_numbers;
///
/// assert_eq!(replace_symbols_with_numbers("a\u{25A1}b\u{25A1}c", '\u{25A1}'), "a1. b2. c");
/// assert_eq!(replace_symbols_with_numbers("plain", '\u{25A1}'), "plain");
/// ```
pub fn replace_symbols_with_numbers(text: &str, symbol: char) -> String {
    let mut parts = text.split(symbol);
    let mut result = parts.next().unwrap_or_default().to_string();
    for (i, part) in parts.enumerate() {
        result.push_str(&format!("{}. {}", i + 1, part));
    }
    result
}

/// Rewrite unrenderable-glyph enumerations in extracted text.
pub fn number_glyph_lists(text: &str) -> String {
    replace_symbols_with_numbers(text, UNRENDERABLE_GLYPH)
}

/// Keep only ASCII letters, digits and spaces.
///
/// # Examples
/// ```
/// use refresher_ingest::text::remove_special_characters;
///
/// assert_eq!(remove_special_characters("1. Fixed-Income (Basics)"), "1 FixedIncome Basics");
/// ```
pub fn remove_special_characters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Drop embedded newlines and tabs, then trim.
pub fn clean_inline_whitespace(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\n' && *c != '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Compose to NFC and drop control characters other than whitespace.
///
/// PDF-to-XML conversion leaves decomposed accents and stray control
/// characters behind.
pub fn normalize_unicode(text: &str) -> String {
    text.nfc()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect()
}

/// Check whether text still carries the unrenderable glyph.
pub fn contains_unrenderable_glyph(text: &str) -> bool {
    text.contains(UNRENDERABLE_GLYPH)
}
