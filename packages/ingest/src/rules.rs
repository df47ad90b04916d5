//! Field-level validation and normalization rules.
//!
//! Every rule takes a raw value, with defaults already applied by the
//! schema, and returns either the normalized value or the [`RuleViolation`]
//! explaining the rejection. Rules never coerce an invalid value into a
//! valid one.

use thiserror::Error;
use url::Url;

use crate::config::{
    BIBLICAL_REFERENCE_PATTERN, LEVEL_PATTERN, METADATA_TEXT_PATTERN, YEAR_MAX, YEAR_MIN,
    YEAR_UNDATED,
};
use crate::text::contains_unrenderable_glyph;
use crate::types::AvailabilityStatus;

/// Reason a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("field required")]
    Missing,

    #[error("must not be blank")]
    Blank,

    #[error("Year must be a 4-digit number between 2015 and 2025 or 9999")]
    Year,

    #[error("Level must be in the format 'CFA ProgramLevel #' where # is the level number")]
    Level,

    #[error("must be an absolute http(s) URL")]
    Url,

    #[error("Link to the PDF file must end with '.pdf'")]
    PdfExtension,

    #[error("only alphanumeric characters, spaces, hyphens, colons and commas allowed")]
    RestrictedText,

    #[error("must consist of only letters and numbers, without any special characters")]
    NotAlphanumeric,

    #[error("Status must be one of ['available', 'unavailable', 'unknown']")]
    AvailabilityStatus,

    #[error("invalid format for Biblical Reference")]
    BiblicalReference,

    #[error("must not contain the unrenderable glyph '\u{25A1}'")]
    UnrenderableGlyph,
}

/// Result of applying a single rule.
pub type RuleResult<T> = std::result::Result<T, RuleViolation>;

/// A text rule: validates and returns the (possibly normalized) value.
pub type TextRule = fn(&str) -> RuleResult<String>;

/// Run text rules in order, feeding each rule the previous rule's output.
///
/// Stops at the first violation.
pub fn apply_rules(value: &str, rules: &[TextRule]) -> RuleResult<String> {
    let mut current = value.to_string();
    for rule in rules {
        current = rule(&current)?;
    }
    Ok(current)
}

/// Reject values that are empty after trimming. Returns the value unchanged.
pub fn not_blank(value: &str) -> RuleResult<String> {
    if value.trim().is_empty() {
        Err(RuleViolation::Blank)
    } else {
        Ok(value.to_string())
    }
}

/// Validate a curriculum year.
///
/// The text must be exactly four ASCII digits and the number must be
/// [`YEAR_UNDATED`] or fall within `YEAR_MIN..=YEAR_MAX`. Shorter numbers are
/// rejected, not zero-padded.
///
/// # Examples
/// ```
/// use refresher_ingest::rules::year;
///
/// assert_eq!(year("2020"), Ok(2020));
/// assert_eq!(year("9999"), Ok(9999));
/// assert!(year("99").is_err());
/// assert!(year("2026").is_err());
/// ```
pub fn year(value: &str) -> RuleResult<u16> {
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(RuleViolation::Year);
    }
    let parsed: u16 = value.parse().map_err(|_| RuleViolation::Year)?;
    if parsed == YEAR_UNDATED || (YEAR_MIN..=YEAR_MAX).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(RuleViolation::Year)
    }
}

/// Validate a programme level ("CFA ProgramLevel <token>").
pub fn level(value: &str) -> RuleResult<String> {
    if LEVEL_PATTERN.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(RuleViolation::Level)
    }
}

/// Require an absolute http or https URL.
pub fn http_url(value: &str) -> RuleResult<String> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(value.to_string())
        }
        _ => Err(RuleViolation::Url),
    }
}

/// Require a ".pdf" suffix (case-sensitive).
///
/// The "N/A" sentinel never reaches this rule: the topic schema maps it to
/// an unspecified field first. Any other spelling, such as "n/A", is checked
/// like a link and rejected.
pub fn pdf_link(value: &str) -> RuleResult<String> {
    if value.ends_with(".pdf") {
        Ok(value.to_string())
    } else {
        Err(RuleViolation::PdfExtension)
    }
}

/// Restrict metadata text to word characters, whitespace, `-`, `:` and `,`.
/// Trims on success.
pub fn restricted_text(value: &str) -> RuleResult<String> {
    if METADATA_TEXT_PATTERN.is_match(value) {
        Ok(value.trim().to_string())
    } else {
        Err(RuleViolation::RestrictedText)
    }
}

/// Require letters and digits only, ignoring spaces. Trims on success.
pub fn alphanumeric_title(value: &str) -> RuleResult<String> {
    let mut chars = value.chars().filter(|c| *c != ' ').peekable();
    if chars.peek().is_some() && chars.all(char::is_alphanumeric) {
        Ok(value.trim().to_string())
    } else {
        Err(RuleViolation::NotAlphanumeric)
    }
}

/// Parse the availability status enum.
pub fn availability_status(value: &str) -> RuleResult<AvailabilityStatus> {
    AvailabilityStatus::from_status(value).ok_or(RuleViolation::AvailabilityStatus)
}

/// Validate an optional bibliographic reference.
///
/// Absent and empty values pass as `None`.
pub fn biblical_reference(value: Option<&str>) -> RuleResult<Option<String>> {
    match value {
        None | Some("") => Ok(None),
        Some(v) if BIBLICAL_REFERENCE_PATTERN.is_match(v) => Ok(Some(v.to_string())),
        Some(_) => Err(RuleViolation::BiblicalReference),
    }
}

/// Reject text still carrying the unrenderable glyph.
///
/// The glyph means the upstream extraction needs symbol substitution; the
/// value is never accepted as-is.
pub fn no_unrenderable_glyph(value: &str) -> RuleResult<String> {
    if contains_unrenderable_glyph(value) {
        Err(RuleViolation::UnrenderableGlyph)
    } else {
        Ok(value.to_string())
    }
}
