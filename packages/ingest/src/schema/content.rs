//! Content records extracted from TEI section bodies.

use serde::Serialize;

use super::{FieldChecks, RecordError, RecordSchema};
use crate::rules::{self, TextRule};
use crate::types::RawRow;

const TITLE_RULES: &[TextRule] = &[rules::not_blank, rules::alphanumeric_title];
const SUBTITLE_RULES: &[TextRule] = &[rules::not_blank];
const CONTENT_RULES: &[TextRule] = &[rules::not_blank, rules::no_unrenderable_glyph];

/// One section body, under the title of its enclosing heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Subtitle")]
    pub subtitle: String,

    #[serde(rename = "Content")]
    pub content: String,
}

impl RecordSchema for Content {
    const NAME: &'static str = "Content";

    const FIELDS: &'static [&'static str] = &["Title", "Subtitle", "Content"];

    fn from_row(row: &RawRow) -> Result<Self, RecordError> {
        let mut checks = FieldChecks::new();

        let title = checks.required(row, "Title", TITLE_RULES);
        let subtitle = checks.required(row, "Subtitle", SUBTITLE_RULES);
        let content = checks.required(row, "Content", CONTENT_RULES);

        match (title, subtitle, content) {
            (Some(title), Some(subtitle), Some(content)) if checks.is_clean() => Ok(Self {
                title,
                subtitle,
                content,
            }),
            _ => Err(checks.into_error(Self::NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleViolation;
    use pretty_assertions::assert_eq;

    fn content_row(title: &str, subtitle: &str, content: &str) -> RawRow {
        RawRow::new()
            .with("Title", title)
            .with("Subtitle", subtitle)
            .with("Content", content)
    }

    #[test]
    fn test_content_valid() {
        let record = Content::from_row(&content_row("Data1", "Test Subtitle", "Test Content")).unwrap();
        assert_eq!(
            record,
            Content {
                title: "Data1".to_string(),
                subtitle: "Test Subtitle".to_string(),
                content: "Test Content".to_string(),
            }
        );
    }

    #[test]
    fn test_content_title_is_trimmed() {
        let record = Content::from_row(&content_row(" Title123 ", "Subtitle", "Content123")).unwrap();
        assert_eq!(record.title, "Title123");
    }

    #[test]
    fn test_content_allows_punctuation_in_body() {
        let record =
            Content::from_row(&content_row("Title", "Subtitle", "Content with special characters: ?&$%"));
        assert!(record.is_ok());
    }

    #[test]
    fn test_content_blank_title() {
        let err = Content::from_row(&content_row("", "Subtitle", "Content with special characters: @#"))
            .unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, "Title");
        assert_eq!(err.fields[0].violation, RuleViolation::Blank);
    }

    #[test]
    fn test_content_blank_body() {
        let err = Content::from_row(&content_row("Title", "Subtitle", "")).unwrap_err();
        assert!(err.has_field("Content"));
    }

    #[test]
    fn test_content_title_special_characters() {
        let err = Content::from_row(&content_row("Title$", "Subtitle", "Content")).unwrap_err();
        assert_eq!(err.fields[0].violation, RuleViolation::NotAlphanumeric);
    }

    #[test]
    fn test_content_unrenderable_glyph() {
        let err = Content::from_row(&content_row(
            "Title",
            "Subtitle",
            "Content with special character: \u{25A1}",
        ))
        .unwrap_err();
        assert_eq!(err.fields[0].violation, RuleViolation::UnrenderableGlyph);
    }

    #[test]
    fn test_content_blank_title_and_body_reported_together() {
        let row = RawRow::new().with("Title", "").with("Content", "");
        let err = Content::from_row(&row).unwrap_err();
        assert!(err.has_field("Title"));
        assert!(err.has_field("Content"));
        assert!(err.has_field("Subtitle"));
        assert!(err.to_string().contains("Title: must not be blank"));
        assert!(err.to_string().contains("Content: must not be blank"));
    }
}
