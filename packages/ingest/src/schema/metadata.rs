//! Document-level metadata records, one per TEI document.

use serde::Serialize;

use super::{FieldChecks, RecordError, RecordSchema};
use crate::rules::{self, RuleViolation, TextRule};
use crate::types::{AvailabilityStatus, RawRow};

const DESCRIPTIVE_RULES: &[TextRule] = &[rules::not_blank, rules::restricted_text];
const ABSTRACT_RULES: &[TextRule] = &[rules::no_unrenderable_glyph];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Publisher")]
    pub publisher: String,

    #[serde(rename = "AvailabilityStatus")]
    pub availability_status: AvailabilityStatus,

    /// Written as an empty cell when absent.
    #[serde(rename = "BiblicalReference")]
    pub biblical_reference: Option<String>,

    #[serde(rename = "AppInfoDescription")]
    pub app_info_description: String,

    #[serde(rename = "Abstract")]
    pub abstract_text: String,
}

impl RecordSchema for Metadata {
    const NAME: &'static str = "Metadata";

    const FIELDS: &'static [&'static str] = &[
        "Title",
        "Publisher",
        "AvailabilityStatus",
        "BiblicalReference",
        "AppInfoDescription",
        "Abstract",
    ];

    fn from_row(row: &RawRow) -> Result<Self, RecordError> {
        let mut checks = FieldChecks::new();

        let title = checks.required(row, "Title", DESCRIPTIVE_RULES);
        let publisher = checks.required(row, "Publisher", DESCRIPTIVE_RULES);
        let availability_status = checks.check(
            "AvailabilityStatus",
            row.get("AvailabilityStatus")
                .ok_or(RuleViolation::Missing)
                .and_then(rules::availability_status),
        );
        let biblical_reference = checks.check(
            "BiblicalReference",
            rules::biblical_reference(row.get("BiblicalReference")),
        );
        let app_info_description = checks.required(row, "AppInfoDescription", DESCRIPTIVE_RULES);
        let abstract_text = checks.required(row, "Abstract", ABSTRACT_RULES);

        match (
            title,
            publisher,
            availability_status,
            biblical_reference,
            app_info_description,
            abstract_text,
        ) {
            (
                Some(title),
                Some(publisher),
                Some(availability_status),
                Some(biblical_reference),
                Some(app_info_description),
                Some(abstract_text),
            ) if checks.is_clean() => Ok(Self {
                title,
                publisher,
                availability_status,
                biblical_reference,
                app_info_description,
                abstract_text,
            }),
            _ => Err(checks.into_error(Self::NAME)),
        }
    }
}
