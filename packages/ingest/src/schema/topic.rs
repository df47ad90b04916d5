//! Topic records scraped from the refresher reading listing pages.

use serde::Serialize;

use super::{FieldChecks, RecordError, RecordSchema};
use crate::rules::{self, TextRule};
use crate::types::{Field, RawRow};

const NAME_RULES: &[TextRule] = &[rules::not_blank];
const LEVEL_RULES: &[TextRule] = &[rules::level];
const SUMMARY_LINK_RULES: &[TextRule] = &[rules::http_url];
const PDF_LINK_RULES: &[TextRule] = &[rules::http_url, rules::pdf_link];

/// One refresher reading topic.
///
/// Every optional field is either a valid value or the "N/A" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    #[serde(rename = "Name_of_the_topic")]
    pub name: String,

    #[serde(rename = "Year")]
    pub year: Field<u16>,

    #[serde(rename = "Level")]
    pub level: Field<String>,

    #[serde(rename = "Introduction_Summary")]
    pub introduction_summary: Field<String>,

    #[serde(rename = "Learning_Outcomes")]
    pub learning_outcomes: Field<String>,

    #[serde(rename = "Link_to_the_Summary_Page")]
    pub summary_page_link: Field<String>,

    #[serde(rename = "Link_to_the_PDF_File")]
    pub pdf_link: Field<String>,
}

impl RecordSchema for Topic {
    const NAME: &'static str = "Topic";

    const FIELDS: &'static [&'static str] = &[
        "Name_of_the_topic",
        "Year",
        "Level",
        "Introduction_Summary",
        "Learning_Outcomes",
        "Link_to_the_Summary_Page",
        "Link_to_the_PDF_File",
    ];

    fn from_row(row: &RawRow) -> Result<Self, RecordError> {
        let mut checks = FieldChecks::new();

        let name = checks.required(row, "Name_of_the_topic", NAME_RULES);
        let year = checks.optional(row, "Year", rules::year);
        let level = checks.optional_text(row, "Level", LEVEL_RULES);
        let introduction_summary = checks.optional_text(row, "Introduction_Summary", &[]);
        let learning_outcomes = checks.optional_text(row, "Learning_Outcomes", &[]);
        let summary_page_link =
            checks.optional_text(row, "Link_to_the_Summary_Page", SUMMARY_LINK_RULES);
        let pdf_link = checks.optional_text(row, "Link_to_the_PDF_File", PDF_LINK_RULES);

        match name {
            Some(name) if checks.is_clean() => Ok(Self {
                name,
                year,
                level,
                introduction_summary,
                learning_outcomes,
                summary_page_link,
                pdf_link,
            }),
            _ => Err(checks.into_error(Self::NAME)),
        }
    }
}
