//! Walks the top-level sections of a TEI body and emits content rows.
//!
//! A section with a heading and no paragraphs is a title marker: it becomes
//! the current title for the sections that follow (unless it is the
//! learning-outcomes heading). A section with paragraphs becomes one row,
//! filed under the current title. The current title is carried between
//! sections as an explicit [`TitleState`] value.

use roxmltree::{Document, Node};
use tracing::debug;

use super::xml::{find_tei_path, tei_child, tei_children, text_content};
use crate::config::LEARNING_OUTCOMES_HEADING;
use crate::text::{normalize_unicode, number_glyph_lists, remove_special_characters};
use crate::types::{RawRow, Sentinel};

/// The parts of a top-level `div` the walker looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Text of the direct `head` child, present even when empty.
    pub heading: Option<String>,
    /// Whether the section has any direct `p` child, even an empty one.
    pub has_paragraphs: bool,
    /// Non-empty texts of the direct `p` children, in order.
    pub paragraphs: Vec<String>,
}

impl Section {
    pub fn from_node(div: Node<'_, '_>) -> Self {
        let heading = tei_child(div, "head").map(clean_text);
        let has_paragraphs = tei_child(div, "p").is_some();
        let paragraphs = tei_children(div, "p")
            .map(clean_text)
            .filter(|text| !text.is_empty())
            .collect();

        Self {
            heading,
            has_paragraphs,
            paragraphs,
        }
    }
}

fn clean_text(node: Node<'_, '_>) -> String {
    normalize_unicode(&text_content(node)).trim().to_string()
}

/// Title carried forward from section to section. Starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleState {
    current: String,
}

impl TitleState {
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }
}

/// One extracted (title, subtitle, body) triple, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRow {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

impl ContentRow {
    /// Convert into a raw row keyed by the content table's columns.
    #[must_use]
    pub fn into_raw_row(self) -> RawRow {
        RawRow::new()
            .with("Title", self.title)
            .with("Subtitle", self.subtitle)
            .with("Content", self.body)
    }
}

/// Apply one section to the title state.
///
/// Returns the updated state and the row the section produced, if any.
/// A section whose paragraphs are all empty still produces a row, with an
/// empty body.
pub fn step(state: TitleState, section: &Section) -> (TitleState, Option<ContentRow>) {
    if !section.has_paragraphs {
        return match section.heading.as_deref() {
            Some(heading) if heading != LEARNING_OUTCOMES_HEADING => {
                debug!(title = heading, "section title");
                (
                    TitleState {
                        current: heading.to_string(),
                    },
                    None,
                )
            }
            _ => (state, None),
        };
    }

    let subtitle = section
        .heading
        .clone()
        .unwrap_or_else(|| Sentinel::NoSubtitle.to_string());
    let body = number_glyph_lists(&section.paragraphs.join(" "));

    let title = if state.current.is_empty() {
        Sentinel::NotAvailable.as_str()
    } else {
        state.current.as_str()
    };
    let title = remove_special_characters(title);

    let row = ContentRow {
        title: title.clone(),
        subtitle,
        body,
    };
    (TitleState { current: title }, Some(row))
}

/// Fold a sequence of sections into content rows.
pub fn walk_sections<'s>(sections: impl IntoIterator<Item = &'s Section>) -> Vec<ContentRow> {
    let mut state = TitleState::default();
    let mut rows = Vec::new();

    for section in sections {
        let (next, row) = step(state, section);
        state = next;
        rows.extend(row);
    }

    rows
}

/// Sections of the document body: the direct `div` children of `text/body`.
///
/// A document without a body has no sections.
pub fn body_sections(doc: &Document<'_>) -> Vec<Section> {
    find_tei_path(doc.root_element(), "text/body")
        .map(|body| tei_children(body, "div").map(Section::from_node).collect())
        .unwrap_or_default()
}

/// Extract all content rows from a parsed TEI document.
pub fn extract_content(doc: &Document<'_>) -> Vec<ContentRow> {
    let sections = body_sections(doc);
    let rows = walk_sections(&sections);
    debug!(sections = sections.len(), rows = rows.len(), "walked document body");
    rows
}
