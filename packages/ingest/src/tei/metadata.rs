//! Document-scoped metadata lookups.
//!
//! Each metadata field is a small path query over the TEI tree. A query
//! takes the first match in document order; a field whose query matches
//! nothing is reported as "No Data".

use roxmltree::{Document, Node};

use super::xml::{direct_texts, is_tei, tei_children, text_content};
use crate::text::{clean_inline_whitespace, normalize_unicode, number_glyph_lists};
use crate::types::{RawRow, Sentinel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

/// One location step: an axis, a TEI element name and required attributes.
#[derive(Debug, Clone, Copy)]
struct Step {
    axis: Axis,
    tag: &'static str,
    attributes: &'static [(&'static str, &'static str)],
}

impl Step {
    const fn child(tag: &'static str) -> Self {
        Self {
            axis: Axis::Child,
            tag,
            attributes: &[],
        }
    }

    const fn descendant(tag: &'static str) -> Self {
        Self {
            axis: Axis::Descendant,
            tag,
            attributes: &[],
        }
    }

    const fn with_attributes(self, attributes: &'static [(&'static str, &'static str)]) -> Self {
        Self { attributes, ..self }
    }

    fn matches(&self, node: Node<'_, '_>) -> bool {
        is_tei(node, self.tag)
            && self
                .attributes
                .iter()
                .all(|(name, value)| node.attribute(*name) == Some(*value))
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    /// First direct text node of a matched element.
    Text,
    /// Attribute value of a matched element.
    Attribute(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct Lookup {
    steps: &'static [Step],
    target: Target,
}

const TITLE: Lookup = Lookup {
    steps: &[
        Step::descendant("titleStmt"),
        Step::child("title").with_attributes(&[("level", "a"), ("type", "main")]),
    ],
    target: Target::Text,
};

const PUBLISHER: Lookup = Lookup {
    steps: &[Step::descendant("publicationStmt"), Step::child("publisher")],
    target: Target::Text,
};

const AVAILABILITY_STATUS: Lookup = Lookup {
    steps: &[Step::descendant("availability")],
    target: Target::Attribute("status"),
};

const BIBLICAL_REFERENCE: Lookup = Lookup {
    steps: &[Step::descendant("back"), Step::descendant("listBibl")],
    target: Target::Text,
};

const APP_INFO_DESCRIPTION: Lookup = Lookup {
    steps: &[Step::descendant("application"), Step::child("desc")],
    target: Target::Text,
};

const ABSTRACT_DIVISIONS: &[Step] = &[
    Step::descendant("profileDesc"),
    Step::child("abstract"),
    Step::child("div"),
];

/// Evaluate location steps from the document root, in document order.
fn select<'a, 'input>(doc: &'a Document<'input>, steps: &[Step]) -> Vec<Node<'a, 'input>> {
    let mut nodes = vec![doc.root()];

    for step in steps {
        let mut next: Vec<Node<'a, 'input>> = Vec::new();
        for node in &nodes {
            match step.axis {
                Axis::Child => next.extend(node.children().filter(|n| step.matches(*n))),
                Axis::Descendant => {
                    next.extend(node.descendants().skip(1).filter(|n| step.matches(*n)));
                }
            }
        }
        // A descendant step from nested contexts can reach a node twice.
        next.sort_by_key(|n| n.id().get());
        next.dedup_by_key(|n| n.id());
        nodes = next;
    }

    nodes
}

fn first_match(doc: &Document<'_>, lookup: &Lookup) -> Option<String> {
    let nodes = select(doc, lookup.steps);
    let raw = match lookup.target {
        Target::Text => nodes.iter().find_map(|n| direct_texts(*n).next()),
        Target::Attribute(name) => nodes.iter().find_map(|n| n.attribute(name)),
    }?;
    Some(clean_inline_whitespace(&normalize_unicode(raw)))
}

fn joined_text<'a, 'input: 'a>(nodes: impl Iterator<Item = Node<'a, 'input>>) -> String {
    nodes
        .map(|n| normalize_unicode(&text_content(n)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the abstract from its divisions: heading and paragraph text per
/// division, divisions joined with spaces, glyph lists numbered.
fn extract_abstract(doc: &Document<'_>) -> String {
    let divisions: Vec<String> = select(doc, ABSTRACT_DIVISIONS)
        .into_iter()
        .map(|div| {
            let head = joined_text(tei_children(div, "head"));
            let paragraphs = joined_text(tei_children(div, "p"));
            format!("{} {}", head.trim(), paragraphs.trim())
                .trim()
                .to_string()
        })
        .collect();

    number_glyph_lists(&divisions.join(" "))
}

/// Metadata of one document, before validation.
///
/// `None` means the lookup found nothing; it is written as "No Data".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub availability_status: Option<String>,
    pub biblical_reference: Option<String>,
    pub app_info_description: Option<String>,
    pub abstract_text: String,
}

impl DocumentMetadata {
    /// Run every metadata lookup against a parsed document.
    pub fn from_document(doc: &Document<'_>) -> Self {
        Self {
            title: first_match(doc, &TITLE),
            publisher: first_match(doc, &PUBLISHER),
            availability_status: first_match(doc, &AVAILABILITY_STATUS),
            biblical_reference: first_match(doc, &BIBLICAL_REFERENCE),
            app_info_description: first_match(doc, &APP_INFO_DESCRIPTION),
            abstract_text: extract_abstract(doc),
        }
    }

    /// Convert into a raw row keyed by the metadata table's columns.
    #[must_use]
    pub fn into_raw_row(self) -> RawRow {
        let or_no_data = |value: Option<String>| value.unwrap_or_else(|| Sentinel::NoData.to_string());

        RawRow::new()
            .with("Title", or_no_data(self.title))
            .with("Publisher", or_no_data(self.publisher))
            .with("AvailabilityStatus", or_no_data(self.availability_status))
            .with("BiblicalReference", or_no_data(self.biblical_reference))
            .with("AppInfoDescription", or_no_data(self.app_info_description))
            .with("Abstract", self.abstract_text)
    }
}
