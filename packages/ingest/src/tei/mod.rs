//! Extraction of content and metadata rows from GROBID TEI documents.

pub mod metadata;
pub mod walker;
pub mod xml;

use std::fs;
use std::path::Path;

use roxmltree::Document;

use crate::error::{IngestError, Result};
use crate::types::RawRow;

pub use metadata::DocumentMetadata;
pub use walker::{ContentRow, Section, TitleState};

/// Everything extracted from one document, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub content: Vec<ContentRow>,
    pub metadata: DocumentMetadata,
}

impl Extraction {
    /// Content rows keyed by the content table's columns.
    #[must_use]
    pub fn content_rows(&self) -> Vec<RawRow> {
        self.content
            .iter()
            .cloned()
            .map(ContentRow::into_raw_row)
            .collect()
    }

    /// The single metadata row for the document.
    #[must_use]
    pub fn metadata_row(&self) -> RawRow {
        self.metadata.clone().into_raw_row()
    }
}

/// Parse XML and check that the root element is `TEI` in the TEI namespace.
pub fn parse_document(source: &str) -> Result<Document<'_>> {
    let doc = Document::parse(source)?;

    let root = doc.root_element();
    if !xml::is_tei(root, "TEI") {
        return Err(IngestError::NotTei {
            root: root.tag_name().name().to_string(),
            namespace: root.tag_name().namespace().map(str::to_string),
        });
    }

    Ok(doc)
}

/// Extract content and metadata rows from TEI XML text.
///
/// # Examples
/// ```
/// use refresher_ingest::tei::extract;
///
/// let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text><body>
///   <div><head>Equity</head></div>
///   <div><head>Valuation</head><p>Discount the cash flows.</p></div>
/// </body></text></TEI>"#;
///
/// let extraction = extract(xml).unwrap();
/// assert_eq!(extraction.content.len(), 1);
/// assert_eq!(extraction.content[0].title, "Equity");
/// ```
pub fn extract(xml: &str) -> Result<Extraction> {
    let doc = parse_document(xml)?;
    Ok(Extraction {
        content: walker::extract_content(&doc),
        metadata: DocumentMetadata::from_document(&doc),
    })
}

/// Read a TEI file and extract its rows.
pub fn extract_file(path: &Path) -> Result<Extraction> {
    let xml = fs::read_to_string(path).map_err(|source| IngestError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    extract(&xml)
}
