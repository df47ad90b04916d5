//! Error types for the ingest pipeline.
//!
//! `IngestError` covers batch-level and structural failures that stop a
//! batch or a document. Row-level validation failures are not errors in this
//! sense: they are collected as [`RowError`](crate::batch::RowError) values
//! and never abort a batch.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the ingest library.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The document is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The document parsed, but its root is not a TEI element.
    #[error("Not a TEI document: root element is <{root}>{}", .namespace.as_ref().map(|ns| format!(" in namespace {ns}")).unwrap_or_default())]
    NotTei {
        root: String,
        namespace: Option<String>,
    },

    /// Failed to read a source document from disk.
    #[error("Failed to read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest could not be parsed.
    #[error("Manifest parsing failed: {0}")]
    Manifest(#[from] serde_yaml_ng::Error),

    /// A manifest entry names a source that is not a plain file name.
    #[error("Invalid manifest source '{0}': expected a file name inside the input directory")]
    InvalidManifestSource(String),

    /// One or more documents of a directory run failed structurally.
    #[error("{failed} of {total} documents failed to process")]
    DocumentsFailed { failed: usize, total: usize },
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
