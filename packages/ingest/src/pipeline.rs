//! End-to-end runs: topic tables, single documents and document directories.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::batch::{BatchReport, BatchValidator};
use crate::error::{IngestError, Result};
use crate::manifest::{Manifest, ManifestEntry};
use crate::schema::{Content, Metadata, Topic};
use crate::tei;

/// Where the two tables of one document are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutputs {
    pub content_csv: PathBuf,
    pub metadata_csv: PathBuf,
}

/// Validation outcome for one document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub source: PathBuf,
    pub outputs: DocumentOutputs,
    pub content: BatchReport<Content>,
    pub metadata: BatchReport<Metadata>,
}

impl DocumentReport {
    /// True if no content or metadata row was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.content.is_clean() && self.metadata.is_clean()
    }
}

/// Validate a scraped topic table and write the cleaned table to `output`.
pub fn validate_topics(input: &Path, output: &Path) -> Result<BatchReport<Topic>> {
    info!(input = %input.display(), "validating topic table");
    BatchValidator::new(output).run_file::<Topic>(input)
}

/// Extract, validate and write one TEI document.
///
/// Extraction finishes before any table is written, so a structurally
/// broken document leaves no output behind.
pub fn process_document(source: &Path, outputs: &DocumentOutputs) -> Result<DocumentReport> {
    info!(source = %source.display(), "processing document");
    let extraction = tei::extract_file(source)?;

    let content = BatchValidator::new(&outputs.content_csv).run::<Content>(extraction.content_rows())?;
    let metadata =
        BatchValidator::new(&outputs.metadata_csv).run::<Metadata>([extraction.metadata_row()])?;

    Ok(DocumentReport {
        source: source.to_path_buf(),
        outputs: outputs.clone(),
        content,
        metadata,
    })
}

/// Process one manifest entry from `input_dir` into `output_dir`.
pub fn process_entry(
    input_dir: &Path,
    output_dir: &Path,
    entry: &ManifestEntry,
) -> Result<DocumentReport> {
    let source = input_dir.join(&entry.source);
    process_document(&source, &entry.outputs(output_dir))
}

/// A document that failed structurally during a directory run.
#[derive(Debug)]
pub struct DocumentFailure {
    pub source: PathBuf,
    pub error: IngestError,
}

/// Outcome of a directory run.
#[derive(Debug, Default)]
pub struct DirectoryReport {
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<DocumentFailure>,
}

impl DirectoryReport {
    /// Record the result of one document; failures are logged and kept.
    pub fn record(&mut self, source: PathBuf, result: Result<DocumentReport>) {
        match result {
            Ok(report) => self.documents.push(report),
            Err(err) => {
                error!(source = %source.display(), error = %err, "document failed");
                self.failures.push(DocumentFailure { source, error: err });
            }
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.documents.len() + self.failures.len()
    }

    /// Turn the report into an error if any document failed.
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(IngestError::DocumentsFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Process every manifest entry, continuing past failed documents.
///
/// `on_processed` is called after each entry, whether it succeeded or not.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    manifest: &Manifest,
    mut on_processed: impl FnMut(&ManifestEntry),
) -> DirectoryReport {
    let mut report = DirectoryReport::default();

    for entry in &manifest.documents {
        let result = process_entry(input_dir, output_dir, entry);
        report.record(input_dir.join(&entry.source), result);
        on_processed(entry);
    }

    info!(
        processed = report.documents.len(),
        failed = report.failures.len(),
        "directory run finished"
    );
    report
}
