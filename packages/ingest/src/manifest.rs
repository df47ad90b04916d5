//! Document manifest for directory runs.
//!
//! A manifest lists the TEI files to process and, optionally, the names of
//! the CSV tables each one produces:
//!
//! ```yaml
//! documents:
//!   - source: 2024-l1-topics-combined-2.grobid.tei.xml
//!     content_csv: grobid_content_2024_l1_topics_combined_2.csv
//!     metadata_csv: grobid_metadata_2024_l1_topics_combined_2.csv
//! ```
//!
//! Without a manifest, every `*.tei.xml` file in the input directory is
//! processed with default output names.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{CONTENT_OUTPUT_DIR, METADATA_OUTPUT_DIR, TEI_SUFFIXES};
use crate::error::{IngestError, Result};
use crate::pipeline::DocumentOutputs;

/// One document of a directory run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    /// File name of the TEI document, relative to the input directory.
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_csv: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_csv: Option<String>,
}

impl ManifestEntry {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content_csv: None,
            metadata_csv: None,
        }
    }

    /// Name of the content table, explicit or derived from the source.
    #[must_use]
    pub fn content_file_name(&self) -> String {
        self.content_csv
            .clone()
            .unwrap_or_else(|| format!("grobid_content_{}.csv", output_stem(&self.source)))
    }

    /// Name of the metadata table, explicit or derived from the source.
    #[must_use]
    pub fn metadata_file_name(&self) -> String {
        self.metadata_csv
            .clone()
            .unwrap_or_else(|| format!("grobid_metadata_{}.csv", output_stem(&self.source)))
    }

    /// Output table paths below `output_dir`.
    #[must_use]
    pub fn outputs(&self, output_dir: &Path) -> DocumentOutputs {
        DocumentOutputs {
            content_csv: output_dir
                .join(CONTENT_OUTPUT_DIR)
                .join(self.content_file_name()),
            metadata_csv: output_dir
                .join(METADATA_OUTPUT_DIR)
                .join(self.metadata_file_name()),
        }
    }

    fn validate(&self) -> Result<()> {
        let path = Path::new(&self.source);
        if path.file_name() != Some(OsStr::new(&self.source)) {
            return Err(IngestError::InvalidManifestSource(self.source.clone()));
        }
        Ok(())
    }
}

/// List of documents for a directory run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub documents: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let manifest: Self = serde_yaml_ng::from_str(text)?;
        for entry in &manifest.documents {
            entry.validate()?;
        }
        Ok(manifest)
    }

    /// Load a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Build a manifest from every `*.tei.xml` file in `dir`, sorted by name.
    pub fn discover(dir: &Path) -> Result<Self> {
        let mut sources = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".tei.xml") {
                    sources.push(name.to_string());
                }
            }
        }
        sources.sort();

        Ok(Self {
            documents: sources.into_iter().map(ManifestEntry::new).collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Derive the output name stem from a TEI file name.
///
/// Strips the TEI suffix and replaces hyphens with underscores.
///
/// # Examples
/// ```
/// use refresher_ingest::manifest::output_stem;
///
/// assert_eq!(
///     output_stem("2024-l1-topics-combined-2.grobid.tei.xml"),
///     "2024_l1_topics_combined_2"
/// );
/// ```
pub fn output_stem(source: &str) -> String {
    let stem = TEI_SUFFIXES
        .iter()
        .find_map(|suffix| source.strip_suffix(suffix))
        .unwrap_or(source);
    stem.replace('-', "_")
}
