//! Configuration constants and shared patterns for the ingest pipeline.

use regex::Regex;
use std::sync::LazyLock;

/// TEI namespace used by GROBID output.
pub const TEI_NAMESPACE: &str = "http://www.tei-c.org/ns/1.0";

/// Glyph GROBID emits for bullets and boxes it could not render.
///
/// Never valid data. In extracted text it marks list items and is rewritten
/// into numbered entries; in a row handed to validation it rejects the row.
pub const UNRENDERABLE_GLYPH: char = '\u{25A1}';

/// Heading used to structure section bodies; never becomes a section title.
pub const LEARNING_OUTCOMES_HEADING: &str = "LEARNING OUTCOMES";

/// Earliest accepted curriculum year.
pub const YEAR_MIN: u16 = 2015;

/// Latest accepted curriculum year.
pub const YEAR_MAX: u16 = 2025;

/// Year placeholder used by the source site for undated readings.
pub const YEAR_UNDATED: u16 = 9999;

/// Default output path for the cleaned topic table.
pub const DEFAULT_TOPIC_OUTPUT: &str = "Updated_CSV/cleaned_extracted.csv";

/// Sub-directory (below the output directory) for content tables.
pub const CONTENT_OUTPUT_DIR: &str = "content/csv";

/// Sub-directory (below the output directory) for metadata tables.
pub const METADATA_OUTPUT_DIR: &str = "metadata/csv";

/// File suffixes stripped from a TEI file name to derive output names.
/// Longest first.
pub const TEI_SUFFIXES: [&str; 3] = [".grobid.tei.xml", ".tei.xml", ".xml"];

/// Level pattern: "CFA ProgramLevel" followed by a non-space token.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static LEVEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CFA ProgramLevel \S.*$").expect("valid regex"));

/// Characters allowed in metadata title, publisher and application description.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static METADATA_TEXT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s\-:,]+$").expect("valid regex"));

/// Characters allowed in a bibliographic reference.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static BIBLICAL_REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s\d:]+$").expect("valid regex"));
