//! End-to-end integration tests for the ingest pipeline.
//!
//! Runs topic validation, single-document extraction and directory runs
//! against fixture data from a Level I fixed-income refresher reading.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use refresher_ingest::batch::read_rows;
use refresher_ingest::manifest::Manifest;
use refresher_ingest::pipeline::{process_directory, process_document, validate_topics};
use refresher_ingest::rules::RuleViolation;
use refresher_ingest::tei::extract;
use refresher_ingest::{Content, DocumentOutputs, Field, IngestError, RecordSchema};

const DOCUMENT: &str = "2024-l1-fixed-income.grobid.tei.xml";

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

#[test]
fn test_fixture_content_rows() {
    let extraction = extract(&load_fixture(DOCUMENT)).expect("Failed to extract fixture");

    let rows: Vec<(&str, &str)> = extraction
        .content
        .iter()
        .map(|row| (row.title.as_str(), row.subtitle.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (
                "Introduction to FixedIncome Valuation",
                "Bond Prices and the Time Value of Money"
            ),
            ("Introduction to FixedIncome Valuation", "No Subtitle"),
            ("YieldtoMaturity", "Summary"),
        ]
    );

    // Glyph-marked outcomes become a numbered list
    assert!(extraction.content[0]
        .body
        .starts_with("The candidate should be able to: 1.  calculate"));
    assert!(extraction.content[0].body.contains(" 2.  identify"));

    // Inline references are part of the paragraph text
    assert!(extraction.content[1].body.contains("(see Figure 1)."));

    assert_eq!(
        extraction.content[2].body,
        "The yield-to-maturity is the internal rate of return on the cash flows. \
         It assumes all coupons are reinvested at the same rate."
    );
}

#[test]
fn test_fixture_metadata_row() {
    let extraction = extract(&load_fixture(DOCUMENT)).expect("Failed to extract fixture");
    let row = extraction.metadata_row();

    assert_eq!(
        row.get("Title"),
        Some("Fixed Income: Introduction to Fixed-Income Valuation")
    );
    assert_eq!(row.get("Publisher"), Some("CFA Institute"));
    assert_eq!(row.get("AvailabilityStatus"), Some("unknown"));
    assert_eq!(row.get("BiblicalReference"), Some(""));
    assert_eq!(
        row.get("Abstract"),
        Some("Overview This reading covers bond pricing, yield measures and the term structure of interest rates.")
    );
}

#[test]
fn test_process_fixture_document() {
    let dir = TempDir::new().unwrap();
    let outputs = DocumentOutputs {
        content_csv: dir.path().join("content.csv"),
        metadata_csv: dir.path().join("metadata.csv"),
    };

    let report = process_document(&fixtures_dir().join(DOCUMENT), &outputs).unwrap();

    assert_eq!(report.content.valid_count(), 3);
    assert_eq!(report.metadata.valid_count(), 1);
    assert!(report.is_clean());
    assert_eq!(report.metadata.valid[0].biblical_reference, None);

    // The written table reads back to the same valid rows
    let written = read_rows(&outputs.content_csv).unwrap();
    assert_eq!(written.len(), 3);
    let reread: Vec<_> = written
        .iter()
        .map(|row| Content::from_row(row).unwrap())
        .collect();
    assert_eq!(reread, report.content.valid);

    let metadata = fs::read_to_string(&outputs.metadata_csv).unwrap();
    assert!(metadata.starts_with(
        "Title,Publisher,AvailabilityStatus,BiblicalReference,AppInfoDescription,Abstract\n"
    ));
    assert!(metadata.contains("CFA Institute,unknown,,GROBID"));
}

#[test]
fn test_validate_fixture_topics() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Updated_CSV").join("cleaned_extracted.csv");

    let report = validate_topics(&fixtures_dir().join("topics.csv"), &output).unwrap();

    let names: Vec<_> = report.valid.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Introduction to Fixed-Income Valuation",
            "Ethics and Trust in the Investment Profession"
        ]
    );
    assert_eq!(report.valid[1].year, Field::Value(9999));
    assert!(report.valid[1].pdf_link.is_unspecified());

    let failed: Vec<_> = report
        .errors
        .iter()
        .map(|e| (e.error.fields[0].field, e.error.fields[0].violation.clone()))
        .collect();
    assert_eq!(
        failed,
        vec![
            ("Year", RuleViolation::Year),
            ("Level", RuleViolation::Level),
            ("Link_to_the_PDF_File", RuleViolation::PdfExtension),
            ("Name_of_the_topic", RuleViolation::Blank),
        ]
    );
    assert_eq!(report.errors[0].row.get("Name_of_the_topic"), Some("Derivative Markets"));

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(written.contains(",9999,CFA ProgramLevel I,N/A,N/A,https://"));
}

#[test]
fn test_directory_run_with_manifest() {
    let output = TempDir::new().unwrap();
    let manifest = Manifest::load(&fixtures_dir().join("manifest.yaml")).unwrap();

    let report = process_directory(&fixtures_dir(), output.path(), &manifest, |_| {});

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, IngestError::XmlParse(_)));
    assert!(output
        .path()
        .join("content/csv/fixed_income_content.csv")
        .exists());
    assert!(output
        .path()
        .join("metadata/csv/grobid_metadata_2024_l1_fixed_income.csv")
        .exists());
    assert!(!output.path().join("content/csv/grobid_content_broken.csv").exists());

    assert!(matches!(
        report.into_result(),
        Err(IngestError::DocumentsFailed { failed: 1, total: 2 })
    ));
}
