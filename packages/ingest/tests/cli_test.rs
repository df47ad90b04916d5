//! Command-line tests for the `refresher-ingest` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn ingest() -> Command {
    Command::new(env!("CARGO_BIN_EXE_refresher-ingest"))
}

#[test]
fn test_topics_command_reports_rejected_rows() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("cleaned.csv");

    ingest()
        .arg("topics")
        .arg(fixtures_dir().join("topics.csv"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Topic: 2 valid, 4 rejected"))
        .stdout(predicate::str::contains(
            "Year must be a 4-digit number between 2015 and 2025 or 9999",
        ));

    assert!(output.exists());
}

#[test]
fn test_document_command_writes_both_tables() {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content.csv");
    let metadata = dir.path().join("metadata.csv");

    ingest()
        .arg("document")
        .arg(fixtures_dir().join("2024-l1-fixed-income.grobid.tei.xml"))
        .arg("--content")
        .arg(&content)
        .arg("--metadata")
        .arg(&metadata)
        .assert()
        .success()
        .stdout(predicate::str::contains("Content: 3 valid, 0 rejected"))
        .stdout(predicate::str::contains("Metadata: 1 valid, 0 rejected"));

    let written = fs::read_to_string(&content).unwrap();
    assert!(written.starts_with("Title,Subtitle,Content\n"));
    assert_eq!(written.lines().count(), 4);
    assert!(metadata.exists());
}

#[test]
fn test_document_command_fails_on_malformed_xml() {
    let dir = TempDir::new().unwrap();

    ingest()
        .arg("document")
        .arg(fixtures_dir().join("broken.tei.xml"))
        .arg("--content")
        .arg(dir.path().join("content.csv"))
        .arg("--metadata")
        .arg(dir.path().join("metadata.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: XML parsing failed"));

    assert!(!dir.path().join("content.csv").exists());
}

#[test]
fn test_batch_command_continues_and_exits_nonzero() {
    let output = TempDir::new().unwrap();

    ingest()
        .arg("batch")
        .arg(fixtures_dir())
        .arg(output.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Processed 1 of 2 documents"))
        .stderr(predicate::str::contains("1 of 2 documents failed to process"));

    assert!(output
        .path()
        .join("content/csv/grobid_content_2024_l1_fixed_income.csv")
        .exists());
}

#[test]
fn test_batch_command_with_clean_manifest_succeeds() {
    let output = TempDir::new().unwrap();
    let manifest = output.path().join("manifest.yaml");
    fs::write(
        &manifest,
        "documents:\n  - source: 2024-l1-fixed-income.grobid.tei.xml\n",
    )
    .unwrap();

    ingest()
        .arg("batch")
        .arg(fixtures_dir())
        .arg(output.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 of 1 documents"));
}

#[test]
fn test_batch_command_missing_input_directory() {
    let output = TempDir::new().unwrap();

    ingest()
        .arg("batch")
        .arg(output.path().join("missing"))
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input directory does not exist"));
}
