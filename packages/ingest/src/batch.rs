//! Batch validation of raw rows against a record schema.
//!
//! A batch never aborts because of bad rows: valid rows are kept in input
//! order, rejected rows are quarantined verbatim with their reason, and the
//! valid subset is always written out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::schema::{RecordError, RecordSchema};
use crate::types::RawRow;

/// A row that failed validation, kept exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: RawRow,
    pub error: RecordError,
}

impl RowError {
    /// Human-readable failure reason.
    #[must_use]
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

/// Outcome of validating one batch.
///
/// `valid.len() + errors.len()` always equals the number of input rows.
#[derive(Debug, Clone)]
pub struct BatchReport<R> {
    pub valid: Vec<R>,
    pub errors: Vec<RowError>,
}

impl<R> BatchReport<R> {
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.valid.len() + self.errors.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Partition rows into valid records and row errors, preserving order.
pub fn validate_rows<R: RecordSchema>(rows: impl IntoIterator<Item = RawRow>) -> BatchReport<R> {
    let mut valid = Vec::new();
    let mut errors = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        match R::from_row(&row) {
            Ok(record) => {
                debug!(schema = R::NAME, row = index, "row accepted");
                valid.push(record);
            }
            Err(error) => {
                warn!(schema = R::NAME, row = index, %error, "row rejected");
                errors.push(RowError { row, error });
            }
        }
    }

    BatchReport { valid, errors }
}

/// Write records as CSV, overwriting `path`.
///
/// The header is always the schema's declared field list, also when there
/// are no records. Parent directories are created as needed.
pub fn write_records<R: RecordSchema>(path: &Path, records: &[R]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(R::FIELDS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Read a CSV file into raw rows, using the header row as column names.
///
/// Short records are accepted; their trailing columns are absent from the row.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    read_rows_from(&mut reader)
}

/// Read raw rows from any CSV reader with a header row.
pub fn read_rows_from<T: io::Read>(reader: &mut csv::Reader<T>) -> Result<Vec<RawRow>> {
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect());
    }
    Ok(rows)
}

/// Validates batches for one schema and writes the valid subset to a CSV file.
#[derive(Debug, Clone)]
pub struct BatchValidator {
    output: PathBuf,
}

impl BatchValidator {
    /// Create a validator writing to `output`.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    /// Destination of the cleaned table.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Validate `rows` and write the valid records, even if some rows failed.
    pub fn run<R: RecordSchema>(
        &self,
        rows: impl IntoIterator<Item = RawRow>,
    ) -> Result<BatchReport<R>> {
        let report = validate_rows::<R>(rows);
        write_records(&self.output, &report.valid)?;

        info!(
            schema = R::NAME,
            valid = report.valid_count(),
            failed = report.error_count(),
            output = %self.output.display(),
            "batch written"
        );

        Ok(report)
    }

    /// Read rows from a CSV file, then validate and write them.
    ///
    /// The input is fully read before the output is opened, so `input` may
    /// be the same file as the output.
    pub fn run_file<R: RecordSchema>(&self, input: &Path) -> Result<BatchReport<R>> {
        let rows = read_rows(input)?;
        self.run(rows)
    }
}
