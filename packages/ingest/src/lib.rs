//! Refresher ingest - Validate scraped refresher-reading data into clean tables.
//!
//! This crate validates scraped topic tables and converts GROBID TEI
//! documents into flat content and metadata tables. Rows that fail
//! validation are reported and left out; they never abort a batch.
//!
//! # Example
//!
//! ```
//! use refresher_ingest::{validate_rows, Content, RawRow};
//!
//! let rows = vec![
//!     RawRow::new()
//!         .with("Title", "Data1")
//!         .with("Subtitle", "Test Subtitle")
//!         .with("Content", "Test Content"),
//!     RawRow::new().with("Title", "").with("Content", ""),
//! ];
//!
//! let report = validate_rows::<Content>(rows);
//! assert_eq!(report.valid_count(), 1);
//! assert_eq!(report.error_count(), 1);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and shared patterns
//! - [`types`]: Raw rows, sentinels and optional fields
//! - [`error`]: Error types and Result alias
//! - [`text`]: Text normalization
//! - [`rules`]: Field-level validation rules
//! - [`schema`]: Topic, Content and Metadata record schemas
//! - [`batch`]: Batch validation and CSV output
//! - [`tei`]: TEI section walking and metadata extraction
//! - [`manifest`]: Document lists for directory runs
//! - [`pipeline`]: End-to-end topic, document and directory runs
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod rules;
pub mod schema;
pub mod tei;
pub mod text;
pub mod types;

pub use batch::{validate_rows, BatchReport, BatchValidator, RowError};
pub use error::{IngestError, Result};
pub use pipeline::{process_document, validate_topics, DocumentOutputs, DocumentReport};
pub use schema::{Content, Metadata, RecordSchema, Topic};
pub use types::{AvailabilityStatus, Field, RawRow, Sentinel};
