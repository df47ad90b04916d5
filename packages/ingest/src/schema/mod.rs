//! Typed record schemas.
//!
//! Each schema declares its columns in output order and builds a record from
//! a [`RawRow`] by running an explicit, ordered list of rules per field.
//! Construction is all-or-nothing: if any field fails, no record is produced
//! and every failing field is reported (first violation per field).

mod content;
mod metadata;
mod topic;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::rules::{apply_rules, RuleResult, RuleViolation, TextRule};
use crate::types::{Field, RawRow, Sentinel};

pub use content::Content;
pub use metadata::Metadata;
pub use topic::Topic;

/// A record type that can be validated from a raw row and written as CSV.
pub trait RecordSchema: Serialize + Sized {
    /// Schema name for logs and error messages.
    const NAME: &'static str;

    /// Column names in declared order; used as the CSV header.
    const FIELDS: &'static [&'static str];

    /// Validate and normalize a raw row into a record.
    fn from_row(row: &RawRow) -> Result<Self, RecordError>;
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub violation: RuleViolation,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.violation)
    }
}

/// Rejection of a whole record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation failed: {}", .schema, join_field_errors(.fields))]
pub struct RecordError {
    pub schema: &'static str,
    pub fields: Vec<FieldError>,
}

impl RecordError {
    /// Check whether a given field was among the rejected ones.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }
}

fn join_field_errors(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects field violations while a record is assembled.
#[derive(Debug, Default)]
pub(crate) struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a rule, returning the value on success.
    pub(crate) fn check<T>(&mut self, field: &'static str, result: RuleResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.errors.push(FieldError { field, violation });
                None
            }
        }
    }

    /// A required text column: missing columns are rejected, present values
    /// go through `rules` in order.
    pub(crate) fn required(
        &mut self,
        row: &RawRow,
        field: &'static str,
        rules: &[TextRule],
    ) -> Option<String> {
        let result = match row.get(field) {
            Some(value) => apply_rules(value, rules),
            None => Err(RuleViolation::Missing),
        };
        self.check(field, result)
    }

    /// An optional column defaulting to the "N/A" sentinel.
    ///
    /// Missing, blank and literal "N/A" cells become [`Field::Unspecified`]
    /// without running `parse`.
    pub(crate) fn optional<T>(
        &mut self,
        row: &RawRow,
        field: &'static str,
        parse: impl FnOnce(&str) -> RuleResult<T>,
    ) -> Field<T> {
        match row.get_non_empty(field) {
            None => Field::Unspecified,
            Some(value) if value == Sentinel::NotApplicable.as_str() => Field::Unspecified,
            Some(value) => self
                .check(field, parse(value))
                .map_or(Field::Unspecified, Field::Value),
        }
    }

    /// Optional column validated by an ordered text rule list.
    pub(crate) fn optional_text(
        &mut self,
        row: &RawRow,
        field: &'static str,
        rules: &[TextRule],
    ) -> Field<String> {
        self.optional(row, field, |value| apply_rules(value, rules))
    }

    #[must_use]
    pub(crate) fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn into_error(self, schema: &'static str) -> RecordError {
        RecordError {
            schema,
            fields: self.errors,
        }
    }
}
