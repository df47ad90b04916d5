//! Core data types shared by the schemas, the batch validator and the TEI walker.

use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholders written in place of a missing value.
///
/// Each sentinel serializes to a fixed text so downstream loaders keep
/// reading the same tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Optional topic field without a value.
    NotApplicable,
    /// Metadata path lookup without a match.
    NoData,
    /// Content row emitted before any section title was seen.
    NotAvailable,
    /// Content section without a heading.
    NoSubtitle,
}

impl Sentinel {
    /// Get the serialized text.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "N/A",
            Self::NoData => "No Data",
            Self::NotAvailable => "Not Available",
            Self::NoSubtitle => "No Subtitle",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of an optional topic field.
///
/// `Unspecified` serializes to the "N/A" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Value(T),
    Unspecified,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl<T> Field<T> {
    /// Borrow the value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unspecified => None,
        }
    }

    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Unspecified => serializer.serialize_str(Sentinel::NotApplicable.as_str()),
        }
    }
}

/// Availability of a TEI document, from `availability/@status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    Unknown,
}

impl AvailabilityStatus {
    /// Parse the exact attribute value. Matching is case-sensitive.
    #[must_use]
    pub fn from_status(text: &str) -> Option<Self> {
        match text {
            "available" => Some(Self::Available),
            "unavailable" => Some(Self::Unavailable),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        }
    }
}

/// One unvalidated input row: column name to raw text, in column order.
///
/// A column that is present but empty is distinct from a missing column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column, replacing an existing value in place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Get the raw value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Get a column, treating an empty or whitespace-only cell as absent.
    #[must_use]
    pub fn get_non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.trim().is_empty())
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (column, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}: {value:?}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_text() {
        assert_eq!(Sentinel::NotApplicable.as_str(), "N/A");
        assert_eq!(Sentinel::NoData.as_str(), "No Data");
        assert_eq!(Sentinel::NotAvailable.to_string(), "Not Available");
        assert_eq!(Sentinel::NoSubtitle.to_string(), "No Subtitle");
    }

    #[test]
    fn test_field_default_is_unspecified() {
        let field: Field<u16> = Field::default();
        assert!(field.is_unspecified());
        assert_eq!(field.value(), None);
        assert_eq!(Field::Value(2020u16).value(), Some(&2020));
    }

    #[test]
    fn test_availability_from_status() {
        assert_eq!(
            AvailabilityStatus::from_status("available"),
            Some(AvailabilityStatus::Available)
        );
        assert_eq!(AvailabilityStatus::from_status("Available"), None);
        assert_eq!(AvailabilityStatus::from_status("No Data"), None);
        assert_eq!(AvailabilityStatus::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_raw_row_insert_replaces_in_place() {
        let mut row = RawRow::new().with("Title", "a").with("Subtitle", "b");
        row.insert("Title", "c");
        let cells: Vec<_> = row.iter().collect();
        assert_eq!(cells, vec![("Title", "c"), ("Subtitle", "b")]);
    }

    #[test]
    fn test_raw_row_get_non_empty() {
        let row = RawRow::new().with("Year", "  ").with("Level", "x");
        assert_eq!(row.get("Year"), Some("  "));
        assert_eq!(row.get_non_empty("Year"), None);
        assert_eq!(row.get_non_empty("Level"), Some("x"));
        assert_eq!(row.get("Missing"), None);
    }

    #[test]
    fn test_raw_row_display() {
        let row: RawRow = [("Title", ""), ("Content", "x")].into_iter().collect();
        assert_eq!(row.to_string(), r#"{Title: "", Content: "x"}"#);
    }
}
