//! Diary entry records.
//!
//! # Responsibility
//! - Define `Entry`, the canonical record shown by the list.
//! - Define `PersistedEntry`, the loosely-typed row read from storage.
//! - Convert storage rows into entries, rejecting incomplete rows.
//!
//! # Invariants
//! - `Entry` cannot be built from input missing any of its three fields.
//! - `created_at` is always an integral epoch-seconds value.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};

/// Canonical diary entry.
///
/// Wire form uses snake_case keys (`title`, `body`, `created_at`), which is
/// also the shape of the bundled sample asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub body: String,
    /// Unix epoch seconds.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: i64,
}

impl Entry {
    pub fn new(title: impl Into<String>, body: impl Into<String>, created_at: i64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            created_at,
        }
    }

    /// Builds an entry from a storage row.
    ///
    /// Returns `None` when `title`, `body` or `created_date` is absent, or
    /// when `created_date` is not an integer string.
    pub fn from_persisted(record: &PersistedEntry) -> Option<Self> {
        let title = record.title.as_deref()?;
        let body = record.body.as_deref()?;
        let created_at = record.created_date.as_deref()?.parse::<i64>().ok()?;
        Some(Self::new(title, body, created_at))
    }
}

/// Raw entry row as stored locally.
///
/// Every column is nullable and the timestamp is kept as text, so rows
/// written by older or foreign writers can be read without failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedEntry {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Text encoding of an integer epoch-seconds value.
    pub created_date: Option<String>,
}

impl PersistedEntry {
    /// Builds the storage form of a complete entry.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: Some(entry.title.clone()),
            body: Some(entry.body.clone()),
            created_date: Some(entry.created_at.to_string()),
        }
    }
}

impl From<&Entry> for PersistedEntry {
    fn from(value: &Entry) -> Self {
        Self::from_entry(value)
    }
}

/// Accepts any JSON number whose value is integral (`1`, `1.0`).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct TimestampVisitor;

    impl Visitor<'_> for TimestampVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str("an integral epoch timestamp")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value)
                .map_err(|_| E::custom(format!("timestamp {value} is out of range")))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            // 2^63 is exactly representable; `i64::MAX as f64` rounds up to it.
            const BOUND: f64 = 9_223_372_036_854_775_808.0;
            if value.fract() != 0.0 || !(-BOUND..BOUND).contains(&value) {
                return Err(E::custom(format!("timestamp {value} is not an integer")));
            }
            Ok(value as i64)
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}

#[cfg(test)]
mod tests {
    use super::{Entry, PersistedEntry};

    fn row(title: Option<&str>, body: Option<&str>, created_date: Option<&str>) -> PersistedEntry {
        PersistedEntry {
            title: title.map(str::to_string),
            body: body.map(str::to_string),
            created_date: created_date.map(str::to_string),
        }
    }

    #[test]
    fn from_persisted_accepts_complete_row() {
        let entry = Entry::from_persisted(&row(Some("A"), Some("B"), Some("100")));
        assert_eq!(entry, Some(Entry::new("A", "B", 100)));
    }

    #[test]
    fn from_persisted_rejects_missing_fields() {
        assert!(Entry::from_persisted(&row(None, Some("B"), Some("1"))).is_none());
        assert!(Entry::from_persisted(&row(Some("A"), None, Some("1"))).is_none());
        assert!(Entry::from_persisted(&row(Some("A"), Some("B"), None)).is_none());
    }

    #[test]
    fn from_persisted_rejects_non_integer_dates() {
        assert!(Entry::from_persisted(&row(Some("A"), Some("B"), Some("abc"))).is_none());
        assert!(Entry::from_persisted(&row(Some("A"), Some("B"), Some("1.5"))).is_none());
        assert!(Entry::from_persisted(&row(Some("A"), Some("B"), Some(" 7"))).is_none());
    }

    #[test]
    fn from_persisted_keeps_negative_timestamps() {
        let entry = Entry::from_persisted(&row(Some("A"), Some("B"), Some("-5"))).unwrap();
        assert_eq!(entry.created_at, -5);
    }

    #[test]
    fn persisted_form_round_trips_through_mapping() {
        let entry = Entry::new("title", "body", 1_608_651_333);
        let stored = PersistedEntry::from(&entry);
        assert_eq!(stored.created_date.as_deref(), Some("1608651333"));
        assert_eq!(Entry::from_persisted(&stored), Some(entry));
    }

    #[test]
    fn deserialize_accepts_integral_numbers_only() {
        let whole: Entry =
            serde_json::from_str(r#"{"title":"t","body":"b","created_at":2.0}"#).unwrap();
        assert_eq!(whole.created_at, 2);

        let fractional =
            serde_json::from_str::<Entry>(r#"{"title":"t","body":"b","created_at":2.5}"#);
        assert!(fractional.is_err());

        let text = serde_json::from_str::<Entry>(r#"{"title":"t","body":"b","created_at":"2"}"#);
        assert!(text.is_err());
    }
}
