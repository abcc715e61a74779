//! Schema model: field layouts keyed by record type.
//!
//! A schema is loaded once from an external list of entries, each naming a
//! record-type key (message identifier with the severity level already
//! appended), a field name, and the 1-based inclusive byte span the field
//! occupies. Entries sharing a key form that key's layout, in entry order.
//! The model is read-only after load and may be shared freely.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::error::LoadError;

/// One schema entry as it appears in the external source.
///
/// The `message` value carries the message identifier with the level tag
/// already appended, e.g. `"TRADEA"` for message `TRADE` at level `A`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaEntry {
    pub message: String,
    pub name: String,
    #[serde(rename = "len")]
    pub len: i64,
    pub start: usize,
    pub end: usize,
}

/// One named byte-range extraction rule within a layout.
///
/// `start` and `end` are 1-based inclusive byte offsets. `len` is the
/// declared field width; it is carried through from the source but never
/// checked against `end - start + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub len: i64,
    pub start: usize,
    pub end: usize,
}

/// Composite lookup key selecting a field layout: message identifier with
/// the one-character severity level appended. Two keys are equal iff their
/// string forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordTypeKey(String);

impl RecordTypeKey {
    /// Wrap an already-composite key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build the key from a message identifier and level tag.
    pub fn from_parts(message: &str, level: &str) -> Self {
        Self(format!("{message}{level}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from record-type key to its ordered field layout.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    layouts: HashMap<RecordTypeKey, Vec<FieldSpec>>,
}

impl Schema {
    /// Group entries by record-type key, preserving entry order per key.
    ///
    /// Rejects entries whose span is impossible: `start` must be at least 1
    /// and `end` must not precede `start`. The declared `len` is accepted
    /// as-is.
    pub fn from_entries(entries: Vec<SchemaEntry>) -> Result<Self, LoadError> {
        let mut layouts: HashMap<RecordTypeKey, Vec<FieldSpec>> = HashMap::new();

        for entry in entries {
            if entry.start < 1 || entry.end < entry.start {
                return Err(LoadError::InvalidSpan {
                    message: entry.message,
                    name: entry.name,
                    start: entry.start,
                    end: entry.end,
                });
            }
            layouts
                .entry(RecordTypeKey::new(entry.message))
                .or_default()
                .push(FieldSpec {
                    name: entry.name,
                    len: entry.len,
                    start: entry.start,
                    end: entry.end,
                });
        }

        Ok(Self { layouts })
    }

    /// Parse a JSON array of entries and build the model.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        let entries: Vec<SchemaEntry> = serde_json::from_slice(bytes)?;
        Self::from_entries(entries)
    }

    /// The ordered layout for `key`, or an empty slice when the key is
    /// unknown. An unknown record type is not an error; lines carrying one
    /// simply decode to an empty record.
    pub fn fields(&self, key: &RecordTypeKey) -> &[FieldSpec] {
        self.layouts.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct record-type keys.
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
