//! Record aggregator: bucket decoded records by a grouping field.
//!
//! Each decoded record is appended to the group named by its grouping-field
//! value (the security identifier in the source domain). Arrival order is
//! preserved within each group. Records without a non-empty grouping value
//! carry nothing to group by and are dropped; that is the documented
//! filtering behavior, not an error.

use std::collections::BTreeMap;

use crate::decoder::DecodedRecord;

/// Grouping-key value to its file-ordered records. Built once per run and
/// handed to the storage sink whole.
pub type AggregateResult = BTreeMap<String, Vec<DecodedRecord>>;

/// Accumulates decoded records into groups.
#[derive(Debug, Clone)]
pub struct Aggregator {
    group_field: String,
    groups: AggregateResult,
    dropped: usize,
}

impl Aggregator {
    pub fn new(group_field: impl Into<String>) -> Self {
        Self {
            group_field: group_field.into(),
            groups: AggregateResult::new(),
            dropped: 0,
        }
    }

    pub fn group_field(&self) -> &str {
        &self.group_field
    }

    /// Append `record` to the group named by its grouping-field value,
    /// creating the group on first occurrence. Records with an absent or
    /// empty grouping value are dropped and counted.
    pub fn push(&mut self, record: DecodedRecord) {
        let identifier = match record.get(self.group_field.as_str()) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => {
                self.dropped += 1;
                return;
            }
        };
        self.groups.entry(identifier).or_default().push(record);
    }

    /// Records dropped for lacking a grouping value.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total records held across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Consume the aggregator and yield the complete result.
    pub fn into_groups(self) -> AggregateResult {
        self.groups
    }
}
