//! Storage sink boundary: batch hand-off of grouped records.
//!
//! The core's obligation ends at producing a batch of documents, one per
//! group. A [`BatchSink`] accepts the whole batch and reports per-batch
//! counts; it does not retry, and the core never inspects partial
//! failures. [`JsonLinesSink`] writes the batch as newline-delimited JSON;
//! [`MemorySink`] keeps it in memory for tests and embedding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::aggregate::AggregateResult;
use crate::decoder::DecodedRecord;
use crate::error::SinkError;

/// One group as the sink sees it: the grouping identifier paired with its
/// file-ordered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDocument {
    pub identifier: String,
    pub records: Vec<DecodedRecord>,
}

/// Per-batch counts reported by the sink after a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub inserted: u64,
    pub modified: u64,
    pub deleted: u64,
}

/// Turn an aggregate result into the batch shape the sink expects.
/// Identifier order is the map's order, so the batch is deterministic for
/// a given input.
pub fn batch_from_groups(groups: AggregateResult) -> Vec<GroupDocument> {
    groups
        .into_iter()
        .map(|(identifier, records)| GroupDocument {
            identifier,
            records,
        })
        .collect()
}

/// A persistence collaborator accepting one batch per run.
pub trait BatchSink {
    fn write_batch(&mut self, batch: Vec<GroupDocument>) -> Result<WriteSummary, SinkError>;
}

/// Writes each document as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) a file-backed sink at `path`.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> BatchSink for JsonLinesSink<W> {
    fn write_batch(&mut self, batch: Vec<GroupDocument>) -> Result<WriteSummary, SinkError> {
        let mut summary = WriteSummary::default();
        for document in &batch {
            serde_json::to_writer(&mut self.writer, document)?;
            self.writer.write_all(b"\n")?;
            summary.inserted += 1;
        }
        self.writer.flush()?;
        Ok(summary)
    }
}

/// Collects documents in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub documents: Vec<GroupDocument>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BatchSink for MemorySink {
    fn write_batch(&mut self, batch: Vec<GroupDocument>) -> Result<WriteSummary, SinkError> {
        let summary = WriteSummary {
            inserted: batch.len() as u64,
            ..WriteSummary::default()
        };
        self.documents.extend(batch);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_batch() -> Vec<GroupDocument> {
        let mut record = DecodedRecord::new();
        record.insert("isin".to_string(), "US0378331005".to_string());
        record.insert("price".to_string(), "000100.00".to_string());
        vec![
            GroupDocument {
                identifier: "GB0002634946".to_string(),
                records: vec![DecodedRecord::new()],
            },
            GroupDocument {
                identifier: "US0378331005".to_string(),
                records: vec![record],
            },
        ]
    }

    #[test]
    fn test_batch_from_groups_keeps_records_per_identifier() {
        let mut groups = AggregateResult::new();
        let mut record = DecodedRecord::new();
        record.insert("isin".to_string(), "X".to_string());
        groups.insert("X".to_string(), vec![record.clone(), record]);
        let batch = batch_from_groups(groups);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].identifier, "X");
        assert_eq!(batch[0].records.len(), 2);
    }

    #[test]
    fn test_json_lines_one_document_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let summary = sink.write_batch(sample_batch()).unwrap();
        assert_eq!(summary.inserted, 2);

        let written = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["identifier"], "GB0002634946");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["records"][0]["price"], "000100.00");
    }

    #[test]
    fn test_memory_sink_collects_documents() {
        let mut sink = MemorySink::new();
        let summary = sink.write_batch(sample_batch()).unwrap();
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.modified, 0);
        assert_eq!(summary.deleted, 0);
        assert_eq!(sink.documents.len(), 2);
        assert_eq!(sink.documents[1].identifier, "US0378331005");
    }

    #[test]
    fn test_record_serializes_with_stable_field_order() {
        let mut record: BTreeMap<String, String> = BTreeMap::new();
        record.insert("price".to_string(), "1".to_string());
        record.insert("isin".to_string(), "X".to_string());
        let json = serde_json::to_string(&record).unwrap();
        // BTreeMap serializes keys in sorted order regardless of insertion.
        assert_eq!(json, r#"{"isin":"X","price":"1"}"#);
    }
}
