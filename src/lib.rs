//! # fixwidth-rs
//!
//! Schema-driven decoding and grouping of fixed-width positional records.
//!
//! Each line of the input embeds a 4-byte message-type code and a
//! one-character severity level at fixed positions. The code resolves to a
//! message identifier through a [`CodeTable`]; identifier plus level select
//! a field layout in the [`Schema`]; the line is then sliced into named
//! string fields at the layout's byte spans. Decoded records accumulate
//! under a grouping key and are handed to a [`BatchSink`] as one batch.
//!
//! ## Example
//!
//! ```
//! use fixwidth_rs::{Aggregator, CodeEntry, CodeTable, Schema, SchemaEntry, decode_line};
//!
//! let schema = Schema::from_entries(vec![SchemaEntry {
//!     message: "TRADEA".to_string(),
//!     name: "isin".to_string(),
//!     len: 12,
//!     start: 21,
//!     end: 32,
//! }])
//! .unwrap();
//! let codes = CodeTable::from_entries(vec![CodeEntry {
//!     message: "TRADE".to_string(),
//!     code: "1234".to_string(),
//! }]);
//!
//! // 15 filler bytes, code token "1234", level 'A', then the isin field.
//! let line = "XXXXXXXXXXXXXXX1234AUS0378331005";
//! let record = decode_line(line, &schema, &codes).unwrap();
//! assert_eq!(record["isin"], "US0378331005");
//!
//! let mut aggregator = Aggregator::new("isin");
//! aggregator.push(record);
//! assert_eq!(aggregator.into_groups()["US0378331005"].len(), 1);
//! ```

pub mod aggregate;
pub mod codes;
pub mod config;
pub mod decoder;
pub mod error;
pub mod scanner;
pub mod schema;
pub mod sink;

pub use aggregate::{AggregateResult, Aggregator};
pub use codes::{CodeEntry, CodeTable};
pub use config::{DEFAULT_GROUP_FIELD, RunConfig, load_codes, load_schema};
pub use decoder::{CODE_END, CODE_START, DecodedRecord, LEVEL_POS, MIN_LINE_LEN, decode_line};
pub use error::{DecodeError, LoadError, RunError, SinkError};
pub use scanner::{LineFailure, ScanOutcome, scan_file, scan_reader};
pub use schema::{FieldSpec, RecordTypeKey, Schema, SchemaEntry};
pub use sink::{
    BatchSink, GroupDocument, JsonLinesSink, MemorySink, WriteSummary, batch_from_groups,
};
