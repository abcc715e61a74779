//! File scanner: the per-line orchestration loop.
//!
//! Reads the input line by line in file order, decodes each line, and feeds
//! the results to the aggregator. A line that fails to decode is recorded
//! and skipped; the rest of the file still processes. Only an unreadable
//! input is fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::aggregate::{AggregateResult, Aggregator};
use crate::codes::CodeTable;
use crate::decoder::decode_line;
use crate::error::{DecodeError, RunError};
use crate::schema::Schema;

/// One line that failed to decode, with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    pub line_no: usize,
    pub error: DecodeError,
}

/// Everything a scan produced: the grouped records plus the counts needed
/// to account for every input line.
#[derive(Debug)]
pub struct ScanOutcome {
    pub groups: AggregateResult,
    /// Lines read from the input, blank lines included.
    pub lines_read: usize,
    /// Lines successfully decoded (possibly to an empty record).
    pub decoded: usize,
    /// Decoded records dropped for lacking a grouping value.
    pub dropped: usize,
    pub failures: Vec<LineFailure>,
}

/// Scan newline-delimited fixed-width records from `reader`.
///
/// Decode failures are reported in the outcome and logged, never escalated;
/// a read error on the underlying stream aborts the scan.
pub fn scan_reader<R: BufRead>(
    reader: R,
    schema: &Schema,
    codes: &CodeTable,
    group_field: &str,
) -> Result<ScanOutcome, RunError> {
    let mut aggregator = Aggregator::new(group_field);
    let mut failures = Vec::new();
    let mut lines_read = 0;
    let mut decoded = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        lines_read += 1;
        if line.is_empty() {
            continue;
        }
        match decode_line(&line, schema, codes) {
            Ok(record) => {
                decoded += 1;
                aggregator.push(record);
            }
            Err(error) => {
                let line_no = idx + 1;
                warn!(line_no, %error, "skipping undecodable line");
                failures.push(LineFailure { line_no, error });
            }
        }
    }

    let dropped = aggregator.dropped();
    Ok(ScanOutcome {
        groups: aggregator.into_groups(),
        lines_read,
        decoded,
        dropped,
        failures,
    })
}

/// Scan a file from disk. The file being unreadable is fatal for the run.
pub fn scan_file(
    path: &Path,
    schema: &Schema,
    codes: &CodeTable,
    group_field: &str,
) -> Result<ScanOutcome, RunError> {
    let file = File::open(path)?;
    scan_reader(BufReader::new(file), schema, codes, group_field)
}
