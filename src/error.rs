//! Error taxonomy for loading, decoding, and sink writes.
//!
//! Load and sink errors are fatal to a run. Decode errors are per-line:
//! the scanner reports and skips them so one malformed line cannot take
//! down the rest of the file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal error while building the schema model or code table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed entry list: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A schema entry declared an impossible byte span (`start` must be
    /// at least 1 and `end` must not precede `start`).
    #[error("field '{name}' of '{message}' has invalid span {start}-{end}")]
    InvalidSpan {
        message: String,
        name: String,
        start: usize,
        end: usize,
    },
}

/// Per-line decode failure. Reported and skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line cannot carry the code token and level tag.
    #[error("line is {line_len} bytes, too short for the code token and level tag")]
    ShortLine { line_len: usize },

    /// A configured field span runs past the end of the line.
    #[error("field '{name}' spans bytes {start}-{end} but the line is {line_len} bytes")]
    FieldOutOfBounds {
        name: String,
        start: usize,
        end: usize,
        line_len: usize,
    },
}

/// Fatal error from the storage sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Io(#[from] io::Error),

    #[error("sink encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Top-level error for a whole file-processing run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("input read failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_message_names_length() {
        let err = DecodeError::ShortLine { line_len: 12 };
        assert!(err.to_string().contains("12 bytes"));
    }

    #[test]
    fn test_out_of_bounds_message_names_field_and_span() {
        let err = DecodeError::FieldOutOfBounds {
            name: "isin".to_string(),
            start: 50,
            end: 61,
            line_len: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("isin"));
        assert!(msg.contains("50-61"));
        assert!(msg.contains("40 bytes"));
    }

    #[test]
    fn test_invalid_span_message() {
        let err = LoadError::InvalidSpan {
            message: "TRADEA".to_string(),
            name: "price".to_string(),
            start: 9,
            end: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("price"));
        assert!(msg.contains("TRADEA"));
    }
}
