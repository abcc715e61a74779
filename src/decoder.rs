//! Line decoder: one raw line to a decoded record.
//!
//! Every line embeds a 4-byte code token at bytes 16-19 (1-based) and a
//! one-character severity level at byte 20. The token resolves to a message
//! identifier through the code table; identifier plus level selects the
//! field layout; each field is then sliced out of the line at its
//! configured byte span.
//!
//! Decoding is a pure function over the line and the two read-only tables.
//! A line too short for a required span is a reported [`DecodeError`], not
//! a panic, so the caller can skip it and keep going.

use std::collections::BTreeMap;

use crate::codes::CodeTable;
use crate::error::DecodeError;
use crate::schema::{RecordTypeKey, Schema};

/// 0-based byte range of the code token within a line.
pub const CODE_START: usize = 15;
pub const CODE_END: usize = 19;

/// 0-based byte offset of the severity level tag.
pub const LEVEL_POS: usize = 19;

/// Shortest line able to carry the code token and level tag.
pub const MIN_LINE_LEN: usize = LEVEL_POS + 1;

/// Field name to extracted value, for one decoded line.
///
/// Ordered map so that serializing the same decode twice yields identical
/// bytes.
pub type DecodedRecord = BTreeMap<String, String>;

/// Decode one raw line against the schema model and code table.
///
/// An unresolved code token yields an empty message identifier, and an
/// unknown record-type key yields an empty layout; both cases decode to an
/// empty record rather than an error. When two fields in a layout share a
/// name, the later one wins.
///
/// Errors only when the line cannot satisfy a required byte span: shorter
/// than [`MIN_LINE_LEN`], or shorter than some field's configured span.
pub fn decode_line(
    line: &str,
    schema: &Schema,
    codes: &CodeTable,
) -> Result<DecodedRecord, DecodeError> {
    let token = line
        .get(CODE_START..CODE_END)
        .ok_or(DecodeError::ShortLine {
            line_len: line.len(),
        })?;
    let level = line
        .get(LEVEL_POS..LEVEL_POS + 1)
        .ok_or(DecodeError::ShortLine {
            line_len: line.len(),
        })?;

    let message = codes.resolve(token).unwrap_or("");
    let key = RecordTypeKey::from_parts(message, level);

    let mut record = DecodedRecord::new();
    for field in schema.fields(&key) {
        let value =
            line.get(field.start - 1..field.end)
                .ok_or_else(|| DecodeError::FieldOutOfBounds {
                    name: field.name.clone(),
                    start: field.start,
                    end: field.end,
                    line_len: line.len(),
                })?;
        record.insert(field.name.clone(), value.to_string());
    }

    Ok(record)
}
