//! Code lookup table: embedded code token to message identifier.
//!
//! Every input line carries a fixed-width code token; this table resolves
//! it to the canonical message identifier used to select a field layout.
//! Loaded once, read-only afterwards.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::LoadError;

/// One (code, message) pair as it appears in the external source.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeEntry {
    pub message: String,
    pub code: String,
}

/// Mapping from code token to message identifier.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    map: HashMap<String, String>,
}

impl CodeTable {
    /// Build the table from entries. Duplicate codes overwrite: the last
    /// entry for a code wins.
    pub fn from_entries(entries: Vec<CodeEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            map.insert(entry.code, entry.message);
        }
        Self { map }
    }

    /// Parse a JSON array of entries and build the table.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        let entries: Vec<CodeEntry> = serde_json::from_slice(bytes)?;
        Ok(Self::from_entries(entries))
    }

    /// The message identifier for `code`, or `None` when the code is
    /// unknown. Unknown codes are not an error here; they surface as an
    /// unmatched layout at decode time.
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.map.get(code).map(String::as_str)
    }

    pub fn code_count(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, message: &str) -> CodeEntry {
        CodeEntry {
            message: message.to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn test_resolve_known_code() {
        let table = CodeTable::from_entries(vec![entry("1234", "TRADE")]);
        assert_eq!(table.resolve("1234"), Some("TRADE"));
    }

    #[test]
    fn test_resolve_unknown_code() {
        let table = CodeTable::from_entries(vec![entry("1234", "TRADE")]);
        assert_eq!(table.resolve("9999"), None);
    }

    #[test]
    fn test_duplicate_code_last_write_wins() {
        let table = CodeTable::from_entries(vec![entry("1234", "TRADE"), entry("1234", "QUOTE")]);
        assert_eq!(table.resolve("1234"), Some("QUOTE"));
        assert_eq!(table.code_count(), 1);
    }

    #[test]
    fn test_from_json_parses_source_shape() {
        let json = br#"[
            {"message": "TRADE", "code": "1234"},
            {"message": "QUOTE", "code": "5678"}
        ]"#;
        let table = CodeTable::from_json(json).unwrap();
        assert_eq!(table.resolve("5678"), Some("QUOTE"));
        assert_eq!(table.code_count(), 2);
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        assert!(matches!(
            CodeTable::from_json(b"not json"),
            Err(LoadError::Malformed(_))
        ));
    }
}
