//! Run configuration and table loading.
//!
//! All paths are supplied explicitly by the caller; nothing in the library
//! reads a fixed filesystem location.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codes::CodeTable;
use crate::error::LoadError;
use crate::schema::Schema;

/// Default grouping field, the security identifier of the source domain.
pub const DEFAULT_GROUP_FIELD: &str = "isin";

/// Everything one file-processing run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub schema_path: PathBuf,
    pub codes_path: PathBuf,
    pub input_path: PathBuf,
    pub group_field: String,
}

impl RunConfig {
    pub fn new(
        schema_path: impl Into<PathBuf>,
        codes_path: impl Into<PathBuf>,
        input_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            schema_path: schema_path.into(),
            codes_path: codes_path.into(),
            input_path: input_path.into(),
            group_field: DEFAULT_GROUP_FIELD.to_string(),
        }
    }

    pub fn with_group_field(mut self, group_field: impl Into<String>) -> Self {
        self.group_field = group_field.into();
        self
    }
}

/// Load the schema model from a JSON file of entries.
pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Schema::from_json(&bytes)
}

/// Load the code table from a JSON file of (code, message) entries.
pub fn load_codes(path: &Path) -> Result<CodeTable, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    CodeTable::from_json(&bytes)
}
