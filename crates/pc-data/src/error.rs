use std::path::PathBuf;

use thiserror::Error;

pub type DataResult<T> = Result<T, DataError>;

/// Errors from the reference data store.
///
/// `Read`/`Json`/`Yaml`/`EmptyTable` are load-time failures; `NotFound` is a
/// legitimate runtime outcome of a keyed lookup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read table file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Table '{table}' loaded with no rows")]
    EmptyTable { table: &'static str },

    #[error("No {table} entry for {key}")]
    NotFound { table: &'static str, key: String },
}

impl DataError {
    /// True for failures that should abort startup rather than degrade a
    /// single output.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, DataError::NotFound { .. })
    }
}
