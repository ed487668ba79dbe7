//! Query execution error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while running a preview query.
#[derive(Error, Debug)]
pub enum QueryError {
    /// No records are known for the requested object.
    #[error("unknown object: {0}")]
    UnknownObject(String),

    /// Failed to read a records document from disk.
    #[error("failed to read records document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The records document is not valid JSON for the expected shape.
    #[error("failed to parse records document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The executor rejected or failed the query.
    #[error("query failed: {0}")]
    Failed(String),
}

impl QueryError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
