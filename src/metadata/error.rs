//! Metadata-specific error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that can occur while fetching schema metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The service does not know the requested object.
    #[error("unknown object: {0}")]
    UnknownObject(String),

    /// Failed to read a schema document from disk.
    #[error("failed to read schema document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The schema document is not valid JSON for the expected shape.
    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service could not be reached or answered with an error.
    #[error("metadata service unavailable: {0}")]
    Unavailable(String),
}

impl MetadataError {
    /// Create an unavailable error from any message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Check if retrying the same request may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Read { .. })
    }
}
