//! QueryExecutor trait and the static, file-backed implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use super::error::{QueryError, QueryResult};
use crate::path::DottedPath;

/// Trait for running preview queries.
///
/// Given an object and the dotted paths chosen through the navigator, an
/// executor returns matching records as nested JSON: lookups as nested
/// objects, child relationships as arrays of objects.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn run_query(&self, object_name: &str, paths: &[DottedPath]) -> QueryResult<Vec<Value>>;
}

/// Executor serving canned records per object.
///
/// The records document maps object names to arrays of records:
///
/// ```json
/// {
///   "Account": [
///     { "Name": "Acme", "Owner": { "Name": "Ada" }, "Contacts": [] }
///   ]
/// }
/// ```
///
/// Records are returned whole; the paths only shape what the caller
/// flattens.
#[derive(Debug, Clone, Default)]
pub struct StaticQueryExecutor {
    records: BTreeMap<String, Vec<Value>>,
}

impl StaticQueryExecutor {
    pub fn new(records: BTreeMap<String, Vec<Value>>) -> Self {
        Self { records }
    }

    pub fn from_json_str(json: &str) -> QueryResult<Self> {
        let records: BTreeMap<String, Vec<Value>> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| QueryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn with_records(mut self, object_name: impl Into<String>, records: Vec<Value>) -> Self {
        self.records.insert(object_name.into(), records);
        self
    }
}

#[async_trait]
impl QueryExecutor for StaticQueryExecutor {
    async fn run_query(&self, object_name: &str, paths: &[DottedPath]) -> QueryResult<Vec<Value>> {
        if paths.is_empty() {
            return Err(QueryError::failed("no fields selected"));
        }

        self.records
            .get(object_name)
            .cloned()
            .ok_or_else(|| QueryError::UnknownObject(object_name.to_string()))
    }
}
