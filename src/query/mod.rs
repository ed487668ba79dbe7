//! Query execution collaborator.
//!
//! The navigator's selected paths are the only query-shaping input an
//! executor receives. Records come back nested and are flattened by
//! [`crate::preview`].

mod error;
mod executor;

pub use error::{QueryError, QueryResult};
pub use executor::{QueryExecutor, StaticQueryExecutor};
