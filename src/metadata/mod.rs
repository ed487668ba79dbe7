//! Schema metadata provider module.
//!
//! This module provides the abstraction the navigator uses to learn about
//! objects and their relationships.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   SchemaMetadataProvider                        │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  Service calls (async)     │  Derived (default impls)     │  │
//! │  │  - get_relational_fields() │  - search_objects()          │  │
//! │  │  - list_objects()          │                              │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │          StaticMetadataProvider (JSON schema document)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use relnav::metadata::{SchemaMetadataProvider, StaticMetadataProvider};
//!
//! let provider = StaticMetadataProvider::from_file("./schema.json")?;
//! let fields = provider.get_relational_fields("Account").await?;
//! ```

mod error;
mod provider;
mod static_provider;
mod types;

pub use error::{MetadataError, MetadataResult};
pub use provider::SchemaMetadataProvider;
pub use static_provider::{
    ChildRelationshipSchema, ObjectSchema, SchemaDocument, StaticMetadataProvider,
};
pub use types::{ObjectInfo, RawField, RelationalFields};
