//! # relnav
//!
//! Schema relationship navigation: walk an object schema through lookups
//! and child relationships, pick a field, and get back the dotted path a
//! query would use. Nested query results are flattened back along the same
//! paths for previewing.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        SchemaMetadataProvider (async, may fail)          │
//! │        plain / lookup / child relationship fields        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [schema::classify]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  FieldDescriptor                         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [navigator]
//! ┌─────────────────────────────────────────────────────────┐
//! │   PanelStack  (root panel + one panel per hop)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [path::resolve]
//! ┌─────────────────────────────────────────────────────────┐
//! │   DottedPath  e.g. owner.manager.Email                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query + preview::flatten]
//! ┌─────────────────────────────────────────────────────────┐
//! │   PreviewTable (one column per path)                     │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod metadata;
pub mod navigator;
pub mod path;
pub mod preview;
pub mod query;
pub mod schema;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Settings, SettingsError};
    pub use crate::metadata::{
        MetadataError, ObjectInfo, RawField, RelationalFields, SchemaMetadataProvider,
        StaticMetadataProvider,
    };
    pub use crate::navigator::{
        FilterMode, NavigationError, NavigationErrorKind, NavigatorController, NavigatorEvent,
        PanelStack,
    };
    pub use crate::path::{resolve, DottedPath};
    pub use crate::preview::{flatten, run_preview, PreviewOptions, PreviewTable};
    pub use crate::query::{QueryExecutor, StaticQueryExecutor};
    pub use crate::schema::{classify, FieldDescriptor, FieldKind, HopKind};
}

// Also export at crate root for convenience
pub use navigator::{NavigationError, NavigatorController, NavigatorEvent, PanelStack};
pub use path::DottedPath;
pub use schema::{FieldDescriptor, FieldKind};
