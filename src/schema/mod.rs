//! Field classification for navigable schemas.
//!
//! Raw entries from the metadata provider are classified into plain fields,
//! lookups and child relationships. Everything downstream (the panel stack,
//! the path resolver) works on the classified [`FieldDescriptor`].

mod classify;

pub use classify::{classify, classify_fields, FieldBucket, FieldDescriptor, FieldKind, HopKind};
