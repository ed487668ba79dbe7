//! StaticMetadataProvider implementation.
//!
//! Serves metadata from an in-memory schema document, typically loaded from
//! a JSON file:
//!
//! ```json
//! {
//!   "objects": {
//!     "Account": {
//!       "label": "Account",
//!       "fields": [
//!         { "name": "Name", "label": "Account Name" },
//!         { "name": "OwnerId", "label": "Owner ID", "referenceTo": ["User"] }
//!       ],
//!       "childRelationships": [
//!         { "relationshipName": "Contacts", "childObject": "Contact" }
//!       ]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::{MetadataError, MetadataResult};
use super::provider::SchemaMetadataProvider;
use super::types::{ObjectInfo, RawField, RelationalFields};

/// Root of a schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Objects keyed by API name.
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectSchema>,
}

/// One object in a schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    #[serde(default)]
    pub label: String,

    /// Direct fields. Entries with `referenceTo` are lookups.
    #[serde(default)]
    pub fields: Vec<RawField>,

    /// Reverse relationships declared by child objects.
    #[serde(default)]
    pub child_relationships: Vec<ChildRelationshipSchema>,
}

/// A reverse relationship entry in a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRelationshipSchema {
    pub relationship_name: String,
    pub child_object: String,
    #[serde(default)]
    pub label: String,
}

impl ObjectSchema {
    /// Split this object's fields into the provider's three buckets.
    fn relational_fields(&self) -> RelationalFields {
        let (lookups, plain): (Vec<_>, Vec<_>) = self
            .fields
            .iter()
            .cloned()
            .partition(|f| !f.reference_to.is_empty());

        let children = self
            .child_relationships
            .iter()
            .map(|c| RawField::child(&c.relationship_name, &c.label, &c.child_object))
            .collect();

        RelationalFields {
            plain,
            lookups,
            children,
        }
    }
}

/// Metadata provider backed by an in-memory [`SchemaDocument`].
///
/// # Example
///
/// ```ignore
/// use relnav::metadata::StaticMetadataProvider;
///
/// let provider = StaticMetadataProvider::from_file("schema.json")?;
/// let fields = provider.get_relational_fields("Account").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataProvider {
    document: SchemaDocument,
}

impl StaticMetadataProvider {
    /// Create a provider over an existing document.
    pub fn new(document: SchemaDocument) -> Self {
        Self { document }
    }

    /// Parse a provider from a JSON string.
    pub fn from_json_str(json: &str) -> MetadataResult<Self> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        Ok(Self::new(document))
    }

    /// Load a provider from a JSON schema file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MetadataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Add or replace an object (builder style, mostly for tests).
    pub fn with_object(mut self, name: impl Into<String>, object: ObjectSchema) -> Self {
        self.document.objects.insert(name.into(), object);
        self
    }
}

#[async_trait]
impl SchemaMetadataProvider for StaticMetadataProvider {
    async fn get_relational_fields(&self, object_name: &str) -> MetadataResult<RelationalFields> {
        self.document
            .objects
            .get(object_name)
            .map(ObjectSchema::relational_fields)
            .ok_or_else(|| MetadataError::UnknownObject(object_name.to_string()))
    }

    async fn list_objects(&self) -> MetadataResult<Vec<ObjectInfo>> {
        Ok(self
            .document
            .objects
            .iter()
            .map(|(name, object)| ObjectInfo {
                name: name.clone(),
                label: if object.label.is_empty() {
                    name.clone()
                } else {
                    object.label.clone()
                },
            })
            .collect())
    }
}
