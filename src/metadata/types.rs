//! Raw metadata types returned by a [`SchemaMetadataProvider`].
//!
//! These mirror what a schema service reports for one object: its direct
//! fields, its lookup (parent) references and its reverse (child)
//! relationships. They are deliberately unclassified; the
//! [`crate::schema`] classifier turns them into navigable descriptors.
//!
//! [`SchemaMetadataProvider`]: super::SchemaMetadataProvider

use serde::{Deserialize, Serialize};

/// A field as reported by the metadata service, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    /// API name of the field (or relationship name for child entries).
    pub name: String,

    /// Human-readable label. Falls back to `name` when the service omits it.
    #[serde(default)]
    pub label: String,

    /// Objects this field points at.
    ///
    /// For lookups this is the ordered list of candidate targets (more than
    /// one for polymorphic references). For child relationships it holds the
    /// related child object. Empty for plain fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_to: Vec<String>,
}

impl RawField {
    /// A plain, non-navigable field.
    pub fn plain(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            reference_to: vec![],
        }
    }

    /// A lookup field referencing one or more target objects.
    pub fn lookup<I, S>(name: impl Into<String>, label: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            label: label.into(),
            reference_to: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// A child relationship pointing at `child_object`.
    pub fn child(
        relationship_name: impl Into<String>,
        label: impl Into<String>,
        child_object: impl Into<String>,
    ) -> Self {
        Self {
            name: relationship_name.into(),
            label: label.into(),
            reference_to: vec![child_object.into()],
        }
    }

    /// The label to display, defaulting to the field name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// Everything the metadata service knows about one object's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationalFields {
    /// Direct (non-relationship) fields.
    #[serde(default)]
    pub plain: Vec<RawField>,

    /// Reference fields pointing at parent objects.
    #[serde(default)]
    pub lookups: Vec<RawField>,

    /// Reverse relationships exposed by child objects.
    #[serde(default)]
    pub children: Vec<RawField>,
}

impl RelationalFields {
    /// Total number of raw entries across all buckets.
    pub fn len(&self) -> usize {
        self.plain.len() + self.lookups.len() + self.children.len()
    }

    /// True when the object reported no fields at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summary of an object known to the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// API name of the object.
    pub name: String,

    /// Human-readable label.
    pub label: String,
}
