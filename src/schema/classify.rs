//! Relation classification.
//!
//! Turns raw provider entries into [`FieldDescriptor`]s tagged with a
//! [`FieldKind`]. Classification depends only on which provider bucket an
//! entry came from, never on its name: a plain field called `AccountId` is
//! still plain.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metadata::{RawField, RelationalFields};

/// What a field is, from the navigator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// A readable value on the record. Not navigable.
    Plain,
    /// A to-one reference to a parent object.
    Lookup,
    /// A to-many reverse relationship to child records.
    ChildRelationship,
}

impl FieldKind {
    /// The hop this field produces when expanded, if it is navigable.
    pub fn hop_kind(self) -> Option<HopKind> {
        match self {
            FieldKind::Plain => None,
            FieldKind::Lookup => Some(HopKind::Lookup),
            FieldKind::ChildRelationship => Some(HopKind::ChildRelationship),
        }
    }

    pub fn is_navigable(self) -> bool {
        self.hop_kind().is_some()
    }
}

/// One navigation step from a panel to a related object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HopKind {
    Lookup,
    ChildRelationship,
}

impl fmt::Display for HopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopKind::Lookup => write!(f, "lookup"),
            HopKind::ChildRelationship => write!(f, "child"),
        }
    }
}

/// Which provider bucket a raw entry was listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBucket {
    Plain,
    Lookups,
    Children,
}

/// A classified field. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Candidate target objects; the first entry is the canonical target.
    /// Empty for plain fields.
    pub target_objects: Vec<String>,
}

impl FieldDescriptor {
    pub fn plain(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind: FieldKind::Plain,
            target_objects: vec![],
        }
    }

    pub fn lookup(name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind: FieldKind::Lookup,
            target_objects: vec![target.into()],
        }
    }

    pub fn child(name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind: FieldKind::ChildRelationship,
            target_objects: vec![target.into()],
        }
    }

    /// The object navigation lands on when this field is expanded.
    pub fn target_object(&self) -> Option<&str> {
        match self.kind {
            FieldKind::Plain => None,
            _ => self.target_objects.first().map(String::as_str),
        }
    }

    pub fn is_polymorphic(&self) -> bool {
        self.kind == FieldKind::Lookup && self.target_objects.len() > 1
    }
}

/// Classify a single raw entry according to the bucket it came from.
///
/// Relationship entries without any target object cannot be navigated and
/// are demoted to [`FieldKind::Plain`].
pub fn classify(raw: &RawField, bucket: FieldBucket) -> FieldDescriptor {
    let kind = match bucket {
        FieldBucket::Plain => FieldKind::Plain,
        FieldBucket::Lookups => FieldKind::Lookup,
        FieldBucket::Children => FieldKind::ChildRelationship,
    };

    let kind = if kind.is_navigable() && raw.reference_to.is_empty() {
        warn!(field = %raw.name, ?kind, "relationship has no target object, treating as plain");
        FieldKind::Plain
    } else {
        kind
    };

    let target_objects = match kind {
        FieldKind::Plain => vec![],
        FieldKind::Lookup => raw.reference_to.clone(),
        // Only the related child object matters for child relationships.
        FieldKind::ChildRelationship => raw.reference_to.iter().take(1).cloned().collect(),
    };

    FieldDescriptor {
        name: raw.name.clone(),
        label: raw.display_label().to_string(),
        kind,
        target_objects,
    }
}

/// Classify a whole provider response.
///
/// Output order follows the buckets: plain fields, then lookups, then child
/// relationships. If a name shows up both as a plain field and in a
/// relationship bucket, the relationship wins and keeps the plain entry's
/// position. Later duplicates of an already-navigable name are dropped.
pub fn classify_fields(fields: &RelationalFields) -> Vec<FieldDescriptor> {
    let mut out: Vec<FieldDescriptor> = Vec::with_capacity(fields.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    let buckets = [
        (FieldBucket::Plain, &fields.plain),
        (FieldBucket::Lookups, &fields.lookups),
        (FieldBucket::Children, &fields.children),
    ];

    for (bucket, raws) in buckets {
        for raw in raws {
            let descriptor = classify(raw, bucket);
            match positions.get(&descriptor.name) {
                Some(&idx) => {
                    if out[idx].kind == FieldKind::Plain && descriptor.kind.is_navigable() {
                        out[idx] = descriptor;
                    }
                }
                None => {
                    positions.insert(descriptor.name.clone(), out.len());
                    out.push(descriptor);
                }
            }
        }
    }

    out
}
