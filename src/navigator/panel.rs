//! Navigation panels.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::path::PathSegment;
use crate::schema::{FieldDescriptor, FieldKind, HopKind};

/// Which fields a panel lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Fields readable on the record: plain fields and lookups.
    #[default]
    All,
    /// Lookups only.
    ParentsOnly,
    /// Child relationships only.
    ChildrenOnly,
}

impl FilterMode {
    pub fn admits(self, kind: FieldKind) -> bool {
        match self {
            FilterMode::All => matches!(kind, FieldKind::Plain | FieldKind::Lookup),
            FilterMode::ParentsOnly => kind == FieldKind::Lookup,
            FilterMode::ChildrenOnly => kind == FieldKind::ChildRelationship,
        }
    }
}

/// How a panel was reached from the panel above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub field_name: String,
    pub hop_kind: HopKind,
}

impl Hop {
    pub fn new(field_name: impl Into<String>, hop_kind: HopKind) -> Self {
        Self {
            field_name: field_name.into(),
            hop_kind,
        }
    }

    /// The path segment this hop contributes.
    pub fn segment(&self) -> PathSegment {
        PathSegment::derive(self.hop_kind, &self.field_name)
    }
}

/// One level of the navigation stack: an object and its fields.
///
/// Panels are values. The stack replaces a panel wholesale on every change;
/// the field list is shared between versions.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    object_name: String,
    fields: Arc<[FieldDescriptor]>,
    hop_from_parent: Option<Hop>,
    filter_mode: FilterMode,
    search_text: String,
    generation: u64,
}

impl Panel {
    pub(crate) fn new(
        object_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        hop_from_parent: Option<Hop>,
        generation: u64,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            fields: fields.into(),
            hop_from_parent,
            filter_mode: FilterMode::All,
            search_text: String::new(),
            generation,
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// `None` for the root panel.
    pub fn hop_from_parent(&self) -> Option<&Hop> {
        self.hop_from_parent.as_ref()
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Stack generation at which this panel was committed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub(crate) fn with_filter_mode(&self, filter_mode: FilterMode) -> Self {
        Self {
            filter_mode,
            ..self.clone()
        }
    }

    pub(crate) fn with_search_text(&self, search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..self.clone()
        }
    }

    /// Fields admitted by the filter mode whose name contains the search
    /// text, ignoring case. Blank search text matches every field.
    pub fn visible_fields(&self) -> Vec<&FieldDescriptor> {
        let query = self.search_text.trim().to_lowercase();
        self.fields
            .iter()
            .filter(|f| self.filter_mode.admits(f.kind))
            .filter(|f| query.is_empty() || f.name.to_lowercase().contains(&query))
            .collect()
    }
}
