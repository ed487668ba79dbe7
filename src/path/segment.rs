//! Path segment derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::HopKind;

/// One `.`-separated component of a dotted path contributed by a hop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathSegment(String);

impl PathSegment {
    /// Derive the segment a hop contributes.
    ///
    /// Lookup hops use the field name with a trailing `Id` (any case)
    /// stripped, lower-cased: `OwnerId` and `Owner` both give `owner`.
    /// Child relationship hops use the relationship name unmodified.
    ///
    /// A lookup named exactly `Id` keeps its name (`id`) since stripping would
    /// leave nothing.
    pub fn derive(hop_kind: HopKind, field_name: &str) -> Self {
        match hop_kind {
            HopKind::Lookup => Self(strip_id_suffix(field_name).to_lowercase()),
            HopKind::ChildRelationship => Self(field_name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Shorthand for [`PathSegment::derive`] returning the plain string.
pub fn derive_segment(hop_kind: HopKind, field_name: &str) -> String {
    PathSegment::derive(hop_kind, field_name).0
}

fn strip_id_suffix(name: &str) -> &str {
    let len = name.len();
    if len > 2 && name.is_char_boundary(len - 2) && name[len - 2..].eq_ignore_ascii_case("id") {
        &name[..len - 2]
    } else {
        name
    }
}
