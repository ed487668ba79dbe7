//! The dotted path value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::segment::PathSegment;

/// Error returned when parsing a dotted path from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,

    #[error("path '{0}' has an empty segment")]
    EmptySegment(String),
}

/// A canonical dotted path such as `owner.Name` or `Contacts.Email`.
///
/// Hop segments come first, the leaf field name last. Built once when a
/// field is selected and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DottedPath(String);

impl DottedPath {
    /// Join hop segments and the leaf field into a path.
    pub(crate) fn from_parts(segments: &[PathSegment], leaf: &str) -> Self {
        let mut path = String::new();
        for segment in segments {
            path.push_str(segment.as_str());
            path.push('.');
        }
        path.push_str(leaf);
        Self(path)
    }

    /// Parse a path typed by a user or stored in configuration.
    pub fn parse(s: &str) -> Result<Self, PathParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }
        if s.split('.').any(str::is_empty) {
            return Err(PathParseError::EmptySegment(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All segments, hops first, leaf last.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }

    /// The leaf field name.
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Number of hops taken before the leaf.
    pub fn hop_count(&self) -> usize {
        self.0.matches('.').count()
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DottedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for DottedPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DottedPath {
    type Error = PathParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DottedPath> for String {
    fn from(path: DottedPath) -> Self {
        path.0
    }
}
