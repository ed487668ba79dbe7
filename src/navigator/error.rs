//! Navigation error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metadata::MetadataError;

/// Result type for navigation operations.
pub type NavigationResult<T> = Result<T, NavigationError>;

/// Errors that can occur while navigating a schema.
///
/// None of these are fatal: each is scoped to the current navigation attempt
/// and leaves the committed panel stack intact.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// The metadata provider failed. The same request may be retried.
    #[error("metadata unavailable for '{object}': {source}")]
    MetadataUnavailable {
        object: String,
        #[source]
        source: MetadataError,
    },

    /// The hop would exceed the maximum depth. Pick a shallower hop instead.
    #[error("maximum relationship depth ({max_depth}) reached at depth {depth}")]
    DepthLimitReached { depth: usize, max_depth: usize },

    /// The stack and the requested selection disagree.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Another expand at the same depth has not settled yet.
    #[error("an expand at depth {depth} is still in progress")]
    NavigationBusy { depth: usize },
}

impl NavigationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidSelection(message.into())
    }

    pub(crate) fn metadata(object: impl Into<String>, source: MetadataError) -> Self {
        Self::MetadataUnavailable {
            object: object.into(),
            source,
        }
    }

    /// The error's category, as reported to callers in events.
    pub fn kind(&self) -> NavigationErrorKind {
        match self {
            Self::MetadataUnavailable { .. } => NavigationErrorKind::MetadataUnavailable,
            Self::DepthLimitReached { .. } => NavigationErrorKind::DepthLimitReached,
            Self::InvalidSelection(_) => NavigationErrorKind::InvalidSelection,
            Self::NavigationBusy { .. } => NavigationErrorKind::NavigationBusy,
        }
    }

    /// Check if repeating the same action later may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::MetadataUnavailable { .. } | Self::NavigationBusy { .. }
        )
    }

    /// A message suitable for showing to the person navigating.
    ///
    /// Internal consistency faults get a generic message; the details are
    /// logged instead.
    pub fn user_message(&self) -> String {
        match self {
            Self::MetadataUnavailable { object, .. } => {
                format!("Could not load fields for {}. Try again.", object)
            }
            Self::DepthLimitReached { max_depth, .. } => {
                format!("Maximum relationship depth ({}) reached.", max_depth)
            }
            Self::InvalidSelection(_) => {
                "Something went wrong with this selection. Please reopen the field picker."
                    .to_string()
            }
            Self::NavigationBusy { .. } => {
                "Still loading the previous selection. Try again in a moment.".to_string()
            }
        }
    }
}

/// Category of a [`NavigationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationErrorKind {
    MetadataUnavailable,
    DepthLimitReached,
    InvalidSelection,
    NavigationBusy,
}

impl fmt::Display for NavigationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MetadataUnavailable => "metadata_unavailable",
            Self::DepthLimitReached => "depth_limit_reached",
            Self::InvalidSelection => "invalid_selection",
            Self::NavigationBusy => "navigation_busy",
        };
        f.write_str(s)
    }
}
