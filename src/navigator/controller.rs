//! Navigator controller.
//!
//! Maps user intent onto the panel stack and reports results as events:
//!
//! ```text
//!            open(root)                 select(depth, leaf)
//!   Closed ─────────────► Open ──────────────────────────────► Closed
//!                          │ ▲        emits PathSelected,
//!          expand / filter │ │        NavigatorClosed
//!          search          └─┘
//!                          │          close()
//!                          └─────────────────────────────────► Closed
//!                                     emits NavigatorClosed
//! ```
//!
//! The stack lives behind a mutex that is never held while waiting on the
//! metadata provider, so several expands can be in flight at once (one per
//! depth).

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};

use super::error::{NavigationError, NavigationErrorKind, NavigationResult};
use super::panel::{FilterMode, Panel};
use super::stack::{ExpandOutcome, ExpandStart, OpenOutcome, PanelStack, MAX_DEPTH};
use crate::metadata::SchemaMetadataProvider;
use crate::path::{resolve, DottedPath};
use crate::schema::FieldDescriptor;

/// Events emitted to whoever hosts the navigator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigatorEvent {
    /// A field was chosen; the navigator is about to close.
    PathSelected { path: DottedPath },
    /// The navigator closed, with or without a selection.
    NavigatorClosed,
    /// Something the user should be told about.
    NavigationError {
        kind: NavigationErrorKind,
        message: String,
    },
}

/// Receiving end of a navigator's event channel.
pub type NavigatorEvents = mpsc::UnboundedReceiver<NavigatorEvent>;

/// Drives a [`PanelStack`] against a [`SchemaMetadataProvider`].
pub struct NavigatorController<P: SchemaMetadataProvider> {
    provider: Arc<P>,
    stack: Mutex<PanelStack>,
    events: mpsc::UnboundedSender<NavigatorEvent>,
}

impl<P: SchemaMetadataProvider> NavigatorController<P> {
    /// Create a navigator with the default depth ceiling.
    pub fn new(provider: Arc<P>) -> (Self, NavigatorEvents) {
        Self::with_max_depth(provider, MAX_DEPTH)
    }

    /// Create a navigator with a custom depth ceiling.
    pub fn with_max_depth(provider: Arc<P>, max_depth: usize) -> (Self, NavigatorEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            provider,
            stack: Mutex::new(PanelStack::with_max_depth(max_depth)),
            events: tx,
        };
        (controller, rx)
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Open the navigator on `root`, replacing any current navigation.
    pub async fn open(&self, root: &str) -> NavigationResult<()> {
        let ticket = self.stack.lock().await.begin_open(root);
        info!(object = root, "opening navigator");

        let response = self.provider.get_relational_fields(root).await;
        let outcome = self.stack.lock().await.commit_open(ticket, response);

        match outcome {
            Ok(OpenOutcome::Opened) => Ok(()),
            Ok(OpenOutcome::Stale) => {
                debug!(object = root, "open superseded before it completed");
                Ok(())
            }
            Err(err) => Err(self.report(err)),
        }
    }

    /// Expand `field_name` on the panel at `depth`.
    ///
    /// Failures are reported as [`NavigatorEvent::NavigationError`] and
    /// returned; the stack is left as it was.
    pub async fn expand(&self, depth: usize, field_name: &str) -> NavigationResult<ExpandOutcome> {
        let start = self.stack.lock().await.begin_expand(depth, field_name);

        let ticket = match start {
            Ok(ExpandStart::Fetch(ticket)) => ticket,
            Ok(ExpandStart::NotNavigable) => return Ok(ExpandOutcome::NotNavigable),
            Err(err) => return Err(self.report(err)),
        };

        let response = self
            .provider
            .get_relational_fields(ticket.target_object())
            .await;

        self.stack
            .lock()
            .await
            .commit_expand(ticket, response)
            .map_err(|err| self.report(err))
    }

    /// Select `leaf` on the panel at `depth`, emit the resulting path and
    /// close.
    ///
    /// An inconsistent selection is logged, reported generically and leaves
    /// the navigator open.
    pub async fn select(&self, depth: usize, leaf: &str) -> NavigationResult<DottedPath> {
        let mut stack = self.stack.lock().await;

        let path = match resolve(&stack, depth, leaf) {
            Ok(path) => path,
            Err(err) => return Err(self.report(err)),
        };

        info!(path = %path, "path selected");
        self.emit(NavigatorEvent::PathSelected { path: path.clone() });
        stack.reset();
        self.emit(NavigatorEvent::NavigatorClosed);

        Ok(path)
    }

    /// Close without selecting anything.
    pub async fn close(&self) {
        self.stack.lock().await.reset();
        debug!("navigator closed");
        self.emit(NavigatorEvent::NavigatorClosed);
    }

    pub async fn set_filter_mode(&self, depth: usize, mode: FilterMode) -> NavigationResult<()> {
        self.stack.lock().await.set_filter_mode(depth, mode)
    }

    pub async fn set_search_text(&self, depth: usize, text: &str) -> NavigationResult<()> {
        self.stack.lock().await.set_search_text(depth, text)
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub async fn visible_fields(&self, depth: usize) -> NavigationResult<Vec<FieldDescriptor>> {
        let stack = self.stack.lock().await;
        Ok(stack
            .visible_fields(depth)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// A snapshot of the current panels.
    pub async fn panels(&self) -> Vec<Panel> {
        self.stack.lock().await.panels().to_vec()
    }

    pub async fn is_open(&self) -> bool {
        !self.stack.lock().await.is_empty()
    }

    pub async fn depth(&self) -> usize {
        self.stack.lock().await.len()
    }

    pub async fn generation(&self) -> u64 {
        self.stack.lock().await.generation()
    }

    // =========================================================================
    // Event plumbing
    // =========================================================================

    fn emit(&self, event: NavigatorEvent) {
        if self.events.send(event).is_err() {
            debug!("navigator event dropped: no receiver");
        }
    }

    /// Surface an error to the host and hand it back to the caller.
    fn report(&self, err: NavigationError) -> NavigationError {
        if err.kind() == NavigationErrorKind::InvalidSelection {
            error!(error = %err, "navigator state is inconsistent");
        } else {
            debug!(error = %err, "navigation failed");
        }

        self.emit(NavigatorEvent::NavigationError {
            kind: err.kind(),
            message: err.user_message(),
        });
        err
    }
}
