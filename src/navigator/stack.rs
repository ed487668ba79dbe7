//! The panel stack.
//!
//! Holds one [`Panel`] per depth, starting at the root object. Expanding a
//! relationship at depth `d` always truncates the stack to `d + 1` panels
//! before appending, so re-expanding higher up replaces everything below.
//!
//! # Versioning
//!
//! Every structural change (open, committed expand, reset) bumps a
//! monotonically increasing generation, and each panel remembers the
//! generation it was committed at. Metadata requests run in two phases:
//!
//! ```text
//! begin_expand(depth, field) ──► ExpandTicket ──► provider (async, no lock)
//!                                                      │
//! commit_expand(ticket, response) ◄────────────────────┘
//! ```
//!
//! A ticket records the generation of the panel it expands from. If that
//! panel has since been replaced or removed, the response is stale and is
//! discarded without touching the stack.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::error::{NavigationError, NavigationResult};
use super::panel::{FilterMode, Hop, Panel};
use crate::metadata::{MetadataResult, RelationalFields, SchemaMetadataProvider};
use crate::schema::{classify_fields, FieldDescriptor, HopKind};

/// Default maximum number of panels (root included).
pub const MAX_DEPTH: usize = 5;

/// A pending request to populate the root panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTicket {
    object_name: String,
    generation: u64,
}

/// A pending request to populate the panel below `depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandTicket {
    id: u64,
    depth: usize,
    hop: Hop,
    target_object: String,
    parent_generation: u64,
}

impl ExpandTicket {
    /// Depth of the panel the expand starts from.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The object whose fields must be fetched.
    pub fn target_object(&self) -> &str {
        &self.target_object
    }
}

/// Result of validating an expand request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandStart {
    /// The field is plain; there is nothing to expand.
    NotNavigable,
    /// Fetch the target object's fields, then commit the ticket.
    Fetch(ExpandTicket),
}

/// Result of committing an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// The stack was reset or reopened while the request was in flight.
    Stale,
}

/// Result of an expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// A new panel was appended at `depth`.
    Expanded { depth: usize, object_name: String },
    /// The field is plain; the stack is unchanged.
    NotNavigable,
    /// The source panel changed while the request was in flight; the
    /// response was discarded.
    Stale,
}

/// Ordered navigation panels, index = depth.
#[derive(Debug, Clone)]
pub struct PanelStack {
    panels: Vec<Panel>,
    max_depth: usize,
    generation: u64,
    next_ticket: u64,
    /// In-flight expands: source depth -> ticket id.
    in_flight: HashMap<usize, u64>,
}

impl Default for PanelStack {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelStack {
    pub fn new() -> Self {
        Self::with_max_depth(MAX_DEPTH)
    }

    /// Create a stack with a custom depth ceiling.
    ///
    /// A ceiling below 1 still allows the root panel.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            panels: Vec::new(),
            max_depth: max_depth.max(1),
            generation: 0,
            next_ticket: 0,
            in_flight: HashMap::new(),
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, depth: usize) -> Option<&Panel> {
        self.panels.get(depth)
    }

    /// True if an expand from `depth` has not settled yet.
    pub fn is_busy(&self, depth: usize) -> bool {
        self.in_flight.contains_key(&depth)
    }

    /// The panel's fields filtered by its mode and search text.
    pub fn visible_fields(&self, depth: usize) -> NavigationResult<Vec<&FieldDescriptor>> {
        Ok(self.require_panel(depth)?.visible_fields())
    }

    // =========================================================================
    // Panel-local changes (not structural)
    // =========================================================================

    pub fn set_filter_mode(&mut self, depth: usize, mode: FilterMode) -> NavigationResult<()> {
        let panel = self.require_panel(depth)?.with_filter_mode(mode);
        self.panels[depth] = panel;
        Ok(())
    }

    pub fn set_search_text(&mut self, depth: usize, text: &str) -> NavigationResult<()> {
        let panel = self.require_panel(depth)?.with_search_text(text);
        self.panels[depth] = panel;
        Ok(())
    }

    // =========================================================================
    // Structural changes
    // =========================================================================

    /// Empty the stack and forget in-flight requests.
    pub fn reset(&mut self) {
        self.panels.clear();
        self.in_flight.clear();
        self.bump_generation();
        debug!(generation = self.generation, "panel stack reset");
    }

    /// Start opening `object_name` as the new root.
    ///
    /// The stack is emptied immediately; it stays empty until the ticket is
    /// committed with a successful response.
    pub fn begin_open(&mut self, object_name: &str) -> OpenTicket {
        self.reset();
        OpenTicket {
            object_name: object_name.to_string(),
            generation: self.generation,
        }
    }

    /// Apply the provider's response to an open request.
    pub fn commit_open(
        &mut self,
        ticket: OpenTicket,
        response: MetadataResult<RelationalFields>,
    ) -> NavigationResult<OpenOutcome> {
        if ticket.generation != self.generation || !self.panels.is_empty() {
            warn!(object = %ticket.object_name, "discarding stale open response");
            return Ok(OpenOutcome::Stale);
        }

        let fields = response.map_err(|e| NavigationError::metadata(&ticket.object_name, e))?;

        self.bump_generation();
        self.panels.push(Panel::new(
            ticket.object_name,
            classify_fields(&fields),
            None,
            self.generation,
        ));
        debug!(generation = self.generation, "root panel opened");
        Ok(OpenOutcome::Opened)
    }

    /// Validate an expand of `field_name` on the panel at `depth`.
    ///
    /// Fails with [`NavigationError::DepthLimitReached`] when the new panel
    /// would exceed the ceiling, and with [`NavigationError::NavigationBusy`]
    /// when another expand from the same depth is still in flight.
    pub fn begin_expand(&mut self, depth: usize, field_name: &str) -> NavigationResult<ExpandStart> {
        if depth >= self.max_depth.saturating_sub(1) {
            return Err(NavigationError::DepthLimitReached {
                depth,
                max_depth: self.max_depth,
            });
        }

        let panel = self.require_panel(depth)?;
        let field = panel.field(field_name).ok_or_else(|| {
            NavigationError::invalid(format!(
                "field '{}' not found on {} at depth {}",
                field_name,
                panel.object_name(),
                depth
            ))
        })?;

        let (Some(hop_kind), Some(target)) = (field.kind.hop_kind(), field.target_object()) else {
            return Ok(ExpandStart::NotNavigable);
        };

        if self.in_flight.contains_key(&depth) {
            return Err(NavigationError::NavigationBusy { depth });
        }

        let ticket = ExpandTicket {
            id: self.next_ticket,
            depth,
            hop: Hop::new(field_name, hop_kind),
            target_object: target.to_string(),
            parent_generation: panel.generation(),
        };
        self.next_ticket += 1;
        self.in_flight.insert(depth, ticket.id);

        debug!(depth, field = field_name, target = %ticket.target_object, "expand started");
        Ok(ExpandStart::Fetch(ticket))
    }

    /// Apply the provider's response to an expand request.
    ///
    /// On failure the stack is left unchanged.
    pub fn commit_expand(
        &mut self,
        ticket: ExpandTicket,
        response: MetadataResult<RelationalFields>,
    ) -> NavigationResult<ExpandOutcome> {
        if self.in_flight.get(&ticket.depth) == Some(&ticket.id) {
            self.in_flight.remove(&ticket.depth);
        }

        let current = self.panels.get(ticket.depth).map(Panel::generation);
        if current != Some(ticket.parent_generation) {
            warn!(
                depth = ticket.depth,
                target = %ticket.target_object,
                "discarding stale expand response"
            );
            return Ok(ExpandOutcome::Stale);
        }

        let fields = response.map_err(|e| NavigationError::metadata(&ticket.target_object, e))?;

        let new_depth = ticket.depth + 1;
        self.panels.truncate(new_depth);
        // Requests from the panels just removed can no longer commit.
        self.in_flight.retain(|&depth, _| depth < new_depth);
        self.bump_generation();
        self.panels.push(Panel::new(
            ticket.target_object.clone(),
            classify_fields(&fields),
            Some(ticket.hop),
            self.generation,
        ));

        debug!(depth = new_depth, object = %ticket.target_object, "panel expanded");
        Ok(ExpandOutcome::Expanded {
            depth: new_depth,
            object_name: ticket.target_object,
        })
    }

    // =========================================================================
    // One-shot helpers for single-owner use
    // =========================================================================

    /// Open `object_name` as the root, fetching its fields from `provider`.
    pub async fn open<P>(&mut self, provider: &P, object_name: &str) -> NavigationResult<()>
    where
        P: SchemaMetadataProvider + ?Sized,
    {
        let ticket = self.begin_open(object_name);
        let response = provider.get_relational_fields(object_name).await;
        self.commit_open(ticket, response).map(|_| ())
    }

    /// Expand `field_name` at `depth`, fetching the target's fields from
    /// `provider`.
    pub async fn expand<P>(
        &mut self,
        provider: &P,
        depth: usize,
        field_name: &str,
    ) -> NavigationResult<ExpandOutcome>
    where
        P: SchemaMetadataProvider + ?Sized,
    {
        let ticket = match self.begin_expand(depth, field_name)? {
            ExpandStart::NotNavigable => return Ok(ExpandOutcome::NotNavigable),
            ExpandStart::Fetch(ticket) => ticket,
        };
        let response = provider.get_relational_fields(ticket.target_object()).await;
        self.commit_expand(ticket, response)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_panel(&self, depth: usize) -> NavigationResult<&Panel> {
        self.panels
            .get(depth)
            .ok_or_else(|| NavigationError::invalid(format!("no panel at depth {}", depth)))
    }

    fn bump_generation(&mut self) {
        self.generation += 1;
    }

    /// Hops from depth 1 through `depth`, in order.
    pub(crate) fn hops_to(&self, depth: usize) -> NavigationResult<Vec<&Hop>> {
        (1..=depth)
            .map(|d| {
                self.require_panel(d)?.hop_from_parent().ok_or_else(|| {
                    NavigationError::invalid(format!("panel at depth {} has no hop", d))
                })
            })
            .collect()
    }

    /// Hop kind of the panel at `depth`, if it was reached by a hop.
    pub fn hop_kind_at(&self, depth: usize) -> Option<HopKind> {
        self.panel(depth)
            .and_then(Panel::hop_from_parent)
            .map(|h| h.hop_kind)
    }

    #[cfg(test)]
    pub(crate) fn push_panel_for_test(&mut self, panel: Panel) {
        self.panels.push(panel);
    }
}
