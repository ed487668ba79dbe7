//! Path resolution: panel stack + leaf field -> dotted path.

use super::dotted::DottedPath;
use crate::navigator::{NavigationError, NavigationResult, PanelStack};

/// Build the dotted path for selecting `leaf` on the panel at `depth`.
///
/// Panels 1 through `depth` each contribute the segment derived from the hop
/// that created them; the root panel contributes nothing. The leaf is
/// appended verbatim, so at depth 0 the path is just the field name.
///
/// Fails with [`NavigationError::InvalidSelection`] if `leaf` is empty or
/// contains a `.`, if there is no panel at `depth`, if `leaf` is not one of
/// its fields, or if an intermediate panel has no hop.
pub fn resolve(stack: &PanelStack, depth: usize, leaf: &str) -> NavigationResult<DottedPath> {
    if leaf.is_empty() || leaf.contains('.') {
        return Err(NavigationError::invalid(format!(
            "field name '{}' cannot be a path leaf",
            leaf
        )));
    }

    let panel = stack
        .panel(depth)
        .ok_or_else(|| NavigationError::invalid(format!("no panel at depth {}", depth)))?;

    if !panel.has_field(leaf) {
        return Err(NavigationError::invalid(format!(
            "field '{}' not found on {} at depth {}",
            leaf,
            panel.object_name(),
            depth
        )));
    }

    let segments: Vec<_> = stack.hops_to(depth)?.into_iter().map(|hop| hop.segment()).collect();

    Ok(DottedPath::from_parts(&segments, leaf))
}
