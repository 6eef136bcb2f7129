//! Absolute position resolution.

use std::collections::{HashMap, HashSet};

use isokit_core::{CanvasSize, Placement, Point};

use crate::attachment::find_anchor;
use crate::component::DiagramComponent;

/// Resolved positions for one resolution pass, keyed by component id.
///
/// Built and dropped within a single compile so nothing leaks between
/// calls; components themselves are never mutated while resolving.
#[derive(Debug, Clone, Default)]
pub struct PositionMemo {
    resolved: HashMap<String, Point>,
    in_progress: HashSet<String>,
}

impl PositionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.resolved.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Computes the canvas-space translation of `component`.
///
/// The root sits at the canvas center. Any other component is moved so
/// that its complementary anchor lands exactly on the parent's anchor for
/// its position. A missing anchor degrades to the parent's own position.
/// The parent is resolved first (recursively, via `all_components`) and
/// every result is memoized in `memo`.
pub fn calculate_absolute_position(
    component: &DiagramComponent,
    reference: Option<&DiagramComponent>,
    canvas: CanvasSize,
    all_components: &[DiagramComponent],
    memo: &mut PositionMemo,
) -> Point {
    if let Some(known) = memo.get(&component.id) {
        return known;
    }

    let Some(parent) = reference else {
        let center = canvas.center();
        memo.resolved.insert(component.id.clone(), center);
        return center;
    };

    if !memo.in_progress.insert(component.id.clone()) {
        tracing::warn!(
            component = %component.id,
            "Cyclic parent chain while resolving position, using canvas center"
        );
        return canvas.center();
    }

    let parent_position = match memo.get(&parent.id) {
        Some(p) => p,
        None => {
            let grandparent = parent
                .relative_to_id
                .as_deref()
                .and_then(|id| all_components.iter().find(|c| c.id == id));
            calculate_absolute_position(parent, grandparent, canvas, all_components, memo)
        }
    };

    let placement = Placement::parse(&component.position);
    let resolved = match placement.child_anchor() {
        None => parent_position,
        Some(child_anchor_name) => {
            let parent_anchor = find_anchor(&parent.attachment_points, &component.position);
            let child_anchor = find_anchor(&component.attachment_points, child_anchor_name);
            match (parent_anchor, child_anchor) {
                (Some(pa), Some(ca)) => parent_position + pa.point() - ca.point(),
                _ => {
                    tracing::warn!(
                        component = %component.id,
                        parent = %parent.id,
                        position = %component.position,
                        parent_anchor_found = parent_anchor.is_some(),
                        child_anchor = child_anchor_name,
                        child_anchor_found = child_anchor.is_some(),
                        "Attachment anchor missing, placing component on its parent"
                    );
                    parent_position
                }
            }
        }
    };

    memo.in_progress.remove(&component.id);
    memo.resolved.insert(component.id.clone(), resolved);
    resolved
}
