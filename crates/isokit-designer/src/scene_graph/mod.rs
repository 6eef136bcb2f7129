//! Scene graph engine.
//!
//! The scene graph is an ordered `Vec<DiagramComponent>` in which every
//! parent precedes all of its transitive dependents. Position resolution,
//! painter's-order rendering and "insert after last dependent" editing all
//! rely on that order, so every operation here takes a slice and returns a
//! new list that preserves it. Invalid preconditions are logged and answered
//! with an unchanged copy of the input.

mod clipboard;
mod edit;
mod picking;
mod position;

pub use clipboard::{
    cancel_cut, clone_subtree, copy_3d_shape, cut_3d_shape, paste_copied_3d_shapes,
    paste_cut_3d_shapes,
};
pub use edit::{
    add_2d_shape, add_3d_component, add_3d_shape, remove_2d_shape, remove_3d_shape,
};
pub use picking::{find_closest_attachment_point, AttachmentChoice};
pub use position::{calculate_absolute_position, PositionMemo};

use std::collections::{HashMap, HashSet};

use isokit_core::{DiagramError, ATTACH_PREFIX, NONE_ATTACHMENT};

use crate::component::DiagramComponent;

/// A component together with everything that transitively hangs off it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependents {
    /// Ids in list order, the requested component first
    pub ids: Vec<String>,
    /// Highest list index among them
    pub last_index: Option<usize>,
    members: HashSet<String>,
}

impl Dependents {
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Transitive closure of `id` and every component whose parent chain leads
/// back to it. Empty when `id` is not in the list.
pub fn find_dependent_shapes(components: &[DiagramComponent], id: &str) -> Dependents {
    if !components.iter().any(|c| c.id == id) {
        return Dependents::default();
    }

    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for c in components {
        if let Some(parent) = c.relative_to_id.as_deref() {
            children.entry(parent).or_default().push(c.id.as_str());
        }
    }

    let mut members: HashSet<&str> = HashSet::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        if !members.insert(current) {
            continue;
        }
        if let Some(kids) = children.get(current) {
            stack.extend(kids.iter().copied());
        }
    }

    let mut dependents = Dependents::default();
    for (index, c) in components.iter().enumerate() {
        if members.contains(c.id.as_str()) {
            dependents.ids.push(c.id.clone());
            dependents.members.insert(c.id.clone());
            dependents.last_index = Some(index);
        }
    }
    dependents
}

pub fn index_of(components: &[DiagramComponent], id: &str) -> Option<usize> {
    components.iter().position(|c| c.id == id)
}

/// Effective placement of a new or pasted component: an explicit attachment
/// point wins, the `"none"` sentinel (or nothing) falls back to `position`.
pub fn resolve_placement(position: &str, attachment_point: Option<&str>) -> String {
    match attachment_point {
        Some(point) if !point.is_empty() && point != NONE_ATTACHMENT => point
            .strip_prefix(ATTACH_PREFIX)
            .unwrap_or(point)
            .to_string(),
        _ => position.to_string(),
    }
}

/// Inserts `items` right after the last transitive dependent of `parent_id`,
/// or appends them when the parent is unknown.
pub(crate) fn insert_after_dependents(
    components: &mut Vec<DiagramComponent>,
    parent_id: &str,
    items: Vec<DiagramComponent>,
) {
    let at = find_dependent_shapes(components, parent_id)
        .last_index
        .map_or(components.len(), |i| i + 1);
    components.splice(at..at, items);
}

/// Checks the structural invariants: unique ids, exactly one root at the
/// head of the list, and every parent reference pointing backwards.
pub fn validate_order(components: &[DiagramComponent]) -> Result<(), DiagramError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, c) in components.iter().enumerate() {
        match (&c.relative_to_id, index) {
            (None, 0) => {}
            (None, _) | (Some(_), 0) => {
                return Err(DiagramError::InvalidRoot { id: c.id.clone() });
            }
            (Some(parent), _) if !seen.contains(parent.as_str()) => {
                return Err(DiagramError::DanglingReference {
                    id: c.id.clone(),
                    parent: parent.clone(),
                });
            }
            _ => {}
        }
        if !seen.insert(c.id.as_str()) {
            return Err(DiagramError::DuplicateId { id: c.id.clone() });
        }
    }
    Ok(())
}
