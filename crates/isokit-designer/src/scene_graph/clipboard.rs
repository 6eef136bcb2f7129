//! Cut, copy and paste.
//!
//! A cut is a staged marker: the subtree stays in place with `cut = true`
//! until it is pasted or cancelled, and at most one subtree is staged at a
//! time. A copy is a detached deep clone held by the caller.

use std::collections::HashMap;

use crate::component::{new_component_id, DiagramComponent};

use super::{find_dependent_shapes, index_of, insert_after_dependents, resolve_placement};

/// Stages a subtree for cut, cancelling any cut already in progress.
/// The root can never be cut.
pub fn cut_3d_shape(components: &[DiagramComponent], id: &str) -> Vec<DiagramComponent> {
    match index_of(components, id) {
        None => {
            tracing::warn!(id, "Cannot cut unknown component");
            return components.to_vec();
        }
        Some(index) if index == 0 || components[index].is_root() => {
            tracing::warn!(id, "The root component cannot be cut");
            return components.to_vec();
        }
        Some(_) => {}
    }

    let mut next = cancel_cut(components, None);
    let staged = find_dependent_shapes(&next, id);
    for c in next.iter_mut().filter(|c| staged.contains(&c.id)) {
        c.cut = true;
    }
    next
}

/// Clears the cut flag on the subtree of `id`, or on the subtree of the
/// first staged component when no id is given.
pub fn cancel_cut(components: &[DiagramComponent], id: Option<&str>) -> Vec<DiagramComponent> {
    let mut next = components.to_vec();
    let target = match id {
        Some(id) => Some(id.to_string()),
        None => next.iter().find(|c| c.cut).map(|c| c.id.clone()),
    };
    let Some(target) = target else {
        return next;
    };
    let staged = find_dependent_shapes(&next, &target);
    for c in next.iter_mut().filter(|c| staged.contains(&c.id)) {
        c.cut = false;
    }
    next
}

/// Deep-clones a subtree, giving every component a fresh id and remapping
/// internal parent references. References leaving the subtree are kept.
pub fn clone_subtree(subtree: &[DiagramComponent]) -> Vec<DiagramComponent> {
    let ids: HashMap<&str, String> = subtree
        .iter()
        .map(|c| (c.id.as_str(), new_component_id()))
        .collect();

    subtree
        .iter()
        .map(|c| {
            let mut clone = c.clone();
            clone.id = ids[c.id.as_str()].clone();
            clone.relative_to_id = c
                .relative_to_id
                .as_deref()
                .map(|parent| ids.get(parent).cloned().unwrap_or_else(|| parent.to_string()));
            clone.cut = false;
            clone.absolute_position = None;
            clone
        })
        .collect()
}

/// Returns an id-disjoint clone of the subtree rooted at `id`, in list
/// order. The input list is left untouched.
pub fn copy_3d_shape(components: &[DiagramComponent], id: &str) -> Vec<DiagramComponent> {
    let members = find_dependent_shapes(components, id);
    if members.is_empty() {
        tracing::warn!(id, "Cannot copy unknown component");
        return Vec::new();
    }
    let subtree: Vec<DiagramComponent> = components
        .iter()
        .filter(|c| members.contains(&c.id))
        .cloned()
        .collect();
    clone_subtree(&subtree)
}

/// Moves the staged cut subtree under `target_id` at the given placement.
pub fn paste_cut_3d_shapes(
    components: &[DiagramComponent],
    target_id: &str,
    position: &str,
    attachment_point: Option<&str>,
) -> Vec<DiagramComponent> {
    let Some(head) = components.iter().find(|c| c.cut) else {
        tracing::warn!("Nothing has been cut");
        return components.to_vec();
    };
    let staged = find_dependent_shapes(components, &head.id);
    if index_of(components, target_id).is_none() {
        tracing::warn!(target = target_id, "Paste target does not exist");
        return components.to_vec();
    }
    if staged.contains(target_id) {
        tracing::warn!(target = target_id, "Cannot paste a cut subtree into itself");
        return components.to_vec();
    }

    let (mut moved, mut remaining): (Vec<_>, Vec<_>) = components
        .iter()
        .cloned()
        .partition(|c| staged.contains(&c.id));
    for c in &mut moved {
        c.cut = false;
    }
    moved[0].relative_to_id = Some(target_id.to_string());
    moved[0].position = resolve_placement(position, attachment_point);

    insert_after_dependents(&mut remaining, target_id, moved);
    remaining
}

/// Pastes a copied subtree under `target_id` at the given placement.
///
/// When the clipboard's ids are already live (the same copy pasted again)
/// the subtree is re-cloned first so ids stay unique.
pub fn paste_copied_3d_shapes(
    components: &[DiagramComponent],
    clipboard: &[DiagramComponent],
    target_id: &str,
    position: &str,
    attachment_point: Option<&str>,
) -> Vec<DiagramComponent> {
    if clipboard.is_empty() {
        tracing::warn!("Nothing has been copied");
        return components.to_vec();
    }
    if index_of(components, target_id).is_none() {
        tracing::warn!(target = target_id, "Paste target does not exist");
        return components.to_vec();
    }

    let already_live = clipboard
        .iter()
        .any(|copied| index_of(components, &copied.id).is_some());
    let mut pasted = if already_live {
        clone_subtree(clipboard)
    } else {
        clipboard.to_vec()
    };
    pasted[0].relative_to_id = Some(target_id.to_string());
    pasted[0].position = resolve_placement(position, attachment_point);

    let mut next = components.to_vec();
    insert_after_dependents(&mut next, target_id, pasted);
    next
}
