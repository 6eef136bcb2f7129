//! Add and remove operations.

use crate::component::{Attached2DShape, DiagramComponent};

use super::{find_dependent_shapes, index_of, insert_after_dependents, resolve_placement};

/// Adds a new 3D shape attached to the selected component.
///
/// The first shape of an empty scene becomes the root. Otherwise a
/// selection is required, and the new component is inserted right after
/// the last transitive dependent of the selected one.
pub fn add_3d_shape(
    components: &[DiagramComponent],
    shape: &str,
    position: &str,
    attachment_point: Option<&str>,
    selected_id: Option<&str>,
) -> Vec<DiagramComponent> {
    let placement = resolve_placement(position, attachment_point);
    let component = DiagramComponent::new(shape, placement, None);
    add_3d_component(components, component, selected_id)
}

/// Same as [`add_3d_shape`] for a component the caller already built (and
/// whose id it therefore knows). The component's `relative_to_id` is
/// overwritten with the selection.
pub fn add_3d_component(
    components: &[DiagramComponent],
    mut component: DiagramComponent,
    selected_id: Option<&str>,
) -> Vec<DiagramComponent> {
    if components.is_empty() {
        component.relative_to_id = None;
        return vec![component];
    }

    let Some(parent_id) = selected_id else {
        tracing::warn!(
            shape = %component.shape,
            "Select a 3D shape to attach to before adding another"
        );
        return components.to_vec();
    };
    if index_of(components, parent_id).is_none() {
        tracing::warn!(selected = parent_id, "Selected component does not exist");
        return components.to_vec();
    }

    component.relative_to_id = Some(parent_id.to_string());
    let mut next = components.to_vec();
    insert_after_dependents(&mut next, parent_id, vec![component]);
    next
}

/// Attaches a 2D decoration to one of the selected component's anchors.
pub fn add_2d_shape(
    components: &[DiagramComponent],
    name: &str,
    attached_to: &str,
    selected_id: Option<&str>,
) -> Vec<DiagramComponent> {
    let Some(index) = selected_id.and_then(|id| index_of(components, id)) else {
        tracing::error!(shape = name, "No 3D shape selected to attach the 2D shape to");
        return components.to_vec();
    };
    let mut next = components.to_vec();
    next[index]
        .attached_2d_shapes
        .push(Attached2DShape::new(name, attached_to));
    next
}

/// Removes a component together with all of its transitive dependents.
pub fn remove_3d_shape(components: &[DiagramComponent], id: &str) -> Vec<DiagramComponent> {
    let doomed = find_dependent_shapes(components, id);
    if doomed.is_empty() {
        tracing::warn!(id, "Cannot remove unknown component");
        return components.to_vec();
    }
    components
        .iter()
        .filter(|c| !doomed.contains(&c.id))
        .cloned()
        .collect()
}

/// Removes one decoration, by index, from a component.
pub fn remove_2d_shape(
    components: &[DiagramComponent],
    parent_id: &str,
    index: usize,
) -> Vec<DiagramComponent> {
    let mut next = components.to_vec();
    match next.iter_mut().find(|c| c.id == parent_id) {
        Some(parent) if index < parent.attached_2d_shapes.len() => {
            parent.attached_2d_shapes.remove(index);
        }
        Some(_) => tracing::warn!(parent = parent_id, index, "2D shape index out of range"),
        None => tracing::warn!(parent = parent_id, "Cannot remove 2D shape from unknown component"),
    }
    next
}
