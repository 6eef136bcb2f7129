//! Shape creation, deletion, clipboard and library operations.

use std::borrow::Cow;
use std::collections::HashMap;

use isokit_core::{LibraryError, Shape};

use super::DesignerState;
use crate::component::DiagramComponent;
use crate::scene_graph::{self, find_dependent_shapes};
use crate::shape_library::{ShapeLibrary, ShapeSource};

/// Base shapes plus pre-rendered library components.
struct Overlay<'a> {
    base: &'a ShapeLibrary,
    extra: HashMap<String, Shape>,
}

impl ShapeSource for Overlay<'_> {
    fn shape(&self, name: &str) -> Option<Cow<'_, Shape>> {
        self.base
            .shape(name)
            .or_else(|| self.extra.get(name).map(Cow::Borrowed))
    }
}

impl DesignerState {
    /// Adds a 3D shape attached to the selection (or as the root of an
    /// empty scene). Returns the new component's id.
    pub fn add_3d_shape(
        &mut self,
        shape: &str,
        position: &str,
        attachment_point: Option<&str>,
    ) -> Option<String> {
        let placement = scene_graph::resolve_placement(position, attachment_point);
        let component = DiagramComponent::new(shape, placement, None);
        let id = component.id.clone();
        let next = scene_graph::add_3d_component(&self.components, component, self.selected_id.as_deref());
        self.apply_edit(next).then_some(id)
    }

    /// Attaches a decoration to the selected component.
    pub fn add_2d_shape(&mut self, name: &str, attached_to: &str) -> bool {
        let next = scene_graph::add_2d_shape(&self.components, name, attached_to, self.selected_id.as_deref());
        self.apply_edit(next)
    }

    pub fn remove_3d_shape(&mut self, id: &str) -> bool {
        let next = scene_graph::remove_3d_shape(&self.components, id);
        self.apply_edit(next)
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.selected_id.clone() {
            Some(id) => self.remove_3d_shape(&id),
            None => false,
        }
    }

    pub fn remove_2d_shape(&mut self, parent_id: &str, index: usize) -> bool {
        let next = scene_graph::remove_2d_shape(&self.components, parent_id, index);
        self.apply_edit(next)
    }

    /// Stages a subtree for cut. Any pending copy is dropped.
    pub fn cut(&mut self, id: &str) -> bool {
        let next = scene_graph::cut_3d_shape(&self.components, id);
        let staged = self.apply_edit(next);
        if staged {
            self.clipboard.clear();
        }
        staged
    }

    pub fn cancel_cut(&mut self) -> bool {
        let next = scene_graph::cancel_cut(&self.components, None);
        self.apply_edit(next)
    }

    /// Copies a subtree to the clipboard, cancelling any staged cut.
    pub fn copy(&mut self, id: &str) -> bool {
        let copied = scene_graph::copy_3d_shape(&self.components, id);
        if copied.is_empty() {
            return false;
        }
        self.cancel_cut();
        self.clipboard = copied;
        true
    }

    /// Pastes the staged cut, or else the copied subtree, onto `target_id`.
    pub fn paste(&mut self, target_id: &str, position: &str, attachment_point: Option<&str>) -> bool {
        let next = if self.components.iter().any(|c| c.cut) {
            scene_graph::paste_cut_3d_shapes(&self.components, target_id, position, attachment_point)
        } else {
            scene_graph::paste_copied_3d_shapes(
                &self.components,
                &self.clipboard,
                target_id,
                position,
                attachment_point,
            )
        };
        self.apply_edit(next)
    }

    /// Saves the selected subtree as a library component. Returns its id.
    pub fn save_selection_as_component(
        &mut self,
        name: &str,
        description: &str,
        overwrite: bool,
    ) -> Result<String, LibraryError> {
        let Some(selected) = self.selected_id.as_deref() else {
            return Err(LibraryError::EmptyComponent);
        };
        let members = find_dependent_shapes(&self.components, selected);
        let subtree: Vec<DiagramComponent> = self
            .components
            .iter()
            .filter(|c| members.contains(&c.id))
            .cloned()
            .collect();

        // Library instances inside the selection are rendered up front so
        // the library can be borrowed mutably below.
        let layered = self.shape_source();
        let extra: HashMap<String, Shape> = subtree
            .iter()
            .filter(|c| !self.shape_library.contains(&c.shape))
            .filter_map(|c| {
                let shape = layered.shape(&c.shape)?.into_owned();
                Some((c.shape.clone(), shape))
            })
            .collect();
        let overlay = Overlay {
            base: &self.shape_library,
            extra,
        };

        let component = self
            .component_library
            .create_component(name, description, &subtree, &overlay, overwrite)?;
        Ok(component.id.clone())
    }
}
