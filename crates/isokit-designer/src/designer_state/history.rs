//! Undo/redo for designer state.

use super::DesignerState;
use crate::component::DiagramComponent;

impl DesignerState {
    /// Replaces the component list, recording the previous one for undo.
    /// Returns false (and records nothing) when the list did not change.
    pub(crate) fn apply_edit(&mut self, next: Vec<DiagramComponent>) -> bool {
        if next == self.components {
            return false;
        }
        let previous = std::mem::replace(&mut self.components, next);
        self.undo_stack.push(previous);
        if self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.is_modified = true;
        self.prune_selection();
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.components, previous);
        self.redo_stack.push(current);
        self.is_modified = true;
        self.prune_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.components, next);
        self.undo_stack.push(current);
        self.is_modified = true;
        self.prune_selection();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.selected_id.as_deref() {
            if !self.components.iter().any(|c| c.id == id) {
                self.selected_id = None;
            }
        }
    }
}
