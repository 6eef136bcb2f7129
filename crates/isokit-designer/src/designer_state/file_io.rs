//! File I/O operations (save, load, new) for designer state.

use std::path::Path;

use super::DesignerState;
use crate::serialization::DiagramFile;

impl DesignerState {
    /// Save diagram to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = DiagramFile::from_components(&self.design_name, &self.components);
        file.save_to_file(&path)?;

        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load diagram from file. On error the session is left untouched.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = DiagramFile::load_from_file(&path)?;

        self.components = file.to_components();
        self.design_name = file.metadata.name;
        self.selected_id = None;
        self.clipboard.clear();
        self.clear_history();
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        tracing::info!(
            path = %path.as_ref().display(),
            components = self.components.len(),
            "Loaded diagram"
        );
        Ok(())
    }

    /// Start a new, empty diagram.
    pub fn new_diagram(&mut self) {
        self.components.clear();
        self.selected_id = None;
        self.clipboard.clear();
        self.clear_history();
        self.current_file_path = None;
        self.is_modified = false;
        self.design_name = "Untitled".to_string();
    }
}
