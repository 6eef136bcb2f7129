//! Designer state for an editing session.
//!
//! This module is split into submodules:
//! - `history`: Undo/redo of component-list snapshots
//! - `shapes`: Add/remove, clipboard and library operations
//! - `file_io`: Save/load operations
//!
//! Every edit delegates to the pure scene-graph functions and only
//! replaces the component list (recording a snapshot) when it changed.

mod file_io;
mod history;
mod shapes;

use std::collections::HashMap;
use std::path::PathBuf;

use isokit_core::{BoundingBox, CanvasSize, Point};

use crate::attachment::update_available_attachment_points;
use crate::compiler::{compile_diagram, CompiledDiagram};
use crate::component::DiagramComponent;
use crate::component_library::{ComponentLibrary, LayeredShapeSource};
use crate::label_layout::{self, LabelLayoutOptions, LabelRequest, PlacedLabel, TextMetrics};
use crate::scene_graph::{find_closest_attachment_point, AttachmentChoice};
use crate::shape_library::ShapeLibrary;

/// Default bound on undo snapshots
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Editing session over one diagram
#[derive(Debug)]
pub struct DesignerState {
    /// Ordered scene graph, parents before dependents
    pub components: Vec<DiagramComponent>,
    pub selected_id: Option<String>,
    /// Detached copy waiting to be pasted
    pub clipboard: Vec<DiagramComponent>,
    pub shape_library: ShapeLibrary,
    pub component_library: ComponentLibrary,
    pub canvas: CanvasSize,
    pub show_anchors: bool,
    pub layout_options: LabelLayoutOptions,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
    pub design_name: String,
    pub(crate) undo_stack: Vec<Vec<DiagramComponent>>,
    pub(crate) redo_stack: Vec<Vec<DiagramComponent>>,
    pub(crate) max_history: usize,
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(ShapeLibrary::new())
    }
}

impl DesignerState {
    /// Creates an empty session over a shape library.
    pub fn new(shape_library: ShapeLibrary) -> Self {
        Self {
            components: Vec::new(),
            selected_id: None,
            clipboard: Vec::new(),
            shape_library,
            component_library: ComponentLibrary::in_memory(),
            canvas: CanvasSize::default(),
            show_anchors: false,
            layout_options: LabelLayoutOptions::default(),
            current_file_path: None,
            is_modified: false,
            design_name: "Untitled".to_string(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history: DEFAULT_HISTORY_DEPTH,
        }
    }

    pub fn with_component_library(mut self, library: ComponentLibrary) -> Self {
        self.component_library = library;
        self
    }

    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.max_history = depth.max(1);
        self
    }

    /// Selects a component; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected_id = id
            .filter(|id| self.components.iter().any(|c| c.id == *id))
            .map(str::to_string);
    }

    pub fn selected(&self) -> Option<&DiagramComponent> {
        let id = self.selected_id.as_deref()?;
        self.components.iter().find(|c| c.id == id)
    }

    /// Shapes and library components, as the compiler sees them
    pub fn shape_source(&self) -> LayeredShapeSource<'_> {
        LayeredShapeSource::new(&self.shape_library, &self.component_library)
    }

    /// Compiles the current scene graph.
    pub fn compile(&self) -> CompiledDiagram {
        compile_diagram(&self.components, self.canvas, &self.shape_source(), self.show_anchors)
    }

    /// Compiled scene as a standalone document.
    pub fn render_document(&self) -> String {
        self.compile().to_document(self.canvas)
    }

    /// Attachment choices for one component, headed by `"none"`.
    pub fn available_attachment_points(&self, id: &str) -> Vec<String> {
        let compiled = self.compile();
        match compiled.component(id) {
            Some(component) => update_available_attachment_points(component),
            None => {
                tracing::warn!(id, "No such component for attachment lookup");
                vec![isokit_core::NONE_ATTACHMENT.to_string()]
            }
        }
    }

    /// Decodes a click, in the component's local space, into a placement.
    pub fn attach_at_click(&self, id: &str, local: Point) -> AttachmentChoice {
        let compiled = self.compile();
        match compiled.component(id) {
            Some(component) => find_closest_attachment_point(local, component),
            None => AttachmentChoice::default(),
        }
    }

    /// Screen-space boxes of the compiled components.
    pub fn component_bounds(&self) -> HashMap<String, BoundingBox> {
        let compiled = self.compile();
        label_layout::component_bounds(&compiled, &self.shape_source())
    }

    /// Lays out labels around the compiled diagram.
    pub fn layout_labels(
        &self,
        requests: &[LabelRequest],
        metrics: &dyn TextMetrics,
    ) -> Vec<PlacedLabel> {
        label_layout::layout_labels(
            requests,
            &self.component_bounds(),
            &self.layout_options,
            metrics,
        )
    }
}
