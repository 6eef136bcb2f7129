//! Diagram components: the nodes of the scene graph.

use isokit_core::{AttachmentPoint, Point};
use serde::{Deserialize, Serialize};

/// A 2D decoration keyed to one of its owner's anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attached2DShape {
    /// Shape library name of the decoration
    pub name: String,
    /// Anchor of the owning 3D component (`front-left`, `attach-top`, ...)
    pub attached_to: String,
}

impl Attached2DShape {
    pub fn new(name: impl Into<String>, attached_to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attached_to: attached_to.into(),
        }
    }
}

/// Node in the scene graph.
///
/// `relative_to_id` is an id lookup, never an owning reference; the list
/// holding the components keeps every parent ahead of its dependents.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramComponent {
    pub id: String,
    /// Shape library name, or a component library id
    pub shape: String,
    /// Placement keyword or custom anchor name relative to the parent
    pub position: String,
    pub relative_to_id: Option<String>,
    pub attached_2d_shapes: Vec<Attached2DShape>,
    /// Local anchors extracted during the last compile
    pub attachment_points: Vec<AttachmentPoint>,
    /// Global translation computed during the last compile
    pub absolute_position: Option<Point>,
    /// Staged for a cut/paste
    pub cut: bool,
}

/// Generates a fresh unique component id.
pub fn new_component_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl DiagramComponent {
    /// Creates a component with a fresh id.
    pub fn new(
        shape: impl Into<String>,
        position: impl Into<String>,
        relative_to_id: Option<String>,
    ) -> Self {
        Self::with_id(new_component_id(), shape, position, relative_to_id)
    }

    pub fn with_id(
        id: impl Into<String>,
        shape: impl Into<String>,
        position: impl Into<String>,
        relative_to_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            shape: shape.into(),
            position: position.into(),
            relative_to_id,
            attached_2d_shapes: Vec::new(),
            attachment_points: Vec::new(),
            absolute_position: None,
            cut: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.relative_to_id.is_none()
    }

    /// Local anchor by exact name.
    pub fn attachment_point(&self, name: &str) -> Option<&AttachmentPoint> {
        self.attachment_points.iter().find(|a| a.name == name)
    }

    /// Anchors translated into canvas space, empty before the first compile.
    pub fn global_attachment_points(&self) -> Vec<AttachmentPoint> {
        match self.absolute_position {
            Some(offset) => self
                .attachment_points
                .iter()
                .map(|a| a.translated(offset))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Durable subset of this component.
    pub fn to_serialized(&self) -> SerializedDiagramComponent {
        SerializedDiagramComponent {
            id: self.id.clone(),
            shape: self.shape.clone(),
            position: self.position.clone(),
            relative_to_id: self.relative_to_id.clone(),
            attached_2d_shapes: self.attached_2d_shapes.clone(),
        }
    }
}

/// The persisted form of a component. Computed and transient fields are
/// rebuilt on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDiagramComponent {
    pub id: String,
    pub shape: String,
    pub position: String,
    pub relative_to_id: Option<String>,
    #[serde(rename = "attached2DShapes")]
    pub attached_2d_shapes: Vec<Attached2DShape>,
}

impl From<SerializedDiagramComponent> for DiagramComponent {
    fn from(data: SerializedDiagramComponent) -> Self {
        let mut component =
            DiagramComponent::with_id(data.id, data.shape, data.position, data.relative_to_id);
        component.attached_2d_shapes = data.attached_2d_shapes;
        component
    }
}

impl From<&DiagramComponent> for SerializedDiagramComponent {
    fn from(component: &DiagramComponent) -> Self {
        component.to_serialized()
    }
}
