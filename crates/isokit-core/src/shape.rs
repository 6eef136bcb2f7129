//! Shape templates.
//!
//! A `Shape` is an immutable library entry. Many diagram components may
//! reference the same template by name; the core never mutates one.

use serde::{Deserialize, Serialize};

/// Whether a template is an isometric block or a flat decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Flat overlay attached to one anchor of a 3D shape
    #[serde(rename = "2D")]
    Flat,
    /// Isometric block that participates in the scene graph
    #[serde(rename = "3D")]
    Block,
}

impl ShapeKind {
    /// Get kind as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Flat => "2D",
            ShapeKind::Block => "3D",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape library entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Unique template name
    pub name: String,
    /// Template kind
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// For 2D shapes, the name of the template's own anchor used when attaching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_to: Option<String>,
    /// Rendered markup with embedded anchor markers
    #[serde(default)]
    pub svg_content: String,
    /// Source file the markup was loaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_file: Option<String>,
}

impl Shape {
    /// Creates a 3D block template.
    pub fn block(name: impl Into<String>, svg_content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ShapeKind::Block,
            attach_to: None,
            svg_content: svg_content.into(),
            svg_file: None,
        }
    }

    /// Creates a 2D decoration template.
    pub fn flat(name: impl Into<String>, svg_content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ShapeKind::Flat,
            attach_to: None,
            svg_content: svg_content.into(),
            svg_file: None,
        }
    }

    /// Sets the decoration's own anchor name.
    pub fn with_attach_to(mut self, anchor: impl Into<String>) -> Self {
        self.attach_to = Some(anchor.into());
        self
    }

    pub fn is_block(&self) -> bool {
        self.kind == ShapeKind::Block
    }
}
