//! # Shape Library
//!
//! Read-only store of shape templates keyed by name. A library is built
//! once (in code or from a JSON index) and then shared by every component
//! that references its shapes.
//!
//! Index format:
//! ```json
//! [
//!   { "name": "cube", "type": "3D", "svgFile": "cube.svg" },
//!   { "name": "label", "type": "2D", "attachTo": "attach-bottom", "svgContent": "<g>..</g>" }
//! ]
//! ```
//! `svgFile` paths are resolved relative to the index file.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use isokit_core::{Shape, ShapeKind, ShapeLibraryError};

/// Lookup of shape templates by name, as consumed by the compiler.
pub trait ShapeSource {
    /// The template registered under `name`, if any.
    fn shape(&self, name: &str) -> Option<Cow<'_, Shape>>;
}

/// Shape templates in registration order.
#[derive(Debug, Clone, Default)]
pub struct ShapeLibrary {
    shapes: Vec<Shape>,
    by_name: HashMap<String, usize>,
}

impl ShapeLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from templates, rejecting duplicate names.
    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Result<Self, ShapeLibraryError> {
        let mut library = Self::new();
        for shape in shapes {
            library.add(shape)?;
        }
        Ok(library)
    }

    /// Register a template
    pub fn add(&mut self, shape: Shape) -> Result<(), ShapeLibraryError> {
        if self.by_name.contains_key(&shape.name) {
            return Err(ShapeLibraryError::DuplicateShape { name: shape.name });
        }
        self.by_name.insert(shape.name.clone(), self.shapes.len());
        self.shapes.push(shape);
        Ok(())
    }

    /// Parse a JSON index, reading `svgFile` entries relative to `base_dir`.
    pub fn from_index_json(json: &str, base_dir: &Path) -> Result<Self, ShapeLibraryError> {
        let entries: Vec<Shape> = serde_json::from_str(json)?;
        let mut library = Self::new();
        for mut shape in entries {
            if shape.svg_content.trim().is_empty() {
                let Some(file) = shape.svg_file.as_deref() else {
                    return Err(ShapeLibraryError::MissingContent { name: shape.name });
                };
                shape.svg_content = std::fs::read_to_string(base_dir.join(file))?;
            }
            library.add(shape)?;
        }
        tracing::debug!(shapes = library.len(), "Loaded shape library index");
        Ok(library)
    }

    /// Load a JSON index file from disk.
    pub fn load_index(path: &Path) -> Result<Self, ShapeLibraryError> {
        let json = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_index_json(&json, base_dir)
    }

    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.by_name.get(name).map(|&i| &self.shapes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Templates in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Templates of one kind, for palette listings
    pub fn shapes_of_kind(&self, kind: ShapeKind) -> Vec<&Shape> {
        self.shapes.iter().filter(|s| s.kind == kind).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.shapes.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl ShapeSource for ShapeLibrary {
    fn shape(&self, name: &str) -> Option<Cow<'_, Shape>> {
        self.get(name).map(Cow::Borrowed)
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for &S {
    fn shape(&self, name: &str) -> Option<Cow<'_, Shape>> {
        (**self).shape(name)
    }
}
