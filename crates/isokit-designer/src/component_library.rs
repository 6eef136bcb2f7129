//! # Component Library
//!
//! Reusable sub-assemblies: a saved scene subgraph that can be placed
//! elsewhere as a single opaque shape.
//!
//! Features:
//! - Name-unique registry keyed by UUID
//! - Aggregated external anchors computed once at creation
//! - Rendering to a self-contained template with internal anchors removed
//! - Full-snapshot persistence on every mutation through [`ComponentStore`]
//! - JSON export/import for sharing

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use isokit_core::{AttachmentPoint, CanvasSize, LibraryError, Shape, ShapeKind};
use serde::{Deserialize, Serialize};

use crate::attachment::{aggregate_attachment_points, AggregationOptions};
use crate::compiler::compile_diagram;
use crate::component::{DiagramComponent, SerializedDiagramComponent};
use crate::markup;
use crate::scene_graph::clone_subtree;
use crate::shape_library::ShapeSource;

/// Library components may contain other library components; nesting
/// deeper than this is treated as a cycle.
const MAX_NESTING: usize = 8;

/// A saved sub-assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique component identifier
    pub id: String,
    /// Unique display name
    pub name: String,
    pub description: String,
    /// Private copy of the subgraph, rooted at its first entry
    pub diagram_components: Vec<SerializedDiagramComponent>,
    /// External anchors relative to the subgraph root
    pub attachment_points: Vec<AttachmentPoint>,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl Component {
    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// The stored subgraph as live components.
    pub fn scene(&self) -> Vec<DiagramComponent> {
        self.diagram_components
            .iter()
            .cloned()
            .map(DiagramComponent::from)
            .collect()
    }
}

/// Persistence backend for the library.
pub trait ComponentStore {
    /// Every stored component
    fn load(&self) -> Result<Vec<Component>, LibraryError>;
    /// Replace the stored snapshot
    fn save(&self, components: &[Component]) -> Result<(), LibraryError>;
}

/// Stores the whole library as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ComponentStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Component>, LibraryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, components: &[Component]) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(components)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-process store. Clones share the same snapshot, so a test can keep a
/// handle and inspect what the library persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<Mutex<Vec<Component>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last persisted snapshot
    pub fn snapshot(&self) -> Vec<Component> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of snapshots written so far
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ComponentStore for MemoryStore {
    fn load(&self) -> Result<Vec<Component>, LibraryError> {
        Ok(self.snapshot())
    }

    fn save(&self, components: &[Component]) -> Result<(), LibraryError> {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = components.to_vec();
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Registry of reusable components.
pub struct ComponentLibrary {
    components: HashMap<String, Component>,
    store: Box<dyn ComponentStore>,
    aggregation: AggregationOptions,
    anchor_radius: f64,
}

impl std::fmt::Debug for ComponentLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentLibrary")
            .field("components", &self.components.len())
            .field("aggregation", &self.aggregation)
            .finish()
    }
}

impl Default for ComponentLibrary {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl ComponentLibrary {
    /// Empty library writing to `store`; existing contents are not read.
    pub fn new(store: impl ComponentStore + 'static) -> Self {
        Self {
            components: HashMap::new(),
            store: Box::new(store),
            aggregation: AggregationOptions::default(),
            anchor_radius: 2.0,
        }
    }

    /// Library backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Library initialised from what `store` already holds.
    pub fn open(store: impl ComponentStore + 'static) -> Result<Self, LibraryError> {
        let mut library = Self::new(store);
        for component in library.store.load()? {
            library.components.insert(component.id.clone(), component);
        }
        tracing::debug!(components = library.components.len(), "Opened component library");
        Ok(library)
    }

    pub fn with_aggregation(mut self, options: AggregationOptions) -> Self {
        self.aggregation = options;
        self
    }

    /// Radius of the anchor markers injected by [`Self::render_component`].
    pub fn with_anchor_radius(mut self, radius: f64) -> Self {
        self.anchor_radius = radius;
        self
    }

    /// Saves a copy of `components` under `name`.
    ///
    /// The first entry becomes the component's root; every entry gets a
    /// fresh id. An existing name is an error unless `overwrite` is set,
    /// in which case the entry keeps its id and creation time.
    pub fn create_component(
        &mut self,
        name: &str,
        description: &str,
        components: &[DiagramComponent],
        shapes: &dyn ShapeSource,
        overwrite: bool,
    ) -> Result<&Component, LibraryError> {
        if components.is_empty() {
            return Err(LibraryError::EmptyComponent);
        }
        let existing = self.get_by_name(name).map(|c| (c.id.clone(), c.created));
        if existing.is_some() && !overwrite {
            return Err(LibraryError::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut subgraph = clone_subtree(components);
        subgraph[0].relative_to_id = None;
        subgraph[0].position = "center".to_string();

        let canvas = CanvasSize::default();
        let compiled = compile_diagram(&subgraph, canvas, shapes, false);
        let origin = canvas.center();
        let attachment_points = aggregate_attachment_points(&compiled.processed_components, &self.aggregation)
            .into_iter()
            .map(|a| a.translated(origin.scale(-1.0)))
            .collect();

        let now = Utc::now();
        let (id, created) = existing.unwrap_or_else(|| (uuid::Uuid::new_v4().to_string(), now));
        let component = Component {
            id: id.clone(),
            name: name.to_string(),
            description: description.to_string(),
            diagram_components: subgraph.iter().map(DiagramComponent::to_serialized).collect(),
            attachment_points,
            created,
            last_modified: now,
        };
        tracing::debug!(id = %id, name, parts = subgraph.len(), "Saved library component");
        self.components.insert(id.clone(), component);
        self.persist();
        self.components
            .get(&id)
            .ok_or(LibraryError::NotFound { id })
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Component> {
        self.components.values().find(|c| c.name == name)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Every component, sorted by name
    pub fn list(&self) -> Vec<&Component> {
        let mut all: Vec<&Component> = self.components.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<(), LibraryError> {
        if self.components.values().any(|c| c.name == name && c.id != id) {
            return Err(LibraryError::DuplicateName {
                name: name.to_string(),
            });
        }
        let component = self.get_mut(id)?;
        component.name = name.to_string();
        component.touch();
        self.persist();
        Ok(())
    }

    pub fn update_description(&mut self, id: &str, description: &str) -> Result<(), LibraryError> {
        let component = self.get_mut(id)?;
        component.description = description.to_string();
        component.touch();
        self.persist();
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Component, LibraryError> {
        let removed = self
            .components
            .remove(id)
            .ok_or_else(|| LibraryError::NotFound { id: id.to_string() })?;
        self.persist();
        Ok(removed)
    }

    /// Renders a component as a standalone template.
    ///
    /// The stored subgraph is recompiled with its root at the local
    /// origin, every internal anchor marker and id is stripped, and only
    /// the aggregated external anchors are put back.
    pub fn render_component(
        &self,
        id: &str,
        shapes: &dyn ShapeSource,
        show_anchors: bool,
    ) -> Result<String, LibraryError> {
        let component = self
            .get(id)
            .ok_or_else(|| LibraryError::NotFound { id: id.to_string() })?;

        let canvas = CanvasSize::default();
        let compiled = compile_diagram(&component.scene(), canvas, shapes, false);
        let body = markup::strip_ids(&markup::strip_anchors(&compiled.content));

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g transform=\"{}\">{}</g>",
            markup::translate(canvas.center().scale(-1.0)),
            body
        );
        for anchor in &component.attachment_points {
            svg.push_str(&markup::anchor_marker(anchor, self.anchor_radius, show_anchors));
        }
        svg.push_str("</svg>");
        Ok(svg)
    }

    /// A component rendered as a 3D shape template named by its id.
    pub fn component_shape(&self, id: &str, shapes: &dyn ShapeSource) -> Result<Shape, LibraryError> {
        let svg = self.render_component(id, shapes, false)?;
        Ok(Shape {
            name: id.to_string(),
            kind: ShapeKind::Block,
            attach_to: None,
            svg_content: svg,
            svg_file: None,
        })
    }

    /// Every component as a JSON array, sorted by name.
    pub fn export_json(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    /// Merges components from a JSON export. Name clashes are skipped
    /// unless `overwrite` is set. Returns the number of components added
    /// or replaced.
    pub fn import_json(&mut self, json: &str, overwrite: bool) -> Result<usize, LibraryError> {
        let incoming: Vec<Component> = serde_json::from_str(json)?;
        let mut imported = 0;
        for component in incoming {
            let clash = self
                .get_by_name(&component.name)
                .filter(|existing| existing.id != component.id)
                .map(|existing| existing.id.clone());
            match clash {
                Some(_) if !overwrite => {
                    tracing::warn!(name = %component.name, "Skipping imported component with existing name");
                    continue;
                }
                Some(old_id) => {
                    self.components.remove(&old_id);
                }
                None => {}
            }
            self.components.insert(component.id.clone(), component);
            imported += 1;
        }
        if imported > 0 {
            self.persist();
        }
        Ok(imported)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Component, LibraryError> {
        self.components
            .get_mut(id)
            .ok_or_else(|| LibraryError::NotFound { id: id.to_string() })
    }

    /// Writes the full snapshot. Failures are logged, never returned.
    fn persist(&self) {
        let snapshot: Vec<Component> = self.list().into_iter().cloned().collect();
        if let Err(e) = self.store.save(&snapshot) {
            tracing::error!(error = %e, components = snapshot.len(), "Failed to persist component library");
        }
    }
}

/// Looks shapes up in a shape source first and then in a component
/// library, rendering library components on demand.
#[derive(Clone, Copy)]
pub struct LayeredShapeSource<'a> {
    shapes: &'a dyn ShapeSource,
    components: &'a ComponentLibrary,
    depth: usize,
}

impl<'a> LayeredShapeSource<'a> {
    pub fn new(shapes: &'a dyn ShapeSource, components: &'a ComponentLibrary) -> Self {
        Self {
            shapes,
            components,
            depth: 0,
        }
    }
}

impl ShapeSource for LayeredShapeSource<'_> {
    fn shape(&self, name: &str) -> Option<Cow<'_, Shape>> {
        if let Some(shape) = self.shapes.shape(name) {
            return Some(shape);
        }
        if !self.components.contains(name) {
            return None;
        }
        if self.depth >= MAX_NESTING {
            tracing::warn!(component = name, "Library components nested too deeply, skipping");
            return None;
        }
        let nested = LayeredShapeSource {
            depth: self.depth + 1,
            ..*self
        };
        match self.components.component_shape(name, &nested) {
            Ok(shape) => Some(Cow::Owned(shape)),
            Err(e) => {
                tracing::warn!(component = name, error = %e, "Failed to render library component");
                None
            }
        }
    }
}
