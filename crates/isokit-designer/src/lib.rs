//! # isokit Designer
//!
//! The isometric diagram engine: a relative-positioning scene graph of
//! isometric blocks, the attachment-point geometry that glues them
//! together, and the compiler that turns the graph into composed markup.
//!
//! ## Core Components
//!
//! - **Geometry**: centroids, concave hulls, hull smoothing, offsetting
//!   and isometric grid clustering
//! - **Attachment**: anchor extraction, normalization and subtree
//!   aggregation
//! - **Scene Graph**: position resolution and pure edit operations
//!   (add, remove, cut/copy/paste)
//! - **Compiler**: single-pass markup composition with 2D decorations
//! - **Label Layout**: rectangular and hull-following annotation placement
//! - **Libraries**: shape templates and reusable sub-assemblies
//! - **Designer State**: an editing session with undo/redo and file I/O
//!
//! ## Architecture
//!
//! ```text
//! ShapeLibrary + components
//!   └── Scene Graph (position resolution)
//!         └── Compiler (markup)
//!               └── Label Layout (annotations)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use isokit_designer::{DesignerState, ShapeLibrary};
//!
//! let mut state = DesignerState::new(ShapeLibrary::load_index(path)?);
//! let root = state.add_3d_shape("cube", "center", None);
//! state.select(root.as_deref());
//! state.add_3d_shape("cube", "top", None);
//! let svg = state.render_document();
//! ```

pub mod attachment;
pub mod compiler;
pub mod component;
pub mod component_library;
pub mod designer_state;
pub mod geometry;
pub mod label_layout;
pub mod markup;
pub mod scene_graph;
pub mod serialization;
pub mod shape_library;

pub use attachment::{
    aggregate_attachment_points, extract_attachment_points, find_anchor,
    update_available_attachment_points, AggregationOptions,
};
pub use compiler::{compile_diagram, CompiledDiagram};
pub use component::{
    new_component_id, Attached2DShape, DiagramComponent, SerializedDiagramComponent,
};
pub use component_library::{
    Component, ComponentLibrary, ComponentStore, JsonFileStore, LayeredShapeSource, MemoryStore,
};
pub use designer_state::DesignerState;
pub use label_layout::{
    component_bounds, layout_labels, wrap_text, Align, FixedWidthMetrics, LabelLayoutOptions,
    LabelRequest, LayoutStrategy, PlacedLabel, TextMetrics,
};
pub use scene_graph::{
    add_2d_shape, add_3d_component, add_3d_shape, calculate_absolute_position, cancel_cut,
    clone_subtree, copy_3d_shape, cut_3d_shape, find_closest_attachment_point,
    find_dependent_shapes, paste_copied_3d_shapes, paste_cut_3d_shapes, remove_2d_shape,
    remove_3d_shape, resolve_placement, validate_order, AttachmentChoice, Dependents,
    PositionMemo,
};
pub use serialization::{
    components_from_value, deserialize_components, serialize_components, DiagramFile,
    DiagramMetadata,
};
pub use shape_library::{ShapeLibrary, ShapeSource};

pub use isokit_core::{
    AttachmentPoint, BoundingBox, CanvasSize, DiagramError, LibraryError, Placement, Point,
    Shape, ShapeKind, ShapeLibraryError,
};
