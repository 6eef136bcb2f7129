//! # isokit Core
//!
//! Core types shared by every isokit crate.
//! Provides the value types of the diagram engine (points, canvas sizes,
//! bounding boxes, anchors and placements), the shape template model,
//! and the error taxonomy.

pub mod error;
pub mod shape;
pub mod types;

pub use error::{DiagramError, Error, LibraryError, Result, ShapeLibraryError};
pub use shape::{Shape, ShapeKind};
pub use types::{
    anchor_group, attach_name, is_anchor_name, AttachmentPoint, BoundingBox, CanvasSize,
    Placement, Point, ATTACH_PREFIX, NONE_ATTACHMENT,
};
