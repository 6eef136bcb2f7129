//! Value types shared across the isokit crates.

pub mod anchor;
pub mod geometry;

pub use anchor::{
    anchor_group, attach_name, is_anchor_name, AttachmentPoint, Placement, ATTACH_PREFIX,
    NONE_ATTACHMENT,
};
pub use geometry::{BoundingBox, CanvasSize, Point};
