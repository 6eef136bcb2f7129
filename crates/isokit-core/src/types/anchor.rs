//! Anchor naming conventions.
//!
//! Anchors are named coordinates baked into a shape's markup. Names that
//! start with [`ATTACH_PREFIX`] are anchors; the tokens after the prefix
//! carry the isometric semantics (`top`, `front-left-3`, `shelf-a1`, ...).

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Reserved prefix of every anchor marker id.
pub const ATTACH_PREFIX: &str = "attach-";

/// Sentinel meaning "no specific anchor, use the position default".
pub const NONE_ATTACHMENT: &str = "none";

/// A named anchor coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl AttachmentPoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Semantic group of this anchor, see [`anchor_group`].
    pub fn group(&self) -> String {
        anchor_group(&self.name)
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: Point) -> AttachmentPoint {
        AttachmentPoint::new(self.name.clone(), self.x + offset.x, self.y + offset.y)
    }
}

pub fn is_anchor_name(name: &str) -> bool {
    name.starts_with(ATTACH_PREFIX)
}

/// Full marker id for a position or group name.
pub fn attach_name(position: &str) -> String {
    if is_anchor_name(position) {
        position.to_string()
    } else {
        format!("{ATTACH_PREFIX}{position}")
    }
}

/// Coarse semantic group of a raw anchor name: the first two dash-separated
/// tokens after the prefix (`attach-front-left-3` -> `front-left`).
pub fn anchor_group(name: &str) -> String {
    let bare = name.strip_prefix(ATTACH_PREFIX).unwrap_or(name);
    bare.split('-')
        .filter(|t| !t.is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join("-")
}

/// How a component is placed against its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Center,
    Top,
    Bottom,
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
    /// Any other anchor name; treated as a stacking surface
    Custom,
}

impl Placement {
    /// Classifies a position keyword or anchor name by its leading tokens.
    pub fn parse(position: &str) -> Placement {
        let bare = position.strip_prefix(ATTACH_PREFIX).unwrap_or(position);
        let mut tokens = bare.split('-');
        match (tokens.next(), tokens.next()) {
            (Some("center"), _) => Placement::Center,
            (Some("top"), _) => Placement::Top,
            (Some("bottom"), _) => Placement::Bottom,
            (Some("front"), Some("left")) => Placement::FrontLeft,
            (Some("front"), Some("right")) => Placement::FrontRight,
            (Some("back"), Some("left")) => Placement::BackLeft,
            (Some("back"), Some("right")) => Placement::BackRight,
            _ => Placement::Custom,
        }
    }

    /// Keyword of a standard placement.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Placement::Center => Some("center"),
            Placement::Top => Some("top"),
            Placement::Bottom => Some("bottom"),
            Placement::FrontLeft => Some("front-left"),
            Placement::FrontRight => Some("front-right"),
            Placement::BackLeft => Some("back-left"),
            Placement::BackRight => Some("back-right"),
            Placement::Custom => None,
        }
    }

    /// The child's own anchor that must meet the parent's anchor.
    ///
    /// A block placed front-left of its parent presents its back-right face
    /// toward the parent, and so on around the diagonals.
    pub fn child_anchor(&self) -> Option<&'static str> {
        match self {
            Placement::Center => None,
            Placement::Top | Placement::Custom => Some("attach-bottom"),
            Placement::Bottom => Some("attach-top"),
            Placement::FrontLeft => Some("attach-back-right"),
            Placement::FrontRight => Some("attach-back-left"),
            Placement::BackLeft => Some("attach-front-right"),
            Placement::BackRight => Some("attach-front-left"),
        }
    }

    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            Placement::FrontLeft | Placement::FrontRight | Placement::BackLeft | Placement::BackRight
        )
    }
}
