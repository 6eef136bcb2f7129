//! Click-to-attach lookup.

use isokit_core::{Placement, Point, ATTACH_PREFIX, NONE_ATTACHMENT};

use crate::component::DiagramComponent;

/// Placement decoded from the anchor nearest to a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentChoice {
    /// Placement keyword (`top`, `front-left`, ...)
    pub position: String,
    /// Anchor name without the `attach-` prefix, or `"none"`
    pub attachment_point: String,
}

impl Default for AttachmentChoice {
    fn default() -> Self {
        Self {
            position: "top".to_string(),
            attachment_point: NONE_ATTACHMENT.to_string(),
        }
    }
}

fn bare_name(name: &str) -> &str {
    name.strip_prefix(ATTACH_PREFIX).unwrap_or(name)
}

/// Nearest user-attachable anchor to a click in the component's local
/// space. Anchors whose first token is `bottom` or `back` face away from
/// the viewer and are never offered; custom names such as `backdrop` are.
pub fn find_closest_attachment_point(click: Point, component: &DiagramComponent) -> AttachmentChoice {
    let nearest = component
        .attachment_points
        .iter()
        .filter(|a| !matches!(bare_name(&a.name).split('-').next(), Some("bottom" | "back")))
        .min_by(|a, b| {
            a.point()
                .distance_to(&click)
                .total_cmp(&b.point().distance_to(&click))
        });

    let Some(anchor) = nearest else {
        return AttachmentChoice::default();
    };

    let bare = bare_name(&anchor.name);
    let placement = Placement::parse(bare);
    let position = match placement.as_str() {
        Some(keyword) if placement.is_diagonal() => keyword.to_string(),
        _ => bare
            .split('-')
            .next()
            .filter(|t| !t.is_empty())
            .unwrap_or("top")
            .to_string(),
    };
    AttachmentChoice {
        position,
        attachment_point: bare.to_string(),
    }
}
