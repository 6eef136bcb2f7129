//! Attachment-point extraction, normalization and aggregation.
//!
//! Anchors come out of a shape's markup as raw, shape-local points. This
//! module turns them into the lists the UI offers (`["none", "top", ...]`)
//! and, for a whole subtree, into a reduced set of external anchors used
//! when a sub-assembly is saved as a reusable component.

use std::collections::{HashMap, HashSet};

use isokit_core::{
    anchor_group, attach_name, AttachmentPoint, Placement, Point, ATTACH_PREFIX, NONE_ATTACHMENT,
};

use crate::component::DiagramComponent;
use crate::geometry::{self, Compass, ISO_AXIS_U, ISO_AXIS_V};
use crate::markup;

/// Extracts every anchor marker from rendered markup.
pub fn extract_attachment_points(markup: &str) -> Vec<AttachmentPoint> {
    markup::anchor_markers(markup)
}

/// Attachment choices offered for a component, headed by the `"none"`
/// sentinel and deduplicated by semantic group.
pub fn update_available_attachment_points(component: &DiagramComponent) -> Vec<String> {
    let mut available = vec![NONE_ATTACHMENT.to_string()];
    for anchor in &component.attachment_points {
        let group = anchor.group();
        if !group.is_empty() && !available.contains(&group) {
            available.push(group);
        }
    }
    available
}

/// Looks an anchor up by position or name: an exact `attach-{position}`
/// match wins, otherwise the first anchor in the same semantic group.
pub fn find_anchor<'a>(points: &'a [AttachmentPoint], position: &str) -> Option<&'a AttachmentPoint> {
    let exact = attach_name(position);
    if let Some(found) = points.iter().find(|a| a.name == exact) {
        return Some(found);
    }
    let bare = position.strip_prefix(ATTACH_PREFIX).unwrap_or(position);
    points.iter().find(|a| a.group() == bare)
}

/// Tunables for [`aggregate_attachment_points`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationOptions {
    /// Concave hull concavity for the diagonal classes
    pub concavity: f64,
    /// Clustering tolerance for grids of non-standard anchors
    pub grid_tolerance: f64,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            concavity: 2.0,
            grid_tolerance: 2.0,
        }
    }
}

fn diagonal_compass(placement: Placement) -> Option<(Compass, Compass)> {
    match placement {
        Placement::FrontLeft => Some((Compass::West, Compass::South)),
        Placement::FrontRight => Some((Compass::South, Compass::East)),
        Placement::BackRight => Some((Compass::East, Compass::North)),
        Placement::BackLeft => Some((Compass::North, Compass::West)),
        _ => None,
    }
}

/// Names of anchors used by joints inside the subtree, per component id.
fn internal_anchors(components: &[DiagramComponent]) -> HashMap<&str, HashSet<String>> {
    let by_id: HashMap<&str, &DiagramComponent> =
        components.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut internal: HashMap<&str, HashSet<String>> = HashMap::new();

    for child in components {
        let Some(parent) = child
            .relative_to_id
            .as_deref()
            .and_then(|id| by_id.get(id))
        else {
            continue;
        };
        if let Some(anchor) = find_anchor(&parent.attachment_points, &child.position) {
            internal
                .entry(parent.id.as_str())
                .or_default()
                .insert(anchor.name.clone());
        }
        if let Some(own) = Placement::parse(&child.position)
            .child_anchor()
            .and_then(|name| find_anchor(&child.attachment_points, name))
        {
            internal
                .entry(child.id.as_str())
                .or_default()
                .insert(own.name.clone());
        }
    }
    internal
}

/// Aggregates the exposed anchors of a compiled subtree into one external
/// anchor set in canvas coordinates.
///
/// Diagonal classes collapse to the centroid of the matching concave-hull
/// segment, `top`/`bottom` to a plain centroid, and non-standard anchors to
/// a grid of named cells. Classes with no exposed points are omitted.
pub fn aggregate_attachment_points(
    components: &[DiagramComponent],
    options: &AggregationOptions,
) -> Vec<AttachmentPoint> {
    let internal = internal_anchors(components);
    let mut standard: Vec<(Placement, Vec<Point>)> = Vec::new();
    let mut custom: Vec<(String, Vec<Point>)> = Vec::new();

    for component in components {
        let hidden = internal.get(component.id.as_str());
        for anchor in component.global_attachment_points() {
            if hidden.is_some_and(|names| names.contains(&anchor.name)) {
                continue;
            }
            match Placement::parse(&anchor.name) {
                Placement::Custom | Placement::Center => {
                    let group = anchor_group(&anchor.name);
                    match custom.iter_mut().find(|(g, _)| *g == group) {
                        Some((_, pts)) => pts.push(anchor.point()),
                        None => custom.push((group, vec![anchor.point()])),
                    }
                }
                placement => match standard.iter_mut().find(|(p, _)| *p == placement) {
                    Some((_, pts)) => pts.push(anchor.point()),
                    None => standard.push((placement, vec![anchor.point()])),
                },
            }
        }
    }

    let mut aggregated = Vec::new();
    for (placement, points) in standard {
        let Some(keyword) = placement.as_str() else {
            continue;
        };
        let representative = match diagonal_compass(placement) {
            Some((from, to)) => {
                let hull = geometry::concave_hull(&points, options.concavity, 0.0);
                let segment = geometry::hull_segment(&hull, from, to);
                geometry::centroid(&segment)
            }
            None => geometry::centroid(&points),
        };
        if let Some(p) = representative {
            aggregated.push(AttachmentPoint::new(attach_name(keyword), p.x, p.y));
        }
    }

    for (group, points) in custom {
        let base = attach_name(&group);
        let cells = geometry::grid_points(&points, ISO_AXIS_U, ISO_AXIS_V, options.grid_tolerance);
        if let [single] = cells.as_slice() {
            aggregated.push(AttachmentPoint::new(base, single.point.x, single.point.y));
            continue;
        }
        for cell in cells {
            aggregated.push(AttachmentPoint::new(
                geometry::cell_name(&base, cell.row, cell.col),
                cell.point.x,
                cell.point.y,
            ));
        }
    }
    aggregated
}
