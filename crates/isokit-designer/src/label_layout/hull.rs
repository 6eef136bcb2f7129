//! Hull-following strategy.

use std::collections::HashMap;

use isokit_core::{BoundingBox, Point};

use super::{align_for, Align, LabelLayoutOptions, Pending};
use crate::geometry;

/// Closed path of candidate label positions: the concave hull of every
/// component box corner, smoothed, pushed outward and resampled.
pub(super) fn placement_path(
    bounds: &HashMap<String, BoundingBox>,
    options: &LabelLayoutOptions,
) -> Vec<Point> {
    let mut corners: Vec<Point> = bounds.values().flat_map(|b| b.corners()).collect();
    corners.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let hull = geometry::concave_hull(&corners, options.concavity, 0.0);
    let smoothed = geometry::smooth_polygon(&hull, options.smoothing_angle);
    let grown = geometry::offset_polygon(&smoothed, options.placement_distance);
    geometry::resample_polygon(&grown, options.smoothing_step)
}

fn well_spaced(candidate: Point, occupied: &[Point], options: &LabelLayoutOptions) -> bool {
    occupied.iter().all(|q| {
        (candidate.x - q.x).abs() >= options.min_spacing_x
            || (candidate.y - q.y).abs() >= options.min_spacing_y
    })
}

/// Assigns each label, in request order, the nearest free path vertex that
/// keeps the X/Y spacing to every occupied vertex. When no vertex does,
/// the farthest candidate scanned is taken anyway.
pub(super) fn place(
    pending: &[Pending<'_>],
    bounds: &HashMap<String, BoundingBox>,
    options: &LabelLayoutOptions,
) -> Vec<(Point, Align)> {
    let path = placement_path(bounds, options);
    let mut taken = vec![false; path.len()];
    let mut occupied: Vec<Point> = Vec::with_capacity(pending.len());
    let mut result = Vec::with_capacity(pending.len());

    for p in pending {
        let center = p.bounds.center();
        let mut candidates: Vec<usize> = (0..path.len()).filter(|&i| !taken[i]).collect();
        candidates.sort_by(|&a, &b| {
            path[a]
                .distance_to(&center)
                .total_cmp(&path[b].distance_to(&center))
        });

        let chosen = candidates
            .iter()
            .copied()
            .find(|&i| well_spaced(path[i], &occupied, options))
            .or_else(|| candidates.last().copied());

        let point = match chosen {
            Some(i) => {
                taken[i] = true;
                path[i]
            }
            None => {
                tracing::warn!(
                    component = %p.request.component_id,
                    vertices = path.len(),
                    "Placement path exhausted, labelling at component center"
                );
                center
            }
        };
        occupied.push(point);
        result.push((point, align_for(point, center.x)));
    }
    result
}
