//! Rectangular projection strategy.

use std::collections::HashMap;
use std::f64::consts::FRAC_PI_4;

use isokit_core::{BoundingBox, Point};

use super::{align_for, Align, LabelLayoutOptions, Pending};

fn diagram_bounds(bounds: &HashMap<String, BoundingBox>) -> Option<BoundingBox> {
    bounds.values().copied().reduce(|acc, b| acc.union(&b))
}

/// Point where the ray from `center` at `angle` meets the edge of `frame`
/// owning that angle's quadrant.
fn project(center: Point, angle: f64, frame: &BoundingBox) -> Point {
    let (sin, cos) = angle.sin_cos();
    let t = if (-FRAC_PI_4..FRAC_PI_4).contains(&angle) {
        (frame.right() - center.x) / cos
    } else if (FRAC_PI_4..3.0 * FRAC_PI_4).contains(&angle) {
        (frame.bottom() - center.y) / sin
    } else if (-3.0 * FRAC_PI_4..-FRAC_PI_4).contains(&angle) {
        (frame.top() - center.y) / sin
    } else {
        (frame.left() - center.x) / cos
    };
    center + Point::new(cos, sin).scale(t)
}

/// Projects each label outward by angle, sorted by angle, pushing it
/// further out while it sits within `min_spacing` of an earlier label.
/// After `max_adjust_attempts` pushes the last point is kept even if it
/// still clashes.
pub(super) fn place(
    pending: &[Pending<'_>],
    bounds: &HashMap<String, BoundingBox>,
    options: &LabelLayoutOptions,
) -> Vec<(Point, Align)> {
    let Some(diagram) = diagram_bounds(bounds) else {
        return Vec::new();
    };
    let center = diagram.center();
    let d = options.placement_distance;
    let frame = BoundingBox::new(
        diagram.x - d,
        diagram.y - d,
        diagram.width + 2.0 * d,
        diagram.height + 2.0 * d,
    );

    let angles: Vec<f64> = pending
        .iter()
        .map(|p| {
            let dir = p.bounds.center() - center;
            dir.y.atan2(dir.x)
        })
        .collect();
    let mut order: Vec<usize> = (0..pending.len()).collect();
    order.sort_by(|&a, &b| angles[a].total_cmp(&angles[b]));

    let mut placed: Vec<Point> = Vec::with_capacity(pending.len());
    let mut result = vec![(center, Align::Left); pending.len()];
    for index in order {
        let angle = angles[index];
        let step = Point::new(angle.cos(), angle.sin()).scale(options.min_spacing);
        let mut point = project(center, angle, &frame);

        let mut attempts = 0;
        while attempts < options.max_adjust_attempts
            && placed
                .iter()
                .any(|q| q.distance_to(&point) < options.min_spacing)
        {
            point = point + step;
            attempts += 1;
        }
        if attempts == options.max_adjust_attempts && attempts > 0 {
            tracing::debug!(
                component = %pending[index].request.component_id,
                attempts,
                "Label spacing budget exhausted, keeping last position"
            );
        }

        placed.push(point);
        result[index] = (point, align_for(point, center.x));
    }
    result
}
