//! Closed-path operations: corner smoothing, resampling and outward offset.


use std::panic;

use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use isokit_core::Point;

use super::{centroid, signed_area};

/// Turn angle at `v` in degrees: 0 for a straight continuation, 180 for a
/// full reversal.
fn turn_angle(prev: Point, v: Point, next: Point) -> f64 {
    let d1 = (v - prev).normalized();
    let d2 = (next - v).normalized();
    if d1 == Point::ORIGIN || d2 == Point::ORIGIN {
        return 0.0;
    }
    d1.dot(&d2).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Removes vertices whose turn is sharper than `max_turn_degrees`, one at
/// a time (sharpest first) until none remain or only a triangle is left.
pub fn smooth_polygon(polygon: &[Point], max_turn_degrees: f64) -> Vec<Point> {
    let mut points = polygon.to_vec();
    while points.len() > 3 {
        let n = points.len();
        let sharpest = (0..n)
            .map(|i| (i, turn_angle(points[(i + n - 1) % n], points[i], points[(i + 1) % n])))
            .filter(|(_, angle)| *angle > max_turn_degrees)
            .max_by(|a, b| a.1.total_cmp(&b.1));
        match sharpest {
            Some((i, _)) => {
                points.remove(i);
            }
            None => break,
        }
    }
    points
}

/// Inserts evenly spaced vertices along every edge so that no two
/// consecutive vertices are more than `step` apart. Original vertices are
/// kept.
pub fn resample_polygon(polygon: &[Point], step: f64) -> Vec<Point> {
    if step <= 0.0 || polygon.len() < 2 {
        return polygon.to_vec();
    }
    let n = polygon.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        out.push(a);
        let len = a.distance_to(&b);
        let pieces = (len / step).ceil() as usize;
        for k in 1..pieces {
            let t = k as f64 / pieces as f64;
            out.push(a + (b - a).scale(t));
        }
    }
    out
}

/// Radial push away from the centroid, for inputs too thin to offset.
fn push_from_centroid(polygon: &[Point], distance: f64) -> Vec<Point> {
    let Some(center) = centroid(polygon) else {
        return Vec::new();
    };
    polygon
        .iter()
        .map(|p| {
            let dir = (*p - center).normalized();
            let dir = if dir == Point::ORIGIN {
                Point::new(0.0, -1.0)
            } else {
                dir
            };
            *p + dir.scale(distance)
        })
        .collect()
}

fn closed_polyline(polygon: &[Point]) -> Polyline<f64> {
    let mut points: Vec<Point> = Vec::with_capacity(polygon.len());
    for p in polygon {
        if points.last().is_none_or(|q| q.distance_to(p) > 1e-5) {
            points.push(*p);
        }
    }
    if points.len() > 1 && points[0].distance_to(&points[points.len() - 1]) <= 1e-5 {
        points.pop();
    }

    let mut pline = Polyline::new();
    for p in points {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(true);
    pline
}

/// Vertices of a closed polyline with every arc segment flattened into
/// `ARC_SEGMENTS` chords.
fn flatten(pline: &Polyline<f64>) -> Vec<Point> {
    const ARC_SEGMENTS: usize = 8;

    let count = pline.vertex_count();
    let mut points = Vec::with_capacity(count * 2);
    for i in 0..count {
        let v1 = pline.at(i);
        let v2 = pline.at((i + 1) % count);
        points.push(Point::new(v1.x, v1.y));

        if v1.bulge.abs() <= 1e-5 {
            continue;
        }
        let theta = 4.0 * v1.bulge.atan();
        let chord = Point::new(v2.x - v1.x, v2.y - v1.y);
        let chord_len = chord.length();
        if chord_len <= 1e-5 {
            continue;
        }
        let radius = chord_len / (2.0 * (theta / 2.0).sin());
        let to_center = radius.abs() * (theta.abs() / 2.0).cos();
        let normal = Point::new(-chord.y / chord_len, chord.x / chord_len);
        let sign = if v1.bulge > 0.0 { 1.0 } else { -1.0 };
        let mid = Point::new((v1.x + v2.x) / 2.0, (v1.y + v2.y) / 2.0);
        let center = mid + normal.scale(to_center * sign);

        let start = (v1.y - center.y).atan2(v1.x - center.x);
        for j in 1..ARC_SEGMENTS {
            let angle = start + theta * j as f64 / ARC_SEGMENTS as f64;
            points.push(center + Point::new(angle.cos(), angle.sin()).scale(radius.abs()));
        }
    }
    points
}

/// Grows a closed polygon by `distance` with a true parallel offset:
/// concave notches narrower than twice the distance close up and convex
/// corners are rounded. Inputs with fewer than three vertices or no area
/// are pushed away from their centroid instead.
pub fn offset_polygon(polygon: &[Point], distance: f64) -> Vec<Point> {
    if polygon.len() < 3 || signed_area(polygon).abs() < 1e-9 {
        return push_from_centroid(polygon, distance);
    }

    let mut ordered = polygon.to_vec();
    if signed_area(&ordered) < 0.0 {
        ordered.reverse();
    }
    let pline = closed_polyline(&ordered);

    // The grown loop is the one enclosing the most area.
    let outer = [-distance, distance]
        .into_iter()
        .flat_map(|d| {
            panic::catch_unwind(panic::AssertUnwindSafe(|| pline.parallel_offset(d)))
                .unwrap_or_else(|_| {
                    tracing::warn!(distance = d, "Parallel offset failed");
                    Vec::new()
                })
        })
        .max_by(|a, b| a.area().abs().total_cmp(&b.area().abs()));

    match outer {
        Some(outer) if outer.area().abs() > signed_area(&ordered).abs() => flatten(&outer),
        _ => {
            tracing::warn!(vertices = polygon.len(), "No outward offset, pushing from centroid");
            push_from_centroid(polygon, distance)
        }
    }
}
