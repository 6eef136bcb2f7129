//! Geometry utilities for attachment aggregation and label layout.
//!
//! Pure functions over point sets: centroids, concave hulls, hull
//! smoothing, polygon offsetting, and grid extraction.

pub mod grid;
pub mod hull;
pub mod path;

pub use grid::{cell_name, grid_points, GridCell, ISO_AXIS_U, ISO_AXIS_V};
pub use hull::{concave_hull, convex_hull};
pub use path::{offset_polygon, resample_polygon, smooth_polygon};

use isokit_core::Point;

/// Arithmetic mean of a point set.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
    Some(Point::new(sum.x / n, sum.y / n))
}

/// Shoelace signed area. Positive for counter-clockwise in y-up axes,
/// which is clockwise on a y-down screen.
pub fn signed_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area / 2.0
}

/// Screen compass directions (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    East,
    South,
    West,
}

impl Compass {
    pub fn vector(&self) -> Point {
        match self {
            Compass::North => Point::new(0.0, -1.0),
            Compass::East => Point::new(1.0, 0.0),
            Compass::South => Point::new(0.0, 1.0),
            Compass::West => Point::new(-1.0, 0.0),
        }
    }
}

/// Index of the most extreme point in a compass direction. Ties keep the
/// first occurrence.
pub fn extreme_index(points: &[Point], compass: Compass) -> Option<usize> {
    let dir = compass.vector();
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let score = p.dot(&dir);
        if best.is_none_or(|(_, s)| score > s + 1e-9) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

/// Sub-path of a closed hull running between its `from` and `to` extremes.
///
/// Of the two arcs joining the extremes, the one bulging toward the
/// combined direction of both compass points is returned, endpoints
/// included.
pub fn hull_segment(hull: &[Point], from: Compass, to: Compass) -> Vec<Point> {
    let (Some(start), Some(end)) = (extreme_index(hull, from), extreme_index(hull, to)) else {
        return Vec::new();
    };
    if start == end {
        return vec![hull[start]];
    }

    let n = hull.len();
    let walk = |step: usize| {
        let mut arc = vec![hull[start]];
        let mut i = start;
        while i != end {
            i = (i + step) % n;
            arc.push(hull[i]);
        }
        arc
    };
    let forward = walk(1);
    let backward = walk(n - 1);

    let bulge = from.vector() + to.vector();
    let score = |arc: &[Point]| {
        centroid(arc)
            .map(|c| c.dot(&bulge))
            .unwrap_or(f64::NEG_INFINITY)
    };
    if score(&forward) >= score(&backward) {
        forward
    } else {
        backward
    }
}
