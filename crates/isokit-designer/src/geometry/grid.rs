//! Grid extraction for anchors that repeat across tiled or stacked layers.
//!
//! Raw points are projected onto two axes, the projections are clustered
//! into ordered levels, and every occupied (row, column) pair becomes one
//! representative point. Irregularly scattered points are not handled
//! specially; they simply produce sparse grids.

use isokit_core::Point;

use super::centroid;

/// Isometric axis running down and to the right (30° below horizontal).
pub const ISO_AXIS_U: Point = Point {
    x: 0.866_025_403_784_438_6,
    y: 0.5,
};

/// Isometric axis running down and to the left.
pub const ISO_AXIS_V: Point = Point {
    x: -0.866_025_403_784_438_6,
    y: 0.5,
};

/// One occupied grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Level index along the first axis
    pub row: usize,
    /// Level index along the second axis
    pub col: usize,
    /// Centroid of the raw points in this cell
    pub point: Point,
}

fn levels(values: &[f64], tolerance: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|a, b| values[*a].total_cmp(&values[*b]));

    let mut assigned = vec![0; values.len()];
    let mut level = 0;
    let mut last: Option<f64> = None;
    for idx in order {
        let v = values[idx];
        if let Some(prev) = last {
            if v - prev > tolerance {
                level += 1;
            }
        }
        assigned[idx] = level;
        last = Some(v);
    }
    assigned
}

/// Groups raw points into a rectangular grid along `axis_u` (rows) and
/// `axis_v` (columns). Cells are returned row-major.
pub fn grid_points(points: &[Point], axis_u: Point, axis_v: Point, tolerance: f64) -> Vec<GridCell> {
    if points.is_empty() {
        return Vec::new();
    }
    let u = axis_u.normalized();
    let v = axis_v.normalized();
    let rows = levels(&points.iter().map(|p| p.dot(&u)).collect::<Vec<_>>(), tolerance);
    let cols = levels(&points.iter().map(|p| p.dot(&v)).collect::<Vec<_>>(), tolerance);

    let mut cells: Vec<(usize, usize, Vec<Point>)> = Vec::new();
    for (i, p) in points.iter().enumerate() {
        match cells.iter_mut().find(|(r, c, _)| *r == rows[i] && *c == cols[i]) {
            Some((_, _, members)) => members.push(*p),
            None => cells.push((rows[i], cols[i], vec![*p])),
        }
    }
    cells.sort_by_key(|(r, c, _)| (*r, *c));
    cells
        .into_iter()
        .filter_map(|(row, col, members)| {
            centroid(&members).map(|point| GridCell { row, col, point })
        })
        .collect()
}

/// Addressable name of a cell: `{base}-a1`, `{base}-b2`, ... Rows past
/// `z` continue as `aa`, `ab`, ...
pub fn cell_name(base: &str, row: usize, col: usize) -> String {
    let mut letters = String::new();
    let mut r = row + 1;
    while r > 0 {
        r -= 1;
        letters.insert(0, (b'a' + (r % 26) as u8) as char);
        r /= 26;
    }
    format!("{base}-{letters}{}", col + 1)
}
