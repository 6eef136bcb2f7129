//! Convex and concave hull construction.
//!
//! The concave hull starts from the convex hull and repeatedly "digs" long
//! edges toward the nearest interior point, in the manner of the
//! concaveman algorithm. `concavity` controls how deep the digging goes
//! (lower is more concave) and `length_threshold` stops digging edges that
//! are already short.

use isokit_core::Point;

const EPS: f64 = 1e-9;

fn dedup_points(points: &[Point]) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|q| q.distance_to(p) < EPS) {
            unique.push(*p);
        }
    }
    unique
}

fn turn(o: Point, a: Point, b: Point) -> f64 {
    (a - o).cross(&(b - o))
}

/// Convex hull by Andrew's monotone chain. Collinear points are dropped.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts = dedup_points(points);
    if pts.len() < 3 {
        return pts;
    }
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut lower: Vec<Point> = Vec::new();
    for p in &pts {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= EPS {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point> = Vec::new();
    for p in pts.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= EPS {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq < EPS {
        return p.distance_to(&a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&(a + ab.scale(t)))
}

fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = turn(q1, q2, p1);
    let d2 = turn(q1, q2, p2);
    let d3 = turn(p1, p2, q1);
    let d4 = turn(p1, p2, q2);
    ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
}

fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = turn(a, b, p);
    let d2 = turn(b, c, p);
    let d3 = turn(c, a, p);
    let has_neg = d1 < -EPS || d2 < -EPS || d3 < -EPS;
    let has_pos = d1 > EPS || d2 > EPS || d3 > EPS;
    !(has_neg && has_pos)
}

/// Whether replacing hull edge `i -> i+1` with `a -> p -> b` keeps the
/// polygon simple and every remaining interior point inside it.
fn can_dig(hull: &[Point], i: usize, p: Point, inner: &[Point], skip: usize) -> bool {
    let n = hull.len();
    let a = hull[i];
    let b = hull[(i + 1) % n];

    for k in 0..n {
        if k == i {
            continue;
        }
        let c = hull[k];
        let d = hull[(k + 1) % n];
        if segments_cross(a, p, c, d) || segments_cross(p, b, c, d) {
            return false;
        }
    }

    inner
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != skip)
        .all(|(_, q)| !in_triangle(*q, a, p, b))
}

/// Concave hull of a point set, returned as a closed polygon (last vertex
/// connects back to the first).
pub fn concave_hull(points: &[Point], concavity: f64, length_threshold: f64) -> Vec<Point> {
    let mut hull = convex_hull(points);
    if hull.len() < 3 {
        return hull;
    }
    let mut inner: Vec<Point> = dedup_points(points)
        .into_iter()
        .filter(|p| !hull.iter().any(|h| h.distance_to(p) < EPS))
        .collect();

    let concavity = concavity.max(EPS);
    let mut i = 0;
    while i < hull.len() && !inner.is_empty() {
        let n = hull.len();
        let a = hull[i];
        let b = hull[(i + 1) % n];
        let len = a.distance_to(&b);
        if len <= length_threshold {
            i += 1;
            continue;
        }
        let max_len = len / concavity;
        let prev = hull[(i + n - 1) % n];
        let next = hull[(i + 2) % n];

        let mut candidates: Vec<(usize, f64)> = inner
            .iter()
            .enumerate()
            .map(|(j, p)| (j, segment_distance(*p, a, b)))
            .filter(|(j, d)| {
                let p = inner[*j];
                *d <= segment_distance(p, prev, a) && *d <= segment_distance(p, b, next)
            })
            .collect();
        candidates.sort_by(|x, y| x.1.total_cmp(&y.1));

        let chosen = candidates.into_iter().find(|(j, _)| {
            let p = inner[*j];
            p.distance_to(&a).min(p.distance_to(&b)) <= max_len && can_dig(&hull, i, p, &inner, *j)
        });

        match chosen {
            Some((j, _)) => {
                let p = inner.remove(j);
                hull.insert(i + 1, p);
            }
            None => i += 1,
        }
    }
    hull
}
