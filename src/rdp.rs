//! Ramer-Douglas-Peucker polyline reduction.
//!
//! Walls exported from a dd2vtt scene are dense chains of points. Most of them are
//! collinear noise that only bloats the generated OpenSCAD file, so each wall is
//! reduced before it is written out.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct V2 {
    pub x: f64,
    pub y: f64,
}

impl V2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for V2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

pub type Polyline = Vec<V2>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: V2, b: V2) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Perpendicular distance from `point` to the infinite line through `start` and `end`.
///
/// A zero-length segment collapses to a point and the plain distance to `start` is
/// returned instead. The same fallback is taken when the segment is so short that its
/// length underflows (subnormal or zero after rounding), which would otherwise blow the
/// quotient up to infinity.
pub fn point_line_distance(point: V2, start: V2, end: V2) -> f64 {
    if start == end {
        return distance(point, start);
    }

    let n = ((end.x - start.x) * (start.y - point.y) - (start.x - point.x) * (end.y - start.y)).abs();
    let d = distance(start, end);
    if d < f64::MIN_POSITIVE {
        return distance(point, start);
    }

    let dist = n / d;
    if dist.is_finite() { dist } else { distance(point, start) }
}

/// Returns the ascending indices of the points kept by the reduction.
///
/// Inputs with fewer than two points are kept whole. Otherwise the first and last
/// indices are always present.
///
/// The split search uses a work stack rather than recursion so that long, nearly
/// straight walls (thousands of points) cannot exhaust the call stack. The kept set is
/// identical to the recursive formulation: every range whose furthest interior point
/// lies at least `epsilon` away from its chord is split at that point.
pub fn simplify_indices(points: &[V2], epsilon: f64) -> Vec<usize> {
    let n = points.len();
    if n < 2 {
        return (0..n).collect();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack: Vec<(usize, usize)> = vec![(0, n - 1)];
    while let Some((first, last)) = stack.pop() {
        // No interior points: nothing to split.
        if last - first < 2 {
            continue;
        }

        let start = points[first];
        let end = points[last];

        // Ties go to the leftmost point (strict `>`). Seeding with the first interior
        // index means a range always has a valid pivot, even when every distance is 0.
        let mut dmax = 0.0_f64;
        let mut furthest_i = first + 1;
        for (i, &pt) in points.iter().enumerate().take(last).skip(first + 1) {
            let d = point_line_distance(pt, start, end);
            if d > dmax {
                dmax = d;
                furthest_i = i;
            }
        }

        // NOTE: `>=` rather than `>`. With epsilon == 0 a perfectly straight run is
        // split all the way down to pairs, so every point survives.
        if dmax >= epsilon {
            keep[furthest_i] = true;
            stack.push((furthest_i, last));
            stack.push((first, furthest_i));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}

/// Reduces a polyline to a subsequence that keeps its general shape.
///
/// Endpoints are always preserved and points are never reordered or altered. A
/// negative `epsilon` keeps every point; callers that accept user input should reject
/// it up front (see `Config::validate`).
pub fn simplify(points: &[V2], epsilon: f64) -> Polyline {
    simplify_indices(points, epsilon)
        .into_iter()
        .map(|i| points[i])
        .collect()
}
