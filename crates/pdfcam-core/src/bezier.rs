//! Cubic Bézier flattening.

use crate::geometry::Point;

/// Sample one cubic Bézier segment at `steps` uniform parameters in `[0, 1)`.
///
/// The endpoint `t = 1` is not included, so consecutive segments can be
/// concatenated without duplicating their shared point.
pub fn flatten(start: Point, c1: Point, c2: Point, stop: Point, steps: usize) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            basis(start, c1, c2, stop, t)
        })
        .collect()
}

/// Evaluate the cubic Bernstein polynomial at `t`.
pub fn basis(start: Point, c1: Point, c2: Point, stop: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    start * (mt * mt * mt) + c1 * (3.0 * t * mt * mt) + c2 * (3.0 * mt * t * t) + stop * (t * t * t)
}

/// Flatten a chain of segments into one polyline ending at the last stop point.
pub fn flatten_chain(segments: &[[Point; 4]], steps: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(segments.len() * steps + 1);
    for [start, c1, c2, stop] in segments {
        points.extend(flatten(*start, *c1, *c2, *stop, steps));
    }
    if let Some(last) = segments.last() {
        points.push(last[3]);
    }
    points
}
