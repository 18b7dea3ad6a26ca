//! Geometry realizer: turns painted subpaths into polygons.
//!
//! Stroking buffers a polyline by half the line width using round joins and
//! caps; filling closes the subpath and normalizes it with a polygon boolean
//! pass so self-touching edges become valid polygons. Boolean operations are
//! delegated to `i_overlay`.

use std::f64::consts::TAU;

use i_overlay::core::fill_rule::FillRule as OverlayFillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use pdfcam_core::geometry::signed_area;
use pdfcam_core::{
    FillRule, GeometryError, PaintOp, PendingPath, Point, Polygon, Ring, Subpath, flatten_chain,
};
use tracing::debug;

/// Coordinates closer than this are treated as the same vertex.
const VERTEX_EPS: f64 = 1e-9;

/// Geometry produced by one painting operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealizedBatch {
    pub fill: Vec<Polygon>,
    pub stroke: Vec<Polygon>,
    /// Subpath contributions that were dropped.
    pub skipped: Vec<GeometryError>,
}

impl RealizedBatch {
    pub fn is_empty(&self) -> bool {
        self.fill.is_empty() && self.stroke.is_empty()
    }
}

/// Realizes painted paths with fixed curve resolutions.
#[derive(Debug, Clone, Copy)]
pub struct Realizer {
    /// Vertices per full circle for joins and caps.
    pub circle_steps: usize,
    /// Samples per Bézier segment.
    pub bezier_steps: usize,
}

impl Realizer {
    pub fn new(circle_steps: usize, bezier_steps: usize) -> Self {
        Self {
            circle_steps: circle_steps.max(3),
            bezier_steps: bezier_steps.max(1),
        }
    }

    /// Produce the fill and stroke batches for `op` over every pending subpath.
    pub fn realize(&self, pending: &PendingPath, op: PaintOp, line_width: f64) -> RealizedBatch {
        let mut batch = RealizedBatch::default();
        if op == PaintOp::EndPath {
            return batch;
        }

        let closed = pending.closed.iter().map(|s| (s, true));
        let open = pending.open.iter().map(|s| (s, false));
        for (subpath, is_closed) in closed.chain(open) {
            let is_closed = is_closed || matches!(subpath, Subpath::Rectangle(_));
            let points = self.polyline(subpath);

            if op.fills() {
                match fill_polygon(&points, op.fill_rule()) {
                    Ok(polys) => batch.fill.extend(polys),
                    Err(err) => {
                        debug!(%err, kind = ?subpath.kind(), "skipping fill subpath");
                        batch.skipped.push(err);
                    }
                }
            }
            if op.strokes() {
                match stroke_polyline(&points, is_closed, line_width, self.circle_steps) {
                    Ok(polys) => batch.stroke.extend(polys),
                    Err(err) => {
                        debug!(%err, kind = ?subpath.kind(), "skipping stroke subpath");
                        batch.skipped.push(err);
                    }
                }
            }
        }
        batch
    }

    /// Vertex sequence of a subpath, flattening curves.
    pub fn polyline(&self, subpath: &Subpath) -> Vec<Point> {
        match subpath {
            Subpath::Lines(pts) | Subpath::Rectangle(pts) => pts.clone(),
            Subpath::Bezier(segments) => flatten_chain(segments, self.bezier_steps),
        }
    }
}

fn ends_at_start(points: &[Point]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 2 => first.approx_eq(*last, VERTEX_EPS),
        _ => false,
    }
}

/// Drop consecutive duplicates and a trailing point equal to the first.
fn distinct_vertices(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.dedup_by(|b, a| a.approx_eq(*b, VERTEX_EPS));
    if pts.len() > 1 {
        if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
            if first.approx_eq(*last, VERTEX_EPS) {
                pts.pop();
            }
        }
    }
    pts
}

/// Buffer a polyline by half of `width`.
///
/// Each segment becomes a rectangle and each vertex a circle of the same
/// radius; their union is the stroked outline.
pub fn stroke_polyline(
    points: &[Point],
    closed: bool,
    width: f64,
    circle_steps: usize,
) -> Result<Vec<Polygon>, GeometryError> {
    if !(width.is_finite() && width > 0.0) {
        return Err(GeometryError::NonPositiveWidth(width));
    }
    // A polyline that returns to its start is a closed outline with or without `h`.
    let closed = closed || ends_at_start(points);
    let pts = distinct_vertices(points);
    if pts.len() < 2 {
        return Err(GeometryError::TooFewPoints {
            found: pts.len(),
            required: 2,
        });
    }

    let radius = width / 2.0;
    let mut contours: Vec<Vec<[f64; 2]>> = Vec::with_capacity(pts.len() * 2 + 1);
    let segment_count = if closed { pts.len() } else { pts.len() - 1 };
    for i in 0..segment_count {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        let d = b - a;
        let len = (d.x * d.x + d.y * d.y).sqrt();
        if len <= VERTEX_EPS {
            continue;
        }
        let n = Point::new(-d.y / len * radius, d.x / len * radius);
        contours.push(ccw(vec![a + n, b + n, b - n, a - n]));
    }
    for &p in &pts {
        contours.push(ccw(circle(p, radius, circle_steps)));
    }

    let polygons = union(contours, FillRule::NonZeroWinding);
    if polygons.is_empty() {
        return Err(GeometryError::EmptyResult);
    }
    Ok(polygons)
}

/// Close a subpath and normalize it into valid polygons.
pub fn fill_polygon(points: &[Point], rule: FillRule) -> Result<Vec<Polygon>, GeometryError> {
    let pts = distinct_vertices(points);
    if pts.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            found: pts.len(),
            required: 3,
        });
    }
    let contour: Vec<[f64; 2]> = pts.iter().map(|p| p.to_array()).collect();
    let polygons = union(vec![contour], rule);
    if polygons.is_empty() {
        return Err(GeometryError::EmptyResult);
    }
    Ok(polygons)
}

/// Regular polygon approximating a circle, counter-clockwise.
pub fn circle(center: Point, radius: f64, steps: usize) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let angle = TAU * i as f64 / steps as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

fn ccw(mut points: Vec<Point>) -> Vec<[f64; 2]> {
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    points.into_iter().map(Point::to_array).collect()
}

fn union(contours: Vec<Vec<[f64; 2]>>, rule: FillRule) -> Vec<Polygon> {
    let fill_rule = match rule {
        FillRule::NonZeroWinding => OverlayFillRule::NonZero,
        FillRule::EvenOdd => OverlayFillRule::EvenOdd,
    };
    let clip: Vec<Vec<[f64; 2]>> = Vec::new();
    let shapes: Vec<Vec<Vec<[f64; 2]>>> = contours.overlay(&clip, OverlayRule::Subject, fill_rule);
    shapes.into_iter().filter_map(shape_to_polygon).collect()
}

fn shape_to_polygon(shape: Vec<Vec<[f64; 2]>>) -> Option<Polygon> {
    let mut rings = shape
        .into_iter()
        .filter(|contour| contour.len() >= 3)
        .map(|contour| Ring::closed(contour.into_iter().map(Point::from).collect()));
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}
