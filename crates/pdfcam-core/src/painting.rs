//! Path painting operators and the transform/line-width graphics state.
//!
//! Painting operators (S, s, f, F, f*, B, B*, b, b*, n) decide how the
//! accumulated path is turned into geometry. [`GraphicsState`] carries the
//! cumulative offset and scale applied to every coordinate operand.

use crate::geometry::Point;

/// Simple RGB color with components in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Black color (0, 0, 0).
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// White color (1, 1, 1).
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// True for an exact (1, 1, 1) triple.
    pub fn is_white(&self) -> bool {
        *self == Self::white()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Fill rule for path painting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Nonzero winding number rule (default).
    #[default]
    NonZeroWinding,
    /// Even-odd rule.
    EvenOdd,
}

/// The painting operation applied to the accumulated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOp {
    /// `S`: outline each subpath.
    Stroke,
    /// `f`, `F`, `f*`: fill each subpath.
    Fill(FillRule),
    /// `B`, `B*`: fill, then stroke the same subpaths.
    FillAndStroke(FillRule),
    /// `n`: discard the path without painting.
    EndPath,
}

impl PaintOp {
    pub fn fills(&self) -> bool {
        matches!(self, PaintOp::Fill(_) | PaintOp::FillAndStroke(_))
    }

    pub fn strokes(&self) -> bool {
        matches!(self, PaintOp::Stroke | PaintOp::FillAndStroke(_))
    }

    pub fn fill_rule(&self) -> FillRule {
        match self {
            PaintOp::Fill(rule) | PaintOp::FillAndStroke(rule) => *rule,
            _ => FillRule::NonZeroWinding,
        }
    }
}

/// Transform and line width in effect for coordinate operands.
///
/// Only translation and axis-aligned scale are modelled. Operands are
/// translated by `offset`, then scaled by `scale`, then converted from
/// points into the target unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsState {
    /// Cumulative translation, in PDF points.
    pub offset: (f64, f64),
    /// Cumulative independent X/Y scale.
    pub scale: (f64, f64),
    /// Current stroke width, already in the target unit.
    pub line_width: f64,
}

impl GraphicsState {
    /// Identity transform with the PDF default line width of one point.
    pub fn new(points_factor: f64) -> Self {
        Self {
            offset: (0.0, 0.0),
            scale: (1.0, 1.0),
            line_width: points_factor,
        }
    }

    pub fn apply_offset(&mut self, dx: f64, dy: f64) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    pub fn apply_scale(&mut self, sx: f64, sy: f64) {
        self.scale.0 *= sx;
        self.scale.1 *= sy;
    }

    /// Map an operand coordinate into target-unit space.
    pub fn transform_point(&self, x: f64, y: f64, points_factor: f64) -> Point {
        Point::new(
            (x + self.offset.0) * self.scale.0 * points_factor,
            (y + self.offset.1) * self.scale.1 * points_factor,
        )
    }

    /// Map a width/height operand (no translation) into target-unit space.
    pub fn transform_extent(&self, w: f64, h: f64, points_factor: f64) -> (f64, f64) {
        (
            w * self.scale.0 * points_factor,
            h * self.scale.1 * points_factor,
        )
    }

    /// `w` operator: set the line width from a user-space operand.
    ///
    /// The width is scaled by the mean of the absolute X/Y scale.
    pub fn set_line_width(&mut self, width: f64, points_factor: f64) {
        let mean_scale = (self.scale.0.abs() + self.scale.1.abs()) / 2.0;
        self.line_width = width * mean_scale * points_factor;
    }
}
