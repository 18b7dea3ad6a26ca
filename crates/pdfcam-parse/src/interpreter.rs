//! Content stream interpreter.
//!
//! Classifies each line into an [`Operator`], applies it to an explicit
//! [`ParserContext`], and realizes geometry whenever a painting operator
//! fires. The caller's [`AbortSignal`] is polled before every line.

use pdfcam_core::{
    Color, GraphicsState, ImportOptions, ObjectDict, PaintOp, PathAccumulator,
};
use tracing::{debug, trace};

use crate::cancel::AbortSignal;
use crate::error::ImportError;
use crate::interpreter_state::{InterpreterState, MatrixEffect};
use crate::layers::LayerBuilder;
use crate::operator::{Operator, classify_line};
use crate::realize::Realizer;

/// All mutable state of one import.
#[derive(Debug, Clone)]
pub struct ParserContext {
    points_factor: f64,
    state: InterpreterState,
    path: PathAccumulator,
    realizer: Realizer,
    layers: LayerBuilder,
    stroke_color: Color,
    fill_color: Color,
}

impl ParserContext {
    /// Create a context for `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidOptions`] when `curve_steps` is zero.
    pub fn new(options: &ImportOptions) -> Result<Self, ImportError> {
        if options.curve_steps == 0 {
            return Err(ImportError::InvalidOptions(
                "curve_steps must be at least 1".to_string(),
            ));
        }
        let points_factor = options.target_unit.points_factor();
        Ok(Self {
            points_factor,
            state: InterpreterState::new(points_factor),
            path: PathAccumulator::new(),
            realizer: Realizer::new(options.circle_steps(), options.bezier_steps()),
            layers: LayerBuilder::new(options.starting_aperture_id),
            stroke_color: Color::black(),
            fill_color: Color::black(),
        })
    }

    /// The graphics state operators are currently evaluated against.
    pub fn graphics_state(&self) -> &GraphicsState {
        self.state.graphics_state()
    }

    /// Number of saved states awaiting a restore.
    pub fn stack_depth(&self) -> usize {
        self.state.stack_depth()
    }

    /// Last color set by `RG`, black initially.
    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    /// Last color set by `rg`, black initially.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Apply one operator.
    pub fn apply(&mut self, op: Operator) {
        let factor = self.points_factor;
        match op {
            // --- Color operators ---
            Operator::StrokeColor(color) => {
                self.stroke_color = color;
                self.layers.observe_stroke_color(color);
            }
            Operator::FillColor(color) => self.fill_color = color,

            // --- Graphics state operators ---
            Operator::Transform { save, matrix } => {
                if save {
                    self.state.save();
                }
                if self.state.concat_matrix(matrix) == MatrixEffect::Unsupported {
                    debug!(?matrix, "transform matrix not applied");
                }
            }
            Operator::Save => self.state.save(),
            Operator::Restore => {
                if !self.state.restore() {
                    trace!("restore with empty state stack");
                }
            }
            Operator::LineWidth(width) => self.state.set_line_width(width, factor),

            // --- Path construction ---
            Operator::MoveTo { x, y } => {
                let p = self.point(x, y);
                self.path.move_to(p);
            }
            Operator::LineTo { x, y } => {
                let p = self.point(x, y);
                self.path.line_to(p);
            }
            Operator::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x3,
                y3,
            } => {
                let (c1, c2, stop) = (self.point(x1, y1), self.point(x2, y2), self.point(x3, y3));
                self.path.curve_to(c1, c2, stop);
            }
            Operator::CurveToV { x2, y2, x3, y3 } => {
                let (c2, stop) = (self.point(x2, y2), self.point(x3, y3));
                self.path.curve_to_v(c2, stop);
            }
            Operator::CurveToY { x1, y1, x3, y3 } => {
                let (c1, stop) = (self.point(x1, y1), self.point(x3, y3));
                self.path.curve_to_y(c1, stop);
            }
            Operator::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let origin = self.point(x, y);
                let (w, h) = self
                    .state
                    .graphics_state()
                    .transform_extent(width, height, factor);
                self.path.rectangle(origin, w, h);
            }
            Operator::ClosePath => self.path.close_subpath(),
            Operator::Clip => self.path.clip(),

            // --- Path painting ---
            Operator::EndPath => self.path.discard(),
            Operator::Stroke => self.paint(PaintOp::Stroke),
            Operator::CloseAndStroke => {
                self.path.close_subpath();
                self.paint(PaintOp::Stroke);
            }
            Operator::Fill(rule) => self.paint(PaintOp::Fill(rule)),
            Operator::FillAndStroke(rule) => self.paint(PaintOp::FillAndStroke(rule)),
            Operator::CloseFillAndStroke(rule) => {
                self.path.close_subpath();
                self.paint(PaintOp::FillAndStroke(rule));
            }
        }
    }

    fn point(&self, x: f64, y: f64) -> pdfcam_core::Point {
        self.state
            .graphics_state()
            .transform_point(x, y, self.points_factor)
    }

    fn paint(&mut self, op: PaintOp) {
        let (pending, discarded) = self.path.take_for_paint();
        if discarded > 0 {
            debug!(discarded, "dropping subpaths of an inactive kind");
        }
        let Some(pending) = pending else {
            return;
        };

        let width = self.state.graphics_state().line_width;
        let batch = self.realizer.realize(&pending, op, width);
        trace!(
            ?op,
            kind = ?pending.kind,
            fill = batch.fill.len(),
            stroke = batch.stroke.len(),
            skipped = batch.skipped.len(),
            "path painted"
        );

        let clear = self.fill_color.is_white();
        self.layers
            .classify(batch.fill, width, clear, self.stroke_color);
        self.layers
            .classify(batch.stroke, width, false, self.stroke_color);
    }

    /// Assemble the output dictionary.
    pub fn finish(self) -> ObjectDict {
        let dict = self.layers.finish();
        debug!(layers = dict.len(), "content stream interpreted");
        dict
    }
}

/// Interpret a decompressed content stream into layered geometry.
///
/// Lines may end in LF, CRLF or a bare CR. Unrecognised lines are skipped and degenerate geometry is dropped, so
/// malformed input yields less output rather than an error.
///
/// # Errors
///
/// - [`ImportError::Cancelled`] as soon as `abort` reports true.
/// - [`ImportError::InvalidOptions`] for unusable options.
pub fn parse_content_stream(
    text: &str,
    options: &ImportOptions,
    abort: &dyn AbortSignal,
) -> Result<ObjectDict, ImportError> {
    let mut ctx = ParserContext::new(options)?;
    let lines = text.split(['\r', '\n']).filter(|line| !line.is_empty());
    for (line_no, line) in lines.enumerate() {
        if abort.should_abort() {
            debug!(line_no, "import cancelled");
            return Err(ImportError::Cancelled);
        }
        if let Some(op) = classify_line(line) {
            trace!(line_no, ?op, "operator");
            ctx.apply(op);
        }
    }
    Ok(ctx.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::{AbortFn, NeverAbort};
    use pdfcam_core::{CLEAR_APERTURE_ID, CLEAR_LAYER, GeoEntry, Unit, round_width};
    use std::cell::Cell;

    fn parse(text: &str) -> ObjectDict {
        parse_content_stream(text, &ImportOptions::default(), &NeverAbort).unwrap()
    }

    fn mm(points: f64) -> f64 {
        points * Unit::Millimeter.points_factor()
    }

    fn ctx() -> ParserContext {
        ParserContext::new(&ImportOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_unrecognised_only_input() {
        assert!(parse("BT\n/F1 12 Tf\n(hello) Tj\nET\n").is_empty());
    }

    #[test]
    fn test_stroked_square_scenario() {
        let out = parse("0 0 1 RG\n10 10 m\n10 20 l\n20 20 l\n20 10 l\nh\n2 w\nS\n");
        assert_eq!(out.len(), 1);
        let layer = &out[&1];
        assert_eq!(layer.len(), 1);
        let aperture = layer.values().next().unwrap();
        assert_eq!(aperture.size, round_width(mm(2.0)));
        assert_eq!(aperture.geometry.len(), 1);
        assert!(matches!(aperture.geometry[0], GeoEntry::Solid { .. }));
    }

    #[test]
    fn test_coordinates_are_converted_to_target_unit() {
        let out = parse("0 0 72 72 re\nf\n");
        let aperture = out[&1].values().next().unwrap();
        let bbox = aperture.geometry[0].polygon().bbox().unwrap();
        assert!((bbox.x1 - 25.4).abs() < 1e-6);
        assert!((bbox.y1 - 25.4).abs() < 1e-6);
    }

    #[test]
    fn test_inch_unit() {
        let options = ImportOptions {
            target_unit: Unit::Inch,
            ..ImportOptions::default()
        };
        let out = parse_content_stream("0 0 144 72 re\nf\n", &options, &NeverAbort).unwrap();
        let aperture = out[&1].values().next().unwrap();
        let bbox = aperture.geometry[0].polygon().bbox().unwrap();
        assert!((bbox.width() - 2.0).abs() < 1e-6);
        assert!((bbox.height() - 1.0).abs() < 1e-6);
        assert_eq!(aperture.size, round_width(1.0 / 72.0));
    }

    #[test]
    fn test_color_triggered_layering() {
        let text = "1 0 0 RG\n0 0 m\n10 0 l\nS\n\
                    1 0 0 RG\n0 5 m\n10 5 l\nS\n\
                    0 1 0 RG\n0 9 m\n10 9 l\nS\n";
        let out = parse(text);
        assert_eq!(out.len(), 2);
        let first: usize = out[&1].values().map(|a| a.geometry.len()).sum();
        let second: usize = out[&2].values().map(|a| a.geometry.len()).sum();
        assert_eq!(first, 2);
        assert_eq!(second, 1);
    }

    #[test]
    fn test_color_reset_between_paints_starts_new_layer() {
        let text = "1 0 0 RG\n0 0 m\n10 0 l\nS\n\
                    0 1 0 RG\n\
                    1 0 0 RG\n0 5 m\n10 5 l\nS\n";
        let out = parse(text);
        assert_eq!(out.len(), 2);
        assert_eq!(out[&1].values().map(|a| a.geometry.len()).sum::<usize>(), 1);
        assert_eq!(out[&2].values().map(|a| a.geometry.len()).sum::<usize>(), 1);
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let out = parse("0 0 1 RG\r10 10 m\r10 20 l\r20 20 l\rh\rS\r");
        assert_eq!(out.len(), 1);
        let crlf = parse("0 0 72 72 re\r\nf\r\n");
        assert_eq!(crlf[&1].values().next().unwrap().geometry.len(), 1);
    }

    #[test]
    fn test_white_fill_routes_to_clear_aperture() {
        let text = "1 0 0 RG\n0 0 m\n10 0 l\nS\n\
                    0 1 0 RG\n0 5 m\n10 5 l\nS\n\
                    1 1 1 rg\n\
                    5 2 m\n\
                    5 3.1 5.9 4 7 4 c\n\
                    8.1 4 9 3.1 9 2 c\n\
                    9 0.9 8.1 0 7 0 c\n\
                    5.9 0 5 0.9 5 2 c\n\
                    h\nf\n";
        let out = parse(text);
        assert_eq!(out.len(), 3);
        let clear = &out[&CLEAR_LAYER][CLEAR_APERTURE_ID];
        assert_eq!(clear.geometry.len(), 1);
        assert!(clear.geometry[0].is_clear());
        for idx in [1, 2] {
            assert!(out[&idx].values().all(|a| a.geometry.iter().all(|g| !g.is_clear())));
        }
    }

    #[test]
    fn test_fill_and_stroke_stores_two_entries() {
        let out = parse("0.5 w\n0 0 10 10 re\nB\n");
        let aperture = out[&1].values().next().unwrap();
        assert_eq!(aperture.geometry.len(), 2);
    }

    #[test]
    fn test_white_fill_and_stroke_splits_clear_and_solid() {
        let out = parse("1 1 1 rg\n0 0 10 10 re\nb\n");
        assert_eq!(out[&CLEAR_LAYER][CLEAR_APERTURE_ID].geometry.len(), 1);
        let solid = out[&1].values().next().unwrap();
        assert_eq!(solid.geometry.len(), 1);
        assert!(!solid.geometry[0].is_clear());
    }

    #[test]
    fn test_clip_path_is_not_painted() {
        let out = parse("0 0 100 100 re\nW n\n10 10 m\n20 20 l\nS\n");
        let aperture = out[&1].values().next().unwrap();
        assert_eq!(aperture.geometry.len(), 1);
        let bbox = aperture.geometry[0].polygon().bbox().unwrap();
        assert!(bbox.x1 < mm(30.0));
    }

    #[test]
    fn test_end_path_discards() {
        assert!(parse("0 0 m\n10 10 l\nn\nS\n").is_empty());
    }

    #[test]
    fn test_degenerate_subpath_does_not_abort_paint() {
        let out = parse("5 5 m\n5 5 l\nS\n0 0 m\n10 0 l\nS\n");
        let total: usize = out[&1].values().map(|a| a.geometry.len()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_transform_offsets_coordinates() {
        let out = parse("q 1 0 0 1 72 0 cm\n0 0 72 72 re\nf\nQ\n");
        let aperture = out[&1].values().next().unwrap();
        let bbox = aperture.geometry[0].polygon().bbox().unwrap();
        assert!((bbox.x0 - 25.4).abs() < 1e-6);
        assert!((bbox.x1 - 50.8).abs() < 1e-6);
    }

    #[test]
    fn test_scale_transform_and_restore() {
        let mut c = ctx();
        c.apply(Operator::Save);
        c.apply(Operator::Transform {
            save: false,
            matrix: [0.1, 0.0, 0.0, 0.1, 0.0, 0.0],
        });
        assert_eq!(c.graphics_state().scale, (0.1, 0.1));
        assert_eq!(c.stack_depth(), 1);
        c.apply(Operator::Restore);
        assert_eq!(c.graphics_state().scale, (1.0, 1.0));
        assert_eq!(c.stack_depth(), 0);
    }

    #[test]
    fn test_balanced_stack_leaves_state_unchanged() {
        let mut c = ctx();
        c.apply(Operator::LineWidth(0.3));
        let before = *c.graphics_state();
        for line in [
            "q",
            "q 1 0 0 1 5 5 cm",
            "2 0 0 2 0 0 cm",
            "4 w",
            "Q",
            "Q",
        ] {
            c.apply(classify_line(line).unwrap());
        }
        assert_eq!(*c.graphics_state(), before);
    }

    #[test]
    fn test_unbalanced_restore_is_noop() {
        let mut c = ctx();
        let before = *c.graphics_state();
        c.apply(Operator::Restore);
        assert_eq!(*c.graphics_state(), before);
    }

    #[test]
    fn test_line_width_keys_apertures() {
        let text = "1 w\n0 0 m\n10 0 l\nS\n2 w\n0 5 m\n10 5 l\nS\n1 w\n0 9 m\n10 9 l\nS\n";
        let out = parse(text);
        let layer = &out[&1];
        assert_eq!(layer.len(), 2);
        assert_eq!(layer["10"].geometry.len(), 2);
        assert_eq!(layer["11"].geometry.len(), 1);
    }

    #[test]
    fn test_cancellation_before_first_line() {
        let result = parse_content_stream("0 0 m\n", &ImportOptions::default(), &AbortFn(|| true));
        assert!(matches!(result, Err(ImportError::Cancelled)));
    }

    #[test]
    fn test_cancellation_is_polled_per_line() {
        let polls = Cell::new(0usize);
        let signal = AbortFn(|| {
            polls.set(polls.get() + 1);
            polls.get() > 3
        });
        let result = parse_content_stream(
            "0 0 m\n10 0 l\nS\n0 5 m\n10 5 l\nS\n",
            &ImportOptions::default(),
            &signal,
        );
        assert!(matches!(result, Err(ImportError::Cancelled)));
        assert_eq!(polls.get(), 4);
    }

    #[test]
    fn test_zero_curve_steps_rejected() {
        let options = ImportOptions {
            curve_steps: 0,
            ..ImportOptions::default()
        };
        let result = parse_content_stream("", &options, &NeverAbort);
        assert!(matches!(result, Err(ImportError::InvalidOptions(_))));
    }

    #[test]
    fn test_colors_tracked() {
        let mut c = ctx();
        c.apply(classify_line("0.2 0.4 0.6 RG").unwrap());
        c.apply(classify_line("1 1 1 rg").unwrap());
        assert_eq!(c.stroke_color(), Color::new(0.2, 0.4, 0.6));
        assert!(c.fill_color().is_white());
    }
}
