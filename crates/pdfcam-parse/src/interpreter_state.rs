//! Graphics state stack for the content stream interpreter.
//!
//! Implements the save/restore model of `q` and `Q` over the
//! offset/scale/line-width [`GraphicsState`], and the heuristic reading of
//! `cm` matrices as either a translation or a scale.

use pdfcam_core::GraphicsState;

/// How a `cm` matrix was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixEffect {
    /// `b = c = 0` with a non-zero translation: offset updated.
    Translated { dx: f64, dy: f64 },
    /// `b = c = 0`, no translation, non-unit diagonal: scale updated.
    Scaled { sx: f64, sy: f64 },
    /// Identity matrix: nothing to do.
    Identity,
    /// Rotation, shear or a combined scale+translation: not applied.
    Unsupported,
}

/// Classify a `cm` matrix `[a b c d e f]`.
pub fn classify_matrix(matrix: [f64; 6]) -> MatrixEffect {
    let [a, b, c, d, e, f] = matrix;
    if b != 0.0 || c != 0.0 {
        return MatrixEffect::Unsupported;
    }
    let translates = e != 0.0 || f != 0.0;
    let scales = a != 1.0 || d != 1.0;
    match (translates, scales) {
        (true, false) => MatrixEffect::Translated { dx: e, dy: f },
        (false, true) => MatrixEffect::Scaled { sx: a, sy: d },
        (false, false) => MatrixEffect::Identity,
        (true, true) => MatrixEffect::Unsupported,
    }
}

/// Live graphics state plus the `q`/`Q` snapshot stack.
#[derive(Debug, Clone)]
pub struct InterpreterState {
    current: GraphicsState,
    stack: Vec<GraphicsState>,
}

impl InterpreterState {
    /// Create a state with identity transform and a one-point line width.
    pub fn new(points_factor: f64) -> Self {
        Self {
            current: GraphicsState::new(points_factor),
            stack: Vec::new(),
        }
    }

    pub fn graphics_state(&self) -> &GraphicsState {
        &self.current
    }

    /// Returns the current stack depth.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    // --- q/Q operators ---

    /// `q` operator: push a copy of the live state.
    pub fn save(&mut self) {
        self.stack.push(self.current);
    }

    /// `Q` operator: pop the most recent snapshot into the live state.
    ///
    /// Returns `false` if the stack is empty (unbalanced Q); the live state
    /// is left untouched.
    pub fn restore(&mut self) -> bool {
        if let Some(saved) = self.stack.pop() {
            self.current = saved;
            true
        } else {
            false
        }
    }

    // --- cm operator ---

    /// `cm` operator: apply the matrix per [`classify_matrix`].
    pub fn concat_matrix(&mut self, matrix: [f64; 6]) -> MatrixEffect {
        let effect = classify_matrix(matrix);
        match effect {
            MatrixEffect::Translated { dx, dy } => self.current.apply_offset(dx, dy),
            MatrixEffect::Scaled { sx, sy } => self.current.apply_scale(sx, sy),
            MatrixEffect::Identity | MatrixEffect::Unsupported => {}
        }
        effect
    }

    // --- w operator ---

    pub fn set_line_width(&mut self, width: f64, points_factor: f64) {
        self.current.set_line_width(width, points_factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_empty_stack() {
        let state = InterpreterState::new(1.0);
        assert_eq!(state.stack_depth(), 0);
        assert_eq!(*state.graphics_state(), GraphicsState::new(1.0));
    }

    #[test]
    fn test_save_restore_depth() {
        let mut state = InterpreterState::new(1.0);
        state.save();
        state.save();
        assert_eq!(state.stack_depth(), 2);
        assert!(state.restore());
        assert!(state.restore());
        assert_eq!(state.stack_depth(), 0);
    }

    #[test]
    fn test_restore_on_empty_stack_is_noop() {
        let mut state = InterpreterState::new(1.0);
        state.concat_matrix([1.0, 0.0, 0.0, 1.0, 5.0, 5.0]);
        let before = *state.graphics_state();
        assert!(!state.restore());
        assert_eq!(*state.graphics_state(), before);
    }

    #[test]
    fn test_balanced_save_restore_is_bit_identical() {
        let mut state = InterpreterState::new(0.352_777);
        state.concat_matrix([0.1, 0.0, 0.0, 0.1, 0.0, 0.0]);
        state.set_line_width(3.0, 0.352_777);
        let before = *state.graphics_state();

        state.save();
        state.concat_matrix([1.0, 0.0, 0.0, 1.0, 12.5, -3.0]);
        state.save();
        state.concat_matrix([2.0, 0.0, 0.0, 3.0, 0.0, 0.0]);
        state.set_line_width(9.0, 0.352_777);
        assert!(state.restore());
        assert!(state.restore());

        let after = *state.graphics_state();
        assert_eq!(after.offset.0.to_bits(), before.offset.0.to_bits());
        assert_eq!(after.offset.1.to_bits(), before.offset.1.to_bits());
        assert_eq!(after.scale.0.to_bits(), before.scale.0.to_bits());
        assert_eq!(after.scale.1.to_bits(), before.scale.1.to_bits());
        assert_eq!(after.line_width.to_bits(), before.line_width.to_bits());
    }

    #[test]
    fn test_restore_brings_back_line_width() {
        let mut state = InterpreterState::new(1.0);
        state.save();
        state.set_line_width(4.0, 1.0);
        assert_eq!(state.graphics_state().line_width, 4.0);
        state.restore();
        assert_eq!(state.graphics_state().line_width, 1.0);
    }

    // --- cm classification ---

    #[test]
    fn test_translation_updates_offset_only() {
        let mut state = InterpreterState::new(1.0);
        let effect = state.concat_matrix([1.0, 0.0, 0.0, 1.0, 10.0, 20.0]);
        assert_eq!(effect, MatrixEffect::Translated { dx: 10.0, dy: 20.0 });
        assert_eq!(state.graphics_state().offset, (10.0, 20.0));
        assert_eq!(state.graphics_state().scale, (1.0, 1.0));
    }

    #[test]
    fn test_scale_updates_scale_only() {
        let mut state = InterpreterState::new(1.0);
        let effect = state.concat_matrix([0.5, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(effect, MatrixEffect::Scaled { sx: 0.5, sy: 2.0 });
        assert_eq!(state.graphics_state().scale, (0.5, 2.0));
        assert_eq!(state.graphics_state().offset, (0.0, 0.0));
    }

    #[test]
    fn test_rotation_is_not_applied() {
        let mut state = InterpreterState::new(1.0);
        let effect = state.concat_matrix([0.0, 1.0, -1.0, 0.0, 5.0, 5.0]);
        assert_eq!(effect, MatrixEffect::Unsupported);
        assert_eq!(*state.graphics_state(), GraphicsState::new(1.0));
    }

    #[test]
    fn test_scale_with_translation_is_not_applied() {
        assert_eq!(
            classify_matrix([2.0, 0.0, 0.0, 2.0, 1.0, 1.0]),
            MatrixEffect::Unsupported
        );
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(
            classify_matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
            MatrixEffect::Identity
        );
    }
}
