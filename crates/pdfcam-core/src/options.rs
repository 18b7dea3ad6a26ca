//! Import configuration.

/// PDF user-space units per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Length unit the reconstructed geometry is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[default]
    Millimeter,
    Inch,
}

impl Unit {
    /// Multiplier converting PDF points into this unit.
    pub fn points_factor(self) -> f64 {
        match self {
            Unit::Millimeter => 25.4 / POINTS_PER_INCH,
            Unit::Inch => 1.0 / POINTS_PER_INCH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
        }
    }
}

/// Options controlling one content stream import.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportOptions {
    /// Unit of every coordinate and aperture size in the output (default: millimetres).
    pub target_unit: Unit,
    /// Samples per Bézier segment and vertices per full circle (default: 64).
    pub curve_steps: u32,
    /// First aperture id minted for stroke widths (default: 10).
    pub starting_aperture_id: u32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            target_unit: Unit::Millimeter,
            curve_steps: 64,
            starting_aperture_id: 10,
        }
    }
}

impl ImportOptions {
    /// Vertex count used when approximating a full circle.
    pub fn circle_steps(&self) -> usize {
        self.curve_steps.max(8) as usize
    }

    /// Sample count used when flattening one Bézier segment.
    pub fn bezier_steps(&self) -> usize {
        self.curve_steps.max(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factors() {
        assert!((Unit::Millimeter.points_factor() - 0.352_777_777_8).abs() < 1e-9);
        assert!((Unit::Inch.points_factor() * 72.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_options() {
        let opts = ImportOptions::default();
        assert_eq!(opts.target_unit, Unit::Millimeter);
        assert_eq!(opts.curve_steps, 64);
        assert_eq!(opts.starting_aperture_id, 10);
    }

    #[test]
    fn test_step_clamping() {
        let opts = ImportOptions {
            curve_steps: 3,
            ..ImportOptions::default()
        };
        assert_eq!(opts.circle_steps(), 8);
        assert_eq!(opts.bezier_steps(), 3);
    }
}
