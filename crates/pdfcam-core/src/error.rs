//! Error types for geometry construction.
//!
//! [`GeometryError`] describes why a single subpath could not be turned into
//! a polygon. It is never fatal: the realizer logs it and moves on to the
//! next subpath.

use std::fmt;

/// A subpath that produced no usable geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer distinct points than the operation needs.
    TooFewPoints {
        /// Distinct points found.
        found: usize,
        /// Minimum required.
        required: usize,
    },
    /// Stroking with a zero, negative or non-finite width.
    NonPositiveWidth(f64),
    /// The polygon boolean operation returned no area.
    EmptyResult,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::TooFewPoints { found, required } => {
                write!(f, "degenerate subpath: {found} distinct points, need {required}")
            }
            GeometryError::NonPositiveWidth(w) => write!(f, "cannot stroke with width {w}"),
            GeometryError::EmptyResult => write!(f, "geometry has no area"),
        }
    }
}

impl std::error::Error for GeometryError {}
