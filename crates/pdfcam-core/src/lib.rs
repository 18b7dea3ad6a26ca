//! pdfcam-core: Backend-independent data types and algorithms.
//!
//! This crate provides the foundational types (Point, Polygon, Subpath,
//! Aperture, ObjectDict) and algorithms (subpath accumulation, Bézier
//! flattening) used by the pdfcam content stream interpreter.

pub mod aperture;
pub mod bezier;
pub mod error;
pub mod geometry;
pub mod options;
pub mod painting;
pub mod path;

pub use aperture::{
    Aperture, ApertureShape, CLEAR_APERTURE_ID, CLEAR_LAYER, GeoEntry, Layer, ObjectDict,
    prune, round_width,
};
pub use bezier::{flatten, flatten_chain};
pub use error::GeometryError;
pub use geometry::{BBox, Point, Polygon, Ring};
pub use options::{ImportOptions, Unit};
pub use painting::{Color, FillRule, GraphicsState, PaintOp};
pub use path::{PathAccumulator, PendingPath, Subpath, SubpathKind};
