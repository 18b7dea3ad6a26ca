//! pdfcam-parse: Content stream interpreter.
//!
//! This crate classifies content stream lines into operators, tracks the
//! graphics state, and realizes painted paths into layered aperture
//! geometry. It depends on pdfcam-core for shared data types.

pub mod cancel;
pub mod error;
pub mod interpreter;
pub mod interpreter_state;
pub mod layers;
pub mod operator;
pub mod realize;

pub use cancel::{AbortFn, AbortSignal, NeverAbort};
pub use error::ImportError;
pub use interpreter::{ParserContext, parse_content_stream};
pub use interpreter_state::{InterpreterState, MatrixEffect, classify_matrix};
pub use layers::LayerBuilder;
pub use operator::{Operator, OperatorKind, classify_line};
pub use pdfcam_core;
pub use realize::{RealizedBatch, Realizer, circle, fill_polygon, stroke_polyline};
