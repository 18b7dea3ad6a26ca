//! pdfcam: Import PDF artwork as per-color copper layers and drill candidates.
//!
//! This is the public API facade crate for pdfcam. It re-exports types from
//! pdfcam-core and uses pdfcam-parse to interpret content streams.
//!
//! # Architecture
//!
//! - **pdfcam-core**: Geometry, path accumulation and output types
//! - **pdfcam-parse**: Operator classifier and content stream interpreter
//! - **pdfcam** (this crate): Entry points, drill synthesis and background jobs
//!
//! # Example
//!
//! ```
//! use pdfcam::{ImportOptions, import_str};
//!
//! let dict = import_str("0 0 m\n72 0 l\nS\n", &ImportOptions::default()).unwrap();
//! assert_eq!(dict.len(), 1);
//! ```

mod drills;
mod job;
mod summary;

use std::path::Path;

pub use drills::{Drill, drills};
pub use job::ImportJob;
pub use pdfcam_core;
pub use pdfcam_core::{
    Aperture, ApertureShape, BBox, CLEAR_APERTURE_ID, CLEAR_LAYER, Color, FillRule, GeoEntry,
    GeometryError, ImportOptions, Layer, ObjectDict, Point, Polygon, Ring, Unit,
};
pub use pdfcam_parse;
pub use pdfcam_parse::{AbortFn, AbortSignal, ImportError, NeverAbort, parse_content_stream};
pub use summary::{LayerSummary, Summary, summarize};

/// Interpret `text` without cancellation.
pub fn import_str(text: &str, options: &ImportOptions) -> Result<ObjectDict, ImportError> {
    parse_content_stream(text, options, &NeverAbort)
}

/// Read a decompressed content stream from disk and interpret it.
///
/// Bytes that are not valid UTF-8 (binary inline images, for instance) are
/// replaced, so they can only affect the lines they occur on.
pub fn import_file(
    path: impl AsRef<Path>,
    options: &ImportOptions,
) -> Result<ObjectDict, ImportError> {
    let bytes = std::fs::read(path.as_ref())?;
    let text = String::from_utf8_lossy(&bytes);
    tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "read content stream");
    import_str(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_str_uses_defaults() {
        let dict = import_str("0 0 m\n72 0 l\nS\n", &ImportOptions::default()).unwrap();
        let aperture = dict[&1].values().next().unwrap();
        assert_eq!(aperture.size, pdfcam_core::round_width(25.4 / 72.0));
    }

    #[test]
    fn test_import_file_missing_is_io_error() {
        let err = import_file("/nonexistent/pdfcam/stream.txt", &ImportOptions::default())
            .unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
