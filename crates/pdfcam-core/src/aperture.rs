//! Aperture, layer and output dictionary types.
//!
//! An [`Aperture`] groups geometry painted with one rounded stroke width.
//! A [`Layer`] maps aperture ids to apertures. The [`ObjectDict`] maps layer
//! indices to layers; index [`CLEAR_LAYER`] holds drill-candidate geometry.

use std::collections::BTreeMap;

use crate::geometry::{Polygon, Ring};

/// Id of the aperture that collects clear (white-filled) geometry.
pub const CLEAR_APERTURE_ID: &str = "0";

/// Layer index under which clear geometry is emitted.
pub const CLEAR_LAYER: i64 = 0;

/// Aperture shape code. Only circular apertures are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApertureShape {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    Circle,
}

impl ApertureShape {
    pub fn code(&self) -> &'static str {
        match self {
            ApertureShape::Circle => "C",
        }
    }
}

/// One piece of realized geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum GeoEntry {
    /// Opaque geometry; `follow` is the exterior ring of `solid`.
    Solid { solid: Polygon, follow: Ring },
    /// Transparent geometry, candidate for a drill hole.
    Clear { clear: Polygon },
}

impl GeoEntry {
    pub fn solid(polygon: Polygon) -> Self {
        let follow = polygon.exterior.clone();
        GeoEntry::Solid {
            solid: polygon,
            follow,
        }
    }

    pub fn clear(polygon: Polygon) -> Self {
        GeoEntry::Clear { clear: polygon }
    }

    pub fn polygon(&self) -> &Polygon {
        match self {
            GeoEntry::Solid { solid, .. } => solid,
            GeoEntry::Clear { clear } => clear,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, GeoEntry::Clear { .. })
    }
}

/// Geometry sharing one rounded stroke width.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aperture {
    /// Stroke width in the target unit, rounded to 5 decimals.
    pub size: f64,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ApertureShape,
    pub geometry: Vec<GeoEntry>,
}

impl Aperture {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            kind: ApertureShape::Circle,
            geometry: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}

/// Apertures of one stroke color, keyed by aperture id.
pub type Layer = BTreeMap<String, Aperture>;

/// Final import output, keyed by layer index.
pub type ObjectDict = BTreeMap<i64, Layer>;

/// Round a width to the 5-decimal precision used for aperture keys.
pub fn round_width(width: f64) -> f64 {
    (width * 1e5).round() / 1e5
}

/// Drop apertures without geometry, then layers without apertures.
pub fn prune(dict: &mut ObjectDict) {
    for layer in dict.values_mut() {
        layer.retain(|_, aperture| !aperture.is_empty());
    }
    dict.retain(|_, layer| !layer.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn unit_square() -> Polygon {
        Polygon::new(
            Ring::closed(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]),
            Vec::new(),
        )
    }

    #[test]
    fn test_solid_entry_follows_exterior() {
        let entry = GeoEntry::solid(unit_square());
        let GeoEntry::Solid { solid, follow } = &entry else {
            panic!("expected solid");
        };
        assert_eq!(&solid.exterior, follow);
        assert!(!entry.is_clear());
    }

    #[test]
    fn test_clear_entry() {
        let entry = GeoEntry::clear(unit_square());
        assert!(entry.is_clear());
        assert_eq!(entry.polygon(), &unit_square());
    }

    #[test]
    fn test_new_aperture_is_circular_and_empty() {
        let ap = Aperture::new(0.25);
        assert_eq!(ap.kind.code(), "C");
        assert!(ap.is_empty());
    }

    #[test]
    fn test_round_width() {
        assert_eq!(round_width(0.705_555_555), 0.70556);
        assert_eq!(round_width(2.0), 2.0);
        assert_eq!(round_width(0.123_454_9), 0.12345);
    }

    #[test]
    fn test_prune_removes_empty_apertures_and_layers() {
        let mut dict = ObjectDict::new();
        let mut kept = Layer::new();
        let mut ap = Aperture::new(1.0);
        ap.geometry.push(GeoEntry::solid(unit_square()));
        kept.insert("10".to_string(), ap);
        kept.insert("11".to_string(), Aperture::new(2.0));
        dict.insert(1, kept);

        let mut empty = Layer::new();
        empty.insert("12".to_string(), Aperture::new(3.0));
        dict.insert(2, empty);

        prune(&mut dict);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict[&1].len(), 1);
        assert!(dict[&1].contains_key("10"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialized_shape() {
        let mut ap = Aperture::new(0.5);
        ap.geometry.push(GeoEntry::solid(unit_square()));
        ap.geometry.push(GeoEntry::clear(unit_square()));
        let json = serde_json::to_value(&ap).unwrap();
        assert_eq!(json["type"], "C");
        assert_eq!(json["size"], 0.5);
        assert!(json["geometry"][0].get("solid").is_some());
        assert!(json["geometry"][0].get("follow").is_some());
        assert!(json["geometry"][1].get("clear").is_some());
    }
}
