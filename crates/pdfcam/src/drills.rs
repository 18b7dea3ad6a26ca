//! Drill synthesis from the clear layer.

use pdfcam_core::{CLEAR_LAYER, ObjectDict, Point};

/// A round hole derived from one clear polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Drill {
    pub center: Point,
    pub diameter: f64,
}

/// Reduce every clear polygon of layer 0 to a drill.
///
/// The center is the bounding-box center and the diameter the mean of the
/// bounding-box width and height.
pub fn drills(dict: &ObjectDict) -> Vec<Drill> {
    let Some(layer) = dict.get(&CLEAR_LAYER) else {
        return Vec::new();
    };
    layer
        .values()
        .flat_map(|aperture| aperture.geometry.iter())
        .filter(|entry| entry.is_clear())
        .filter_map(|entry| entry.polygon().bbox())
        .map(|bbox| Drill {
            center: bbox.center(),
            diameter: (bbox.width() + bbox.height()) / 2.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfcam_core::{Aperture, CLEAR_APERTURE_ID, GeoEntry, Layer, Polygon, Ring};

    fn square(x: f64, y: f64, side: f64) -> Polygon {
        Polygon::new(
            Ring::closed(vec![
                Point::new(x, y),
                Point::new(x + side, y),
                Point::new(x + side, y + side),
                Point::new(x, y + side),
            ]),
            Vec::new(),
        )
    }

    #[test]
    fn test_no_clear_layer() {
        assert!(drills(&ObjectDict::new()).is_empty());
    }

    #[test]
    fn test_drill_from_clear_square() {
        let mut clear = Aperture::new(0.0);
        clear.geometry.push(GeoEntry::clear(square(1.0, 2.0, 2.0)));
        let mut layer = Layer::new();
        layer.insert(CLEAR_APERTURE_ID.to_string(), clear);
        let mut dict = ObjectDict::new();
        dict.insert(CLEAR_LAYER, layer);

        let found = drills(&dict);
        assert_eq!(found.len(), 1);
        assert!(found[0].center.approx_eq(Point::new(2.0, 3.0), 1e-9));
        assert!((found[0].diameter - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_solid_layers_are_ignored() {
        let mut solid = Aperture::new(0.5);
        solid.geometry.push(GeoEntry::solid(square(0.0, 0.0, 1.0)));
        let mut layer = Layer::new();
        layer.insert("10".to_string(), solid);
        let mut dict = ObjectDict::new();
        dict.insert(1, layer);
        assert!(drills(&dict).is_empty());
    }
}
