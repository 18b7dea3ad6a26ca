//! Aperture and layer classification plus final assembly.
//!
//! Realized geometry is grouped by rounded stroke width into apertures, and
//! apertures by stroke color into layers. A new layer starts whenever the
//! stroke color changes from the previously seen one, whether or not
//! anything was painted in between. Clear
//! geometry bypasses this and accumulates in the reserved aperture `"0"`,
//! emitted under layer `0`.

use std::collections::HashMap;

use pdfcam_core::{
    Aperture, CLEAR_APERTURE_ID, CLEAR_LAYER, Color, GeoEntry, Layer, ObjectDict, Polygon, prune,
    round_width,
};
use tracing::debug;

/// Accumulates apertures and layers over one import.
#[derive(Debug, Clone)]
pub struct LayerBuilder {
    next_aperture_id: u32,
    next_layer: i64,
    stroke_color: Option<Color>,
    /// Set when the stroke color changed since the current layer began.
    rollover_pending: bool,
    current: Layer,
    /// Rounded width (in 1e-5 units) to aperture id, for the current layer.
    width_ids: HashMap<i64, String>,
    clear: Aperture,
    output: ObjectDict,
}

impl LayerBuilder {
    pub fn new(starting_aperture_id: u32) -> Self {
        Self {
            next_aperture_id: starting_aperture_id,
            next_layer: 1,
            stroke_color: None,
            rollover_pending: false,
            current: Layer::new(),
            width_ids: HashMap::new(),
            clear: Aperture::new(0.0),
            output: ObjectDict::new(),
        }
    }

    /// Route one geometry batch to its aperture.
    ///
    /// Clear batches go to the reserved aperture regardless of color. Other
    /// batches first roll the layer over if the stroke color changed since
    /// the current layer began, then land in its aperture for `width`.
    pub fn classify(&mut self, batch: Vec<Polygon>, width: f64, is_clear: bool, stroke_color: Color) {
        if batch.is_empty() {
            return;
        }
        if is_clear {
            self.clear
                .geometry
                .extend(batch.into_iter().map(GeoEntry::clear));
            return;
        }

        self.observe_stroke_color(stroke_color);
        if self.rollover_pending {
            self.roll_over();
        }

        let size = round_width(width);
        let key = (size * 1e5).round() as i64;
        let id = match self.width_ids.get(&key) {
            Some(id) => id.clone(),
            None => {
                let id = self.mint_aperture_id();
                self.width_ids.insert(key, id.clone());
                self.current.insert(id.clone(), Aperture::new(size));
                id
            }
        };
        if let Some(aperture) = self.current.get_mut(&id) {
            aperture
                .geometry
                .extend(batch.into_iter().map(GeoEntry::solid));
        }
    }

    /// Record a stroke color set by `RG`.
    ///
    /// A change from the previously seen color schedules a new layer for
    /// the next solid batch.
    pub fn observe_stroke_color(&mut self, color: Color) {
        if self.stroke_color.is_some_and(|seen| seen != color) {
            debug!(?color, "stroke color changed, starting a new layer");
            self.rollover_pending = true;
        }
        self.stroke_color = Some(color);
    }

    fn mint_aperture_id(&mut self) -> String {
        loop {
            let id = self.next_aperture_id.to_string();
            self.next_aperture_id = self.next_aperture_id.wrapping_add(1);
            if id != CLEAR_APERTURE_ID {
                return id;
            }
        }
    }

    /// Freeze the current aperture set under the next layer index.
    fn roll_over(&mut self) {
        self.rollover_pending = false;
        self.width_ids.clear();
        let layer = std::mem::take(&mut self.current);
        if layer.values().all(Aperture::is_empty) {
            return;
        }
        self.output.insert(self.next_layer, layer);
        self.next_layer += 1;
    }

    /// Number of ordinary layers frozen so far.
    pub fn frozen_layers(&self) -> usize {
        self.output.len()
    }

    /// Flush the open layer, add the clear layer and prune empties.
    pub fn finish(mut self) -> ObjectDict {
        self.roll_over();
        if !self.clear.is_empty() {
            let mut layer = Layer::new();
            layer.insert(CLEAR_APERTURE_ID.to_string(), self.clear);
            self.output.insert(CLEAR_LAYER, layer);
        }
        let mut output = self.output;
        prune(&mut output);
        output
    }
}
