//! Counts over an [`ObjectDict`].

use std::fmt;

use pdfcam_core::ObjectDict;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerSummary {
    pub index: i64,
    pub apertures: usize,
    pub entries: usize,
    pub clear_entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub layers: Vec<LayerSummary>,
}

impl Summary {
    pub fn apertures(&self) -> usize {
        self.layers.iter().map(|l| l.apertures).sum()
    }

    pub fn entries(&self) -> usize {
        self.layers.iter().map(|l| l.entries).sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for layer in &self.layers {
            writeln!(
                f,
                "layer {}: {} apertures, {} entries ({} clear)",
                layer.index, layer.apertures, layer.entries, layer.clear_entries
            )?;
        }
        write!(
            f,
            "total: {} layers, {} apertures, {} entries",
            self.layers.len(),
            self.apertures(),
            self.entries()
        )
    }
}

/// Count layers, apertures and geometry entries.
pub fn summarize(dict: &ObjectDict) -> Summary {
    let layers = dict
        .iter()
        .map(|(&index, layer)| {
            let entries = layer.values().map(|a| a.geometry.len()).sum();
            let clear_entries = layer
                .values()
                .flat_map(|a| a.geometry.iter())
                .filter(|g| g.is_clear())
                .count();
            LayerSummary {
                index,
                apertures: layer.len(),
                entries,
                clear_entries,
            }
        })
        .collect();
    Summary { layers }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&ObjectDict::new());
        assert!(summary.layers.is_empty());
        assert_eq!(summary.to_string(), "total: 0 layers, 0 apertures, 0 entries");
    }

    #[test]
    fn test_summary_counts_entries() {
        let dict = crate::import_str(
            "0 0 m\n10 0 l\nS\n2 w\n0 5 m\n10 5 l\nS\n1 1 1 rg\n0 0 5 5 re\nf\n",
            &pdfcam_core::ImportOptions::default(),
        )
        .unwrap();
        let summary = summarize(&dict);
        assert_eq!(summary.layers.len(), 2);
        assert_eq!(summary.layers[0].index, 0);
        assert_eq!(summary.layers[0].clear_entries, 1);
        assert_eq!(summary.layers[1].apertures, 2);
        assert_eq!(summary.entries(), 3);
        assert!(summary.to_string().starts_with("layer 0: 1 apertures, 1 entries (1 clear)\n"));
    }
}
