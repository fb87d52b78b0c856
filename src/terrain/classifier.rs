//! Height-field composition and quantile band remapping.

use serde::{Deserialize, Serialize};

use super::config::{TerrainConfig, BAND_EPSILON};
use crate::field::ScalarField;

/// Elevation band of a classified height value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainBand {
    Sea,
    Land,
    Mountain,
}

impl TerrainBand {
    /// Band a classified height falls into under `config`'s thresholds.
    pub fn of(height: f32, config: &TerrainConfig) -> Self {
        if height >= config.min_mountain {
            TerrainBand::Mountain
        } else if height >= config.min_land {
            TerrainBand::Land
        } else {
            TerrainBand::Sea
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerrainBand::Sea => "sea",
            TerrainBand::Land => "land",
            TerrainBand::Mountain => "mountain",
        }
    }
}

/// Builds the height field from the three crust layers and redistributes it
/// into sea, land and mountain bands by rank.
#[derive(Debug, Clone, Default)]
pub struct TerrainClassifier {
    config: TerrainConfig,
}

impl TerrainClassifier {
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Magnitude of the `(tectonics, thickness, orogenic)` vector per cell,
    /// normalized to `[0, 1]`. `None` if the layers differ in size.
    pub fn raw_height(
        tectonics: &ScalarField,
        thickness: &ScalarField,
        orogenic: &ScalarField,
    ) -> Option<ScalarField> {
        let mut height = tectonics.combine_with(&[thickness, orogenic])?;
        height.sqrt();
        height.normalize();
        Some(height)
    }

    /// Composes and classifies in one step.
    pub fn classify(
        &self,
        tectonics: &ScalarField,
        thickness: &ScalarField,
        orogenic: &ScalarField,
    ) -> Option<ScalarField> {
        let mut height = Self::raw_height(tectonics, thickness, orogenic)?;
        self.classify_height(&mut height);
        Some(height)
    }

    /// Rank boundaries `(sea_end, land_end)` for a grid of `cells` cells.
    ///
    /// Ranks `[0, sea_end)` are sea, `[sea_end, land_end)` land and the rest
    /// mountain. Boundaries are cumulative so each band is within one cell of
    /// its target fraction.
    pub fn band_limits(&self, cells: usize) -> (usize, usize) {
        let land = self.config.percent_land as f64;
        let mountain = self.config.percent_mountain as f64;
        let sea = (1.0 - (land + mountain)).max(0.0);
        let n = cells as f64;

        let sea_end = ((n * sea).floor() as usize).min(cells);
        let land_end = ((n * (sea + land)).floor() as usize).clamp(sea_end, cells);
        (sea_end, land_end)
    }

    /// Clamps every cell into its band by rank.
    ///
    /// The lowest cells are clamped into `[0, min_land - eps]` (0 if that is
    /// negative), the next into `[min_land, min_mountain - eps]` and the rest
    /// into `[min_mountain, 1]`.
    pub fn classify_height(&self, height: &mut ScalarField) {
        let sorted = height.sorted_indices();
        let (sea_end, land_end) = self.band_limits(sorted.len());

        let max_sea = (self.config.min_land - BAND_EPSILON).max(0.0);
        let bands = [
            (0, sea_end, 0.0, max_sea),
            (sea_end, land_end, self.config.min_land, self.config.min_mountain - BAND_EPSILON),
            (land_end, sorted.len(), self.config.min_mountain, 1.0),
        ];

        for (start, end, lo, hi) in bands {
            for &(index, value) in &sorted[start..end] {
                height.set_index(index, value.min(hi).max(lo));
            }
        }
    }

    /// Cell count per band, in `[sea, land, mountain]` order.
    pub fn band_counts(&self, height: &ScalarField) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for &h in height.values() {
            let slot = match TerrainBand::of(h, &self.config) {
                TerrainBand::Sea => 0,
                TerrainBand::Land => 1,
                TerrainBand::Mountain => 2,
            };
            counts[slot] += 1;
        }
        counts
    }
}
