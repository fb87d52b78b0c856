//! Configuration for terrain classification.

use log::warn;
use serde::{Deserialize, Serialize};

/// Gap left between the top of one band and the bottom of the next.
pub const BAND_EPSILON: f32 = 0.001;

/// Target area fractions and band thresholds for the height field.
///
/// The sea fraction is implicit: `1 - (percent_land + percent_mountain)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Fraction of cells that become non-mountainous land.
    pub percent_land: f32,
    /// Fraction of cells that become mountains.
    pub percent_mountain: f32,
    /// Lowest height that counts as land. Also the default sea level.
    pub min_land: f32,
    /// Lowest height that counts as mountain.
    pub min_mountain: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            percent_land: 0.3,
            percent_mountain: 0.058,
            min_land: 0.37,
            min_mountain: 0.63,
        }
    }
}

impl TerrainConfig {
    /// Earth-like proportions (the defaults).
    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Mostly ocean with scattered islands.
    pub fn archipelago() -> Self {
        Self {
            percent_land: 0.12,
            percent_mountain: 0.02,
            ..Default::default()
        }
    }

    /// Dry, land-dominated world.
    pub fn continental() -> Self {
        Self {
            percent_land: 0.55,
            percent_mountain: 0.12,
            ..Default::default()
        }
    }

    /// Sea fraction implied by the land and mountain fractions, never negative.
    pub fn percent_sea(&self) -> f32 {
        (1.0 - (self.percent_land + self.percent_mountain)).max(0.0)
    }

    /// Returns a copy with fractions outside `[0, 1]` replaced by defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = *self;

        if !(0.0..=1.0).contains(&out.percent_land) {
            warn!("land fraction {} replaced by {}", out.percent_land, defaults.percent_land);
            out.percent_land = defaults.percent_land;
        }
        if !(0.0..=1.0).contains(&out.percent_mountain) {
            warn!(
                "mountain fraction {} replaced by {}",
                out.percent_mountain, defaults.percent_mountain
            );
            out.percent_mountain = defaults.percent_mountain;
        }

        out
    }
}
