//! Hydrosphere configuration.

use log::warn;
use serde::{Deserialize, Serialize};

/// Bucket edge length used when the configured size is 0.
pub const DEFAULT_BUCKET_SIZE: usize = 100;

/// Weights applied to each precipitation input before they are combined.
///
/// A weight of 0 removes that input from the combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecipitationWeights {
    pub cloud: f32,
    pub river: f32,
    pub proximity: f32,
    pub equator: f32,
}

impl Default for PrecipitationWeights {
    fn default() -> Self {
        Self {
            cloud: 1.0,
            river: 1.0,
            proximity: 1.0,
            equator: 0.0,
        }
    }
}

impl PrecipitationWeights {
    /// Cloud-dominated weighting with a weak equatorial bias.
    pub fn tropical_bias() -> Self {
        Self {
            cloud: 1.1,
            river: 0.65,
            proximity: 0.75,
            equator: 0.2,
        }
    }
}

/// Parameters for river growth, water proximity and precipitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrosphereConfig {
    /// Number of river origins to try.
    pub river_count: usize,
    /// Heights at or below this value are ocean.
    pub sea_level: f32,
    /// Edge length in cells of the buckets used to approximate distance to
    /// water. Smaller buckets are smoother and slower.
    pub bucket_size: usize,
    /// Box blur radius applied to precipitation.
    pub blur_radius: usize,
    pub weights: PrecipitationWeights,
}

impl Default for HydrosphereConfig {
    fn default() -> Self {
        Self {
            river_count: 50,
            sea_level: 0.37,
            bucket_size: DEFAULT_BUCKET_SIZE,
            blur_radius: 5,
            weights: PrecipitationWeights::default(),
        }
    }
}

impl HydrosphereConfig {
    /// Earth-like settings (the defaults).
    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Many rivers and fine water buckets.
    pub fn wet() -> Self {
        Self {
            river_count: 120,
            bucket_size: 32,
            weights: PrecipitationWeights::tropical_bias(),
            ..Default::default()
        }
    }

    /// Few rivers; precipitation driven by clouds alone.
    pub fn arid() -> Self {
        Self {
            river_count: 10,
            weights: PrecipitationWeights {
                river: 0.3,
                proximity: 0.3,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Returns a copy with invalid values replaced.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        if out.bucket_size == 0 {
            warn!("bucket size 0 replaced by {}", DEFAULT_BUCKET_SIZE);
            out.bucket_size = DEFAULT_BUCKET_SIZE;
        }
        if !out.sea_level.is_finite() {
            warn!("sea level {} replaced by 0.37", out.sea_level);
            out.sea_level = 0.37;
        }
        out
    }
}
