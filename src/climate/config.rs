//! Climate configuration parameters.

use log::warn;
use serde::{Deserialize, Serialize};

/// Weights for the temperature composition.
///
/// Temperature is the magnitude of `(equator * equator_weight,
/// wind * wind_weight, inverted_height * altitude_weight)`, normalized over
/// land. A weight of 0 drops that term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    pub sea_level: f32,
    pub equator_weight: f32,
    pub wind_weight: f32,
    pub altitude_weight: f32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            sea_level: 0.37,
            equator_weight: 1.0,
            wind_weight: 1.0,
            altitude_weight: 1.0,
        }
    }
}

impl ClimateConfig {
    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Latitude dominates; wind only adds texture.
    pub fn zonal() -> Self {
        Self {
            equator_weight: 1.5,
            wind_weight: 0.4,
            ..Default::default()
        }
    }

    /// Negative or non-finite weights fall back to 1.0; a non-finite sea
    /// level falls back to 0.37.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = *self;
        if !out.sea_level.is_finite() {
            warn!("climate sea level {} replaced by {}", out.sea_level, defaults.sea_level);
            out.sea_level = defaults.sea_level;
        }
        for (name, w) in [
            ("equator", &mut out.equator_weight),
            ("wind", &mut out.wind_weight),
            ("altitude", &mut out.altitude_weight),
        ] {
            if !w.is_finite() || *w < 0.0 {
                warn!("{name} weight {} replaced by 1.0", *w);
                *w = 1.0;
            }
        }
        out
    }
}
