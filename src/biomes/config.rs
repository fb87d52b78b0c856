//! Biosphere configuration.

use log::warn;
use serde::{Deserialize, Serialize};

use super::chart::LifezoneRule;
use super::holdridge::{
    MAX_ALTITUDE, MAX_BIOTEMPERATURE, MAX_PRECIPITATION, MIN_ALTITUDE, MIN_BIOTEMPERATURE,
    MIN_PRECIPITATION,
};

/// Physical ranges that normalized `[0, 1]` fields are scaled into before
/// Holdridge classification.
///
/// Notes:
/// - Altitude is in metres, biotemperature in °C, precipitation in mm/year.
/// - Cells with height at or below `sea_level` are ocean and get no record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiosphereConfig {
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub min_precipitation: f64,
    pub max_precipitation: f64,
    pub sea_level: f32,
    pub rule: LifezoneRule,
}

impl Default for BiosphereConfig {
    fn default() -> Self {
        Self {
            min_altitude: MIN_ALTITUDE,
            max_altitude: MAX_ALTITUDE,
            min_temperature: MIN_BIOTEMPERATURE,
            max_temperature: MAX_BIOTEMPERATURE,
            min_precipitation: MIN_PRECIPITATION,
            max_precipitation: MAX_PRECIPITATION,
            sea_level: 0.37,
            rule: LifezoneRule::Nearest,
        }
    }
}

impl BiosphereConfig {
    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Cooler, drier ranges: most land falls in boreal and polar belts.
    pub fn frigid() -> Self {
        Self {
            max_temperature: 18.0,
            max_precipitation: 4000.0,
            ..Self::default()
        }
    }

    /// Classification with the farthest-centroid chart rule.
    pub fn legacy() -> Self {
        Self {
            rule: LifezoneRule::Farthest,
            ..Self::default()
        }
    }

    /// Swaps inverted ranges back into order.
    pub fn sanitized(self) -> Self {
        let mut c = self;
        for (name, lo, hi) in [
            ("altitude", &mut c.min_altitude, &mut c.max_altitude),
            ("temperature", &mut c.min_temperature, &mut c.max_temperature),
            ("precipitation", &mut c.min_precipitation, &mut c.max_precipitation),
        ] {
            if *lo > *hi {
                warn!("biosphere {name} range is inverted ({lo} > {hi}), swapping");
                std::mem::swap(lo, hi);
            }
        }
        c
    }
}

/// Scales `v` in `[0, 1]` onto `[min, max]`. Returns `min` when the range is
/// empty.
pub fn convert(v: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return min;
    }
    (max - min) * v + min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        assert_eq!(convert(0.0, 0.0, 4000.0), 0.0);
        assert_eq!(convert(1.0, 0.0, 4000.0), 4000.0);
        assert_eq!(convert(0.25, 0.0, 48.0), 12.0);
        assert_eq!(convert(0.7, 5.0, 5.0), 5.0);
    }

    #[test]
    fn test_sanitized_swaps_inverted_range() {
        let c = BiosphereConfig {
            min_temperature: 30.0,
            max_temperature: 10.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(c.min_temperature, 10.0);
        assert_eq!(c.max_temperature, 30.0);
        assert_eq!(c.max_altitude, MAX_ALTITUDE);
    }

    #[test]
    fn test_deserialize_partial() {
        let c: BiosphereConfig = serde_json::from_str(r#"{"rule":"farthest"}"#).unwrap();
        assert_eq!(c, BiosphereConfig::legacy());
    }
}
