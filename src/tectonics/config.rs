//! Configuration for plate growth.

use log::warn;
use serde::{Deserialize, Serialize};

/// Plate count used when the configured count is 0.
pub const DEFAULT_PLATE_COUNT: usize = 60;

/// Configuration parameters for plate growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    /// Number of plates grown across the grid.
    pub plate_count: usize,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            plate_count: DEFAULT_PLATE_COUNT,
        }
    }
}

impl PlateConfig {
    /// Many small plates.
    pub fn fragmented() -> Self {
        Self { plate_count: 120 }
    }

    /// Few large plates.
    pub fn supercontinent() -> Self {
        Self { plate_count: 8 }
    }

    /// Plate count that can actually be seeded on a grid of `cells` cells.
    pub fn effective_count(&self, cells: usize) -> usize {
        let mut count = self.plate_count;
        if count == 0 {
            warn!("plate count 0 replaced by {}", DEFAULT_PLATE_COUNT);
            count = DEFAULT_PLATE_COUNT;
        }
        if count > cells {
            warn!("plate count {} exceeds {} cells; capped", count, cells);
            count = cells;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(PlateConfig::default().plate_count, 60);
    }

    #[test]
    fn test_presets() {
        assert!(PlateConfig::fragmented().plate_count > PlateConfig::default().plate_count);
        assert!(PlateConfig::supercontinent().plate_count < PlateConfig::default().plate_count);
    }

    #[test]
    fn test_effective_count() {
        assert_eq!(PlateConfig { plate_count: 0 }.effective_count(10_000), 60);
        assert_eq!(PlateConfig { plate_count: 60 }.effective_count(16), 16);
        assert_eq!(PlateConfig { plate_count: 2 }.effective_count(16), 2);
    }
}
