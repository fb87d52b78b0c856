//! World data and the configuration that drives its generation.

use serde::{Deserialize, Serialize};

use crate::biomes::{Biosphere, BiosphereConfig};
use crate::climate::{Atmosphere, ClimateConfig};
use crate::field::{resolve_dimensions, ScalarField, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::hydrosphere::{Hydrosphere, HydrosphereConfig, RiverNetwork};
use crate::noise::{EquatorGenerator, FieldSource, ValueNoiseConfig};
use crate::tectonics::PlateConfig;
use crate::terrain::{Lithosphere, TerrainConfig};

/// Everything needed to generate a world from scratch.
///
/// Each raw layer is described by a [`FieldSource`], so a configuration can
/// be stored as JSON and replayed. Equal configurations produce equal worlds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid width in cells. 0 falls back to the default.
    pub width: usize,
    /// Grid height in cells. 0 falls back to the default.
    pub height: usize,
    /// Master seed. Each stage derives its own random stream from it.
    pub seed: u64,
    /// Heights at or below this value are ocean. Replaces the sea level of
    /// the hydrosphere, climate and biosphere configs, so every layer uses
    /// the same land mask.
    pub sea_level: f32,

    // --- Lithosphere ---
    pub plates: PlateConfig,
    pub thickness: FieldSource,
    pub orogenic: FieldSource,
    pub terrain: TerrainConfig,

    // --- Hydrosphere ---
    pub cloud: FieldSource,
    pub source_modifier: FieldSource,
    pub equator: EquatorGenerator,
    pub hydrosphere: HydrosphereConfig,

    // --- Atmosphere ---
    pub wind: FieldSource,
    pub climate: ClimateConfig,

    // --- Biosphere ---
    pub biosphere: BiosphereConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 0,
            sea_level: 0.37,

            plates: PlateConfig::default(),
            thickness: FieldSource::ValueNoise(ValueNoiseConfig {
                octaves: 16,
                persistence: 0.25,
            }),
            orogenic: FieldSource::ValueNoise(ValueNoiseConfig::default()),
            terrain: TerrainConfig::default(),

            cloud: FieldSource::ValueNoise(ValueNoiseConfig {
                octaves: 16,
                persistence: 0.5,
            }),
            source_modifier: FieldSource::ValueNoise(ValueNoiseConfig::smooth()),
            equator: EquatorGenerator::centered(),
            hydrosphere: HydrosphereConfig::default(),

            wind: FieldSource::ValueNoise(ValueNoiseConfig::smooth()),
            climate: ClimateConfig::default(),

            biosphere: BiosphereConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Earth-like world of the given size and seed.
    pub fn earth_like(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            ..Self::default()
        }
    }

    /// Many small islands, wetter air and many rivers.
    pub fn archipelago(width: usize, height: usize, seed: u64) -> Self {
        Self {
            plates: PlateConfig::fragmented(),
            terrain: TerrainConfig::archipelago(),
            hydrosphere: HydrosphereConfig::wet(),
            ..Self::earth_like(width, height, seed)
        }
    }

    /// A few large continents with dry interiors.
    pub fn pangaea(width: usize, height: usize, seed: u64) -> Self {
        Self {
            plates: PlateConfig::supercontinent(),
            terrain: TerrainConfig::continental(),
            hydrosphere: HydrosphereConfig::arid(),
            ..Self::earth_like(width, height, seed)
        }
    }

    /// Grid size after falling back to defaults for zero dimensions.
    pub fn dimensions(&self) -> (usize, usize) {
        resolve_dimensions(self.width, self.height)
    }

    /// Hydrosphere parameters at the world sea level.
    pub fn hydrosphere_config(&self) -> HydrosphereConfig {
        HydrosphereConfig {
            sea_level: self.sea_level,
            ..self.hydrosphere.clone()
        }
    }

    /// Climate parameters at the world sea level.
    pub fn climate_config(&self) -> ClimateConfig {
        ClimateConfig {
            sea_level: self.sea_level,
            ..self.climate
        }
    }

    /// Biosphere parameters at the world sea level.
    pub fn biosphere_config(&self) -> BiosphereConfig {
        BiosphereConfig {
            sea_level: self.sea_level,
            ..self.biosphere
        }
    }
}

/// A generated world. Layers are `None` until the stage producing them has
/// run.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) seed: u64,
    pub(crate) lithosphere: Option<Lithosphere>,
    pub(crate) height_field: Option<ScalarField>,
    pub(crate) hydrosphere: Option<Hydrosphere>,
    pub(crate) atmosphere: Option<Atmosphere>,
    pub(crate) biosphere: Option<Biosphere>,
}

impl World {
    /// An empty world sized and seeded from `config`.
    pub fn new(config: &WorldConfig) -> Self {
        let (width, height) = config.dimensions();
        Self {
            width,
            height,
            seed: config.seed,
            lithosphere: None,
            height_field: None,
            hydrosphere: None,
            atmosphere: None,
            biosphere: None,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn lithosphere(&self) -> Option<&Lithosphere> {
        self.lithosphere.as_ref()
    }

    /// Classified height. Eroded along rivers once the hydrosphere exists.
    pub fn height(&self) -> Option<&ScalarField> {
        self.height_field.as_ref()
    }

    pub fn hydrosphere(&self) -> Option<&Hydrosphere> {
        self.hydrosphere.as_ref()
    }

    pub fn rivers(&self) -> Option<&RiverNetwork> {
        self.hydrosphere.as_ref().map(|h| h.rivers())
    }

    pub fn precipitation(&self) -> Option<&ScalarField> {
        self.hydrosphere.as_ref().map(|h| h.precipitation())
    }

    pub fn atmosphere(&self) -> Option<&Atmosphere> {
        self.atmosphere.as_ref()
    }

    pub fn temperature(&self) -> Option<&ScalarField> {
        self.atmosphere.as_ref().map(|a| a.temperature_field())
    }

    pub fn biosphere(&self) -> Option<&Biosphere> {
        self.biosphere.as_ref()
    }

    /// True once every layer has been generated.
    pub fn is_complete(&self) -> bool {
        self.lithosphere.is_some()
            && self.height_field.is_some()
            && self.hydrosphere.is_some()
            && self.atmosphere.is_some()
            && self.biosphere.is_some()
    }
}
