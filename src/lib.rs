//! Procedural planet layer synthesis.
//!
//! This crate builds a world on a toroidal grid as a stack of layers: value
//! noise and tectonic plates form the crust, rivers erode it and feed
//! precipitation, wind and altitude set the temperature, and every land
//! cell is classified into a Holdridge life zone.

pub mod biomes;
pub mod climate;
pub mod field;
pub mod hydrosphere;
pub mod noise;
pub mod pipeline;
pub mod tectonics;
pub mod terrain;

pub use biomes::{classify_biosphere, Biosphere, BiosphereConfig, HoldridgeData, LifezoneRule, LifezoneType};
pub use climate::{Atmosphere, AtmosphereGenerator, ClimateConfig};
pub use field::ScalarField;
pub use hydrosphere::{Hydrosphere, HydrosphereConfig, HydrosphereGenerator, RiverNetwork};
pub use noise::{FieldGenerator, FieldSource, ValueNoiseConfig, ValueNoiseGenerator};
pub use pipeline::{generate_world, GenerationStage, Pipeline, PipelineError, World, WorldConfig};
pub use tectonics::{PlateConfig, PlateFieldGenerator};
pub use terrain::{Lithosphere, LithosphereGenerator, TerrainConfig};
