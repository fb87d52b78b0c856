//! Serializable choice of generator for a raw layer.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{ConstantGenerator, EquatorGenerator, FieldGenerator, ValueNoiseConfig, ValueNoiseGenerator};
use crate::field::ScalarField;
use crate::tectonics::{PlateConfig, PlateFieldGenerator};

/// Which generator produces a given layer.
///
/// Lets a world configuration pick, per layer, between the generator kinds
/// without holding trait objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSource {
    ValueNoise(ValueNoiseConfig),
    Constant(ConstantGenerator),
    Equator(EquatorGenerator),
    Plates(PlateConfig),
}

impl Default for FieldSource {
    fn default() -> Self {
        FieldSource::ValueNoise(ValueNoiseConfig::default())
    }
}

impl FieldSource {
    /// Boxes the described generator.
    pub fn build(&self) -> Box<dyn FieldGenerator> {
        match self {
            FieldSource::ValueNoise(config) => Box::new(ValueNoiseGenerator::new(*config)),
            FieldSource::Constant(gen) => Box::new(*gen),
            FieldSource::Equator(gen) => Box::new(*gen),
            FieldSource::Plates(config) => Box::new(PlateFieldGenerator::new(config.clone())),
        }
    }
}

impl FieldGenerator for FieldSource {
    fn name(&self) -> &str {
        match self {
            FieldSource::ValueNoise(_) => "value noise",
            FieldSource::Constant(_) => "constant",
            FieldSource::Equator(_) => "equator distance",
            FieldSource::Plates(_) => "tectonic plates",
        }
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> ScalarField {
        self.build().generate(width, height, rng)
    }
}
