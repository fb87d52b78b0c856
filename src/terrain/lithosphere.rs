//! The crust layer: three raw fields and the height field derived from them.

use log::debug;
use rand::RngCore;

use super::classifier::TerrainClassifier;
use super::config::TerrainConfig;
use crate::field::{resolve_dimensions, ScalarField};
use crate::noise::FieldGenerator;

/// Raw crust layers of a world.
///
/// `tectonics` carries plate-scale activity, `thickness` the crust
/// thickness and `orogenic` finer geologic detail. They are combined as the
/// components of a vector to give the height field.
#[derive(Debug, Clone, PartialEq)]
pub struct Lithosphere {
    pub tectonics: ScalarField,
    pub thickness: ScalarField,
    pub orogenic: ScalarField,
}

impl Lithosphere {
    pub fn width(&self) -> usize {
        self.tectonics.width()
    }

    pub fn height(&self) -> usize {
        self.tectonics.height()
    }

    /// Classified height field. `None` if the layers differ in size.
    pub fn height_field(&self, config: &TerrainConfig) -> Option<ScalarField> {
        TerrainClassifier::new(*config).classify(&self.tectonics, &self.thickness, &self.orogenic)
    }
}

/// Produces a [`Lithosphere`] from three layer generators.
///
/// All three generators must be set before [`generate`](Self::generate)
/// yields a result.
#[derive(Default)]
pub struct LithosphereGenerator {
    width: usize,
    height: usize,
    tectonics: Option<Box<dyn FieldGenerator>>,
    thickness: Option<Box<dyn FieldGenerator>>,
    orogenic: Option<Box<dyn FieldGenerator>>,
}

impl LithosphereGenerator {
    /// A zero dimension falls back to the default grid size.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = resolve_dimensions(width, height);
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_tectonics(mut self, gen: impl FieldGenerator + 'static) -> Self {
        self.tectonics = Some(Box::new(gen));
        self
    }

    pub fn with_thickness(mut self, gen: impl FieldGenerator + 'static) -> Self {
        self.thickness = Some(Box::new(gen));
        self
    }

    pub fn with_orogenic(mut self, gen: impl FieldGenerator + 'static) -> Self {
        self.orogenic = Some(Box::new(gen));
        self
    }

    /// Generates the three layers in order (tectonics, thickness, orogenic)
    /// from `rng`. Returns `None` if any generator is unset.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Option<Lithosphere> {
        let (tectonics, thickness, orogenic) =
            match (&self.tectonics, &self.thickness, &self.orogenic) {
                (Some(t), Some(th), Some(o)) => (t, th, o),
                _ => {
                    debug!("lithosphere generator is missing a layer generator");
                    return None;
                }
            };

        let (w, h) = resolve_dimensions(self.width, self.height);
        debug!(
            "lithosphere layers: {}, {}, {}",
            tectonics.name(),
            thickness.name(),
            orogenic.name()
        );

        Some(Lithosphere {
            tectonics: tectonics.generate(w, h, rng),
            thickness: thickness.generate(w, h, rng),
            orogenic: orogenic.generate(w, h, rng),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{ConstantGenerator, ValueNoiseGenerator};
    use crate::tectonics::{PlateConfig, PlateFieldGenerator};
    use crate::terrain::TerrainBand;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn full_generator() -> LithosphereGenerator {
        LithosphereGenerator::new(48, 24)
            .with_tectonics(PlateFieldGenerator::new(PlateConfig { plate_count: 10 }))
            .with_thickness(ValueNoiseGenerator::default())
            .with_orogenic(ValueNoiseGenerator::default())
    }

    #[test]
    fn test_missing_generator_yields_none() {
        let gen = LithosphereGenerator::new(16, 8)
            .with_tectonics(ConstantGenerator::new(1.0))
            .with_thickness(ConstantGenerator::new(1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(gen.generate(&mut rng).is_none());
    }

    #[test]
    fn test_layers_share_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let litho = full_generator().generate(&mut rng).unwrap();
        assert_eq!(litho.width(), 48);
        assert_eq!(litho.height(), 24);
        assert_eq!(litho.thickness.len(), 48 * 24);
        assert_eq!(litho.orogenic.len(), 48 * 24);
    }

    #[test]
    fn test_height_field_matches_fractions() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let litho = full_generator().generate(&mut rng).unwrap();
        let config = TerrainConfig::default();
        let height = litho.height_field(&config).unwrap();

        let cells = height.len() as f32;
        let sea = height
            .values()
            .iter()
            .filter(|&&h| TerrainBand::of(h, &config) == TerrainBand::Sea)
            .count() as f32;
        assert!((sea - cells * config.percent_sea()).abs() <= 1.0);
    }

    #[test]
    fn test_zero_size_uses_defaults() {
        let gen = LithosphereGenerator::new(0, 0)
            .with_tectonics(ConstantGenerator::empty())
            .with_thickness(ConstantGenerator::empty())
            .with_orogenic(ConstantGenerator::empty());
        let litho = gen.generate(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(litho.width(), crate::field::DEFAULT_WIDTH);
        assert_eq!(litho.height(), crate::field::DEFAULT_HEIGHT);
    }
}
