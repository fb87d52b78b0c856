//! The water layer and the generator that produces it.

use log::debug;
use rand::RngCore;

use super::config::HydrosphereConfig;
use super::precipitation::{PrecipitationComposer, PrecipitationInputs};
use super::proximity::WaterProximity;
use super::river::{RiverNetwork, RiverNetworkBuilder};
use crate::field::ScalarField;
use crate::noise::{ConstantGenerator, FieldGenerator};

/// Everything the water layer produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Hydrosphere {
    sea_level: f32,
    cloud: ScalarField,
    equator: ScalarField,
    source_modifier: ScalarField,
    rivers: RiverNetwork,
    river_mask: ScalarField,
    proximity: ScalarField,
    precipitation: ScalarField,
    land_height: ScalarField,
}

impl Hydrosphere {
    pub fn sea_level(&self) -> f32 {
        self.sea_level
    }

    /// Annual cloud presence per cell.
    pub fn cloud_frequency(&self) -> &ScalarField {
        &self.cloud
    }

    /// 1.0 on the equator row, falling to 0.0 at the farthest row.
    pub fn equator(&self) -> &ScalarField {
        &self.equator
    }

    pub fn source_modifier(&self) -> &ScalarField {
        &self.source_modifier
    }

    pub fn rivers(&self) -> &RiverNetwork {
        &self.rivers
    }

    pub fn river_mask(&self) -> &ScalarField {
        &self.river_mask
    }

    /// Approximate closeness to water, 1 at the shore and 0 inland or at sea.
    pub fn water_proximity(&self) -> &ScalarField {
        &self.proximity
    }

    pub fn precipitation(&self) -> &ScalarField {
        &self.precipitation
    }

    /// Eroded height normalized over land cells; ocean is 0.
    pub fn land_height(&self) -> &ScalarField {
        &self.land_height
    }
}

/// Produces a [`Hydrosphere`] from a height field.
///
/// The cloud generator is required. A missing source-modifier or equator
/// generator falls back to an all-zero field.
#[derive(Default)]
pub struct HydrosphereGenerator {
    config: HydrosphereConfig,
    cloud: Option<Box<dyn FieldGenerator>>,
    source_modifier: Option<Box<dyn FieldGenerator>>,
    equator: Option<Box<dyn FieldGenerator>>,
}

impl HydrosphereGenerator {
    pub fn new(config: HydrosphereConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Default::default()
        }
    }

    pub fn config(&self) -> &HydrosphereConfig {
        &self.config
    }

    pub fn with_cloud(mut self, gen: impl FieldGenerator + 'static) -> Self {
        self.cloud = Some(Box::new(gen));
        self
    }

    pub fn with_source_modifier(mut self, gen: impl FieldGenerator + 'static) -> Self {
        self.source_modifier = Some(Box::new(gen));
        self
    }

    pub fn with_equator(mut self, gen: impl FieldGenerator + 'static) -> Self {
        self.equator = Some(Box::new(gen));
        self
    }

    /// Generates the water layer, eroding `height` in place along rivers.
    ///
    /// Layers are drawn from `rng` in the order cloud, equator, source
    /// modifier, then river growth. Returns `None` without touching `height`
    /// if the cloud generator is unset.
    pub fn generate(&self, height: &mut ScalarField, rng: &mut dyn RngCore) -> Option<Hydrosphere> {
        let Some(cloud_gen) = &self.cloud else {
            debug!("hydrosphere generator has no cloud generator");
            return None;
        };
        let (w, h) = (height.width(), height.height());
        let empty = ConstantGenerator::empty();

        let cloud = cloud_gen.generate(w, h, rng);
        let equator = match &self.equator {
            Some(gen) => gen.generate(w, h, rng),
            None => empty.generate(w, h, rng),
        };
        let source_modifier = match &self.source_modifier {
            Some(gen) => gen.generate(w, h, rng),
            None => empty.generate(w, h, rng),
        };

        let rivers = RiverNetworkBuilder::from_config(&self.config).build(
            height,
            &cloud,
            &source_modifier,
            rng,
        )?;
        let river_mask = rivers.river_mask();

        let proximity = WaterProximity::new(self.config.bucket_size, self.config.sea_level)
            .compute(height, &river_mask)?;

        let precipitation = PrecipitationComposer::from_config(&self.config).compose(
            &PrecipitationInputs {
                height: &*height,
                cloud: &cloud,
                river_mask: &river_mask,
                proximity: &proximity,
                equator: Some(&equator),
            },
        )?;

        let mut land_height = height.clone();
        land_height.normalize_where(&height.mask_above(self.config.sea_level));

        Some(Hydrosphere {
            sea_level: self.config.sea_level,
            cloud,
            equator,
            source_modifier,
            rivers,
            river_mask,
            proximity,
            precipitation,
            land_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{EquatorGenerator, ValueNoiseGenerator};
    use crate::terrain::{LithosphereGenerator, TerrainConfig};
    use crate::tectonics::PlateFieldGenerator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn height_field(seed: u64) -> ScalarField {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        LithosphereGenerator::new(64, 32)
            .with_tectonics(PlateFieldGenerator::default())
            .with_thickness(ValueNoiseGenerator::default())
            .with_orogenic(ValueNoiseGenerator::default())
            .generate(&mut rng)
            .unwrap()
            .height_field(&TerrainConfig::default())
            .unwrap()
    }

    fn generator() -> HydrosphereGenerator {
        HydrosphereGenerator::new(HydrosphereConfig {
            river_count: 20,
            bucket_size: 8,
            ..Default::default()
        })
        .with_cloud(ValueNoiseGenerator::default())
        .with_source_modifier(ValueNoiseGenerator::default())
        .with_equator(EquatorGenerator::centered())
    }

    #[test]
    fn test_missing_cloud_generator_yields_none() {
        let mut height = height_field(1);
        let before = height.clone();
        let gen = HydrosphereGenerator::new(HydrosphereConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(gen.generate(&mut height, &mut rng).is_none());
        assert_eq!(height, before);
    }

    #[test]
    fn test_layers_are_consistent() {
        let mut height = height_field(2);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let hydro = generator().generate(&mut height, &mut rng).unwrap();
        let sea = hydro.sea_level();

        assert!(!hydro.rivers().is_empty());
        for i in 0..height.len() {
            let p = hydro.precipitation().get_index(i);
            let prox = hydro.water_proximity().get_index(i);
            assert!((0.0..=1.0).contains(&p));
            assert!((0.0..=1.0).contains(&prox));
            if height.get_index(i) <= sea {
                assert_eq!(p, 0.0);
                assert_eq!(prox, 0.0);
                assert_eq!(hydro.land_height().get_index(i), 0.0);
            }
        }
        assert_eq!(hydro.equator().max(), 1.0);
    }

    #[test]
    fn test_optional_generators_default_to_empty() {
        let mut height = height_field(3);
        let gen = HydrosphereGenerator::new(HydrosphereConfig {
            river_count: 5,
            ..Default::default()
        })
        .with_cloud(ValueNoiseGenerator::default());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let hydro = gen.generate(&mut height, &mut rng).unwrap();

        assert!(hydro.equator().values().iter().all(|&v| v == 0.0));
        assert!(hydro.source_modifier().values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_generation_is_reproducible() {
        let mut h1 = height_field(4);
        let mut h2 = h1.clone();
        let a = generator().generate(&mut h1, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = generator().generate(&mut h2, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(h1, h2);
    }
}
