//! The atmosphere layer: wind and temperature.

use log::debug;
use rand::RngCore;

use super::temperature::TemperatureComposer;
use super::ClimateConfig;
use crate::field::ScalarField;
use crate::noise::FieldGenerator;

/// Wind and the temperature derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Atmosphere {
    wind: ScalarField,
    temperature: ScalarField,
}

impl Atmosphere {
    pub fn wind(&self) -> &ScalarField {
        &self.wind
    }

    /// Temperature in `[0, 1]` over land; ocean cells are 0.
    pub fn temperature_field(&self) -> &ScalarField {
        &self.temperature
    }
}

/// Produces an [`Atmosphere`] from a height field and an equator map.
#[derive(Default)]
pub struct AtmosphereGenerator {
    config: ClimateConfig,
    wind: Option<Box<dyn FieldGenerator>>,
}

impl AtmosphereGenerator {
    pub fn new(config: ClimateConfig) -> Self {
        Self {
            config: config.sanitized(),
            wind: None,
        }
    }

    pub fn with_wind(mut self, gen: impl FieldGenerator + 'static) -> Self {
        self.wind = Some(Box::new(gen));
        self
    }

    /// `None` if the wind generator is unset or the fields differ in size.
    pub fn generate(
        &self,
        height: &ScalarField,
        equator: &ScalarField,
        rng: &mut dyn RngCore,
    ) -> Option<Atmosphere> {
        let Some(wind_gen) = &self.wind else {
            debug!("atmosphere generator has no wind generator");
            return None;
        };

        let wind = wind_gen.generate(height.width(), height.height(), rng);
        let temperature = TemperatureComposer::new(self.config).compose(height, equator, &wind)?;
        Some(Atmosphere { wind, temperature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{EquatorGenerator, ValueNoiseGenerator};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_requires_wind_generator() {
        let height = ScalarField::filled(8, 8, 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let equator = EquatorGenerator::centered().generate(8, 8, &mut rng);
        assert!(AtmosphereGenerator::default().generate(&height, &equator, &mut rng).is_none());
    }

    #[test]
    fn test_temperature_is_land_normalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let height = ValueNoiseGenerator::default().generate(32, 16, &mut rng);
        let equator = EquatorGenerator::centered().generate(32, 16, &mut rng);
        let atmo = AtmosphereGenerator::new(ClimateConfig::default())
            .with_wind(ValueNoiseGenerator::default())
            .generate(&height, &equator, &mut rng)
            .unwrap();

        let t = atmo.temperature_field();
        assert_eq!(t.len(), 32 * 16);
        for i in 0..t.len() {
            if height.get_index(i) <= 0.37 {
                assert_eq!(t.get_index(i), 0.0);
            } else {
                assert!((0.0..=1.0).contains(&t.get_index(i)));
            }
        }
        assert_eq!(t.max(), 1.0);
    }
}
