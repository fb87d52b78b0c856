//! Temperature composition.

use super::ClimateConfig;
use crate::field::ScalarField;

/// Combines latitude, wind and altitude into a temperature field.
#[derive(Debug, Clone, Default)]
pub struct TemperatureComposer {
    pub config: ClimateConfig,
}

impl TemperatureComposer {
    pub fn new(config: ClimateConfig) -> Self {
        Self { config }
    }

    /// Temperature in `[0, 1]` on land, 0 on ocean.
    ///
    /// Height enters inverted (`max - h`) so high ground is cold. `None` if
    /// the fields differ in size.
    pub fn compose(
        &self,
        height: &ScalarField,
        equator: &ScalarField,
        wind: &ScalarField,
    ) -> Option<ScalarField> {
        if !height.same_shape(equator) {
            return None;
        }

        let mut lat = equator.clone();
        lat.scale_by(self.config.equator_weight);
        let mut gusts = wind.clone();
        gusts.scale_by(self.config.wind_weight);
        let mut altitude = height.clone();
        altitude.invert();
        altitude.scale_by(self.config.altitude_weight);

        let mut temperature = lat.combine_with(&[&gusts, &altitude])?;
        temperature.sqrt();
        temperature.normalize_where(&height.mask_above(self.config.sea_level));
        Some(temperature)
    }
}
