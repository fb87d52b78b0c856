//! Precipitation from clouds, rivers and proximity to water.

use super::config::{HydrosphereConfig, PrecipitationWeights};
use crate::field::ScalarField;

/// Inputs to [`PrecipitationComposer::compose`].
pub struct PrecipitationInputs<'a> {
    pub height: &'a ScalarField,
    pub cloud: &'a ScalarField,
    pub river_mask: &'a ScalarField,
    pub proximity: &'a ScalarField,
    pub equator: Option<&'a ScalarField>,
}

/// Weighted vector magnitude of the inputs, blurred, then normalized over
/// land only.
#[derive(Debug, Clone)]
pub struct PrecipitationComposer {
    pub weights: PrecipitationWeights,
    pub blur_radius: usize,
    pub sea_level: f32,
}

impl Default for PrecipitationComposer {
    fn default() -> Self {
        Self::from_config(&HydrosphereConfig::default())
    }
}

impl PrecipitationComposer {
    pub fn from_config(config: &HydrosphereConfig) -> Self {
        Self {
            weights: config.weights,
            blur_radius: config.blur_radius,
            sea_level: config.sea_level,
        }
    }

    /// Precipitation in `[0, 1]` on land, 0 on ocean. `None` if any input
    /// differs in size from `height`.
    ///
    /// The equator term only takes part when its weight is positive and the
    /// field is supplied.
    pub fn compose(&self, inputs: &PrecipitationInputs<'_>) -> Option<ScalarField> {
        let scaled = |field: &ScalarField, k: f32| {
            let mut f = field.clone();
            f.scale_by(k);
            f
        };

        let cloud = scaled(inputs.cloud, self.weights.cloud);
        let mut others = vec![
            scaled(inputs.river_mask, self.weights.river),
            scaled(inputs.proximity, self.weights.proximity),
        ];
        if let Some(equator) = inputs.equator.filter(|_| self.weights.equator > 0.0) {
            others.push(scaled(equator, self.weights.equator));
        }

        if !inputs.height.same_shape(&cloud) {
            return None;
        }
        let refs: Vec<&ScalarField> = others.iter().collect();
        let mut precipitation = cloud.combine_with(&refs)?;

        precipitation.sqrt();
        precipitation.blur(self.blur_radius);
        precipitation.normalize_where(&inputs.height.mask_above(self.sea_level));
        Some(precipitation)
    }
}
