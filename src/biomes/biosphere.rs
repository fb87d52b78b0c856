//! Per-cell Holdridge classification of a world.

use log::debug;

use super::config::{convert, BiosphereConfig};
use super::holdridge::{HoldridgeData, LifezoneType};
use crate::field::ScalarField;

/// One optional [`HoldridgeData`] per cell; ocean cells hold `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Biosphere {
    width: usize,
    height: usize,
    cells: Vec<Option<HoldridgeData>>,
}

impl Biosphere {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Record at `(x, y)`. `None` for ocean cells and out-of-range
    /// coordinates.
    pub fn get(&self, x: usize, y: usize) -> Option<&HoldridgeData> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x].as_ref()
    }

    pub fn cells(&self) -> &[Option<HoldridgeData>] {
        &self.cells
    }

    pub fn land_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Life zone per cell, `None` on ocean.
    pub fn lifezones(&self) -> Vec<Option<LifezoneType>> {
        self.cells.iter().map(|c| c.map(|d| d.lifezone)).collect()
    }

    /// Chart hexagon index per cell as a field; ocean is -1.
    pub fn hexagon_field(&self) -> ScalarField {
        let data = self
            .cells
            .iter()
            .map(|c| c.map_or(-1.0, |d| d.hexagon as f32))
            .collect();
        ScalarField::from_vec(self.width, self.height, data)
            .unwrap_or_else(|| ScalarField::filled(self.width, self.height, -1.0))
    }

    /// Number of land cells in each life zone, ordered by [`LifezoneType::as_u8`].
    pub fn lifezone_histogram(&self) -> Vec<(LifezoneType, usize)> {
        let mut counts: Vec<(LifezoneType, usize)> = Vec::new();
        for d in self.cells.iter().flatten() {
            match counts.iter_mut().find(|(t, _)| *t == d.lifezone) {
                Some((_, n)) => *n += 1,
                None => counts.push((d.lifezone, 1)),
            }
        }
        counts.sort_by_key(|(t, _)| t.as_u8());
        counts
    }
}

/// Classifies every land cell of a world.
///
/// `height`, `temperature` and `precipitation` are normalized fields; each
/// land value is scaled into its physical range from `config` first. Returns
/// `None` if the fields differ in size.
pub fn classify_biosphere(
    height: &ScalarField,
    temperature: &ScalarField,
    precipitation: &ScalarField,
    config: &BiosphereConfig,
) -> Option<Biosphere> {
    if !height.same_shape(temperature) || !height.same_shape(precipitation) {
        debug!("biosphere inputs differ in size");
        return None;
    }
    let config = config.sanitized();

    let cells = (0..height.len())
        .map(|i| {
            let h = height.get_index(i);
            if h <= config.sea_level {
                return None;
            }
            let altitude = convert(h as f64, config.min_altitude, config.max_altitude);
            let biotemperature = convert(
                temperature.get_index(i) as f64,
                config.min_temperature,
                config.max_temperature,
            );
            let precip = convert(
                precipitation.get_index(i) as f64,
                config.min_precipitation,
                config.max_precipitation,
            );
            Some(HoldridgeData::compute_with_rule(biotemperature, precip, altitude, config.rule))
        })
        .collect();

    Some(Biosphere {
        width: height.width(),
        height: height.height(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::LifezoneRule;

    fn inputs() -> (ScalarField, ScalarField, ScalarField) {
        let mut height = ScalarField::filled(4, 2, 0.8);
        height.set(0, 0, 0.1);
        height.set(1, 0, 0.37);
        let mut temperature = ScalarField::filled(4, 2, 0.5);
        temperature.set(3, 1, 0.0);
        let precipitation = ScalarField::filled(4, 2, 0.05);
        (height, temperature, precipitation)
    }

    #[test]
    fn test_ocean_cells_have_no_record() {
        let (h, t, p) = inputs();
        let bio = classify_biosphere(&h, &t, &p, &BiosphereConfig::default()).unwrap();
        assert!(bio.get(0, 0).is_none());
        assert!(bio.get(1, 0).is_none());
        assert!(bio.get(2, 0).is_some());
        assert_eq!(bio.land_cells(), 6);
        assert!(bio.get(4, 0).is_none());
        assert!(bio.get(0, 2).is_none());
    }

    #[test]
    fn test_values_are_scaled_into_physical_ranges() {
        let (h, t, p) = inputs();
        let config = BiosphereConfig::default();
        let bio = classify_biosphere(&h, &t, &p, &config).unwrap();
        let d = bio.get(2, 0).unwrap();
        assert!((d.altitude - convert(0.8f32 as f64, 0.0, 4000.0)).abs() < 1e-9);
        assert_eq!(d.biotemperature, 24.0);
        let cold = bio.get(3, 1).unwrap();
        assert_eq!(cold.biotemperature, 0.0);
        assert_eq!(cold.altitude_belt, crate::biomes::AltitudeBelt::Nival);
    }

    #[test]
    fn test_rule_changes_lifezones() {
        let (h, t, p) = inputs();
        let nearest = classify_biosphere(&h, &t, &p, &BiosphereConfig::default()).unwrap();
        let farthest = classify_biosphere(&h, &t, &p, &BiosphereConfig::legacy()).unwrap();
        assert_ne!(nearest, farthest);
        assert!(farthest.cells().iter().flatten().all(|d| d.hexagon == 29));
        assert_eq!(BiosphereConfig::legacy().rule, LifezoneRule::Farthest);
    }

    #[test]
    fn test_hexagon_field_and_histogram() {
        let (h, t, p) = inputs();
        let bio = classify_biosphere(&h, &t, &p, &BiosphereConfig::default()).unwrap();
        let hex = bio.hexagon_field();
        assert_eq!(hex.get(0, 0), -1.0);
        assert!(hex.get(2, 0) >= 0.0);
        let total: usize = bio.lifezone_histogram().iter().map(|(_, n)| n).sum();
        assert_eq!(total, bio.land_cells());
        assert_eq!(bio.lifezones().iter().filter(|z| z.is_some()).count(), 6);
    }

    #[test]
    fn test_mismatched_fields() {
        let h = ScalarField::new(4, 2);
        let t = ScalarField::new(4, 3);
        assert!(classify_biosphere(&h, &t, &h, &BiosphereConfig::default()).is_none());
    }
}
