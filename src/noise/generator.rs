//! The field-generator contract and its trivial implementations.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::field::ScalarField;

/// Anything that can produce a `width x height` field from a random source.
///
/// A zero width or height falls back to the field defaults. Implementations
/// must draw all randomness from `rng` so that a seeded source gives a
/// reproducible field.
pub trait FieldGenerator: Send + Sync {
    /// Human-readable name used in log output.
    fn name(&self) -> &str;

    /// Produces a new field.
    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> ScalarField;
}

impl<G: FieldGenerator + ?Sized> FieldGenerator for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> ScalarField {
        (**self).generate(width, height, rng)
    }
}

/// Fills every cell with the same value. A value of 0 gives an empty map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantGenerator {
    pub value: f32,
}

impl ConstantGenerator {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    /// The all-zero field.
    pub fn empty() -> Self {
        Self { value: 0.0 }
    }
}

impl FieldGenerator for ConstantGenerator {
    fn name(&self) -> &str {
        "constant"
    }

    fn generate(&self, width: usize, height: usize, _rng: &mut dyn RngCore) -> ScalarField {
        ScalarField::filled(width, height, self.value)
    }
}

/// Distance from a reference row, inverted and normalized so the reference
/// row is 1.0 and the farthest row is 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquatorGenerator {
    /// Reference row. `None` selects the middle row. Rows past the bottom of
    /// the grid are clamped to the last row.
    pub row: Option<usize>,
}

impl EquatorGenerator {
    pub fn at_row(row: usize) -> Self {
        Self { row: Some(row) }
    }

    pub fn centered() -> Self {
        Self { row: None }
    }

    /// The row actually used for a grid of the given height.
    pub fn resolve_row(&self, height: usize) -> usize {
        let last = height.saturating_sub(1);
        self.row.unwrap_or(height / 2).min(last)
    }
}

impl FieldGenerator for EquatorGenerator {
    fn name(&self) -> &str {
        "equator distance"
    }

    fn generate(&self, width: usize, height: usize, _rng: &mut dyn RngCore) -> ScalarField {
        let mut field = ScalarField::new(width, height);
        let row = self.resolve_row(field.height());

        for y in 0..field.height() {
            let dist = y.abs_diff(row) as f32;
            for x in 0..field.width() {
                field.set(x, y, dist);
            }
        }

        field.invert();
        field.normalize();
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_constant_fills_every_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let field = ConstantGenerator::new(0.25).generate(5, 3, &mut rng);
        assert!(field.values().iter().all(|&v| v == 0.25));
        assert_eq!(field.len(), 15);
    }

    #[test]
    fn test_equator_row_is_one_and_farthest_row_is_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let field = EquatorGenerator::at_row(2).generate(4, 10, &mut rng);

        for x in 0..4 {
            assert_eq!(field.get(x, 2), 1.0);
            assert_eq!(field.get(x, 9), 0.0);
        }
        assert!(field.get(0, 1) > field.get(0, 0));
        assert_eq!(field.get(0, 1), field.get(0, 3));
    }

    #[test]
    fn test_equator_row_is_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let field = EquatorGenerator::at_row(500).generate(2, 8, &mut rng);
        assert_eq!(field.get(0, 7), 1.0);
        assert_eq!(field.get(0, 0), 0.0);
    }

    #[test]
    fn test_centered_equator() {
        assert_eq!(EquatorGenerator::centered().resolve_row(128), 64);
    }

    #[test]
    fn test_single_row_grid_is_all_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let field = EquatorGenerator::centered().generate(6, 1, &mut rng);
        assert!(field.values().iter().all(|&v| v == 0.0));
    }
}
