//! Randomized region growing of tectonic plates.

use log::debug;
use rand::{Rng, RngCore};

use super::config::PlateConfig;
use crate::field::wrap::neighbor_4_index;
use crate::field::{resolve_dimensions, ScalarField};
use crate::noise::FieldGenerator;

const UNCLAIMED: usize = usize::MAX;

/// The result of plate growth: which plate owns each cell, and each plate's
/// scalar attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateMap {
    width: usize,
    height: usize,
    owner: Vec<usize>,
    seeds: Vec<usize>,
    values: Vec<f32>,
}

impl PlateMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plate_count(&self) -> usize {
        self.values.len()
    }

    /// Owning plate of every cell, row-major.
    pub fn owners(&self) -> &[usize] {
        &self.owner
    }

    pub fn owner_of(&self, x: usize, y: usize) -> usize {
        self.owner[y * self.width + x]
    }

    /// Flat index of the cell each plate grew from.
    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    /// Scalar attribute of each plate, in `[0, 1)`.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of cells owned by `plate`.
    pub fn plate_size(&self, plate: usize) -> usize {
        self.owner.iter().filter(|&&p| p == plate).count()
    }

    /// Piecewise-constant field: each cell takes its plate's value.
    pub fn to_field(&self) -> ScalarField {
        let mut field = ScalarField::new(self.width, self.height);
        for (i, &plate) in self.owner.iter().enumerate() {
            field.set_index(i, self.values[plate]);
        }
        field
    }
}

/// Grows plates and emits their values as a field.
#[derive(Debug, Clone, Default)]
pub struct PlateFieldGenerator {
    pub config: PlateConfig,
}

impl PlateFieldGenerator {
    pub fn new(config: PlateConfig) -> Self {
        Self { config }
    }

    /// Partitions the grid into plates.
    ///
    /// Seeds are distinct cells picked uniformly at random. Each round, every
    /// plate with a non-empty frontier removes one random frontier cell and
    /// claims its unclaimed neighbours. Growth ends when no frontier has
    /// cells left; on a torus that means every cell is claimed.
    pub fn grow(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> PlateMap {
        let (width, height) = resolve_dimensions(width, height);
        let cells = width * height;
        let count = self.config.effective_count(cells);

        let mut owner = vec![UNCLAIMED; cells];
        let mut seeds = Vec::with_capacity(count);
        let mut frontier: Vec<Vec<usize>> = Vec::with_capacity(count);

        for plate in 0..count {
            let seed = loop {
                let x = rng.random_range(0..width);
                let y = rng.random_range(0..height);
                let i = y * width + x;
                if owner[i] == UNCLAIMED {
                    break i;
                }
            };
            owner[seed] = plate;
            seeds.push(seed);
            frontier.push(vec![seed]);
        }

        let mut rounds = 0usize;
        loop {
            let mut grew = false;

            for (plate, edge) in frontier.iter_mut().enumerate() {
                if edge.is_empty() {
                    continue;
                }
                grew = true;

                let pick = rng.random_range(0..edge.len());
                let cell = edge.swap_remove(pick);

                for n in neighbor_4_index(width, height, cell) {
                    if owner[n] == UNCLAIMED {
                        owner[n] = plate;
                        edge.push(n);
                    }
                }
            }

            if !grew {
                break;
            }
            rounds += 1;
        }

        let values = (0..count).map(|_| rng.random::<f32>()).collect();
        debug!("grew {} plates on {}x{} in {} rounds", count, width, height, rounds);

        PlateMap {
            width,
            height,
            owner,
            seeds,
            values,
        }
    }
}

impl FieldGenerator for PlateFieldGenerator {
    fn name(&self) -> &str {
        "tectonic plates"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> ScalarField {
        self.grow(width, height, rng).to_field()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    fn assert_connected(map: &PlateMap, plate: usize) {
        let (w, h) = (map.width(), map.height());
        let start = map.seeds()[plate];
        let mut seen = vec![false; w * h];
        let mut queue = VecDeque::from([start]);
        seen[start] = true;
        let mut reached = 0;

        while let Some(cell) = queue.pop_front() {
            reached += 1;
            for n in neighbor_4_index(w, h, cell) {
                if !seen[n] && map.owners()[n] == plate {
                    seen[n] = true;
                    queue.push_back(n);
                }
            }
        }
        assert_eq!(reached, map.plate_size(plate), "plate {plate} is not contiguous");
    }

    #[test]
    fn test_two_plates_cover_small_grid() {
        let gen = PlateFieldGenerator::new(PlateConfig { plate_count: 2 });
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let map = gen.grow(4, 4, &mut rng);

        assert_eq!(map.owners().len(), 16);
        assert!(map.owners().iter().all(|&p| p < 2));
        assert_eq!(map.plate_size(0) + map.plate_size(1), 16);
        assert!(map.plate_size(0) > 0 && map.plate_size(1) > 0);
    }

    #[test]
    fn test_plates_are_contiguous() {
        let gen = PlateFieldGenerator::new(PlateConfig { plate_count: 12 });
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let map = gen.grow(40, 20, &mut rng);
        for plate in 0..map.plate_count() {
            assert_connected(&map, plate);
        }
    }

    #[test]
    fn test_seeds_are_distinct_and_owned() {
        let gen = PlateFieldGenerator::new(PlateConfig { plate_count: 30 });
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let map = gen.grow(16, 8, &mut rng);

        let mut seeds = map.seeds().to_vec();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), 30);
        for (plate, &seed) in map.seeds().iter().enumerate() {
            assert_eq!(map.owners()[seed], plate);
        }
    }

    #[test]
    fn test_field_is_piecewise_constant() {
        let gen = PlateFieldGenerator::new(PlateConfig { plate_count: 5 });
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let map = gen.grow(20, 10, &mut rng);
        let field = map.to_field();

        for (i, &plate) in map.owners().iter().enumerate() {
            assert_eq!(field.get_index(i), map.values()[plate]);
        }
        assert!(map.values().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_more_plates_than_cells_is_capped() {
        let gen = PlateFieldGenerator::new(PlateConfig { plate_count: 100 });
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let map = gen.grow(3, 3, &mut rng);
        assert_eq!(map.plate_count(), 9);
        for plate in 0..9 {
            assert_eq!(map.plate_size(plate), 1);
        }
    }

    #[test]
    fn test_growth_is_reproducible() {
        let gen = PlateFieldGenerator::default();
        let a = gen.grow(64, 32, &mut ChaCha8Rng::seed_from_u64(2024));
        let b = gen.grow(64, 32, &mut ChaCha8Rng::seed_from_u64(2024));
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_every_cell_claimed_exactly_once(
            seed in any::<u64>(),
            w in 1usize..24,
            h in 1usize..24,
            plates in 1usize..20,
        ) {
            let gen = PlateFieldGenerator::new(PlateConfig { plate_count: plates });
            let map = gen.grow(w, h, &mut ChaCha8Rng::seed_from_u64(seed));
            let count = map.plate_count();

            prop_assert_eq!(map.owners().len(), w * h);
            prop_assert!(map.owners().iter().all(|&p| p < count));
            let total: usize = (0..count).map(|p| map.plate_size(p)).sum();
            prop_assert_eq!(total, w * h);
        }
    }
}
