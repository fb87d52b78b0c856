//! Approximate proximity to water.
//!
//! The grid is cut into square buckets. Each bucket that contains water
//! (ocean or river) is reduced to the mean position of its water cells, and a
//! land cell's distance to water is its distance to the nearest such mean.
//! This costs one lookup per bucket instead of one per water cell, at the
//! price of accuracy. Distances do not wrap around the grid edges.

use glam::Vec2;

use super::config::DEFAULT_BUCKET_SIZE;
use crate::field::ScalarField;

/// Bucketed distance-to-water approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterProximity {
    pub bucket_size: usize,
    pub sea_level: f32,
}

impl WaterProximity {
    /// A `bucket_size` of 0 falls back to [`DEFAULT_BUCKET_SIZE`].
    pub fn new(bucket_size: usize, sea_level: f32) -> Self {
        let bucket_size = if bucket_size == 0 {
            DEFAULT_BUCKET_SIZE
        } else {
            bucket_size
        };
        Self {
            bucket_size,
            sea_level,
        }
    }

    /// Mean water position of every bucket that holds water.
    pub fn water_centroids(&self, height: &ScalarField, river_mask: &ScalarField) -> Vec<Vec2> {
        let (w, h) = (height.width(), height.height());
        let b = self.bucket_size.max(1);
        let cols = w.div_ceil(b);
        let rows = h.div_ceil(b);

        let mut sums = vec![Vec2::ZERO; cols * rows];
        let mut counts = vec![0u32; cols * rows];

        for y in 0..h {
            for x in 0..w {
                if self.is_water(height, river_mask, y * w + x) {
                    let bucket = (y / b) * cols + x / b;
                    sums[bucket] += Vec2::new(x as f32, y as f32);
                    counts[bucket] += 1;
                }
            }
        }

        sums.into_iter()
            .zip(counts)
            .filter(|&(_, n)| n > 0)
            .map(|(sum, n)| sum / n as f32)
            .collect()
    }

    /// Distance from each cell to the nearest water centroid; 0 on water and
    /// everywhere when the grid holds no water.
    pub fn raw_distance(&self, height: &ScalarField, river_mask: &ScalarField) -> Option<ScalarField> {
        if !height.same_shape(river_mask) {
            return None;
        }
        let centroids = self.water_centroids(height, river_mask);
        let w = height.width();
        let mut dist = ScalarField::new(w, height.height());

        if centroids.is_empty() {
            return Some(dist);
        }

        for i in 0..dist.len() {
            if self.is_water(height, river_mask, i) {
                continue;
            }
            let p = Vec2::new((i % w) as f32, (i / w) as f32);
            let nearest = centroids
                .iter()
                .map(|c| p.distance(*c))
                .fold(f32::INFINITY, f32::min);
            dist.set_index(i, nearest);
        }

        Some(dist)
    }

    /// Proximity in `[0, 1]`: 1 next to water, 0 at the driest land cell and
    /// on every ocean cell. Normalized over land only.
    pub fn compute(&self, height: &ScalarField, river_mask: &ScalarField) -> Option<ScalarField> {
        let mut proximity = self.raw_distance(height, river_mask)?;
        let land = height.mask_above(self.sea_level);
        proximity.normalize_where(&land);

        for (i, &is_land) in land.iter().enumerate() {
            let v = if is_land { 1.0 - proximity.get_index(i) } else { 0.0 };
            proximity.set_index(i, v);
        }

        Some(proximity)
    }

    fn is_water(&self, height: &ScalarField, river_mask: &ScalarField, index: usize) -> bool {
        height.get_index(index) <= self.sea_level || river_mask.get_index(index) == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left `sea_cols` columns are ocean, the rest land at 0.8.
    fn coast(w: usize, h: usize, sea_cols: usize) -> ScalarField {
        let mut f = ScalarField::filled(w, h, 0.8);
        for y in 0..h {
            for x in 0..sea_cols {
                f.set(x, y, 0.1);
            }
        }
        f
    }

    #[test]
    fn test_zero_bucket_size_uses_default() {
        assert_eq!(WaterProximity::new(0, 0.37).bucket_size, DEFAULT_BUCKET_SIZE);
        assert_eq!(WaterProximity::new(3, 0.37).bucket_size, 3);
    }

    #[test]
    fn test_centroids_per_bucket() {
        let height = coast(8, 4, 2);
        let mask = ScalarField::new(8, 4);
        let centroids = WaterProximity::new(4, 0.37).water_centroids(&height, &mask);
        assert_eq!(centroids, vec![Vec2::new(0.5, 1.5)]);
    }

    #[test]
    fn test_proximity_falls_off_inland() {
        let height = coast(12, 3, 1);
        let mask = ScalarField::new(12, 3);
        let prox = WaterProximity::new(1, 0.37).compute(&height, &mask).unwrap();

        for y in 0..3 {
            assert_eq!(prox.get(0, y), 0.0);
            assert_eq!(prox.get(1, y), 1.0);
            assert_eq!(prox.get(11, y), 0.0);
            for x in 1..11 {
                assert!(prox.get(x, y) >= prox.get(x + 1, y));
            }
        }
    }

    #[test]
    fn test_river_cells_count_as_water() {
        let height = ScalarField::filled(6, 1, 0.8);
        let mut mask = ScalarField::new(6, 1);
        mask.set(0, 0, 1.0);
        let prox = WaterProximity::new(1, 0.37).compute(&height, &mask).unwrap();
        assert_eq!(prox.get(0, 0), 1.0);
        assert_eq!(prox.get(5, 0), 0.0);
    }

    #[test]
    fn test_no_water_anywhere() {
        let height = ScalarField::filled(5, 5, 0.9);
        let mask = ScalarField::new(5, 5);
        let raw = WaterProximity::new(2, 0.37).raw_distance(&height, &mask).unwrap();
        assert!(raw.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_mismatched_mask_is_none() {
        let height = ScalarField::new(5, 5);
        let mask = ScalarField::new(4, 5);
        assert!(WaterProximity::new(2, 0.37).compute(&height, &mask).is_none());
    }
}
