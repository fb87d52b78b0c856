//! The `ScalarField` grid type.

use serde::{Deserialize, Serialize};

use super::wrap::wrap_coord;

/// Width used when a caller asks for a zero-width field.
pub const DEFAULT_WIDTH: usize = 256;
/// Height used when a caller asks for a zero-height field.
pub const DEFAULT_HEIGHT: usize = 128;

/// Replaces a zero width or height by the default.
pub fn resolve_dimensions(width: usize, height: usize) -> (usize, usize) {
    let width = if width == 0 { DEFAULT_WIDTH } else { width };
    let height = if height == 0 { DEFAULT_HEIGHT } else { height };
    (width, height)
}

/// A dense `width x height` grid of `f32` values stored in row-major order.
///
/// Dimensions are fixed at construction. Cells are addressed either by flat
/// index (`y * width + x`) or by `(x, y)`; out-of-range access through the
/// plain accessors panics, while [`ScalarField::get_wrapped`] wraps around the
/// torus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScalarField {
    /// Creates a field with every cell set to `0.0`.
    ///
    /// A zero width or height is replaced by [`DEFAULT_WIDTH`] /
    /// [`DEFAULT_HEIGHT`].
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Creates a field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        let (width, height) = resolve_dimensions(width, height);
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wraps existing row-major data. Returns `None` if the length does not
    /// match the dimensions or either dimension is zero.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return None;
        }
        Some(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a field has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if `other` has the same dimensions.
    pub fn same_shape(&self, other: &ScalarField) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Row-major view of all cells.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index_of(x, y)]
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> f32 {
        self.data[index]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.index_of(x, y);
        self.data[i] = value;
    }

    #[inline]
    pub fn set_index(&mut self, index: usize, value: f32) {
        self.data[index] = value;
    }

    /// Reads a cell with toroidal wrap-around; never panics.
    pub fn get_wrapped(&self, x: i64, y: i64) -> f32 {
        let x = wrap_coord(x, self.width);
        let y = wrap_coord(y, self.height);
        self.data[y * self.width + x]
    }

    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Rescales every cell linearly so the minimum maps to 0 and the maximum
    /// to 1. A constant field becomes all zeros.
    pub fn normalize(&mut self) {
        let min = self.min();
        let range = self.max() - min;

        for v in &mut self.data {
            *v = if range == 0.0 { 0.0 } else { (*v - min) / range };
        }
    }

    /// Normalizes using only the cells where `include` is true.
    ///
    /// Included cells are rescaled by the min/max found among included cells;
    /// excluded cells are set to 0. If no cell is included or the included
    /// range is zero, every cell becomes 0. A mask of the wrong length
    /// leaves the field unchanged.
    pub fn normalize_where(&mut self, include: &[bool]) {
        if include.len() != self.data.len() {
            return;
        }

        let (mut min, mut max) = (f32::INFINITY, f32::NEG_INFINITY);
        for (&v, _) in self.data.iter().zip(include).filter(|(_, &inc)| inc) {
            min = min.min(v);
            max = max.max(v);
        }
        let range = max - min;

        for (v, &inc) in self.data.iter_mut().zip(include) {
            *v = if !inc || !(range > 0.0) { 0.0 } else { (*v - min) / range };
        }
    }

    /// Returns `true` for every cell strictly above `threshold`.
    pub fn mask_above(&self, threshold: f32) -> Vec<bool> {
        self.data.iter().map(|&v| v > threshold).collect()
    }

    /// Returns a new field holding `sqrt(self^2 + sum(other^2))` per cell,
    /// treating the stack of fields as components of a vector.
    ///
    /// The result is not normalized. Returns `None` if any field has
    /// different dimensions.
    pub fn combine_with(&self, others: &[&ScalarField]) -> Option<ScalarField> {
        if others.iter().any(|o| !self.same_shape(o)) {
            return None;
        }

        let data = (0..self.data.len())
            .map(|i| {
                let own = self.data[i] * self.data[i];
                own + others.iter().map(|o| o.data[i] * o.data[i]).sum::<f32>()
            })
            .collect();

        Some(Self {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Element-wise square root in place. Cells are expected to be
    /// non-negative.
    pub fn sqrt(&mut self) {
        for v in &mut self.data {
            *v = v.sqrt();
        }
    }

    pub fn scale_by(&mut self, k: f32) {
        for v in &mut self.data {
            *v *= k;
        }
    }

    /// Replaces every cell with `max - v`.
    pub fn invert(&mut self) {
        let max = self.max();
        for v in &mut self.data {
            *v = max - *v;
        }
    }

    /// Box blur of the given radius, applied horizontally then vertically,
    /// wrapping at the grid edges. A radius of 0 leaves the field unchanged.
    pub fn blur(&mut self, radius: usize) {
        if radius == 0 {
            return;
        }
        let (w, h) = (self.width, self.height);
        let r = radius as i64;
        let taps = (2 * radius + 1) as f32;

        let mut tmp = vec![0.0f32; self.data.len()];
        for y in 0..h {
            for x in 0..w {
                let sum: f32 = (-r..=r)
                    .map(|d| self.data[y * w + wrap_coord(x as i64 + d, w)])
                    .sum();
                tmp[y * w + x] = sum / taps;
            }
        }

        for y in 0..h {
            for x in 0..w {
                let sum: f32 = (-r..=r)
                    .map(|d| tmp[wrap_coord(y as i64 + d, h) * w + x])
                    .sum();
                self.data[y * w + x] = sum / taps;
            }
        }
    }

    /// Every `(index, value)` pair ordered ascending by value.
    ///
    /// Ties are ordered by index so the result is fully determined by the
    /// field contents.
    pub fn sorted_indices(&self) -> Vec<(usize, f32)> {
        let mut pairs: Vec<(usize, f32)> = self.data.iter().copied().enumerate().collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(width: usize, height: usize) -> ScalarField {
        let data = (0..width * height).map(|i| i as f32).collect();
        ScalarField::from_vec(width, height, data).unwrap()
    }

    #[test]
    fn test_zero_dimensions_fall_back_to_defaults() {
        let f = ScalarField::new(0, 0);
        assert_eq!(f.width(), DEFAULT_WIDTH);
        assert_eq!(f.height(), DEFAULT_HEIGHT);
        assert_eq!(f.len(), DEFAULT_WIDTH * DEFAULT_HEIGHT);
        assert!(f.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(ScalarField::from_vec(3, 3, vec![0.0; 8]).is_none());
        assert!(ScalarField::from_vec(0, 3, vec![]).is_none());
    }

    #[test]
    fn test_xy_and_index_addressing_agree() {
        let mut f = ScalarField::new(4, 3);
        f.set(2, 1, 7.5);
        assert_eq!(f.get_index(1 * 4 + 2), 7.5);
        f.set_index(11, 1.0);
        assert_eq!(f.get(3, 2), 1.0);
    }

    #[test]
    fn test_get_wrapped_wraps_both_axes() {
        let f = ramp(4, 3);
        assert_eq!(f.get_wrapped(-1, 0), f.get(3, 0));
        assert_eq!(f.get_wrapped(4, -1), f.get(0, 2));
    }

    #[test]
    fn test_normalize_maps_to_unit_range() {
        let mut f = ramp(5, 2);
        f.normalize();
        assert_eq!(f.min(), 0.0);
        assert_eq!(f.max(), 1.0);
    }

    #[test]
    fn test_normalize_constant_field_is_all_zero() {
        let mut f = ScalarField::filled(6, 4, 5.0);
        f.normalize();
        assert!(f.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_normalize_where_ignores_excluded_cells() {
        let mut f = ScalarField::from_vec(4, 1, vec![100.0, 2.0, 4.0, -50.0]).unwrap();
        f.normalize_where(&[false, true, true, false]);
        assert_eq!(f.values(), &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_normalize_where_with_no_included_cells_zeroes_everything() {
        let mut f = ramp(3, 3);
        f.normalize_where(&[false; 9]);
        assert!(f.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_normalize_where_with_short_mask_is_a_no_op() {
        let mut f = ramp(3, 3);
        let before = f.clone();
        f.normalize_where(&[true; 4]);
        assert_eq!(f, before);
    }

    #[test]
    fn test_combine_with_is_vector_magnitude_squared() {
        let a = ScalarField::filled(2, 2, 3.0);
        let b = ScalarField::filled(2, 2, 4.0);
        let mut c = a.combine_with(&[&b]).unwrap();
        assert!(c.values().iter().all(|&v| v == 25.0));
        c.sqrt();
        assert!(c.values().iter().all(|&v| v == 5.0));
    }

    #[test]
    fn test_combine_with_mismatched_shape_is_none() {
        let a = ScalarField::new(2, 2);
        let b = ScalarField::new(3, 2);
        assert!(a.combine_with(&[&b]).is_none());
    }

    #[test]
    fn test_invert_flips_around_max() {
        let mut f = ScalarField::from_vec(3, 1, vec![0.0, 1.0, 3.0]).unwrap();
        f.invert();
        assert_eq!(f.values(), &[3.0, 2.0, 0.0]);
    }

    #[test]
    fn test_blur_preserves_mean_and_flattens_spike() {
        let mut f = ScalarField::new(7, 7);
        f.set(3, 3, 49.0);
        f.blur(1);
        let sum: f32 = f.values().iter().sum();
        assert!((sum - 49.0).abs() < 1e-3);
        assert!((f.get(3, 3) - 49.0 / 9.0).abs() < 1e-4);
        assert!((f.get(2, 2) - 49.0 / 9.0).abs() < 1e-4);
        assert_eq!(f.get(0, 0), 0.0);
    }

    #[test]
    fn test_blur_wraps_at_edges() {
        let mut f = ScalarField::new(5, 5);
        f.set(0, 0, 9.0);
        f.blur(1);
        assert!((f.get(4, 4) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sorted_indices_break_ties_by_index() {
        let f = ScalarField::from_vec(5, 1, vec![2.0, 1.0, 2.0, 0.5, 1.0]).unwrap();
        let order: Vec<usize> = f.sorted_indices().iter().map(|p| p.0).collect();
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(values in prop::collection::vec(-1000.0f32..1000.0, 1..64)) {
            let n = values.len();
            let mut once = ScalarField::from_vec(n, 1, values).unwrap();
            once.normalize();
            let mut twice = once.clone();
            twice.normalize();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.values().iter().all(|v| v.is_finite()));
        }

        #[test]
        fn test_normalized_range_is_unit_unless_constant(values in prop::collection::vec(-10.0f32..10.0, 2..64)) {
            let n = values.len();
            let constant = values.iter().all(|&v| v == values[0]);
            let mut f = ScalarField::from_vec(n, 1, values).unwrap();
            f.normalize();
            if constant {
                prop_assert!(f.values().iter().all(|&v| v == 0.0));
            } else {
                prop_assert_eq!(f.min(), 0.0);
                prop_assert_eq!(f.max(), 1.0);
            }
        }
    }
}
