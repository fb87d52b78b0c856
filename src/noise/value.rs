//! Octave-blended value noise on a toroidal grid.
//!
//! A single white-noise grid is drawn from the random source. Each octave `k`
//! treats every `2^k`-th cell of that grid as a control point and bilinearly
//! interpolates between them, wrapping at the edges. Octaves are blended from
//! coarsest to finest with a geometrically decaying amplitude and the result is
//! normalized to `[0, 1]`.

use rand::{Rng, RngCore};

use super::config::ValueNoiseConfig;
use super::FieldGenerator;
use crate::field::ScalarField;

/// Value-noise field generator.
#[derive(Debug, Clone, Default)]
pub struct ValueNoiseGenerator {
    pub config: ValueNoiseConfig,
}

impl ValueNoiseGenerator {
    pub fn new(config: ValueNoiseConfig) -> Self {
        Self { config }
    }
}

impl FieldGenerator for ValueNoiseGenerator {
    fn name(&self) -> &str {
        "value noise"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> ScalarField {
        let config = self.config.sanitized();
        let base = white_noise(width, height, rng);
        let (width, height) = (base.width(), base.height());

        let mut result = ScalarField::new(width, height);
        let mut amplitude = 1.0f32;

        for octave in (0..config.octaves).rev() {
            amplitude *= config.persistence;
            let smooth = smooth_octave(&base, octave);

            for i in 0..result.len() {
                let v = result.get_index(i) + smooth.get_index(i) * amplitude;
                result.set_index(i, v);
            }
        }

        result.normalize();
        result
    }
}

/// Independent uniform values in `[0, 1)`, drawn in row-major order.
fn white_noise(width: usize, height: usize, rng: &mut dyn RngCore) -> ScalarField {
    let mut field = ScalarField::new(width, height);
    for i in 0..field.len() {
        field.set_index(i, rng.random::<f32>());
    }
    field
}

/// Bilinear interpolation of `base` sampled at stride `2^octave`.
fn smooth_octave(base: &ScalarField, octave: u32) -> ScalarField {
    let (width, height) = (base.width(), base.height());
    let period = 1usize << octave;
    let freq = 1.0 / period as f32;
    let mut out = ScalarField::new(width, height);

    for y in 0..height {
        let y0 = (y / period) * period;
        let y1 = (y0 + period) % height;
        let v_blend = (y - y0) as f32 * freq;

        for x in 0..width {
            let x0 = (x / period) * period;
            let x1 = (x0 + period) % width;
            let h_blend = (x - x0) as f32 * freq;

            let top = lerp(base.get(x0, y0), base.get(x1, y0), h_blend);
            let bottom = lerp(base.get(x0, y1), base.get(x1, y1), h_blend);
            out.set(x, y, lerp(top, bottom, v_blend));
        }
    }

    out
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
