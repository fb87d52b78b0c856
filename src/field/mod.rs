//! Dense scalar grids shared by every layer of the generator.
//!
//! All layers (plates, noise, heights, precipitation, temperature) are
//! `width * height` grids of `f32` addressed row-major. The grid wraps in
//! both directions, so neighbour lookups go through [`wrap`].

mod scalar;
pub mod wrap;

pub use scalar::{resolve_dimensions, ScalarField, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use wrap::{neighbor_4, wrap_coord};
