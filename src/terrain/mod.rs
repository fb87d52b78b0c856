//! Terrain layer.
//!
//! Combines the tectonics, thickness and orogenic layers into a height field
//! and remaps it by rank so sea, land and mountain cover exact fractions of
//! the grid.

mod classifier;
mod config;
mod lithosphere;

pub use classifier::{TerrainBand, TerrainClassifier};
pub use config::{TerrainConfig, BAND_EPSILON};
pub use lithosphere::{Lithosphere, LithosphereGenerator};
