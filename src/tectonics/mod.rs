//! Tectonic plate layer.
//!
//! The grid is partitioned into plates by randomized region growing from
//! random seed cells. Each plate carries a single random scalar, so the
//! resulting field is piecewise constant. This stands in for plate age,
//! density and collision data rather than simulating them.

mod config;
mod plate;

pub use config::{PlateConfig, DEFAULT_PLATE_COUNT};
pub use plate::{PlateFieldGenerator, PlateMap};
