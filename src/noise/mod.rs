//! Raw layer generators.
//!
//! Every raw layer of the world (thickness, orogeny, cloud frequency, wind,
//! equator distance) is produced by something implementing
//! [`FieldGenerator`]. Value noise is the workhorse; the constant and
//! equator generators cover the trivial cases.

mod config;
mod generator;
mod source;
mod value;

pub use config::{ValueNoiseConfig, MAX_OCTAVES};
pub use generator::{ConstantGenerator, EquatorGenerator, FieldGenerator};
pub use source::FieldSource;
pub use value::ValueNoiseGenerator;
