//! Climate: temperature from latitude, wind and altitude.

mod atmosphere;
mod config;
mod temperature;

pub use atmosphere::{Atmosphere, AtmosphereGenerator};
pub use config::ClimateConfig;
pub use temperature::TemperatureComposer;
