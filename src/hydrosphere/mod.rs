//! Hydrosphere: rivers, proximity to water and precipitation.
//!
//! Rivers grow from the best-suited land cells down to the sea, eroding
//! the height field as they go. The river network and the ocean then feed a
//! bucketed distance-to-water approximation, which together with cloud
//! frequency gives the precipitation field.

mod config;
mod generator;
mod precipitation;
mod proximity;
mod river;

pub use config::{HydrosphereConfig, PrecipitationWeights, DEFAULT_BUCKET_SIZE};
pub use generator::{Hydrosphere, HydrosphereGenerator};
pub use precipitation::{PrecipitationComposer, PrecipitationInputs};
pub use proximity::WaterProximity;
pub use river::{River, RiverNetwork, RiverNetworkBuilder};
