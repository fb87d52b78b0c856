//! Holdridge life-zone classification.
//!
//! Consumes the land-normalized height, temperature and precipitation fields
//! and produces one [`HoldridgeData`] record per land cell:
//! - sea-level biotemperature and potential evapotranspiration
//! - latitude belt, altitude belt and humidity province
//! - chart hexagon and named life zone

mod biosphere;
mod chart;
mod config;
mod holdridge;

pub use biosphere::{classify_biosphere, Biosphere};
pub use chart::{LifezoneChart, LifezoneRule, CHART_SIZE, HEXAGON_VERTICES};
pub use config::{convert, BiosphereConfig};
pub use holdridge::{
    potential_evapotranspiration, sea_level_biotemperature, AltitudeBelt, HoldridgeData,
    HumidityProvince, LatitudeBelt, LifezoneType,
};
