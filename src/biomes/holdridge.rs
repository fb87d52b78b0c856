//! Holdridge life-zone classification of a single point.
//!
//! All functions here work in physical units: biotemperature in °C,
//! precipitation in mm per year and altitude in metres. Belt boundaries are
//! inclusive upper bounds.

use serde::{Deserialize, Serialize};

use super::chart::{LifezoneChart, LifezoneRule};

pub const MIN_BIOTEMPERATURE: f64 = 0.0;
pub const MAX_BIOTEMPERATURE: f64 = 48.0;
pub const MIN_PRECIPITATION: f64 = 62.5;
pub const MAX_PRECIPITATION: f64 = 22629.12;
pub const MIN_ALTITUDE: f64 = 0.0;
pub const MAX_ALTITUDE: f64 = 4000.0;

/// Biotemperature drop per metre of altitude, in °C.
const LAPSE_RATE: f64 = 6.0 / 1000.0;

const PET_FACTOR: f64 = 58.93;

/// Latitudinal region, from the sea-level biotemperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatitudeBelt {
    Polar,
    Subpolar,
    Boreal,
    CoolTemperate,
    WarmTemperate,
    Tropical,
}

impl LatitudeBelt {
    const BOUNDS: [(f64, LatitudeBelt); 5] = [
        (1.68, LatitudeBelt::Polar),
        (3.36, LatitudeBelt::Subpolar),
        (6.72, LatitudeBelt::Boreal),
        (13.44, LatitudeBelt::CoolTemperate),
        (26.89, LatitudeBelt::WarmTemperate),
    ];

    pub fn from_sea_level_biotemperature(t: f64) -> Self {
        Self::BOUNDS
            .iter()
            .find(|(bound, _)| t <= *bound)
            .map_or(LatitudeBelt::Tropical, |&(_, belt)| belt)
    }

    pub fn name(self) -> &'static str {
        match self {
            LatitudeBelt::Polar => "polar",
            LatitudeBelt::Subpolar => "subpolar",
            LatitudeBelt::Boreal => "boreal",
            LatitudeBelt::CoolTemperate => "cool temperate",
            LatitudeBelt::WarmTemperate => "warm temperate",
            LatitudeBelt::Tropical => "tropical",
        }
    }
}

/// Altitudinal region, from the uncorrected biotemperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeBelt {
    Nival,
    Alpine,
    Subalpine,
    Montane,
    LowerMontane,
    Basal,
}

impl AltitudeBelt {
    const BOUNDS: [(f64, AltitudeBelt); 5] = [
        (1.5, AltitudeBelt::Nival),
        (3.0, AltitudeBelt::Alpine),
        (6.0, AltitudeBelt::Subalpine),
        (12.0, AltitudeBelt::Montane),
        (24.0, AltitudeBelt::LowerMontane),
    ];

    pub fn from_biotemperature(t: f64) -> Self {
        Self::BOUNDS
            .iter()
            .find(|(bound, _)| t <= *bound)
            .map_or(AltitudeBelt::Basal, |&(_, belt)| belt)
    }

    pub fn name(self) -> &'static str {
        match self {
            AltitudeBelt::Nival => "nival",
            AltitudeBelt::Alpine => "alpine",
            AltitudeBelt::Subalpine => "subalpine",
            AltitudeBelt::Montane => "montane",
            AltitudeBelt::LowerMontane => "lower montane",
            AltitudeBelt::Basal => "basal",
        }
    }
}

/// Humidity province, from the potential evapotranspiration ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HumidityProvince {
    Saturated,
    Subsaturated,
    Semisaturated,
    Superhumid,
    Perhumid,
    Humid,
    Subhumid,
    Semiarid,
    Arid,
    Perarid,
    Superarid,
    Semiparched,
}

impl HumidityProvince {
    const BOUNDS: [(f64, HumidityProvince); 11] = [
        (0.03125, HumidityProvince::Saturated),
        (0.0625, HumidityProvince::Subsaturated),
        (0.125, HumidityProvince::Semisaturated),
        (0.25, HumidityProvince::Superhumid),
        (0.5, HumidityProvince::Perhumid),
        (1.0, HumidityProvince::Humid),
        (2.0, HumidityProvince::Subhumid),
        (4.0, HumidityProvince::Semiarid),
        (8.0, HumidityProvince::Arid),
        (16.0, HumidityProvince::Perarid),
        (32.0, HumidityProvince::Superarid),
    ];

    pub fn from_pet(pet: f64) -> Self {
        Self::BOUNDS
            .iter()
            .find(|(bound, _)| pet <= *bound)
            .map_or(HumidityProvince::Semiparched, |&(_, p)| p)
    }
}

/// Named life zone a chart hexagon maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifezoneType {
    Desert,
    DryTundra,
    MoistTundra,
    WetTundra,
    RainTundra,
    DryScrub,
    MoistForest,
    WetForest,
    RainForest,
    DesertScrub,
    DryForest,
    Steppe,
    Woodland,
    VeryDryForest,
}

impl LifezoneType {
    const BY_HEXAGON: [LifezoneType; 30] = {
        use LifezoneType::*;
        [
            DryTundra, MoistTundra, WetTundra, RainTundra,
            Desert, DryScrub, MoistForest, WetForest, RainForest,
            Desert, DesertScrub, Steppe, MoistForest, WetForest, RainForest,
            Desert, DesertScrub, Woodland, DryForest, MoistForest, WetForest, RainForest,
            Desert, DesertScrub, Woodland, VeryDryForest, DryForest, MoistForest, WetForest, RainForest,
        ]
    };

    /// Life zone of chart hexagon `index`; `None` past the end of the chart.
    pub fn from_hexagon(index: usize) -> Option<Self> {
        Self::BY_HEXAGON.get(index).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            LifezoneType::Desert => "desert",
            LifezoneType::DryTundra => "dry tundra",
            LifezoneType::MoistTundra => "moist tundra",
            LifezoneType::WetTundra => "wet tundra",
            LifezoneType::RainTundra => "rain tundra",
            LifezoneType::DryScrub => "dry scrub",
            LifezoneType::MoistForest => "moist forest",
            LifezoneType::WetForest => "wet forest",
            LifezoneType::RainForest => "rain forest",
            LifezoneType::DesertScrub => "desert scrub",
            LifezoneType::DryForest => "dry forest",
            LifezoneType::Steppe => "steppe",
            LifezoneType::Woodland => "woodland",
            LifezoneType::VeryDryForest => "very dry forest",
        }
    }
}

/// Biotemperature corrected to sea level, clamped to `[0, 48]`.
pub fn sea_level_biotemperature(biotemperature: f64, altitude: f64) -> f64 {
    (biotemperature + LAPSE_RATE * altitude).clamp(MIN_BIOTEMPERATURE, MAX_BIOTEMPERATURE)
}

/// Potential evapotranspiration ratio. Zero precipitation gives 0.
pub fn potential_evapotranspiration(biotemperature: f64, precipitation: f64) -> f64 {
    if precipitation == 0.0 {
        return 0.0;
    }
    PET_FACTOR * biotemperature / precipitation
}

/// Full Holdridge record for one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldridgeData {
    pub biotemperature: f64,
    pub precipitation: f64,
    pub altitude: f64,
    pub sea_level_biotemperature: f64,
    pub pet: f64,
    pub latitude_belt: LatitudeBelt,
    pub altitude_belt: AltitudeBelt,
    pub humidity_province: HumidityProvince,
    /// Index of the selected chart hexagon.
    pub hexagon: usize,
    pub lifezone: LifezoneType,
}

impl HoldridgeData {
    /// Classifies a point using the nearest-centroid chart rule.
    pub fn compute(biotemperature: f64, precipitation: f64, altitude: f64) -> Self {
        Self::compute_with_rule(biotemperature, precipitation, altitude, LifezoneRule::Nearest)
    }

    /// Classifies a point. Inputs are clamped to their physical ranges first.
    pub fn compute_with_rule(
        biotemperature: f64,
        precipitation: f64,
        altitude: f64,
        rule: LifezoneRule,
    ) -> Self {
        let biotemperature = clamp_or_min(biotemperature, MIN_BIOTEMPERATURE, MAX_BIOTEMPERATURE);
        let precipitation = clamp_or_min(precipitation, MIN_PRECIPITATION, MAX_PRECIPITATION);
        let altitude = clamp_or_min(altitude, MIN_ALTITUDE, MAX_ALTITUDE);

        let sea_level = sea_level_biotemperature(biotemperature, altitude);
        let pet = potential_evapotranspiration(biotemperature, precipitation);
        let (hexagon, lifezone) = LifezoneChart::global().lifezone(biotemperature, precipitation, rule);

        Self {
            biotemperature,
            precipitation,
            altitude,
            sea_level_biotemperature: sea_level,
            pet,
            latitude_belt: LatitudeBelt::from_sea_level_biotemperature(sea_level),
            altitude_belt: AltitudeBelt::from_biotemperature(biotemperature),
            humidity_province: HumidityProvince::from_pet(pet),
            hexagon,
            lifezone,
        }
    }
}

fn clamp_or_min(v: f64, min: f64, max: f64) -> f64 {
    if v.is_nan() {
        min
    } else {
        v.clamp(min, max)
    }
}
