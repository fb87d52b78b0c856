//! The fixed 30-hexagon Holdridge chart in (biotemperature, precipitation)
//! space.
//!
//! Hexagons are grouped by biotemperature band, coolest first; within a band
//! they run from driest to wettest. A point is matched against the centroid
//! of each hexagon.

use std::sync::OnceLock;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::holdridge::LifezoneType;

pub const CHART_SIZE: usize = 30;
pub const HEXAGON_VERTICES: usize = 6;

/// `[biotemperature, precipitation]` vertices of every hexagon.
#[rustfmt::skip]
const HEXAGONS: [[[f64; 2]; HEXAGON_VERTICES]; CHART_SIZE] = [
    [[2.121160699, 62.5], [3.0, 88.395], [3.0, 125.0], [2.121160699, 125.0], [1.5, 88.395], [1.5, 62.5]],
    [[2.121160699, 125.0], [3.0, 176.69], [3.0, 250.0], [2.121160699, 250.0], [1.5, 176.79], [1.5, 125.0]],
    [[2.121160699, 250.0], [3.0, 353.58], [3.0, 500.0], [2.121160699, 500.0], [1.5, 353.58], [1.5, 250.0]],
    [[2.121160699, 500.0], [3.0, 707.16], [3.0, 1000.0], [2.121160699, 1000.0], [1.5, 707.16], [1.5, 500.0]],
    [[4.242321398, 62.5], [6.0, 88.395], [6.0, 125.0], [4.242321398, 125.0], [3.0, 88.395], [3.0, 62.5]],
    [[4.242321398, 125.0], [6.0, 176.79], [6.0, 250.0], [4.242321398, 250.0], [3.0, 176.79], [3.0, 125.0]],
    [[4.242321398, 250.0], [6.0, 353.58], [6.0, 500.0], [4.242321398, 500.0], [3.0, 353.58], [3.0, 250.0]],
    [[4.242321398, 500.0], [6.0, 707.16], [6.0, 1000.0], [4.242321398, 1000.0], [3.0, 707.16], [3.0, 500.0]],
    [[4.242321398, 1000.0], [6.0, 1414.32], [6.0, 2000.0], [4.242321398, 2000.0], [3.0, 1414.32], [3.0, 1000.0]],
    [[8.484642797, 62.5], [12.0, 88.395], [12.0, 125.0], [8.484642797, 125.0], [6.0, 88.395], [6.0, 62.5]],
    [[8.484642797, 125.0], [12.0, 176.79], [12.0, 250.0], [8.484642797, 250.0], [6.0, 176.79], [6.0, 125.0]],
    [[8.484642797, 250.0], [12.0, 353.58], [12.0, 500.0], [8.484642797, 500.0], [6.0, 353.58], [6.0, 250.0]],
    [[8.484642797, 500.0], [12.0, 707.16], [12.0, 1000.0], [8.484642797, 1000.0], [6.0, 707.16], [6.0, 500.0]],
    [[8.484642797, 1000.0], [12.0, 1414.32], [12.0, 2000.0], [8.484642797, 2000.0], [6.0, 1414.32], [6.0, 1000.0]],
    [[8.484642797, 2000.0], [12.0, 2828.64], [12.0, 4000.0], [8.484642797, 4000.0], [6.0, 2828.64], [6.0, 2000.0]],
    [[16.96938559, 62.5], [24.0, 88.395], [24.0, 125.0], [16.96938559, 125.0], [12.0, 88.395], [12.0, 62.5]],
    [[16.96938559, 125.0], [24.0, 176.79], [24.0, 250.0], [16.96938559, 250.0], [12.0, 176.79], [12.0, 125.0]],
    [[16.96938559, 250.0], [24.0, 353.58], [24.0, 500.0], [16.96938559, 500.0], [12.0, 353.58], [12.0, 250.0]],
    [[16.96938559, 500.0], [24.0, 707.16], [24.0, 1000.0], [16.96938559, 1000.0], [12.0, 707.16], [12.0, 500.0]],
    [[16.96938559, 1000.0], [24.0, 1414.32], [24.0, 2000.0], [16.96938559, 2000.0], [12.0, 1414.32], [12.0, 1000.0]],
    [[16.96938559, 2000.0], [24.0, 2828.64], [24.0, 4000.0], [16.96938559, 4000.0], [12.0, 2828.64], [12.0, 2000.0]],
    [[16.96938559, 4000.0], [24.0, 5657.28], [24.0, 8000.0], [16.96938559, 8000.0], [12.0, 5657.28], [12.0, 4000.0]],
    [[33.93857118, 62.5], [48.0, 88.395], [48.0, 125.0], [33.93857118, 125.0], [24.0, 88.395], [24.0, 62.5]],
    [[33.93857118, 125.0], [48.0, 176.79], [48.0, 250.0], [33.93857118, 250.0], [24.0, 176.79], [24.0, 125.0]],
    [[33.93857118, 250.0], [48.0, 353.58], [48.0, 500.0], [33.93857118, 500.0], [24.0, 353.58], [24.0, 250.0]],
    [[33.93857118, 500.0], [48.0, 707.16], [48.0, 1000.0], [33.93857118, 1000.0], [24.0, 707.16], [24.0, 500.0]],
    [[33.93857118, 1000.0], [48.0, 1414.32], [48.0, 2000.0], [33.93857118, 2000.0], [24.0, 1414.32], [24.0, 1000.0]],
    [[33.93857118, 2000.0], [48.0, 2828.64], [48.0, 4000.0], [33.93857118, 4000.0], [24.0, 2828.64], [24.0, 2000.0]],
    [[33.93857118, 4000.0], [48.0, 5657.28], [48.0, 8000.0], [33.93857118, 8000.0], [24.0, 5657.28], [24.0, 4000.0]],
    [[33.93857118, 8000.0], [48.0, 11314.56], [48.0, 16000.0], [33.93857118, 16000.0], [24.0, 11314.56], [24.0, 8000.0]],
];

/// Which centroid a lookup selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifezoneRule {
    /// The hexagon whose centroid is closest to the point.
    #[default]
    Nearest,
    /// The hexagon whose centroid is farthest from the point. Reproduces
    /// the classic lookup, which inverted the comparison.
    Farthest,
}

/// Immutable lifezone chart. Use [`LifezoneChart::global`] for the shared
/// instance.
#[derive(Debug, Clone)]
pub struct LifezoneChart {
    hexagons: Vec<[DVec2; HEXAGON_VERTICES]>,
    centroids: Vec<DVec2>,
}

impl LifezoneChart {
    fn build() -> Self {
        let hexagons: Vec<[DVec2; HEXAGON_VERTICES]> = HEXAGONS
            .iter()
            .map(|hex| hex.map(DVec2::from_array))
            .collect();
        let centroids = hexagons
            .iter()
            .map(|hex| hex.iter().copied().sum::<DVec2>() / HEXAGON_VERTICES as f64)
            .collect();
        Self { hexagons, centroids }
    }

    /// Process-wide chart, built on first use.
    pub fn global() -> &'static LifezoneChart {
        static CHART: OnceLock<LifezoneChart> = OnceLock::new();
        CHART.get_or_init(Self::build)
    }

    pub fn len(&self) -> usize {
        self.hexagons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexagons.is_empty()
    }

    pub fn hexagon(&self, index: usize) -> Option<&[DVec2; HEXAGON_VERTICES]> {
        self.hexagons.get(index)
    }

    pub fn centroid(&self, index: usize) -> Option<DVec2> {
        self.centroids.get(index).copied()
    }

    /// Index of the hexagon selected by `rule`. The first index wins ties.
    pub fn hexagon_index(&self, biotemperature: f64, precipitation: f64, rule: LifezoneRule) -> usize {
        let point = DVec2::new(biotemperature, precipitation);
        let mut best = 0;
        let mut best_dist = match rule {
            LifezoneRule::Nearest => f64::INFINITY,
            LifezoneRule::Farthest => f64::NEG_INFINITY,
        };

        for (i, c) in self.centroids.iter().enumerate() {
            let d = c.distance(point);
            let better = match rule {
                LifezoneRule::Nearest => d < best_dist,
                LifezoneRule::Farthest => d > best_dist,
            };
            if better {
                best = i;
                best_dist = d;
            }
        }
        best
    }

    /// Selected hexagon index and its named life zone.
    pub fn lifezone(&self, biotemperature: f64, precipitation: f64, rule: LifezoneRule) -> (usize, LifezoneType) {
        let index = self.hexagon_index(biotemperature, precipitation, rule);
        let lifezone = LifezoneType::from_hexagon(index).unwrap_or(LifezoneType::Desert);
        (index, lifezone)
    }
}
