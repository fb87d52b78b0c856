//! River growth by randomized greedy descent.
//!
//! Rivers start at the highest-fitness land cells and walk downhill over the
//! 4-neighbourhood until they hit the sea or an earlier river. The walk is an
//! explicit stack with a parent map and a visited bitmap; it never backtracks,
//! so a walk that runs out of unvisited neighbours ends where it is.
//!
//! Every step lowers the next cell to the current cell's height, so each
//! river's profile is non-increasing from source to terminus.

use std::collections::{HashMap, HashSet};

use log::debug;
use rand::{Rng, RngCore};

use super::config::HydrosphereConfig;
use crate::field::wrap::neighbor_4_index;
use crate::field::ScalarField;

/// One river: an ordered path of cells from source to terminus.
#[derive(Debug, Clone, PartialEq)]
pub struct River {
    cells: Vec<usize>,
    members: HashSet<usize>,
    joins: Option<usize>,
    reaches_water: bool,
}

impl River {
    fn new(cells: Vec<usize>, joins: Option<usize>, reaches_water: bool) -> Self {
        let members = cells.iter().copied().collect();
        Self {
            cells,
            members,
            joins,
            reaches_water,
        }
    }

    /// Flat cell indices from source to terminus.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn source(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    pub fn terminus(&self) -> Option<usize> {
        self.cells.last().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Index of the earlier river this one flows into, if it ended on one.
    pub fn joins(&self) -> Option<usize> {
        self.joins
    }

    /// False when the walk hit a dead end before reaching sea or river.
    pub fn reaches_water(&self) -> bool {
        self.reaches_water
    }

    fn position_of(&self, index: usize) -> Option<usize> {
        self.cells.iter().position(|&c| c == index)
    }
}

/// All rivers of a world plus a per-cell lookup of the first river through
/// each cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverNetwork {
    width: usize,
    height: usize,
    rivers: Vec<River>,
    owner: Vec<Option<usize>>,
}

impl RiverNetwork {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rivers: Vec::new(),
            owner: vec![None; width * height],
        }
    }

    pub fn rivers(&self) -> &[River] {
        &self.rivers
    }

    pub fn len(&self) -> usize {
        self.rivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rivers.is_empty()
    }

    pub fn river(&self, index: usize) -> Option<&River> {
        self.rivers.get(index)
    }

    /// Index of the first river containing `(x, y)`. Out-of-range
    /// coordinates give `None`.
    pub fn river_of(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.owner[y * self.width + x]
    }

    pub fn is_river(&self, index: usize) -> bool {
        self.owner.get(index).is_some_and(Option::is_some)
    }

    /// 1.0 on river cells, 0.0 elsewhere.
    pub fn river_mask(&self) -> ScalarField {
        let mut mask = ScalarField::new(self.width, self.height);
        for (i, owner) in self.owner.iter().enumerate() {
            if owner.is_some() {
                mask.set_index(i, 1.0);
            }
        }
        mask
    }

    fn push(&mut self, river: River) {
        let id = self.rivers.len();
        for &cell in river.cells() {
            if self.owner[cell].is_none() {
                self.owner[cell] = Some(id);
            }
        }
        self.rivers.push(river);
    }

    /// After `cell` (already part of a river) was lowered, lowers every cell
    /// downstream of it so no river profile rises. Follows joins into
    /// earlier rivers.
    fn clamp_downstream(&self, cell: usize, height: &mut ScalarField) {
        let Some(mut river_id) = self.owner[cell] else {
            return;
        };
        let mut from = cell;
        let mut limit = height.get_index(cell);

        loop {
            let river = &self.rivers[river_id];
            let Some(pos) = river.position_of(from) else {
                break;
            };
            for &c in &river.cells[pos + 1..] {
                let v = height.get_index(c).min(limit);
                height.set_index(c, v);
                limit = v;
            }

            match (river.joins, river.terminus()) {
                (Some(next), Some(terminus)) => {
                    river_id = next;
                    from = terminus;
                }
                _ => break,
            }
        }
    }
}

/// Picks river origins from a fitness field and grows each river.
#[derive(Debug, Clone)]
pub struct RiverNetworkBuilder {
    pub river_count: usize,
    pub sea_level: f32,
}

impl Default for RiverNetworkBuilder {
    fn default() -> Self {
        Self::from_config(&HydrosphereConfig::default())
    }
}

impl RiverNetworkBuilder {
    pub fn new(river_count: usize, sea_level: f32) -> Self {
        Self {
            river_count,
            sea_level,
        }
    }

    pub fn from_config(config: &HydrosphereConfig) -> Self {
        Self::new(config.river_count, config.sea_level)
    }

    /// How suitable each cell is as a river origin.
    ///
    /// Magnitude of `(height, cloud, modifier)` with ocean cells zeroed,
    /// normalized. `None` if the fields differ in size.
    pub fn fitness(
        &self,
        height: &ScalarField,
        cloud: &ScalarField,
        modifier: &ScalarField,
    ) -> Option<ScalarField> {
        let mut fitness = height.combine_with(&[cloud, modifier])?;
        for i in 0..fitness.len() {
            if height.get_index(i) <= self.sea_level {
                fitness.set_index(i, 0.0);
            }
        }
        fitness.sqrt();
        fitness.normalize();
        Some(fitness)
    }

    /// Grows up to `river_count` rivers, eroding `height` in place.
    ///
    /// Origins are taken from the top of the fitness ranking, best first.
    /// Origins at or below sea level, or already inside an earlier river, are
    /// skipped, so the network may hold fewer rivers than requested. `None` if
    /// the fields differ in size.
    pub fn build(
        &self,
        height: &mut ScalarField,
        cloud: &ScalarField,
        modifier: &ScalarField,
        rng: &mut dyn RngCore,
    ) -> Option<RiverNetwork> {
        let fitness = self.fitness(height, cloud, modifier)?;
        let mut network = RiverNetwork::empty(height.width(), height.height());

        let ranked = fitness.sorted_indices();
        for &(origin, _) in ranked.iter().rev().take(self.river_count) {
            if height.get_index(origin) <= self.sea_level {
                debug!("skipping river origin {}: at or below sea level", origin);
                continue;
            }
            if network.is_river(origin) {
                debug!("skipping river origin {}: already part of a river", origin);
                continue;
            }

            let river = self.grow(origin, height, &network, rng);
            if !river.reaches_water() {
                debug!("river from {} dead-ended after {} cells", origin, river.len());
            }
            network.push(river);
        }

        debug!("built {} rivers", network.len());
        Some(network)
    }

    fn grow(
        &self,
        origin: usize,
        height: &mut ScalarField,
        network: &RiverNetwork,
        rng: &mut dyn RngCore,
    ) -> River {
        let (w, h) = (height.width(), height.height());
        let mut visited = vec![false; w * h];
        let mut parent: HashMap<usize, usize> = HashMap::new();
        let mut stack = vec![origin];
        visited[origin] = true;

        let mut last = origin;
        let mut joins = None;
        let mut reaches_water = false;

        while let Some(current) = stack.pop() {
            last = current;
            let current_height = height.get_index(current);

            if let Some(existing) = network.owner[current] {
                joins = Some(existing);
                reaches_water = true;
                break;
            }
            if current_height <= self.sea_level {
                reaches_water = true;
                break;
            }

            let mut open: Vec<usize> = Vec::with_capacity(4);
            for n in neighbor_4_index(w, h, current) {
                if !visited[n] && !open.contains(&n) {
                    open.push(n);
                }
            }
            if open.is_empty() {
                break;
            }

            let next = self.choose_neighbor(&open, height, network, rng);
            visited[next] = true;
            parent.insert(next, current);

            if height.get_index(next) > current_height {
                height.set_index(next, current_height);
                if network.is_river(next) {
                    network.clamp_downstream(next, height);
                }
            }
            stack.push(next);
        }

        let mut cells = vec![last];
        let mut cursor = last;
        while let Some(&p) = parent.get(&cursor) {
            cells.push(p);
            cursor = p;
        }
        cells.reverse();

        River::new(cells, joins, reaches_water)
    }

    /// An existing river cell if there is one, else the lowest neighbour with
    /// ties broken at random.
    fn choose_neighbor(
        &self,
        open: &[usize],
        height: &ScalarField,
        network: &RiverNetwork,
        rng: &mut dyn RngCore,
    ) -> usize {
        if let Some(&n) = open.iter().find(|&&n| network.is_river(n)) {
            return n;
        }

        let lowest = open
            .iter()
            .map(|&n| height.get_index(n))
            .fold(f32::INFINITY, f32::min);
        let ties: Vec<usize> = open
            .iter()
            .copied()
            .filter(|&n| height.get_index(n) == lowest)
            .collect();

        match ties.len() {
            0 => open[0],
            1 => ties[0],
            n => ties[rng.random_range(0..n)],
        }
    }
}
