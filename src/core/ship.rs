//! Ship definitions and per-ship damage tracking.

use serde::{Deserialize, Serialize};

use super::geometry::{Coord, ShipPlacement};

/// Entry of the fleet table: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipDef {
    name: &'static str,
    length: usize,
}

impl ShipDef {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A placed ship. `hit_mask[i]` records whether `cells[i]` has been hit;
/// `sunk` latches once every cell is hit and never clears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    id: String,
    cells: Vec<Coord>,
    hit_mask: Vec<bool>,
    sunk: bool,
}

impl Ship {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn hit_mask(&self) -> &[bool] {
        &self.hit_mask
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of `coord` within this ship, if it covers it.
    pub fn position_of(&self, coord: Coord) -> Option<usize> {
        self.cells.iter().position(|c| *c == coord)
    }

    /// Record a hit on the cell at `index`. Returns `true` if this hit sank
    /// the ship.
    pub(crate) fn register_hit(&mut self, index: usize) -> bool {
        if let Some(hit) = self.hit_mask.get_mut(index) {
            *hit = true;
        }
        if !self.sunk && self.hit_mask.iter().all(|h| *h) {
            self.sunk = true;
            return true;
        }
        false
    }
}

impl From<ShipPlacement> for Ship {
    fn from(placement: ShipPlacement) -> Self {
        let hit_mask = vec![false; placement.cells.len()];
        Ship {
            id: placement.id,
            cells: placement.cells,
            hit_mask,
            sunk: false,
        }
    }
}
