//! One player's private state within a match: fleet, shot history and
//! remaining special charges.

use serde::{Deserialize, Serialize};

use super::bitboard::Grid;
use super::combat::AttackKind;
use super::config::STARTING_SPECIAL_CHARGES;
use super::geometry::{Coord, Fleet};
use super::ship::Ship;

/// A single attacked cell and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub coord: Coord,
    pub hit: bool,
    pub kind: AttackKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBoard {
    ships: Vec<Ship>,
    shots: Vec<Shot>,
    special_charges: u8,
}

impl Default for PlayerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerBoard {
    /// An empty board: no fleet, no shots, full special charges.
    pub fn new() -> Self {
        Self {
            ships: Vec::new(),
            shots: Vec::new(),
            special_charges: STARTING_SPECIAL_CHARGES,
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Shots this player has fired, oldest first.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn special_charges(&self) -> u8 {
        self.special_charges
    }

    /// Whether a fleet has been submitted.
    pub fn has_fleet(&self) -> bool {
        !self.ships.is_empty()
    }

    /// Ships not yet sunk.
    pub fn remaining_ships(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// `true` once a fleet exists and every ship in it is sunk.
    pub fn all_sunk(&self) -> bool {
        self.has_fleet() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Cells this player has already attacked.
    pub fn attacked(&self) -> Grid {
        let mut grid = Grid::new();
        for shot in &self.shots {
            // Shots are bounds-checked before they are recorded.
            let _ = grid.insert(shot.coord);
        }
        grid
    }

    /// Replace the fleet. The caller validates it first.
    pub(crate) fn set_fleet(&mut self, fleet: Fleet) {
        self.ships = fleet.into_ships().into_iter().map(Ship::from).collect();
    }

    pub(crate) fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    pub(crate) fn record_shots(&mut self, shots: impl IntoIterator<Item = Shot>) {
        self.shots.extend(shots);
    }

    pub(crate) fn spend_charge(&mut self) {
        self.special_charges = self.special_charges.saturating_sub(1);
    }
}
