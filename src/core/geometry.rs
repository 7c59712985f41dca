//! Board geometry: coordinates, bomb areas and fleet placement validation.
//!
//! Everything here is a pure function of its inputs.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bitboard::Grid;
use super::config::{fleet_lengths_sorted, BOARD_SIZE, NUM_SHIPS};

/// A cell on the board. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Reasons a proposed fleet is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    #[error("expected {expected} ships, got {found}")]
    WrongShipCount { expected: usize, found: usize },
    #[error("ship sizes {found:?} do not match the required fleet")]
    SizeMismatch { found: Vec<usize> },
    #[error("ship id `{0}` is used more than once")]
    DuplicateShipId(String),
    #[error("ship `{0}` is not a straight contiguous line")]
    NotStraight(String),
    #[error("ship `{0}` extends outside the board")]
    OutOfBounds(String),
    #[error("ship `{0}` overlaps another ship")]
    Overlap(String),
    #[error("unable to place ship `{0}`")]
    UnableToPlace(String),
}

/// One ship as proposed by a player: a label and the cells it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub id: String,
    pub cells: Vec<Coord>,
}

impl ShipPlacement {
    pub fn new(id: impl Into<String>, cells: Vec<Coord>) -> Self {
        Self {
            id: id.into(),
            cells,
        }
    }

    /// A ship of `length` cells starting at `origin` and extending right
    /// (horizontal) or down (vertical).
    pub fn line(
        id: impl Into<String>,
        origin: Coord,
        length: usize,
        orientation: Orientation,
    ) -> Result<Self, FleetError> {
        let id = id.into();
        let mut cells = Vec::with_capacity(length);
        for i in 0..length {
            let step = u8::try_from(i).map_err(|_| FleetError::OutOfBounds(id.clone()))?;
            let cell = match orientation {
                Orientation::Horizontal => origin.x.checked_add(step).map(|x| Coord::new(x, origin.y)),
                Orientation::Vertical => origin.y.checked_add(step).map(|y| Coord::new(origin.x, y)),
            };
            match cell {
                Some(c) if c.in_bounds() => cells.push(c),
                _ => return Err(FleetError::OutOfBounds(id)),
            }
        }
        Ok(Self { id, cells })
    }

    /// Occupancy mask of this ship. Fails if any cell is off the board.
    pub fn mask(&self) -> Result<Grid, FleetError> {
        Grid::from_coords(self.cells.iter().copied()).map_err(|_| FleetError::OutOfBounds(self.id.clone()))
    }

    fn is_straight(&self) -> bool {
        let Some(first) = self.cells.first() else {
            return false;
        };
        let run = |mut values: Vec<u8>| {
            values.sort_unstable();
            values.windows(2).all(|w| w[0].checked_add(1) == Some(w[1]))
        };
        if self.cells.iter().all(|c| c.y == first.y) {
            run(self.cells.iter().map(|c| c.x).collect())
        } else if self.cells.iter().all(|c| c.x == first.x) {
            run(self.cells.iter().map(|c| c.y).collect())
        } else {
            false
        }
    }
}

/// A player's complete proposed fleet, validated as a whole before any of
/// it touches match state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    ships: Vec<ShipPlacement>,
}

impl Fleet {
    pub fn new(ships: Vec<ShipPlacement>) -> Self {
        Self { ships }
    }

    pub fn ships(&self) -> &[ShipPlacement] {
        &self.ships
    }

    pub fn into_ships(self) -> Vec<ShipPlacement> {
        self.ships
    }
}

/// The 3×3 block centred on `center`, clipped to the board, in x-major
/// order. Yields between 1 and 9 cells for an on-board centre.
pub fn expand_bomb_area(center: Coord) -> Vec<Coord> {
    let size = BOARD_SIZE as i16;
    let (cx, cy) = (center.x as i16, center.y as i16);
    let mut cells = Vec::with_capacity(9);
    for dx in -1..=1 {
        for dy in -1..=1 {
            let (x, y) = (cx + dx, cy + dy);
            if (0..size).contains(&x) && (0..size).contains(&y) {
                cells.push(Coord::new(x as u8, y as u8));
            }
        }
    }
    cells
}

/// Check a proposed fleet: five ships matching the required size multiset,
/// unique ids, each a straight contiguous in-bounds line, no two ships
/// sharing a cell.
pub fn validate_placement(fleet: &Fleet) -> Result<(), FleetError> {
    let ships = fleet.ships();
    if ships.len() != NUM_SHIPS {
        return Err(FleetError::WrongShipCount {
            expected: NUM_SHIPS,
            found: ships.len(),
        });
    }

    for (i, ship) in ships.iter().enumerate() {
        if ships[..i].iter().any(|other| other.id == ship.id) {
            return Err(FleetError::DuplicateShipId(ship.id.clone()));
        }
        if !ship.cells.iter().all(Coord::in_bounds) {
            return Err(FleetError::OutOfBounds(ship.id.clone()));
        }
        if !ship.is_straight() {
            return Err(FleetError::NotStraight(ship.id.clone()));
        }
    }

    let mut found: Vec<usize> = ships.iter().map(|s| s.cells.len()).collect();
    found.sort_unstable();
    if found[..] != fleet_lengths_sorted()[..] {
        return Err(FleetError::SizeMismatch { found });
    }

    let mut occupied = Grid::new();
    for ship in ships {
        let mask = ship.mask()?;
        if !(occupied & mask).is_empty() {
            return Err(FleetError::Overlap(ship.id.clone()));
        }
        occupied |= mask;
    }
    Ok(())
}
