//! Core battleship game engine.
//!
//! Pure game logic: geometry, the match state machine and the combat
//! resolver. Nothing in here performs I/O or awaits; the session layer
//! wraps these functions in transactions.

pub mod bitboard;
pub mod board;
pub mod combat;
pub mod config;
pub mod geometry;
pub mod ship;
pub mod state;

// Re-export commonly used types
pub use bitboard::{BitBoard, BitBoardError, Grid};
pub use board::{PlayerBoard, Shot};
pub use combat::{AttackKind, AttackOutcome, MoveLogEntry};
pub use config::*;
pub use geometry::{expand_bomb_area, validate_placement, Coord, Fleet, FleetError, Orientation, ShipPlacement};
pub use ship::{Ship, ShipDef};
pub use state::{FleetState, Match, MatchId, MatchStatus, PlayerId, PlayerSlot};
