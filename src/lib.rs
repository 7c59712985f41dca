//! Server-authoritative engine for two-player Battleship matches.
//!
//! [`core`] holds the pure rules (geometry, lifecycle, combat);
//! [`session`] serializes intents per match and persists the result.

pub mod autoplay;
pub mod core;
mod error;
mod logging;
pub mod session;
mod settings;

pub use autoplay::{play_random_match, random_fleet, MatchSummary};
pub use crate::core::*;
pub use error::GameError;
pub use logging::init_logging;
pub use session::{MatchRef, MatchStore, MemoryStore, RoomCodeGenerator, SessionCoordinator, StoredMatch};
pub use settings::EngineSettings;
