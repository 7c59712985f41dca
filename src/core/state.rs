//! The match aggregate and its lifecycle.
//!
//! A match moves strictly forward through
//! `Waiting -> Setup -> Playing -> Finished`. Every transition is a method
//! on [`Match`] that either applies completely or returns an error without
//! touching the record.

use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::board::PlayerBoard;
use super::geometry::{validate_placement, Fleet};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque, already-authenticated player identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat of a player within a match. Fixed at join time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    A,
    B,
}

impl PlayerSlot {
    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::A => PlayerSlot::B,
            PlayerSlot::B => PlayerSlot::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Waiting,
    Setup,
    Playing,
    Finished,
}

/// Both players' boards, keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetState {
    a: PlayerBoard,
    b: PlayerBoard,
}

impl FleetState {
    pub fn board(&self, slot: PlayerSlot) -> &PlayerBoard {
        match slot {
            PlayerSlot::A => &self.a,
            PlayerSlot::B => &self.b,
        }
    }

    pub(crate) fn board_mut(&mut self, slot: PlayerSlot) -> &mut PlayerBoard {
        match slot {
            PlayerSlot::A => &mut self.a,
            PlayerSlot::B => &mut self.b,
        }
    }

    /// Mutable access to `(acting, opponent)` boards at once.
    pub(crate) fn split_mut(&mut self, acting: PlayerSlot) -> (&mut PlayerBoard, &mut PlayerBoard) {
        match acting {
            PlayerSlot::A => (&mut self.a, &mut self.b),
            PlayerSlot::B => (&mut self.b, &mut self.a),
        }
    }
}

/// The authoritative record of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    id: MatchId,
    room_code: String,
    status: MatchStatus,
    creator: PlayerId,
    player_a: PlayerId,
    player_b: Option<PlayerId>,
    pub(crate) current_turn: Option<PlayerSlot>,
    pub(crate) winner: Option<PlayerSlot>,
    pub(crate) fleet_state: FleetState,
    pub(crate) moves_made: u64,
}

impl Match {
    /// A fresh match in `Waiting`, with the creator seated as player A.
    pub fn new(id: MatchId, room_code: impl Into<String>, creator: PlayerId) -> Self {
        Self {
            id,
            room_code: room_code.into(),
            status: MatchStatus::Waiting,
            player_a: creator.clone(),
            creator,
            player_b: None,
            current_turn: None,
            winner: None,
            fleet_state: FleetState::default(),
            moves_made: 0,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: MatchStatus) {
        self.status = status;
    }

    pub fn creator(&self) -> &PlayerId {
        &self.creator
    }

    pub fn player_a(&self) -> &PlayerId {
        &self.player_a
    }

    pub fn player_b(&self) -> Option<&PlayerId> {
        self.player_b.as_ref()
    }

    /// Player seated in `slot`, if any.
    pub fn player_in(&self, slot: PlayerSlot) -> Option<&PlayerId> {
        match slot {
            PlayerSlot::A => Some(&self.player_a),
            PlayerSlot::B => self.player_b.as_ref(),
        }
    }

    pub fn slot_of(&self, player: &PlayerId) -> Option<PlayerSlot> {
        if *player == self.player_a {
            Some(PlayerSlot::A)
        } else if self.player_b.as_ref() == Some(player) {
            Some(PlayerSlot::B)
        } else {
            None
        }
    }

    /// The opponent of `player`, if both are seated.
    pub fn opponent_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        self.slot_of(player)
            .and_then(|slot| self.player_in(slot.opponent()))
    }

    /// Resolve `player` to their seat, or `Forbidden` for outsiders.
    pub fn authorize(&self, player: &PlayerId) -> Result<PlayerSlot, GameError> {
        self.slot_of(player).ok_or(GameError::Forbidden)
    }

    pub fn current_turn(&self) -> Option<PlayerSlot> {
        self.current_turn
    }

    pub fn current_turn_player(&self) -> Option<&PlayerId> {
        self.current_turn.and_then(|slot| self.player_in(slot))
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.winner
    }

    pub fn winner_player(&self) -> Option<&PlayerId> {
        self.winner.and_then(|slot| self.player_in(slot))
    }

    pub fn fleet_state(&self) -> &FleetState {
        &self.fleet_state
    }

    pub fn board(&self, slot: PlayerSlot) -> &PlayerBoard {
        self.fleet_state.board(slot)
    }

    /// Attacks resolved so far; also the sequence number of the last move.
    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    /// Seat `player` as player B, moving the match into `Setup`.
    pub fn join(&mut self, player: &PlayerId) -> Result<(), GameError> {
        if *player == self.player_a {
            return Err(GameError::AlreadyJoined);
        }
        if self.player_b.is_some() || self.status != MatchStatus::Waiting {
            return Err(GameError::GameFull);
        }
        self.player_b = Some(player.clone());
        self.status = MatchStatus::Setup;
        debug!("match {}: {} takes seat B", self.id, player);
        Ok(())
    }

    /// Store the fleet for `slot`, replacing any earlier submission. Once
    /// both fleets are in, combat begins with player A to move.
    pub fn place_fleet(&mut self, slot: PlayerSlot, fleet: Fleet) -> Result<(), GameError> {
        if self.status != MatchStatus::Setup {
            return Err(GameError::NotInSetup);
        }
        validate_placement(&fleet)?;
        self.fleet_state.board_mut(slot).set_fleet(fleet);

        let ready = self.fleet_state.board(PlayerSlot::A).has_fleet()
            && self.fleet_state.board(PlayerSlot::B).has_fleet();
        if ready {
            self.status = MatchStatus::Playing;
            self.current_turn = Some(PlayerSlot::A);
            debug!("match {}: both fleets placed", self.id);
        }
        Ok(())
    }
}
