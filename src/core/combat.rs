//! Attack resolution against the opponent's fleet.

use log::debug;
use serde::{Deserialize, Serialize};

use super::board::Shot;
use super::geometry::{expand_bomb_area, Coord};
use super::state::{Match, MatchId, MatchStatus, PlayerId, PlayerSlot};
use crate::error::GameError;

/// How an attack selects its target cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// The single cell named.
    Normal,
    /// The clipped 3×3 area around the named cell; costs one charge.
    Special,
}

impl AttackKind {
    /// Cells targeted by an attack of this kind aimed at `coord`.
    pub fn targets(self, coord: Coord) -> Vec<Coord> {
        match self {
            AttackKind::Normal => vec![coord],
            AttackKind::Special => expand_bomb_area(coord),
        }
    }
}

/// What an attack achieved, as reported to the attacker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Cells of the attack that struck a ship.
    pub hits: usize,
    /// Whether this attack ended the match.
    pub ended: bool,
    /// One shot per targeted cell, in target order.
    pub shots: Vec<Shot>,
    /// Ids of opposing ships this attack sank.
    pub sunk: Vec<String>,
}

/// Audit record of one resolved attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLogEntry {
    pub match_id: MatchId,
    pub player: PlayerId,
    /// The aimed cell, not the expanded bomb area.
    pub coord: Coord,
    pub kind: AttackKind,
    /// `true` if any targeted cell hit.
    pub hit: bool,
    /// Starts at 1 and increases by one per move within a match.
    pub sequence: u64,
}

impl Match {
    /// Resolve an attack by the player in `slot`.
    ///
    /// All guards run before any mutation, so an error leaves the match
    /// untouched. On success the shots, damage, charge, turn and winner are
    /// updated together and the move-log entry to append is returned.
    pub fn resolve_attack(
        &mut self,
        slot: PlayerSlot,
        coord: Coord,
        kind: AttackKind,
    ) -> Result<(AttackOutcome, MoveLogEntry), GameError> {
        if self.status() != MatchStatus::Playing {
            return Err(GameError::WrongPhase);
        }
        if self.current_turn != Some(slot) {
            return Err(GameError::NotYourTurn);
        }
        if !coord.in_bounds() {
            return Err(GameError::OutOfBounds(coord));
        }
        let player = self.player_in(slot).cloned().ok_or(GameError::Forbidden)?;

        let (acting, opponent) = self.fleet_state.split_mut(slot);
        if kind == AttackKind::Special && acting.special_charges() == 0 {
            return Err(GameError::NoChargesRemaining);
        }
        let targets = kind.targets(coord);
        let attacked = acting.attacked();
        if let Some(dup) = targets.iter().find(|c| attacked.contains(**c)) {
            return Err(GameError::DuplicateAttack(*dup));
        }

        let mut shots = Vec::with_capacity(targets.len());
        let mut sunk = Vec::new();
        for target in targets {
            let mut hit = false;
            for ship in opponent.ships_mut().iter_mut() {
                if let Some(index) = ship.position_of(target) {
                    hit = true;
                    if ship.register_hit(index) {
                        sunk.push(ship.id().to_owned());
                    }
                    break;
                }
            }
            shots.push(Shot {
                coord: target,
                hit,
                kind,
            });
        }
        acting.record_shots(shots.iter().copied());
        if kind == AttackKind::Special {
            acting.spend_charge();
        }
        let ended = opponent.all_sunk();

        if ended {
            self.set_status(MatchStatus::Finished);
            self.winner = Some(slot);
            self.current_turn = None;
            debug!("match {}: {} sank the last ship", self.id(), player);
        } else {
            self.current_turn = Some(slot.opponent());
        }

        let hits = shots.iter().filter(|s| s.hit).count();
        self.moves_made += 1;
        let entry = MoveLogEntry {
            match_id: self.id(),
            player,
            coord,
            kind,
            hit: hits > 0,
            sequence: self.moves_made,
        };
        Ok((
            AttackOutcome {
                hits,
                ended,
                shots,
                sunk,
            },
            entry,
        ))
    }
}
