//! The session coordinator: the only writer of match records.
//!
//! Each state-changing intent runs as a transaction against one match:
//! load the record, authorize the caller, apply the pure transition, and
//! commit against the version that was read. A lost race reloads and
//! re-validates against the fresh record, so no intent ever executes on
//! stale state. After `max_commit_attempts` lost races the intent fails
//! with [`GameError::TransientConflict`].

use log::{debug, info, warn};

use super::room_code::{normalize, RoomCodeGenerator};
use super::store::{MatchStore, StoredMatch};
use crate::core::{
    AttackKind, AttackOutcome, Coord, Fleet, Match, MatchId, MatchStatus, MoveLogEntry, PlayerId, PlayerSlot,
};
use crate::error::GameError;
use crate::settings::EngineSettings;

/// How a joining player names the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRef {
    Id(MatchId),
    RoomCode(String),
}

impl From<MatchId> for MatchRef {
    fn from(id: MatchId) -> Self {
        MatchRef::Id(id)
    }
}

pub struct SessionCoordinator<S: MatchStore> {
    store: S,
    settings: EngineSettings,
    room_codes: RoomCodeGenerator,
}

impl<S: MatchStore> SessionCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, EngineSettings::default())
    }

    pub fn with_settings(store: S, settings: EngineSettings) -> Self {
        Self {
            store,
            settings: settings.normalized(),
            room_codes: RoomCodeGenerator::from_entropy(),
        }
    }

    /// Replace the room-code source, e.g. with a seeded one.
    pub fn with_room_codes(mut self, room_codes: RoomCodeGenerator) -> Self {
        self.room_codes = room_codes;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Open a new match with `creator` as player A.
    pub async fn create_match(&self, creator: &PlayerId) -> Result<(MatchId, String), GameError> {
        let id = self.store.allocate_id().await?;
        for _ in 0..self.settings.room_code_attempts {
            let code = self.room_codes.generate(self.settings.room_code_length);
            let record = Match::new(id, code.clone(), creator.clone());
            if self.store.insert(&record).await? {
                info!("match {}: created by {} with room code {}", id, creator, code);
                return Ok((id, code));
            }
            debug!("room code {} is held by a waiting match, regenerating", code);
        }
        warn!(
            "match {}: no free room code after {} attempts",
            id, self.settings.room_code_attempts
        );
        Err(GameError::TransientConflict)
    }

    /// Seat `player` as player B of the referenced match.
    pub async fn join_match(&self, target: &MatchRef, player: &PlayerId) -> Result<MatchId, GameError> {
        let id = self.resolve(target).await?;
        self.transact(id, |record| {
            record.join(player)?;
            Ok(((), None))
        })
        .await?;
        info!("match {}: {} joined, placing ships", id, player);
        Ok(id)
    }

    /// Submit (or resubmit) `player`'s fleet during setup.
    pub async fn place_fleet(&self, id: MatchId, player: &PlayerId, fleet: Fleet) -> Result<(), GameError> {
        let started = self
            .transact_as(id, player, |record, slot| {
                record.place_fleet(slot, fleet.clone())?;
                Ok((record.status() == MatchStatus::Playing, None))
            })
            .await?;
        debug!("match {}: fleet placed by {}", id, player);
        if started {
            info!("match {}: both fleets placed, combat begins", id);
        }
        Ok(())
    }

    /// Fire at the opponent. On success the move is logged in the same
    /// commit as the board changes.
    pub async fn attack(
        &self,
        id: MatchId,
        player: &PlayerId,
        coord: Coord,
        kind: AttackKind,
    ) -> Result<AttackOutcome, GameError> {
        let outcome = self
            .transact_as(id, player, |record, slot| {
                let (outcome, entry) = record.resolve_attack(slot, coord, kind)?;
                Ok((outcome, Some(entry)))
            })
            .await?;
        if outcome.ended {
            info!("match {}: {} sank the last ship and wins", id, player);
        }
        Ok(outcome)
    }

    /// The full stored record, for a participant. Redaction of the
    /// opponent's fleet is left to the presentation layer.
    pub async fn match_view(&self, id: MatchId, player: &PlayerId) -> Result<Match, GameError> {
        let (stored, _) = self.load_authorized(id, player).await?;
        Ok(stored.record)
    }

    /// The ordered move log, for a participant.
    pub async fn move_log(&self, id: MatchId, player: &PlayerId) -> Result<Vec<MoveLogEntry>, GameError> {
        self.load_authorized(id, player).await?;
        self.store.move_log(id).await
    }

    async fn resolve(&self, target: &MatchRef) -> Result<MatchId, GameError> {
        match target {
            MatchRef::Id(id) => Ok(*id),
            MatchRef::RoomCode(code) => self
                .store
                .find_by_room_code(&normalize(code))
                .await?
                .ok_or(GameError::NotFound),
        }
    }

    async fn load(&self, id: MatchId) -> Result<StoredMatch, GameError> {
        self.store.load(id).await?.ok_or(GameError::NotFound)
    }

    async fn load_authorized(&self, id: MatchId, player: &PlayerId) -> Result<(StoredMatch, PlayerSlot), GameError> {
        let stored = self.load(id).await?;
        let slot = stored.record.authorize(player)?;
        Ok((stored, slot))
    }

    /// Run `op` as a participant transaction: the freshly loaded record is
    /// authorized for `player` before `op` sees it.
    async fn transact_as<T, F>(&self, id: MatchId, player: &PlayerId, mut op: F) -> Result<T, GameError>
    where
        T: Send,
        F: FnMut(&mut Match, PlayerSlot) -> Result<(T, Option<MoveLogEntry>), GameError> + Send,
    {
        self.transact(id, |record| {
            let slot = record.authorize(player)?;
            op(record, slot)
        })
        .await
    }

    async fn transact<T, F>(&self, id: MatchId, mut op: F) -> Result<T, GameError>
    where
        T: Send,
        F: FnMut(&mut Match) -> Result<(T, Option<MoveLogEntry>), GameError> + Send,
    {
        let attempts = self.settings.max_commit_attempts;
        for attempt in 1..=attempts {
            let StoredMatch { mut record, version } = self.load(id).await?;
            let (value, entry) = op(&mut record)?;
            match self.store.commit(version, &record, entry).await {
                Ok(()) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    debug!("match {}: commit conflict on attempt {}/{}", id, attempt, attempts);
                }
                Err(e) => return Err(e),
            }
        }
        warn!("match {}: giving up after {} conflicting commits", id, attempts);
        Err(GameError::TransientConflict)
    }
}
