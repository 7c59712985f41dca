//! Persistence seam for match records and their move logs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::{Mutex, RwLock};

use crate::core::{Match, MatchId, MatchStatus, MoveLogEntry};
use crate::error::GameError;

/// Monotonic revision of a stored match record.
pub type Version = u64;

/// A decoded record together with the revision it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMatch {
    pub record: Match,
    pub version: Version,
}

/// Storage for match records.
///
/// Writers use optimistic concurrency: a record read at version `v` may be
/// committed only while the stored version is still `v`. A stale commit
/// fails with [`GameError::TransientConflict`] and changes nothing, so the
/// caller can reload and retry.
#[async_trait::async_trait]
pub trait MatchStore: Send + Sync {
    /// Reserve a fresh match id.
    async fn allocate_id(&self) -> Result<MatchId, GameError>;

    /// Store a new match. Returns `false`, storing nothing, when its room
    /// code is already held by another waiting match.
    async fn insert(&self, record: &Match) -> Result<bool, GameError>;

    async fn load(&self, id: MatchId) -> Result<Option<StoredMatch>, GameError>;

    /// The waiting match holding `code`, else the latest match that held it.
    async fn find_by_room_code(&self, code: &str) -> Result<Option<MatchId>, GameError>;

    /// Atomically replace the record read at `expected` and append `entry`
    /// to its move log.
    async fn commit(
        &self,
        expected: Version,
        record: &Match,
        entry: Option<MoveLogEntry>,
    ) -> Result<(), GameError>;

    /// Move log of a match, in sequence order.
    async fn move_log(&self, id: MatchId) -> Result<Vec<MoveLogEntry>, GameError>;
}

struct MatchRow {
    version: Version,
    snapshot: Vec<u8>,
    moves: Vec<MoveLogEntry>,
}

#[derive(Default)]
struct RoomIndex {
    waiting: HashMap<String, MatchId>,
    latest: HashMap<String, MatchId>,
}

/// In-process store. Each record is kept as a bincode snapshot, so every
/// load hands out an independent aggregate. Rows are locked individually;
/// transactions on different matches never wait on each other.
pub struct MemoryStore {
    next_id: AtomicU64,
    rows: RwLock<HashMap<MatchId, Arc<Mutex<MatchRow>>>>,
    rooms: Mutex<RoomIndex>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            rows: RwLock::new(HashMap::new()),
            rooms: Mutex::new(RoomIndex::default()),
        }
    }

    /// Number of stored matches.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn row(&self, id: MatchId) -> Option<Arc<Mutex<MatchRow>>> {
        self.rows.read().await.get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl MatchStore for MemoryStore {
    async fn allocate_id(&self) -> Result<MatchId, GameError> {
        Ok(MatchId(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }

    async fn insert(&self, record: &Match) -> Result<bool, GameError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.waiting.contains_key(record.room_code()) {
            return Ok(false);
        }
        let row = MatchRow {
            version: 0,
            snapshot: bincode::serialize(record)?,
            moves: Vec::new(),
        };
        {
            let mut rows = self.rows.write().await;
            if rows.contains_key(&record.id()) {
                return Err(GameError::Storage(format!("match {} already exists", record.id())));
            }
            rows.insert(record.id(), Arc::new(Mutex::new(row)));
        }
        let code = record.room_code().to_owned();
        if record.status() == MatchStatus::Waiting {
            rooms.waiting.insert(code.clone(), record.id());
        }
        rooms.latest.insert(code, record.id());
        Ok(true)
    }

    async fn load(&self, id: MatchId) -> Result<Option<StoredMatch>, GameError> {
        let Some(row) = self.row(id).await else {
            return Ok(None);
        };
        let row = row.lock().await;
        let record: Match = bincode::deserialize(&row.snapshot)?;
        Ok(Some(StoredMatch {
            record,
            version: row.version,
        }))
    }

    async fn find_by_room_code(&self, code: &str) -> Result<Option<MatchId>, GameError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms
            .waiting
            .get(code)
            .or_else(|| rooms.latest.get(code))
            .copied())
    }

    async fn commit(
        &self,
        expected: Version,
        record: &Match,
        entry: Option<MoveLogEntry>,
    ) -> Result<(), GameError> {
        let id = record.id();
        let row = self.row(id).await.ok_or(GameError::NotFound)?;
        let mut row = row.lock().await;
        if row.version != expected {
            debug!(
                "match {}: stale commit at version {} (now {})",
                id, expected, row.version
            );
            return Err(GameError::TransientConflict);
        }
        if let Some(entry) = &entry {
            let next = row.moves.last().map_or(1, |m| m.sequence + 1);
            if entry.match_id != id || entry.sequence != next {
                return Err(GameError::Storage(format!(
                    "match {}: move {} does not follow sequence {}",
                    id,
                    entry.sequence,
                    next - 1
                )));
            }
        }

        row.snapshot = bincode::serialize(record)?;
        row.version += 1;
        row.moves.extend(entry);

        if record.status() != MatchStatus::Waiting {
            let mut rooms = self.rooms.lock().await;
            if rooms.waiting.get(record.room_code()) == Some(&id) {
                rooms.waiting.remove(record.room_code());
            }
        }
        Ok(())
    }

    async fn move_log(&self, id: MatchId) -> Result<Vec<MoveLogEntry>, GameError> {
        let row = self.row(id).await.ok_or(GameError::NotFound)?;
        let moves = row.lock().await.moves.clone();
        Ok(moves)
    }
}
