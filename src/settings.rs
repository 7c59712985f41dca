//! Runtime settings for the session layer.

use std::env;

use log::warn;
use serde::{Deserialize, Serialize};

/// Tunables for match transactions and room codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Attempts at committing one transaction before giving up with
    /// `TransientConflict`.
    pub max_commit_attempts: u32,
    /// Characters in a generated room code.
    pub room_code_length: usize,
    /// Fresh codes tried when a generated code is already held by a
    /// waiting match.
    pub room_code_attempts: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_commit_attempts: 8,
            room_code_length: 6,
            room_code_attempts: 16,
        }
    }
}

impl EngineSettings {
    /// Defaults overlaid with `BROADSIDE_MAX_COMMIT_ATTEMPTS` and
    /// `BROADSIDE_ROOM_CODE_LENGTH` when set and parseable.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(n) = read_env("BROADSIDE_MAX_COMMIT_ATTEMPTS") {
            settings.max_commit_attempts = n;
        }
        if let Some(n) = read_env("BROADSIDE_ROOM_CODE_LENGTH") {
            settings.room_code_length = n;
        }
        settings.normalized()
    }

    /// Clamp every count to at least one.
    pub fn normalized(mut self) -> Self {
        self.max_commit_attempts = self.max_commit_attempts.max(1);
        self.room_code_length = self.room_code_length.max(1);
        self.room_code_attempts = self.room_code_attempts.max(1);
        self
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}
