//! Short human-shareable join codes.

use std::sync::{Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of random room codes drawn from `A-Z0-9`.
pub struct RoomCodeGenerator {
    rng: Mutex<SmallRng>,
}

impl RoomCodeGenerator {
    pub fn from_entropy() -> Self {
        let mut seed_rng = rand::rng();
        Self {
            rng: Mutex::new(SmallRng::from_rng(&mut seed_rng)),
        }
    }

    /// Reproducible codes, for tests and simulations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self, length: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Canonical form of a user-typed code.
pub fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
