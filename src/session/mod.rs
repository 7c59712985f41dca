//! Session layer: serialized, persisted access to match records.

pub mod coordinator;
pub mod room_code;
pub mod store;

pub use coordinator::{MatchRef, SessionCoordinator};
pub use room_code::RoomCodeGenerator;
pub use store::{MatchStore, MemoryStore, StoredMatch, Version};
