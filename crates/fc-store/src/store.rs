//! The `ProgressStore` trait and the in-memory implementation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ── PlayerRecord ─────────────────────────────────────────────────────────────

/// Everything remembered about one player between sessions.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub score: u32,
    pub level: u32,
    /// Display names of cats the player has befriended.
    pub collected: Vec<String>,
    /// Unix seconds of the last completed session; 0 = never played.
    pub last_played_unix: i64,
}

impl PlayerRecord {
    /// The record handed out for a player the store has never seen.
    pub fn fresh() -> Self {
        Self { score: 0, level: 1, collected: Vec::new(), last_played_unix: 0 }
    }
}

// ── ProgressStore ────────────────────────────────────────────────────────────

/// Keyed fetch/upsert over player records.
///
/// `fetch` for an unknown player returns [`PlayerRecord::fresh`] rather than
/// an error or `None` — absence is an ordinary state, not a failure.
pub trait ProgressStore {
    fn fetch(&self, player_id: &str) -> PlayerRecord;
    fn upsert(&mut self, player_id: &str, record: PlayerRecord);
}

// ── MemoryStore ──────────────────────────────────────────────────────────────

/// Process-local store.  Non-durable by design.
#[derive(Default)]
pub struct MemoryStore {
    records: FxHashMap<String, PlayerRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn fetch(&self, player_id: &str) -> PlayerRecord {
        self.records
            .get(player_id)
            .cloned()
            .unwrap_or_else(PlayerRecord::fresh)
    }

    fn upsert(&mut self, player_id: &str, record: PlayerRecord) {
        self.records.insert(player_id.to_owned(), record);
    }
}
