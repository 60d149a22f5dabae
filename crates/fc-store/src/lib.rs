//! `fc-store` — player progress persistence, behind a seam.
//!
//! The engine itself never talks to storage; the application layer reads a
//! [`PlayerRecord`] before a session and writes one after.  `ProgressStore`
//! is the injected contract; [`MemoryStore`] is the shipped implementation
//! and is explicitly **non-durable** — a process restart loses everything.
//! Real deployments substitute a backend of their own; nothing in the game
//! depends on the store being durable or even present.

pub mod store;


pub use store::{MemoryStore, PlayerRecord, ProgressStore};
