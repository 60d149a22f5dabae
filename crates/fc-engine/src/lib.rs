//! `fc-engine` — the need-request scheduling and delivery-matching engine.
//!
//! # Control flow
//!
//! One [`Engine`] owns a session's entire mutable world: clock, session
//! counters, agent roster, item rack, timer arena, RNG, dialogue, and the
//! active speech bubbles.  The host drives it from a single logical thread:
//!
//! ```text
//! loop every tick_duration_ms:
//!   ① drain  — pop every timer due this tick from the arena
//!   ② apply  — dispatch each by role, in arming order:
//!                opening one-shots → issue the scripted first request /
//!                                    alternating-kind burst
//!                pacer             → at most one new random request if
//!                                    below the level's concurrency cap,
//!                                    then re-arm at the current interval
//!                sweep             → expire overdue needs
//!                countdown         → −1 s; at zero end the session
//!                keeper/bubble/bonus → feedback bookkeeping
//! ```
//!
//! Pointer input (`pick_up`/`drag_to`/`release`) arrives synchronously
//! between ticks; `release` resolves the delivery on the spot.
//!
//! Every timer lives in the session-scoped arena, so `end`/`restart` cancel
//! the lot in one call — nothing armed by session N can fire into session
//! N+1.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fc_core::GameConfig;
//! use fc_engine::{EngineBuilder, NoopObserver};
//!
//! let mut engine = EngineBuilder::new(GameConfig::default()).build()?;
//! let mut obs = NoopObserver;
//! engine.start(&mut obs);
//! loop {
//!     engine.tick(&mut obs);
//!     // presentation polls engine.agents()/items()/bubbles()/session()
//! }
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod events;
pub mod observer;

mod resolver;
mod scheduler;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use events::{Bubble, BubbleTarget, DeliveryOutcome};
pub use observer::{GameObserver, NoopObserver};
