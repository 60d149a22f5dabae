//! `fc-core` — foundational types for the `feedcat` mini-game engine.
//!
//! This crate is a dependency of every other `fc-*` crate.  It intentionally
//! has no `fc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `ItemId`, `TimerId`, `BubbleId`              |
//! | [`geom`]  | `Point`, `Rect`, rectangle hit-testing                  |
//! | [`time`]  | `Tick`, `GameClock`, `GameConfig` + difficulty formulas |
//! | [`rng`]   | `SessionRng` (per-session deterministic RNG)            |
//! | [`need`]  | `NeedKind` enum                                         |
//! | [`error`] | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geom;
pub mod ids;
pub mod need;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geom::{Point, Rect};
pub use ids::{AgentId, BubbleId, ItemId, TimerId};
pub use need::NeedKind;
pub use rng::SessionRng;
pub use time::{GameClock, GameConfig, Tick};
