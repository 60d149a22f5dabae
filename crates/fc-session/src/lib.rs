//! `fc-session` — one play-through's phase, score, level, and clock.
//!
//! # Transition discipline
//!
//! The phase graph is `Ready → Playing → Ended`, with `restart` returning any
//! phase to `Ready`.  Every transition is a *total* function: calling one in
//! an incompatible phase is a silent no-op, never an error.  The presentation
//! layer polls and calls defensively on every frame, so a misuse here must
//! not be able to corrupt or abort a session.
//!
//! Score and level only ever grow; remaining time is clamped at zero from
//! below and only the level-up award is clamped from above.

pub mod session;


pub use session::{Phase, Session};
