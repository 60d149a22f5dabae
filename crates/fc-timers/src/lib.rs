//! `fc-timers` — cancellable timers scoped to one play session.
//!
//! Timers hidden inside UI lifecycle hooks make "did every timer from the
//! old session really die?" unverifiable.  Here all waiting is explicit:
//! the engine owns one [`TimerArena`] per session, every
//! `after`/`every` returns a [`TimerId`][fc_core::TimerId] handle, and phase
//! exit calls [`TimerArena::clear`], which synchronously forgets everything.
//! A timer from session N structurally cannot fire into session N+1.

pub mod arena;


pub use arena::TimerArena;
