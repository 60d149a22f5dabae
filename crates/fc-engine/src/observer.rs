//! Observer hooks for instrumenting a running game.
//!
//! Every hook has an empty default body, so implementors override only what
//! they care about.  Hooks fire synchronously inside the engine call that
//! caused them; observers must not re-enter the engine.

use fc_core::{AgentId, NeedKind, Tick};

use crate::events::{Bubble, DeliveryOutcome};

pub trait GameObserver {
    /// End of one `tick()` call, after all due timers dispatched.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// An agent was handed a pending need with the given deadline.
    fn on_request_issued(&mut self, _agent: AgentId, _kind: NeedKind, _deadline: Tick) {}

    /// A request ran out its window and was dropped by the sweep.
    fn on_request_expired(&mut self, _agent: AgentId, _kind: NeedKind) {}

    /// A pointer release was resolved.  Fires for every outcome, including
    /// `NotDelivered`.
    fn on_delivery(&mut self, _outcome: &DeliveryOutcome) {}

    /// A speech bubble appeared.
    fn on_bubble(&mut self, _bubble: &Bubble) {}

    /// The clock gained seconds from a correct delivery.
    fn on_time_bonus(&mut self, _secs: u32) {}

    /// The session crossed a score milestone.
    fn on_level_up(&mut self, _level: u32) {}

    /// The countdown hit zero or the host ended the session.
    fn on_game_over(&mut self, _score: u32, _level: u32) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl GameObserver for NoopObserver {}
