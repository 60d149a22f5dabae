//! Presentation-facing value types: speech bubbles and delivery outcomes.

use fc_core::{AgentId, BubbleId, NeedKind, Tick};

// ── Bubble ───────────────────────────────────────────────────────────────────

/// Who a speech bubble is attached to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BubbleTarget {
    Agent(AgentId),
    /// The keeper character reacting to a request.
    Keeper,
}

/// A live speech bubble.  The engine owns the lifetime: every bubble is
/// auto-removed `bubble_lifetime_ms` after it appears, and the removal timer
/// dies with the session like any other.
#[derive(Clone, Debug)]
pub struct Bubble {
    pub id: BubbleId,
    pub target: BubbleTarget,
    pub text: String,
    /// `Some` for request bubbles, which carry a need icon next to the text.
    pub need: Option<NeedKind>,
    pub born: Tick,
    pub expires: Tick,
}

// ── DeliveryOutcome ──────────────────────────────────────────────────────────

/// What a pointer release resolved to.  Returned synchronously so the host
/// can drive immediate feedback without waiting a tick.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DeliveryOutcome {
    /// The item matched the target's pending need.
    Correct {
        agent: AgentId,
        kind: NeedKind,
        /// Seconds added to the clock, computed at the pre-level-up level.
        bonus_secs: u32,
        /// `true` when this delivery also crossed a level milestone.
        leveled_up: bool,
    },
    /// The item landed on an agent whose pending need wants the other kind.
    Wrong {
        agent: AgentId,
        offered: NeedKind,
        wanted: NeedKind,
    },
    /// Empty space, an agent with no pending need, or the session was not
    /// in the playing phase.  Nothing changed except the snap-back.
    NotDelivered,
}

impl DeliveryOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, DeliveryOutcome::Correct { .. })
    }
}
