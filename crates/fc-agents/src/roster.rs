//! The agent roster: identities, positions, and pending needs.

use fc_core::{AgentId, NeedKind, Point, Rect, SessionRng, Tick};

// ── Need ─────────────────────────────────────────────────────────────────────

/// A pending request: what the agent wants and when the offer expires.
///
/// Invariant: `deadline` is strictly in the future at creation time — the
/// scheduler computes it as `now + duration` with a level-floored duration.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Need {
    pub kind: NeedKind,
    pub deadline: Tick,
}

// ── Agent ────────────────────────────────────────────────────────────────────

/// Everything needed to register one agent at session build time.
#[derive(Clone, Debug)]
pub struct AgentSpec {
    pub name: String,
    pub rect: Rect,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self { name: name.into(), rect }
    }
}

/// A cat.  Identity is fixed for the session; position moves when a request
/// is issued; `need` is the one mutable piece of game state.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:   AgentId,
    pub name: String,
    /// Current bounding region, used for drop hit-testing and UI placement.
    pub rect: Rect,
    /// Where the agent started — restored on session reset.
    pub home: Rect,
    pub need: Option<Need>,
}

// ── AgentRoster ──────────────────────────────────────────────────────────────

/// Fixed roster of agents for one play session, plus the spot table agents
/// wander to when a request is issued.
///
/// IDs are assigned in registration order and double as `Vec` indices, so
/// "first agent in registry order" (the resolver's tie-break rule) is simply
/// iteration order.
pub struct AgentRoster {
    agents: Vec<Agent>,
    spots:  Vec<Point>,
}

impl AgentRoster {
    /// Build a roster.  `spots` may be empty, in which case agents stay put
    /// when requests are issued.
    pub fn new(specs: Vec<AgentSpec>, spots: Vec<Point>) -> Self {
        let agents = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Agent {
                id:   AgentId(i as u32),
                name: spec.name,
                rect: spec.rect,
                home: spec.rect,
                need: None,
            })
            .collect();
        Self { agents, spots }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    // ── Need-state queries ────────────────────────────────────────────────

    /// How many agents currently hold a pending need.
    pub fn pending_count(&self) -> usize {
        self.agents.iter().filter(|a| a.need.is_some()).count()
    }

    /// IDs of agents with no pending need, in registry order.
    pub fn eligible(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .filter(|a| a.need.is_none())
            .map(|a| a.id)
            .collect()
    }

    /// First agent in registry order whose bounds overlap `probe`.
    /// Ties go to the earlier registration, not the "best" overlap.
    pub fn first_hit(&self, probe: &Rect) -> Option<AgentId> {
        self.agents.iter().find(|a| a.rect.overlaps(probe)).map(|a| a.id)
    }

    // ── Need-state mutation ───────────────────────────────────────────────

    /// Give `id` a pending need.  Only the scheduler calls this.
    ///
    /// # Panics
    /// Panics in debug mode if the agent already holds a need (at most one
    /// outstanding request per agent) or if the deadline is not in the future.
    pub fn set_need(&mut self, id: AgentId, kind: NeedKind, now: Tick, deadline: Tick) {
        let Some(agent) = self.agents.get_mut(id.index()) else {
            return;
        };
        debug_assert!(agent.need.is_none(), "agent {id} already has a pending need");
        debug_assert!(deadline > now, "request deadline must be strictly in the future");
        agent.need = Some(Need { kind, deadline });
    }

    /// Clear and return `id`'s pending need, if any.
    pub fn clear_need(&mut self, id: AgentId) -> Option<Need> {
        self.agents.get_mut(id.index()).and_then(|a| a.need.take())
    }

    /// Clear every need whose deadline has passed (`now` strictly past it)
    /// and report what was dropped.  No score or time effect — an ignored
    /// request simply disappears.
    pub fn expire_due(&mut self, now: Tick) -> Vec<(AgentId, NeedKind)> {
        let mut expired = Vec::new();
        for agent in &mut self.agents {
            if let Some(need) = agent.need
                && now > need.deadline
            {
                agent.need = None;
                expired.push((agent.id, need.kind));
            }
        }
        expired
    }

    /// Move `id` to a random spot from the spot table (cats wander to a new
    /// place when they ask).  No-op if the table is empty.
    pub fn relocate(&mut self, id: AgentId, rng: &mut SessionRng) {
        let Some(&spot) = rng.choose(&self.spots) else {
            return;
        };
        if let Some(agent) = self.agents.get_mut(id.index()) {
            agent.rect = agent.rect.moved_to(spot);
        }
    }

    /// Restore every agent to its home position with no pending need.
    /// Called on session start and restart.
    pub fn reset(&mut self) {
        for agent in &mut self.agents {
            agent.rect = agent.home;
            agent.need = None;
        }
    }
}
