//! Fluent, validating constructor for [`Engine`].

use fc_agents::{AgentRoster, AgentSpec, ItemRack, ItemSpec};
use fc_core::{GameConfig, NeedKind, Point, Rect, SessionRng};
use fc_dialogue::DialogueTable;
use fc_session::Session;
use fc_timers::TimerArena;
use rustc_hash::FxHashMap;

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

/// Builder for a game engine.
///
/// Everything except the config has a stock default, so
/// `EngineBuilder::new(config).build()` yields a fully playable game with
/// the standard two-cat layout.
pub struct EngineBuilder {
    config:   GameConfig,
    agents:   Option<Vec<AgentSpec>>,
    spots:    Option<Vec<Point>>,
    items:    Option<Vec<ItemSpec>>,
    dialogue: Option<DialogueTable>,
}

impl EngineBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self { config, agents: None, spots: None, items: None, dialogue: None }
    }

    /// Replace the stock roster.  Order fixes `AgentId` assignment.
    pub fn agents(mut self, specs: Vec<AgentSpec>) -> Self {
        self.agents = Some(specs);
        self
    }

    /// Replace the stock wander-spot table.  An empty table pins agents in
    /// place when requests are issued.
    pub fn spots(mut self, spots: Vec<Point>) -> Self {
        self.spots = Some(spots);
        self
    }

    /// Replace the stock food/water bowls.
    pub fn items(mut self, specs: Vec<ItemSpec>) -> Self {
        self.items = Some(specs);
        self
    }

    /// Replace the stock dialogue.  Must carry one voice per agent.
    pub fn dialogue(mut self, table: DialogueTable) -> Self {
        self.dialogue = Some(table);
        self
    }

    /// Validate and assemble.
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;

        let agents = self.agents.unwrap_or_else(stock_agents);
        if agents.is_empty() {
            return Err(fc_core::CoreError::Config("roster must not be empty".into()).into());
        }
        let spots = self.spots.unwrap_or_else(stock_spots);
        let items = self.items.unwrap_or_else(stock_items);
        let dialogue = self
            .dialogue
            .unwrap_or_else(|| DialogueTable::stock(agents.len()));
        if dialogue.agent_count() != agents.len() {
            return Err(EngineError::AgentCountMismatch {
                expected: agents.len(),
                got:      dialogue.agent_count(),
                what:     "dialogue voices",
            });
        }

        let clock = self.config.make_clock();
        let session = Session::new(&self.config);
        let rng = SessionRng::new(self.config.seed);

        Ok(Engine {
            config: self.config,
            clock,
            session,
            roster: AgentRoster::new(agents, spots),
            items: ItemRack::new(items),
            timers: TimerArena::new(),
            roles: FxHashMap::default(),
            rng,
            dialogue,
            bubbles: Vec::new(),
            next_bubble: 0,
            bonus_display: None,
            bonus_clear: None,
            restarts: 0,
        })
    }
}

// ── Stock layout ─────────────────────────────────────────────────────────────
//
// Coordinates are in the 400×700 board space the reference art was drawn for.

fn stock_agents() -> Vec<AgentSpec> {
    vec![
        AgentSpec::new("Misha", Rect::new(50.0, 380.0, 70.0, 70.0)),
        AgentSpec::new("Pars", Rect::new(150.0, 500.0, 70.0, 70.0)),
    ]
}

fn stock_spots() -> Vec<Point> {
    vec![
        Point::new(90.0, 220.0),
        Point::new(140.0, 220.0),
        Point::new(240.0, 260.0),
        Point::new(290.0, 260.0),
        Point::new(340.0, 260.0),
        Point::new(60.0, 480.0),
        Point::new(150.0, 520.0),
        Point::new(80.0, 440.0),
    ]
}

fn stock_items() -> Vec<ItemSpec> {
    vec![
        ItemSpec::new(NeedKind::Food, Rect::new(40.0, 620.0, 60.0, 60.0)),
        ItemSpec::new(NeedKind::Water, Rect::new(120.0, 620.0, 60.0, 60.0)),
    ]
}
