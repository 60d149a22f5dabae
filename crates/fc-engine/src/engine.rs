//! The `Engine` struct: session lifecycle, tick dispatch, pointer input.

use fc_agents::{Agent, AgentRoster, Item, ItemRack};
use fc_core::{
    AgentId, BubbleId, GameClock, GameConfig, ItemId, NeedKind, Point, SessionRng, Tick, TimerId,
};
use fc_dialogue::{DialogueTable, Outcome};
use fc_session::Session;
use fc_timers::TimerArena;
use rustc_hash::FxHashMap;

use crate::events::{Bubble, BubbleTarget, DeliveryOutcome};
use crate::observer::GameObserver;

/// What a pending timer means to the engine.  The arena hands back bare
/// handles; this map turns them into dispatchable work.
///
/// Roles for one-shots are removed on fire; `Pacer` re-inserts itself under
/// a fresh handle so its interval can track the current level.
#[derive(Copy, Clone, Debug)]
pub(crate) enum TimerRole {
    OpeningFirst,
    OpeningBurst,
    Pacer,
    Sweep,
    Countdown,
    KeeperReaction(AgentId),
    BubbleExpiry(BubbleId),
    BonusClear,
}

/// One complete game: clock, session counters, world state, timers, RNG,
/// dialogue, and live bubbles.  Single logical thread; no interior locking.
pub struct Engine {
    pub(crate) config:   GameConfig,
    pub(crate) clock:    GameClock,
    pub(crate) session:  Session,
    pub(crate) roster:   AgentRoster,
    pub(crate) items:    ItemRack,
    pub(crate) timers:   TimerArena,
    pub(crate) roles:    FxHashMap<TimerId, TimerRole>,
    pub(crate) rng:      SessionRng,
    pub(crate) dialogue: DialogueTable,

    pub(crate) bubbles:     Vec<Bubble>,
    pub(crate) next_bubble: u32,

    /// Seconds shown by the floating "+N s" indicator, if one is visible.
    pub(crate) bonus_display: Option<u32>,
    pub(crate) bonus_clear:   Option<TimerId>,

    /// How many times this engine has been restarted; salts the restart RNG
    /// so session N+1 does not replay session N.
    pub(crate) restarts: u64,
}

impl Engine {
    // ── Read access for the presentation layer ────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.roster.iter()
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn bonus_display(&self) -> Option<u32> {
        self.bonus_display
    }

    /// Pending timer count; mostly of interest to tests and debug overlays.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ── Session lifecycle ─────────────────────────────────────────────────

    /// Begin playing.  Resets the world, then arms the opening one-shots,
    /// the pacer, the deadline sweep, and the countdown.  Returns `false`
    /// from any phase but Ready.
    pub fn start(&mut self, _obs: &mut impl GameObserver) -> bool {
        if !self.session.start() {
            return false;
        }
        self.reset_world();

        let now = self.clock.current_tick;
        let first = self.timers.after(now, self.ticks_ms(self.config.opening_first_ms));
        self.roles.insert(first, TimerRole::OpeningFirst);

        let burst = self.timers.after(now, self.ticks_ms(self.config.opening_burst_ms));
        self.roles.insert(burst, TimerRole::OpeningBurst);

        let pacer_delay = self.ticks_ms(self.config.pacer_interval_ms(self.session.level()));
        let pacer = self.timers.after(now, pacer_delay);
        self.roles.insert(pacer, TimerRole::Pacer);

        let sweep = self.timers.every(now, self.ticks_ms(self.config.sweep_interval_ms));
        self.roles.insert(sweep, TimerRole::Sweep);

        let countdown = self
            .timers
            .every(now, self.ticks_ms(self.config.countdown_interval_ms));
        self.roles.insert(countdown, TimerRole::Countdown);

        true
    }

    /// Back to Ready from any phase.  Cancels every pending timer, so
    /// nothing armed before the restart can fire after it.  Idempotent.
    pub fn restart(&mut self) {
        self.session.restart();
        self.reset_world();
        self.restarts += 1;
        self.rng = self.rng.child(self.restarts);
    }

    /// End the session now (host-initiated; the countdown calls the same
    /// path when it hits zero).  Returns `false` outside Playing.
    pub fn end(&mut self, obs: &mut impl GameObserver) -> bool {
        self.finish(obs)
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Process one tick: drain every due timer, dispatch each by role, then
    /// advance the clock.  Safe to call in any phase — with no timers armed
    /// it only moves the clock.
    pub fn tick(&mut self, obs: &mut impl GameObserver) {
        let now = self.clock.current_tick;
        for id in self.timers.drain_due(now) {
            // A role missing here means the timer was orphaned by a phase
            // exit earlier in this same drain; skip it.
            let Some(&role) = self.roles.get(&id) else {
                continue;
            };
            match role {
                TimerRole::Sweep | TimerRole::Countdown => {}
                _ => {
                    self.roles.remove(&id);
                }
            }
            match role {
                TimerRole::OpeningFirst => self.handle_opening_first(obs),
                TimerRole::OpeningBurst => self.handle_opening_burst(obs),
                TimerRole::Pacer => self.handle_pacer(obs),
                TimerRole::Sweep => self.handle_sweep(obs),
                TimerRole::Countdown => self.handle_countdown(obs),
                TimerRole::KeeperReaction(agent) => self.handle_keeper_reaction(agent, obs),
                TimerRole::BubbleExpiry(bubble) => self.handle_bubble_expiry(bubble),
                TimerRole::BonusClear => self.bonus_display = None,
            }
        }
        obs.on_tick_end(now);
        self.clock.advance();
    }

    /// Run `n` ticks back to back.  Convenience for demos and tests.
    pub fn run_ticks(&mut self, n: u64, obs: &mut impl GameObserver) {
        for _ in 0..n {
            self.tick(obs);
        }
    }

    // ── Pointer input ─────────────────────────────────────────────────────

    /// Press at `p`: start dragging the item under the pointer, if any.
    /// Inert outside the playing phase.
    pub fn pick_up(&mut self, p: Point) -> Option<ItemId> {
        if !self.session.is_playing() {
            return None;
        }
        self.items.pick_up(p)
    }

    /// Move a dragged item with the pointer.
    pub fn drag_to(&mut self, id: ItemId, p: Point) {
        self.items.drag_to(id, p);
    }

    /// Release at `p`: resolve the delivery, then snap the item back.
    /// See `attempt_delivery` for the resolution rules.
    pub fn release(
        &mut self,
        id: ItemId,
        p: Point,
        obs: &mut impl GameObserver,
    ) -> DeliveryOutcome {
        self.attempt_delivery(id, p, obs)
    }

    // ── Shared internals ──────────────────────────────────────────────────

    pub(crate) fn ticks_ms(&self, ms: u32) -> u64 {
        self.clock.ticks_for_ms(ms as u64)
    }

    /// Playing → Ended plus full timer teardown and the game-over hook.
    pub(crate) fn finish(&mut self, obs: &mut impl GameObserver) -> bool {
        if !self.session.end() {
            return false;
        }
        self.clear_timers();
        self.bubbles.clear();
        self.bonus_display = None;
        obs.on_game_over(self.session.score(), self.session.level());
        true
    }

    pub(crate) fn clear_timers(&mut self) {
        self.timers.clear();
        self.roles.clear();
        self.bonus_clear = None;
    }

    fn reset_world(&mut self) {
        self.clear_timers();
        self.roster.reset();
        self.items.reset();
        self.bubbles.clear();
        self.bonus_display = None;
    }

    /// Show a bubble and arm its auto-removal.
    pub(crate) fn push_bubble(
        &mut self,
        target: BubbleTarget,
        text: String,
        need: Option<NeedKind>,
        obs: &mut impl GameObserver,
    ) {
        let now = self.clock.current_tick;
        let id = BubbleId(self.next_bubble);
        self.next_bubble += 1;

        let lifetime = self.ticks_ms(self.config.bubble_lifetime_ms);
        let bubble = Bubble { id, target, text, need, born: now, expires: now + lifetime };
        obs.on_bubble(&bubble);
        self.bubbles.push(bubble);

        let timer = self.timers.after(now, lifetime);
        self.roles.insert(timer, TimerRole::BubbleExpiry(id));
    }

    /// An agent speaks, if its bag has a line for this situation.
    pub(crate) fn speak(&mut self, agent: AgentId, outcome: Outcome, obs: &mut impl GameObserver) {
        let need = match outcome {
            Outcome::Request(kind) => Some(kind),
            _ => None,
        };
        let line = self
            .dialogue
            .agent_line(agent, outcome, &mut self.rng)
            .map(str::to_owned);
        if let Some(text) = line {
            self.push_bubble(BubbleTarget::Agent(agent), text, need, obs);
        }
    }

    fn handle_bubble_expiry(&mut self, id: BubbleId) {
        self.bubbles.retain(|b| b.id != id);
    }
}
