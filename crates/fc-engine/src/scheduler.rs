//! Request scheduling: the opening one-shots, the level-paced request
//! stream, the deadline sweep, and the countdown.
//!
//! All handlers are inert outside the playing phase.  That guard plus the
//! arena-wide cancel on phase exit means a session's schedule can never
//! leak into the next one.

use fc_core::{AgentId, NeedKind};
use fc_dialogue::Outcome;

use crate::engine::{Engine, TimerRole};
use crate::events::BubbleTarget;
use crate::observer::GameObserver;

impl Engine {
    /// Scripted first beat: one random eligible agent asks for a random kind.
    pub(crate) fn handle_opening_first(&mut self, obs: &mut impl GameObserver) {
        if !self.session.is_playing() {
            return;
        }
        let eligible = self.roster.eligible();
        let Some(&agent) = self.rng.choose(&eligible) else {
            return;
        };
        let kind = self.random_kind();
        self.issue_request(agent, kind, obs);
    }

    /// Scripted second beat: every eligible agent asks at once, kinds
    /// alternating from a random start so the player has to sort items.
    /// Deliberately ignores the concurrency cap — this is the one scripted
    /// overload moment of the session.
    pub(crate) fn handle_opening_burst(&mut self, obs: &mut impl GameObserver) {
        if !self.session.is_playing() {
            return;
        }
        let mut kind = self.random_kind();
        for agent in self.roster.eligible() {
            self.issue_request(agent, kind, obs);
            kind = kind.opposite();
        }
    }

    /// Steady-state request stream.  Takes one snapshot of pending count vs
    /// the level's cap, issues at most one request, then re-arms itself at
    /// the *current* level's interval so difficulty ramps take effect on the
    /// very next fire.
    pub(crate) fn handle_pacer(&mut self, obs: &mut impl GameObserver) {
        if !self.session.is_playing() {
            return;
        }
        let cap = self.config.concurrency_cap(self.session.level());
        if self.roster.pending_count() < cap {
            let eligible = self.roster.eligible();
            if let Some(&agent) = self.rng.choose(&eligible) {
                let kind = self.random_kind();
                self.issue_request(agent, kind, obs);
            }
        }

        let now = self.clock.current_tick;
        let delay = self.ticks_ms(self.config.pacer_interval_ms(self.session.level()));
        let next = self.timers.after(now, delay);
        self.roles.insert(next, TimerRole::Pacer);
    }

    /// Drop every request whose window ran out.  No penalty beyond the lost
    /// opportunity.
    pub(crate) fn handle_sweep(&mut self, obs: &mut impl GameObserver) {
        if !self.session.is_playing() {
            return;
        }
        let now = self.clock.current_tick;
        for (agent, kind) in self.roster.expire_due(now) {
            obs.on_request_expired(agent, kind);
        }
    }

    /// One second off the clock; at zero the session ends.
    pub(crate) fn handle_countdown(&mut self, obs: &mut impl GameObserver) {
        if self.session.decrement_time() {
            self.finish(obs);
        }
    }

    /// The keeper reacts one beat after a request: usually a reassuring
    /// acknowledgement addressed to the asking cat, sometimes a complaint.
    pub(crate) fn handle_keeper_reaction(&mut self, agent: AgentId, obs: &mut impl GameObserver) {
        if !self.session.is_playing() {
            return;
        }
        let line = self
            .dialogue
            .keeper_line(agent, &mut self.rng)
            .map(str::to_owned);
        if let Some(text) = line {
            self.push_bubble(BubbleTarget::Keeper, text, None, obs);
        }
    }

    // ── Request issue ─────────────────────────────────────────────────────

    /// Hand `agent` a pending need: compute the level-scaled deadline, move
    /// the cat to a fresh spot, raise its request bubble, and queue the
    /// keeper's delayed reaction.
    pub(crate) fn issue_request(
        &mut self,
        agent: AgentId,
        kind: NeedKind,
        obs: &mut impl GameObserver,
    ) {
        let now = self.clock.current_tick;
        let duration = self.config.request_duration_secs(self.session.level());
        let deadline = now + self.clock.ticks_for_secs(duration as u64);

        self.roster.relocate(agent, &mut self.rng);
        self.roster.set_need(agent, kind, now, deadline);
        obs.on_request_issued(agent, kind, deadline);

        self.speak(agent, Outcome::Request(kind), obs);

        let reaction = self.timers.after(now, self.ticks_ms(self.config.helper_delay_ms));
        self.roles.insert(reaction, TimerRole::KeeperReaction(agent));
    }

    pub(crate) fn random_kind(&mut self) -> NeedKind {
        if self.rng.gen_bool(0.5) {
            NeedKind::Food
        } else {
            NeedKind::Water
        }
    }
}
