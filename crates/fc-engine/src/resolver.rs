//! Delivery resolution: turning a pointer release into an outcome.

use fc_core::{AgentId, ItemId, NeedKind, Point};
use fc_dialogue::Outcome;

use crate::engine::{Engine, TimerRole};
use crate::events::DeliveryOutcome;
use crate::observer::GameObserver;

impl Engine {
    /// Resolve dropping `item` at `p`.
    ///
    /// Rules, in order:
    /// 1. Outside the playing phase nothing is delivered.
    /// 2. The item's footprint is recentered on the drop point and tested
    ///    against agent bounds; the first overlap in registry order wins.
    /// 3. A hit agent with no pending need ignores the offer entirely.
    /// 4. Kind match → correct delivery; mismatch → wrong item.
    ///
    /// The item snaps back to rest in every case.
    pub(crate) fn attempt_delivery(
        &mut self,
        item: ItemId,
        p: Point,
        obs: &mut impl GameObserver,
    ) -> DeliveryOutcome {
        let Some(offered) = self.items.get(item).map(|i| (i.kind, i.rect.centered_at(p))) else {
            return DeliveryOutcome::NotDelivered;
        };
        let (kind, probe) = offered;

        let outcome = if !self.session.is_playing() {
            DeliveryOutcome::NotDelivered
        } else {
            match self.roster.first_hit(&probe) {
                None => DeliveryOutcome::NotDelivered,
                Some(agent) => match self.roster.get(agent).and_then(|a| a.need) {
                    None => DeliveryOutcome::NotDelivered,
                    Some(need) if need.kind == kind => self.resolve_correct(agent, kind, obs),
                    Some(need) => {
                        self.speak(agent, Outcome::WrongItem, obs);
                        DeliveryOutcome::Wrong { agent, offered: kind, wanted: need.kind }
                    }
                },
            }
        };

        self.items.snap_back(item);
        obs.on_delivery(&outcome);
        outcome
    }

    /// Apply a correct delivery: clear the need, award score and the
    /// pre-level-up time bonus, surface the bonus indicator, then check the
    /// level milestone.
    fn resolve_correct(
        &mut self,
        agent: AgentId,
        kind: NeedKind,
        obs: &mut impl GameObserver,
    ) -> DeliveryOutcome {
        self.roster.clear_need(agent);

        // Bonus is computed before any level-up this delivery may trigger.
        let bonus_secs = self.config.time_bonus_secs(self.session.level());
        self.session.award_score();
        self.session.award_time(bonus_secs);
        obs.on_time_bonus(bonus_secs);
        self.show_bonus(bonus_secs);

        let leveled_up = self.session.maybe_level_up();
        if leveled_up {
            obs.on_level_up(self.session.level());
        }

        self.speak(agent, Outcome::Delivered, obs);

        DeliveryOutcome::Correct { agent, kind, bonus_secs, leveled_up }
    }

    /// Raise the "+N s" indicator, replacing any one already showing.  The
    /// previous clear timer is cancelled so it cannot cut the new indicator
    /// short.
    fn show_bonus(&mut self, secs: u32) {
        if let Some(old) = self.bonus_clear.take() {
            self.timers.cancel(old);
            self.roles.remove(&old);
        }
        self.bonus_display = Some(secs);
        let now = self.clock.current_tick;
        let timer = self.timers.after(now, self.ticks_ms(self.config.bonus_display_ms));
        self.roles.insert(timer, TimerRole::BonusClear);
        self.bonus_clear = Some(timer);
    }
}
