//! Engine integration tests.
//!
//! Everything here drives a real engine through `tick()` with a recording
//! observer.  Seeds are fixed, so scheduler behavior is exactly repeatable;
//! where a test must not depend on RNG at all it issues requests directly.

use fc_core::{AgentId, GameConfig, ItemId, NeedKind, Point, Tick};
use fc_session::Phase;

use crate::engine::Engine;
use crate::events::{Bubble, BubbleTarget, DeliveryOutcome};
use crate::observer::GameObserver;
use crate::EngineBuilder;

// ── Harness ──────────────────────────────────────────────────────────────────

/// Observer that records every hook invocation.
#[derive(Default)]
struct Recorder {
    issued:    Vec<(AgentId, NeedKind, Tick)>,
    expired:   Vec<(AgentId, NeedKind)>,
    bubbles:   usize,
    bonuses:   Vec<u32>,
    level_ups: Vec<u32>,
    game_over: Vec<(u32, u32)>,
}

impl GameObserver for Recorder {
    fn on_request_issued(&mut self, agent: AgentId, kind: NeedKind, deadline: Tick) {
        self.issued.push((agent, kind, deadline));
    }
    fn on_request_expired(&mut self, agent: AgentId, kind: NeedKind) {
        self.expired.push((agent, kind));
    }
    fn on_bubble(&mut self, _bubble: &Bubble) {
        self.bubbles += 1;
    }
    fn on_time_bonus(&mut self, secs: u32) {
        self.bonuses.push(secs);
    }
    fn on_level_up(&mut self, level: u32) {
        self.level_ups.push(level);
    }
    fn on_game_over(&mut self, score: u32, level: u32) {
        self.game_over.push((score, level));
    }
}

fn config() -> GameConfig {
    GameConfig { seed: 7, ..GameConfig::default() }
}

fn engine() -> Engine {
    EngineBuilder::new(config()).build().unwrap()
}

/// An engine whose scripted opening is pushed far past every test horizon,
/// leaving the request stream entirely under test control.
fn quiet_engine(config: GameConfig) -> Engine {
    let config = GameConfig {
        opening_first_ms: 600_000,
        opening_burst_ms: 600_000,
        pacer_base_ms: 600_000,
        pacer_floor_ms: 600_000,
        ..config
    };
    EngineBuilder::new(config).build().unwrap()
}

/// The need an agent currently holds; panics if it holds none.
fn need_of(engine: &Engine, agent: AgentId) -> NeedKind {
    engine.roster().get(agent).unwrap().need.unwrap().kind
}

/// Center of an agent's current bounds, for aimed drops.
fn center_of(engine: &Engine, agent: AgentId) -> Point {
    engine.roster().get(agent).unwrap().rect.center()
}

/// The item id carrying `kind` in the stock rack.
fn item_of(engine: &Engine, kind: NeedKind) -> ItemId {
    engine.items().find(|i| i.kind == kind).unwrap().id
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

mod lifecycle {
    use super::*;

    #[test]
    fn start_only_from_ready() {
        let mut e = engine();
        let mut obs = Recorder::default();
        assert!(e.start(&mut obs));
        assert!(!e.start(&mut obs), "already playing");
        assert!(e.end(&mut obs));
        assert!(!e.start(&mut obs), "ended sessions must be restarted first");
        e.restart();
        assert!(e.start(&mut obs));
    }

    #[test]
    fn start_arms_the_full_schedule() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);
        // Opening ×2, pacer, sweep, countdown.
        assert_eq!(e.pending_timers(), 5);
    }

    #[test]
    fn restart_cancels_every_timer() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.run_ticks(30, &mut obs);
        assert!(e.pending_timers() > 0);

        e.restart();
        assert_eq!(e.pending_timers(), 0);
        assert_eq!(e.session().phase(), Phase::Ready);

        // A long quiet stretch: nothing armed before the restart may fire.
        let mut after = Recorder::default();
        e.run_ticks(300, &mut after);
        assert!(after.issued.is_empty());
        assert!(after.game_over.is_empty());
        assert_eq!(after.bubbles, 0);
    }

    #[test]
    fn restart_is_idempotent() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.run_ticks(50, &mut obs);
        e.restart();
        e.restart();
        assert_eq!(e.session().phase(), Phase::Ready);
        assert_eq!(e.session().score(), 0);
        assert_eq!(e.session().level(), 1);
        assert_eq!(e.session().time_left_secs(), config().initial_time_secs);
        assert_eq!(e.pending_timers(), 0);
    }

    #[test]
    fn restart_returns_agents_home() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);
        e.restart();
        let agent = e.roster().get(AgentId(0)).unwrap();
        assert_eq!(agent.rect, agent.home);
        assert!(agent.need.is_none());
    }

    #[test]
    fn host_end_fires_game_over_and_clears() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);
        assert!(!e.bubbles().is_empty());

        assert!(e.end(&mut obs));
        assert_eq!(obs.game_over, vec![(0, 1)]);
        assert_eq!(e.pending_timers(), 0);
        assert!(e.bubbles().is_empty());
        assert!(!e.end(&mut obs), "end is playing-only");
    }
}

// ── Opening sequence ─────────────────────────────────────────────────────────

mod opening {
    use super::*;

    #[test]
    fn first_request_fires_on_schedule() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);

        // 1.5 s = tick 15; not yet processed after 15 ticks.
        e.run_ticks(15, &mut obs);
        assert!(obs.issued.is_empty());

        e.tick(&mut obs);
        assert_eq!(obs.issued.len(), 1);
        assert_eq!(e.roster().pending_count(), 1);

        // Window at level 1 is 19 s → 190 ticks past the issue tick.
        let (_, _, deadline) = obs.issued[0];
        assert_eq!(deadline, Tick(15 + 190));
    }

    #[test]
    fn burst_hits_every_idle_agent_at_once() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);

        // Past the 10 s burst.  The opening request (still within its 19 s
        // window) plus the burst covering the other agent.
        e.run_ticks(101, &mut obs);
        assert_eq!(obs.issued.len(), 2);
        assert_eq!(e.roster().pending_count(), 2);
    }

    #[test]
    fn opening_scenario_plays_out_to_two_deliveries() {
        // Empty spot table keeps the cats at their (disjoint) homes, so the
        // aimed drops below cannot cross-hit.
        let mut e = EngineBuilder::new(config()).spots(Vec::new()).build().unwrap();
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.run_ticks(101, &mut obs);
        assert_eq!(e.roster().pending_count(), 2);

        for agent in [AgentId(0), AgentId(1)] {
            let kind = need_of(&e, agent);
            let item = item_of(&e, kind);
            let target = center_of(&e, agent);
            assert!(e.release(item, target, &mut obs).is_correct());
        }

        assert_eq!(e.session().score(), 2);
        // 20 s start − 10 s ticked + two level-1 bonuses of 11 s.
        assert_eq!(e.session().time_left_secs(), 32);
        assert_eq!(e.roster().pending_count(), 0);
    }

    #[test]
    fn burst_alternates_kinds_across_agents() {
        use fc_agents::AgentSpec;
        use fc_core::Rect;

        let specs: Vec<AgentSpec> = (0..4)
            .map(|i| AgentSpec::new(format!("cat{i}"), Rect::new(i as f32 * 100.0, 0.0, 70.0, 70.0)))
            .collect();
        let mut e = EngineBuilder::new(config()).agents(specs).build().unwrap();
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.run_ticks(101, &mut obs);

        // One agent was served by the opening request; the burst covers the
        // remaining three with strictly alternating kinds.
        assert_eq!(obs.issued.len(), 4);
        let burst: Vec<NeedKind> = obs.issued[1..].iter().map(|&(_, k, _)| k).collect();
        assert_eq!(burst[1], burst[0].opposite());
        assert_eq!(burst[2], burst[0]);
    }
}

// ── Pacing and expiry ────────────────────────────────────────────────────────

mod pacing {
    use super::*;

    #[test]
    fn pacer_respects_the_level_cap() {
        let mut e = engine();
        let mut obs = Recorder::default();
        e.start(&mut obs);

        // Level 1 cap is one pending request.  The opening fires at 1.5 s
        // and is never answered, so every pacer fire before the 10 s burst
        // (at 4.75 s and 9.5 s) must decline.
        e.run_ticks(99, &mut obs);
        assert_eq!(obs.issued.len(), 1);
        assert!(e.roster().pending_count() <= 1);
    }

    #[test]
    fn pacer_issues_when_below_cap() {
        // Opening pushed out of the way; a fast 1 s pacer under test.
        let cfg = GameConfig {
            opening_first_ms: 600_000,
            opening_burst_ms: 600_000,
            pacer_base_ms: 1_000,
            pacer_step_ms: 0,
            pacer_floor_ms: 1_000,
            ..config()
        };
        let mut e = EngineBuilder::new(cfg).build().unwrap();
        let mut obs = Recorder::default();
        e.start(&mut obs);

        // First fire at tick 10 finds zero pending and issues; every later
        // fire declines at the level-1 cap of one.
        e.run_ticks(45, &mut obs);
        assert_eq!(obs.issued.len(), 1);
        assert_eq!(e.roster().pending_count(), 1);
    }

    #[test]
    fn ignored_request_expires_silently() {
        let mut e = quiet_engine(GameConfig {
            request_base_secs: 3,
            request_floor_secs: 2,
            ..config()
        });
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);

        // Window is 2 s; the sweep clears it on the first pass strictly
        // past the deadline.
        e.run_ticks(31, &mut obs);
        assert_eq!(obs.expired, vec![(AgentId(0), NeedKind::Food)]);
        assert!(e.roster().get(AgentId(0)).unwrap().need.is_none());
        assert_eq!(e.session().score(), 0, "expiry carries no penalty");
        assert!(e.session().is_playing());
    }

    #[test]
    fn same_seed_replays_the_same_session() {
        let run = || {
            let mut e = engine();
            let mut obs = Recorder::default();
            e.start(&mut obs);
            e.run_ticks(150, &mut obs);
            obs.issued
        };
        assert_eq!(run(), run());
    }
}

// ── Delivery ─────────────────────────────────────────────────────────────────

mod delivery {
    use super::*;

    #[test]
    fn correct_delivery_scores_and_extends_time() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);

        let item = item_of(&e, NeedKind::Food);
        let drop = center_of(&e, AgentId(0));
        let outcome = e.release(item, drop, &mut obs);

        assert_eq!(
            outcome,
            DeliveryOutcome::Correct {
                agent: AgentId(0),
                kind: NeedKind::Food,
                bonus_secs: 11,
                leveled_up: false,
            }
        );
        assert_eq!(e.session().score(), 1);
        // The per-delivery bonus is uncapped: 20 + 11 exceeds the ceiling.
        assert_eq!(e.session().time_left_secs(), 31);
        assert!(e.roster().get(AgentId(0)).unwrap().need.is_none());
        assert_eq!(e.bonus_display(), Some(11));
        assert_eq!(obs.bonuses, vec![11]);

        let item = e.items().next().unwrap();
        assert_eq!(Point::new(item.rect.x, item.rect.y), item.rest, "snapped back");
        assert!(!item.dragging);
    }

    #[test]
    fn wrong_item_changes_nothing_but_speaks() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);
        let bubbles_before = obs.bubbles;
        let need_before = e.roster().get(AgentId(0)).unwrap().need.unwrap();

        let item = item_of(&e, NeedKind::Water);
        let outcome = e.release(item, center_of(&e, AgentId(0)), &mut obs);

        assert_eq!(
            outcome,
            DeliveryOutcome::Wrong {
                agent: AgentId(0),
                offered: NeedKind::Water,
                wanted: NeedKind::Food,
            }
        );
        assert_eq!(e.session().score(), 0);
        assert_eq!(e.session().time_left_secs(), 20);
        let need_after = e.roster().get(AgentId(0)).unwrap().need.unwrap();
        assert_eq!(need_after, need_before, "need survives, deadline and all");
        assert_eq!(obs.bubbles, bubbles_before + 1, "the cat objects");
    }

    #[test]
    fn empty_space_drop_is_not_delivered() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);

        let item = item_of(&e, NeedKind::Food);
        let outcome = e.release(item, Point::new(395.0, 5.0), &mut obs);
        assert_eq!(outcome, DeliveryOutcome::NotDelivered);
        assert_eq!(e.session().score(), 0);
        assert_eq!(need_of(&e, AgentId(0)), NeedKind::Food);
    }

    #[test]
    fn idle_agent_ignores_the_offer() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        e.start(&mut obs);

        let item = item_of(&e, NeedKind::Food);
        let outcome = e.release(item, center_of(&e, AgentId(0)), &mut obs);
        assert_eq!(outcome, DeliveryOutcome::NotDelivered);
        assert_eq!(e.session().score(), 0);
    }

    #[test]
    fn delivery_outside_playing_is_inert() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        let item = item_of(&e, NeedKind::Food);
        let target = center_of(&e, AgentId(0));
        assert_eq!(e.release(item, target, &mut obs), DeliveryOutcome::NotDelivered);
        assert_eq!(e.session().score(), 0);
    }

    #[test]
    fn drag_lifecycle_follows_the_pointer() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();

        let rest_center = e.items().next().unwrap().rect.center();
        assert_eq!(e.pick_up(rest_center), None, "inert before start");

        e.start(&mut obs);
        let id = e.pick_up(rest_center).unwrap();
        e.drag_to(id, Point::new(200.0, 300.0));
        let dragged = e.items().next().unwrap();
        assert!(dragged.dragging);
        assert_eq!(dragged.rect.center(), Point::new(200.0, 300.0));

        e.release(id, Point::new(200.0, 300.0), &mut obs);
        let item = e.items().next().unwrap();
        assert!(!item.dragging);
        assert_eq!(Point::new(item.rect.x, item.rect.y), item.rest);
    }
}

// ── Leveling ─────────────────────────────────────────────────────────────────

mod leveling {
    use super::*;

    fn deliver_to(e: &mut Engine, agent: AgentId, obs: &mut Recorder) -> DeliveryOutcome {
        e.issue_request(agent, NeedKind::Food, obs);
        let item = item_of(e, NeedKind::Food);
        let target = center_of(e, agent);
        e.release(item, target, obs)
    }

    #[test]
    fn level_up_fires_once_per_milestone() {
        let mut e = quiet_engine(GameConfig { level_up_threshold: 2, ..config() });
        let mut obs = Recorder::default();
        e.start(&mut obs);

        assert!(deliver_to(&mut e, AgentId(0), &mut obs).is_correct());
        assert_eq!(e.session().level(), 1);

        let second = deliver_to(&mut e, AgentId(0), &mut obs);
        assert!(matches!(second, DeliveryOutcome::Correct { leveled_up: true, .. }));
        assert_eq!(e.session().level(), 2);
        assert_eq!(obs.level_ups, vec![2]);

        // Score 3 is not a milestone.
        let third = deliver_to(&mut e, AgentId(0), &mut obs);
        assert!(matches!(third, DeliveryOutcome::Correct { leveled_up: false, .. }));
        assert_eq!(obs.level_ups, vec![2]);
    }

    #[test]
    fn bonus_uses_the_pre_level_up_level() {
        let mut e = quiet_engine(GameConfig { level_up_threshold: 1, ..config() });
        let mut obs = Recorder::default();
        e.start(&mut obs);

        // This delivery crosses the milestone, but its bonus is the level-1
        // value (12 − 1 = 11), not the level-2 one.
        let outcome = deliver_to(&mut e, AgentId(0), &mut obs);
        assert_eq!(
            outcome,
            DeliveryOutcome::Correct {
                agent: AgentId(0),
                kind: NeedKind::Food,
                bonus_secs: 11,
                leveled_up: true,
            }
        );
    }

    #[test]
    fn level_up_award_never_lifts_an_over_ceiling_clock() {
        let mut e = quiet_engine(GameConfig { level_up_threshold: 1, ..config() });
        let mut obs = Recorder::default();
        e.start(&mut obs);

        // 20 + 11 = 31 s, already past the 30 s ceiling, so the +5 s
        // level-up award is swallowed entirely.
        deliver_to(&mut e, AgentId(0), &mut obs);
        assert_eq!(e.session().time_left_secs(), 31);
    }
}

// ── Countdown and teardown ───────────────────────────────────────────────────

mod countdown {
    use super::*;

    #[test]
    fn clock_runs_out_and_ends_the_session() {
        let mut e = quiet_engine(GameConfig { initial_time_secs: 2, ..config() });
        let mut obs = Recorder::default();
        e.start(&mut obs);

        e.run_ticks(20, &mut obs);
        assert!(obs.game_over.is_empty(), "one second left");

        e.tick(&mut obs);
        assert_eq!(obs.game_over, vec![(0, 1)]);
        assert_eq!(e.session().phase(), Phase::Ended);
        assert_eq!(e.pending_timers(), 0);
    }

    #[test]
    fn no_callback_survives_game_over() {
        let mut e = quiet_engine(GameConfig { initial_time_secs: 2, ..config() });
        let mut obs = Recorder::default();
        e.start(&mut obs);
        // A request right before the end leaves bubble and keeper timers
        // pending; all must die with the session.
        e.issue_request(AgentId(0), NeedKind::Water, &mut obs);
        e.run_ticks(21, &mut obs);
        assert_eq!(obs.game_over.len(), 1);

        let (bubbles, expired) = (obs.bubbles, obs.expired.len());
        e.run_ticks(100, &mut obs);
        assert_eq!(obs.bubbles, bubbles);
        assert_eq!(obs.expired.len(), expired);
        assert!(e.bubbles().is_empty());
    }

    #[test]
    fn time_bonus_defers_the_end() {
        let mut e = quiet_engine(GameConfig { initial_time_secs: 2, ..config() });
        let mut obs = Recorder::default();
        e.start(&mut obs);

        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);
        let item = item_of(&e, NeedKind::Food);
        let target = center_of(&e, AgentId(0));
        e.release(item, target, &mut obs);

        // 2 + 11 s on the clock now; the old deadline passes harmlessly.
        e.run_ticks(30, &mut obs);
        assert!(obs.game_over.is_empty());
        assert!(e.session().is_playing());
    }
}

// ── Bubbles and indicators ───────────────────────────────────────────────────

mod bubbles {
    use super::*;

    #[test]
    fn request_raises_agent_bubble_then_keeper_reaction() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);

        assert_eq!(e.bubbles().len(), 1);
        assert_eq!(e.bubbles()[0].target, BubbleTarget::Agent(AgentId(0)));
        assert_eq!(e.bubbles()[0].need, Some(NeedKind::Food));

        // The keeper reacts one second later.
        e.run_ticks(11, &mut obs);
        assert_eq!(e.bubbles().len(), 2);
        assert!(e.bubbles().iter().any(|b| b.target == BubbleTarget::Keeper));
        assert!(e.bubbles().iter().all(|b| b.target != BubbleTarget::Keeper || b.need.is_none()));
    }

    #[test]
    fn bubbles_expire_after_their_lifetime() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);

        // Agent bubble born at tick 0 lives to tick 30; keeper bubble born
        // at tick 10 lives to tick 40.
        e.run_ticks(31, &mut obs);
        assert_eq!(e.bubbles().len(), 1);
        e.run_ticks(10, &mut obs);
        assert!(e.bubbles().is_empty());
    }

    #[test]
    fn bonus_indicator_clears_after_display_time() {
        let mut e = quiet_engine(config());
        let mut obs = Recorder::default();
        e.start(&mut obs);
        e.issue_request(AgentId(0), NeedKind::Food, &mut obs);
        let item = item_of(&e, NeedKind::Food);
        let target = center_of(&e, AgentId(0));
        e.release(item, target, &mut obs);

        assert_eq!(e.bonus_display(), Some(11));
        e.run_ticks(21, &mut obs);
        assert_eq!(e.bonus_display(), None);
    }

    #[test]
    fn fresh_bonus_replaces_a_showing_one() {
        let mut e = quiet_engine(GameConfig { level_up_threshold: 100, ..config() });
        let mut obs = Recorder::default();
        e.start(&mut obs);

        for _ in 0..2 {
            e.issue_request(AgentId(0), NeedKind::Food, &mut obs);
            let item = item_of(&e, NeedKind::Food);
            let target = center_of(&e, AgentId(0));
            e.release(item, target, &mut obs);
            e.run_ticks(10, &mut obs);
        }
        // Second delivery at tick 10 restarts the 2 s display window, so at
        // tick 20 (where the first clear would have landed) it still shows.
        assert_eq!(e.bonus_display(), Some(11));
        e.run_ticks(11, &mut obs);
        assert_eq!(e.bonus_display(), None);
    }
}

// ── Builder validation ───────────────────────────────────────────────────────

mod builder {
    use super::*;
    use crate::error::EngineError;
    use fc_dialogue::DialogueTable;

    #[test]
    fn default_build_is_playable() {
        let e = engine();
        assert_eq!(e.roster().len(), 2);
        assert_eq!(e.items().count(), 2);
        assert_eq!(e.session().phase(), Phase::Ready);
    }

    #[test]
    fn rejects_bad_config() {
        let bad = GameConfig { tick_duration_ms: 300, ..config() };
        assert!(EngineBuilder::new(bad).build().is_err());
    }

    #[test]
    fn rejects_empty_roster() {
        let err = EngineBuilder::new(config()).agents(Vec::new()).build();
        assert!(err.is_err());
    }

    #[test]
    fn rejects_dialogue_agent_mismatch() {
        let err = EngineBuilder::new(config())
            .dialogue(DialogueTable::stock(5))
            .build();
        assert!(matches!(
            err,
            Err(EngineError::AgentCountMismatch { expected: 2, got: 5, .. })
        ));
    }
}
