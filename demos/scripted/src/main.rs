//! Scripted playthrough: a deterministic "player" that feeds the cats.
//!
//! Runs the engine headless at full speed with a simple reactive bot — every
//! reaction interval it looks for a pending need and delivers the matching
//! item.  Prints the event stream, then the final scoreboard, then persists
//! the run to a progress store the way a host application would.
//!
//! Usage: `cargo run -p scripted [seed]`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use fc_core::{AgentId, GameConfig, NeedKind, Tick};
use fc_engine::{Bubble, DeliveryOutcome, EngineBuilder, GameObserver};
use fc_store::{MemoryStore, PlayerRecord, ProgressStore};

/// Ticks between bot reactions; 0.7 s at the default resolution.
const REACTION_TICKS: u64 = 7;

/// Hard stop in case a run never ends (it always does; the countdown sees
/// to that).
const MAX_TICKS: u64 = 10_000;

const PLAYER_ID: &str = "scripted-bot";

/// Observer that narrates the session and remembers who got fed.
#[derive(Default)]
struct Console {
    fed: Vec<AgentId>,
    over: bool,
}

impl GameObserver for Console {
    fn on_request_issued(&mut self, agent: AgentId, kind: NeedKind, deadline: Tick) {
        println!("  [{agent}] asks for {kind} (until {deadline})");
    }

    fn on_request_expired(&mut self, agent: AgentId, kind: NeedKind) {
        println!("  [{agent}] gave up waiting for {kind}");
    }

    fn on_delivery(&mut self, outcome: &DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::Correct { agent, kind, bonus_secs, .. } => {
                println!("  [{agent}] fed {kind}, +{bonus_secs}s");
                self.fed.push(*agent);
            }
            DeliveryOutcome::Wrong { agent, offered, wanted } => {
                println!("  [{agent}] offered {offered}, wanted {wanted}");
            }
            DeliveryOutcome::NotDelivered => {}
        }
    }

    fn on_bubble(&mut self, bubble: &Bubble) {
        println!("    \u{201c}{}\u{201d}", bubble.text);
    }

    fn on_level_up(&mut self, level: u32) {
        println!("  == level {level} ==");
    }

    fn on_game_over(&mut self, score: u32, level: u32) {
        println!("  == game over: score {score}, level {level} ==");
        self.over = true;
    }
}

fn main() -> Result<()> {
    let seed = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<u64>().context("seed must be an unsigned integer")?,
        None => 42,
    };

    // 1. Build and start a stock game.
    let config = GameConfig { seed, ..GameConfig::default() };
    let mut engine = EngineBuilder::new(config).build()?;
    let mut console = Console::default();
    engine.start(&mut console);
    println!("session started (seed {seed})");

    // 2. Run the tick loop with the reactive bot in the driver's seat.
    let mut ticks = 0;
    while !console.over && ticks < MAX_TICKS {
        engine.tick(&mut console);
        ticks += 1;

        if ticks % REACTION_TICKS != 0 {
            continue;
        }
        let pending = engine
            .agents()
            .find_map(|a| a.need.map(|need| (need.kind, a.rect.center())));
        if let Some((kind, target)) = pending {
            let item = engine
                .items()
                .find(|i| i.kind == kind)
                .map(|i| i.id)
                .context("stock rack carries both kinds")?;
            engine.release(item, target, &mut console);
        }
    }

    // 3. Scoreboard.
    let session = engine.session();
    println!();
    println!("ticks run : {ticks}");
    println!("score     : {}", session.score());
    println!("level     : {}", session.level());

    // 4. Persist the run the way a host front-end would.
    let mut fed_names: Vec<String> = console
        .fed
        .iter()
        .filter_map(|&id| engine.roster().get(id).map(|a| a.name.clone()))
        .collect();
    fed_names.sort();
    fed_names.dedup();

    let now_unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    let mut store = MemoryStore::new();
    let mut record = store.fetch(PLAYER_ID);
    record.score = record.score.max(session.score());
    record.level = record.level.max(session.level());
    record.collected = fed_names;
    record.last_played_unix = now_unix;
    store.upsert(PLAYER_ID, record);

    let saved = store.fetch(PLAYER_ID);
    println!("saved     : best score {}, befriended {:?}", saved.score, saved.collected);

    Ok(())
}
