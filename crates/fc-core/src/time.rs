//! Game time model and difficulty tuning.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to wall-clock time is held in `GameClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Using an integer tick as the canonical time unit means every deadline and
//! interval comparison is exact (no floating-point drift) and O(1).  The host
//! is expected to call the engine's `tick()` once per `tick_duration_ms` of
//! real time; everything below that resolution is invisible to the engine.
//!
//! The default tick duration is 100 ms — fine enough that the 1.5 s opening
//! delay and the 2–5 s pacer intervals all land on exact tick boundaries.
//!
//! All difficulty formulas (request window, time bonus, concurrency cap,
//! pacer interval) live on [`GameConfig`] so the engine, tests, and demos
//! share one source of truth.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute game tick counter.
///
/// Stored as `u64`: at the default 100 ms resolution a u64 lasts ~58 billion
/// years, so overflow is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── GameClock ─────────────────────────────────────────────────────────────────

/// Converts between tick counts and wall-clock milliseconds.
///
/// `GameClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    /// How many real milliseconds one tick represents.  Default: 100.
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `GameClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl GameClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `ms` milliseconds? (rounds up — a deadline is
    /// never shorter than requested)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms as u64)
    }

    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        self.ticks_for_ms(secs * 1_000)
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{} ({}.{}s)", self.current_tick, ms / 1_000, (ms % 1_000) / 100)
    }
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Top-level game configuration and difficulty tuning.
///
/// `Default` yields the production values observed in play-testing; tests
/// override individual fields to pin down boundary behavior.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Master RNG seed.  The same seed always produces the same session.
    pub seed: u64,

    /// Milliseconds per tick.  Must evenly divide 1000 so the 1 s countdown
    /// and timeout sweep land on exact tick boundaries.
    pub tick_duration_ms: u32,

    /// Seconds on the clock when a session starts.
    pub initial_time_secs: u32,

    /// Upper clamp applied to the level-up time award (never to the
    /// per-delivery bonus).
    pub time_ceiling_secs: u32,

    /// A level-up fires at every multiple of this score.
    pub level_up_threshold: u32,

    /// Seconds granted on level-up, clamped to `time_ceiling_secs`.
    pub level_up_time_award_secs: u32,

    /// Request window: `max(request_floor_secs, request_base_secs − level)`.
    pub request_base_secs: u32,
    pub request_floor_secs: u32,

    /// Delivery bonus: `max(bonus_floor_secs, bonus_base_secs − level)`.
    pub bonus_base_secs: u32,
    pub bonus_floor_secs: u32,

    /// Concurrency cap: `min(hard_cap, 1 + level/2)` simultaneous requests.
    pub concurrency_hard_cap: u32,

    /// Opening sequence: one-shot delays after session start.
    pub opening_first_ms: u32,
    pub opening_burst_ms: u32,

    /// Pacer interval: `max(pacer_floor_ms, pacer_base_ms − pacer_step_ms·level)`.
    pub pacer_base_ms: u32,
    pub pacer_step_ms: u32,
    pub pacer_floor_ms: u32,

    /// Fixed-interval deadline sweep and countdown periods.
    pub sweep_interval_ms: u32,
    pub countdown_interval_ms: u32,

    /// Presentation-facing lifetimes, still engine-owned because their
    /// auto-clear timers must be cancelled with the session.
    pub bubble_lifetime_ms: u32,
    pub helper_delay_ms: u32,
    pub bonus_display_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed:                     0,
            tick_duration_ms:         100,
            initial_time_secs:        20,
            time_ceiling_secs:        30,
            level_up_threshold:       8,
            level_up_time_award_secs: 5,
            request_base_secs:        20,
            request_floor_secs:       8,
            bonus_base_secs:          12,
            bonus_floor_secs:         5,
            concurrency_hard_cap:     2,
            opening_first_ms:         1_500,
            opening_burst_ms:         10_000,
            pacer_base_ms:            5_000,
            pacer_step_ms:            250,
            pacer_floor_ms:           2_000,
            sweep_interval_ms:        1_000,
            countdown_interval_ms:    1_000,
            bubble_lifetime_ms:       3_000,
            helper_delay_ms:          1_000,
            bonus_display_ms:         2_000,
        }
    }
}

impl GameConfig {
    /// Construct a `GameClock` pre-configured for this session.
    pub fn make_clock(&self) -> GameClock {
        GameClock::new(self.tick_duration_ms)
    }

    /// Check internal consistency.  Called once by the engine builder.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 || 1_000 % self.tick_duration_ms != 0 {
            return Err(CoreError::Config(format!(
                "tick_duration_ms must be a divisor of 1000, got {}",
                self.tick_duration_ms
            )));
        }
        if self.request_floor_secs > self.request_base_secs {
            return Err(CoreError::Config(
                "request_floor_secs exceeds request_base_secs".into(),
            ));
        }
        if self.bonus_floor_secs > self.bonus_base_secs {
            return Err(CoreError::Config(
                "bonus_floor_secs exceeds bonus_base_secs".into(),
            ));
        }
        if self.concurrency_hard_cap == 0 {
            return Err(CoreError::Config("concurrency_hard_cap must be ≥ 1".into()));
        }
        if self.level_up_threshold == 0 {
            return Err(CoreError::Config("level_up_threshold must be ≥ 1".into()));
        }
        Ok(())
    }

    // ── Difficulty formulas ───────────────────────────────────────────────

    /// Seconds a request at `level` stays open before expiring.
    /// Shrinks by one second per level, never below the floor.
    #[inline]
    pub fn request_duration_secs(&self, level: u32) -> u32 {
        self.request_base_secs
            .saturating_sub(level)
            .max(self.request_floor_secs)
    }

    /// Seconds added to the clock by a correct delivery at `level`.
    /// Shrinks with level to mirror the shortened request window.
    #[inline]
    pub fn time_bonus_secs(&self, level: u32) -> u32 {
        self.bonus_base_secs
            .saturating_sub(level)
            .max(self.bonus_floor_secs)
    }

    /// Maximum simultaneous pending requests at `level`.
    /// Grows slowly with level but never exceeds the hard cap.
    #[inline]
    pub fn concurrency_cap(&self, level: u32) -> usize {
        (1 + level / 2).min(self.concurrency_hard_cap) as usize
    }

    /// Milliseconds between pacer fires at `level`, floored so the game
    /// never becomes a request firehose.
    #[inline]
    pub fn pacer_interval_ms(&self, level: u32) -> u32 {
        self.pacer_base_ms
            .saturating_sub(self.pacer_step_ms.saturating_mul(level))
            .max(self.pacer_floor_ms)
    }
}
