//! The `Session` struct and its transitions.

use fc_core::GameConfig;

// ── Phase ────────────────────────────────────────────────────────────────────

/// Mutually exclusive game phases.
///
/// `Playing` is the only phase in which the scheduler and resolver are
/// active; everything else in the engine checks `is_playing` first.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Ready,
    Playing,
    Ended,
}

// ── Session ──────────────────────────────────────────────────────────────────

/// Score, level, remaining time, and phase for one play-through.
///
/// The session is the exclusive owner of all four values; the engine mutates
/// them only through the methods below so the monotonicity invariants
/// (score and level never decrease, time never goes negative) hold by
/// construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    phase: Phase,
    score: u32,
    level: u32,
    time_left_secs: u32,

    /// Score at which the last level-up fired.  Guards the milestone check
    /// so two evaluations at the same score cannot level up twice.
    last_milestone: u32,

    // Tuning copied from GameConfig at construction.
    initial_time_secs: u32,
    time_ceiling_secs: u32,
    level_up_threshold: u32,
    level_up_time_award_secs: u32,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: Phase::Ready,
            score: 0,
            level: 1,
            time_left_secs: config.initial_time_secs,
            last_milestone: 0,
            initial_time_secs: config.initial_time_secs,
            time_ceiling_secs: config.time_ceiling_secs,
            level_up_threshold: config.level_up_threshold,
            level_up_time_award_secs: config.level_up_time_award_secs,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    // ── Phase transitions ─────────────────────────────────────────────────

    /// Ready → Playing with a fresh score/level/time.  Returns `false`
    /// (and does nothing) from any other phase — an ended session must be
    /// restarted before it can start again.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.reset_counters();
        self.phase = Phase::Playing;
        true
    }

    /// Any phase → Ready with the same reset values as `start`, but without
    /// entering Playing: the player must explicitly start again.
    /// Idempotent — repeated restarts always land on the identical state.
    pub fn restart(&mut self) {
        self.reset_counters();
        self.phase = Phase::Ready;
    }

    /// Playing → Ended.  No-op from Ready or Ended.
    pub fn end(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.phase = Phase::Ended;
        true
    }

    // ── Score / time mutation (Playing only) ──────────────────────────────

    /// Score += 1.  No-op outside Playing.
    pub fn award_score(&mut self) {
        if self.is_playing() {
            self.score += 1;
        }
    }

    /// Remaining time += `secs`.  The per-delivery bonus is deliberately
    /// uncapped; only the level-up award clamps to the ceiling.
    pub fn award_time(&mut self, secs: u32) {
        if self.is_playing() {
            self.time_left_secs += secs;
        }
    }

    /// Remaining time −= 1 s, saturating at zero.  Returns `true` exactly
    /// when this call brought the clock to zero — the caller's cue to end
    /// the session.
    pub fn decrement_time(&mut self) -> bool {
        if !self.is_playing() || self.time_left_secs == 0 {
            return false;
        }
        self.time_left_secs -= 1;
        self.time_left_secs == 0
    }

    /// Fire a level-up if the score sits on an unconsumed milestone
    /// (`score > 0 && score % threshold == 0`).  Idempotent per milestone:
    /// a second evaluation at the same score is a no-op.
    ///
    /// On fire: level += 1 and the level-up time award is added, clamped to
    /// the ceiling.
    pub fn maybe_level_up(&mut self) -> bool {
        if !self.is_playing()
            || self.score == 0
            || self.score % self.level_up_threshold != 0
            || self.score == self.last_milestone
        {
            return false;
        }
        self.last_milestone = self.score;
        self.level += 1;
        self.time_left_secs = (self.time_left_secs + self.level_up_time_award_secs)
            .min(self.time_ceiling_secs.max(self.time_left_secs));
        true
    }

    // ── Private ───────────────────────────────────────────────────────────

    fn reset_counters(&mut self) {
        self.score = 0;
        self.level = 1;
        self.time_left_secs = self.initial_time_secs;
        self.last_milestone = 0;
    }
}
