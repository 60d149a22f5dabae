//! Deterministic session-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every random decision in a session — which cat asks, what it asks for,
//! which spot it wanders to, which flavor line is spoken — draws from a
//! single `SessionRng` seeded from `GameConfig::seed`.  Because the engine
//! processes callbacks in deterministic order, the same seed replays the
//! same session exactly.  Tests exploit this to pin down scheduler behavior
//! without mocking.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-session deterministic RNG.
///
/// The type is `!Sync` by construction to prevent accidental sharing; the
/// engine owns exactly one.
pub struct SessionRng(SmallRng);

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        SessionRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SessionRng` with a different seed offset — used when a
    /// restarted session should not replay the previous one verbatim.
    pub fn child(&mut self, offset: u64) -> SessionRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SessionRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
