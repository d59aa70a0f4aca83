//! Injectable random sources.
//!
//! RULE: The engine never calls a platform RNG directly.
//! Every draw flows through a `RandomSource` handed to it at construction,
//! so a run is reproducible from its seed (or from a scripted sequence).

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A capability that yields the next uniform draw in [0.0, 1.0).
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

/// Deterministic PCG stream seeded from a single `u64`.
pub struct SeededRng {
    seed:  u64,
    inner: Pcg64Mcg,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Production default: a fresh seed from the thread-local entropy source.
    /// The seed is kept so a surprising run can be replayed.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        log::debug!("SeededRng drawn from entropy, seed={seed}");
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Replays a fixed sequence of draws, wrapping around when exhausted.
/// Values are clamped into [0.0, 1.0) so a script can never break the
/// range contract of `RandomSource`.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    pos:   usize,
}

impl ScriptedRng {
    /// Panics on an empty script.
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "ScriptedRng needs at least one draw");
        Self { draws, pos: 0 }
    }

    /// Convenience for one tick's worth of draws: roll fraction, confidence,
    /// prediction draw.
    pub fn round(roll: f64, confidence: f64, prediction: f64) -> [f64; 3] {
        [roll / 100.0, confidence, prediction]
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
