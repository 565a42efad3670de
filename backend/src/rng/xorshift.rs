//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG suitable for simulation: deterministic,
//! serializable, and cheap to clone into forked simulation runs.
//!
//! # Determinism
//!
//! Same seed → same sequence. This is CRITICAL for:
//! - Reproducing an exact game (event draws at rounds 6/9/12/17/21)
//! - The lookahead/live-engine equivalence guarantee
//! - Testing

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use hospital_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let card = rng.pick_index(6); // uniform in [0, 6)
/// assert!(card < 6);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed.
    ///
    /// A zero seed is mapped to 1 (xorshift requires nonzero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value, advancing the internal state.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform index in `[0, len)`, used for event card draws.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "len must be > 0");
        (self.next() % len as u64) as usize
    }

    /// Generate random f64 in `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Get current RNG state (for checkpointing/replay).
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
