//! Deterministic random number generation
//!
//! All simulation randomness (event card draws, Monte Carlo seeding) flows
//! through [`RngManager`]. Same seed, same sequence, which is what makes
//! lookahead runs reproduce the live engine bit-for-bit.

mod xorshift;

pub use xorshift::RngManager;

use std::time::{SystemTime, UNIX_EPOCH};

/// Derive a seed from system time for unseeded runs.
///
/// Used when a caller explicitly opts out of reproducibility (a `None`
/// seed). Every seeded path in the crate avoids this function.
pub fn entropy_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    // Fold 128 bits down to 64; the quality bar here is "different per call"
    (nanos as u64) ^ ((nanos >> 64) as u64) | 1
}
