//! Forecasting and decision optimization
//!
//! Everything here operates on deep copies of the live state and drives
//! the real engine functions; no game rule is re-implemented in this
//! module tree. Under the same seed and policy a forecast reproduces the
//! live engine bit-for-bit.

pub mod lookahead;
pub mod metrics;
pub mod monte_carlo;
pub mod optimizer;
pub mod policy;

use thiserror::Error;

use crate::engine::round::GameError;

/// Input-contract violations and engine failures surfaced by the
/// forecasting layer.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("horizon must be at least 1 round")]
    InvalidHorizon,
    #[error("at least one simulation is required")]
    NoSimulations,
    #[error(transparent)]
    Engine(#[from] GameError),
}
