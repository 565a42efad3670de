//! Hospital Flow Simulator Core - Rust Engine
//!
//! Turn-based hospital resource-allocation simulator with deterministic
//! execution and a forward-looking decision optimizer.
//!
//! # Architecture
//!
//! - **models**: Domain types (GameState, DepartmentState, actions, events)
//! - **data**: Fixed schedule tables, flow graph, event pools, starting state
//! - **engine**: Validator, cost calculator, event engine, round state machine
//! - **forecast**: Lookahead simulation, Monte Carlo, candidate optimizer
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All cost values are i64 (whole dollars)
//! 2. All randomness is deterministic when seeded (xorshift64*)
//! 3. Phases advance only through validated decisions; a rejected decision
//!    never partially applies
//! 4. Lookahead and Monte Carlo operate on deep copies and reproduce the
//!    live engine bit-for-bit under the same seed and policy

// Module declarations
pub mod data;
pub mod engine;
pub mod forecast;
pub mod models;
pub mod rng;

// Re-exports for convenience
pub use engine::{
    checkpoint::{StateSnapshot, SnapshotError},
    round::{play_round_with_defaults, GameError},
    validator::ValidationError,
};
pub use models::{
    action::{Action, ArrivalsAction, ClosedAction, ExitsAction, StaffingAction},
    cost::CostRates,
    department::{Capacity, DepartmentId, DepartmentState, StaffState},
    phase::Phase,
    state::{GameState, RoundCostEntry},
};
pub use forecast::{
    lookahead::{run_lookahead, LookaheadResult},
    monte_carlo::{run_monte_carlo, MonteCarloResult},
    optimizer::{optimize_phase, OptimizationResult},
    policy::{DecisionPolicy, GreedyPolicy, OverridePolicy},
    ForecastError,
};
pub use rng::RngManager;
