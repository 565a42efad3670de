//! Deterministic round engine
//!
//! One module per phase mutator, plus the validator, the cost ledger,
//! and the `round` orchestrator that ties phase checks, validation, and
//! mutation together. Mutators assume validated input; every rule check
//! lives in `validator` and runs before any state is touched.

pub mod arrivals;
pub mod checkpoint;
pub mod closed;
pub mod cost;
pub mod defaults;
pub mod events;
pub mod exits;
pub mod paperwork;
pub mod round;
pub mod staffing;
pub mod validator;
