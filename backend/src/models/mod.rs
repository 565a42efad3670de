//! Domain model types
//!
//! Pure data: one snapshot of simulated reality. Derived quantities
//! (idle staff, beds available) are computed, never stored, so they can
//! never drift out of sync with the stored counters. All mutation lives
//! in the `engine` module.

pub mod action;
pub mod cost;
pub mod department;
pub mod event;
pub mod phase;
pub mod state;

pub use action::{Action, ArrivalsAction, ClosedAction, ExitsAction, StaffingAction};
pub use cost::CostRates;
pub use department::{Capacity, DepartmentId, DepartmentState, OutgoingTransfer, StaffState};
pub use event::{ActiveEvent, EventCard, EventEffect};
pub use phase::Phase;
pub use state::{GameState, RoundCostEntry};
