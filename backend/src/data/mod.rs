//! Static game data
//!
//! Schedules, event pools, the transfer flow graph, and the starting
//! state factory. Everything here is deterministic input the planner has
//! perfect information about, except which event card is drawn.

pub mod events;
pub mod flow;
pub mod schedule;
pub mod starting;

pub use events::event_pool;
pub use flow::{allowed_destinations, can_transfer};
pub use schedule::{is_event_round, EVENT_ROUNDS};
pub use starting::{create_starting_state, create_custom_state, CustomGameConfig, DepartmentConfig};
