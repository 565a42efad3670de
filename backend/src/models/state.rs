//! Complete game state
//!
//! [`GameState`] is the single serializable root of the simulation. All
//! derived quantities (census, idle staff, bed availability) are computed
//! from it on demand; nothing lives outside this struct, which is what
//! makes forecasting a matter of `clone()` + replay.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::cost::CostRates;
use crate::models::department::{DepartmentId, DepartmentState};
use crate::models::phase::Phase;

/// Number of rounds in a game; the round counter runs 1..=24.
pub const TOTAL_ROUNDS: u32 = 24;

/// Per-round cost record, appended at PAPERWORK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCostEntry {
    pub round_number: u32,
    pub financial: i64,
    pub quality: i64,
    /// Labelled line items, e.g. `"er_diversion_fin"` or
    /// `"surgery_arrivals_waiting_qual"`.
    pub details: BTreeMap<String, i64>,
}

/// Root simulation state.
///
/// Cloning produces a fully independent copy; forecast code mutates
/// clones freely and the live game is never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: Uuid,
    /// Current round, 1..=24. Stays at 24 once finished.
    pub round_number: u32,
    pub phase: Phase,
    pub departments: BTreeMap<DepartmentId, DepartmentState>,
    pub total_financial_cost: i64,
    pub total_quality_cost: i64,
    pub round_costs: Vec<RoundCostEntry>,
    pub is_finished: bool,
    /// Whether ER was diverting at the end of the previous round;
    /// ambulances scheduled this round are turned away when set.
    pub er_diverted_last_round: bool,
    /// Ambulances turned away at this round's EVENT phase.
    pub ambulances_diverted_this_round: u32,
    /// Immutable for the life of a session; changing rates mid-game
    /// would make historical round costs incomparable.
    pub cost_rates: CostRates,
}

impl GameState {
    /// Fresh state at round 1, EVENT phase, with the given departments.
    pub fn new(departments: BTreeMap<DepartmentId, DepartmentState>, cost_rates: CostRates) -> Self {
        GameState {
            game_id: Uuid::new_v4(),
            round_number: 1,
            phase: Phase::Event,
            departments,
            total_financial_cost: 0,
            total_quality_cost: 0,
            round_costs: Vec::new(),
            is_finished: false,
            er_diverted_last_round: false,
            ambulances_diverted_this_round: 0,
            cost_rates,
        }
    }

    /// Immutable access to one department. Panics if the id is absent,
    /// which cannot happen for states built through [`GameState::new`]
    /// with the full department map.
    pub fn department(&self, id: DepartmentId) -> &DepartmentState {
        &self.departments[&id]
    }

    /// Mutable access to one department.
    pub fn department_mut(&mut self, id: DepartmentId) -> &mut DepartmentState {
        self.departments.get_mut(&id).expect("department map holds all four ids")
    }

    /// Total patients physically present across all departments.
    pub fn total_census(&self) -> u32 {
        self.departments.values().map(|d| d.total_patients()).sum()
    }

    /// Combined financial + quality cost accrued so far.
    pub fn total_cost(&self) -> i64 {
        self.total_financial_cost + self.total_quality_cost
    }
}
