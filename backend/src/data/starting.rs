//! Starting state factory
//!
//! Standard opening positions plus a custom-configuration path used for
//! scenario setups and tests.

use std::collections::BTreeMap;

use crate::models::cost::CostRates;
use crate::models::department::{Capacity, DepartmentId, DepartmentState, StaffState};
use crate::models::state::GameState;

/// Per-department overrides for a custom game.
#[derive(Debug, Clone)]
pub struct DepartmentConfig {
    pub core_staff: u32,
    pub busy_staff: u32,
    pub patients_in_beds: u32,
    pub bed_capacity: Capacity,
}

/// Overrides for a custom game. Departments not named keep their
/// standard opening position.
#[derive(Debug, Clone, Default)]
pub struct CustomGameConfig {
    pub departments: BTreeMap<DepartmentId, DepartmentConfig>,
    pub cost_rates: Option<CostRates>,
}

fn standard_department(id: DepartmentId) -> DepartmentState {
    match id {
        DepartmentId::Er => {
            DepartmentState::new(id, StaffState::new(18, 16), 16, Capacity::Fixed(25))
        }
        DepartmentId::Surgery => {
            DepartmentState::new(id, StaffState::new(6, 4), 4, Capacity::Fixed(9))
        }
        DepartmentId::CriticalCare => {
            DepartmentState::new(id, StaffState::new(13, 12), 12, Capacity::Fixed(18))
        }
        DepartmentId::StepDown => {
            DepartmentState::new(id, StaffState::new(24, 20), 20, Capacity::Fixed(30))
        }
    }
}

/// Fresh game at round 1, EVENT phase, standard opening positions.
pub fn create_starting_state(cost_rates: CostRates) -> GameState {
    let departments = DepartmentId::ALL
        .into_iter()
        .map(|id| (id, standard_department(id)))
        .collect();
    GameState::new(departments, cost_rates)
}

/// Fresh game with per-department and cost-rate overrides.
pub fn create_custom_state(config: &CustomGameConfig) -> GameState {
    let departments = DepartmentId::ALL
        .into_iter()
        .map(|id| {
            let dept = match config.departments.get(&id) {
                Some(cfg) => DepartmentState::new(
                    id,
                    StaffState::new(cfg.core_staff, cfg.busy_staff),
                    cfg.patients_in_beds,
                    cfg.bed_capacity,
                ),
                None => standard_department(id),
            };
            (id, dept)
        })
        .collect();
    GameState::new(departments, config.cost_rates.clone().unwrap_or_default())
}
