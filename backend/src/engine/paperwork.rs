//! PAPERWORK phase: the bookkeeping tail of every round
//!
//! Records the round's costs, expires events, activates incoming extra
//! staff, rolls the diversion flag forward, and advances the round
//! counter. After round 24 the game is finished; the state stays parked
//! at round 24, PAPERWORK.

use crate::engine::cost::calculate_round_costs;
use crate::engine::events::tick_events;
use crate::models::department::DepartmentId;
use crate::models::phase::Phase;
use crate::models::state::{GameState, TOTAL_ROUNDS};

pub fn process_paperwork(state: &mut GameState) {
    let entry = calculate_round_costs(state);
    tracing::debug!(
        round = entry.round_number,
        financial = entry.financial,
        quality = entry.quality,
        "round costs recorded"
    );
    state.total_financial_cost += entry.financial;
    state.total_quality_cost += entry.quality;
    state.round_costs.push(entry);

    tick_events(state);

    for dept in state.departments.values_mut() {
        if dept.staff.extra_incoming > 0 {
            dept.staff.extra_total += dept.staff.extra_incoming;
            dept.staff.extra_incoming = 0;
        }
    }

    // diversion must be re-chosen every round
    state.er_diverted_last_round = state.department(DepartmentId::Er).is_diverting;
    state.department_mut(DepartmentId::Er).is_diverting = false;

    state.round_number += 1;
    if state.round_number > TOTAL_ROUNDS {
        state.is_finished = true;
        state.round_number = TOTAL_ROUNDS;
    } else {
        state.phase = Phase::Event;
    }
}
