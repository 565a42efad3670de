//! CLOSED phase mutator
//!
//! Closed flags are communication only and never block arrivals. ER
//! diversion set here takes effect at the NEXT round's arrival
//! injection and resets every PAPERWORK, so it must be re-chosen each
//! round.

use crate::models::action::ClosedAction;
use crate::models::department::DepartmentId;
use crate::models::state::GameState;

pub fn apply_closed_action(state: &mut GameState, action: &ClosedAction) {
    for &dept_id in &action.close_departments {
        state.department_mut(dept_id).is_closed = true;
    }
    for &dept_id in &action.open_departments {
        state.department_mut(dept_id).is_closed = false;
    }
    state.department_mut(DepartmentId::Er).is_diverting = action.divert_er;
}
