//! Greedy default decisions
//!
//! Used by the default-play round driver and as the forecasting
//! baseline: admit everyone resources allow, accept matured requests,
//! discharge every available exit, leave flags and staffing alone.

use crate::engine::exits::available_exits;
use crate::models::action::{
    AcceptTransferDecision, AdmitDecision, ArrivalsAction, ExitRouting, ExitsAction,
};
use crate::models::state::GameState;
use std::collections::BTreeMap;

/// Admit and accept as many patients as waiting, idle staff, and (for
/// hard-cap departments) free beds allow. Admissions are filled before
/// accepts, so both draw from one shared idle-staff and bed budget.
pub fn default_arrivals_action(state: &GameState) -> ArrivalsAction {
    let mut action = ArrivalsAction::default();

    for dept in state.departments.values() {
        let mut idle = dept.staff.total_idle();
        let mut beds = if dept.has_hallway() {
            None
        } else {
            dept.beds_available()
        };

        let budget = |want: u32, idle: &mut u32, beds: &mut Option<u32>| -> u32 {
            let mut take = want.min(*idle);
            if let Some(b) = beds {
                take = take.min(*b);
                *b -= take;
            }
            *idle -= take;
            take
        };

        let admit = budget(dept.arrivals_waiting, &mut idle, &mut beds);
        if admit > 0 {
            action.admissions.push(AdmitDecision {
                department: dept.id,
                admit_count: admit,
            });
        }

        for (&from_dept, &waiting) in &dept.requests_waiting {
            let accept = budget(waiting, &mut idle, &mut beds);
            if accept > 0 {
                action.transfer_accepts.push(AcceptTransferDecision {
                    department: dept.id,
                    from_dept,
                    accept_count: accept,
                });
            }
        }
    }

    action
}

/// Walk out every available exit, capped by the department census.
pub fn default_exits_action(state: &GameState) -> ExitsAction {
    let available = available_exits(state);
    let mut action = ExitsAction::default();

    for (&dept_id, &allowance) in &available {
        let dept = state.department(dept_id);
        let walkouts = allowance.min(dept.total_patients());
        if walkouts > 0 {
            action.routings.push(ExitRouting {
                from_dept: dept_id,
                walkout_count: walkouts,
                transfers: BTreeMap::new(),
            });
        }
    }

    action
}
