//! Rule enforcement for all phase decisions
//!
//! Stateless and side-effect-free: every function takes the state and a
//! decision, returns `Ok(())` or the first violated rule, and never
//! mutates anything. The engine only applies a decision after the
//! validator has passed it, so a rejected decision leaves the state
//! byte-for-byte untouched.
//!
//! Counts are unsigned throughout, so non-negativity holds by
//! construction; only capacity, staffing, and routing rules are checked
//! here. Hard bed-cap checks apply only to departments without hallway
//! overflow.

use thiserror::Error;

use crate::data::flow::can_transfer;
use crate::models::action::{ArrivalsAction, ClosedAction, ExitsAction, StaffingAction};
use crate::models::department::DepartmentId;
use crate::models::state::GameState;

/// A decision violated a game rule. Carries the requested quantity and
/// the limit that rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{department}: cannot admit {requested}, only {waiting} waiting")]
    AdmitExceedsWaiting {
        department: DepartmentId,
        requested: u32,
        waiting: u32,
    },
    #[error("{department}: cannot admit {requested}, only {idle} idle staff")]
    AdmitExceedsIdleStaff {
        department: DepartmentId,
        requested: u32,
        idle: u32,
    },
    #[error("{department}: cannot admit {requested}, only {available} beds free (hard cap)")]
    AdmitExceedsBeds {
        department: DepartmentId,
        requested: u32,
        available: u32,
    },
    #[error("{department}: cannot accept {requested} from {from_dept}, only {waiting} requested")]
    AcceptExceedsWaiting {
        department: DepartmentId,
        from_dept: DepartmentId,
        requested: u32,
        waiting: u32,
    },
    #[error("{department}: cannot accept {requested}, only {idle} idle staff")]
    AcceptExceedsIdleStaff {
        department: DepartmentId,
        requested: u32,
        idle: u32,
    },
    #[error("{department}: cannot accept {requested}, only {available} beds free (hard cap)")]
    AcceptExceedsBeds {
        department: DepartmentId,
        requested: u32,
        available: u32,
    },
    #[error("{department}: {requested} exits routed, only {available} available this round")]
    ExitsExceedAvailable {
        department: DepartmentId,
        requested: u32,
        available: u32,
    },
    #[error("{department}: {requested} exits routed, only {patients} patients present")]
    ExitsExceedPatients {
        department: DepartmentId,
        requested: u32,
        patients: u32,
    },
    #[error("transfer route {from_dept} -> {to_dept} not allowed")]
    RouteNotAllowed {
        from_dept: DepartmentId,
        to_dept: DepartmentId,
    },
    #[error("{department}: cannot return {requested} extra staff, only {idle} idle")]
    ReturnExceedsIdleExtra {
        department: DepartmentId,
        requested: u32,
        idle: u32,
    },
    #[error("{department}: cannot transfer {requested} staff, only {idle} idle")]
    TransferExceedsIdleStaff {
        department: DepartmentId,
        requested: u32,
        idle: u32,
    },
}

/// Validate ARRIVALS decisions: admissions and transfer accepts.
///
/// All entries draw from one running per-department budget of waiting
/// patients, idle staff, and free beds, so a combined action can never
/// jointly overspend a resource that each entry alone would fit into.
/// Errors report the remaining budget at the point of rejection.
pub fn validate_arrivals(state: &GameState, action: &ArrivalsAction) -> Result<(), ValidationError> {
    use std::collections::BTreeMap;

    let mut idle: BTreeMap<DepartmentId, u32> = BTreeMap::new();
    // `None` = no hard cap (hallway overflow or unlimited beds)
    let mut beds: BTreeMap<DepartmentId, Option<u32>> = BTreeMap::new();
    let mut waiting: BTreeMap<DepartmentId, u32> = BTreeMap::new();
    let mut requests: BTreeMap<(DepartmentId, DepartmentId), u32> = BTreeMap::new();

    for (&id, dept) in &state.departments {
        idle.insert(id, dept.staff.total_idle());
        beds.insert(
            id,
            if dept.has_hallway() {
                None
            } else {
                dept.beds_available()
            },
        );
        waiting.insert(id, dept.arrivals_waiting);
        for (&from_dept, &count) in &dept.requests_waiting {
            requests.insert((id, from_dept), count);
        }
    }

    for admission in &action.admissions {
        let id = admission.department;
        let count = admission.admit_count;

        let w = waiting.get(&id).copied().unwrap_or(0);
        if count > w {
            return Err(ValidationError::AdmitExceedsWaiting {
                department: id,
                requested: count,
                waiting: w,
            });
        }
        let i = idle.get(&id).copied().unwrap_or(0);
        if count > i {
            return Err(ValidationError::AdmitExceedsIdleStaff {
                department: id,
                requested: count,
                idle: i,
            });
        }
        if let Some(Some(available)) = beds.get(&id).copied() {
            if count > available {
                return Err(ValidationError::AdmitExceedsBeds {
                    department: id,
                    requested: count,
                    available,
                });
            }
            beds.insert(id, Some(available - count));
        }
        waiting.insert(id, w - count);
        idle.insert(id, i - count);
    }

    for accept in &action.transfer_accepts {
        let id = accept.department;
        let count = accept.accept_count;

        let key = (id, accept.from_dept);
        let requested_waiting = requests.get(&key).copied().unwrap_or(0);
        if count > requested_waiting {
            return Err(ValidationError::AcceptExceedsWaiting {
                department: id,
                from_dept: accept.from_dept,
                requested: count,
                waiting: requested_waiting,
            });
        }
        let i = idle.get(&id).copied().unwrap_or(0);
        if count > i {
            return Err(ValidationError::AcceptExceedsIdleStaff {
                department: id,
                requested: count,
                idle: i,
            });
        }
        if let Some(Some(available)) = beds.get(&id).copied() {
            if count > available {
                return Err(ValidationError::AcceptExceedsBeds {
                    department: id,
                    requested: count,
                    available,
                });
            }
            beds.insert(id, Some(available - count));
        }
        requests.insert(key, requested_waiting - count);
        idle.insert(id, i - count);
    }

    Ok(())
}

/// Validate EXITS decisions: routed totals against this round's exit
/// allowance and the department census, and every route against the
/// flow graph.
pub fn validate_exits(state: &GameState, action: &ExitsAction) -> Result<(), ValidationError> {
    let available = crate::engine::exits::available_exits(state);

    for routing in &action.routings {
        let dept = state.department(routing.from_dept);

        for (&dest, _) in &routing.transfers {
            if !can_transfer(routing.from_dept, dest) {
                return Err(ValidationError::RouteNotAllowed {
                    from_dept: routing.from_dept,
                    to_dept: dest,
                });
            }
        }

        let total = routing.total_routed();
        let allowance = available.get(&routing.from_dept).copied().unwrap_or(0);
        if total > allowance {
            return Err(ValidationError::ExitsExceedAvailable {
                department: routing.from_dept,
                requested: total,
                available: allowance,
            });
        }
        let patients = dept.total_patients();
        if total > patients {
            return Err(ValidationError::ExitsExceedPatients {
                department: routing.from_dept,
                requested: total,
                patients,
            });
        }
    }

    Ok(())
}

/// Validate CLOSED decisions. Flags are always legal to set; nothing to
/// reject with unsigned inputs and a fixed department set.
pub fn validate_closed(_state: &GameState, _action: &ClosedAction) -> Result<(), ValidationError> {
    Ok(())
}

/// Validate STAFFING decisions: returns against idle extra staff and
/// transfers against idle staff of either kind.
pub fn validate_staffing(state: &GameState, action: &StaffingAction) -> Result<(), ValidationError> {
    for (&dept_id, &count) in &action.return_extra {
        let dept = state.department(dept_id);
        let idle = dept.staff.extra_idle();
        if count > idle {
            return Err(ValidationError::ReturnExceedsIdleExtra {
                department: dept_id,
                requested: count,
                idle,
            });
        }
    }

    for transfer in &action.transfers {
        let from = state.department(transfer.from_dept);
        let idle = from.staff.total_idle();
        if transfer.count > idle {
            return Err(ValidationError::TransferExceedsIdleStaff {
                department: transfer.from_dept,
                requested: transfer.count,
                idle,
            });
        }
    }

    Ok(())
}
