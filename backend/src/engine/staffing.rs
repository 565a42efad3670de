//! STAFFING phase mutator
//!
//! Called extra staff arrive at the next PAPERWORK; returns and
//! transfers are immediate. Core staff transferred to another
//! department join its extra pool there, keeping each department's core
//! headcount fixed for the whole game.

use crate::models::action::StaffingAction;
use crate::models::state::GameState;

/// Apply staffing decisions. Input must already be validated.
pub fn apply_staffing_action(state: &mut GameState, action: &StaffingAction) {
    for (&dept_id, &count) in &action.extra_staff {
        if count > 0 {
            state.department_mut(dept_id).staff.extra_incoming += count;
        }
    }

    for (&dept_id, &count) in &action.return_extra {
        if count > 0 {
            let staff = &mut state.department_mut(dept_id).staff;
            staff.extra_total -= count.min(staff.extra_idle());
        }
    }

    for transfer in &action.transfers {
        let mut remaining = transfer.count;

        let (extra_moved, core_moved) = {
            let from = &mut state.department_mut(transfer.from_dept).staff;
            let extra = remaining.min(from.extra_idle());
            from.extra_total -= extra;
            remaining -= extra;
            let core = remaining.min(from.core_idle());
            from.core_total -= core;
            (extra, core)
        };

        let moved = extra_moved + core_moved;
        if moved > 0 {
            state.department_mut(transfer.to_dept).staff.extra_total += moved;
        }
    }
}
