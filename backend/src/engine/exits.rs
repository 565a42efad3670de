//! EXITS phase mutators
//!
//! The round schedule grants each department an exit allowance; the
//! player splits it between walkouts (patient leaves the system, staff
//! freed immediately) and transfers (patient and staff stay parked at
//! the sender until the transfer matures one round later).

use std::collections::BTreeMap;

use crate::data::schedule::scheduled_exits;
use crate::engine::arrivals::{free_staff, release_patients};
use crate::models::action::ExitsAction;
use crate::models::department::{DepartmentId, OutgoingTransfer};
use crate::models::state::GameState;

/// Exit allowance per department this round. Zero under a no-exits
/// event.
pub fn available_exits(state: &GameState) -> BTreeMap<DepartmentId, u32> {
    let mut exits = BTreeMap::new();
    for (&dept_id, dept) in &state.departments {
        let count = if dept.has_no_exits() {
            0
        } else {
            scheduled_exits(dept_id, state.round_number)
        };
        exits.insert(dept_id, count);
    }
    exits
}

/// Apply routed exits. Input must already be validated.
pub fn apply_exits_action(state: &mut GameState, action: &ExitsAction) {
    for routing in &action.routings {
        let dept = state.department_mut(routing.from_dept);

        if routing.walkout_count > 0 {
            release_patients(dept, routing.walkout_count);
            free_staff(dept, routing.walkout_count);
        }

        for (&dest, &count) in &routing.transfers {
            if count == 0 {
                continue;
            }
            dept.outgoing_transfers.push(OutgoingTransfer {
                from_dept: routing.from_dept,
                to_dept: dest,
                count,
                rounds_remaining: 1,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::events::event_pool;
    use crate::data::starting::create_starting_state;
    use crate::models::action::ExitRouting;
    use crate::models::cost::CostRates;
    use crate::models::event::ActiveEvent;

    #[test]
    fn test_allowance_follows_schedule() {
        let state = create_starting_state(CostRates::default());
        let exits = available_exits(&state);
        assert_eq!(exits[&DepartmentId::Er], 5);
        assert_eq!(exits[&DepartmentId::Surgery], 0);
        assert_eq!(exits[&DepartmentId::StepDown], 3);
    }

    #[test]
    fn test_no_exits_event_zeroes_allowance() {
        let mut state = create_starting_state(CostRates::default());
        let card = &event_pool(DepartmentId::Er)[2]; // er_3, no exits
        assert!(card.effect.no_exits);
        state
            .department_mut(DepartmentId::Er)
            .active_events
            .push(ActiveEvent::from_card(card));

        let exits = available_exits(&state);
        assert_eq!(exits[&DepartmentId::Er], 0);
    }

    #[test]
    fn test_walkouts_free_patients_and_staff() {
        let mut state = create_starting_state(CostRates::default());
        let action = ExitsAction {
            routings: vec![ExitRouting {
                from_dept: DepartmentId::StepDown,
                walkout_count: 3,
                transfers: BTreeMap::new(),
            }],
        };
        apply_exits_action(&mut state, &action);

        let sd = state.department(DepartmentId::StepDown);
        assert_eq!(sd.patients_in_beds, 17);
        assert_eq!(sd.staff.core_busy, 17);
    }

    #[test]
    fn test_transfers_park_patients_at_sender() {
        let mut state = create_starting_state(CostRates::default());
        let mut transfers = BTreeMap::new();
        transfers.insert(DepartmentId::StepDown, 2);
        let action = ExitsAction {
            routings: vec![ExitRouting {
                from_dept: DepartmentId::Er,
                walkout_count: 0,
                transfers,
            }],
        };
        apply_exits_action(&mut state, &action);

        let er = state.department(DepartmentId::Er);
        // census and staff unchanged until maturation
        assert_eq!(er.patients_in_beds, 16);
        assert_eq!(er.staff.core_busy, 16);
        assert_eq!(er.outgoing_transfers.len(), 1);
        assert_eq!(er.outgoing_transfers[0].rounds_remaining, 1);
    }
}
