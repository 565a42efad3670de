//! ARRIVALS phase mutators
//!
//! Scheduled arrival injection and transfer maturation run at the tail
//! of the EVENT phase so the waiting queues are populated before the
//! player decides. The admission mutators here assume the validator has
//! already passed the decision.

use crate::data::schedule::{er_ambulance, er_walkin, scheduled_arrivals};
use crate::models::action::ArrivalsAction;
use crate::models::department::{Capacity, DepartmentId, DepartmentState};
use crate::models::state::GameState;

/// Add this round's scheduled arrivals to each department's waiting
/// queue. A department under a shift-change event receives nothing this
/// round; ambulances are turned away entirely when ER diverted last
/// round, and the diverted count is recorded for the cost ledger.
pub fn inject_scheduled_arrivals(state: &mut GameState) {
    let round = state.round_number;
    let er_diverted = state.er_diverted_last_round;

    let mut diverted = 0;
    {
        let er = state.department_mut(DepartmentId::Er);
        if !er.has_shift_change() {
            er.arrivals_waiting += er_walkin(round);
            let ambulances = er_ambulance(round);
            if er_diverted {
                diverted = ambulances;
            } else {
                er.arrivals_waiting += ambulances;
            }
        }
    }
    state.ambulances_diverted_this_round = diverted;
    if diverted > 0 {
        tracing::debug!(round, diverted, "ambulances diverted");
    }

    for dept_id in [
        DepartmentId::Surgery,
        DepartmentId::CriticalCare,
        DepartmentId::StepDown,
    ] {
        let dept = state.department_mut(dept_id);
        if !dept.has_shift_change() {
            dept.arrivals_waiting += scheduled_arrivals(dept_id, round);
        }
    }
}

/// Mature in-flight transfers. A matured transfer moves its patients out
/// of the sender (freeing the staff who were holding them) and into the
/// destination's requests-waiting map, where they queue until accepted.
pub fn mature_transfers(state: &mut GameState) {
    let mut matured: Vec<(DepartmentId, DepartmentId, u32)> = Vec::new();

    for dept in state.departments.values_mut() {
        let mut still_in_flight = Vec::with_capacity(dept.outgoing_transfers.len());
        for mut transfer in std::mem::take(&mut dept.outgoing_transfers) {
            if transfer.rounds_remaining <= 1 {
                release_patients(dept, transfer.count);
                free_staff(dept, transfer.count);
                matured.push((transfer.from_dept, transfer.to_dept, transfer.count));
            } else {
                transfer.rounds_remaining -= 1;
                still_in_flight.push(transfer);
            }
        }
        dept.outgoing_transfers = still_in_flight;
    }

    for (from, to, count) in matured {
        let dest = state.department_mut(to);
        *dest.requests_waiting.entry(from).or_insert(0) += count;
    }
}

/// Apply admission and transfer-accept decisions. Input must already be
/// validated.
pub fn apply_arrivals_action(state: &mut GameState, action: &ArrivalsAction) {
    for admission in &action.admissions {
        let dept = state.department_mut(admission.department);
        dept.arrivals_waiting = dept.arrivals_waiting.saturating_sub(admission.admit_count);
        admit_patients(dept, admission.admit_count);
    }

    for accept in &action.transfer_accepts {
        let dept = state.department_mut(accept.department);
        if let Some(waiting) = dept.requests_waiting.get_mut(&accept.from_dept) {
            *waiting = waiting.saturating_sub(accept.accept_count);
            if *waiting == 0 {
                dept.requests_waiting.remove(&accept.from_dept);
            }
        }
        admit_patients(dept, accept.accept_count);
    }
}

/// Place admitted patients and assign staff: core idle first, then
/// extra idle; bed if one is free, else hallway where supported.
fn admit_patients(dept: &mut DepartmentState, count: u32) {
    for _ in 0..count {
        if dept.staff.core_idle() > 0 {
            dept.staff.core_busy += 1;
        } else {
            dept.staff.extra_busy += 1;
        }

        let bed_free = match dept.bed_capacity {
            Capacity::Unlimited => true,
            Capacity::Fixed(cap) => dept.patients_in_beds < cap,
        };
        if bed_free {
            dept.patients_in_beds += 1;
        } else if dept.has_hallway() {
            dept.patients_in_hallway += 1;
        } else {
            // validator guarantees this branch is unreachable for
            // hard-cap departments
            dept.patients_in_beds += 1;
        }
    }
}

/// Remove departing patients, beds first, then hallway.
pub(crate) fn release_patients(dept: &mut DepartmentState, count: u32) {
    let from_beds = count.min(dept.patients_in_beds);
    dept.patients_in_beds -= from_beds;
    let from_hallway = (count - from_beds).min(dept.patients_in_hallway);
    dept.patients_in_hallway -= from_hallway;
}

/// Free staff who were holding patients, extra busy first.
pub(crate) fn free_staff(dept: &mut DepartmentState, count: u32) {
    let extra = count.min(dept.staff.extra_busy);
    dept.staff.extra_busy -= extra;
    let core = (count - extra).min(dept.staff.core_busy);
    dept.staff.core_busy -= core;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::starting::create_starting_state;
    use crate::models::action::AdmitDecision;
    use crate::models::cost::CostRates;
    use crate::models::department::OutgoingTransfer;

    #[test]
    fn test_round_one_injection() {
        let mut state = create_starting_state(CostRates::default());
        inject_scheduled_arrivals(&mut state);
        // round 1: ER 2 walk-ins + 0 ambulances, surgery 3, cc 1, sd 1
        assert_eq!(state.department(DepartmentId::Er).arrivals_waiting, 2);
        assert_eq!(state.department(DepartmentId::Surgery).arrivals_waiting, 3);
        assert_eq!(state.department(DepartmentId::CriticalCare).arrivals_waiting, 1);
        assert_eq!(state.department(DepartmentId::StepDown).arrivals_waiting, 1);
    }

    #[test]
    fn test_diversion_blocks_ambulances_only() {
        let mut state = create_starting_state(CostRates::default());
        state.round_number = 2; // 3 walk-ins, 1 ambulance
        state.er_diverted_last_round = true;
        inject_scheduled_arrivals(&mut state);
        assert_eq!(state.department(DepartmentId::Er).arrivals_waiting, 3);
        assert_eq!(state.ambulances_diverted_this_round, 1);
    }

    #[test]
    fn test_maturation_moves_patients_and_frees_staff() {
        let mut state = create_starting_state(CostRates::default());
        state
            .department_mut(DepartmentId::Er)
            .outgoing_transfers
            .push(OutgoingTransfer {
                from_dept: DepartmentId::Er,
                to_dept: DepartmentId::StepDown,
                count: 2,
                rounds_remaining: 1,
            });
        let er_busy_before = state.department(DepartmentId::Er).staff.total_busy();
        let er_census_before = state.department(DepartmentId::Er).total_patients();

        mature_transfers(&mut state);

        let er = state.department(DepartmentId::Er);
        assert!(er.outgoing_transfers.is_empty());
        assert_eq!(er.total_patients(), er_census_before - 2);
        assert_eq!(er.staff.total_busy(), er_busy_before - 2);
        assert_eq!(
            state.department(DepartmentId::StepDown).requests_waiting[&DepartmentId::Er],
            2
        );
    }

    #[test]
    fn test_mixed_maturities_processed_in_one_pass() {
        let mut state = create_starting_state(CostRates::default());
        {
            let er = state.department_mut(DepartmentId::Er);
            er.outgoing_transfers.push(OutgoingTransfer {
                from_dept: DepartmentId::Er,
                to_dept: DepartmentId::StepDown,
                count: 1,
                rounds_remaining: 1,
            });
            er.outgoing_transfers.push(OutgoingTransfer {
                from_dept: DepartmentId::Er,
                to_dept: DepartmentId::Surgery,
                count: 1,
                rounds_remaining: 3,
            });
        }

        mature_transfers(&mut state);

        let er = state.department(DepartmentId::Er);
        assert_eq!(er.outgoing_transfers.len(), 1);
        assert_eq!(er.outgoing_transfers[0].to_dept, DepartmentId::Surgery);
        assert_eq!(er.outgoing_transfers[0].rounds_remaining, 2);
        assert_eq!(
            state.department(DepartmentId::StepDown).requests_waiting[&DepartmentId::Er],
            1
        );
    }

    #[test]
    fn test_immature_transfers_only_tick_down() {
        let mut state = create_starting_state(CostRates::default());
        state
            .department_mut(DepartmentId::Surgery)
            .outgoing_transfers
            .push(OutgoingTransfer {
                from_dept: DepartmentId::Surgery,
                to_dept: DepartmentId::StepDown,
                count: 1,
                rounds_remaining: 2,
            });

        mature_transfers(&mut state);

        let surgery = state.department(DepartmentId::Surgery);
        assert_eq!(surgery.outgoing_transfers.len(), 1);
        assert_eq!(surgery.outgoing_transfers[0].rounds_remaining, 1);
        assert!(state
            .department(DepartmentId::StepDown)
            .requests_waiting
            .is_empty());
    }

    #[test]
    fn test_admission_consumes_staff_and_beds() {
        let mut state = create_starting_state(CostRates::default());
        state.department_mut(DepartmentId::Er).arrivals_waiting = 2;

        let action = ArrivalsAction {
            admissions: vec![AdmitDecision {
                department: DepartmentId::Er,
                admit_count: 2,
            }],
            transfer_accepts: vec![],
        };
        apply_arrivals_action(&mut state, &action);

        let er = state.department(DepartmentId::Er);
        assert_eq!(er.arrivals_waiting, 0);
        assert_eq!(er.patients_in_beds, 18);
        assert_eq!(er.staff.core_busy, 18);
        assert_eq!(er.staff.core_idle(), 0);
    }

    #[test]
    fn test_overflow_goes_to_hallway() {
        let mut state = create_starting_state(CostRates::default());
        {
            let er = state.department_mut(DepartmentId::Er);
            er.patients_in_beds = 25;
            er.arrivals_waiting = 1;
        }
        let action = ArrivalsAction {
            admissions: vec![AdmitDecision {
                department: DepartmentId::Er,
                admit_count: 1,
            }],
            transfer_accepts: vec![],
        };
        apply_arrivals_action(&mut state, &action);

        let er = state.department(DepartmentId::Er);
        assert_eq!(er.patients_in_beds, 25);
        assert_eq!(er.patients_in_hallway, 1);
    }
}
