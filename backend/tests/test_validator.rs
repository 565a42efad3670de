//! Validator Tests - Rejected Decisions Never Mutate State
//!
//! Every rule violation must surface as a typed error with the state
//! left byte-for-byte untouched, and phase mismatches must be refused
//! before validation even runs.

use std::collections::BTreeMap;

use hospital_simulator_core_rs::data::starting::create_starting_state;
use hospital_simulator_core_rs::engine::round::{
    process_arrivals_phase, process_event_phase, process_exits_phase, process_staffing_phase,
};
use hospital_simulator_core_rs::models::action::{
    AcceptTransferDecision, AdmitDecision, ExitRouting, StaffTransfer,
};
use hospital_simulator_core_rs::{
    ArrivalsAction, CostRates, DepartmentId, ExitsAction, GameError, Phase, StaffingAction,
    ValidationError,
};

fn admit(department: DepartmentId, admit_count: u32) -> ArrivalsAction {
    ArrivalsAction {
        admissions: vec![AdmitDecision {
            department,
            admit_count,
        }],
        transfer_accepts: vec![],
    }
}

#[test]
fn test_wrong_phase_reported_with_both_phases() {
    let mut state = create_starting_state(CostRates::default());

    let err = process_exits_phase(&mut state, &ExitsAction::default()).unwrap_err();
    assert_eq!(
        err,
        GameError::WrongPhase {
            expected: Phase::Exits,
            actual: Phase::Event,
        }
    );
}

#[test]
fn test_over_admission_rejected_without_mutation() {
    let mut state = create_starting_state(CostRates::default());
    process_event_phase(&mut state, Some(1)).unwrap();
    let before = state.clone();

    let err = process_arrivals_phase(&mut state, &admit(DepartmentId::Er, 50)).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::AdmitExceedsWaiting { .. })
    ));
    assert_eq!(state, before);
    assert_eq!(state.phase, Phase::Arrivals);
}

#[test]
fn test_admission_beyond_idle_staff_rejected() {
    let mut state = create_starting_state(CostRates::default());
    process_event_phase(&mut state, Some(1)).unwrap();
    // surgery: 3 waiting but only 2 idle staff
    let err = process_arrivals_phase(&mut state, &admit(DepartmentId::Surgery, 3)).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::AdmitExceedsIdleStaff { idle: 2, .. })
    ));
}

#[test]
fn test_admission_beyond_hard_cap_rejected() {
    let mut state = create_starting_state(CostRates::default());
    {
        let surgery = state.departments.get_mut(&DepartmentId::Surgery).unwrap();
        surgery.patients_in_beds = 9;
        surgery.arrivals_waiting = 2;
        surgery.staff.core_busy = 2; // plenty idle
    }
    state.phase = Phase::Arrivals;
    let before = state.clone();

    let err = process_arrivals_phase(&mut state, &admit(DepartmentId::Surgery, 1)).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::AdmitExceedsBeds { available: 0, .. })
    ));
    assert_eq!(state, before);
}

#[test]
fn test_combined_action_cannot_overspend_shared_staff() {
    let mut state = create_starting_state(CostRates::default());
    {
        let surgery = state.departments.get_mut(&DepartmentId::Surgery).unwrap();
        surgery.arrivals_waiting = 2;
        surgery.requests_waiting.insert(DepartmentId::Er, 2);
    }
    state.phase = Phase::Arrivals;
    let before = state.clone();

    // each half fits Surgery's 2 idle staff; together they do not
    let action = ArrivalsAction {
        admissions: vec![AdmitDecision {
            department: DepartmentId::Surgery,
            admit_count: 2,
        }],
        transfer_accepts: vec![AcceptTransferDecision {
            department: DepartmentId::Surgery,
            from_dept: DepartmentId::Er,
            accept_count: 2,
        }],
    };
    let err = process_arrivals_phase(&mut state, &action).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::AcceptExceedsIdleStaff { .. })
    ));
    assert_eq!(state, before);

    let staff = &state.department(DepartmentId::Surgery).staff;
    assert!(staff.extra_busy <= staff.extra_total);
    assert!(staff.core_busy <= staff.core_total);
}

#[test]
fn test_duplicate_admissions_for_one_department_rejected() {
    let mut state = create_starting_state(CostRates::default());
    state.departments.get_mut(&DepartmentId::Er).unwrap().arrivals_waiting = 2;
    state.phase = Phase::Arrivals;
    let before = state.clone();

    // two entries naming the ER that jointly exceed its waiting queue
    let action = ArrivalsAction {
        admissions: vec![
            AdmitDecision {
                department: DepartmentId::Er,
                admit_count: 2,
            },
            AdmitDecision {
                department: DepartmentId::Er,
                admit_count: 2,
            },
        ],
        transfer_accepts: vec![],
    };
    let err = process_arrivals_phase(&mut state, &action).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::AdmitExceedsWaiting {
            requested: 2,
            waiting: 0,
            ..
        })
    ));
    assert_eq!(state, before);
}

#[test]
fn test_exit_routing_to_forbidden_destination_rejected() {
    let mut state = create_starting_state(CostRates::default());
    state.phase = Phase::Exits;

    // nothing may transfer into the ER
    let mut transfers = BTreeMap::new();
    transfers.insert(DepartmentId::Er, 1);
    let action = ExitsAction {
        routings: vec![ExitRouting {
            from_dept: DepartmentId::CriticalCare,
            walkout_count: 0,
            transfers,
        }],
    };
    let err = process_exits_phase(&mut state, &action).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::RouteNotAllowed { .. })
    ));
}

#[test]
fn test_exits_beyond_allowance_rejected() {
    let mut state = create_starting_state(CostRates::default());
    state.phase = Phase::Exits;

    // ER's round-1 allowance is 5
    let action = ExitsAction {
        routings: vec![ExitRouting {
            from_dept: DepartmentId::Er,
            walkout_count: 6,
            transfers: BTreeMap::new(),
        }],
    };
    let err = process_exits_phase(&mut state, &action).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::ExitsExceedAvailable {
            requested: 6,
            available: 5,
            ..
        })
    ));
}

#[test]
fn test_returning_more_extra_staff_than_idle_rejected() {
    let mut state = create_starting_state(CostRates::default());
    state.phase = Phase::Staffing;
    state
        .departments
        .get_mut(&DepartmentId::Er)
        .unwrap()
        .staff
        .extra_total = 1;

    let mut return_extra = BTreeMap::new();
    return_extra.insert(DepartmentId::Er, 2);
    let action = StaffingAction {
        extra_staff: BTreeMap::new(),
        return_extra,
        transfers: vec![],
    };
    let err = process_staffing_phase(&mut state, &action).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::ReturnExceedsIdleExtra { idle: 1, .. })
    ));
}

#[test]
fn test_staff_transfer_beyond_idle_rejected() {
    let mut state = create_starting_state(CostRates::default());
    state.phase = Phase::Staffing;

    // ER has only 2 idle staff
    let action = StaffingAction {
        extra_staff: BTreeMap::new(),
        return_extra: BTreeMap::new(),
        transfers: vec![StaffTransfer {
            from_dept: DepartmentId::Er,
            to_dept: DepartmentId::Surgery,
            count: 5,
        }],
    };
    let err = process_staffing_phase(&mut state, &action).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::TransferExceedsIdleStaff { idle: 2, .. })
    ));
}
