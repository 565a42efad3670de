//! Round cost calculation
//!
//! Runs at PAPERWORK against the state as it stands after all decisions.
//! ER waiting patients are charged at the ER rate; the other three
//! departments are charged at the (much steeper) ward waiting rate plus
//! a per-request penalty for pending transfers. Extra staff on duty cost
//! their per-round rate everywhere; staff still in transit
//! (`extra_incoming`) are free until they arrive.

use std::collections::BTreeMap;

use crate::models::cost::CostRates;
use crate::models::department::{DepartmentId, DepartmentState};
use crate::models::state::{GameState, RoundCostEntry};

/// Cost for one department this round: `(financial, quality, details)`.
pub fn calculate_department_cost(
    dept: &DepartmentState,
    rates: &CostRates,
) -> (i64, i64, BTreeMap<String, i64>) {
    let mut financial = 0i64;
    let mut quality = 0i64;
    let mut details = BTreeMap::new();

    if dept.id == DepartmentId::Er {
        if dept.arrivals_waiting > 0 {
            let n = dept.arrivals_waiting as i64;
            let f = n * rates.er_waiting_financial;
            let q = n * rates.er_waiting_quality;
            financial += f;
            quality += q;
            details.insert("er_patients_waiting_fin".to_string(), f);
            details.insert("er_patients_waiting_qual".to_string(), q);
        }
    } else {
        if dept.arrivals_waiting > 0 {
            let n = dept.arrivals_waiting as i64;
            let f = n * rates.arrivals_waiting_financial;
            let q = n * rates.arrivals_waiting_quality;
            financial += f;
            quality += q;
            details.insert(format!("{}_arrivals_waiting_fin", dept.id), f);
            details.insert(format!("{}_arrivals_waiting_qual", dept.id), q);
        }

        let requests = dept.total_requests_waiting();
        if requests > 0 {
            let n = requests as i64;
            let f = n * rates.requests_waiting_financial;
            let q = n * rates.requests_waiting_quality;
            financial += f;
            quality += q;
            details.insert(format!("{}_requests_waiting_fin", dept.id), f);
            details.insert(format!("{}_requests_waiting_qual", dept.id), q);
        }
    }

    if dept.staff.extra_total > 0 {
        let n = dept.staff.extra_total as i64;
        let f = n * rates.extra_staff_financial;
        let q = n * rates.extra_staff_quality;
        financial += f;
        quality += q;
        details.insert(format!("{}_extra_staff_fin", dept.id), f);
        details.insert(format!("{}_extra_staff_qual", dept.id), q);
    }

    (financial, quality, details)
}

/// Total costs for the current round across all departments, including
/// the per-ambulance diversion penalty.
pub fn calculate_round_costs(state: &GameState) -> RoundCostEntry {
    let mut total_financial = 0i64;
    let mut total_quality = 0i64;
    let mut all_details = BTreeMap::new();

    for dept in state.departments.values() {
        let (f, q, details) = calculate_department_cost(dept, &state.cost_rates);
        total_financial += f;
        total_quality += q;
        all_details.extend(details);
    }

    if state.ambulances_diverted_this_round > 0 {
        let n = state.ambulances_diverted_this_round as i64;
        let f = n * state.cost_rates.er_diversion_financial;
        let q = n * state.cost_rates.er_diversion_quality;
        total_financial += f;
        total_quality += q;
        all_details.insert("er_diversion_fin".to_string(), f);
        all_details.insert("er_diversion_qual".to_string(), q);
    }

    RoundCostEntry {
        round_number: state.round_number,
        financial: total_financial,
        quality: total_quality,
        details: all_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::starting::create_starting_state;

    #[test]
    fn test_er_waiting_uses_er_rate() {
        let mut state = create_starting_state(CostRates::default());
        state.department_mut(DepartmentId::Er).arrivals_waiting = 4;

        let er = state.department(DepartmentId::Er);
        let (f, q, details) = calculate_department_cost(er, &state.cost_rates);
        assert_eq!(f, 4 * 150);
        assert_eq!(q, 4 * 20);
        assert_eq!(details["er_patients_waiting_fin"], 600);
    }

    #[test]
    fn test_ward_waiting_uses_steep_rate() {
        let mut state = create_starting_state(CostRates::default());
        state.department_mut(DepartmentId::Surgery).arrivals_waiting = 2;

        let surgery = state.department(DepartmentId::Surgery);
        let (f, _, details) = calculate_department_cost(surgery, &state.cost_rates);
        assert_eq!(f, 2 * 3_750);
        assert_eq!(details["surgery_arrivals_waiting_fin"], 7_500);
    }

    #[test]
    fn test_requests_waiting_quality_only_by_default() {
        let mut state = create_starting_state(CostRates::default());
        state
            .department_mut(DepartmentId::CriticalCare)
            .requests_waiting
            .insert(DepartmentId::Er, 3);

        let cc = state.department(DepartmentId::CriticalCare);
        let (f, q, details) = calculate_department_cost(cc, &state.cost_rates);
        assert_eq!(f, 0);
        assert_eq!(q, 3 * 20);
        assert_eq!(details["cc_requests_waiting_fin"], 0);
        assert_eq!(details["cc_requests_waiting_qual"], 60);
    }

    #[test]
    fn test_incoming_extra_staff_not_charged() {
        let mut state = create_starting_state(CostRates::default());
        {
            let staff = &mut state.department_mut(DepartmentId::StepDown).staff;
            staff.extra_total = 2;
            staff.extra_incoming = 5;
        }

        let sd = state.department(DepartmentId::StepDown);
        let (f, _, _) = calculate_department_cost(sd, &state.cost_rates);
        assert_eq!(f, 2 * 40);
    }

    #[test]
    fn test_diversion_penalty_in_round_entry() {
        let mut state = create_starting_state(CostRates::default());
        state.ambulances_diverted_this_round = 2;

        let entry = calculate_round_costs(&state);
        assert_eq!(entry.details["er_diversion_fin"], 10_000);
        assert_eq!(entry.details["er_diversion_qual"], 400);
        assert_eq!(entry.financial, 10_000);
    }

    #[test]
    fn test_clean_round_costs_nothing() {
        let state = create_starting_state(CostRates::default());
        let entry = calculate_round_costs(&state);
        assert_eq!(entry.financial, 0);
        assert_eq!(entry.quality, 0);
        assert!(entry.details.is_empty());
    }
}
