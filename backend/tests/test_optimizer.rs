//! Optimizer Tests - Candidate Ranking
//!
//! optimize_phase generates phase-specific candidates, prunes them with
//! the deterministic lookahead, re-scores survivors with Monte Carlo,
//! and returns them cheapest expected total first.

use hospital_simulator_core_rs::data::starting::create_starting_state;
use hospital_simulator_core_rs::engine::round::process_event_phase;
use hospital_simulator_core_rs::{
    optimize_phase, run_lookahead, Action, CostRates, ForecastError, GameState, GreedyPolicy,
    Phase,
};

fn state_at_arrivals() -> GameState {
    let mut state = create_starting_state(CostRates::default());
    process_event_phase(&mut state, Some(5)).unwrap();
    state
}

#[test]
fn test_arrivals_candidates_ranked_ascending() {
    let state = state_at_arrivals();
    let result = optimize_phase(&state, 6, 10, Some(42)).unwrap();

    assert_eq!(result.phase, Phase::Arrivals);
    assert_eq!(result.round_number, 1);
    assert_eq!(result.horizon_used, 6);
    assert!(!result.candidates.is_empty());
    assert!(result.candidates.len() <= 4);
    for pair in result.candidates.windows(2) {
        assert!(pair[0].expected_total <= pair[1].expected_total);
    }
    for candidate in &result.candidates {
        assert!(matches!(candidate.action, Action::Arrivals(_)));
        assert!((candidate.delta_vs_baseline
            - (candidate.expected_total - result.baseline_cost))
            .abs()
            < 1e-9);
        assert!(!candidate.reasoning.is_empty());
    }
}

#[test]
fn test_baseline_is_greedy_deterministic_lookahead() {
    let state = state_at_arrivals();
    let result = optimize_phase(&state, 6, 10, Some(42)).unwrap();

    let mut policy = GreedyPolicy;
    let greedy = run_lookahead(&state, 6, &mut policy, Some(42)).unwrap();
    let expected = (greedy.total_financial + greedy.total_quality) as f64;
    assert_eq!(result.baseline_cost, expected);
}

#[test]
fn test_decisionless_phase_yields_empty_result() {
    // EVENT carries no decision to optimize
    let state = create_starting_state(CostRates::default());
    let result = optimize_phase(&state, 6, 10, Some(42)).unwrap();

    assert_eq!(result.phase, Phase::Event);
    assert!(result.candidates.is_empty());
    assert_eq!(result.baseline_cost, 0.0);
    assert_eq!(result.horizon_used, 0);
}

#[test]
fn test_degenerate_inputs_are_errors() {
    let state = state_at_arrivals();
    assert!(matches!(
        optimize_phase(&state, 0, 10, Some(1)),
        Err(ForecastError::InvalidHorizon)
    ));
    assert!(matches!(
        optimize_phase(&state, 6, 0, Some(1)),
        Err(ForecastError::NoSimulations)
    ));
}

#[test]
fn test_seeded_optimization_reproduces() {
    let state = state_at_arrivals();
    let a = optimize_phase(&state, 6, 10, Some(7)).unwrap();
    let b = optimize_phase(&state, 6, 10, Some(7)).unwrap();

    assert_eq!(a.baseline_cost, b.baseline_cost);
    assert_eq!(a.candidates.len(), b.candidates.len());
    for (ca, cb) in a.candidates.iter().zip(&b.candidates) {
        assert_eq!(ca.description, cb.description);
        assert_eq!(ca.expected_total, cb.expected_total);
        assert_eq!(ca.p10_total, cb.p10_total);
        assert_eq!(ca.p90_total, cb.p90_total);
    }
}

#[test]
fn test_staffing_phase_offers_staffing_actions() {
    let mut state = create_starting_state(CostRates::default());
    state.phase = Phase::Staffing;
    // leave some demand so calling staff is on the table
    state.department_mut(hospital_simulator_core_rs::DepartmentId::Er).arrivals_waiting = 5;

    let result = optimize_phase(&state, 4, 10, Some(42)).unwrap();
    assert!(!result.candidates.is_empty());
    for candidate in &result.candidates {
        assert!(matches!(candidate.action, Action::Staffing(_)));
    }
}
