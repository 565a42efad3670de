//! Lookahead Tests - Forecast vs Live Engine
//!
//! The lookahead plays a deep copy through the real round engine, so a
//! seeded greedy forecast must land on exactly the costs a live game
//! with the same decisions and seeds produces.

use hospital_simulator_core_rs::data::starting::create_starting_state;
use hospital_simulator_core_rs::engine::round::{play_round_with_defaults, process_event_phase};
use hospital_simulator_core_rs::{run_lookahead, CostRates, GreedyPolicy, Phase};

const BASE_SEED: u64 = 100;

#[test]
fn test_greedy_lookahead_matches_live_play() {
    let state = create_starting_state(CostRates::default());
    let mut policy = GreedyPolicy;
    // horizon 8 crosses the round-6 event draw, so the seed matters
    let forecast = run_lookahead(&state, 8, &mut policy, Some(BASE_SEED)).unwrap();

    let mut live = state.clone();
    for _ in 0..8 {
        let round_seed = BASE_SEED + u64::from(live.round_number);
        play_round_with_defaults(&mut live, Some(round_seed)).unwrap();
    }

    assert_eq!(forecast.horizon, 8);
    assert_eq!(forecast.total_financial, live.total_financial_cost);
    assert_eq!(forecast.total_quality, live.total_quality_cost);
    for (snapshot, entry) in forecast.snapshots.iter().zip(&live.round_costs) {
        assert_eq!(snapshot.round_number, entry.round_number);
        assert_eq!(snapshot.round_financial, entry.financial);
        assert_eq!(snapshot.round_quality, entry.quality);
    }
}

#[test]
fn test_snapshot_rounds_are_consecutive() {
    let state = create_starting_state(CostRates::default());
    let mut policy = GreedyPolicy;
    let forecast = run_lookahead(&state, 5, &mut policy, Some(BASE_SEED)).unwrap();

    assert_eq!(forecast.start_round, 1);
    let rounds: Vec<u32> = forecast.snapshots.iter().map(|s| s.round_number).collect();
    assert_eq!(rounds, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_mid_round_pickup_counts_current_round() {
    let mut state = create_starting_state(CostRates::default());
    process_event_phase(&mut state, Some(BASE_SEED)).unwrap();
    assert_eq!(state.phase, Phase::Arrivals);

    let mut policy = GreedyPolicy;
    let forecast = run_lookahead(&state, 3, &mut policy, Some(BASE_SEED)).unwrap();

    assert_eq!(forecast.horizon, 3);
    assert_eq!(forecast.snapshots.len(), 3);
    // finishing round 1 is the first simulated round
    assert_eq!(forecast.snapshots[0].round_number, 1);
    assert_eq!(forecast.snapshots[2].round_number, 3);
}

#[test]
fn test_lookahead_near_game_end_clamps() {
    let mut state = create_starting_state(CostRates::default());
    while state.round_number < 22 {
        play_round_with_defaults(&mut state, Some(3)).unwrap();
    }

    let mut policy = GreedyPolicy;
    let forecast = run_lookahead(&state, 10, &mut policy, Some(BASE_SEED)).unwrap();
    assert_eq!(forecast.horizon, 3);
    assert_eq!(forecast.snapshots.last().unwrap().round_number, 24);
}

#[test]
fn test_finished_game_yields_empty_forecast() {
    let mut state = create_starting_state(CostRates::default());
    while !state.is_finished {
        play_round_with_defaults(&mut state, Some(3)).unwrap();
    }

    let mut policy = GreedyPolicy;
    let forecast = run_lookahead(&state, 5, &mut policy, Some(BASE_SEED)).unwrap();
    assert_eq!(forecast.horizon, 0);
    assert!(forecast.snapshots.is_empty());
    assert_eq!(forecast.total_financial, 0);
}

#[test]
fn test_lookahead_costs_exclude_history() {
    let mut state = create_starting_state(CostRates::default());
    for _ in 0..3 {
        play_round_with_defaults(&mut state, Some(3)).unwrap();
    }
    let accrued = state.total_financial_cost;

    let mut policy = GreedyPolicy;
    let forecast = run_lookahead(&state, 4, &mut policy, Some(BASE_SEED)).unwrap();

    // snapshots carry the running grand total, the result only the delta
    assert_eq!(
        forecast.snapshots.last().unwrap().cumulative_financial,
        accrued + forecast.total_financial
    );
}
