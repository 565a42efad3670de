//! Deterministic N-round lookahead
//!
//! Deep-copies the state and plays it forward through the real round
//! engine, collecting one snapshot per completed round. No game rule is
//! duplicated here, so lookahead can never drift from live play.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::round::{
    apply_action, process_event_phase, process_paperwork_phase,
};
use crate::forecast::policy::DecisionPolicy;
use crate::forecast::ForecastError;
use crate::models::department::DepartmentId;
use crate::models::phase::{Phase, PHASE_ORDER};
use crate::models::state::{GameState, TOTAL_ROUNDS};

/// One department's condition at the end of a simulated round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSnapshot {
    pub census: u32,
    pub arrivals_waiting: u32,
    pub requests_waiting: u32,
    /// `None` for unlimited-capacity departments
    pub beds_available: Option<u32>,
    pub idle_staff: u32,
    pub extra_staff: u32,
    pub is_closed: bool,
    pub is_diverting: bool,
}

/// Full picture of one simulated round after its PAPERWORK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    pub round_number: u32,
    pub departments: BTreeMap<DepartmentId, DepartmentSnapshot>,
    pub round_financial: i64,
    pub round_quality: i64,
    pub cumulative_financial: i64,
    pub cumulative_quality: i64,
}

/// Result of a deterministic lookahead run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookaheadResult {
    pub start_round: u32,
    /// Rounds actually simulated, after clamping to the end of game
    pub horizon: u32,
    pub snapshots: Vec<RoundSnapshot>,
    /// Cost accrued during the lookahead only
    pub total_financial: i64,
    pub total_quality: i64,
}

/// Capture a round snapshot; call after PAPERWORK so the last ledger
/// entry describes the round just completed.
pub fn extract_snapshot(state: &GameState) -> RoundSnapshot {
    let mut departments = BTreeMap::new();
    for (&dept_id, dept) in &state.departments {
        departments.insert(
            dept_id,
            DepartmentSnapshot {
                census: dept.total_patients(),
                arrivals_waiting: dept.arrivals_waiting,
                requests_waiting: dept.total_requests_waiting(),
                beds_available: dept.beds_available(),
                idle_staff: dept.staff.total_idle(),
                extra_staff: dept.staff.extra_total,
                is_closed: dept.is_closed,
                is_diverting: dept.is_diverting,
            },
        );
    }

    let last = state.round_costs.last();
    RoundSnapshot {
        round_number: last.map_or(state.round_number, |e| e.round_number),
        departments,
        round_financial: last.map_or(0, |e| e.financial),
        round_quality: last.map_or(0, |e| e.quality),
        cumulative_financial: state.total_financial_cost,
        cumulative_quality: state.total_quality_cost,
    }
}

/// Run a deterministic lookahead of up to `horizon` rounds.
///
/// The input state is never mutated. The horizon is silently capped at
/// the rounds remaining to 24; a zero horizon is an input error. When
/// the state sits mid-round, finishing the current round counts as the
/// first simulated round. Each simulated round's event draw uses
/// `event_seed + round_number`, so one base seed pins the whole run.
pub fn run_lookahead(
    state: &GameState,
    horizon: u32,
    policy: &mut dyn DecisionPolicy,
    event_seed: Option<u64>,
) -> Result<LookaheadResult, ForecastError> {
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon);
    }

    let mut sim = state.clone();
    let start_round = sim.round_number;
    let start_financial = sim.total_financial_cost;
    let start_quality = sim.total_quality_cost;

    let max_rounds = TOTAL_ROUNDS - start_round + 1;
    let actual_horizon = horizon.min(max_rounds);

    let mut snapshots = Vec::new();
    if sim.is_finished {
        return Ok(LookaheadResult {
            start_round,
            horizon: 0,
            snapshots,
            total_financial: 0,
            total_quality: 0,
        });
    }

    let mut rounds_played = 0u32;

    // finish the current round first if the state sits mid-round
    if sim.phase != Phase::Event {
        complete_round_from(&mut sim, policy, event_seed)?;
        snapshots.push(extract_snapshot(&sim));
        rounds_played += 1;
    }

    while rounds_played < actual_horizon && !sim.is_finished {
        let round_seed = event_seed.map(|s| s + u64::from(sim.round_number));
        play_full_round(&mut sim, policy, round_seed)?;
        snapshots.push(extract_snapshot(&sim));
        rounds_played += 1;
    }

    Ok(LookaheadResult {
        start_round,
        horizon: rounds_played,
        snapshots,
        total_financial: sim.total_financial_cost - start_financial,
        total_quality: sim.total_quality_cost - start_quality,
    })
}

fn complete_round_from(
    sim: &mut GameState,
    policy: &mut dyn DecisionPolicy,
    event_seed: Option<u64>,
) -> Result<(), ForecastError> {
    let start_idx = sim.phase.index();
    for &phase in &PHASE_ORDER[start_idx..] {
        if sim.is_finished {
            break;
        }
        execute_phase(sim, phase, policy, event_seed)?;
    }
    Ok(())
}

fn play_full_round(
    sim: &mut GameState,
    policy: &mut dyn DecisionPolicy,
    event_seed: Option<u64>,
) -> Result<(), ForecastError> {
    for phase in PHASE_ORDER {
        if sim.is_finished {
            break;
        }
        execute_phase(sim, phase, policy, event_seed)?;
    }
    Ok(())
}

fn execute_phase(
    sim: &mut GameState,
    phase: Phase,
    policy: &mut dyn DecisionPolicy,
    event_seed: Option<u64>,
) -> Result<(), ForecastError> {
    match phase {
        Phase::Event => process_event_phase(sim, event_seed)?,
        Phase::Paperwork => process_paperwork_phase(sim)?,
        _ => {
            let action = policy.decide(sim, phase);
            apply_action(sim, &action, event_seed)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::starting::create_starting_state;
    use crate::forecast::policy::GreedyPolicy;
    use crate::models::cost::CostRates;

    #[test]
    fn test_zero_horizon_is_an_error() {
        let state = create_starting_state(CostRates::default());
        let mut policy = GreedyPolicy;
        assert!(matches!(
            run_lookahead(&state, 0, &mut policy, Some(1)),
            Err(ForecastError::InvalidHorizon)
        ));
    }

    #[test]
    fn test_input_state_never_mutated() {
        let state = create_starting_state(CostRates::default());
        let before = state.clone();
        let mut policy = GreedyPolicy;
        run_lookahead(&state, 6, &mut policy, Some(7)).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_horizon_clamped_to_game_end() {
        let state = create_starting_state(CostRates::default());
        let mut policy = GreedyPolicy;
        let result = run_lookahead(&state, 100, &mut policy, Some(7)).unwrap();
        assert_eq!(result.horizon, 24);
        assert_eq!(result.snapshots.len(), 24);
        assert_eq!(
            result.snapshots.last().unwrap().round_number,
            24
        );
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let state = create_starting_state(CostRates::default());
        let mut p1 = GreedyPolicy;
        let mut p2 = GreedyPolicy;
        let a = run_lookahead(&state, 10, &mut p1, Some(99)).unwrap();
        let b = run_lookahead(&state, 10, &mut p2, Some(99)).unwrap();
        assert_eq!(a, b);
    }
}
