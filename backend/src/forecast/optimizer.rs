//! Candidate generation and ranking
//!
//! Two-phase pipeline per decision-bearing phase: generate a handful of
//! structurally different candidate actions, score all of them with the
//! cheap deterministic lookahead, prune to the best few, re-score the
//! survivors with Monte Carlo for confidence intervals, and rank by
//! expected total cost ascending.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::flow::allowed_destinations;
use crate::data::schedule::er_ambulance;
use crate::engine::defaults::default_arrivals_action;
use crate::engine::exits::available_exits;
use crate::forecast::lookahead::run_lookahead;
use crate::forecast::monte_carlo::run_monte_carlo;
use crate::forecast::policy::{DecisionPolicy, GreedyPolicy, OverridePolicy};
use crate::forecast::ForecastError;
use crate::models::action::{
    AcceptTransferDecision, Action, AdmitDecision, ArrivalsAction, ClosedAction, ExitRouting,
    ExitsAction, StaffTransfer, StaffingAction,
};
use crate::models::department::DepartmentId;
use crate::models::phase::Phase;
use crate::models::state::{GameState, TOTAL_ROUNDS};

pub const DEFAULT_HORIZON: u32 = 6;
pub const MC_SIMS_FULL: u32 = 100;
const PRUNE_KEEP: usize = 4;

/// One ranked candidate decision.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub description: String,
    pub action: Action,
    pub expected_financial: f64,
    pub expected_quality: f64,
    pub expected_total: f64,
    pub delta_vs_baseline: f64,
    pub p10_total: f64,
    pub p90_total: f64,
    pub reasoning: String,
}

/// Ranked candidates for the current phase, cheapest expected total
/// first.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub phase: Phase,
    pub round_number: u32,
    pub candidates: Vec<ScoredCandidate>,
    /// Expected total of pure greedy default play
    pub baseline_cost: f64,
    pub horizon_used: u32,
}

/// Generate and rank candidate actions for the phase the state is in.
///
/// EVENT and PAPERWORK carry no decision, so they produce an empty
/// result rather than an error.
pub fn optimize_phase(
    state: &GameState,
    horizon: u32,
    mc_simulations: u32,
    base_seed: Option<u64>,
) -> Result<OptimizationResult, ForecastError> {
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon);
    }
    if mc_simulations == 0 {
        return Err(ForecastError::NoSimulations);
    }

    let phase = state.phase;
    let candidates = match phase {
        Phase::Arrivals => generate_arrivals_candidates(state),
        Phase::Exits => generate_exits_candidates(state),
        Phase::Closed => generate_closed_candidates(state),
        Phase::Staffing => generate_staffing_candidates(state),
        Phase::Event | Phase::Paperwork => Vec::new(),
    };

    if candidates.is_empty() {
        return Ok(OptimizationResult {
            phase,
            round_number: state.round_number,
            candidates: Vec::new(),
            baseline_cost: 0.0,
            horizon_used: 0,
        });
    }

    let mut baseline_policy = GreedyPolicy;
    let baseline = run_lookahead(state, horizon, &mut baseline_policy, base_seed)?;
    let baseline_cost = (baseline.total_financial + baseline.total_quality) as f64;

    // phase 1: cheap deterministic score for every candidate
    let mut scored = Vec::with_capacity(candidates.len());
    for (description, action) in candidates {
        let mut policy = OverridePolicy::new(phase, action.clone());
        let result = run_lookahead(state, horizon, &mut policy, base_seed)?;
        let total = result.total_financial + result.total_quality;
        scored.push((description, action, total));
    }
    scored.sort_by_key(|&(_, _, total)| total);
    scored.truncate(PRUNE_KEEP);

    // phase 2: Monte Carlo re-score for the survivors
    let mut final_candidates = Vec::with_capacity(scored.len());
    for (description, action, _) in scored {
        let phase_for_policy = phase;
        let action_for_policy = action.clone();
        let mc = run_monte_carlo(
            state,
            horizon,
            mc_simulations,
            move || {
                Box::new(OverridePolicy::new(
                    phase_for_policy,
                    action_for_policy.clone(),
                )) as Box<dyn DecisionPolicy>
            },
            base_seed,
        )?;

        let expected_total = mc.expected_financial + mc.expected_quality;
        let delta = expected_total - baseline_cost;
        final_candidates.push(ScoredCandidate {
            reasoning: describe_delta(&description, delta),
            description,
            action,
            expected_financial: mc.expected_financial,
            expected_quality: mc.expected_quality,
            expected_total,
            delta_vs_baseline: delta,
            p10_total: mc.p10_financial + mc.p10_quality,
            p90_total: mc.p90_financial + mc.p90_quality,
        });
    }
    final_candidates.sort_by(|a, b| a.expected_total.total_cmp(&b.expected_total));

    Ok(OptimizationResult {
        phase,
        round_number: state.round_number,
        candidates: final_candidates,
        baseline_cost,
        horizon_used: horizon,
    })
}

fn describe_delta(description: &str, delta: f64) -> String {
    if delta < 0.0 {
        format!(
            "{}: saves ~${:.0} vs baseline over forecast horizon",
            description,
            delta.abs()
        )
    } else if delta == 0.0 {
        format!("{}: same cost as baseline", description)
    } else {
        format!("{}: costs ~${:.0} more than baseline", description, delta)
    }
}

// ============================================================================
// Candidate Generators
// ============================================================================

fn generate_arrivals_candidates(state: &GameState) -> Vec<(String, Action)> {
    let mut candidates = Vec::new();

    candidates.push((
        "Admit maximum patients".to_string(),
        Action::Arrivals(default_arrivals_action(state)),
    ));

    if let Some(action) = arrivals_hold_beds(state) {
        candidates.push(("Hold beds for transfers".to_string(), Action::Arrivals(action)));
    }

    if let Some(action) = arrivals_transfers_first(state) {
        candidates.push((
            "Prioritize transfer accepts".to_string(),
            Action::Arrivals(action),
        ));
    }

    candidates.push((
        "Admit no patients".to_string(),
        Action::Arrivals(ArrivalsAction::default()),
    ));

    candidates
}

/// Hold one bed back in hard-cap departments for expected transfers.
/// Only worth proposing when it actually changes an admission count.
fn arrivals_hold_beds(state: &GameState) -> Option<ArrivalsAction> {
    let mut changed = false;
    let mut action = ArrivalsAction::default();

    for dept in state.departments.values() {
        let idle = dept.staff.total_idle();
        let mut admit = dept.arrivals_waiting.min(idle);

        if !dept.has_hallway() {
            if let Some(beds) = dept.beds_available() {
                let usable = beds.saturating_sub(1);
                let held = admit.min(usable);
                if held < admit && dept.arrivals_waiting > 0 {
                    changed = true;
                }
                admit = held;
            }
        }

        if admit > 0 {
            action.admissions.push(AdmitDecision {
                department: dept.id,
                admit_count: admit,
            });
        }
    }

    changed.then_some(action)
}

/// Accept matured transfer requests before admitting new arrivals.
fn arrivals_transfers_first(state: &GameState) -> Option<ArrivalsAction> {
    if state
        .departments
        .values()
        .all(|d| d.total_requests_waiting() == 0)
    {
        return None;
    }

    let mut action = ArrivalsAction::default();
    for dept in state.departments.values() {
        let mut idle = dept.staff.total_idle();
        let mut beds = if dept.has_hallway() {
            None
        } else {
            dept.beds_available()
        };

        for (&from_dept, &waiting) in &dept.requests_waiting {
            let mut accept = waiting.min(idle);
            if let Some(b) = &mut beds {
                accept = accept.min(*b);
                *b -= accept;
            }
            idle -= accept;
            if accept > 0 {
                action.transfer_accepts.push(AcceptTransferDecision {
                    department: dept.id,
                    from_dept,
                    accept_count: accept,
                });
            }
        }

        let mut admit = dept.arrivals_waiting.min(idle);
        if let Some(b) = &mut beds {
            admit = admit.min(*b);
            *b -= admit;
        }
        if admit > 0 {
            action.admissions.push(AdmitDecision {
                department: dept.id,
                admit_count: admit,
            });
        }
    }

    Some(action)
}

fn generate_exits_candidates(state: &GameState) -> Vec<(String, Action)> {
    let mut candidates = Vec::new();
    let available = available_exits(state);

    let mut walkout_all = ExitsAction::default();
    for (&dept_id, &allowance) in &available {
        let actual = allowance.min(state.department(dept_id).total_patients());
        if actual > 0 {
            walkout_all.routings.push(ExitRouting {
                from_dept: dept_id,
                walkout_count: actual,
                transfers: BTreeMap::new(),
            });
        }
    }
    candidates.push(("Walk out all exits".to_string(), Action::Exits(walkout_all)));

    if let Some(action) = exits_er_half_to_stepdown(state, &available) {
        candidates.push((
            "Transfer some ER exits to Step Down".to_string(),
            Action::Exits(action),
        ));
    }

    if let Some(action) = exits_rebalance(state, &available) {
        candidates.push(("Rebalance via transfers".to_string(), Action::Exits(action)));
    }

    candidates
}

/// Split ER's exits: half transfer to Step Down, the rest walk out.
fn exits_er_half_to_stepdown(
    state: &GameState,
    available: &BTreeMap<DepartmentId, u32>,
) -> Option<ExitsAction> {
    let er = state.department(DepartmentId::Er);
    let er_actual = available
        .get(&DepartmentId::Er)
        .copied()
        .unwrap_or(0)
        .min(er.total_patients());
    if er_actual == 0 {
        return None;
    }
    let to_sd = er_actual / 2;
    if to_sd == 0 {
        return None;
    }

    let mut action = ExitsAction::default();
    for (&dept_id, &allowance) in available {
        let actual = allowance.min(state.department(dept_id).total_patients());
        if actual == 0 {
            continue;
        }
        if dept_id == DepartmentId::Er {
            let mut transfers = BTreeMap::new();
            transfers.insert(DepartmentId::StepDown, to_sd);
            action.routings.push(ExitRouting {
                from_dept: dept_id,
                walkout_count: actual - to_sd,
                transfers,
            });
        } else {
            action.routings.push(ExitRouting {
                from_dept: dept_id,
                walkout_count: actual,
                transfers: BTreeMap::new(),
            });
        }
    }
    Some(action)
}

/// Route one exit per department to the least-loaded allowed
/// destination, walk out the rest.
fn exits_rebalance(
    state: &GameState,
    available: &BTreeMap<DepartmentId, u32>,
) -> Option<ExitsAction> {
    let mut action = ExitsAction::default();
    let mut any_transfer = false;

    for (&dept_id, &allowance) in available {
        let actual = allowance.min(state.department(dept_id).total_patients());
        if actual == 0 {
            continue;
        }

        let best_dest = allowed_destinations(dept_id)
            .iter()
            .filter(|&&dest| {
                let d = state.department(dest);
                d.staff.total_idle() > 0
            })
            .max_by_key(|&&dest| state.department(dest).beds_available().unwrap_or(u32::MAX))
            .copied();

        match best_dest {
            Some(dest) if actual > 1 => {
                let mut transfers = BTreeMap::new();
                transfers.insert(dest, 1);
                action.routings.push(ExitRouting {
                    from_dept: dept_id,
                    walkout_count: actual - 1,
                    transfers,
                });
                any_transfer = true;
            }
            _ => {
                action.routings.push(ExitRouting {
                    from_dept: dept_id,
                    walkout_count: actual,
                    transfers: BTreeMap::new(),
                });
            }
        }
    }

    any_transfer.then_some(action)
}

fn generate_closed_candidates(state: &GameState) -> Vec<(String, Action)> {
    let mut candidates = Vec::new();

    candidates.push((
        "No closures or diversions".to_string(),
        Action::Closed(ClosedAction::default()),
    ));

    let next_round = state.round_number + 1;
    if next_round <= TOTAL_ROUNDS {
        let ambulances_next = er_ambulance(next_round);
        if ambulances_next > 0 {
            candidates.push((
                format!("Divert ER (blocks {ambulances_next} ambulances next round)"),
                Action::Closed(ClosedAction {
                    close_departments: vec![],
                    open_departments: vec![],
                    divert_er: true,
                }),
            ));
        }
    }

    let near_capacity: Vec<DepartmentId> = state
        .departments
        .values()
        .filter(|d| d.id != DepartmentId::Er && !d.has_hallway())
        .filter(|d| matches!(d.beds_available(), Some(b) if b <= 1))
        .map(|d| d.id)
        .collect();
    if !near_capacity.is_empty() {
        let names: Vec<&str> = near_capacity.iter().map(|d| d.as_str()).collect();
        candidates.push((
            format!("Close near-capacity departments: {}", names.join(", ")),
            Action::Closed(ClosedAction {
                close_departments: near_capacity,
                open_departments: vec![],
                divert_er: false,
            }),
        ));
    }

    candidates
}

fn generate_staffing_candidates(state: &GameState) -> Vec<(String, Action)> {
    let mut candidates = Vec::new();

    candidates.push((
        "No staffing changes".to_string(),
        Action::Staffing(StaffingAction::default()),
    ));

    let mut extra_needed = BTreeMap::new();
    for dept in state.departments.values() {
        let demand = dept.arrivals_waiting + dept.total_requests_waiting();
        let deficit = demand.saturating_sub(dept.staff.total_idle());
        if deficit > 0 {
            extra_needed.insert(dept.id, deficit);
        }
    }
    if !extra_needed.is_empty() {
        candidates.push((
            format!("Call extra staff: {}", format_staff_map(&extra_needed)),
            Action::Staffing(StaffingAction {
                extra_staff: extra_needed.clone(),
                return_extra: BTreeMap::new(),
                transfers: vec![],
            }),
        ));
    }

    let transfers = staff_transfers_to_deficits(state);
    if !transfers.is_empty() {
        candidates.push((
            "Transfer idle staff to deficit departments".to_string(),
            Action::Staffing(StaffingAction {
                extra_staff: BTreeMap::new(),
                return_extra: BTreeMap::new(),
                transfers: transfers.clone(),
            }),
        ));
    }

    let mut return_extra = BTreeMap::new();
    for dept in state.departments.values() {
        if dept.staff.extra_idle() > 0
            && dept.arrivals_waiting == 0
            && dept.total_requests_waiting() == 0
        {
            return_extra.insert(dept.id, dept.staff.extra_idle());
        }
    }
    if !return_extra.is_empty() {
        candidates.push((
            format!("Return extra staff: {}", format_staff_map(&return_extra)),
            Action::Staffing(StaffingAction {
                extra_staff: BTreeMap::new(),
                return_extra,
                transfers: vec![],
            }),
        ));
    }

    if !extra_needed.is_empty() && !transfers.is_empty() {
        candidates.push((
            "Call extra staff and transfer idle staff".to_string(),
            Action::Staffing(StaffingAction {
                extra_staff: extra_needed,
                return_extra: BTreeMap::new(),
                transfers,
            }),
        ));
    }

    candidates
}

/// Pair surplus departments (idle beyond demand plus one spare) with
/// deficit ones.
fn staff_transfers_to_deficits(state: &GameState) -> Vec<StaffTransfer> {
    let mut surplus: Vec<(DepartmentId, u32)> = Vec::new();
    let mut deficit: Vec<(DepartmentId, u32)> = Vec::new();

    for dept in state.departments.values() {
        let idle = dept.staff.total_idle();
        let need = dept.arrivals_waiting + dept.total_requests_waiting();
        if idle > need + 1 {
            surplus.push((dept.id, idle - need - 1));
        } else if need > idle {
            deficit.push((dept.id, need - idle));
        }
    }

    let mut transfers = Vec::new();
    for (def_id, mut def_count) in deficit {
        for (sur_id, sur_count) in surplus.iter_mut() {
            if *sur_count == 0 {
                continue;
            }
            let moved = def_count.min(*sur_count);
            if moved > 0 {
                transfers.push(StaffTransfer {
                    from_dept: *sur_id,
                    to_dept: def_id,
                    count: moved,
                });
                *sur_count -= moved;
                def_count -= moved;
            }
            if def_count == 0 {
                break;
            }
        }
    }
    transfers
}

fn format_staff_map(map: &BTreeMap<DepartmentId, u32>) -> String {
    map.iter()
        .filter(|(_, &v)| v > 0)
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
