//! Monte Carlo event uncertainty quantification
//!
//! Wraps the deterministic lookahead with M independent event seeds and
//! aggregates totals, percentiles, averaged snapshots, and qualitative
//! risk flags. Simulations are independent, so they fan out across a
//! rayon thread pool.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::schedule::is_event_round;
use crate::forecast::lookahead::{
    run_lookahead, DepartmentSnapshot, LookaheadResult, RoundSnapshot,
};
use crate::forecast::policy::DecisionPolicy;
use crate::forecast::ForecastError;
use crate::models::state::{GameState, TOTAL_ROUNDS};
use crate::rng;

/// Aggregated outcome of M Monte Carlo lookahead runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloResult {
    pub num_simulations: u32,
    pub horizon: u32,
    pub expected_financial: f64,
    pub expected_quality: f64,
    pub p10_financial: f64,
    pub p50_financial: f64,
    pub p90_financial: f64,
    pub p10_quality: f64,
    pub p50_quality: f64,
    pub p90_quality: f64,
    /// Per-round snapshots averaged across simulations
    pub expected_snapshots: Vec<RoundSnapshot>,
    pub risk_flags: Vec<String>,
}

/// Run `num_simulations` lookaheads with seeds `base_seed + i`.
///
/// When the horizon contains no event rounds the event engine is a
/// no-op, every run is provably identical, and the engine short-circuits
/// to a single run with zero-width percentiles. That shortcut is a
/// correctness property of the deterministic engine, not just a speed
/// win.
pub fn run_monte_carlo<F>(
    state: &GameState,
    horizon: u32,
    num_simulations: u32,
    make_policy: F,
    base_seed: Option<u64>,
) -> Result<MonteCarloResult, ForecastError>
where
    F: Fn() -> Box<dyn DecisionPolicy> + Sync,
{
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon);
    }
    if num_simulations == 0 {
        return Err(ForecastError::NoSimulations);
    }

    let start = state.round_number;
    let end = (start + horizon).min(TOTAL_ROUNDS + 1);
    let has_events = (start..end).any(is_event_round);

    if !has_events {
        let mut policy = make_policy();
        let result = run_lookahead(state, horizon, policy.as_mut(), base_seed)?;
        let total_f = result.total_financial as f64;
        let total_q = result.total_quality as f64;
        return Ok(MonteCarloResult {
            num_simulations: 1,
            horizon: result.horizon,
            expected_financial: total_f,
            expected_quality: total_q,
            p10_financial: total_f,
            p50_financial: total_f,
            p90_financial: total_f,
            p10_quality: total_q,
            p50_quality: total_q,
            p90_quality: total_q,
            expected_snapshots: result.snapshots,
            risk_flags: Vec::new(),
        });
    }

    let base = base_seed.unwrap_or_else(rng::entropy_seed);
    let results: Result<Vec<LookaheadResult>, ForecastError> = (0..num_simulations)
        .into_par_iter()
        .map(|i| {
            let mut policy = make_policy();
            run_lookahead(state, horizon, policy.as_mut(), Some(base + u64::from(i)))
        })
        .collect();
    let results = results?;

    let mut financial: Vec<f64> = results.iter().map(|r| r.total_financial as f64).collect();
    let mut quality: Vec<f64> = results.iter().map(|r| r.total_quality as f64).collect();
    financial.sort_by(f64::total_cmp);
    quality.sort_by(f64::total_cmp);

    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;

    Ok(MonteCarloResult {
        num_simulations,
        horizon: results[0].horizon,
        expected_financial: mean(&financial),
        expected_quality: mean(&quality),
        p10_financial: percentile(&financial, 10.0),
        p50_financial: percentile(&financial, 50.0),
        p90_financial: percentile(&financial, 90.0),
        p10_quality: percentile(&quality, 10.0),
        p50_quality: percentile(&quality, 50.0),
        p90_quality: percentile(&quality, 90.0),
        expected_snapshots: average_snapshots(&results),
        risk_flags: detect_risk_flags(&results, state),
    })
}

/// Linearly interpolated percentile over an ascending-sorted slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let frac = rank - lower as f64;
            if lower + 1 < n {
                sorted[lower] + frac * (sorted[lower + 1] - sorted[lower])
            } else {
                sorted[n - 1]
            }
        }
    }
}

fn average_snapshots(results: &[LookaheadResult]) -> Vec<RoundSnapshot> {
    let Some(first) = results.first() else {
        return Vec::new();
    };
    let num_rounds = first.snapshots.len();

    let round_u32 = |x: f64| x.round().max(0.0) as u32;
    let round_i64 = |x: f64| x.round() as i64;

    let mut averaged = Vec::with_capacity(num_rounds);
    for r_idx in 0..num_rounds {
        let snaps: Vec<&RoundSnapshot> = results
            .iter()
            .filter_map(|r| r.snapshots.get(r_idx))
            .collect();
        if snaps.is_empty() {
            continue;
        }
        let n = snaps.len() as f64;

        let mut departments = BTreeMap::new();
        for (&dept_id, _) in &first.snapshots[r_idx].departments {
            let get = |f: &dyn Fn(&DepartmentSnapshot) -> f64| {
                snaps
                    .iter()
                    .filter_map(|s| s.departments.get(&dept_id))
                    .map(|d| f(d))
                    .sum::<f64>()
                    / n
            };
            let sample = &first.snapshots[r_idx].departments[&dept_id];
            let beds_available = if sample.beds_available.is_some() {
                Some(round_u32(get(&|d| {
                    d.beds_available.unwrap_or(0) as f64
                })))
            } else {
                None
            };
            departments.insert(
                dept_id,
                DepartmentSnapshot {
                    census: round_u32(get(&|d| d.census as f64)),
                    arrivals_waiting: round_u32(get(&|d| d.arrivals_waiting as f64)),
                    requests_waiting: round_u32(get(&|d| d.requests_waiting as f64)),
                    beds_available,
                    idle_staff: round_u32(get(&|d| d.idle_staff as f64)),
                    extra_staff: round_u32(get(&|d| d.extra_staff as f64)),
                    is_closed: sample.is_closed,
                    is_diverting: sample.is_diverting,
                },
            );
        }

        averaged.push(RoundSnapshot {
            round_number: first.snapshots[r_idx].round_number,
            departments,
            round_financial: round_i64(snaps.iter().map(|s| s.round_financial as f64).sum::<f64>() / n),
            round_quality: round_i64(snaps.iter().map(|s| s.round_quality as f64).sum::<f64>() / n),
            cumulative_financial: round_i64(
                snaps.iter().map(|s| s.cumulative_financial as f64).sum::<f64>() / n,
            ),
            cumulative_quality: round_i64(
                snaps.iter().map(|s| s.cumulative_quality as f64).sum::<f64>() / n,
            ),
        });
    }

    averaged
}

/// Fraction of simulations in which a predicate fires at least once.
fn fraction_of_sims(
    results: &[LookaheadResult],
    dept_id: crate::models::department::DepartmentId,
    hit: impl Fn(&DepartmentSnapshot) -> bool,
) -> f64 {
    let hits = results
        .iter()
        .filter(|r| {
            r.snapshots
                .iter()
                .filter_map(|s| s.departments.get(&dept_id))
                .any(&hit)
        })
        .count();
    hits as f64 / results.len() as f64
}

fn detect_risk_flags(results: &[LookaheadResult], state: &GameState) -> Vec<String> {
    use crate::models::department::DepartmentId;

    if results.is_empty() {
        return Vec::new();
    }
    let mut flags = Vec::new();

    // bed pressure, hard-cap departments only
    for dept_id in DepartmentId::ALL {
        let dept = state.department(dept_id);
        if dept.has_hallway() || dept.bed_capacity.is_unlimited() {
            continue;
        }
        let pct = fraction_of_sims(results, dept_id, |d| d.beds_available == Some(0));
        if pct > 0.5 {
            flags.push(format!(
                "{}: bed capacity reached in {:.0}% of simulations",
                dept_id,
                pct * 100.0
            ));
        } else if pct > 0.2 {
            flags.push(format!(
                "{}: bed capacity at risk in {:.0}% of simulations",
                dept_id,
                pct * 100.0
            ));
        }
    }

    for dept_id in DepartmentId::ALL {
        let pct = fraction_of_sims(results, dept_id, |d| d.arrivals_waiting > 5);
        if pct > 0.5 {
            flags.push(format!(
                "{}: high waiting patients (>5) in {:.0}% of simulations",
                dept_id,
                pct * 100.0
            ));
        }
    }

    for dept_id in DepartmentId::ALL {
        let pct = fraction_of_sims(results, dept_id, |d| {
            d.idle_staff == 0 && d.arrivals_waiting > 0
        });
        if pct > 0.3 {
            flags.push(format!(
                "{}: staff shortage risk in {:.0}% of simulations",
                dept_id,
                pct * 100.0
            ));
        }
    }

    flags
}
