//! Read-only state analytics
//!
//! Lightweight queries over the current state and the fixed schedule
//! tables. Nothing here copies or simulates.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::schedule::{er_ambulance, scheduled_arrivals, scheduled_exits};
use crate::models::department::{Capacity, DepartmentId, DepartmentState};
use crate::models::state::{GameState, TOTAL_ROUNDS};

/// Utilization picture of one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationMetrics {
    pub staff_utilization: f64,
    pub bed_utilization: f64,
    pub overflow: u32,
    /// Weighted pressure score in [0, 1]
    pub pressure: f64,
}

/// Staff, bed, and waiting pressure for one department.
///
/// Pressure weighs staff utilization (0.4), bed utilization (0.3),
/// admissions waiting (0.2, saturating at 5), and pending transfer
/// requests (0.1, saturating at 3).
pub fn department_utilization(dept: &DepartmentState) -> UtilizationMetrics {
    let on_duty = dept.staff.total_on_duty();
    let staff_utilization = if on_duty > 0 {
        f64::from(dept.staff.total_busy()) / f64::from(on_duty)
    } else {
        1.0
    };

    let bed_utilization = match dept.bed_capacity {
        Capacity::Fixed(cap) if cap > 0 => f64::from(dept.patients_in_beds) / f64::from(cap),
        Capacity::Fixed(_) => 1.0,
        Capacity::Unlimited => 0.0,
    };

    let pressure = staff_utilization * 0.4
        + bed_utilization * 0.3
        + (f64::from(dept.arrivals_waiting) / 5.0).min(1.0) * 0.2
        + (f64::from(dept.total_requests_waiting()) / 3.0).min(1.0) * 0.1;

    UtilizationMetrics {
        staff_utilization,
        bed_utilization,
        overflow: dept.patients_in_hallway,
        pressure,
    }
}

/// Scheduled patient flow for one future round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowForecast {
    pub round: u32,
    pub arrivals: u32,
    pub exits: u32,
    pub net_flow: i64,
}

/// Per-department net flow over the next `horizon` rounds, straight
/// from the schedule tables.
pub fn capacity_forecast(
    state: &GameState,
    horizon: u32,
) -> BTreeMap<DepartmentId, Vec<FlowForecast>> {
    let start = state.round_number;
    let end = (start + horizon).min(TOTAL_ROUNDS + 1);

    let mut result = BTreeMap::new();
    for dept_id in DepartmentId::ALL {
        let rounds: Vec<FlowForecast> = (start..end)
            .map(|rn| {
                let arrivals = scheduled_arrivals(dept_id, rn);
                let exits = scheduled_exits(dept_id, rn);
                FlowForecast {
                    round: rn,
                    arrivals,
                    exits,
                    net_flow: i64::from(arrivals) - i64::from(exits),
                }
            })
            .collect();
        result.insert(dept_id, rounds);
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Medium,
    High,
}

/// One capacity or staffing risk in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottleneckRisk {
    pub department: DepartmentId,
    pub severity: RiskSeverity,
    pub reason: String,
}

/// Departments at risk of capacity problems right now.
pub fn bottleneck_detection(state: &GameState) -> Vec<BottleneckRisk> {
    let mut risks = Vec::new();

    for dept in state.departments.values() {
        if !dept.has_hallway() {
            if let Capacity::Fixed(cap) = dept.bed_capacity {
                if dept.patients_in_beds >= cap {
                    risks.push(BottleneckRisk {
                        department: dept.id,
                        severity: RiskSeverity::High,
                        reason: format!("At bed capacity ({}/{})", dept.patients_in_beds, cap),
                    });
                } else if cap - dept.patients_in_beds <= 2 {
                    risks.push(BottleneckRisk {
                        department: dept.id,
                        severity: RiskSeverity::Medium,
                        reason: format!("Near bed capacity ({}/{})", dept.patients_in_beds, cap),
                    });
                }
            }
        }

        let idle = dept.staff.total_idle();
        if idle == 0 && dept.arrivals_waiting > 0 {
            risks.push(BottleneckRisk {
                department: dept.id,
                severity: RiskSeverity::High,
                reason: format!("No idle staff with {} patients waiting", dept.arrivals_waiting),
            });
        } else if idle < dept.arrivals_waiting {
            risks.push(BottleneckRisk {
                department: dept.id,
                severity: RiskSeverity::Medium,
                reason: format!(
                    "Only {} idle staff for {} waiting patients",
                    idle, dept.arrivals_waiting
                ),
            });
        }

        if dept.arrivals_waiting > 3 {
            risks.push(BottleneckRisk {
                department: dept.id,
                severity: RiskSeverity::High,
                reason: format!("{} patients waiting for admission", dept.arrivals_waiting),
            });
        }

        if dept.total_requests_waiting() > 2 {
            risks.push(BottleneckRisk {
                department: dept.id,
                severity: RiskSeverity::Medium,
                reason: format!(
                    "{} transfer requests pending",
                    dept.total_requests_waiting()
                ),
            });
        }
    }

    risks
}

/// Cost/benefit verdict on diverting the ER next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiversionRoi {
    pub recommend_diversion: bool,
    pub reason: String,
    pub diversion_cost: i64,
    pub avoided_waiting_cost: i64,
    pub net_savings: i64,
}

/// Whether diverting the ER pays off. Diversion penalties dwarf ER
/// waiting costs, so this almost never recommends diverting.
pub fn diversion_roi(state: &GameState, rounds_ahead: u32) -> DiversionRoi {
    let rates = &state.cost_rates;
    let next_round = state.round_number + 1;

    if next_round > TOTAL_ROUNDS {
        return DiversionRoi {
            recommend_diversion: false,
            reason: "Game ending, no future rounds to divert".to_string(),
            diversion_cost: 0,
            avoided_waiting_cost: 0,
            net_savings: 0,
        };
    }

    let ambulances_next = i64::from(er_ambulance(next_round));
    let diversion_cost =
        ambulances_next * (rates.er_diversion_financial + rates.er_diversion_quality);

    // diverted patients would otherwise wait 1-2 rounds before admission
    let remaining = rounds_ahead.min(TOTAL_ROUNDS - state.round_number);
    let avoided_per_round = ambulances_next * (rates.er_waiting_financial + rates.er_waiting_quality);
    let avoided_waiting_cost = avoided_per_round * i64::from(remaining.min(2));

    let net_savings = avoided_waiting_cost - diversion_cost;
    DiversionRoi {
        recommend_diversion: net_savings > 0,
        reason: format!(
            "Diversion costs ${diversion_cost} but only avoids ~${avoided_waiting_cost} \
             in waiting costs ({ambulances_next} ambulances)"
        ),
        diversion_cost,
        avoided_waiting_cost,
        net_savings,
    }
}

/// Per-department staffing surplus/deficit picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffEfficiency {
    pub idle: u32,
    pub deficit: u32,
    pub extra_on_duty: u32,
    pub recommend_extra: u32,
    pub recommend_return: u32,
}

/// Recommend calling extra staff where a waiting patient costs more per
/// round than the staffer, and returning idle extras with no demand in
/// sight.
pub fn staff_efficiency_analysis(state: &GameState) -> BTreeMap<DepartmentId, StaffEfficiency> {
    let rates = &state.cost_rates;
    let mut result = BTreeMap::new();

    for dept in state.departments.values() {
        let idle = dept.staff.total_idle();
        let demand = dept.arrivals_waiting + dept.total_requests_waiting();
        let deficit = demand.saturating_sub(idle);

        let mut recommend_extra = 0;
        if deficit > 0 {
            let cost_per_waiting = if dept.id == DepartmentId::Er {
                rates.er_waiting_financial + rates.er_waiting_quality
            } else {
                rates.arrivals_waiting_financial + rates.arrivals_waiting_quality
            };
            let staff_cost = rates.extra_staff_financial + rates.extra_staff_quality;
            if cost_per_waiting > staff_cost {
                recommend_extra = deficit;
            }
        }

        let recommend_return = if demand == 0 { dept.staff.extra_idle() } else { 0 };

        result.insert(
            dept.id,
            StaffEfficiency {
                idle,
                deficit,
                extra_on_duty: dept.staff.extra_total,
                recommend_extra,
                recommend_return,
            },
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::starting::create_starting_state;
    use crate::models::cost::CostRates;

    #[test]
    fn test_starting_er_utilization() {
        let state = create_starting_state(CostRates::default());
        let m = department_utilization(state.department(DepartmentId::Er));
        assert!((m.staff_utilization - 16.0 / 18.0).abs() < 1e-9);
        assert!((m.bed_utilization - 16.0 / 25.0).abs() < 1e-9);
        assert_eq!(m.overflow, 0);
    }

    #[test]
    fn test_capacity_forecast_net_flow() {
        let state = create_starting_state(CostRates::default());
        let forecast = capacity_forecast(&state, 3);
        let er = &forecast[&DepartmentId::Er];
        assert_eq!(er.len(), 3);
        // round 1: 2 arrivals, 5 exits
        assert_eq!(er[0].net_flow, -3);
    }

    #[test]
    fn test_diversion_rarely_pays() {
        let state = create_starting_state(CostRates::default());
        let roi = diversion_roi(&state, 6);
        assert!(!roi.recommend_diversion);
    }

    #[test]
    fn test_bottlenecks_flag_full_hard_cap_department() {
        let mut state = create_starting_state(CostRates::default());
        state.department_mut(DepartmentId::Surgery).patients_in_beds = 9;

        let risks = bottleneck_detection(&state);
        assert!(risks
            .iter()
            .any(|r| r.department == DepartmentId::Surgery && r.severity == RiskSeverity::High));
    }

    #[test]
    fn test_extra_staff_recommended_for_ward_deficit() {
        let mut state = create_starting_state(CostRates::default());
        // Surgery: 2 idle, 5 waiting, ward rate far above staff cost
        state.department_mut(DepartmentId::Surgery).arrivals_waiting = 5;

        let analysis = staff_efficiency_analysis(&state);
        assert_eq!(analysis[&DepartmentId::Surgery].recommend_extra, 3);
    }
}
