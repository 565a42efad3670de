//! Phase decision payloads
//!
//! One payload type per decision-bearing phase, plus the closed [`Action`]
//! union used by decision policies. Counts are unsigned, so "reject
//! negative quantities" is enforced by the type system and at the serde
//! boundary: an externally-sourced decision with a negative count fails
//! to parse before it ever reaches the validator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::department::DepartmentId;
use crate::models::phase::Phase;

/// How many waiting patients to admit in a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmitDecision {
    pub department: DepartmentId,
    pub admit_count: u32,
}

/// Accept matured transfer requests from one source department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptTransferDecision {
    pub department: DepartmentId,
    pub from_dept: DepartmentId,
    pub accept_count: u32,
}

/// Decisions for the ARRIVALS phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalsAction {
    #[serde(default)]
    pub admissions: Vec<AdmitDecision>,
    #[serde(default)]
    pub transfer_accepts: Vec<AcceptTransferDecision>,
}

/// Where to send a batch of exiting patients from one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitRouting {
    pub from_dept: DepartmentId,
    /// Patients leaving the system entirely (frees staff immediately)
    #[serde(default)]
    pub walkout_count: u32,
    /// Destination → patient count; each starts a 1-round-delayed transfer
    #[serde(default)]
    pub transfers: BTreeMap<DepartmentId, u32>,
}

impl ExitRouting {
    /// Total patients routed out by this entry.
    pub fn total_routed(&self) -> u32 {
        self.walkout_count + self.transfers.values().sum::<u32>()
    }
}

/// Decisions for the EXITS phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitsAction {
    #[serde(default)]
    pub routings: Vec<ExitRouting>,
}

/// Decisions for the CLOSED phase.
///
/// "Closed" is a communication flag only and never blocks arrivals.
/// Diversion takes effect at the NEXT round's EVENT phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedAction {
    #[serde(default)]
    pub close_departments: Vec<DepartmentId>,
    #[serde(default)]
    pub open_departments: Vec<DepartmentId>,
    #[serde(default)]
    pub divert_er: bool,
}

/// Move idle staff between departments (immediate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffTransfer {
    pub from_dept: DepartmentId,
    pub to_dept: DepartmentId,
    pub count: u32,
}

/// Decisions for the STAFFING phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingAction {
    /// Extra staff to call; they arrive at the next PAPERWORK
    #[serde(default)]
    pub extra_staff: BTreeMap<DepartmentId, u32>,
    /// Idle extra staff to send home immediately
    #[serde(default)]
    pub return_extra: BTreeMap<DepartmentId, u32>,
    #[serde(default)]
    pub transfers: Vec<StaffTransfer>,
}

/// Closed union over all phase decisions.
///
/// EVENT and PAPERWORK carry no player decision; their variants exist so
/// a [`DecisionPolicy`](crate::forecast::policy::DecisionPolicy) can
/// return one action per phase and the state machine can match
/// exhaustively; a missing phase handler is a compile error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum Action {
    Event,
    Arrivals(ArrivalsAction),
    Exits(ExitsAction),
    Closed(ClosedAction),
    Staffing(StaffingAction),
    Paperwork,
}

impl Action {
    /// The phase this decision belongs to.
    pub fn phase(&self) -> Phase {
        match self {
            Action::Event => Phase::Event,
            Action::Arrivals(_) => Phase::Arrivals,
            Action::Exits(_) => Phase::Exits,
            Action::Closed(_) => Phase::Closed,
            Action::Staffing(_) => Phase::Staffing,
            Action::Paperwork => Phase::Paperwork,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_routing_total() {
        let mut routing = ExitRouting {
            from_dept: DepartmentId::Er,
            walkout_count: 3,
            transfers: BTreeMap::new(),
        };
        routing.transfers.insert(DepartmentId::StepDown, 2);
        assert_eq!(routing.total_routed(), 5);
    }

    #[test]
    fn test_action_phase_mapping() {
        assert_eq!(Action::Event.phase(), Phase::Event);
        assert_eq!(
            Action::Arrivals(ArrivalsAction::default()).phase(),
            Phase::Arrivals
        );
        assert_eq!(Action::Paperwork.phase(), Phase::Paperwork);
    }

    #[test]
    fn test_negative_count_rejected_at_parse() {
        let json = r#"{"admissions":[{"department":"er","admit_count":-1}],"transfer_accepts":[]}"#;
        assert!(serde_json::from_str::<ArrivalsAction>(json).is_err());
    }
}
