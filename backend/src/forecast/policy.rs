//! Decision policies for simulated play
//!
//! A policy turns a state and the phase awaiting a decision into an
//! [`Action`]. The forecast driver consults the policy at every
//! decision-bearing phase; EVENT and PAPERWORK decisions are fixed.

use crate::engine::defaults::{default_arrivals_action, default_exits_action};
use crate::models::action::{Action, ClosedAction, StaffingAction};
use crate::models::phase::Phase;
use crate::models::state::GameState;

/// Produces one decision per phase during simulated play.
///
/// Takes `&mut self` so stateful policies (such as a one-shot override)
/// can track what they have already answered.
pub trait DecisionPolicy {
    fn decide(&mut self, state: &GameState, phase: Phase) -> Action;
}

/// Greedy baseline: admit the maximum resources allow, walk out every
/// available exit, no flags, no staffing changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl DecisionPolicy for GreedyPolicy {
    fn decide(&mut self, state: &GameState, phase: Phase) -> Action {
        match phase {
            Phase::Event => Action::Event,
            Phase::Arrivals => Action::Arrivals(default_arrivals_action(state)),
            Phase::Exits => Action::Exits(default_exits_action(state)),
            Phase::Closed => Action::Closed(ClosedAction::default()),
            Phase::Staffing => Action::Staffing(StaffingAction::default()),
            Phase::Paperwork => Action::Paperwork,
        }
    }
}

/// Plays a fixed action at the first occurrence of one phase, then
/// falls back to the greedy baseline. Used by the optimizer to score a
/// single candidate decision against otherwise-default play.
#[derive(Debug, Clone)]
pub struct OverridePolicy {
    phase: Phase,
    action: Action,
    used: bool,
}

impl OverridePolicy {
    pub fn new(phase: Phase, action: Action) -> Self {
        Self {
            phase,
            action,
            used: false,
        }
    }
}

impl DecisionPolicy for OverridePolicy {
    fn decide(&mut self, state: &GameState, phase: Phase) -> Action {
        if phase == self.phase && !self.used {
            self.used = true;
            return self.action.clone();
        }
        GreedyPolicy.decide(state, phase)
    }
}
