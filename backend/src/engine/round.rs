//! Round orchestration
//!
//! One entry point per phase. Each checks the state machine is in the
//! expected phase, validates the decision, applies it, and advances.
//! Validation failures leave the state untouched; `WrongPhase` is never
//! corrected silently.

use thiserror::Error;

use crate::data::schedule::is_event_round;
use crate::engine::arrivals::{apply_arrivals_action, inject_scheduled_arrivals, mature_transfers};
use crate::engine::closed::apply_closed_action;
use crate::engine::defaults::{default_arrivals_action, default_exits_action};
use crate::engine::events::{apply_events, draw_events};
use crate::engine::exits::apply_exits_action;
use crate::engine::paperwork::process_paperwork;
use crate::engine::staffing::apply_staffing_action;
use crate::engine::validator::{
    validate_arrivals, validate_closed, validate_exits, validate_staffing, ValidationError,
};
use crate::models::action::{Action, ArrivalsAction, ClosedAction, ExitsAction, StaffingAction};
use crate::models::phase::Phase;
use crate::models::state::GameState;
use crate::rng;

/// Why a phase operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("expected phase {expected}, state is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn require_phase(state: &GameState, expected: Phase) -> Result<(), GameError> {
    if state.phase != expected {
        return Err(GameError::WrongPhase {
            expected,
            actual: state.phase,
        });
    }
    Ok(())
}

/// EVENT phase: draw and apply events at event rounds, then inject this
/// round's scheduled arrivals and mature in-flight transfers so the
/// waiting queues are populated before the ARRIVALS decision.
///
/// `event_seed` reproduces the draw; `None` draws from OS entropy.
pub fn process_event_phase(state: &mut GameState, event_seed: Option<u64>) -> Result<(), GameError> {
    require_phase(state, Phase::Event)?;

    if is_event_round(state.round_number) {
        let seed = event_seed.unwrap_or_else(rng::entropy_seed);
        let events = draw_events(state.round_number, seed);
        apply_events(state, events);
    }

    inject_scheduled_arrivals(state);
    mature_transfers(state);

    state.phase = Phase::Arrivals;
    Ok(())
}

/// ARRIVALS phase: apply admission and transfer-accept decisions.
pub fn process_arrivals_phase(state: &mut GameState, action: &ArrivalsAction) -> Result<(), GameError> {
    require_phase(state, Phase::Arrivals)?;
    validate_arrivals(state, action)?;
    apply_arrivals_action(state, action);
    state.phase = Phase::Exits;
    Ok(())
}

/// EXITS phase: apply walkout/transfer routings.
pub fn process_exits_phase(state: &mut GameState, action: &ExitsAction) -> Result<(), GameError> {
    require_phase(state, Phase::Exits)?;
    validate_exits(state, action)?;
    apply_exits_action(state, action);
    state.phase = Phase::Closed;
    Ok(())
}

/// CLOSED phase: set communication and diversion flags.
pub fn process_closed_phase(state: &mut GameState, action: &ClosedAction) -> Result<(), GameError> {
    require_phase(state, Phase::Closed)?;
    validate_closed(state, action)?;
    apply_closed_action(state, action);
    state.phase = Phase::Staffing;
    Ok(())
}

/// STAFFING phase: call, return, and transfer staff.
pub fn process_staffing_phase(state: &mut GameState, action: &StaffingAction) -> Result<(), GameError> {
    require_phase(state, Phase::Staffing)?;
    validate_staffing(state, action)?;
    apply_staffing_action(state, action);
    state.phase = Phase::Paperwork;
    Ok(())
}

/// PAPERWORK phase: record costs and advance the round.
pub fn process_paperwork_phase(state: &mut GameState) -> Result<(), GameError> {
    require_phase(state, Phase::Paperwork)?;
    process_paperwork(state);
    Ok(())
}

/// Dispatch one decision against the current phase.
pub fn apply_action(state: &mut GameState, action: &Action, event_seed: Option<u64>) -> Result<(), GameError> {
    match action {
        Action::Event => process_event_phase(state, event_seed),
        Action::Arrivals(a) => process_arrivals_phase(state, a),
        Action::Exits(a) => process_exits_phase(state, a),
        Action::Closed(a) => process_closed_phase(state, a),
        Action::Staffing(a) => process_staffing_phase(state, a),
        Action::Paperwork => process_paperwork_phase(state),
    }
}

/// Play one complete round with the greedy default decisions: admit as
/// many as resources allow, walk out every available exit, change no
/// flags, touch no staffing.
pub fn play_round_with_defaults(state: &mut GameState, event_seed: Option<u64>) -> Result<(), GameError> {
    process_event_phase(state, event_seed)?;
    let arrivals = default_arrivals_action(state);
    process_arrivals_phase(state, &arrivals)?;
    let exits = default_exits_action(state);
    process_exits_phase(state, &exits)?;
    process_closed_phase(state, &ClosedAction::default())?;
    process_staffing_phase(state, &StaffingAction::default())?;
    process_paperwork_phase(state)?;
    Ok(())
}
