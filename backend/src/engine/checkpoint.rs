//! Checkpoint - Save/Load Game State
//!
//! Serializes complete game state for pause/resume. A snapshot embeds a
//! hash of the session's cost-rate table; loading refuses a snapshot
//! whose rates differ from the expected ones, since mixed rates would
//! make the cost ledger incomparable across rounds.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::cost::CostRates;
use crate::models::state::{GameState, TOTAL_ROUNDS};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("config hash mismatch: snapshot {found}, expected {expected}")]
    ConfigMismatch { expected: String, found: String },
    #[error("state validation failed: {0}")]
    InvalidState(String),
}

/// Complete game state snapshot, plus the cost-rate hash that guards
/// against resuming under different scoring rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub state: GameState,
    pub config_hash: String,
}

impl StateSnapshot {
    /// Capture the current state.
    pub fn capture(state: &GameState) -> Result<Self, SnapshotError> {
        Ok(StateSnapshot {
            config_hash: compute_config_hash(&state.cost_rates)?,
            state: state.clone(),
        })
    }
}

/// Serialize a snapshot of `state` to pretty JSON.
pub fn save_snapshot(state: &GameState) -> Result<String, SnapshotError> {
    validate_state(state)?;
    let snapshot = StateSnapshot::capture(state)?;
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Restore a game from a serialized snapshot, verifying the cost-rate
/// hash and the state invariants.
pub fn load_snapshot(json: &str, expected_rates: &CostRates) -> Result<GameState, SnapshotError> {
    let snapshot: StateSnapshot = serde_json::from_str(json)?;

    let expected = compute_config_hash(expected_rates)?;
    if snapshot.config_hash != expected {
        return Err(SnapshotError::ConfigMismatch {
            expected,
            found: snapshot.config_hash,
        });
    }

    validate_state(&snapshot.state)?;
    Ok(snapshot.state)
}

/// Deterministic SHA256 hash of any serializable config.
///
/// Canonicalizes via serde_json::Value with recursively sorted object
/// keys, so the hash is stable across map iteration orders.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SnapshotError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical = canonicalize(serde_json::to_value(config)?);
    let json = serde_json::to_string(&canonical)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Check the structural invariants a well-formed state must satisfy.
pub fn validate_state(state: &GameState) -> Result<(), SnapshotError> {
    if !(1..=TOTAL_ROUNDS).contains(&state.round_number) {
        return Err(SnapshotError::InvalidState(format!(
            "round number {} out of range",
            state.round_number
        )));
    }

    for dept in state.departments.values() {
        if !dept.has_hallway() && dept.patients_in_hallway > 0 {
            return Err(SnapshotError::InvalidState(format!(
                "{}: {} patients in hallway but department has none",
                dept.id, dept.patients_in_hallway
            )));
        }
        if dept.staff.core_busy > dept.staff.core_total {
            return Err(SnapshotError::InvalidState(format!(
                "{}: core busy {} exceeds core total {}",
                dept.id, dept.staff.core_busy, dept.staff.core_total
            )));
        }
        if dept.staff.extra_busy > dept.staff.extra_total {
            return Err(SnapshotError::InvalidState(format!(
                "{}: extra busy {} exceeds extra total {}",
                dept.id, dept.staff.extra_busy, dept.staff.extra_total
            )));
        }
    }

    let ledger_financial: i64 = state.round_costs.iter().map(|e| e.financial).sum();
    let ledger_quality: i64 = state.round_costs.iter().map(|e| e.quality).sum();
    if ledger_financial != state.total_financial_cost || ledger_quality != state.total_quality_cost
    {
        return Err(SnapshotError::InvalidState(format!(
            "cost totals ({}, {}) disagree with ledger sums ({}, {})",
            state.total_financial_cost, state.total_quality_cost, ledger_financial, ledger_quality
        )));
    }

    Ok(())
}
