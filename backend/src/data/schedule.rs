//! Fixed arrival and exit schedules for all 24 rounds
//!
//! These sequences are deterministic, not random; a planner has perfect
//! information about them. Index 0 corresponds to round 1.

use crate::models::department::DepartmentId;
use crate::models::state::TOTAL_ROUNDS;

pub const ER_WALKIN: [u32; 24] = [
    2, 3, 2, 6, 4, 3, 5, 7, 4, 2, 3, 2, 4, 4, 2, 3, 1, 1, 1, 6, 1, 5, 3, 2,
];
pub const ER_AMBULANCE: [u32; 24] = [
    0, 1, 1, 2, 0, 2, 0, 0, 1, 2, 1, 3, 2, 2, 2, 3, 1, 1, 0, 1, 0, 2, 1, 0,
];
pub const ER_EXITS: [u32; 24] = [
    5, 2, 2, 4, 4, 2, 5, 5, 3, 1, 4, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const SURGERY_ARRIVALS: [u32; 24] = [
    3, 1, 1, 0, 2, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];
pub const SURGERY_EXITS: [u32; 24] = [
    0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const CC_ARRIVALS: [u32; 24] = [
    1, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];
pub const CC_EXITS: [u32; 24] = [
    0, 0, 1, 0, 1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const SD_ARRIVALS: [u32; 24] = [
    1, 2, 1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1,
];
pub const SD_EXITS: [u32; 24] = [
    3, 2, 4, 3, 1, 2, 3, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Rounds at which one disruption event is drawn per department.
pub const EVENT_ROUNDS: [u32; 5] = [6, 9, 12, 17, 21];

/// Whether an event draw happens at this round.
pub fn is_event_round(round_number: u32) -> bool {
    EVENT_ROUNDS.contains(&round_number)
}

fn idx(round_number: u32) -> usize {
    debug_assert!((1..=TOTAL_ROUNDS).contains(&round_number));
    (round_number.clamp(1, TOTAL_ROUNDS) - 1) as usize
}

/// ER walk-in arrivals for a round (1-indexed).
pub fn er_walkin(round_number: u32) -> u32 {
    ER_WALKIN[idx(round_number)]
}

/// ER ambulance arrivals for a round (1-indexed). Subject to diversion.
pub fn er_ambulance(round_number: u32) -> u32 {
    ER_AMBULANCE[idx(round_number)]
}

/// Scheduled arrivals for a department at a round (1-indexed).
/// For ER this is walk-ins plus ambulances.
pub fn scheduled_arrivals(dept: DepartmentId, round_number: u32) -> u32 {
    let i = idx(round_number);
    match dept {
        DepartmentId::Er => ER_WALKIN[i] + ER_AMBULANCE[i],
        DepartmentId::Surgery => SURGERY_ARRIVALS[i],
        DepartmentId::CriticalCare => CC_ARRIVALS[i],
        DepartmentId::StepDown => SD_ARRIVALS[i],
    }
}

/// Scheduled exits available to a department at a round (1-indexed).
pub fn scheduled_exits(dept: DepartmentId, round_number: u32) -> u32 {
    let i = idx(round_number);
    match dept {
        DepartmentId::Er => ER_EXITS[i],
        DepartmentId::Surgery => SURGERY_EXITS[i],
        DepartmentId::CriticalCare => CC_EXITS[i],
        DepartmentId::StepDown => SD_EXITS[i],
    }
}
