//! Department state
//!
//! A department is one of four fixed units: Emergency Room, Surgery,
//! Critical Care, Step Down. ER and Step Down can overflow admitted
//! patients into the hallway; Surgery and Critical Care have a hard bed
//! cap enforced by the validator (never by the mutators).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::event::ActiveEvent;

/// One of the four fixed department identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DepartmentId {
    #[serde(rename = "er")]
    Er,
    #[serde(rename = "surgery")]
    Surgery,
    #[serde(rename = "cc")]
    CriticalCare,
    #[serde(rename = "sd")]
    StepDown,
}

impl DepartmentId {
    /// All four departments, in canonical iteration order.
    pub const ALL: [DepartmentId; 4] = [
        DepartmentId::Er,
        DepartmentId::Surgery,
        DepartmentId::CriticalCare,
        DepartmentId::StepDown,
    ];

    /// Stable short id, matching the serialized form and cost detail keys.
    pub fn as_str(self) -> &'static str {
        match self {
            DepartmentId::Er => "er",
            DepartmentId::Surgery => "surgery",
            DepartmentId::CriticalCare => "cc",
            DepartmentId::StepDown => "sd",
        }
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bed capacity: a hard count or unlimited.
///
/// Replaces "None / -1 / 999 means unlimited" sentinels with an explicit
/// sum type.
///
/// # Example
/// ```
/// use hospital_simulator_core_rs::Capacity;
///
/// assert_eq!(Capacity::Fixed(25).remaining(16), Some(9));
/// assert_eq!(Capacity::Unlimited.remaining(16), None);
/// assert_eq!(Capacity::Fixed(10).remaining(12), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    Unlimited,
    Fixed(u32),
}

impl Capacity {
    pub fn is_unlimited(self) -> bool {
        matches!(self, Capacity::Unlimited)
    }

    /// Beds still free given `occupied` beds; `None` means unlimited.
    pub fn remaining(self, occupied: u32) -> Option<u32> {
        match self {
            Capacity::Unlimited => None,
            Capacity::Fixed(cap) => Some(cap.saturating_sub(occupied)),
        }
    }
}

/// Staff availability counters for one department.
///
/// Only raw counters are stored; idle/on-duty figures are derived on
/// demand so they cannot diverge from the stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffState {
    /// Permanent staff headcount
    pub core_total: u32,
    /// Permanent staff currently serving patients
    pub core_busy: u32,
    /// Extra (temporary) staff currently on duty
    pub extra_total: u32,
    /// Extra staff currently serving patients
    pub extra_busy: u32,
    /// Extra staff called this round; activate at the next PAPERWORK
    pub extra_incoming: u32,
    /// Staff made unavailable by disruption events
    pub unavailable: u32,
}

impl StaffState {
    /// New staff pool with the given core headcount and busy count.
    pub fn new(core_total: u32, core_busy: u32) -> Self {
        Self {
            core_total,
            core_busy,
            extra_total: 0,
            extra_busy: 0,
            extra_incoming: 0,
            unavailable: 0,
        }
    }

    /// Idle permanent staff, after event unavailability is taken out.
    pub fn core_idle(&self) -> u32 {
        let available = self.core_total.saturating_sub(self.core_busy);
        available.saturating_sub(self.unavailable.min(available))
    }

    /// Idle extra staff.
    pub fn extra_idle(&self) -> u32 {
        self.extra_total.saturating_sub(self.extra_busy)
    }

    /// Idle staff of either kind.
    pub fn total_idle(&self) -> u32 {
        self.core_idle() + self.extra_idle()
    }

    /// Staff of either kind currently serving a patient.
    pub fn total_busy(&self) -> u32 {
        self.core_busy + self.extra_busy
    }

    /// Headcount on duty, net of event unavailability.
    pub fn total_on_duty(&self) -> u32 {
        (self.core_total + self.extra_total).saturating_sub(self.unavailable)
    }
}

/// Patients in transit between two departments (1-round maturation delay).
///
/// Owned by the sending department until maturation; the patients and the
/// staff holding them stay allocated at the sender until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingTransfer {
    pub from_dept: DepartmentId,
    pub to_dept: DepartmentId,
    pub count: u32,
    /// Rounds until the transfer matures; 1 means next EVENT phase
    pub rounds_remaining: u32,
}

/// Full state of a single department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentState {
    pub id: DepartmentId,
    pub staff: StaffState,
    pub patients_in_beds: u32,
    /// Overflow occupancy; legal only for ER and Step Down
    pub patients_in_hallway: u32,
    pub bed_capacity: Capacity,
    /// Patients waiting for admission this round
    pub arrivals_waiting: u32,
    /// Matured transfers waiting to be accepted, keyed by source department
    pub requests_waiting: BTreeMap<DepartmentId, u32>,
    pub outgoing_transfers: Vec<OutgoingTransfer>,
    /// Communication flag only; never blocks arrivals
    pub is_closed: bool,
    /// ER only; blocks ambulance arrivals next round
    pub is_diverting: bool,
    pub active_events: Vec<ActiveEvent>,
}

impl DepartmentState {
    /// New department with the given staff pool, census, and capacity.
    pub fn new(
        id: DepartmentId,
        staff: StaffState,
        patients_in_beds: u32,
        bed_capacity: Capacity,
    ) -> Self {
        Self {
            id,
            staff,
            patients_in_beds,
            patients_in_hallway: 0,
            bed_capacity,
            arrivals_waiting: 0,
            requests_waiting: BTreeMap::new(),
            outgoing_transfers: Vec::new(),
            is_closed: false,
            is_diverting: false,
            active_events: Vec::new(),
        }
    }

    /// Total census: beds plus hallway.
    pub fn total_patients(&self) -> u32 {
        self.patients_in_beds + self.patients_in_hallway
    }

    /// Whether this department can overflow into the hallway.
    pub fn has_hallway(&self) -> bool {
        matches!(self.id, DepartmentId::Er | DepartmentId::StepDown)
    }

    /// Beds still free; `None` means unlimited.
    pub fn beds_available(&self) -> Option<u32> {
        self.bed_capacity.remaining(self.patients_in_beds)
    }

    /// Total matured transfer requests waiting for acceptance.
    pub fn total_requests_waiting(&self) -> u32 {
        self.requests_waiting.values().sum()
    }

    /// Whether a shift-change event suppresses scheduled arrivals this round.
    pub fn has_shift_change(&self) -> bool {
        self.active_events.iter().any(|e| e.effect.shift_change)
    }

    /// Whether a no-exits event suspends discharges this round.
    pub fn has_no_exits(&self) -> bool {
        self.active_events.iter().any(|e| e.effect.no_exits)
    }
}
