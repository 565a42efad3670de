//! Round phase sequencing
//!
//! Every round moves through the same six phases in strict order:
//! EVENT → ARRIVALS → EXITS → CLOSED → STAFFING → PAPERWORK, then wraps
//! to the next round's EVENT. The engine enforces this order with a
//! `WrongPhase` error; there is no implicit correction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six phases of a round, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Event,
    Arrivals,
    Exits,
    Closed,
    Staffing,
    Paperwork,
}

/// The fixed phase sequence within a round.
pub const PHASE_ORDER: [Phase; 6] = [
    Phase::Event,
    Phase::Arrivals,
    Phase::Exits,
    Phase::Closed,
    Phase::Staffing,
    Phase::Paperwork,
];

impl Phase {
    /// The phase that follows this one, wrapping PAPERWORK back to EVENT.
    ///
    /// # Example
    /// ```
    /// use hospital_simulator_core_rs::Phase;
    ///
    /// assert_eq!(Phase::Event.next(), Phase::Arrivals);
    /// assert_eq!(Phase::Paperwork.next(), Phase::Event);
    /// ```
    pub fn next(self) -> Phase {
        match self {
            Phase::Event => Phase::Arrivals,
            Phase::Arrivals => Phase::Exits,
            Phase::Exits => Phase::Closed,
            Phase::Closed => Phase::Staffing,
            Phase::Staffing => Phase::Paperwork,
            Phase::Paperwork => Phase::Event,
        }
    }

    /// Position within [`PHASE_ORDER`].
    pub fn index(self) -> usize {
        match self {
            Phase::Event => 0,
            Phase::Arrivals => 1,
            Phase::Exits => 2,
            Phase::Closed => 3,
            Phase::Staffing => 4,
            Phase::Paperwork => 5,
        }
    }

    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Event => "event",
            Phase::Arrivals => "arrivals",
            Phase::Exits => "exits",
            Phase::Closed => "closed",
            Phase::Staffing => "staffing",
            Phase::Paperwork => "paperwork",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_is_cyclic() {
        let mut phase = Phase::Event;
        for expected in PHASE_ORDER {
            assert_eq!(phase, expected);
            phase = phase.next();
        }
        assert_eq!(phase, Phase::Event);
    }

    #[test]
    fn test_index_matches_order() {
        for (i, phase) in PHASE_ORDER.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }
}
