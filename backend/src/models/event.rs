//! Disruption events
//!
//! At five fixed rounds one card is drawn per department from that
//! department's pool of six. Effects apply immediately and are tracked
//! with a remaining-duration counter; `None` means permanent for the rest
//! of the game (staff-injury cards only).

use serde::{Deserialize, Serialize};

use crate::models::department::DepartmentId;

/// The mechanical effect of an event card.
///
/// A card can combine several of these fields; unused fields stay at
/// their zero/false defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEffect {
    /// Staff made unavailable
    #[serde(default)]
    pub staff_unavailable: u32,
    /// True: unavailable for the rest of the game; false: one round
    #[serde(default)]
    pub staff_unavailable_permanent: bool,
    /// Department cannot discharge this round
    #[serde(default)]
    pub no_exits: bool,
    /// Advisory only: extra staff the card calls for (no mechanical effect)
    #[serde(default)]
    pub extra_staff_needed: u32,
    /// Temporary bed cap reduction
    #[serde(default)]
    pub bed_reduction: u32,
    /// Extra patients added to the waiting queue immediately
    #[serde(default)]
    pub additional_arrivals: u32,
    /// Shift change: scheduled arrivals are suppressed this round
    #[serde(default)]
    pub shift_change: bool,
}

/// A single event card definition in a department's pool.
///
/// Pools are compile-time constants; only drawn [`ActiveEvent`]s are part
/// of the serialized game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: &'static str,
    pub department: DepartmentId,
    pub description: &'static str,
    pub effect: EventEffect,
}

/// An event currently in effect on a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub event_id: String,
    pub description: String,
    pub effect: EventEffect,
    /// Rounds left before the effect reverts; `None` = permanent
    pub rounds_remaining: Option<u32>,
}

impl ActiveEvent {
    /// Instantiate a drawn card as an active event.
    ///
    /// Duration is one round for everything except permanent staff
    /// injuries.
    pub fn from_card(card: &EventCard) -> Self {
        let rounds_remaining = if card.effect.staff_unavailable_permanent {
            None
        } else {
            Some(1)
        };
        Self {
            event_id: card.id.to_string(),
            description: card.description.to_string(),
            effect: card.effect.clone(),
            rounds_remaining,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.rounds_remaining.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_only_for_staff_injury() {
        let injury = EventCard {
            id: "er_2",
            department: DepartmentId::Er,
            description: "Staff injury",
            effect: EventEffect {
                staff_unavailable: 1,
                staff_unavailable_permanent: true,
                ..Default::default()
            },
        };
        let sick = EventCard {
            id: "er_1",
            department: DepartmentId::Er,
            description: "Staff sick",
            effect: EventEffect {
                staff_unavailable: 1,
                ..Default::default()
            },
        };

        assert!(ActiveEvent::from_card(&injury).is_permanent());
        assert_eq!(ActiveEvent::from_card(&sick).rounds_remaining, Some(1));
    }
}
