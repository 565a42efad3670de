//! Event draw, application, and expiry
//!
//! At each of the five event rounds one card is drawn per department,
//! uniformly from that department's 6-card pool. Draws iterate
//! departments in canonical order off a single seeded generator, so one
//! seed reproduces the whole round's draw.

use std::collections::BTreeMap;

use crate::data::events::event_pool;
use crate::data::schedule::is_event_round;
use crate::models::department::{Capacity, DepartmentId};
use crate::models::event::ActiveEvent;
use crate::models::state::GameState;
use crate::rng::RngManager;

/// Draw one event per department for an event round. Returns an empty
/// map at non-event rounds.
pub fn draw_events(round_number: u32, seed: u64) -> BTreeMap<DepartmentId, ActiveEvent> {
    let mut drawn = BTreeMap::new();
    if !is_event_round(round_number) {
        return drawn;
    }

    let mut rng = RngManager::new(seed);
    for dept_id in DepartmentId::ALL {
        let pool = event_pool(dept_id);
        let card = &pool[rng.pick_index(pool.len())];
        drawn.insert(dept_id, ActiveEvent::from_card(card));
    }
    drawn
}

/// Apply drawn events: register them as active and apply the immediate
/// parts of their effects.
pub fn apply_events(state: &mut GameState, events: BTreeMap<DepartmentId, ActiveEvent>) {
    for (dept_id, event) in events {
        let dept = state.department_mut(dept_id);
        let effect = event.effect.clone();

        tracing::debug!(
            department = %dept_id,
            event_id = %event.event_id,
            "event drawn"
        );
        dept.active_events.push(event);

        if effect.staff_unavailable > 0 {
            dept.staff.unavailable += effect.staff_unavailable;
        }
        if effect.additional_arrivals > 0 {
            dept.arrivals_waiting += effect.additional_arrivals;
        }
        if effect.bed_reduction > 0 {
            if let Capacity::Fixed(cap) = dept.bed_capacity {
                dept.bed_capacity = Capacity::Fixed(cap.saturating_sub(effect.bed_reduction));
            }
        }
    }
}

/// Tick down event durations at PAPERWORK: expired events revert their
/// reversible effects (staff availability, bed capacity); permanent
/// events are kept untouched.
pub fn tick_events(state: &mut GameState) {
    for dept in state.departments.values_mut() {
        let mut remaining = Vec::with_capacity(dept.active_events.len());
        for mut event in dept.active_events.drain(..) {
            match event.rounds_remaining {
                None => remaining.push(event),
                Some(r) if r > 1 => {
                    event.rounds_remaining = Some(r - 1);
                    remaining.push(event);
                }
                Some(_) => {
                    let effect = &event.effect;
                    if effect.staff_unavailable > 0 && !effect.staff_unavailable_permanent {
                        dept.staff.unavailable =
                            dept.staff.unavailable.saturating_sub(effect.staff_unavailable);
                    }
                    if effect.bed_reduction > 0 {
                        if let Capacity::Fixed(cap) = dept.bed_capacity {
                            dept.bed_capacity = Capacity::Fixed(cap + effect.bed_reduction);
                        }
                    }
                }
            }
        }
        dept.active_events = remaining;
    }
}
