//! Event card pools
//!
//! Each department owns a fixed pool of six cards; one is drawn uniformly
//! at each event round. Pools are compile-time constants so a draw can
//! never mutate them.

use crate::models::department::DepartmentId;
use crate::models::event::{EventCard, EventEffect};

const NO_EFFECT: EventEffect = EventEffect {
    staff_unavailable: 0,
    staff_unavailable_permanent: false,
    no_exits: false,
    extra_staff_needed: 0,
    bed_reduction: 0,
    additional_arrivals: 0,
    shift_change: false,
};

pub const ER_EVENTS: [EventCard; 6] = [
    EventCard {
        id: "er_1",
        department: DepartmentId::Er,
        description: "Staff member calls in sick, 1 staff unavailable this round",
        effect: EventEffect {
            staff_unavailable: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "er_2",
        department: DepartmentId::Er,
        description: "Staff injury, 1 staff unavailable rest of game",
        effect: EventEffect {
            staff_unavailable: 1,
            staff_unavailable_permanent: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "er_3",
        department: DepartmentId::Er,
        description: "No exits this round, patients cannot be discharged",
        effect: EventEffect {
            no_exits: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "er_4",
        department: DepartmentId::Er,
        description: "Multi-vehicle accident, 2 additional walk-in arrivals",
        effect: EventEffect {
            additional_arrivals: 2,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "er_5",
        department: DepartmentId::Er,
        description: "Shift change, no activity this round",
        effect: EventEffect {
            shift_change: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "er_6",
        department: DepartmentId::Er,
        description: "Equipment malfunction, 1 bed out of service this round",
        effect: EventEffect {
            bed_reduction: 1,
            ..NO_EFFECT
        },
    },
];

pub const SURGERY_EVENTS: [EventCard; 6] = [
    EventCard {
        id: "surg_1",
        department: DepartmentId::Surgery,
        description: "Staff member calls in sick, 1 staff unavailable this round",
        effect: EventEffect {
            staff_unavailable: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "surg_2",
        department: DepartmentId::Surgery,
        description: "Staff injury, 1 staff unavailable rest of game",
        effect: EventEffect {
            staff_unavailable: 1,
            staff_unavailable_permanent: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "surg_3",
        department: DepartmentId::Surgery,
        description: "No exits this round, patients cannot be discharged",
        effect: EventEffect {
            no_exits: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "surg_4",
        department: DepartmentId::Surgery,
        description: "Emergency surgery, need 1 extra staff immediately",
        effect: EventEffect {
            extra_staff_needed: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "surg_5",
        department: DepartmentId::Surgery,
        description: "OR renovation, 1 bed out of service this round",
        effect: EventEffect {
            bed_reduction: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "surg_6",
        department: DepartmentId::Surgery,
        description: "Additional surgical case arrives, 1 extra arrival",
        effect: EventEffect {
            additional_arrivals: 1,
            ..NO_EFFECT
        },
    },
];

pub const CC_EVENTS: [EventCard; 6] = [
    EventCard {
        id: "cc_1",
        department: DepartmentId::CriticalCare,
        description: "Staff member calls in sick, 1 staff unavailable this round",
        effect: EventEffect {
            staff_unavailable: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "cc_2",
        department: DepartmentId::CriticalCare,
        description: "Staff injury, 1 staff unavailable rest of game",
        effect: EventEffect {
            staff_unavailable: 1,
            staff_unavailable_permanent: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "cc_3",
        department: DepartmentId::CriticalCare,
        description: "No exits this round, patients cannot be discharged",
        effect: EventEffect {
            no_exits: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "cc_4",
        department: DepartmentId::CriticalCare,
        description: "Critical patient requires extra attention, 1 extra staff needed",
        effect: EventEffect {
            extra_staff_needed: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "cc_5",
        department: DepartmentId::CriticalCare,
        description: "Equipment failure, 1 bed out of service this round",
        effect: EventEffect {
            bed_reduction: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "cc_6",
        department: DepartmentId::CriticalCare,
        description: "Transfer from another hospital, 1 additional arrival",
        effect: EventEffect {
            additional_arrivals: 1,
            ..NO_EFFECT
        },
    },
];

pub const SD_EVENTS: [EventCard; 6] = [
    EventCard {
        id: "sd_1",
        department: DepartmentId::StepDown,
        description: "Staff member calls in sick, 1 staff unavailable this round",
        effect: EventEffect {
            staff_unavailable: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "sd_2",
        department: DepartmentId::StepDown,
        description: "Staff injury, 1 staff unavailable rest of game",
        effect: EventEffect {
            staff_unavailable: 1,
            staff_unavailable_permanent: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "sd_3",
        department: DepartmentId::StepDown,
        description: "No exits this round, patients cannot be discharged",
        effect: EventEffect {
            no_exits: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "sd_4",
        department: DepartmentId::StepDown,
        description: "Patient complication, 1 extra staff needed",
        effect: EventEffect {
            extra_staff_needed: 1,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "sd_5",
        department: DepartmentId::StepDown,
        description: "Shift change, no activity this round",
        effect: EventEffect {
            shift_change: true,
            ..NO_EFFECT
        },
    },
    EventCard {
        id: "sd_6",
        department: DepartmentId::StepDown,
        description: "Patient readmission, 1 additional arrival",
        effect: EventEffect {
            additional_arrivals: 1,
            ..NO_EFFECT
        },
    },
];

/// The 6-card pool for one department.
pub fn event_pool(dept: DepartmentId) -> &'static [EventCard; 6] {
    match dept {
        DepartmentId::Er => &ER_EVENTS,
        DepartmentId::Surgery => &SURGERY_EVENTS,
        DepartmentId::CriticalCare => &CC_EVENTS,
        DepartmentId::StepDown => &SD_EVENTS,
    }
}
