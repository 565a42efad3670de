//! Allowed patient transfer routes
//!
//! The route table is asymmetric: ER can send anywhere but never
//! receives transfers.

use crate::models::department::DepartmentId;

/// Destinations a department may transfer exiting patients to.
pub fn allowed_destinations(from: DepartmentId) -> &'static [DepartmentId] {
    match from {
        DepartmentId::Er => &[
            DepartmentId::Surgery,
            DepartmentId::CriticalCare,
            DepartmentId::StepDown,
        ],
        DepartmentId::Surgery => &[DepartmentId::CriticalCare, DepartmentId::StepDown],
        DepartmentId::CriticalCare => &[DepartmentId::Surgery, DepartmentId::StepDown],
        DepartmentId::StepDown => &[DepartmentId::Surgery, DepartmentId::CriticalCare],
    }
}

/// Whether a transfer route is allowed.
pub fn can_transfer(from: DepartmentId, to: DepartmentId) -> bool {
    allowed_destinations(from).contains(&to)
}
