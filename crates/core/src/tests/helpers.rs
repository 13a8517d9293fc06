// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{ActorContext, Inspection};
use revisa_domain::{
    ActorRole, BranchId, ChecklistAnswer, ChecklistReport, DaySchedule, InspectionId,
    InspectionStatus, PublicationId, TimeSlot, UserId, VehicleRef, WeeklySchedule,
};
use time::Date;
use time::macros::date;

pub const REQUESTER: UserId = UserId(1);
pub const MECHANIC: UserId = UserId(2);
pub const OTHER_MECHANIC: UserId = UserId(3);
pub const ADMIN: UserId = UserId(4);
pub const OWNER: UserId = UserId(5);
pub const BRANCH: BranchId = BranchId(10);

/// Monday, so weekday lookups hit day 1.
pub const MONDAY: Date = date!(2024 - 06 - 10);

pub const OCCURRED_AT: &str = "2024-06-10T10:00:00Z";

pub fn slot(value: &str) -> TimeSlot {
    TimeSlot::new(value).unwrap()
}

pub fn slots(values: &[&str]) -> Vec<TimeSlot> {
    values.iter().map(|value| slot(value)).collect()
}

pub fn schedule_for_monday(is_active: bool, values: &[&str]) -> WeeklySchedule {
    let mut schedule: WeeklySchedule = WeeklySchedule::new();
    schedule
        .set_day(1, DaySchedule::with_slots(is_active, slots(values)))
        .unwrap();
    schedule
}

pub fn requester_actor() -> ActorContext {
    ActorContext::new(REQUESTER, ActorRole::Requester)
}

pub fn mechanic_actor() -> ActorContext {
    ActorContext::new(MECHANIC, ActorRole::Mechanic)
}

pub fn admin_actor() -> ActorContext {
    ActorContext::new(ADMIN, ActorRole::BranchAdmin)
}

pub fn owner_actor() -> ActorContext {
    ActorContext::new(OWNER, ActorRole::ListingOwner)
}

pub fn checklist() -> ChecklistReport {
    ChecklistReport {
        answers: vec![ChecklistAnswer {
            item: String::from("brakes"),
            value: String::from("ok"),
        }],
        comments: String::from("No issues found"),
        report_reference: None,
    }
}

pub fn empty_checklist() -> ChecklistReport {
    ChecklistReport {
        answers: Vec::new(),
        comments: String::new(),
        report_reference: None,
    }
}

/// A pending inspection inviting `MECHANIC`.
pub fn pending_inspection() -> Inspection {
    Inspection::new_pending(
        InspectionId(100),
        REQUESTER,
        Some(MECHANIC),
        VehicleRef::Publication(PublicationId(50)),
        BRANCH,
        MONDAY,
        slot("10:00"),
    )
}

/// An inspection forced into an arbitrary status, with the fields the
/// status implies (assigned mechanic outside `Pending`, completion data
/// for `Finalized`).
pub fn inspection_in(status: InspectionStatus) -> Inspection {
    let mut inspection: Inspection = pending_inspection();
    inspection.status = status;
    if status != InspectionStatus::Pending {
        inspection.mechanic_id = Some(MECHANIC);
    }
    if status == InspectionStatus::Finalized {
        inspection.checklist = Some(checklist());
        inspection.completed_at = Some(String::from(OCCURRED_AT));
    }
    inspection
}
