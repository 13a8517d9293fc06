// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Arc;

use revisa_core::Inspection;
use revisa_domain::{
    BranchId, DaySchedule, InspectionId, TimeSlot, UserId, WeeklySchedule,
};
use revisa_events::{NotificationDispatcher, RecordingDispatcher};
use revisa_store::{
    InspectionRepository, InspectionStore, ReservationStore, ScheduleStore, StoreError,
};
use time::Date;
use time::macros::date;

use crate::coordinator::SchedulingCoordinator;
use crate::request_response::{CreateInspectionRequest, TransitionInspectionRequest};

pub const REQUESTER: i64 = 1;
pub const MECHANIC: i64 = 100;
pub const ADMIN: i64 = 500;
pub const BRANCH: i64 = 1;
// 2024-06-10 is a Monday
pub const MONDAY: Date = date!(2024 - 06 - 10);

/// A coordinator wired to in-memory stores, with handles kept for
/// inspecting side effects.
pub struct TestHarness {
    pub coordinator: SchedulingCoordinator,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub reservations: Arc<ReservationStore>,
}

pub fn slot(value: &str) -> TimeSlot {
    TimeSlot::new(value).unwrap()
}

fn monday_schedule(slots: &[&str]) -> WeeklySchedule {
    let mut schedule: WeeklySchedule = WeeklySchedule::new();
    let entry: DaySchedule = DaySchedule::with_slots(true, slots.iter().copied().map(slot));
    schedule.set_day(1, entry).unwrap();
    schedule
}

/// Builds a harness with branch 1 open Monday 09:00/10:00/14:00 and
/// mechanic 100 available Monday 10:00/14:00.
pub fn harness() -> TestHarness {
    harness_with_repository(Arc::new(InspectionStore::new()))
}

pub fn harness_with_repository(repository: Arc<dyn InspectionRepository>) -> TestHarness {
    let schedules: Arc<ScheduleStore> = Arc::new(ScheduleStore::new());
    schedules.put_branch_schedule(BranchId(BRANCH), monday_schedule(&["09:00", "10:00", "14:00"]));
    schedules.put_mechanic_schedule(UserId(MECHANIC), monday_schedule(&["10:00", "14:00"]));

    let reservations: Arc<ReservationStore> = Arc::new(ReservationStore::new());
    let dispatcher: Arc<RecordingDispatcher> = Arc::new(RecordingDispatcher::new());
    let sink: Arc<dyn NotificationDispatcher> = Arc::<RecordingDispatcher>::clone(&dispatcher);
    let coordinator: SchedulingCoordinator =
        SchedulingCoordinator::new(schedules, Arc::clone(&reservations), repository, sink);

    TestHarness {
        coordinator,
        dispatcher,
        reservations,
    }
}

/// A repository whose `insert` always fails, for exercising the
/// compensating release path.
#[derive(Debug, Default)]
pub struct FailingRepository;

impl InspectionRepository for FailingRepository {
    fn next_id(&self) -> InspectionId {
        InspectionId(1)
    }

    fn insert(&self, _inspection: Inspection) -> Result<Inspection, StoreError> {
        Err(StoreError::NotFound(String::from("Backing storage")))
    }

    fn get(&self, inspection_id: InspectionId) -> Result<Inspection, StoreError> {
        Err(StoreError::NotFound(format!("Inspection {inspection_id}")))
    }

    fn update(&self, _updated: Inspection) -> Result<Inspection, StoreError> {
        Err(StoreError::NotFound(String::from("Backing storage")))
    }

    fn list_for_requester(&self, _requester_id: UserId) -> Vec<Inspection> {
        Vec::new()
    }

    fn list_for_mechanic(&self, _mechanic_id: UserId) -> Vec<Inspection> {
        Vec::new()
    }
}

/// A booking request for branch 1, Monday 10:00, pre-accepted by
/// mechanic 100.
pub fn confirmed_booking() -> CreateInspectionRequest {
    CreateInspectionRequest {
        requester_id: REQUESTER,
        branch_id: BRANCH,
        mechanic_id: Some(MECHANIC),
        mechanic_accepted: true,
        date: MONDAY,
        slot: String::from("10:00"),
        publication_id: Some(50),
        vehicle_id: None,
    }
}

/// A standalone booking request with no mechanic chosen yet.
pub fn open_booking() -> CreateInspectionRequest {
    CreateInspectionRequest {
        requester_id: REQUESTER,
        branch_id: BRANCH,
        mechanic_id: None,
        mechanic_accepted: false,
        date: MONDAY,
        slot: String::from("09:00"),
        publication_id: None,
        vehicle_id: Some(7),
    }
}

/// A transition request with empty payload fields.
pub fn transition(actor_id: i64, actor_role: &str, action: &str) -> TransitionInspectionRequest {
    TransitionInspectionRequest {
        actor_id,
        actor_role: String::from(actor_role),
        action: String::from(action),
        reason: None,
        observation: None,
        rating: None,
        checklist_answers: None,
        checklist_comments: None,
        report_reference: None,
    }
}
