// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the booking flow: claim, create, compensate.

use std::sync::Arc;
use std::thread;

use revisa_domain::{BranchId, UserId};
use revisa_store::ReservationKey;

use time::{Duration, OffsetDateTime};

use crate::error::ApiError;
use crate::handlers::{compute_available_slots, create_inspection, transition_inspection};
use crate::request_response::{
    AvailableSlotsRequest, CreateInspectionRequest, TransitionInspectionRequest,
};
use crate::tests::helpers::{
    BRANCH, FailingRepository, MECHANIC, MONDAY, REQUESTER, TestHarness, confirmed_booking,
    harness, harness_with_repository, open_booking, slot, transition,
};

#[test]
fn test_pre_accepted_booking_starts_confirmed() {
    let harness: TestHarness = harness();

    let response = create_inspection(&harness.coordinator, confirmed_booking()).unwrap();

    assert_eq!(response.inspection.status, "confirmed");
    assert_eq!(response.inspection.mechanic_id, Some(MECHANIC));
    assert_eq!(response.inspection.slot, "10:00");
    assert_eq!(response.inspection.publication_id, Some(50));
    assert_eq!(response.inspection.vehicle_id, None);
}

#[test]
fn test_open_booking_starts_pending() {
    let harness: TestHarness = harness();

    let response = create_inspection(&harness.coordinator, open_booking()).unwrap();

    assert_eq!(response.inspection.status, "pending");
    assert_eq!(response.inspection.mechanic_id, None);
    assert_eq!(response.inspection.vehicle_id, Some(7));
}

#[test]
fn test_booking_requires_exactly_one_vehicle_reference() {
    let harness: TestHarness = harness();

    let mut both: CreateInspectionRequest = confirmed_booking();
    both.vehicle_id = Some(7);
    let result = create_inspection(&harness.coordinator, both);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "vehicle"));

    let mut neither: CreateInspectionRequest = confirmed_booking();
    neither.publication_id = None;
    let result = create_inspection(&harness.coordinator, neither);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "vehicle"));
}

#[test]
fn test_pre_accepted_booking_requires_a_mechanic() {
    let harness: TestHarness = harness();

    let mut request: CreateInspectionRequest = confirmed_booking();
    request.mechanic_id = None;

    let result = create_inspection(&harness.coordinator, request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "mechanic_accepted"
    ));
}

#[test]
fn test_slot_outside_schedule_is_unavailable() {
    let harness: TestHarness = harness();

    // 09:00 is a branch slot but not in the mechanic's availability
    let mut request: CreateInspectionRequest = confirmed_booking();
    request.slot = String::from("09:00");

    let result = create_inspection(&harness.coordinator, request);
    assert!(matches!(result, Err(ApiError::SlotUnavailable { .. })));
}

#[test]
fn test_double_booking_same_tuple_fails() {
    let harness: TestHarness = harness();

    create_inspection(&harness.coordinator, confirmed_booking()).unwrap();
    let result = create_inspection(&harness.coordinator, confirmed_booking());

    assert!(matches!(result, Err(ApiError::SlotUnavailable { .. })));
}

#[test]
fn test_booked_slot_disappears_from_booking_availability() {
    let harness: TestHarness = harness();

    create_inspection(&harness.coordinator, confirmed_booking()).unwrap();

    let response = compute_available_slots(
        &harness.coordinator,
        &AvailableSlotsRequest {
            date: MONDAY,
            branch_id: BRANCH,
            mechanic_id: Some(MECHANIC),
            mode: String::from("booking"),
        },
    )
    .unwrap();

    assert_eq!(response.slots, vec![String::from("14:00")]);
}

#[test]
fn test_concurrent_bookings_have_exactly_one_winner() {
    let harness: Arc<TestHarness> = Arc::new(harness());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let harness: Arc<TestHarness> = Arc::clone(&harness);
            thread::spawn(move || create_inspection(&harness.coordinator, confirmed_booking()))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let won: usize = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(won, 1);
    assert!(
        results
            .iter()
            .filter(|result| result.is_err())
            .all(|result| matches!(result, Err(ApiError::SlotUnavailable { .. })))
    );
}

#[test]
fn test_failed_creation_releases_the_reservation() {
    let harness: TestHarness = harness_with_repository(Arc::new(FailingRepository));

    let result = create_inspection(&harness.coordinator, confirmed_booking());
    assert!(result.is_err());

    let key: ReservationKey = ReservationKey {
        branch_id: BranchId(BRANCH),
        mechanic_id: Some(UserId(MECHANIC)),
        date: MONDAY,
        slot: slot("10:00"),
    };
    assert!(!harness.reservations.is_claimed(&key));

    // Nothing was created, so nothing was announced
    assert!(harness.dispatcher.dispatched().is_empty());
}

#[test]
fn test_sweep_leaves_booked_slot_claimed() {
    let harness: TestHarness = harness();

    create_inspection(&harness.coordinator, confirmed_booking()).unwrap();

    // Well past the TTL; only unconverted claims may expire
    let expired: usize = harness.reservations.sweep_expired(
        OffsetDateTime::now_utc() + Duration::minutes(6),
        Duration::minutes(5),
    );
    assert_eq!(expired, 0);

    let result = create_inspection(&harness.coordinator, confirmed_booking());
    assert!(matches!(result, Err(ApiError::SlotUnavailable { .. })));
}

#[test]
fn test_cancelled_booking_returns_slot_to_pool() {
    let harness: TestHarness = harness();

    let booked = create_inspection(&harness.coordinator, confirmed_booking()).unwrap();

    let mut cancel: TransitionInspectionRequest = transition(REQUESTER, "requester", "cancel");
    cancel.reason = Some(String::from("requester_cancelled"));
    transition_inspection(&harness.coordinator, booked.inspection.inspection_id, cancel).unwrap();

    let rebooked = create_inspection(&harness.coordinator, confirmed_booking()).unwrap();
    assert_eq!(rebooked.inspection.status, "confirmed");
}

#[test]
fn test_successful_booking_dispatches_created_event() {
    let harness: TestHarness = harness();

    let response = create_inspection(&harness.coordinator, confirmed_booking()).unwrap();

    let events = harness.dispatcher.dispatched();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind.as_str(), "inspection_created");
    assert_eq!(
        events[0].inspection_id.value(),
        response.inspection.inspection_id
    );
    assert_eq!(events[0].recipients, vec![UserId(MECHANIC)]);
}
