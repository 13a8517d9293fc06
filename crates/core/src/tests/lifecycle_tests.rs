// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Full-lifecycle and rating-guard tests.

use super::helpers::{
    MECHANIC, OCCURRED_AT, checklist, inspection_in, mechanic_actor, pending_inspection,
    requester_actor,
};
use crate::{CoreError, InspectionCommand, apply, created_event};
use revisa_domain::{InspectionStatus, Rating};

#[test]
fn test_created_event_carries_creation_kind_and_status() {
    let inspection = pending_inspection();
    let event = created_event(&inspection, &requester_actor(), OCCURRED_AT);

    assert_eq!(event.kind.as_str(), "inspection_created");
    assert_eq!(event.status, InspectionStatus::Pending);
    assert_eq!(event.inspection_id, inspection.inspection_id);
    // The invited mechanic is notified, the requester is not
    assert_eq!(event.recipients, vec![MECHANIC]);
}

#[test]
fn test_full_lifecycle_confirmed_to_rated() {
    let inspection = inspection_in(InspectionStatus::Confirmed);

    let started = apply(
        &inspection,
        InspectionCommand::Start,
        &mechanic_actor(),
        OCCURRED_AT,
    )
    .unwrap();
    assert_eq!(started.inspection.status, InspectionStatus::OnSite);

    let completed = apply(
        &started.inspection,
        InspectionCommand::Complete {
            checklist: checklist(),
        },
        &mechanic_actor(),
        OCCURRED_AT,
    )
    .unwrap();
    assert_eq!(completed.inspection.status, InspectionStatus::Finalized);

    let rated = apply(
        &completed.inspection,
        InspectionCommand::Rate {
            rating: Rating::new(5).unwrap(),
        },
        &requester_actor(),
        OCCURRED_AT,
    )
    .unwrap();
    assert_eq!(rated.inspection.status, InspectionStatus::Finalized);
    assert_eq!(rated.inspection.rating.map(|r| r.value()), Some(5));
    assert_eq!(rated.event.kind.as_str(), "inspection_rating_submitted");
}

#[test]
fn test_rating_is_set_exactly_once() {
    let finalized = inspection_in(InspectionStatus::Finalized);

    let first = apply(
        &finalized,
        InspectionCommand::Rate {
            rating: Rating::new(4).unwrap(),
        },
        &requester_actor(),
        OCCURRED_AT,
    )
    .unwrap();
    assert_eq!(first.inspection.rating.map(|r| r.value()), Some(4));

    let second = apply(
        &first.inspection,
        InspectionCommand::Rate {
            rating: Rating::new(1).unwrap(),
        },
        &requester_actor(),
        OCCURRED_AT,
    );
    assert_eq!(second, Err(CoreError::AlreadyRated));
    // The stored rating never changes after the first successful call
    assert_eq!(first.inspection.rating.map(|r| r.value()), Some(4));
}

#[test]
fn test_rate_before_finalized_is_invalid_transition() {
    let inspection = inspection_in(InspectionStatus::OnSite);
    let result = apply(
        &inspection,
        InspectionCommand::Rate {
            rating: Rating::new(3).unwrap(),
        },
        &requester_actor(),
        OCCURRED_AT,
    );

    assert!(matches!(
        result,
        Err(CoreError::InvalidTransition {
            from: InspectionStatus::OnSite,
            ..
        })
    ));
}

#[test]
fn test_terminal_states_admit_no_lifecycle_actions() {
    for status in [
        InspectionStatus::Postponed,
        InspectionStatus::Cancelled,
        InspectionStatus::Rejected,
    ] {
        let inspection = inspection_in(status);
        let result = apply(
            &inspection,
            InspectionCommand::Start,
            &mechanic_actor(),
            OCCURRED_AT,
        );
        assert!(
            matches!(result, Err(CoreError::InvalidTransition { .. })),
            "start from {status} must fail"
        );
    }
}
