// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle events and the notification dispatch seam.
//!
//! Every successful inspection transition produces exactly one typed event.
//! The engine hands events to a [`NotificationDispatcher`] fire-and-forget;
//! delivery guarantees are the dispatcher's concern, not the engine's.
//! Unread/pending counts are a pull-based query against the dispatcher,
//! never engine state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use revisa_domain::{ActorRole, CancellationReason, InspectionId, InspectionStatus, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// The kind of lifecycle event, with stable wire strings.
///
/// The strings are part of the external dispatcher's contract and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An inspection was created.
    InspectionCreated,
    /// The invited mechanic accepted.
    InspectionAccepted,
    /// The invited mechanic declined.
    InspectionRejected,
    /// The on-site phase started.
    InspectionStarted,
    /// The inspection was completed.
    InspectionCompleted,
    /// Cancelled by a branch admin.
    InspectionCancelledByAdmin,
    /// Cancelled by the listing owner.
    InspectionCancelledByOwner,
    /// Cancelled by the requester.
    InspectionCancelledByRequester,
    /// Cancelled by the assigned mechanic.
    InspectionCancelledByMechanic,
    /// A rating was submitted for a finalized inspection.
    InspectionRatingSubmitted,
}

impl EventKind {
    /// Returns the stable wire string for this event kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InspectionCreated => "inspection_created",
            Self::InspectionAccepted => "inspection_accepted",
            Self::InspectionRejected => "inspection_rejected",
            Self::InspectionStarted => "inspection_started",
            Self::InspectionCompleted => "inspection_completed",
            Self::InspectionCancelledByAdmin => "inspection_cancelled_by_admin",
            Self::InspectionCancelledByOwner => "inspection_cancelled_by_owner",
            Self::InspectionCancelledByRequester => "inspection_cancelled_by_requester",
            Self::InspectionCancelledByMechanic => "inspection_cancelled_by_mechanic",
            Self::InspectionRatingSubmitted => "inspection_rating_submitted",
        }
    }

    /// Returns the cancellation event kind for a reason.
    #[must_use]
    pub const fn for_cancellation(reason: CancellationReason) -> Self {
        match reason {
            CancellationReason::AdminCancelled => Self::InspectionCancelledByAdmin,
            CancellationReason::OwnerCancelled => Self::InspectionCancelledByOwner,
            CancellationReason::RequesterCancelled => Self::InspectionCancelledByRequester,
            CancellationReason::MechanicCancelled => Self::InspectionCancelledByMechanic,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The actor a lifecycle event is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventActor {
    /// The actor's user id.
    pub id: UserId,
    /// The role the actor held for the transition.
    pub role: ActorRole,
}

impl EventActor {
    /// Creates a new `EventActor`.
    #[must_use]
    pub const fn new(id: UserId, role: ActorRole) -> Self {
        Self { id, role }
    }
}

/// An immutable lifecycle event.
///
/// Events capture who acted, what happened, and the status the inspection
/// landed in. Recipients are the parties the dispatcher should notify;
/// the acting party is excluded by the producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionEvent {
    /// The inspection this event concerns.
    pub inspection_id: InspectionId,
    /// The actor the event is attributed to.
    pub actor: EventActor,
    /// The kind of event.
    pub kind: EventKind,
    /// The inspection status after the transition.
    pub status: InspectionStatus,
    /// The parties to notify.
    pub recipients: Vec<UserId>,
    /// When the event occurred (ISO 8601 UTC).
    pub occurred_at: String,
}

impl InspectionEvent {
    /// Creates a new `InspectionEvent`.
    ///
    /// Once created, an event is immutable.
    #[must_use]
    pub const fn new(
        inspection_id: InspectionId,
        actor: EventActor,
        kind: EventKind,
        status: InspectionStatus,
        recipients: Vec<UserId>,
        occurred_at: String,
    ) -> Self {
        Self {
            inspection_id,
            actor,
            kind,
            status,
            recipients,
            occurred_at,
        }
    }
}

/// Sink for lifecycle events.
///
/// Dispatch is fire-and-forget: the engine never retries and a dispatcher
/// failure must never fail the transition that produced the event.
pub trait NotificationDispatcher: Send + Sync {
    /// Accepts one lifecycle event for delivery.
    fn dispatch(&self, event: InspectionEvent);
}

/// Dispatcher that logs each event via `tracing`.
#[derive(Debug, Default)]
pub struct TracingDispatcher;

impl NotificationDispatcher for TracingDispatcher {
    fn dispatch(&self, event: InspectionEvent) {
        info!(
            inspection_id = event.inspection_id.value(),
            kind = event.kind.as_str(),
            status = event.status.as_str(),
            actor_id = event.actor.id.value(),
            "lifecycle event"
        );
    }
}

/// In-memory dispatcher retaining every event.
///
/// Backs the pull-based pending-notification query and the test suites.
/// Per-recipient read position is a watermark into the event log.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    /// All dispatched events, in dispatch order.
    events: Mutex<Vec<InspectionEvent>>,
    /// Per-recipient watermark: index of the first unseen event.
    seen: Mutex<HashMap<UserId, usize>>,
}

impl RecordingDispatcher {
    /// Creates a new empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every dispatched event.
    #[must_use]
    pub fn dispatched(&self) -> Vec<InspectionEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the events pending for a recipient, oldest first.
    #[must_use]
    pub fn pending_for(&self, recipient: UserId) -> Vec<InspectionEvent> {
        let watermark: usize = self
            .seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&recipient)
            .copied()
            .unwrap_or(0);
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .skip(watermark)
            .filter(|event| event.recipients.contains(&recipient))
            .cloned()
            .collect()
    }

    /// Returns the number of events pending for a recipient.
    #[must_use]
    pub fn pending_count_for(&self, recipient: UserId) -> usize {
        self.pending_for(recipient).len()
    }

    /// Marks everything dispatched so far as seen by a recipient.
    pub fn acknowledge(&self, recipient: UserId) {
        let len: usize = self
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(recipient, len);
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, event: InspectionEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
