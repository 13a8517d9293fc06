// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The scheduling coordinator.
//!
//! Orchestrates the stores and the state machine: slot availability,
//! atomic booking with a compensating release, and transitions with
//! optimistic-concurrency updates. Every successful mutation dispatches
//! exactly one lifecycle event, fire-and-forget.

use crate::error::{ApiError, translate_core_error, translate_store_error};
use revisa_core::{
    ActorContext, AvailabilityMode, Inspection, InspectionCommand, TransitionOutcome, apply,
    compute_slots, created_event,
};
use revisa_domain::{
    ActorRole, BranchId, InspectionId, TimeSlot, UserId, VehicleRef, WeeklySchedule,
};
use revisa_events::{InspectionEvent, NotificationDispatcher};
use revisa_store::{InspectionRepository, ReservationKey, ReservationStore, ScheduleStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

/// A booking request, already translated into domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// The requesting user.
    pub requester_id: UserId,
    /// The branch the inspection takes place at.
    pub branch_id: BranchId,
    /// The mechanic, if one was chosen at booking time.
    pub mechanic_id: Option<UserId>,
    /// Whether the mechanic already accepted out of band.
    pub mechanic_accepted: bool,
    /// The scheduled date.
    pub date: Date,
    /// The scheduled slot.
    pub slot: TimeSlot,
    /// The vehicle under inspection.
    pub vehicle: VehicleRef,
}

/// Coordinates schedules, reservations, inspections, and dispatch.
pub struct SchedulingCoordinator {
    schedules: Arc<ScheduleStore>,
    reservations: Arc<ReservationStore>,
    inspections: Arc<dyn InspectionRepository>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl SchedulingCoordinator {
    /// Creates a new coordinator over the given stores and dispatcher.
    #[must_use]
    pub fn new(
        schedules: Arc<ScheduleStore>,
        reservations: Arc<ReservationStore>,
        inspections: Arc<dyn InspectionRepository>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            schedules,
            reservations,
            inspections,
            dispatcher,
        }
    }

    /// Returns a branch's weekly schedule.
    #[must_use]
    pub fn branch_schedule(&self, branch_id: BranchId) -> Option<WeeklySchedule> {
        self.schedules.branch_schedule(branch_id)
    }

    /// Replaces a branch's weekly schedule.
    pub fn put_branch_schedule(&self, branch_id: BranchId, schedule: WeeklySchedule) {
        self.schedules.put_branch_schedule(branch_id, schedule);
        info!(branch_id = branch_id.value(), "branch schedule replaced");
    }

    /// Returns a mechanic's weekly availability.
    #[must_use]
    pub fn mechanic_schedule(&self, mechanic_id: UserId) -> Option<WeeklySchedule> {
        self.schedules.mechanic_schedule(mechanic_id)
    }

    /// Replaces a mechanic's weekly availability.
    pub fn put_mechanic_schedule(&self, mechanic_id: UserId, schedule: WeeklySchedule) {
        self.schedules.put_mechanic_schedule(mechanic_id, schedule);
        info!(
            mechanic_id = mechanic_id.value(),
            "mechanic schedule replaced"
        );
    }

    /// Computes the available slots for a date, sorted ascending.
    ///
    /// A branch or mechanic with no stored schedule contributes nothing;
    /// this is never an error.
    #[must_use]
    pub fn available_slots(
        &self,
        date: Date,
        branch_id: BranchId,
        mechanic_id: Option<UserId>,
        mode: AvailabilityMode,
    ) -> Vec<TimeSlot> {
        let branch: WeeklySchedule = self
            .schedules
            .branch_schedule(branch_id)
            .unwrap_or_default();
        let mechanic: Option<WeeklySchedule> =
            mechanic_id.and_then(|id| self.schedules.mechanic_schedule(id));
        let reserved: BTreeSet<TimeSlot> =
            self.reservations.reserved_slots(branch_id, mechanic_id, date);

        compute_slots(date, &branch, mechanic.as_ref(), mode, &reserved)
    }

    /// Books an inspection for a slot.
    ///
    /// The slot is claimed first via a conditional insert; losing the race
    /// fails with `SlotUnavailable` and the caller should re-query. If
    /// creation fails after the claim, the claim is released so the slot
    /// returns to the pool. A successful creation marks the claim
    /// consumed; the slot stays blocked until the inspection reaches a
    /// terminal status.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The slot is not bookable or already claimed (`SlotUnavailable`)
    /// - The inspection cannot be stored
    pub fn book_inspection(&self, request: BookingRequest) -> Result<Inspection, ApiError> {
        let bookable: Vec<TimeSlot> = self.available_slots(
            request.date,
            request.branch_id,
            request.mechanic_id,
            AvailabilityMode::Booking,
        );
        if !bookable.contains(&request.slot) {
            return Err(ApiError::SlotUnavailable {
                branch_id: request.branch_id.value(),
                date: request.date,
                slot: request.slot.value().to_string(),
            });
        }

        let key: ReservationKey = ReservationKey {
            branch_id: request.branch_id,
            mechanic_id: request.mechanic_id,
            date: request.date,
            slot: request.slot.clone(),
        };
        self.reservations
            .claim(key.clone(), OffsetDateTime::now_utc())
            .map_err(translate_store_error)?;

        let inspection: Inspection = match (request.mechanic_accepted, request.mechanic_id) {
            (true, Some(mechanic_id)) => Inspection::new_confirmed(
                self.inspections.next_id(),
                request.requester_id,
                mechanic_id,
                request.vehicle,
                request.branch_id,
                request.date,
                request.slot,
            ),
            _ => Inspection::new_pending(
                self.inspections.next_id(),
                request.requester_id,
                request.mechanic_id,
                request.vehicle,
                request.branch_id,
                request.date,
                request.slot,
            ),
        };

        let stored: Inspection = match self.inspections.insert(inspection) {
            Ok(stored) => stored,
            Err(err) => {
                // Compensating action: the claim must not outlive the
                // failed creation.
                self.reservations.release(&key);
                warn!(
                    branch_id = request.branch_id.value(),
                    slot = key.slot.value(),
                    error = %err,
                    "released reservation after failed inspection creation"
                );
                return Err(translate_store_error(err));
            }
        };
        // The claim now backs a real inspection; exempt it from TTL
        // expiry until the inspection reaches a terminal status.
        self.reservations.consume(&key, stored.inspection_id);

        let actor: ActorContext = ActorContext::new(stored.requester_id, ActorRole::Requester);
        let event: InspectionEvent = created_event(&stored, &actor, &Self::now_iso());
        self.dispatcher.dispatch(event);

        info!(
            inspection_id = stored.inspection_id.value(),
            branch_id = stored.branch_id.value(),
            slot = stored.slot.value(),
            status = stored.status.as_str(),
            "inspection booked"
        );
        Ok(stored)
    }

    /// Applies a lifecycle command to an inspection.
    ///
    /// The inspection is re-read, the command applied purely, and the
    /// result written back under a version check. A concurrent writer
    /// surfaces as `Conflict`; the caller re-reads and retries. A
    /// transition into a terminal status returns the booked slot to the
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The inspection does not exist
    /// - The transition is not legal or not permitted
    /// - The update lost an optimistic-concurrency race
    pub fn transition_inspection(
        &self,
        inspection_id: InspectionId,
        actor: &ActorContext,
        command: InspectionCommand,
    ) -> Result<(Inspection, InspectionEvent), ApiError> {
        let current: Inspection = self
            .inspections
            .get(inspection_id)
            .map_err(translate_store_error)?;

        let action: &'static str = command.action_name();
        let outcome: TransitionOutcome =
            apply(&current, command, actor, &Self::now_iso()).map_err(translate_core_error)?;

        let stored: Inspection = self
            .inspections
            .update(outcome.inspection)
            .map_err(translate_store_error)?;

        if stored.status.is_terminal()
            && self.reservations.release_for_inspection(stored.inspection_id)
        {
            debug!(
                inspection_id = stored.inspection_id.value(),
                slot = stored.slot.value(),
                "released reservation of terminal inspection"
            );
        }

        self.dispatcher.dispatch(outcome.event.clone());
        info!(
            inspection_id = stored.inspection_id.value(),
            action,
            status = stored.status.as_str(),
            "inspection transitioned"
        );
        Ok((stored, outcome.event))
    }

    /// Returns an inspection by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the inspection does not exist.
    pub fn get_inspection(&self, inspection_id: InspectionId) -> Result<Inspection, ApiError> {
        self.inspections
            .get(inspection_id)
            .map_err(translate_store_error)
    }

    /// Lists the inspections a requester created, in id order.
    #[must_use]
    pub fn inspections_for_requester(&self, requester_id: UserId) -> Vec<Inspection> {
        self.inspections.list_for_requester(requester_id)
    }

    /// Lists the inspections assigned to a mechanic, in id order.
    #[must_use]
    pub fn inspections_for_mechanic(&self, mechanic_id: UserId) -> Vec<Inspection> {
        self.inspections.list_for_mechanic(mechanic_id)
    }

    /// Current wall-clock time as an ISO 8601 UTC string.
    fn now_iso() -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
    }
}
