// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers translate DTOs into domain types, delegate to the
//! coordinator, and translate errors to the API contract. They never
//! encode lifecycle or availability rules themselves.

use std::str::FromStr;

use revisa_core::{ActorContext, AvailabilityMode, Inspection, InspectionCommand};
use revisa_domain::{
    ActorRole, BranchId, CancellationReason, ChecklistAnswer, ChecklistReport, InspectionId,
    PublicationId, Rating, TimeSlot, UserId, VehicleId, VehicleRef, WeeklySchedule,
};
use revisa_events::{InspectionEvent, RecordingDispatcher};

use crate::coordinator::{BookingRequest, SchedulingCoordinator};
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    AvailableSlotsRequest, AvailableSlotsResponse, BranchScheduleResponse,
    CreateInspectionRequest, CreateInspectionResponse, GetInspectionResponse, InspectionInfo,
    ListInspectionsResponse, MechanicScheduleResponse, NotificationInfo,
    PendingNotificationsResponse, PutBranchScheduleRequest, PutMechanicScheduleRequest,
    PutScheduleResponse, TransitionInspectionRequest, TransitionInspectionResponse,
};

/// Returns a branch's weekly operating schedule.
///
/// # Errors
///
/// Returns an error if no schedule is stored for the branch.
pub fn get_branch_schedule(
    coordinator: &SchedulingCoordinator,
    branch_id: i64,
) -> Result<BranchScheduleResponse, ApiError> {
    let schedule: WeeklySchedule = coordinator
        .branch_schedule(BranchId(branch_id))
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Branch schedule"),
            message: format!("No schedule stored for branch {branch_id}"),
        })?;

    Ok(BranchScheduleResponse {
        branch_id,
        schedule,
    })
}

/// Replaces a branch's weekly operating schedule.
#[must_use]
pub fn put_branch_schedule(
    coordinator: &SchedulingCoordinator,
    branch_id: i64,
    request: PutBranchScheduleRequest,
) -> PutScheduleResponse {
    coordinator.put_branch_schedule(BranchId(branch_id), request.schedule);

    PutScheduleResponse {
        message: format!("Schedule for branch {branch_id} replaced"),
    }
}

/// Returns a mechanic's weekly availability.
///
/// # Errors
///
/// Returns an error if no schedule is stored for the mechanic.
pub fn get_mechanic_schedule(
    coordinator: &SchedulingCoordinator,
    mechanic_id: i64,
) -> Result<MechanicScheduleResponse, ApiError> {
    let schedule: WeeklySchedule = coordinator
        .mechanic_schedule(UserId(mechanic_id))
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Mechanic schedule"),
            message: format!("No schedule stored for mechanic {mechanic_id}"),
        })?;

    Ok(MechanicScheduleResponse {
        mechanic_id,
        schedule,
    })
}

/// Replaces a mechanic's weekly availability.
///
/// This is a full replace. Slots outside the branch's current hours are
/// accepted; booking-mode availability filters them out later.
#[must_use]
pub fn put_mechanic_schedule(
    coordinator: &SchedulingCoordinator,
    mechanic_id: i64,
    request: PutMechanicScheduleRequest,
) -> PutScheduleResponse {
    coordinator.put_mechanic_schedule(UserId(mechanic_id), request.schedule);

    PutScheduleResponse {
        message: format!("Schedule for mechanic {mechanic_id} replaced"),
    }
}

/// Computes the available slots for a date.
///
/// # Errors
///
/// Returns an error if the mode is not `display` or `booking`.
pub fn compute_available_slots(
    coordinator: &SchedulingCoordinator,
    request: &AvailableSlotsRequest,
) -> Result<AvailableSlotsResponse, ApiError> {
    let mode: AvailabilityMode = match request.mode.as_str() {
        "display" => AvailabilityMode::Display,
        "booking" => AvailabilityMode::Booking,
        other => {
            return Err(ApiError::InvalidInput {
                field: String::from("mode"),
                message: format!("Unknown availability mode '{other}'"),
            });
        }
    };

    let slots: Vec<TimeSlot> = coordinator.available_slots(
        request.date,
        BranchId(request.branch_id),
        request.mechanic_id.map(UserId),
        mode,
    );

    Ok(AvailableSlotsResponse {
        date: request.date,
        slots: slots.iter().map(|slot| slot.value().to_string()).collect(),
    })
}

/// Books an inspection.
///
/// This function:
/// - Validates the vehicle reference (exactly one of listing or vehicle)
/// - Translates the request into domain types
/// - Claims the slot and creates the inspection via the coordinator
///
/// # Errors
///
/// Returns an error if:
/// - The request is malformed
/// - The slot is not bookable or already claimed (`SlotUnavailable`)
pub fn create_inspection(
    coordinator: &SchedulingCoordinator,
    request: CreateInspectionRequest,
) -> Result<CreateInspectionResponse, ApiError> {
    let vehicle: VehicleRef = match (request.publication_id, request.vehicle_id) {
        (Some(publication_id), None) => VehicleRef::Publication(PublicationId(publication_id)),
        (None, Some(vehicle_id)) => VehicleRef::Standalone(VehicleId(vehicle_id)),
        _ => {
            return Err(ApiError::InvalidInput {
                field: String::from("vehicle"),
                message: String::from(
                    "Exactly one of publication_id and vehicle_id must be set",
                ),
            });
        }
    };

    if request.mechanic_accepted && request.mechanic_id.is_none() {
        return Err(ApiError::InvalidInput {
            field: String::from("mechanic_accepted"),
            message: String::from("A pre-accepted booking requires a mechanic"),
        });
    }

    let slot: TimeSlot = TimeSlot::new(&request.slot).map_err(translate_domain_error)?;

    let booking: BookingRequest = BookingRequest {
        requester_id: UserId(request.requester_id),
        branch_id: BranchId(request.branch_id),
        mechanic_id: request.mechanic_id.map(UserId),
        mechanic_accepted: request.mechanic_accepted,
        date: request.date,
        slot,
        vehicle,
    };

    let inspection: Inspection = coordinator.book_inspection(booking)?;
    let message: String = format!(
        "Inspection {} booked for {} at {}",
        inspection.inspection_id, inspection.scheduled_date, inspection.slot
    );

    Ok(CreateInspectionResponse {
        inspection: inspection_info(&inspection),
        message,
    })
}

/// Applies a lifecycle action to an inspection.
///
/// # Errors
///
/// Returns an error if:
/// - The action or its payload is malformed
/// - The inspection does not exist
/// - The transition is not legal or not permitted
/// - The update lost an optimistic-concurrency race
pub fn transition_inspection(
    coordinator: &SchedulingCoordinator,
    inspection_id: i64,
    request: TransitionInspectionRequest,
) -> Result<TransitionInspectionResponse, ApiError> {
    let role: ActorRole =
        ActorRole::from_str(&request.actor_role).map_err(translate_domain_error)?;
    let actor: ActorContext = ActorContext::new(UserId(request.actor_id), role);
    let command: InspectionCommand = parse_command(request)?;

    let (inspection, event): (Inspection, InspectionEvent) =
        coordinator.transition_inspection(InspectionId(inspection_id), &actor, command)?;
    let message: String = format!(
        "Inspection {} is now '{}'",
        inspection.inspection_id,
        inspection.status.as_str()
    );

    Ok(TransitionInspectionResponse {
        inspection: inspection_info(&inspection),
        event: event.kind.as_str().to_string(),
        message,
    })
}

/// Returns an inspection by id.
///
/// # Errors
///
/// Returns an error if the inspection does not exist.
pub fn get_inspection(
    coordinator: &SchedulingCoordinator,
    inspection_id: i64,
) -> Result<GetInspectionResponse, ApiError> {
    let inspection: Inspection = coordinator.get_inspection(InspectionId(inspection_id))?;

    Ok(GetInspectionResponse {
        inspection: inspection_info(&inspection),
    })
}

/// Lists the inspections a requester created.
///
/// This is a read-only operation; an unknown requester yields an empty
/// list, never an error.
#[must_use]
pub fn list_inspections_for_requester(
    coordinator: &SchedulingCoordinator,
    requester_id: i64,
) -> ListInspectionsResponse {
    let inspections: Vec<InspectionInfo> = coordinator
        .inspections_for_requester(UserId(requester_id))
        .iter()
        .map(inspection_info)
        .collect();

    ListInspectionsResponse { inspections }
}

/// Lists the inspections assigned to a mechanic.
///
/// This is a read-only operation; an unknown mechanic yields an empty
/// list, never an error.
#[must_use]
pub fn list_inspections_for_mechanic(
    coordinator: &SchedulingCoordinator,
    mechanic_id: i64,
) -> ListInspectionsResponse {
    let inspections: Vec<InspectionInfo> = coordinator
        .inspections_for_mechanic(UserId(mechanic_id))
        .iter()
        .map(inspection_info)
        .collect();

    ListInspectionsResponse { inspections }
}

/// Returns the notifications pending for a recipient, oldest first.
///
/// Pull-based: pending state lives in the dispatcher, never in the
/// engine.
#[must_use]
pub fn pending_notifications(
    dispatcher: &RecordingDispatcher,
    recipient_id: i64,
) -> PendingNotificationsResponse {
    let notifications: Vec<NotificationInfo> = dispatcher
        .pending_for(UserId(recipient_id))
        .into_iter()
        .map(|event| NotificationInfo {
            inspection_id: event.inspection_id.value(),
            kind: event.kind.as_str().to_string(),
            status: event.status.as_str().to_string(),
            occurred_at: event.occurred_at,
        })
        .collect();

    PendingNotificationsResponse {
        recipient_id,
        count: notifications.len(),
        notifications,
    }
}

/// Marks everything dispatched so far as seen by a recipient.
pub fn acknowledge_notifications(dispatcher: &RecordingDispatcher, recipient_id: i64) {
    dispatcher.acknowledge(UserId(recipient_id));
}

/// Translates a transition request's action and payload into a command.
fn parse_command(request: TransitionInspectionRequest) -> Result<InspectionCommand, ApiError> {
    match request.action.as_str() {
        "accept" => Ok(InspectionCommand::Accept),
        "reject" => Ok(InspectionCommand::Reject {
            reason: request.observation,
        }),
        "start" => Ok(InspectionCommand::Start),
        "complete" => {
            let answers: Vec<ChecklistAnswer> = request
                .checklist_answers
                .ok_or_else(|| ApiError::InvalidInput {
                    field: String::from("checklist_answers"),
                    message: String::from("Completing an inspection requires checklist answers"),
                })?
                .into_iter()
                .map(|answer| ChecklistAnswer {
                    item: answer.item,
                    value: answer.value,
                })
                .collect();

            Ok(InspectionCommand::Complete {
                checklist: ChecklistReport {
                    answers,
                    comments: request.checklist_comments.unwrap_or_default(),
                    report_reference: request.report_reference,
                },
            })
        }
        "cancel" => {
            let reason_str: String = request.reason.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("reason"),
                message: String::from("Cancelling requires a cancellation reason"),
            })?;
            let reason: CancellationReason =
                CancellationReason::from_str(&reason_str).map_err(translate_domain_error)?;

            Ok(InspectionCommand::Cancel {
                reason,
                observation: request.observation,
            })
        }
        "rate" => {
            let value: u8 = request.rating.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("rating"),
                message: String::from("Rating requires a value"),
            })?;
            let rating: Rating = Rating::new(value).map_err(translate_domain_error)?;

            Ok(InspectionCommand::Rate { rating })
        }
        other => Err(ApiError::InvalidInput {
            field: String::from("action"),
            message: format!("Unknown action '{other}'"),
        }),
    }
}

/// Builds the inspection DTO from the domain entity.
fn inspection_info(inspection: &Inspection) -> InspectionInfo {
    let (publication_id, vehicle_id): (Option<i64>, Option<i64>) = match inspection.vehicle {
        VehicleRef::Publication(id) => (Some(id.0), None),
        VehicleRef::Standalone(id) => (None, Some(id.0)),
    };

    InspectionInfo {
        inspection_id: inspection.inspection_id.value(),
        requester_id: inspection.requester_id.value(),
        mechanic_id: inspection.mechanic_id.map(UserId::value),
        branch_id: inspection.branch_id.value(),
        publication_id,
        vehicle_id,
        scheduled_date: inspection.scheduled_date,
        slot: inspection.slot.value().to_string(),
        status: inspection.status.as_str().to_string(),
        payment_status: inspection.payment_status.as_str().to_string(),
        observation: inspection.observation.clone(),
        cancellation_reason: inspection
            .cancellation_reason
            .map(|reason| reason.as_str().to_string()),
        rating: inspection.rating.map(|rating| rating.value()),
        completed_at: inspection.completed_at.clone(),
        version: inspection.version,
    }
}
