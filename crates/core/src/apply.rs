// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The inspection state machine.
//!
//! All transition rules live here, in one place. Callers submit an
//! [`InspectionCommand`] with an [`ActorContext`]; application is pure and
//! returns a new inspection value plus exactly one lifecycle event, or an
//! error that leaves the input untouched.

use crate::command::{ActorContext, InspectionCommand};
use crate::error::CoreError;
use crate::inspection::{Inspection, TransitionOutcome};
use revisa_domain::{ActorRole, CancellationReason, InspectionStatus, UserId};
use revisa_events::{EventActor, EventKind, InspectionEvent};

/// Applies a command to an inspection, producing the new inspection and
/// the lifecycle event for the dispatcher.
///
/// # Arguments
///
/// * `inspection` - The current inspection (immutable)
/// * `command` - The transition intent
/// * `actor` - The actor requesting the transition
/// * `occurred_at` - Timestamp for the emitted event (ISO 8601 UTC);
///   supplied by the caller so application stays pure
///
/// # Errors
///
/// Returns an error if:
/// - The action is not legal from the current status (`InvalidTransition`)
/// - The actor's role or identity does not permit the action (`NotPermitted`)
/// - A required payload is missing or malformed (`ValidationError`)
/// - A rating already exists (`AlreadyRated`)
pub fn apply(
    inspection: &Inspection,
    command: InspectionCommand,
    actor: &ActorContext,
    occurred_at: &str,
) -> Result<TransitionOutcome, CoreError> {
    match command {
        InspectionCommand::Accept => accept(inspection, actor, occurred_at),
        InspectionCommand::Reject { reason } => reject(inspection, actor, reason, occurred_at),
        InspectionCommand::Start => start(inspection, actor, occurred_at),
        InspectionCommand::Complete { checklist } => {
            complete(inspection, actor, checklist, occurred_at)
        }
        InspectionCommand::Cancel {
            reason,
            observation,
        } => cancel(inspection, actor, reason, observation, occurred_at),
        InspectionCommand::Rate { rating } => rate(inspection, actor, rating, occurred_at),
    }
}

/// Builds the creation event for a freshly stored inspection.
///
/// Creation is not a transition, but its event belongs to the same
/// taxonomy, so it is built here rather than at the call site.
#[must_use]
pub fn created_event(
    inspection: &Inspection,
    actor: &ActorContext,
    occurred_at: &str,
) -> InspectionEvent {
    InspectionEvent::new(
        inspection.inspection_id,
        EventActor::new(actor.actor_id, actor.role),
        EventKind::InspectionCreated,
        inspection.status,
        inspection.parties_excluding(actor.actor_id),
        occurred_at.to_string(),
    )
}

/// Invited mechanic accepts: `Pending` → `Confirmed`.
fn accept(
    inspection: &Inspection,
    actor: &ActorContext,
    occurred_at: &str,
) -> Result<TransitionOutcome, CoreError> {
    require_role(actor, ActorRole::Mechanic, "accept")?;
    require_status(inspection, &[InspectionStatus::Pending], "accept")?;
    require_invited_mechanic(inspection, actor, "accept")?;

    let mut new_inspection: Inspection = inspection.clone();
    new_inspection.status = InspectionStatus::Confirmed;
    new_inspection.mechanic_id = Some(actor.actor_id);

    Ok(outcome(
        new_inspection,
        actor,
        EventKind::InspectionAccepted,
        occurred_at,
    ))
}

/// Invited mechanic declines: `Pending` → `Rejected`.
fn reject(
    inspection: &Inspection,
    actor: &ActorContext,
    reason: Option<String>,
    occurred_at: &str,
) -> Result<TransitionOutcome, CoreError> {
    require_role(actor, ActorRole::Mechanic, "reject")?;
    require_status(inspection, &[InspectionStatus::Pending], "reject")?;
    require_invited_mechanic(inspection, actor, "reject")?;

    let mut new_inspection: Inspection = inspection.clone();
    new_inspection.status = InspectionStatus::Rejected;
    new_inspection.observation = reason;
    // A rejected invitation keeps the invited mechanic on record
    new_inspection.mechanic_id = Some(actor.actor_id);

    Ok(outcome(
        new_inspection,
        actor,
        EventKind::InspectionRejected,
        occurred_at,
    ))
}

/// Assigned mechanic starts the visit: `Confirmed` → `OnSite`.
fn start(
    inspection: &Inspection,
    actor: &ActorContext,
    occurred_at: &str,
) -> Result<TransitionOutcome, CoreError> {
    require_role(actor, ActorRole::Mechanic, "start")?;
    require_status(inspection, &[InspectionStatus::Confirmed], "start")?;
    require_assigned_mechanic(inspection, actor, "start")?;

    let mut new_inspection: Inspection = inspection.clone();
    new_inspection.status = InspectionStatus::OnSite;

    Ok(outcome(
        new_inspection,
        actor,
        EventKind::InspectionStarted,
        occurred_at,
    ))
}

/// Assigned mechanic completes the visit: `OnSite` → `Finalized`.
fn complete(
    inspection: &Inspection,
    actor: &ActorContext,
    checklist: revisa_domain::ChecklistReport,
    occurred_at: &str,
) -> Result<TransitionOutcome, CoreError> {
    require_role(actor, ActorRole::Mechanic, "complete")?;
    require_status(inspection, &[InspectionStatus::OnSite], "complete")?;
    require_assigned_mechanic(inspection, actor, "complete")?;

    if checklist.answers.is_empty() {
        return Err(CoreError::ValidationError {
            field: String::from("checklist.answers"),
            message: String::from("completion requires at least one checklist answer"),
        });
    }

    let mut new_inspection: Inspection = inspection.clone();
    new_inspection.status = InspectionStatus::Finalized;
    new_inspection.checklist = Some(checklist);
    new_inspection.completed_at = Some(occurred_at.to_string());

    Ok(outcome(
        new_inspection,
        actor,
        EventKind::InspectionCompleted,
        occurred_at,
    ))
}

/// Cancellation: destination (`Postponed` or `Cancelled`) is decided by
/// the reason kind.
fn cancel(
    inspection: &Inspection,
    actor: &ActorContext,
    reason: CancellationReason,
    observation: Option<String>,
    occurred_at: &str,
) -> Result<TransitionOutcome, CoreError> {
    // The reason enum must match the cancelling role; free text never
    // substitutes for it.
    let expected_reason: CancellationReason = match actor.role {
        ActorRole::Requester => CancellationReason::RequesterCancelled,
        ActorRole::ListingOwner => CancellationReason::OwnerCancelled,
        ActorRole::BranchAdmin => CancellationReason::AdminCancelled,
        ActorRole::Mechanic => CancellationReason::MechanicCancelled,
    };
    if reason != expected_reason {
        return Err(CoreError::ValidationError {
            field: String::from("cancellation_reason"),
            message: format!(
                "role '{}' must cancel with reason '{expected_reason}', got '{reason}'",
                actor.role
            ),
        });
    }

    match actor.role {
        ActorRole::Requester => {
            require_status(
                inspection,
                &[
                    InspectionStatus::Pending,
                    InspectionStatus::Confirmed,
                    InspectionStatus::OnSite,
                ],
                "cancel",
            )?;
            if actor.actor_id != inspection.requester_id {
                return Err(CoreError::NotPermitted {
                    action: String::from("cancel"),
                    reason: String::from("only the inspection's requester may cancel as requester"),
                });
            }
        }
        ActorRole::ListingOwner | ActorRole::BranchAdmin => {
            require_status(
                inspection,
                &[
                    InspectionStatus::Pending,
                    InspectionStatus::Confirmed,
                    InspectionStatus::OnSite,
                ],
                "cancel",
            )?;
        }
        ActorRole::Mechanic => {
            require_status(
                inspection,
                &[InspectionStatus::Confirmed, InspectionStatus::OnSite],
                "cancel",
            )?;
            require_assigned_mechanic(inspection, actor, "cancel")?;
        }
    }

    let mut new_inspection: Inspection = inspection.clone();
    new_inspection.status = reason.resulting_status();
    new_inspection.cancellation_reason = Some(reason);
    new_inspection.observation = observation;

    Ok(outcome(
        new_inspection,
        actor,
        EventKind::for_cancellation(reason),
        occurred_at,
    ))
}

/// Requester rates a finalized inspection. Status stays `Finalized`.
fn rate(
    inspection: &Inspection,
    actor: &ActorContext,
    rating: revisa_domain::Rating,
    occurred_at: &str,
) -> Result<TransitionOutcome, CoreError> {
    require_role(actor, ActorRole::Requester, "rate")?;
    require_status(inspection, &[InspectionStatus::Finalized], "rate")?;
    if actor.actor_id != inspection.requester_id {
        return Err(CoreError::NotPermitted {
            action: String::from("rate"),
            reason: String::from("only the inspection's requester may rate"),
        });
    }
    if inspection.rating.is_some() {
        return Err(CoreError::AlreadyRated);
    }

    let mut new_inspection: Inspection = inspection.clone();
    new_inspection.rating = Some(rating);

    Ok(outcome(
        new_inspection,
        actor,
        EventKind::InspectionRatingSubmitted,
        occurred_at,
    ))
}

/// Builds the successful outcome with its single lifecycle event.
fn outcome(
    new_inspection: Inspection,
    actor: &ActorContext,
    kind: EventKind,
    occurred_at: &str,
) -> TransitionOutcome {
    let recipients: Vec<UserId> = new_inspection.parties_excluding(actor.actor_id);
    let event: InspectionEvent = InspectionEvent::new(
        new_inspection.inspection_id,
        EventActor::new(actor.actor_id, actor.role),
        kind,
        new_inspection.status,
        recipients,
        occurred_at.to_string(),
    );
    TransitionOutcome {
        inspection: new_inspection,
        event,
    }
}

/// Guards that the actor holds the required role.
fn require_role(actor: &ActorContext, role: ActorRole, action: &str) -> Result<(), CoreError> {
    if actor.role == role {
        Ok(())
    } else {
        Err(CoreError::NotPermitted {
            action: action.to_string(),
            reason: format!("requires role '{role}', actor has '{}'", actor.role),
        })
    }
}

/// Guards that the current status is one of the listed sources.
fn require_status(
    inspection: &Inspection,
    allowed: &[InspectionStatus],
    action: &str,
) -> Result<(), CoreError> {
    if allowed.contains(&inspection.status) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: inspection.status,
            action: action.to_string(),
        })
    }
}

/// Guards accept/reject: if a specific mechanic was invited, only that
/// mechanic may respond.
fn require_invited_mechanic(
    inspection: &Inspection,
    actor: &ActorContext,
    action: &str,
) -> Result<(), CoreError> {
    match inspection.mechanic_id {
        Some(invited) if invited != actor.actor_id => Err(CoreError::NotPermitted {
            action: action.to_string(),
            reason: format!("inspection invites mechanic {invited}, not {}", actor.actor_id),
        }),
        _ => Ok(()),
    }
}

/// Guards start/complete/cancel-by-mechanic: requires the assigned
/// mechanic's identity.
fn require_assigned_mechanic(
    inspection: &Inspection,
    actor: &ActorContext,
    action: &str,
) -> Result<(), CoreError> {
    match inspection.mechanic_id {
        Some(assigned) if assigned == actor.actor_id => Ok(()),
        Some(assigned) => Err(CoreError::NotPermitted {
            action: action.to_string(),
            reason: format!(
                "inspection is assigned to mechanic {assigned}, not {}",
                actor.actor_id
            ),
        }),
        None => Err(CoreError::NotPermitted {
            action: action.to_string(),
            reason: String::from("inspection has no assigned mechanic"),
        }),
    }
}
