// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use revisa_domain::{
    BranchId, CancellationReason, ChecklistReport, InspectionId, InspectionStatus, PaymentStatus,
    Rating, TimeSlot, UserId, VehicleRef,
};
use revisa_events::InspectionEvent;
use serde::{Deserialize, Serialize};
use time::Date;

/// The central inspection entity.
///
/// Mutated only through [`crate::apply`]; never deleted. Terminal states
/// are retained as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    /// Canonical identifier, assigned by the store.
    pub inspection_id: InspectionId,
    /// Who requested the inspection (Solicitante).
    pub requester_id: UserId,
    /// The mechanic. `None` only while status is `Pending`; in a pending
    /// inspection `Some` means a specific mechanic was invited and only
    /// that mechanic may accept or reject.
    pub mechanic_id: Option<UserId>,
    /// The vehicle under inspection (listing or standalone).
    pub vehicle: VehicleRef,
    /// The branch (Sede) the inspection takes place at.
    pub branch_id: BranchId,
    /// The reserved time slot.
    pub slot: TimeSlot,
    /// The scheduled date.
    pub scheduled_date: Date,
    /// When the inspection was completed (ISO 8601 UTC).
    pub completed_at: Option<String>,
    /// Lifecycle status.
    pub status: InspectionStatus,
    /// Payment state, orthogonal to lifecycle.
    pub payment_status: PaymentStatus,
    /// Free-text observation attached by a cancelling or rejecting actor.
    pub observation: Option<String>,
    /// The fixed cancellation reason, set when status becomes
    /// `Postponed` or `Cancelled`.
    pub cancellation_reason: Option<CancellationReason>,
    /// Post-completion rating. Stays `None` until `Finalized`; never
    /// changes once set.
    pub rating: Option<Rating>,
    /// Checklist payload recorded at completion.
    pub checklist: Option<ChecklistReport>,
    /// Optimistic concurrency token, bumped by every successful store
    /// update.
    pub version: u64,
}

impl Inspection {
    /// Creates a new inspection at `Pending`.
    ///
    /// `invited_mechanic` identifies a specific mechanic who must accept
    /// before the booking is confirmed; `None` leaves the inspection open
    /// for any mechanic to accept.
    #[must_use]
    pub const fn new_pending(
        inspection_id: InspectionId,
        requester_id: UserId,
        invited_mechanic: Option<UserId>,
        vehicle: VehicleRef,
        branch_id: BranchId,
        scheduled_date: Date,
        slot: TimeSlot,
    ) -> Self {
        Self {
            inspection_id,
            requester_id,
            mechanic_id: invited_mechanic,
            vehicle,
            branch_id,
            slot,
            scheduled_date,
            completed_at: None,
            status: InspectionStatus::Pending,
            payment_status: PaymentStatus::Incomplete,
            observation: None,
            cancellation_reason: None,
            rating: None,
            checklist: None,
            version: 0,
        }
    }

    /// Creates a new inspection directly at `Confirmed`.
    ///
    /// Used when the booking is paired with a mechanic who accepted in
    /// advance.
    #[must_use]
    pub const fn new_confirmed(
        inspection_id: InspectionId,
        requester_id: UserId,
        mechanic_id: UserId,
        vehicle: VehicleRef,
        branch_id: BranchId,
        scheduled_date: Date,
        slot: TimeSlot,
    ) -> Self {
        Self {
            inspection_id,
            requester_id,
            mechanic_id: Some(mechanic_id),
            vehicle,
            branch_id,
            slot,
            scheduled_date,
            completed_at: None,
            status: InspectionStatus::Confirmed,
            payment_status: PaymentStatus::Incomplete,
            observation: None,
            cancellation_reason: None,
            rating: None,
            checklist: None,
            version: 0,
        }
    }

    /// Returns the parties of this inspection, excluding one actor.
    ///
    /// Used to compute notification recipients: the acting party does not
    /// get notified about their own action.
    #[must_use]
    pub fn parties_excluding(&self, actor_id: UserId) -> Vec<UserId> {
        let mut parties: Vec<UserId> = Vec::new();
        if self.requester_id != actor_id {
            parties.push(self.requester_id);
        }
        if let Some(mechanic_id) = self.mechanic_id
            && mechanic_id != actor_id
        {
            parties.push(mechanic_id);
        }
        parties
    }
}

/// The result of a successful transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The inspection after the transition.
    pub inspection: Inspection,
    /// The single lifecycle event recording this transition.
    pub event: InspectionEvent,
}
