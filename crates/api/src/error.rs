// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use revisa_core::CoreError;
use revisa_domain::DomainError;
use revisa_store::StoreError;
use thiserror::Error;
use time::Date;

/// API-level errors.
///
/// These are distinct from domain/core/store errors and represent the API
/// contract. Callers can tell refresh-and-retry failures apart from
/// immutable rules via [`ApiError::is_retryable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The slot was claimed by another booking; re-query availability.
    #[error("Slot {slot} on {date} at branch {branch_id} is no longer available")]
    SlotUnavailable {
        /// The branch the booking targeted.
        branch_id: i64,
        /// The date the booking targeted.
        date: Date,
        /// The contested slot.
        slot: String,
    },
    /// The requested action is not legal from the current status.
    #[error("Action '{action}' is not legal from status '{from}'")]
    TransitionNotAllowed {
        /// The status the inspection was in.
        from: String,
        /// The action that was attempted.
        action: String,
    },
    /// A rating already exists; ratings are set exactly once.
    #[error("Inspection has already been rated")]
    AlreadyRated,
    /// The actor may not perform this action on this inspection.
    #[error("Actor may not perform '{action}': {reason}")]
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the actor is not permitted.
        reason: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The inspection was modified concurrently; re-read and retry.
    #[error("Inspection {inspection_id} was modified concurrently")]
    Conflict {
        /// The inspection whose update was rejected.
        inspection_id: i64,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns whether the caller should refresh their view and retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SlotUnavailable { .. } | Self::TransitionNotAllowed { .. } | Self::Conflict { .. }
        )
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTimeSlot { value, reason } => ApiError::InvalidInput {
            field: String::from("slot"),
            message: format!("Invalid time slot '{value}': {reason}"),
        },
        DomainError::InvalidDayNumber { day } => ApiError::InvalidInput {
            field: String::from("day"),
            message: format!("Invalid day number: {day}. Must be between 1 and 7"),
        },
        DomainError::InvalidRating { value } => ApiError::InvalidInput {
            field: String::from("rating"),
            message: format!("Invalid rating: {value}. Must be between 1 and 5"),
        },
        DomainError::InvalidCancellationReason(value) => ApiError::InvalidInput {
            field: String::from("reason"),
            message: format!("Unknown cancellation reason '{value}'"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown inspection status '{value}'"),
        },
        DomainError::InvalidPaymentStatus(value) => ApiError::InvalidInput {
            field: String::from("payment_status"),
            message: format!("Unknown payment status '{value}'"),
        },
        DomainError::InvalidActorRole(value) => ApiError::InvalidInput {
            field: String::from("actor_role"),
            message: format!("Unknown actor role '{value}'"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::InvalidTransition { from, action } => ApiError::TransitionNotAllowed {
            from: from.as_str().to_string(),
            action,
        },
        CoreError::AlreadyRated => ApiError::AlreadyRated,
        CoreError::NotPermitted { action, reason } => ApiError::Forbidden { action, reason },
        CoreError::ValidationError { field, message } => ApiError::InvalidInput { field, message },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a store error into an API error.
///
/// This translation is explicit and ensures store errors are not leaked directly.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::SlotUnavailable {
            branch_id,
            date,
            slot,
        } => ApiError::SlotUnavailable {
            branch_id: branch_id.value(),
            date,
            slot: slot.value().to_string(),
        },
        StoreError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Inspection"),
            message: format!("{what} does not exist"),
        },
        StoreError::VersionConflict { inspection_id, .. } => ApiError::Conflict {
            inspection_id: inspection_id.value(),
        },
    }
}
