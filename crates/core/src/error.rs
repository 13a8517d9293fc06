// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use revisa_domain::{DomainError, InspectionStatus};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The requested action is not legal from the current status.
    ///
    /// Recoverable: the caller should re-read the current status and
    /// surface it to the actor.
    InvalidTransition {
        /// The status the inspection was in.
        from: InspectionStatus,
        /// The action that was attempted.
        action: String,
    },
    /// A rating already exists; ratings are set exactly once.
    ///
    /// Not retryable.
    AlreadyRated,
    /// The actor is not permitted to perform this action on this
    /// inspection (wrong role, or not the assigned/invited party).
    NotPermitted {
        /// The action that was attempted.
        action: String,
        /// Why the actor is not permitted.
        reason: String,
    },
    /// A required payload field is missing or invalid.
    ValidationError {
        /// The offending field.
        field: String,
        /// A human-readable description.
        message: String,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from, action } => {
                write!(f, "Action '{action}' is not legal from status '{from}'")
            }
            Self::AlreadyRated => {
                write!(f, "Inspection has already been rated")
            }
            Self::NotPermitted { action, reason } => {
                write!(f, "Actor may not perform '{action}': {reason}")
            }
            Self::ValidationError { field, message } => {
                write!(f, "Invalid payload for field '{field}': {message}")
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
