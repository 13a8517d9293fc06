// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A time-of-day slot string is malformed.
    InvalidTimeSlot {
        /// The rejected slot value.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },
    /// A day-of-week number is outside 1-7 (Monday-first).
    InvalidDayNumber {
        /// The rejected day number.
        day: u8,
    },
    /// A rating value is outside the 1-5 range.
    InvalidRating {
        /// The rejected rating value.
        value: u8,
    },
    /// A cancellation reason string is not one of the fixed wire values.
    InvalidCancellationReason(String),
    /// An inspection status string is not recognized.
    InvalidStatus(String),
    /// A payment status string is not recognized.
    InvalidPaymentStatus(String),
    /// An actor role string is not recognized.
    InvalidActorRole(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeSlot { value, reason } => {
                write!(f, "Invalid time slot '{value}': {reason}")
            }
            Self::InvalidDayNumber { day } => {
                write!(f, "Invalid day number {day}: must be between 1 and 7")
            }
            Self::InvalidRating { value } => {
                write!(f, "Invalid rating {value}: must be between 1 and 5")
            }
            Self::InvalidCancellationReason(value) => {
                write!(f, "Invalid cancellation reason: '{value}'")
            }
            Self::InvalidStatus(value) => {
                write!(f, "Invalid inspection status: '{value}'")
            }
            Self::InvalidPaymentStatus(value) => {
                write!(f, "Invalid payment status: '{value}'")
            }
            Self::InvalidActorRole(value) => {
                write!(f, "Invalid actor role: '{value}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
