// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection lifecycle status and cancellation reasons.
//!
//! Status is a closed variant set; which transitions are legal is enforced
//! centrally by the state machine in `revisa-core`, never by string
//! comparison at call sites.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    /// Created, waiting for a mechanic to accept.
    Pending,
    /// A mechanic accepted; the visit is booked.
    Confirmed,
    /// The mechanic started the on-site phase.
    OnSite,
    /// Cancelled by the requester or the mechanic; kept distinct from
    /// `Cancelled` for reporting, but functionally terminal.
    Postponed,
    /// Cancelled by a branch admin or the listing owner.
    Cancelled,
    /// The invited mechanic declined.
    Rejected,
    /// The on-site phase completed; outcome recorded.
    Finalized,
}

impl InspectionStatus {
    /// Returns the string representation used for persistence and wire
    /// serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::OnSite => "on_site",
            Self::Postponed => "postponed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
            Self::Finalized => "finalized",
        }
    }

    /// Returns true if this status has no outgoing transitions.
    ///
    /// `rate` on a `Finalized` inspection records an outcome but does not
    /// change status, so `Finalized` is still terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Postponed | Self::Cancelled | Self::Rejected | Self::Finalized
        )
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "on_site" => Ok(Self::OnSite),
            "postponed" => Ok(Self::Postponed),
            "cancelled" => Ok(Self::Cancelled),
            "rejected" => Ok(Self::Rejected),
            "finalized" => Ok(Self::Finalized),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl FromStr for InspectionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed cancellation reasons.
///
/// Free text never substitutes for the enum; it travels separately as the
/// inspection's `observation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationReason {
    /// A branch admin cancelled the inspection.
    AdminCancelled,
    /// The listing owner cancelled the inspection.
    OwnerCancelled,
    /// The requester cancelled the inspection.
    RequesterCancelled,
    /// The assigned mechanic cancelled the inspection.
    MechanicCancelled,
}

impl CancellationReason {
    /// Returns the stable wire string for this reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AdminCancelled => "admin_cancelled",
            Self::OwnerCancelled => "owner_cancelled",
            Self::RequesterCancelled => "requester_cancelled",
            Self::MechanicCancelled => "mechanic_cancelled",
        }
    }

    /// Returns the status a cancellation with this reason lands in.
    ///
    /// Requester- and mechanic-initiated cancellations are recorded as
    /// `Postponed`; admin- and owner-initiated cancellations as `Cancelled`.
    /// The split is a reporting distinction; both are terminal.
    #[must_use]
    pub const fn resulting_status(&self) -> InspectionStatus {
        match self {
            Self::RequesterCancelled | Self::MechanicCancelled => InspectionStatus::Postponed,
            Self::AdminCancelled | Self::OwnerCancelled => InspectionStatus::Cancelled,
        }
    }

    /// Parses a reason from its wire string.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "admin_cancelled" => Ok(Self::AdminCancelled),
            "owner_cancelled" => Ok(Self::OwnerCancelled),
            "requester_cancelled" => Ok(Self::RequesterCancelled),
            "mechanic_cancelled" => Ok(Self::MechanicCancelled),
            _ => Err(DomainError::InvalidCancellationReason(s.to_string())),
        }
    }
}

impl FromStr for CancellationReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        let statuses = vec![
            InspectionStatus::Pending,
            InspectionStatus::Confirmed,
            InspectionStatus::OnSite,
            InspectionStatus::Postponed,
            InspectionStatus::Cancelled,
            InspectionStatus::Rejected,
            InspectionStatus::Finalized,
        ];

        for status in statuses {
            let s = status.as_str();
            match InspectionStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(InspectionStatus::parse_str("in_limbo").is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!InspectionStatus::Pending.is_terminal());
        assert!(!InspectionStatus::Confirmed.is_terminal());
        assert!(!InspectionStatus::OnSite.is_terminal());
        assert!(InspectionStatus::Postponed.is_terminal());
        assert!(InspectionStatus::Cancelled.is_terminal());
        assert!(InspectionStatus::Rejected.is_terminal());
        assert!(InspectionStatus::Finalized.is_terminal());
    }

    #[test]
    fn test_cancellation_reason_wire_strings() {
        assert_eq!(CancellationReason::AdminCancelled.as_str(), "admin_cancelled");
        assert_eq!(CancellationReason::OwnerCancelled.as_str(), "owner_cancelled");
        assert_eq!(
            CancellationReason::RequesterCancelled.as_str(),
            "requester_cancelled"
        );
        assert_eq!(
            CancellationReason::MechanicCancelled.as_str(),
            "mechanic_cancelled"
        );
    }

    #[test]
    fn test_cancellation_reason_round_trip() {
        for reason in [
            CancellationReason::AdminCancelled,
            CancellationReason::OwnerCancelled,
            CancellationReason::RequesterCancelled,
            CancellationReason::MechanicCancelled,
        ] {
            assert_eq!(
                CancellationReason::parse_str(reason.as_str()),
                Ok(reason),
                "round trip failed for {reason}"
            );
        }
    }

    #[test]
    fn test_resulting_status_split() {
        assert_eq!(
            CancellationReason::RequesterCancelled.resulting_status(),
            InspectionStatus::Postponed
        );
        assert_eq!(
            CancellationReason::MechanicCancelled.resulting_status(),
            InspectionStatus::Postponed
        );
        assert_eq!(
            CancellationReason::AdminCancelled.resulting_status(),
            InspectionStatus::Cancelled
        );
        assert_eq!(
            CancellationReason::OwnerCancelled.resulting_status(),
            InspectionStatus::Cancelled
        );
    }
}
