// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Canonical identifier of an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InspectionId(pub i64);

impl InspectionId {
    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for InspectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a user (requester, mechanic, or admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a branch (Sede).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchId(pub i64);

impl BranchId {
    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a vehicle sale listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PublicationId(pub i64);

impl std::fmt::Display for PublicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a bare vehicle (no listing attached).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub i64);

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The vehicle an inspection is about.
///
/// Exactly one of a sale listing or a bare vehicle; the enum makes the
/// "exactly one is meaningful" invariant structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleRef {
    /// The inspection accompanies a sale listing.
    Publication(PublicationId),
    /// The inspection was requested standalone for a vehicle.
    Standalone(VehicleId),
}

/// Payment state of an inspection.
///
/// Orthogonal to the lifecycle status; capture itself is an external
/// collaborator's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment captured.
    Confirmed,
    /// Payment not yet captured.
    #[default]
    Incomplete,
    /// Payment cancelled or refunded.
    Cancelled,
}

impl PaymentStatus {
    /// Returns the string representation of this payment status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Incomplete => "incomplete",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "incomplete" => Ok(Self::Incomplete),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidPaymentStatus(s.to_string())),
        }
    }
}

/// A post-completion rating, 1 through 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// The rating value (1-5).
    value: u8,
}

impl Rating {
    /// Creates a new `Rating`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` if the value is not between
    /// 1 and 5 inclusive.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if value >= 1 && value <= 5 {
            Ok(Self { value })
        } else {
            Err(DomainError::InvalidRating { value })
        }
    }

    /// Returns the rating value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

/// Role an actor holds when requesting a transition.
///
/// Roles gate which actions are available; identity checks (e.g. "the
/// assigned mechanic") are layered on top by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// The actor who requested the inspection (Solicitante).
    Requester,
    /// The owner of the sale listing the inspection accompanies.
    ListingOwner,
    /// A mechanic (invited or assigned).
    Mechanic,
    /// A branch administrator.
    BranchAdmin,
}

impl ActorRole {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::ListingOwner => "listing_owner",
            Self::Mechanic => "mechanic",
            Self::BranchAdmin => "branch_admin",
        }
    }
}

impl FromStr for ActorRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requester" => Ok(Self::Requester),
            "listing_owner" => Ok(Self::ListingOwner),
            "mechanic" => Ok(Self::Mechanic),
            "branch_admin" => Ok(Self::BranchAdmin),
            _ => Err(DomainError::InvalidActorRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single checklist answer recorded during the on-site phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistAnswer {
    /// The checklist item identifier.
    pub item: String,
    /// The recorded answer value. Opaque to the engine.
    pub value: String,
}

/// The checklist payload a mechanic produces when completing an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistReport {
    /// Recorded answers. Must be non-empty at completion.
    pub answers: Vec<ChecklistAnswer>,
    /// Free-text comments from the mechanic.
    pub comments: String,
    /// Optional reference to a generated PDF report.
    pub report_reference: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_accepts_valid_range() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_rating_rejects_out_of_range() {
        assert_eq!(Rating::new(0), Err(DomainError::InvalidRating { value: 0 }));
        assert_eq!(Rating::new(6), Err(DomainError::InvalidRating { value: 6 }));
    }

    #[test]
    fn test_payment_status_defaults_to_incomplete() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Incomplete);
    }

    #[test]
    fn test_actor_role_round_trip() {
        for role in [
            ActorRole::Requester,
            ActorRole::ListingOwner,
            ActorRole::Mechanic,
            ActorRole::BranchAdmin,
        ] {
            assert_eq!(role.as_str().parse::<ActorRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_vehicle_ref_is_exactly_one_of() {
        let listed = VehicleRef::Publication(PublicationId(10));
        let standalone = VehicleRef::Standalone(VehicleId(20));
        assert_ne!(listed, standalone);
    }
}
