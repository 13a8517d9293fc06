// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use revisa_domain::{BranchId, InspectionId, TimeSlot};
use time::Date;

/// Errors that can occur in the store layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The slot was already claimed by another booking.
    ///
    /// Recoverable: the caller should re-query availability.
    SlotUnavailable {
        /// The branch the claim targeted.
        branch_id: BranchId,
        /// The date the claim targeted.
        date: Date,
        /// The contested slot.
        slot: TimeSlot,
    },
    /// A requested entity does not exist.
    NotFound(String),
    /// An inspection update lost an optimistic-concurrency race.
    ///
    /// Recoverable: re-read the inspection and re-apply.
    VersionConflict {
        /// The inspection whose update was rejected.
        inspection_id: InspectionId,
        /// The version the writer expected.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlotUnavailable {
                branch_id,
                date,
                slot,
            } => {
                write!(
                    f,
                    "Slot {slot} on {date} at branch {branch_id} is no longer available"
                )
            }
            Self::NotFound(what) => write!(f, "{what} not found"),
            Self::VersionConflict {
                inspection_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Inspection {inspection_id} was modified concurrently (expected version {expected}, found {actual})"
                )
            }
        }
    }
}

impl std::error::Error for StoreError {}
