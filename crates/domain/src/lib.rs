// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod schedule;
mod status;
mod types;

// Re-export public types
pub use error::DomainError;
pub use schedule::{DaySchedule, TimeSlot, WeeklySchedule, day_number};
pub use status::{CancellationReason, InspectionStatus};
pub use types::{
    ActorRole, BranchId, ChecklistAnswer, ChecklistReport, InspectionId, PaymentStatus,
    PublicationId, Rating, UserId, VehicleId, VehicleRef,
};
