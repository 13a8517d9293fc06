// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Revisa inspection engine.
//!
//! The coordinator orchestrates stores, state machine, and dispatch;
//! handlers translate DTOs and errors at the contract edge. Transport
//! lives one crate up, in the server.

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

mod coordinator;
mod error;
pub mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use coordinator::{BookingRequest, SchedulingCoordinator};
pub use error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
pub use request_response::{
    AvailableSlotsRequest, AvailableSlotsResponse, BranchScheduleResponse, ChecklistAnswerInput,
    CreateInspectionRequest, CreateInspectionResponse, GetInspectionResponse, InspectionInfo,
    ListInspectionsResponse, MechanicScheduleResponse, NotificationInfo,
    PendingNotificationsResponse, PutBranchScheduleRequest, PutMechanicScheduleRequest,
    PutScheduleResponse, TransitionInspectionRequest, TransitionInspectionResponse,
};
