// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! DTOs carry raw identifiers and wire strings; translation into domain
//! types happens at the handler boundary.

use revisa_domain::WeeklySchedule;
use time::Date;

/// API response for a branch schedule query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BranchScheduleResponse {
    /// The branch identifier.
    pub branch_id: i64,
    /// The branch's weekly operating schedule.
    pub schedule: WeeklySchedule,
}

/// API response for a mechanic schedule query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MechanicScheduleResponse {
    /// The mechanic's user identifier.
    pub mechanic_id: i64,
    /// The mechanic's weekly availability.
    pub schedule: WeeklySchedule,
}

/// API request to replace a branch's weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutBranchScheduleRequest {
    /// The full replacement schedule.
    pub schedule: WeeklySchedule,
}

/// API request to replace a mechanic's weekly availability.
///
/// This is a full replace; saved slots outside the branch's current hours
/// are kept so the editor can show historical choices.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutMechanicScheduleRequest {
    /// The full replacement schedule.
    pub schedule: WeeklySchedule,
}

/// API response for a successful schedule replacement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutScheduleResponse {
    /// A success message.
    pub message: String,
}

/// API request to compute available slots.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvailableSlotsRequest {
    /// The date to compute slots for.
    pub date: Date,
    /// The branch identifier.
    pub branch_id: i64,
    /// The mechanic's user identifier (optional).
    pub mechanic_id: Option<i64>,
    /// The availability mode: `display` or `booking`.
    pub mode: String,
}

/// API response listing available slots, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvailableSlotsResponse {
    /// The date the slots apply to.
    pub date: Date,
    /// The available slots as `HH:MM` strings.
    pub slots: Vec<String>,
}

/// API request to book an inspection.
///
/// Exactly one of `publication_id` and `vehicle_id` must be set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateInspectionRequest {
    /// The requesting user's identifier.
    pub requester_id: i64,
    /// The branch the inspection takes place at.
    pub branch_id: i64,
    /// The mechanic's user identifier (optional).
    pub mechanic_id: Option<i64>,
    /// Whether the mechanic already accepted out of band. Requires
    /// `mechanic_id`; the inspection starts `confirmed` instead of
    /// `pending`.
    pub mechanic_accepted: bool,
    /// The scheduled date.
    pub date: Date,
    /// The scheduled slot as an `HH:MM` string.
    pub slot: String,
    /// The sale listing the inspection accompanies.
    pub publication_id: Option<i64>,
    /// The bare vehicle the inspection was requested for.
    pub vehicle_id: Option<i64>,
}

/// API response for a successfully booked inspection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateInspectionResponse {
    /// The created inspection.
    pub inspection: InspectionInfo,
    /// A success message.
    pub message: String,
}

/// One checklist answer in a completion payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChecklistAnswerInput {
    /// The checklist item identifier.
    pub item: String,
    /// The recorded answer.
    pub value: String,
}

/// API request to apply a lifecycle action to an inspection.
///
/// `action` selects the command; the optional fields carry its payload:
/// `reason` for `cancel` (a fixed wire string), `observation` for free
/// text, `rating` for `rate`, the checklist fields for `complete`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionInspectionRequest {
    /// The acting user's identifier.
    pub actor_id: i64,
    /// The acting user's role wire string.
    pub actor_role: String,
    /// The action: `accept`, `reject`, `start`, `complete`, `cancel`,
    /// or `rate`.
    pub action: String,
    /// The cancellation reason wire string (required for `cancel`).
    pub reason: Option<String>,
    /// Optional free-text observation.
    pub observation: Option<String>,
    /// The rating value, 1-5 (required for `rate`).
    pub rating: Option<u8>,
    /// The checklist answers (required for `complete`).
    pub checklist_answers: Option<Vec<ChecklistAnswerInput>>,
    /// Free-text checklist comments.
    pub checklist_comments: Option<String>,
    /// Opaque reference to an uploaded report document.
    pub report_reference: Option<String>,
}

/// API response for a successful transition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionInspectionResponse {
    /// The inspection after the transition.
    pub inspection: InspectionInfo,
    /// The wire string of the emitted lifecycle event.
    pub event: String,
    /// A success message.
    pub message: String,
}

/// Inspection information for queries and responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InspectionInfo {
    /// The inspection identifier.
    pub inspection_id: i64,
    /// The requesting user's identifier.
    pub requester_id: i64,
    /// The mechanic's user identifier, if assigned or invited.
    pub mechanic_id: Option<i64>,
    /// The branch identifier.
    pub branch_id: i64,
    /// The sale listing, if the inspection accompanies one.
    pub publication_id: Option<i64>,
    /// The bare vehicle, if requested standalone.
    pub vehicle_id: Option<i64>,
    /// The scheduled date.
    pub scheduled_date: Date,
    /// The scheduled slot as an `HH:MM` string.
    pub slot: String,
    /// The lifecycle status wire string.
    pub status: String,
    /// The payment status wire string.
    pub payment_status: String,
    /// Free-text observation, if any.
    pub observation: Option<String>,
    /// The cancellation reason wire string, if cancelled or postponed.
    pub cancellation_reason: Option<String>,
    /// The rating, if submitted.
    pub rating: Option<u8>,
    /// When the inspection was completed (ISO 8601 UTC), if finalized.
    pub completed_at: Option<String>,
    /// The optimistic concurrency version.
    pub version: u64,
}

/// API response for a single inspection query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetInspectionResponse {
    /// The inspection.
    pub inspection: InspectionInfo,
}

/// API response for an inspection listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListInspectionsResponse {
    /// The inspections, in id order.
    pub inspections: Vec<InspectionInfo>,
}

/// One pending notification for a recipient.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationInfo {
    /// The inspection the notification concerns.
    pub inspection_id: i64,
    /// The lifecycle event wire string.
    pub kind: String,
    /// The inspection status after the event.
    pub status: String,
    /// When the event occurred (ISO 8601 UTC).
    pub occurred_at: String,
}

/// API response for the pull-based pending notification query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PendingNotificationsResponse {
    /// The recipient the query was scoped to.
    pub recipient_id: i64,
    /// The number of pending notifications.
    pub count: usize,
    /// The pending notifications, oldest first.
    pub notifications: Vec<NotificationInfo>,
}
