// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use revisa_domain::{ActorRole, CancellationReason, ChecklistReport, Rating, UserId};

/// The actor requesting a transition.
///
/// Carries both identity and role: role gates which actions exist at all,
/// identity gates actions reserved for a specific party (the assigned
/// mechanic, the requester).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    /// The actor's user id.
    pub actor_id: UserId,
    /// The role the actor holds for this request.
    pub role: ActorRole,
}

impl ActorContext {
    /// Creates a new `ActorContext`.
    #[must_use]
    pub const fn new(actor_id: UserId, role: ActorRole) -> Self {
        Self { actor_id, role }
    }
}

/// A command represents transition intent as data only.
///
/// Commands are the only way to mutate an inspection; the transition table
/// lives entirely in [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionCommand {
    /// Invited mechanic accepts the inspection.
    Accept,
    /// Invited mechanic declines the inspection.
    Reject {
        /// Optional free-text reason.
        reason: Option<String>,
    },
    /// Assigned mechanic starts the on-site phase.
    Start,
    /// Assigned mechanic completes the inspection.
    Complete {
        /// The checklist payload; answers must be non-empty.
        checklist: ChecklistReport,
    },
    /// Any permitted actor cancels the inspection.
    Cancel {
        /// The fixed cancellation reason. Free text never substitutes.
        reason: CancellationReason,
        /// Optional free-text observation carried alongside the reason.
        observation: Option<String>,
    },
    /// Requester rates a finalized inspection.
    Rate {
        /// The rating, 1-5, settable exactly once.
        rating: Rating,
    },
}

impl InspectionCommand {
    /// Returns the action name used in errors and logs.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject { .. } => "reject",
            Self::Start => "start",
            Self::Complete { .. } => "complete",
            Self::Cancel { .. } => "cancel",
            Self::Rate { .. } => "rate",
        }
    }
}
