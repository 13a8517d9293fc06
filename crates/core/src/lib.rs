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

mod apply;
mod availability;
mod command;
mod error;
mod inspection;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, created_event};
pub use availability::{AvailabilityMode, compute_slots};
pub use command::{ActorContext, InspectionCommand};
pub use error::CoreError;
pub use inspection::{Inspection, TransitionOutcome};
