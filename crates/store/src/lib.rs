// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory stores for the Revisa inspection engine.
//!
//! A persistence engine is explicitly out of scope; these stores keep the
//! same seam a database-backed implementation would sit behind, while
//! providing the two concurrency guarantees the engine requires:
//!
//! - reservation claims are a single conditional insert (two simultaneous
//!   bookers cannot both claim one slot)
//! - inspection updates are version-checked compare-and-swap (a
//!   simultaneous `start` and `cancel` cannot both apply)

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
mod inspections;
mod reservations;
mod schedules;

pub use error::StoreError;
pub use inspections::{InspectionRepository, InspectionStore};
pub use reservations::{ReservationKey, ReservationStore};
pub use schedules::ScheduleStore;
