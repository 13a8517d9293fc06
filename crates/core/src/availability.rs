// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookable-slot computation.
//!
//! Combines a branch's operating hours with a mechanic's personal
//! availability for one date. Two modes exist because the editor and the
//! booking flow answer different questions:
//!
//! - **Display**: what should the mechanic's availability editor show?
//!   The union of branch slots and the mechanic's previously saved slots,
//!   so a saved choice stays visible and toggleable even after the
//!   branch's operating hours changed.
//! - **Booking**: what can a requester actually book right now?
//!   The intersection of currently active branch and mechanic slots,
//!   minus slots already reserved.

use revisa_domain::{TimeSlot, WeeklySchedule, day_number};
use std::collections::BTreeSet;
use time::Date;

/// Which question `compute_slots` answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityMode {
    /// Availability-editor view: union, historical choices retained.
    Display,
    /// Requester booking view: intersection minus reservations.
    Booking,
}

/// Computes the slot set for a date.
///
/// The output is always unique and sorted ascending (`"HH:MM"` strings
/// sort chronologically). Inactive or absent days and a missing mechanic
/// yield an empty result, never an error.
///
/// # Arguments
///
/// * `date` - The date to compute for; only its weekday matters
/// * `branch` - The branch's weekly operating schedule
/// * `mechanic` - The mechanic's weekly availability, if one is in play
/// * `mode` - Display or booking semantics
/// * `reserved` - Slots already claimed for this (branch, mechanic, date);
///   only consulted in booking mode
#[must_use]
pub fn compute_slots(
    date: Date,
    branch: &WeeklySchedule,
    mechanic: Option<&WeeklySchedule>,
    mode: AvailabilityMode,
    reserved: &BTreeSet<TimeSlot>,
) -> Vec<TimeSlot> {
    let day: u8 = day_number(date.weekday());
    let branch_slots: BTreeSet<TimeSlot> = branch.active_slots(day);

    let combined: BTreeSet<TimeSlot> = match mode {
        AvailabilityMode::Display => {
            // Saved slots ignore the active flag: the editor must keep
            // showing what the mechanic previously chose.
            let saved: BTreeSet<TimeSlot> = mechanic
                .map(|schedule| schedule.saved_slots(day))
                .unwrap_or_default();
            branch_slots.union(&saved).cloned().collect()
        }
        AvailabilityMode::Booking => {
            let offered: BTreeSet<TimeSlot> = match mechanic {
                Some(schedule) => branch_slots
                    .intersection(&schedule.active_slots(day))
                    .cloned()
                    .collect(),
                None => branch_slots,
            };
            offered.difference(reserved).cloned().collect()
        }
    };

    combined.into_iter().collect()
}
