// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly schedule types shared by branches and mechanics.
//!
//! A weekly schedule maps a Monday-first day number (1-7) to an ordered,
//! deduplicated set of time-of-day slots plus an active flag. An inactive
//! day contributes no slots regardless of its stored set.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use time::Weekday;

/// Returns the Monday-first day number (1-7) for a weekday.
#[must_use]
pub const fn day_number(weekday: Weekday) -> u8 {
    weekday.number_from_monday()
}

/// A time-of-day slot in `"HH:MM"` form.
///
/// The wire representation is the string itself. Lexicographic ordering of
/// valid values equals chronological ordering, so `Ord` derives from the
/// underlying string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    /// The slot value (exactly `"HH:MM"`).
    value: String,
}

impl TimeSlot {
    /// Creates a new `TimeSlot` from an `"HH:MM"` string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeSlot` if the string is not exactly
    /// five characters, the separator is missing, or the hour/minute parts
    /// are out of range.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let bytes: &[u8] = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(DomainError::InvalidTimeSlot {
                value: value.to_string(),
                reason: String::from("expected HH:MM"),
            });
        }
        let hour: u8 = parse_two_digits(&value[0..2]).ok_or_else(|| {
            DomainError::InvalidTimeSlot {
                value: value.to_string(),
                reason: String::from("hour is not numeric"),
            }
        })?;
        let minute: u8 = parse_two_digits(&value[3..5]).ok_or_else(|| {
            DomainError::InvalidTimeSlot {
                value: value.to_string(),
                reason: String::from("minute is not numeric"),
            }
        })?;
        if hour > 23 {
            return Err(DomainError::InvalidTimeSlot {
                value: value.to_string(),
                reason: String::from("hour must be 00-23"),
            });
        }
        if minute > 59 {
            return Err(DomainError::InvalidTimeSlot {
                value: value.to_string(),
                reason: String::from("minute must be 00-59"),
            });
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the slot value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parses exactly two ASCII digits.
fn parse_two_digits(s: &str) -> Option<u8> {
    if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.value
    }
}

impl FromStr for TimeSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A single day's schedule entry.
///
/// Slots are held in a `BTreeSet`, so uniqueness and ascending order are
/// structural invariants rather than conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Whether this day is active. An inactive day contributes no slots.
    pub is_active: bool,
    /// The stored slot set, unique and sorted ascending.
    pub slots: BTreeSet<TimeSlot>,
}

impl DaySchedule {
    /// Creates a new empty, active day.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_active: true,
            slots: BTreeSet::new(),
        }
    }

    /// Creates a day from an active flag and any iterable of slots.
    ///
    /// Duplicates collapse and ordering is restored by the set.
    #[must_use]
    pub fn with_slots<I>(is_active: bool, slots: I) -> Self
    where
        I: IntoIterator<Item = TimeSlot>,
    {
        Self {
            is_active,
            slots: slots.into_iter().collect(),
        }
    }

    /// Toggles a slot: inserts it if absent, removes it if present.
    ///
    /// Returns `true` if the slot is present after the toggle.
    pub fn toggle_slot(&mut self, slot: TimeSlot) -> bool {
        if self.slots.contains(&slot) {
            self.slots.remove(&slot);
            false
        } else {
            self.slots.insert(slot);
            true
        }
    }

    /// Returns the slots this day contributes when queried for booking.
    ///
    /// An inactive day contributes the empty set regardless of its stored
    /// slot list.
    #[must_use]
    pub fn active_slots(&self) -> BTreeSet<TimeSlot> {
        if self.is_active {
            self.slots.clone()
        } else {
            BTreeSet::new()
        }
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::new()
    }
}

/// A weekly schedule: Monday-first day number (1-7) to day entry.
///
/// Used for both a branch's operating hours and a mechanic's personal
/// availability. A missing day behaves as an inactive empty day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Day entries keyed by day number.
    days: BTreeMap<u8, DaySchedule>,
}

impl WeeklySchedule {
    /// Creates a new empty weekly schedule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    /// Replaces the entry for a day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDayNumber` if `day` is not 1-7.
    pub fn set_day(&mut self, day: u8, entry: DaySchedule) -> Result<(), DomainError> {
        validate_day(day)?;
        self.days.insert(day, entry);
        Ok(())
    }

    /// Returns the entry for a day, if present.
    #[must_use]
    pub fn day(&self, day: u8) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    /// Returns the slots an active day contributes; empty if the day is
    /// inactive or absent.
    #[must_use]
    pub fn active_slots(&self, day: u8) -> BTreeSet<TimeSlot> {
        self.days
            .get(&day)
            .map(DaySchedule::active_slots)
            .unwrap_or_default()
    }

    /// Returns the stored slot set for a day regardless of the active flag.
    ///
    /// The availability editor uses this so previously saved choices stay
    /// visible and toggleable even after operating hours change.
    #[must_use]
    pub fn saved_slots(&self, day: u8) -> BTreeSet<TimeSlot> {
        self.days
            .get(&day)
            .map(|entry| entry.slots.clone())
            .unwrap_or_default()
    }

    /// Toggles a slot on a day, creating the day entry if absent.
    ///
    /// Returns `true` if the slot is present after the toggle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDayNumber` if `day` is not 1-7.
    pub fn toggle_slot(&mut self, day: u8, slot: TimeSlot) -> Result<bool, DomainError> {
        validate_day(day)?;
        let entry: &mut DaySchedule = self.days.entry(day).or_default();
        Ok(entry.toggle_slot(slot))
    }

    /// Returns an iterator over the stored `(day, entry)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &DaySchedule)> {
        self.days.iter().map(|(day, entry)| (*day, entry))
    }
}

/// Validates a Monday-first day number.
const fn validate_day(day: u8) -> Result<(), DomainError> {
    if day >= 1 && day <= 7 {
        Ok(())
    } else {
        Err(DomainError::InvalidDayNumber { day })
    }
}
