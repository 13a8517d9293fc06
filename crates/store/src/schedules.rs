// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw schedule storage for branches and mechanics.
//!
//! Pure data holder: reads vastly outnumber writes (a mechanic edits
//! their availability occasionally), so both maps sit behind an `RwLock`.

use revisa_domain::{BranchId, UserId, WeeklySchedule};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Holds the two raw schedule sources: branch operating hours and
/// mechanic personal availability.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    /// Branch weekly operating slots.
    branches: RwLock<HashMap<BranchId, WeeklySchedule>>,
    /// Mechanic weekly personal availability.
    mechanics: RwLock<HashMap<UserId, WeeklySchedule>>,
}

impl ScheduleStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a branch's weekly schedule, if one is stored.
    #[must_use]
    pub fn branch_schedule(&self, branch_id: BranchId) -> Option<WeeklySchedule> {
        self.branches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&branch_id)
            .cloned()
    }

    /// Replaces a branch's weekly schedule.
    pub fn put_branch_schedule(&self, branch_id: BranchId, schedule: WeeklySchedule) {
        self.branches
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(branch_id, schedule);
    }

    /// Returns a mechanic's weekly schedule, if one is stored.
    #[must_use]
    pub fn mechanic_schedule(&self, mechanic_id: UserId) -> Option<WeeklySchedule> {
        self.mechanics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&mechanic_id)
            .cloned()
    }

    /// Replaces a mechanic's weekly schedule.
    ///
    /// A full replace, deliberately not restricted by branch hours at
    /// write time: the display merge keeps historical choices visible.
    pub fn put_mechanic_schedule(&self, mechanic_id: UserId, schedule: WeeklySchedule) {
        self.mechanics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(mechanic_id, schedule);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use revisa_domain::{DaySchedule, TimeSlot};

    fn monday_schedule(values: &[&str]) -> WeeklySchedule {
        let mut schedule = WeeklySchedule::new();
        let slots = values
            .iter()
            .map(|value| TimeSlot::new(value).unwrap())
            .collect::<Vec<_>>();
        schedule
            .set_day(1, DaySchedule::with_slots(true, slots))
            .unwrap();
        schedule
    }

    #[test]
    fn test_unknown_ids_yield_none() {
        let store = ScheduleStore::new();
        assert!(store.branch_schedule(BranchId(1)).is_none());
        assert!(store.mechanic_schedule(UserId(1)).is_none());
    }

    #[test]
    fn test_put_is_full_replace() {
        let store = ScheduleStore::new();
        store.put_mechanic_schedule(UserId(1), monday_schedule(&["09:00", "10:00"]));
        store.put_mechanic_schedule(UserId(1), monday_schedule(&["14:00"]));

        let stored = store.mechanic_schedule(UserId(1)).unwrap();
        let values: Vec<String> = stored
            .saved_slots(1)
            .iter()
            .map(|slot| slot.value().to_string())
            .collect();
        assert_eq!(values, vec!["14:00"]);
    }

    #[test]
    fn test_branch_and_mechanic_maps_are_independent() {
        let store = ScheduleStore::new();
        store.put_branch_schedule(BranchId(1), monday_schedule(&["09:00"]));
        assert!(store.mechanic_schedule(UserId(1)).is_none());
        assert!(store.branch_schedule(BranchId(1)).is_some());
    }
}
