// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection storage.
//!
//! Inspections are single-writer-at-a-time per id: every update carries
//! the version the writer read, and the store rejects the write if the
//! stored version moved on. Records are never deleted; terminal states
//! are retained as history.

use crate::error::StoreError;
use revisa_core::Inspection;
use revisa_domain::{InspectionId, UserId};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Storage seam for inspections.
///
/// The engine depends on this trait, not the concrete store, so tests
/// can inject failing implementations and a database-backed store can
/// slot in without touching the coordinator.
pub trait InspectionRepository: Send + Sync {
    /// Allocates the next inspection id.
    fn next_id(&self) -> InspectionId;

    /// Inserts a freshly created inspection.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken or the underlying
    /// storage rejects the write.
    fn insert(&self, inspection: Inspection) -> Result<Inspection, StoreError>;

    /// Returns an inspection by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id.
    fn get(&self, inspection_id: InspectionId) -> Result<Inspection, StoreError>;

    /// Applies an update via compare-and-swap on the version field.
    ///
    /// `updated.version` must equal the stored version; on success the
    /// store bumps the version and returns the stored copy.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::VersionConflict` if another writer got there
    /// first, `StoreError::NotFound` for an unknown id.
    fn update(&self, updated: Inspection) -> Result<Inspection, StoreError>;

    /// Lists the inspections a requester created, in id order.
    fn list_for_requester(&self, requester_id: UserId) -> Vec<Inspection>;

    /// Lists the inspections assigned to a mechanic, in id order.
    fn list_for_mechanic(&self, mechanic_id: UserId) -> Vec<Inspection>;
}

/// In-memory inspection store.
#[derive(Debug, Default)]
pub struct InspectionStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    inspections: HashMap<InspectionId, Inspection>,
}

impl InspectionStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InspectionRepository for InspectionStore {
    fn next_id(&self) -> InspectionId {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        InspectionId(inner.next_id)
    }

    fn insert(&self, inspection: Inspection) -> Result<Inspection, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id: InspectionId = inspection.inspection_id;
        if inner.inspections.contains_key(&id) {
            return Err(StoreError::NotFound(format!(
                "Insert slot for inspection {id} (id already taken)"
            )));
        }
        inner.inspections.insert(id, inspection.clone());
        Ok(inspection)
    }

    fn get(&self, inspection_id: InspectionId) -> Result<Inspection, StoreError> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .inspections
            .get(&inspection_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Inspection {inspection_id}")))
    }

    fn update(&self, updated: Inspection) -> Result<Inspection, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id: InspectionId = updated.inspection_id;
        let current = inner
            .inspections
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Inspection {id}")))?;

        if current.version != updated.version {
            return Err(StoreError::VersionConflict {
                inspection_id: id,
                expected: updated.version,
                actual: current.version,
            });
        }

        let mut stored: Inspection = updated;
        stored.version += 1;
        inner.inspections.insert(id, stored.clone());
        Ok(stored)
    }

    fn list_for_requester(&self, requester_id: UserId) -> Vec<Inspection> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut result: Vec<Inspection> = inner
            .inspections
            .values()
            .filter(|inspection| inspection.requester_id == requester_id)
            .cloned()
            .collect();
        result.sort_by_key(|inspection| inspection.inspection_id);
        result
    }

    fn list_for_mechanic(&self, mechanic_id: UserId) -> Vec<Inspection> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut result: Vec<Inspection> = inner
            .inspections
            .values()
            .filter(|inspection| inspection.mechanic_id == Some(mechanic_id))
            .cloned()
            .collect();
        result.sort_by_key(|inspection| inspection.inspection_id);
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use revisa_domain::{BranchId, TimeSlot, VehicleId, VehicleRef};
    use time::macros::date;

    fn make_inspection(store: &InspectionStore, requester: i64) -> Inspection {
        let inspection = Inspection::new_pending(
            store.next_id(),
            UserId(requester),
            Some(UserId(50)),
            VehicleRef::Standalone(VehicleId(7)),
            BranchId(1),
            date!(2024 - 06 - 10),
            TimeSlot::new("10:00").unwrap(),
        );
        store.insert(inspection).unwrap()
    }

    #[test]
    fn test_ids_are_monotonic() {
        let store = InspectionStore::new();
        let first = make_inspection(&store, 1);
        let second = make_inspection(&store, 1);
        assert!(second.inspection_id.value() > first.inspection_id.value());
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let store = InspectionStore::new();
        assert!(matches!(
            store.get(InspectionId(404)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_bumps_version() {
        let store = InspectionStore::new();
        let inspection = make_inspection(&store, 1);
        assert_eq!(inspection.version, 0);

        let updated = store.update(inspection).unwrap();
        assert_eq!(updated.version, 1);
    }

    #[test]
    fn test_stale_version_is_rejected() {
        let store = InspectionStore::new();
        let inspection = make_inspection(&store, 1);

        // First writer wins
        store.update(inspection.clone()).unwrap();
        // Second writer still holds version 0
        let result = store.update(inspection);
        assert!(matches!(result, Err(StoreError::VersionConflict { .. })));
    }

    #[test]
    fn test_listing_scopes_by_party() {
        let store = InspectionStore::new();
        make_inspection(&store, 1);
        make_inspection(&store, 1);
        make_inspection(&store, 2);

        assert_eq!(store.list_for_requester(UserId(1)).len(), 2);
        assert_eq!(store.list_for_requester(UserId(2)).len(), 1);
        assert_eq!(store.list_for_mechanic(UserId(50)).len(), 3);
        assert_eq!(store.list_for_mechanic(UserId(51)).len(), 0);
    }
}
