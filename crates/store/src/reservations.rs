// Copyright (C) 2026 Revisa Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ephemeral slot reservations.
//!
//! A reservation is claimed between slot selection and inspection
//! creation. The claim is a single conditional insert under one lock,
//! the only place in the engine requiring true mutual exclusion. A
//! claim converted into an inspection is marked consumed and held until
//! the inspection reaches a terminal status; claims never converted
//! expire via the sweep.

use crate::error::StoreError;
use revisa_domain::{BranchId, InspectionId, TimeSlot, UserId};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, PoisonError};
use time::{Date, Duration, OffsetDateTime};
use tracing::debug;

/// Identity of a claimable slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReservationKey {
    /// The branch the slot belongs to.
    pub branch_id: BranchId,
    /// The mechanic the slot is booked with, if any.
    pub mechanic_id: Option<UserId>,
    /// The date of the visit.
    pub date: Date,
    /// The time-of-day slot.
    pub slot: TimeSlot,
}

/// Lifecycle of a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClaimState {
    /// Claimed, not yet converted into an inspection. The timestamp
    /// drives TTL expiry.
    Pending(OffsetDateTime),
    /// Backing a created inspection; exempt from the sweep.
    Consumed(InspectionId),
}

/// In-memory reservation store.
#[derive(Debug, Default)]
pub struct ReservationStore {
    /// Active claims keyed by slot identity.
    claims: Mutex<HashMap<ReservationKey, ClaimState>>,
}

impl ReservationStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a slot: insert-if-absent.
    ///
    /// Atomic with respect to other claims for the same key; of two
    /// simultaneous bookers exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SlotUnavailable` if the slot is already
    /// claimed.
    pub fn claim(&self, key: ReservationKey, now: OffsetDateTime) -> Result<(), StoreError> {
        let mut claims = self.claims.lock().unwrap_or_else(PoisonError::into_inner);
        if claims.contains_key(&key) {
            return Err(StoreError::SlotUnavailable {
                branch_id: key.branch_id,
                date: key.date,
                slot: key.slot,
            });
        }
        claims.insert(key, ClaimState::Pending(now));
        Ok(())
    }

    /// Marks a claim as consumed by a created inspection.
    ///
    /// A consumed claim never expires; it is released when its
    /// inspection reaches a terminal status.
    pub fn consume(&self, key: &ReservationKey, inspection_id: InspectionId) {
        let mut claims = self.claims.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = claims.get_mut(key) {
            *state = ClaimState::Consumed(inspection_id);
        }
    }

    /// Releases a claim (compensating action after a failed creation).
    pub fn release(&self, key: &ReservationKey) {
        self.claims
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Releases the claim consumed by an inspection, returning whether
    /// one was held.
    ///
    /// Keyed by inspection rather than slot identity; the claim was
    /// made with the booking-time mechanic, which a later acceptance
    /// may have changed on the inspection itself.
    pub fn release_for_inspection(&self, inspection_id: InspectionId) -> bool {
        let mut claims = self.claims.lock().unwrap_or_else(PoisonError::into_inner);
        let before: usize = claims.len();
        claims.retain(|_, state| *state != ClaimState::Consumed(inspection_id));
        before != claims.len()
    }

    /// Returns whether a claim currently exists.
    #[must_use]
    pub fn is_claimed(&self, key: &ReservationKey) -> bool {
        self.claims
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Returns the slots reserved for a (branch, mechanic, date).
    ///
    /// A claim without a mechanic consumed a branch slot outright and
    /// counts against every mechanic.
    #[must_use]
    pub fn reserved_slots(
        &self,
        branch_id: BranchId,
        mechanic_id: Option<UserId>,
        date: Date,
    ) -> BTreeSet<TimeSlot> {
        self.claims
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|key| {
                key.branch_id == branch_id
                    && key.date == date
                    && (key.mechanic_id.is_none() || key.mechanic_id == mechanic_id)
            })
            .map(|key| key.slot.clone())
            .collect()
    }

    /// Removes pending claims older than `ttl` and returns how many
    /// expired. Consumed claims are left untouched.
    ///
    /// Run periodically; a claim orphaned by a failed compensating
    /// release is recovered here.
    pub fn sweep_expired(&self, now: OffsetDateTime, ttl: Duration) -> usize {
        let mut claims = self.claims.lock().unwrap_or_else(PoisonError::into_inner);
        let before: usize = claims.len();
        claims.retain(|_, state| match state {
            ClaimState::Pending(claimed_at) => now - *claimed_at < ttl,
            ClaimState::Consumed(_) => true,
        });
        let expired: usize = before - claims.len();
        if expired > 0 {
            debug!(expired, "expired stale reservations");
        }
        expired
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use time::macros::date;

    fn key(slot_value: &str) -> ReservationKey {
        ReservationKey {
            branch_id: BranchId(1),
            mechanic_id: Some(UserId(2)),
            date: date!(2024 - 06 - 10),
            slot: TimeSlot::new(slot_value).unwrap(),
        }
    }

    fn now() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + Duration::days(19_884)
    }

    #[test]
    fn test_claim_is_insert_if_absent() {
        let store = ReservationStore::new();
        assert!(store.claim(key("10:00"), now()).is_ok());
        assert!(matches!(
            store.claim(key("10:00"), now()),
            Err(StoreError::SlotUnavailable { .. })
        ));
        // A different slot is unaffected
        assert!(store.claim(key("11:00"), now()).is_ok());
    }

    #[test]
    fn test_release_returns_slot_to_pool() {
        let store = ReservationStore::new();
        store.claim(key("10:00"), now()).unwrap();
        store.release(&key("10:00"));
        assert!(store.claim(key("10:00"), now()).is_ok());
    }

    #[test]
    fn test_reserved_slots_scoped_to_branch_mechanic_date() {
        let store = ReservationStore::new();
        store.claim(key("10:00"), now()).unwrap();

        let mut other_branch = key("11:00");
        other_branch.branch_id = BranchId(9);
        store.claim(other_branch, now()).unwrap();

        let reserved = store.reserved_slots(BranchId(1), Some(UserId(2)), date!(2024 - 06 - 10));
        assert_eq!(reserved.len(), 1);
        assert!(reserved.contains(&TimeSlot::new("10:00").unwrap()));
    }

    #[test]
    fn test_mechanicless_claim_blocks_every_mechanic() {
        let store = ReservationStore::new();
        let mut open = key("10:00");
        open.mechanic_id = None;
        store.claim(open, now()).unwrap();

        let reserved = store.reserved_slots(BranchId(1), Some(UserId(77)), date!(2024 - 06 - 10));
        assert_eq!(reserved.len(), 1);
    }

    #[test]
    fn test_sweep_expires_only_stale_claims() {
        let store = ReservationStore::new();
        let t0 = now();
        store.claim(key("10:00"), t0).unwrap();
        store.claim(key("11:00"), t0 + Duration::minutes(4)).unwrap();

        let expired = store.sweep_expired(t0 + Duration::minutes(6), Duration::minutes(5));
        assert_eq!(expired, 1);
        assert!(!store.is_claimed(&key("10:00")));
        assert!(store.is_claimed(&key("11:00")));
    }

    #[test]
    fn test_consumed_claim_survives_sweep() {
        let store = ReservationStore::new();
        let t0 = now();
        store.claim(key("10:00"), t0).unwrap();
        store.consume(&key("10:00"), InspectionId(7));

        let expired = store.sweep_expired(t0 + Duration::minutes(60), Duration::minutes(5));
        assert_eq!(expired, 0);
        assert!(store.is_claimed(&key("10:00")));
    }

    #[test]
    fn test_release_for_inspection_frees_consumed_claim() {
        let store = ReservationStore::new();
        store.claim(key("10:00"), now()).unwrap();
        store.consume(&key("10:00"), InspectionId(7));

        assert!(store.release_for_inspection(InspectionId(7)));
        assert!(store.claim(key("10:00"), now()).is_ok());
        // A second release for the same inspection is a no-op
        assert!(!store.release_for_inspection(InspectionId(7)));
    }

    #[test]
    fn test_concurrent_claims_one_winner() {
        let store = Arc::new(ReservationStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.claim(key("10:00"), now()).is_ok()
            }));
        }

        let wins: usize = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
    }
}
