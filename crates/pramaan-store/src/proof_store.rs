//! # Proof Store
//!
//! Thread-safe, cloneable store for attendance proofs. Three indexes hang
//! off the primary records:
//!
//! - `slots` — `(identity, day, attendance_type) → proof`, the per-day
//!   exclusivity constraint. An expired-unverified occupant is superseded
//!   by a new issuance; a live one rejects it.
//! - `issued_nullifiers` — nullifiers of live proofs.
//! - `consumed_nullifiers` — nullifiers spent by a verification commit.
//!   Never garbage-collected: a consumed nullifier stays consumed.
//!
//! The verification commit is the only mutation of an existing record and
//! applies the verified flag, the nullifier consumption, and the day-status
//! transition under one write lock — there is no partial application.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use pramaan_core::{AttendanceDay, AttendanceType, DayStatus, IdentityId, ProofId, Timestamp, VerifierId};
use pramaan_zkp::Nullifier;

use crate::error::StoreError;
use crate::proof::AttendanceProof;

type SlotKey = (IdentityId, AttendanceDay, AttendanceType);

#[derive(Default)]
struct Inner {
    by_id: HashMap<ProofId, AttendanceProof>,
    slots: HashMap<SlotKey, ProofId>,
    issued_nullifiers: HashMap<Nullifier, ProofId>,
    consumed_nullifiers: HashSet<Nullifier>,
    day_status: HashMap<(IdentityId, AttendanceDay), DayStatus>,
}

/// Thread-safe, cloneable attendance proof store.
#[derive(Clone, Default)]
pub struct ProofStore {
    inner: Arc<RwLock<Inner>>,
}

impl ProofStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly issued proof, claiming its day slot and nullifier
    /// atomically.
    ///
    /// An expired, unverified proof holding the slot is superseded: its
    /// record and nullifier binding are dropped so the deterministic
    /// nullifier of the re-issuance can take their place. A live occupant
    /// rejects the insert.
    ///
    /// # Errors
    ///
    /// - [`StoreError::SlotOccupied`] — a live proof holds the slot.
    /// - [`StoreError::NullifierConsumed`] — the action was already
    ///   verified once (replay of a spent authorization).
    /// - [`StoreError::NullifierTaken`] — a live proof elsewhere carries
    ///   the same nullifier.
    pub fn insert(&self, proof: AttendanceProof, now: Timestamp) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let slot = (proof.identity_id, proof.day, proof.attendance_type);

        if let Some(existing_id) = inner.slots.get(&slot).copied() {
            let live = inner
                .by_id
                .get(&existing_id)
                .is_some_and(|existing| existing.is_live(now));
            if live {
                return Err(StoreError::SlotOccupied {
                    identity_id: proof.identity_id,
                    day: proof.day,
                    attendance_type: proof.attendance_type,
                    existing: existing_id,
                });
            }
            // Supersede the expired, unverified occupant.
            if let Some(stale) = inner.by_id.remove(&existing_id) {
                inner.issued_nullifiers.remove(&stale.nullifier);
            }
            inner.slots.remove(&slot);
        }

        if inner.consumed_nullifiers.contains(&proof.nullifier) {
            return Err(StoreError::NullifierConsumed);
        }
        if inner.issued_nullifiers.contains_key(&proof.nullifier) {
            return Err(StoreError::NullifierTaken);
        }

        inner.slots.insert(slot, proof.proof_id);
        inner.issued_nullifiers.insert(proof.nullifier, proof.proof_id);
        inner.by_id.insert(proof.proof_id, proof);
        Ok(())
    }

    /// Resolve a proof by its identifier.
    pub fn get(&self, proof_id: ProofId) -> Option<AttendanceProof> {
        self.inner.read().by_id.get(&proof_id).cloned()
    }

    /// Whether a verified proof exists for the slot. The check-out
    /// precondition reads this.
    pub fn has_verified(
        &self,
        identity_id: IdentityId,
        day: AttendanceDay,
        attendance_type: AttendanceType,
    ) -> bool {
        let inner = self.inner.read();
        inner
            .slots
            .get(&(identity_id, day, attendance_type))
            .and_then(|id| inner.by_id.get(id))
            .is_some_and(|proof| proof.verification.is_verified)
    }

    /// Whether a nullifier has been consumed by a past verification.
    pub fn is_nullifier_consumed(&self, nullifier: &Nullifier) -> bool {
        self.inner.read().consumed_nullifiers.contains(nullifier)
    }

    /// The verified day status for an identity.
    pub fn day_status(&self, identity_id: IdentityId, day: AttendanceDay) -> DayStatus {
        self.inner
            .read()
            .day_status
            .get(&(identity_id, day))
            .copied()
            .unwrap_or_default()
    }

    /// The single atomic verification commit.
    ///
    /// Re-validates the exactly-once conditions under the write lock (the
    /// verifier's earlier checks ran on a snapshot), then applies all three
    /// effects together: verification state, nullifier consumption, day
    /// status.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ProofNotFound`] — unknown identifier.
    /// - [`StoreError::ProofAlreadyVerified`] — the transition already
    ///   happened.
    /// - [`StoreError::NullifierConsumed`] — the nullifier was spent by a
    ///   different proof.
    pub fn commit_verification(
        &self,
        proof_id: ProofId,
        verified_by: VerifierId,
        now: Timestamp,
    ) -> Result<AttendanceProof, StoreError> {
        let mut inner = self.inner.write();

        let proof = inner
            .by_id
            .get(&proof_id)
            .ok_or(StoreError::ProofNotFound(proof_id))?;
        if proof.verification.is_verified {
            return Err(StoreError::ProofAlreadyVerified(proof_id));
        }
        if inner.consumed_nullifiers.contains(&proof.nullifier) {
            return Err(StoreError::NullifierConsumed);
        }

        let nullifier = proof.nullifier;
        let status_key = (proof.identity_id, proof.day);
        let attendance_type = proof.attendance_type;

        // All three effects under the same lock.
        let proof = inner
            .by_id
            .get_mut(&proof_id)
            .ok_or(StoreError::ProofNotFound(proof_id))?;
        proof.verification.is_verified = true;
        proof.verification.verified_at = Some(now);
        proof.verification.verified_by = Some(verified_by);
        let snapshot = proof.clone();

        inner.consumed_nullifiers.insert(nullifier);
        let status = inner.day_status.entry(status_key).or_default();
        *status = status.after(attendance_type);

        Ok(snapshot)
    }

    /// Number of stored proofs, for test assertions.
    pub fn proof_count(&self) -> usize {
        self.inner.read().by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pramaan_core::{GeoPoint, OrganizationId};
    use pramaan_crypto::IssuerSignature;
    use pramaan_zkp::{Commitment, ProofPayload, ProofScheme};
    use crate::proof::VerificationState;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn proof(identity: IdentityId, attendance_type: AttendanceType, nullifier_byte: u8) -> AttendanceProof {
        AttendanceProof {
            proof_id: ProofId::new(),
            identity_id: identity,
            organization_id: OrganizationId::new(),
            day: AttendanceDay::parse("2024-01-15").unwrap(),
            attendance_type,
            commitment: Commitment::from_bytes([1; 32]),
            payload: ProofPayload {
                scheme: ProofScheme::TransparentSha256,
                proof_hex: "ab".repeat(32),
            },
            attestation: IssuerSignature::from_bytes([0; 64]),
            nullifier: Nullifier::from_bytes([nullifier_byte; 32]),
            issued_at: ts("2024-01-15T08:30:00Z"),
            expires_at: ts("2024-01-15T08:35:00Z"),
            location: GeoPoint::new(0, 0, None).ok(),
            verification: VerificationState::default(),
        }
    }

    #[test]
    fn insert_and_resolve() {
        let store = ProofStore::new();
        let p = proof(IdentityId::new(), AttendanceType::CheckIn, 1);
        let id = p.proof_id;
        store.insert(p, ts("2024-01-15T08:30:00Z")).unwrap();
        assert!(store.get(id).is_some());
        assert!(store.get(ProofId::new()).is_none());
    }

    #[test]
    fn live_slot_rejects_second_proof() {
        let store = ProofStore::new();
        let identity = IdentityId::new();
        let now = ts("2024-01-15T08:31:00Z");
        store
            .insert(proof(identity, AttendanceType::CheckIn, 1), now)
            .unwrap();
        let err = store
            .insert(proof(identity, AttendanceType::CheckIn, 2), now)
            .unwrap_err();
        assert!(matches!(err, StoreError::SlotOccupied { .. }));
    }

    #[test]
    fn expired_unverified_slot_is_superseded() {
        let store = ProofStore::new();
        let identity = IdentityId::new();
        store
            .insert(proof(identity, AttendanceType::CheckIn, 1), ts("2024-01-15T08:30:00Z"))
            .unwrap();
        // Past expiry — the slot frees up, and the replacement may carry
        // the same deterministic nullifier.
        store
            .insert(proof(identity, AttendanceType::CheckIn, 1), ts("2024-01-15T09:00:00Z"))
            .unwrap();
        assert_eq!(store.proof_count(), 1);
    }

    #[test]
    fn verified_slot_never_superseded() {
        let store = ProofStore::new();
        let identity = IdentityId::new();
        let p = proof(identity, AttendanceType::CheckIn, 1);
        let id = p.proof_id;
        store.insert(p, ts("2024-01-15T08:30:00Z")).unwrap();
        store
            .commit_verification(id, VerifierId::new(), ts("2024-01-15T08:32:00Z"))
            .unwrap();
        // Long after expiry, the verified proof still owns the slot.
        let err = store
            .insert(proof(identity, AttendanceType::CheckIn, 2), ts("2024-01-15T12:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, StoreError::SlotOccupied { .. }));
    }

    #[test]
    fn commit_verification_is_exactly_once() {
        let store = ProofStore::new();
        let p = proof(IdentityId::new(), AttendanceType::CheckIn, 1);
        let id = p.proof_id;
        store.insert(p, ts("2024-01-15T08:30:00Z")).unwrap();

        let verified = store
            .commit_verification(id, VerifierId::new(), ts("2024-01-15T08:32:00Z"))
            .unwrap();
        assert!(verified.verification.is_verified);
        assert!(verified.verification.verified_at.is_some());

        let err = store
            .commit_verification(id, VerifierId::new(), ts("2024-01-15T08:33:00Z"))
            .unwrap_err();
        assert!(matches!(err, StoreError::ProofAlreadyVerified(_)));
    }

    #[test]
    fn commit_consumes_nullifier_and_advances_day_status() {
        let store = ProofStore::new();
        let identity = IdentityId::new();
        let day = AttendanceDay::parse("2024-01-15").unwrap();
        let check_in = proof(identity, AttendanceType::CheckIn, 1);
        let nullifier = check_in.nullifier;
        let id = check_in.proof_id;
        store.insert(check_in, ts("2024-01-15T08:30:00Z")).unwrap();

        assert_eq!(store.day_status(identity, day), DayStatus::Absent);
        assert!(!store.is_nullifier_consumed(&nullifier));

        store
            .commit_verification(id, VerifierId::new(), ts("2024-01-15T08:32:00Z"))
            .unwrap();

        assert_eq!(store.day_status(identity, day), DayStatus::CheckedIn);
        assert!(store.is_nullifier_consumed(&nullifier));
        assert!(store.has_verified(identity, day, AttendanceType::CheckIn));
    }

    #[test]
    fn check_out_commit_completes_the_day() {
        let store = ProofStore::new();
        let identity = IdentityId::new();
        let day = AttendanceDay::parse("2024-01-15").unwrap();
        let check_in = proof(identity, AttendanceType::CheckIn, 1);
        let in_id = check_in.proof_id;
        store.insert(check_in, ts("2024-01-15T08:30:00Z")).unwrap();
        store
            .commit_verification(in_id, VerifierId::new(), ts("2024-01-15T08:32:00Z"))
            .unwrap();

        let check_out = proof(identity, AttendanceType::CheckOut, 2);
        let out_id = check_out.proof_id;
        store.insert(check_out, ts("2024-01-15T17:00:00Z")).unwrap();
        store
            .commit_verification(out_id, VerifierId::new(), ts("2024-01-15T17:01:00Z"))
            .unwrap();

        assert_eq!(store.day_status(identity, day), DayStatus::CheckedOut);
    }

    #[test]
    fn consumed_nullifier_blocks_reissue() {
        let store = ProofStore::new();
        let identity = IdentityId::new();
        let p = proof(identity, AttendanceType::CheckIn, 1);
        let id = p.proof_id;
        store.insert(p, ts("2024-01-15T08:30:00Z")).unwrap();
        store
            .commit_verification(id, VerifierId::new(), ts("2024-01-15T08:32:00Z"))
            .unwrap();

        // A different identity somehow presenting the same nullifier is a
        // replay of a spent authorization, even with a free slot.
        let err = store
            .insert(proof(IdentityId::new(), AttendanceType::CheckIn, 1), ts("2024-01-15T08:40:00Z"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NullifierConsumed));
    }

    #[test]
    fn duplicate_nullifier_across_live_proofs_rejected() {
        let store = ProofStore::new();
        let now = ts("2024-01-15T08:30:00Z");
        store
            .insert(proof(IdentityId::new(), AttendanceType::CheckIn, 7), now)
            .unwrap();
        let err = store
            .insert(proof(IdentityId::new(), AttendanceType::CheckIn, 7), now)
            .unwrap_err();
        assert!(matches!(err, StoreError::NullifierTaken));
    }

    #[test]
    fn concurrent_slot_claims_one_winner() {
        let store = ProofStore::new();
        let identity = IdentityId::new();
        let now = ts("2024-01-15T08:30:00Z");
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.insert(proof(identity, AttendanceType::CheckIn, i), now)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(store.proof_count(), 1);
    }

    #[test]
    fn concurrent_verifications_one_winner() {
        let store = ProofStore::new();
        let p = proof(IdentityId::new(), AttendanceType::CheckIn, 1);
        let id = p.proof_id;
        store.insert(p, ts("2024-01-15T08:30:00Z")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.commit_verification(id, VerifierId::new(), ts("2024-01-15T08:32:00Z"))
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    }
}
