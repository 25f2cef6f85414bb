//! # Commitment Store
//!
//! Thread-safe, cloneable store for biometric commitments. All compound
//! invariant checks — one active record per `(identity, modality)`, global
//! `(modality, lookup_hash)` uniqueness among active records — run inside a
//! single write lock, so concurrent enrollments of the same trait resolve
//! to exactly one winner.
//!
//! The lock is `parking_lot`, not `tokio::sync`: operations are synchronous
//! and never held across `.await` points, and a panicking writer does not
//! poison the store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use pramaan_core::{IdentityId, Modality, Timestamp};
use pramaan_zkp::LookupHash;

use crate::commitment::{BiometricCommitment, CommitmentStatus};
use crate::error::StoreError;

#[derive(Default)]
struct Inner {
    /// Full enrollment history per identity/modality. At most one entry per
    /// key is `Active`; superseded and revoked records stay for audit.
    history: HashMap<(IdentityId, Modality), Vec<BiometricCommitment>>,
    /// Secondary unique index over active records only — the global
    /// cross-organization trait uniqueness check.
    active_lookup: HashMap<(Modality, LookupHash), IdentityId>,
}

/// Thread-safe, cloneable commitment store.
#[derive(Clone, Default)]
pub struct CommitmentStore {
    inner: Arc<RwLock<Inner>>,
}

impl CommitmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new active commitment, enforcing both uniqueness
    /// constraints atomically.
    ///
    /// # Errors
    ///
    /// - [`StoreError::CommitmentExists`] — the identity already has an
    ///   active record for this modality (caller must re-enroll instead).
    /// - [`StoreError::LookupHashTaken`] — another active record of this
    ///   modality, anywhere in the system, owns the lookup hash.
    pub fn insert(&self, record: BiometricCommitment) -> Result<(), StoreError> {
        let mut inner = self.inner.write();

        let key = (record.identity_id, record.modality);
        if inner
            .history
            .get(&key)
            .is_some_and(|records| records.iter().any(|r| r.status.is_active()))
        {
            return Err(StoreError::CommitmentExists {
                identity_id: record.identity_id,
                modality: record.modality,
            });
        }

        let lookup_key = (record.modality, record.lookup_hash);
        if inner.active_lookup.contains_key(&lookup_key) {
            return Err(StoreError::LookupHashTaken {
                modality: record.modality,
            });
        }

        inner.active_lookup.insert(lookup_key, record.identity_id);
        inner.history.entry(key).or_default().push(record);
        Ok(())
    }

    /// The active commitment for an identity/modality, if any.
    pub fn find_active(
        &self,
        identity_id: IdentityId,
        modality: Modality,
    ) -> Option<BiometricCommitment> {
        self.inner
            .read()
            .history
            .get(&(identity_id, modality))
            .and_then(|records| records.iter().find(|r| r.status.is_active()).cloned())
    }

    /// All modalities the identity currently has active commitments for.
    pub fn active_modalities(&self, identity_id: IdentityId) -> Vec<Modality> {
        let inner = self.inner.read();
        Modality::ALL
            .into_iter()
            .filter(|m| {
                inner
                    .history
                    .get(&(identity_id, *m))
                    .is_some_and(|records| records.iter().any(|r| r.status.is_active()))
            })
            .collect()
    }

    /// Deactivate the active commitment for an identity/modality, freeing
    /// its lookup hash for future enrollments. The record itself is
    /// retained with the given terminal status.
    ///
    /// # Errors
    ///
    /// [`StoreError::CommitmentNotFound`] if there is no active record.
    pub fn deactivate(
        &self,
        identity_id: IdentityId,
        modality: Modality,
        status: CommitmentStatus,
        now: Timestamp,
    ) -> Result<BiometricCommitment, StoreError> {
        debug_assert!(!status.is_active(), "deactivate target must be terminal");
        let mut inner = self.inner.write();
        let records = inner
            .history
            .get_mut(&(identity_id, modality))
            .ok_or(StoreError::CommitmentNotFound {
                identity_id,
                modality,
            })?;
        let record = records
            .iter_mut()
            .find(|r| r.status.is_active())
            .ok_or(StoreError::CommitmentNotFound {
                identity_id,
                modality,
            })?;
        record.status = status;
        record.updated_at = now;
        let freed = (record.modality, record.lookup_hash);
        let snapshot = record.clone();
        inner.active_lookup.remove(&freed);
        Ok(snapshot)
    }

    /// Number of records (all statuses) for test assertions.
    pub fn record_count(&self) -> usize {
        self.inner.read().history.values().map(Vec::len).sum()
    }
}
