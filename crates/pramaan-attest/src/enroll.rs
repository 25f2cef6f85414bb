//! # Enrollment Service
//!
//! Derives a salted commitment from a submitted biometric sample, enforces
//! global trait uniqueness, and owns every mutation of the commitment
//! store. Callers get back a non-secret [`CommitmentHandle`] — never the
//! sample, never the salt.

use std::sync::Arc;

use pramaan_core::{BiometricSample, IdentityId, Modality, OrganizationId, Timestamp};
use pramaan_crypto::Salt;
use pramaan_store::{BiometricCommitment, CommitmentHandle, CommitmentStatus, CommitmentStore, StoreError};
use pramaan_zkp::{LookupHash, ProofBackend};

use crate::error::EnrollError;

/// The enrollment service. Cheap to clone; shares its store.
#[derive(Clone)]
pub struct EnrollmentService {
    commitments: CommitmentStore,
    backend: Arc<dyn ProofBackend>,
}

impl EnrollmentService {
    /// Construct over a commitment store and proof backend.
    pub fn new(commitments: CommitmentStore, backend: Arc<dyn ProofBackend>) -> Self {
        Self {
            commitments,
            backend,
        }
    }

    /// Enroll a biometric sample for an identity.
    ///
    /// Generates a fresh salt, binds the sample, and inserts the active
    /// record — the store enforces both uniqueness constraints in one
    /// atomic step.
    ///
    /// # Errors
    ///
    /// - [`EnrollError::AlreadyEnrolled`] — an active commitment exists for
    ///   this identity/modality; call [`re_enroll`](Self::re_enroll).
    /// - [`EnrollError::DuplicateBiometric`] — the trait is enrolled
    ///   elsewhere in the system (checked across organizations).
    pub fn enroll(
        &self,
        identity_id: IdentityId,
        organization_id: OrganizationId,
        sample: &BiometricSample,
    ) -> Result<CommitmentHandle, EnrollError> {
        let now = Timestamp::now();
        self.enroll_at(identity_id, organization_id, sample, now)
    }

    /// [`enroll`](Self::enroll) with an explicit clock, for tests.
    pub fn enroll_at(
        &self,
        identity_id: IdentityId,
        organization_id: OrganizationId,
        sample: &BiometricSample,
        now: Timestamp,
    ) -> Result<CommitmentHandle, EnrollError> {
        let modality = sample.modality();
        let salt = Salt::generate();
        let commitment = self
            .backend
            .bind(sample, &salt)
            .map_err(|e| EnrollError::Binding(e.to_string()))?;
        // The uniqueness key must stay salt-free: it has to collide for
        // the same trait even though every enrollment gets a fresh salt.
        let lookup_hash =
            LookupHash::derive(sample).map_err(|e| EnrollError::Binding(e.to_string()))?;

        let record = BiometricCommitment {
            identity_id,
            organization_id,
            modality,
            commitment,
            lookup_hash,
            salt,
            status: CommitmentStatus::Active,
            enrolled_at: now,
            updated_at: now,
        };
        let handle = record.handle();

        self.commitments.insert(record).map_err(|e| match e {
            StoreError::CommitmentExists { identity_id, modality } => {
                EnrollError::AlreadyEnrolled {
                    identity_id,
                    modality,
                }
            }
            StoreError::LookupHashTaken { modality } => {
                EnrollError::DuplicateBiometric { modality }
            }
            other => EnrollError::Binding(other.to_string()),
        })?;

        tracing::info!(
            identity = %identity_id,
            organization = %organization_id,
            %modality,
            "biometric enrolled"
        );
        Ok(handle)
    }

    /// Replace an existing enrollment: deactivate the old record, then
    /// enroll the new sample under a fresh salt.
    ///
    /// The deactivation frees the old lookup hash before the new binding is
    /// checked, so re-enrolling the *same* trait for the same person
    /// succeeds, while a trait enrolled by someone else still collides.
    ///
    /// # Errors
    ///
    /// [`EnrollError::AlreadyEnrolled`] is impossible here; the remaining
    /// enrollment errors apply as in [`enroll`](Self::enroll). If there is
    /// no active record to replace, this behaves as a plain enrollment.
    pub fn re_enroll(
        &self,
        identity_id: IdentityId,
        organization_id: OrganizationId,
        sample: &BiometricSample,
    ) -> Result<CommitmentHandle, EnrollError> {
        let now = Timestamp::now();
        // Ignore the not-found case: re-enrolling without a prior record
        // degenerates to enrollment.
        match self
            .commitments
            .deactivate(identity_id, sample.modality(), CommitmentStatus::Inactive, now)
        {
            Ok(old) => {
                tracing::info!(
                    identity = %identity_id,
                    modality = %old.modality,
                    "previous enrollment deactivated for re-enrollment"
                );
            }
            Err(StoreError::CommitmentNotFound { .. }) => {}
            Err(other) => return Err(EnrollError::Binding(other.to_string())),
        }
        self.enroll_at(identity_id, organization_id, sample, now)
    }

    /// Administratively revoke an active enrollment. The record is retained
    /// for audit; the identity can no longer issue proofs for this modality.
    ///
    /// # Errors
    ///
    /// [`EnrollError::AlreadyEnrolled`] never; a missing active record maps
    /// to [`EnrollError::Binding`] with the store's message.
    pub fn revoke(
        &self,
        identity_id: IdentityId,
        modality: Modality,
    ) -> Result<CommitmentHandle, EnrollError> {
        let now = Timestamp::now();
        let record = self
            .commitments
            .deactivate(identity_id, modality, CommitmentStatus::Revoked, now)
            .map_err(|e| EnrollError::Binding(e.to_string()))?;
        tracing::warn!(identity = %identity_id, %modality, "enrollment revoked");
        Ok(record.handle())
    }
}
