//! # Proof Issuer
//!
//! Turns a fresh biometric capture into a short-lived attendance proof:
//! re-binds the sample against the stored commitment, derives the
//! nullifier, runs the proof backend over the presence circuit, signs the
//! result, and claims the day slot atomically.
//!
//! The issuer is the only component that ever sees a fresh sample next to
//! a stored salt; neither leaves this module.

use std::sync::Arc;

use chrono::Duration;
use pramaan_core::{
    AttendanceDay, AttendanceType, BiometricSample, CanonicalBytes, GeoPoint, IdentityId,
    OrganizationId, ProofId, Timestamp,
};
use pramaan_crypto::IssuerKey;
use pramaan_store::{AttendanceProof, CommitmentStore, ProofStore, StoreError, VerificationState};
use pramaan_zkp::{Nullifier, PresenceCircuit, PresenceWitness, ProofBackend, PublicInputs};

use crate::error::IssueError;

/// Issuance configuration.
#[derive(Debug, Clone, Copy)]
pub struct IssuerConfig {
    /// How long an issued proof stays scannable. Default five minutes.
    pub ttl: Duration,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(5),
        }
    }
}

/// The proof issuer. Cheap to clone; shares its stores and key.
#[derive(Clone)]
pub struct ProofIssuer {
    commitments: CommitmentStore,
    proofs: ProofStore,
    backend: Arc<dyn ProofBackend>,
    signer: Arc<IssuerKey>,
    config: IssuerConfig,
}

impl ProofIssuer {
    /// Construct over the shared stores, backend, and signing key.
    pub fn new(
        commitments: CommitmentStore,
        proofs: ProofStore,
        backend: Arc<dyn ProofBackend>,
        signer: Arc<IssuerKey>,
        config: IssuerConfig,
    ) -> Self {
        Self {
            commitments,
            proofs,
            backend,
            signer,
            config,
        }
    }

    /// Issue an attendance proof for a fresh sample.
    ///
    /// # Errors
    ///
    /// In precondition order: [`IssueError::NotEnrolled`],
    /// [`IssueError::SampleMismatch`], [`IssueError::NoCheckIn`] (check-out
    /// only), [`IssueError::DuplicateAttendance`].
    #[allow(clippy::too_many_arguments)]
    pub fn issue(
        &self,
        identity_id: IdentityId,
        organization_id: OrganizationId,
        attendance_type: AttendanceType,
        fresh_sample: &BiometricSample,
        day: AttendanceDay,
        location: Option<GeoPoint>,
    ) -> Result<AttendanceProof, IssueError> {
        self.issue_at(
            identity_id,
            organization_id,
            attendance_type,
            fresh_sample,
            day,
            location,
            Timestamp::now(),
        )
    }

    /// [`issue`](Self::issue) with an explicit clock, for tests.
    #[allow(clippy::too_many_arguments)]
    pub fn issue_at(
        &self,
        identity_id: IdentityId,
        organization_id: OrganizationId,
        attendance_type: AttendanceType,
        fresh_sample: &BiometricSample,
        day: AttendanceDay,
        location: Option<GeoPoint>,
        now: Timestamp,
    ) -> Result<AttendanceProof, IssueError> {
        let modality = fresh_sample.modality();

        // Precondition: an active commitment for the sample's modality.
        let enrollment = self
            .commitments
            .find_active(identity_id, modality)
            .ok_or(IssueError::NotEnrolled {
                identity_id,
                modality,
            })?;

        // The fresh capture must re-bind to the enrolled commitment under
        // the stored salt. Constant-time comparison.
        let fresh_binding = self
            .backend
            .bind(fresh_sample, &enrollment.salt)
            .map_err(|e| IssueError::Assembly(e.to_string()))?;
        if !fresh_binding.ct_eq(&enrollment.commitment) {
            tracing::warn!(identity = %identity_id, %modality, "fresh sample failed to bind");
            return Err(IssueError::SampleMismatch { modality });
        }

        // Check-out requires a *verified* check-in on the same day.
        if attendance_type == AttendanceType::CheckOut
            && !self
                .proofs
                .has_verified(identity_id, day, AttendanceType::CheckIn)
        {
            return Err(IssueError::NoCheckIn { identity_id, day });
        }

        let nullifier = Nullifier::derive(&enrollment.commitment, day, attendance_type)
            .map_err(|e| IssueError::Assembly(e.to_string()))?;

        let public = PublicInputs {
            commitment: enrollment.commitment,
            identity_id,
            organization_id,
            day,
            attendance_type,
            issued_at: now,
            location,
        };
        let circuit = PresenceCircuit {
            public: public.clone(),
            witness: PresenceWitness { fresh_binding },
        };
        let payload = self
            .backend
            .prove(&circuit)
            .map_err(|e| IssueError::Assembly(e.to_string()))?;

        // Issuer attestation over the canonical statement plus payload.
        let signed = CanonicalBytes::new(&serde_json::json!({
            "payload": &payload,
            "public": &public,
        }))
        .map_err(|e| IssueError::Assembly(e.to_string()))?;
        let attestation = self.signer.sign(&signed);

        let proof = AttendanceProof {
            proof_id: ProofId::new(),
            identity_id,
            organization_id,
            day,
            attendance_type,
            commitment: enrollment.commitment,
            payload,
            attestation,
            nullifier,
            issued_at: now,
            expires_at: now.plus(self.config.ttl),
            location,
            verification: VerificationState::default(),
        };

        self.proofs.insert(proof.clone(), now).map_err(|e| match e {
            StoreError::SlotOccupied { existing, .. } => {
                IssueError::DuplicateAttendance { existing }
            }
            StoreError::NullifierTaken | StoreError::NullifierConsumed => {
                // The deterministic nullifier collided with a live or spent
                // proof the slot index did not surface — same user-visible
                // outcome as an occupied slot.
                IssueError::DuplicateAttendance {
                    existing: proof.proof_id,
                }
            }
            other => IssueError::Assembly(other.to_string()),
        })?;

        tracing::info!(
            identity = %identity_id,
            proof = %proof.proof_id,
            %attendance_type,
            %day,
            expires_at = %proof.expires_at,
            "attendance proof issued"
        );
        Ok(proof)
    }
}
