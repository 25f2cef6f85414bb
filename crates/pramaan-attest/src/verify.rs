//! # Verifier
//!
//! Validates a scanned token and commits the attendance transition. The
//! checks run in a fixed order and each one is a hard fail-stop:
//!
//! 1. decode token            → `InvalidToken`
//! 2. resolve proof           → `ProofNotFound`
//! 3. organization match      → `OrganizationMismatch`
//! 4. expiry                  → `ProofExpired`
//! 5. not already verified    → `AlreadyVerified`
//! 6. nullifier unspent       → `NullifierReused`
//! 7. payload + attestation   → `MalformedProof`
//! 8. atomic commit
//!
//! Steps 2–7 examine a snapshot; the commit in step 8 re-validates the
//! exactly-once conditions inside the store's write lock, so two racing
//! scans of the same token produce one success and one `AlreadyVerified`.
//! Nothing in steps 1–7 mutates state — a proof that fails verification
//! keeps its nullifier unspent.

use std::sync::Arc;

use pramaan_core::{
    AttendanceType, CanonicalBytes, IdentityId, OrganizationId, ProofId, Timestamp, VerifierId,
};
use pramaan_crypto::IssuerPublicKey;
use pramaan_store::{ProofStore, StoreError};
use pramaan_zkp::ProofBackend;
use serde::{Deserialize, Serialize};

use crate::error::VerifyError;
use crate::token;

/// The successful outcome of a verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Always `true` — failures are typed errors, not reports.
    pub verified: bool,
    /// The proof that was consumed.
    pub proof_id: ProofId,
    /// Whose attendance was recorded.
    pub identity_id: IdentityId,
    /// The action that was verified.
    pub attendance_type: AttendanceType,
    /// When the commit happened.
    pub verified_at: Timestamp,
}

/// The verifier. Cheap to clone; shares the proof store.
#[derive(Clone)]
pub struct Verifier {
    proofs: ProofStore,
    backend: Arc<dyn ProofBackend>,
    verifying_key: IssuerPublicKey,
}

impl Verifier {
    /// Construct over the shared proof store, backend, and the issuer
    /// verification key.
    pub fn new(
        proofs: ProofStore,
        backend: Arc<dyn ProofBackend>,
        verifying_key: IssuerPublicKey,
    ) -> Self {
        Self {
            proofs,
            backend,
            verifying_key,
        }
    }

    /// Verify a scanned token on behalf of an organization.
    pub fn verify(
        &self,
        token: &str,
        verifying_organization: OrganizationId,
        verified_by: VerifierId,
    ) -> Result<VerificationReport, VerifyError> {
        self.verify_at(token, verifying_organization, verified_by, Timestamp::now())
    }

    /// [`verify`](Self::verify) with an explicit clock, for tests.
    pub fn verify_at(
        &self,
        token: &str,
        verifying_organization: OrganizationId,
        verified_by: VerifierId,
        now: Timestamp,
    ) -> Result<VerificationReport, VerifyError> {
        // 1. Decode.
        let reference = token::decode(token)?;

        // 2. Resolve.
        let proof = self
            .proofs
            .get(reference.proof_id)
            .ok_or(VerifyError::ProofNotFound(reference.proof_id))?;

        // 3. Organization. The token's truncated prefix must also match the
        // record — a reference stitched onto a foreign proof id fails here.
        if proof.organization_id != verifying_organization
            || reference.org_prefix != proof.organization_id.short_prefix()
        {
            tracing::warn!(
                proof = %proof.proof_id,
                scanning_org = %verifying_organization,
                "organization mismatch on scan"
            );
            return Err(VerifyError::OrganizationMismatch);
        }

        // 4. Expiry.
        if proof.is_expired(now) {
            return Err(VerifyError::ProofExpired(proof.proof_id));
        }

        // 5. Single verification.
        if proof.verification.is_verified {
            return Err(VerifyError::AlreadyVerified(proof.proof_id));
        }

        // 6. Nullifier unspent. Catches a second token referencing the same
        // underlying commitment action.
        if self.proofs.is_nullifier_consumed(&proof.nullifier) {
            return Err(VerifyError::NullifierReused);
        }

        // 7. Payload shape, backend verification, issuer attestation.
        let public = proof.public_inputs();
        let valid = self
            .backend
            .verify(&proof.payload, &public)
            .map_err(|e| VerifyError::MalformedProof(e.to_string()))?;
        if !valid {
            return Err(VerifyError::MalformedProof(
                "payload does not verify against public inputs".to_string(),
            ));
        }
        let signed = CanonicalBytes::new(&serde_json::json!({
            "payload": &proof.payload,
            "public": &public,
        }))
        .map_err(|e| VerifyError::MalformedProof(e.to_string()))?;
        self.verifying_key
            .verify(&signed, &proof.attestation)
            .map_err(|e| VerifyError::MalformedProof(e.to_string()))?;

        // 8. Atomic commit: verification flag + nullifier consumption +
        // day-status transition under one lock. Races re-surface here as
        // the exactly-once errors.
        let committed = self
            .proofs
            .commit_verification(proof.proof_id, verified_by, now)
            .map_err(|e| match e {
                StoreError::ProofAlreadyVerified(id) => VerifyError::AlreadyVerified(id),
                StoreError::NullifierConsumed => VerifyError::NullifierReused,
                StoreError::ProofNotFound(id) => VerifyError::ProofNotFound(id),
                other => VerifyError::MalformedProof(other.to_string()),
            })?;

        tracing::info!(
            proof = %committed.proof_id,
            identity = %committed.identity_id,
            attendance_type = %committed.attendance_type,
            "attendance verified"
        );
        Ok(VerificationReport {
            verified: true,
            proof_id: committed.proof_id,
            identity_id: committed.identity_id,
            attendance_type: committed.attendance_type,
            verified_at: now,
        })
    }
}
