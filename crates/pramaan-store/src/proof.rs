//! # Attendance Proof Record
//!
//! One issued attendance proof. Created by the proof issuer, mutated
//! exactly once (the verification commit) by the verifier. State machine: `Issued → Verified` (terminal); expiry is an
//! implicit transition read off the clock, never stored.

use pramaan_core::{
    AttendanceDay, AttendanceType, GeoPoint, IdentityId, OrganizationId, ProofId, Timestamp,
    VerifierId,
};
use pramaan_zkp::{Commitment, Nullifier, ProofPayload, PublicInputs};
use pramaan_crypto::IssuerSignature;
use serde::{Deserialize, Serialize};

/// The single verification transition of a proof.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationState {
    /// Whether the proof has been verified. Set at most once.
    pub is_verified: bool,
    /// When the verification commit happened.
    pub verified_at: Option<Timestamp>,
    /// Which verifier committed it.
    pub verified_by: Option<VerifierId>,
}

/// An issued attendance proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceProof {
    /// Unique handle, referenced by the scannable token.
    pub proof_id: ProofId,
    /// The person asserting presence.
    pub identity_id: IdentityId,
    /// The organization attendance is recorded for.
    pub organization_id: OrganizationId,
    /// The midnight-normalized day the action is bound to.
    pub day: AttendanceDay,
    /// Check-in or check-out.
    pub attendance_type: AttendanceType,
    /// The commitment the proof speaks for (a public input).
    pub commitment: Commitment,
    /// The cryptographic assertion, opaque to transport.
    pub payload: ProofPayload,
    /// Issuer attestation over the canonical public inputs and payload.
    pub attestation: IssuerSignature,
    /// Replay-detection value; globally unique among live proofs, consumed
    /// forever on verification.
    pub nullifier: Nullifier,
    /// Issuance instant.
    pub issued_at: Timestamp,
    /// Hard expiry: the proof is unusable after this instant regardless of
    /// verification state.
    pub expires_at: Timestamp,
    /// Capture location, if reported.
    pub location: Option<GeoPoint>,
    /// Verification state. Transitions exactly once.
    pub verification: VerificationState,
}

impl AttendanceProof {
    /// Whether the proof is past its expiry at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Whether the proof still holds its day slot at `now`.
    ///
    /// Verified proofs hold their slot forever (the attendance happened);
    /// unverified proofs hold it only until expiry, after which the slot
    /// can be re-issued.
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.verification.is_verified || !self.is_expired(now)
    }

    /// Reassemble the public inputs this proof's payload and attestation
    /// are bound to.
    pub fn public_inputs(&self) -> PublicInputs {
        PublicInputs {
            commitment: self.commitment,
            identity_id: self.identity_id,
            organization_id: self.organization_id,
            day: self.day,
            attendance_type: self.attendance_type,
            issued_at: self.issued_at,
            location: self.location,
        }
    }
}
