//! Service-level error taxonomy.
//!
//! One enum per operation, covering every terminal outcome a caller can
//! observe. None of these is retried internally — a duplicate trait or a
//! spent nullifier does not change on retry — and storage errors never
//! degrade to assumed success.

use pramaan_core::{IdentityId, Modality, ProofId, ValidationError};
use thiserror::Error;

/// Terminal outcomes of enrollment.
#[derive(Error, Debug)]
pub enum EnrollError {
    /// The submitted sample failed validation.
    #[error("invalid sample: {0}")]
    InvalidSample(#[from] ValidationError),

    /// The identity already holds an active commitment for this modality.
    /// Re-enrollment (which deactivates the old record first) is the
    /// explicit path for replacing it.
    #[error("{identity_id} is already enrolled for {modality}")]
    AlreadyEnrolled {
        /// The enrolling identity.
        identity_id: IdentityId,
        /// The modality in question.
        modality: Modality,
    },

    /// The same physical trait already backs an active enrollment somewhere
    /// in the system — possibly at a different organization.
    #[error("this {modality} trait is already enrolled")]
    DuplicateBiometric {
        /// The modality whose global index matched.
        modality: Modality,
    },

    /// Commitment derivation failed.
    #[error("binding failed: {0}")]
    Binding(String),
}

/// Terminal outcomes of proof issuance.
#[derive(Error, Debug)]
pub enum IssueError {
    /// No active commitment for this identity and the sample's modality.
    #[error("{identity_id} has no active {modality} enrollment")]
    NotEnrolled {
        /// The identity attempting attendance.
        identity_id: IdentityId,
        /// The modality of the submitted sample.
        modality: Modality,
    },

    /// The fresh sample does not re-bind to the stored commitment.
    #[error("fresh sample does not match the enrolled {modality} commitment")]
    SampleMismatch {
        /// The modality that failed to bind.
        modality: Modality,
    },

    /// Check-out requested without a verified check-in for the day.
    #[error("no verified check-in for {identity_id} on {day}")]
    NoCheckIn {
        /// The identity attempting check-out.
        identity_id: IdentityId,
        /// The day in question.
        day: pramaan_core::AttendanceDay,
    },

    /// A live proof already occupies the (identity, day, type) slot.
    #[error("attendance already recorded for this slot (proof {existing})")]
    DuplicateAttendance {
        /// The proof holding the slot.
        existing: ProofId,
    },

    /// Proof assembly failed (binding, canonicalization, or backend).
    #[error("proof assembly failed: {0}")]
    Assembly(String),
}

/// Terminal outcome of token decoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be decoded into a reference. Covers every
    /// malformation: bad base64, bad JSON, unknown version, bad field
    /// shapes.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Terminal outcomes of verification, in check order.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Step 1 — the scanned string is not a decodable token.
    #[error(transparent)]
    InvalidToken(#[from] TokenError),

    /// Step 2 — no proof with the referenced identifier.
    #[error("proof {0} not found")]
    ProofNotFound(ProofId),

    /// Step 3 — the proof belongs to a different organization than the
    /// verifying one.
    #[error("proof belongs to a different organization")]
    OrganizationMismatch,

    /// Step 4 — the proof expired before verification.
    #[error("proof {0} has expired")]
    ProofExpired(ProofId),

    /// Step 5 — the proof has already been verified.
    #[error("proof {0} is already verified")]
    AlreadyVerified(ProofId),

    /// Step 6 — the proof's nullifier was consumed by another verification.
    #[error("nullifier already consumed")]
    NullifierReused,

    /// Step 7 — the payload is malformed, fails the backend check, or the
    /// issuer attestation does not verify.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
}
