//! Storage-layer error types.
//!
//! Each variant names the atomic constraint that rejected the write. The
//! service layer maps these onto the user-visible taxonomy (duplicate
//! biometric, duplicate attendance, nullifier reuse, ...).

use pramaan_core::{AttendanceDay, AttendanceType, IdentityId, Modality, ProofId};
use thiserror::Error;

/// Error from an atomic store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The identity already holds an active commitment for this modality.
    #[error("{identity_id} already has an active {modality} commitment")]
    CommitmentExists {
        /// The enrolling identity.
        identity_id: IdentityId,
        /// The modality being enrolled.
        modality: Modality,
    },

    /// Another identity's active commitment already owns this lookup hash —
    /// the same physical trait is enrolled elsewhere.
    #[error("an active {modality} commitment with this lookup hash already exists")]
    LookupHashTaken {
        /// The modality whose index rejected the write.
        modality: Modality,
    },

    /// No active commitment for the identity/modality.
    #[error("no active {modality} commitment for {identity_id}")]
    CommitmentNotFound {
        /// The identity looked up.
        identity_id: IdentityId,
        /// The modality looked up.
        modality: Modality,
    },

    /// The per-day proof slot is held by a live (unexpired or verified)
    /// proof.
    #[error("slot {identity_id}/{day}/{attendance_type} is occupied by proof {existing}")]
    SlotOccupied {
        /// The identity whose slot is taken.
        identity_id: IdentityId,
        /// The day of the slot.
        day: AttendanceDay,
        /// The attendance action of the slot.
        attendance_type: AttendanceType,
        /// The proof currently holding the slot.
        existing: ProofId,
    },

    /// The nullifier is already bound to an issued, live proof.
    #[error("nullifier is already bound to an issued proof")]
    NullifierTaken,

    /// The nullifier was consumed by a past verification.
    #[error("nullifier has already been consumed")]
    NullifierConsumed,

    /// No proof with this identifier.
    #[error("proof {0} not found")]
    ProofNotFound(ProofId),

    /// The proof has already transitioned to verified.
    #[error("proof {0} is already verified")]
    ProofAlreadyVerified(ProofId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_constraint() {
        let err = StoreError::LookupHashTaken {
            modality: Modality::Fingerprint,
        };
        assert!(format!("{err}").contains("FINGERPRINT"));

        let err = StoreError::ProofNotFound(ProofId::new());
        assert!(format!("{err}").contains("proof:"));
    }
}
