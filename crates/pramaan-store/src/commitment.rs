//! # Biometric Commitment Record
//!
//! The persisted enrollment of one biometric modality for one identity.
//! Owned by the enrollment service — nothing else writes it. Deactivated
//! records are retained for audit and excluded from uniqueness and
//! verification lookups.

use pramaan_core::{IdentityId, Modality, OrganizationId, Timestamp};
use pramaan_crypto::Salt;
use pramaan_zkp::{Commitment, LookupHash};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a commitment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitmentStatus {
    /// Participates in uniqueness and verification lookups.
    Active,
    /// Superseded by re-enrollment. Retained for audit.
    Inactive,
    /// Administratively revoked. Retained for audit.
    Revoked,
}

impl CommitmentStatus {
    /// String representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Revoked => "REVOKED",
        }
    }

    /// Whether records in this status participate in lookups.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for CommitmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A salted biometric commitment, one per identity per modality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiometricCommitment {
    /// The enrolled person.
    pub identity_id: IdentityId,
    /// The organization the person enrolled under. Uniqueness of the
    /// underlying trait is still checked globally, across organizations.
    pub organization_id: OrganizationId,
    /// The biometric modality this record binds.
    pub modality: Modality,
    /// The salted binding of the template.
    pub commitment: Commitment,
    /// The uniqueness-index key, derived from the template alone so the
    /// same trait collides across enrollments regardless of salt.
    pub lookup_hash: LookupHash,
    /// The enrollment salt. Never rotated; re-enrollment creates a new
    /// record with a new salt. Never crosses the service boundary.
    pub salt: Salt,
    /// Lifecycle status.
    pub status: CommitmentStatus,
    /// When the record was created.
    pub enrolled_at: Timestamp,
    /// Last status change.
    pub updated_at: Timestamp,
}

impl BiometricCommitment {
    /// The non-secret handle returned to callers: identifies the enrollment
    /// without exposing salt or template-adjacent material.
    pub fn handle(&self) -> CommitmentHandle {
        CommitmentHandle {
            identity_id: self.identity_id,
            organization_id: self.organization_id,
            modality: self.modality,
            lookup_hash: self.lookup_hash,
            enrolled_at: self.enrolled_at,
        }
    }
}

/// The caller-facing result of an enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitmentHandle {
    /// The enrolled person.
    pub identity_id: IdentityId,
    /// The enrolling organization.
    pub organization_id: OrganizationId,
    /// The enrolled modality.
    pub modality: Modality,
    /// The uniqueness-index key. One hash further from the template than
    /// the commitment; safe to return.
    pub lookup_hash: LookupHash,
    /// When the enrollment happened.
    pub enrolled_at: Timestamp,
}
