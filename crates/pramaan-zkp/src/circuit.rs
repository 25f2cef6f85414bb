//! # Presence Circuit
//!
//! The statement an attendance proof asserts, split into public inputs
//! (what the verifier sees) and the private witness (what only the prover
//! holds). The transparent backend hashes this data model; a real
//! proof-of-knowledge backend compiles it to constraints.

use pramaan_core::{
    AttendanceDay, AttendanceType, GeoPoint, IdentityId, OrganizationId, Timestamp,
};
use serde::{Deserialize, Serialize};

use crate::commitment::Commitment;

/// Public inputs of a presence proof.
///
/// Everything here is visible to (and re-checked by) the verifier. The
/// canonical serialization of this struct is the exact byte string the
/// issuer attestation signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInputs {
    /// The enrolled commitment the proof speaks for.
    pub commitment: Commitment,
    /// The person asserting presence.
    pub identity_id: IdentityId,
    /// The organization the attendance belongs to.
    pub organization_id: OrganizationId,
    /// The calendar day the action is bound to.
    pub day: AttendanceDay,
    /// Check-in or check-out.
    pub attendance_type: AttendanceType,
    /// When the proof was issued.
    pub issued_at: Timestamp,
    /// Where the sample was captured, if the capture device reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// Private witness of a presence proof.
///
/// The fresh binding is the commitment recomputed from the sample captured
/// at attendance time under the stored enrollment salt. A prover without a
/// matching live sample cannot produce it.
#[derive(Debug, Clone)]
pub struct PresenceWitness {
    /// `bind(fresh_sample, stored_salt)` — must equal the public commitment.
    pub fresh_binding: Commitment,
}

/// A full presence circuit: public statement plus witness.
#[derive(Debug, Clone)]
pub struct PresenceCircuit {
    /// The public statement.
    pub public: PublicInputs,
    /// The private witness.
    pub witness: PresenceWitness,
}

impl PresenceCircuit {
    /// Whether the witness satisfies the circuit's binding constraint.
    ///
    /// Constant-time on the commitment comparison.
    pub fn witness_satisfies(&self) -> bool {
        self.witness.fresh_binding.ct_eq(&self.public.commitment)
    }
}
