//! # Schnorr Backend (Feature-Gated)
//!
//! Stub of the Pedersen-commitment + Schnorr proof-of-knowledge backend.
//! Gated behind the `schnorr` Cargo feature; integrates with
//! `curve25519-dalek` (Ristretto group) when the dependency lands in the
//! workspace.
//!
//! ## Scheme Outline
//!
//! - **Commitment**: `C = g^m · h^r` over Ristretto, where `m` is the
//!   template digest mapped to a scalar, `r` the enrollment salt scalar,
//!   and `g, h` fixed independent bases.
//! - **Proof**: Schnorr proof of knowledge of `(m, r)` opening `C`, with
//!   the Fiat–Shamir challenge bound to the canonical public inputs — so a
//!   payload cannot be replayed under a different day or attendance type.
//! - **Payload**: the serialized `(R, s_m, s_r)` tuple, 128 hex chars.
//!
//! Unlike the transparent backend, verification here demonstrates knowledge
//! of the commitment *opening*, which only a holder of a matching fresh
//! sample (plus the stored salt) can produce.
//!
//! ## Integration Plan
//!
//! 1. Add `curve25519-dalek` to the workspace dependency table.
//! 2. Derive `h` from a domain-separated hash-to-group of `g`.
//! 3. Implement scalar mapping for template digests (wide reduction).
//! 4. Replace the `todo!()` bodies below and drop the stub markers.

use pramaan_core::BiometricSample;
use pramaan_crypto::Salt;

use crate::circuit::{PresenceCircuit, PublicInputs};
use crate::commitment::Commitment;
use crate::payload::{ProofPayload, ProofScheme};
use crate::traits::{BindError, ProofBackend, ProofError, ProofVerifyError};

/// The Pedersen/Schnorr proof-of-knowledge backend. Stub.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchnorrBackend;

impl SchnorrBackend {
    /// Construct the backend.
    pub fn new() -> Self {
        Self
    }
}

impl ProofBackend for SchnorrBackend {
    fn scheme(&self) -> ProofScheme {
        ProofScheme::Schnorr
    }

    fn bind(&self, _sample: &BiometricSample, _salt: &Salt) -> Result<Commitment, BindError> {
        todo!("Pedersen commitment over Ristretto — pending curve25519-dalek integration")
    }

    fn prove(&self, _circuit: &PresenceCircuit) -> Result<ProofPayload, ProofError> {
        todo!("Schnorr proof of knowledge of the commitment opening")
    }

    fn verify(
        &self,
        _payload: &ProofPayload,
        _public: &PublicInputs,
    ) -> Result<bool, ProofVerifyError> {
        todo!("Schnorr verification with Fiat–Shamir challenge over canonical public inputs")
    }
}
