//! # Transparent Backend
//!
//! A deterministic SHA-256 proof backend. Produces payloads that are
//! verifiable by recomputation but provide **no zero-knowledge
//! guarantees** — anyone holding the commitment can reproduce the proof
//! digest for given public inputs.
//!
//! ## How It Works
//!
//! - `bind()` computes
//!   `SHA256(canonical({modality, salt, template}))` with template and salt
//!   hex-encoded. Without the salt, the same template yields an unlinkable
//!   commitment; without the template, the commitment reveals nothing.
//! - `prove()` checks the witness opens the public commitment, then
//!   computes `SHA256(canonical(public_inputs) || witness_binding)`.
//! - `verify()` recomputes the same digest from the public inputs and the
//!   public commitment and compares.
//!
//! Because the witness binding equals the public commitment whenever the
//! circuit is satisfied, verification needs no witness — and that is
//! precisely why this scheme is transparent rather than zero-knowledge: the
//! proof demonstrates possession of the *commitment*, not of a live sample.
//! The unforgeability of issuance therefore rests on the issuer performing
//! the bind-and-compare step against a fresh capture, and on the issuer
//! attestation layered above this backend.

use pramaan_core::{sha256_digest, BiometricSample, CanonicalBytes};
use pramaan_crypto::Salt;
use sha2::{Digest, Sha256};

use crate::circuit::{PresenceCircuit, PublicInputs};
use crate::commitment::Commitment;
use crate::payload::{ProofPayload, ProofScheme};
use crate::traits::{BindError, ProofBackend, ProofError, ProofVerifyError};

/// The deterministic SHA-256 backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransparentBackend;

impl TransparentBackend {
    /// Construct the backend.
    pub fn new() -> Self {
        Self
    }

    /// The digest every valid payload for `public` must equal:
    /// `SHA256(canonical(public) || commitment_bytes)`.
    fn expected_digest(public: &PublicInputs) -> Result<String, ProofVerifyError> {
        let canonical = CanonicalBytes::new(public)
            .map_err(|e| ProofVerifyError::VerificationFailed(e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hasher.update(public.commitment.as_bytes());
        Ok(hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect())
    }
}

impl ProofBackend for TransparentBackend {
    fn scheme(&self) -> ProofScheme {
        ProofScheme::TransparentSha256
    }

    fn bind(&self, sample: &BiometricSample, salt: &Salt) -> Result<Commitment, BindError> {
        let template_hex: String = sample.as_bytes().iter().map(|b| format!("{b:02x}")).collect();
        let canonical = CanonicalBytes::new(&serde_json::json!({
            "modality": sample.modality(),
            "salt": salt.to_hex(),
            "template": template_hex,
        }))
        .map_err(|e| BindError::Canonicalization(e.to_string()))?;
        Ok(Commitment::from_bytes(sha256_digest(&canonical).bytes))
    }

    fn prove(&self, circuit: &PresenceCircuit) -> Result<ProofPayload, ProofError> {
        if !circuit.witness_satisfies() {
            return Err(ProofError::UnsatisfiedWitness);
        }
        let canonical = CanonicalBytes::new(&circuit.public)
            .map_err(|e| ProofError::GenerationFailed(e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hasher.update(circuit.witness.fresh_binding.as_bytes());
        let proof_hex = hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Ok(ProofPayload {
            scheme: ProofScheme::TransparentSha256,
            proof_hex,
        })
    }

    fn verify(
        &self,
        payload: &ProofPayload,
        public: &PublicInputs,
    ) -> Result<bool, ProofVerifyError> {
        if payload.scheme != self.scheme() {
            return Err(ProofVerifyError::SchemeMismatch {
                payload: payload.scheme,
                backend: self.scheme(),
            });
        }
        if !payload.is_well_formed() {
            return Err(ProofVerifyError::MalformedPayload(format!(
                "expected 64 hex chars, got {}",
                payload.proof_hex.len()
            )));
        }
        Ok(payload.proof_hex == Self::expected_digest(public)?)
    }
}
