//! # Proof Backend Trait (Sealed)
//!
//! The capability the enrollment, issuance, and verification services
//! program against. All backends (transparent, Schnorr) implement this
//! trait.
//!
//! ## Sealed Trait
//!
//! `ProofBackend` is **sealed**: only implementations inside `pramaan-zkp`
//! can exist. An attendance deployment must not be able to inject an
//! unauthorized proof scheme — the accepted schemes are a property of the
//! stack, not of the caller.
//!
//! The trait is object-safe on purpose: backend selection is a runtime
//! configuration value, so services hold an `Arc<dyn ProofBackend>`.

use pramaan_core::BiometricSample;
use pramaan_crypto::Salt;
use thiserror::Error;

use crate::circuit::{PresenceCircuit, PublicInputs};
use crate::commitment::Commitment;
use crate::payload::{ProofPayload, ProofScheme};

/// Error deriving a commitment from a sample and salt.
#[derive(Error, Debug)]
pub enum BindError {
    /// Canonicalization of the binding input failed.
    #[error("binding canonicalization failed: {0}")]
    Canonicalization(String),
}

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The witness does not satisfy the circuit (fresh binding does not
    /// open the public commitment).
    #[error("witness does not satisfy the presence circuit")]
    UnsatisfiedWitness,
    /// Proof generation failed internally.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// Error during proof verification.
#[derive(Error, Debug)]
pub enum ProofVerifyError {
    /// The payload is structurally malformed (unknown shape, bad hex).
    #[error("malformed proof payload: {0}")]
    MalformedPayload(String),
    /// The payload was produced under a different scheme than this backend.
    #[error("scheme mismatch: payload is {payload}, backend is {backend}")]
    SchemeMismatch {
        /// Scheme recorded in the payload.
        payload: ProofScheme,
        /// Scheme of the verifying backend.
        backend: ProofScheme,
    },
    /// Verification failed internally.
    #[error("proof verification failed: {0}")]
    VerificationFailed(String),
}

/// Private module sealing [`ProofBackend`].
mod private {
    /// Sealing marker. Not nameable outside `pramaan-zkp`.
    pub trait Sealed {}
}

/// Sealed capability for deriving commitments and producing/checking
/// presence proofs.
///
/// `Send + Sync` because the API layer issues and verifies concurrently.
/// All three operations are pure computation — storage, uniqueness, and
/// replay enforcement live above this trait.
pub trait ProofBackend: private::Sealed + Send + Sync {
    /// The scheme this backend produces and accepts.
    fn scheme(&self) -> ProofScheme;

    /// Derive the salted commitment for a biometric template.
    ///
    /// Deterministic in `(sample, salt)`: the issuer recomputes it from the
    /// fresh sample to decide whether the holder matches the enrollment.
    fn bind(&self, sample: &BiometricSample, salt: &Salt) -> Result<Commitment, BindError>;

    /// Produce a proof payload for a satisfied presence circuit.
    ///
    /// # Errors
    ///
    /// [`ProofError::UnsatisfiedWitness`] if the witness binding does not
    /// open the public commitment — the caller surfaces this as a sample
    /// mismatch.
    fn prove(&self, circuit: &PresenceCircuit) -> Result<ProofPayload, ProofError>;

    /// Check a payload against public inputs.
    ///
    /// Returns `Ok(true)` for a valid payload, `Ok(false)` for a
    /// well-formed payload that does not verify.
    fn verify(
        &self,
        payload: &ProofPayload,
        public: &PublicInputs,
    ) -> Result<bool, ProofVerifyError>;
}

// ---- Sealed implementations ----

impl private::Sealed for crate::transparent::TransparentBackend {}

#[cfg(feature = "schnorr")]
impl private::Sealed for crate::schnorr::SchnorrBackend {}
