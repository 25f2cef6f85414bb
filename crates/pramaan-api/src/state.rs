//! # Application State
//!
//! Shared state for the Axum application, passed to handlers via the
//! `State` extractor. Holds the three services over their shared stores;
//! the services themselves are cheap clones around `Arc`ed internals.

use std::sync::Arc;

use pramaan_attest::{EnrollmentService, IssuerConfig, ProofIssuer, Verifier};
use pramaan_crypto::IssuerKey;
use pramaan_store::{CommitmentStore, ProofStore};
use pramaan_zkp::{BackendConfig, ProofMode};

/// Application configuration, assembled from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Which proof backend the deployment runs.
    pub proof_mode: ProofMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            proof_mode: ProofMode::Transparent,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Enrollment service (owns commitment mutations).
    pub enrollment: EnrollmentService,
    /// Proof issuer.
    pub issuer: ProofIssuer,
    /// Verifier.
    pub verifier: Verifier,
    /// Proof store, for read-side day-status queries.
    pub proofs: ProofStore,
}

impl AppState {
    /// Wire up stores, backend, and services from configuration.
    ///
    /// The issuer key is generated at startup; the verifier gets its public
    /// half. A multi-process deployment would load the key from a secret
    /// store instead.
    pub fn new(config: &AppConfig) -> Self {
        let commitments = CommitmentStore::new();
        let proofs = ProofStore::new();
        let backend = BackendConfig {
            mode: config.proof_mode,
        }
        .build();
        let issuer_key = Arc::new(IssuerKey::generate());
        let verifying_key = issuer_key.public_key();

        Self {
            enrollment: EnrollmentService::new(commitments.clone(), backend.clone()),
            issuer: ProofIssuer::new(
                commitments,
                proofs.clone(),
                backend.clone(),
                issuer_key,
                IssuerConfig::default(),
            ),
            verifier: Verifier::new(proofs.clone(), backend, verifying_key),
            proofs,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
