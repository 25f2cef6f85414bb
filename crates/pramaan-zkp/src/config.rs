//! # Backend Configuration
//!
//! Backend selection is an explicit configuration value handed to the
//! services at construction. There is no ambient mode: code that needs a
//! backend receives one, and tests can pin whichever they exercise.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::traits::ProofBackend;
use crate::transparent::TransparentBackend;

/// Which proof scheme a deployment runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProofMode {
    /// Deterministic SHA-256 payloads. Verifiable, not zero-knowledge.
    #[default]
    Transparent,
    /// Pedersen + Schnorr proof of knowledge (requires the `schnorr`
    /// feature).
    #[cfg(feature = "schnorr")]
    Schnorr,
}

/// Proof backend configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// The proof scheme to construct.
    pub mode: ProofMode,
}

impl BackendConfig {
    /// Construct the configured backend.
    pub fn build(&self) -> Arc<dyn ProofBackend> {
        match self.mode {
            ProofMode::Transparent => Arc::new(TransparentBackend::new()),
            #[cfg(feature = "schnorr")]
            ProofMode::Schnorr => Arc::new(crate::schnorr::SchnorrBackend::new()),
        }
    }
}
