//! # Proof Payload
//!
//! The opaque assertion stored on an attendance proof record. Transport
//! layers never decompose it — the scannable token carries a *reference* to
//! the proof, not this payload.

use serde::{Deserialize, Serialize};

/// The scheme a payload was produced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProofScheme {
    /// Deterministic SHA-256 over the canonical circuit. Not zero-knowledge.
    TransparentSha256,
    /// Pedersen commitment + Schnorr proof of knowledge of the opening.
    Schnorr,
}

impl ProofScheme {
    /// String representation of this scheme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransparentSha256 => "transparent-sha256",
            Self::Schnorr => "schnorr",
        }
    }
}

impl std::fmt::Display for ProofScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proof payload: scheme tag plus scheme-specific proof bytes (hex).
///
/// For the transparent scheme `proof_hex` is a 64-character SHA-256 digest;
/// for Schnorr it will carry the serialized `(R, s)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPayload {
    /// The backend scheme that produced this payload.
    pub scheme: ProofScheme,
    /// Hex-encoded scheme-specific proof data.
    pub proof_hex: String,
}

impl ProofPayload {
    /// Structural well-formedness: known scheme, hex body of the expected
    /// shape. This is the cheap shape check verifiers run before the
    /// cryptographic one.
    pub fn is_well_formed(&self) -> bool {
        let hex_ok = !self.proof_hex.is_empty()
            && self.proof_hex.len() % 2 == 0
            && self.proof_hex.chars().all(|c| c.is_ascii_hexdigit());
        match self.scheme {
            ProofScheme::TransparentSha256 => hex_ok && self.proof_hex.len() == 64,
            ProofScheme::Schnorr => hex_ok && self.proof_hex.len() == 128,
        }
    }
}
