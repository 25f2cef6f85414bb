//! # Commitments, Lookup Hashes, Nullifiers
//!
//! The three derived values the stack revolves around:
//!
//! - [`Commitment`] — binds a biometric template to an enrollment salt. The
//!   template cannot be recovered from it, and without the salt the same
//!   template produces an unlinkable value.
//! - [`LookupHash`] — the global-uniqueness index key, derived
//!   deterministically from the template alone. It must be salt-free: two
//!   enrollments of the same trait get different salts and therefore
//!   different commitments, and only a sample-deterministic hash can still
//!   collide. One-way and domain-separated, so the index leaks no template
//!   structure.
//! - [`Nullifier`] — deterministic digest of `(commitment, day, action)`.
//!   Two proofs for the same underlying authorization collide on it, which
//!   is exactly how replays are caught.
//!
//! ## Security Invariant
//!
//! Commitment equality (the fresh-sample re-binding check at issuance) is
//! constant-time via `subtle`, so a mismatching sample cannot be narrowed
//! down byte by byte through timing.

use pramaan_core::{
    sha256_digest, AttendanceDay, AttendanceType, BiometricSample, CanonicalBytes,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

use crate::traits::BindError;

macro_rules! digest_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Construct from raw digest bytes.
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// The raw digest bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Render as lowercase hex.
            pub fn to_hex(&self) -> String {
                self.0.iter().map(|b| format!("{b:02x}")).collect()
            }

            /// Parse from a 64-character hex string.
            pub fn from_hex(s: &str) -> Result<Self, String> {
                let s = s.trim();
                if s.len() != 64 {
                    return Err(format!("expected 64 hex chars, got {}", s.len()));
                }
                let mut out = [0u8; 32];
                for (i, byte) in out.iter_mut().enumerate() {
                    *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                        .map_err(|e| format!("invalid hex at {}: {e}", i * 2))?;
                }
                Ok(Self(out))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let prefix: String =
                    self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
                write!(f, concat!(stringify!($name), "({}...)"), prefix)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

digest_newtype! {
    /// A salted binding of a biometric template.
    Commitment
}

digest_newtype! {
    /// The uniqueness-index key derived from the template alone.
    LookupHash
}

digest_newtype! {
    /// The replay-detection value derived from a commitment and a context.
    Nullifier
}

impl Commitment {
    /// Constant-time equality against another commitment.
    ///
    /// This is the comparison the issuer uses to decide `SampleMismatch`;
    /// the derived `PartialEq` exists for index bookkeeping, not for
    /// accept/reject decisions on attacker-supplied input.
    pub fn ct_eq(&self, other: &Commitment) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl LookupHash {
    /// Derive the global-uniqueness index key for a template.
    ///
    /// `SHA-256(canonical({domain, modality, template}))` — deterministic
    /// in the sample so that the same trait collides regardless of
    /// enrollment salt, and domain-separated so the value can never be
    /// confused with a commitment or nullifier digest.
    pub fn derive(sample: &BiometricSample) -> Result<LookupHash, BindError> {
        let template_hex: String = sample
            .as_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        let canonical = CanonicalBytes::new(&serde_json::json!({
            "domain": "pramaan.lookup.v1",
            "modality": sample.modality(),
            "template": template_hex,
        }))
        .map_err(|e| BindError::Canonicalization(e.to_string()))?;
        Ok(LookupHash::from_bytes(sha256_digest(&canonical).bytes))
    }
}

impl Nullifier {
    /// Derive the nullifier for one attendance action.
    ///
    /// `nullifier = SHA-256(canonical({action, commitment, day}))` — fully
    /// determined by the enrolled commitment and the action context, so a
    /// second proof for the same slot collides no matter who issues it.
    pub fn derive(
        commitment: &Commitment,
        day: AttendanceDay,
        attendance_type: AttendanceType,
    ) -> Result<Nullifier, BindError> {
        let canonical = CanonicalBytes::new(&serde_json::json!({
            "action": attendance_type,
            "commitment": commitment.to_hex(),
            "day": day,
        }))
        .map_err(|e| BindError::Canonicalization(e.to_string()))?;
        Ok(Nullifier::from_bytes(sha256_digest(&canonical).bytes))
    }
}
