//! # Enrollment Salt
//!
//! Each biometric commitment binds the template together with a fresh
//! 32-byte salt. The salt is generated exactly once at enrollment and lives
//! only inside the commitment record; rotating it requires re-enrollment
//! because the commitment (and every nullifier derived from it) changes
//! with it.
//!
//! ## Security Invariant
//!
//! - Generated from the OS CSPRNG, never from a seeded or time-based source.
//! - Zeroized on drop.
//! - `Debug` never prints the salt bytes.

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;
use crate::hex;

/// Salt length in bytes.
pub const SALT_BYTES: usize = 32;

/// A 32-byte enrollment salt.
///
/// Serializes as lowercase hex for persistence inside the commitment record.
/// Never returned across the service boundary.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Salt([u8; SALT_BYTES]);

impl Salt {
    /// Draw a fresh salt from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Construct from raw bytes (test fixtures, storage hydration).
    pub fn from_bytes(bytes: [u8; SALT_BYTES]) -> Self {
        Self(bytes)
    }

    /// The raw salt bytes, for binding computation only.
    pub fn as_bytes(&self) -> &[u8; SALT_BYTES] {
        &self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        hex::decode_fixed::<SALT_BYTES>(s).map(Self)
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt(<redacted>)")
    }
}

impl Serialize for Salt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_random() {
        // Two draws colliding would mean the CSPRNG is broken.
        assert_ne!(Salt::generate(), Salt::generate());
    }

    #[test]
    fn hex_roundtrip() {
        let salt = Salt::generate();
        let hex = salt.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(Salt::from_hex(&hex).unwrap(), salt);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(Salt::from_hex("abc").is_err());
        assert!(Salt::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn debug_is_redacted() {
        let salt = Salt::from_bytes([0xab; 32]);
        assert_eq!(format!("{salt:?}"), "Salt(<redacted>)");
    }

    #[test]
    fn serde_roundtrip() {
        let salt = Salt::from_bytes([7; 32]);
        let json = serde_json::to_string(&salt).unwrap();
        let back: Salt = serde_json::from_str(&json).unwrap();
        assert_eq!(salt, back);
    }
}
