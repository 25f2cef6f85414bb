//! # Ed25519 Issuer Keys
//!
//! The proof issuer signs the canonical bytes of every proof payload it
//! assembles; the verifier checks that attestation against the deployment's
//! verification key before accepting a payload as well-formed.
//!
//! ## Security Invariant
//!
//! - Signing input MUST be `&CanonicalBytes` — raw bytes cannot be signed.
//!   All signed data provably went through the canonicalization pipeline.
//! - Private key material is never serialized or logged. `IssuerKey` does
//!   not implement `Serialize`, and its `Debug` is redacted.
//! - Public keys and signatures serialize as lowercase hex strings.

use ed25519_dalek::{Signer, Verifier};
use pramaan_core::CanonicalBytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CryptoError;
use crate::hex;

/// An Ed25519 key pair held by the proof issuer.
pub struct IssuerKey {
    signing_key: ed25519_dalek::SigningKey,
}

/// The 32-byte public half of an issuer key, distributed to verifiers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IssuerPublicKey([u8; 32]);

/// A 64-byte Ed25519 attestation over a canonical proof payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IssuerSignature([u8; 64]);

impl IssuerKey {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        let mut csprng = rand_core::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Deterministic key pair from a 32-byte seed (test fixtures).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> IssuerPublicKey {
        IssuerPublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign canonical bytes.
    pub fn sign(&self, data: &CanonicalBytes) -> IssuerSignature {
        IssuerSignature(self.signing_key.sign(data.as_bytes()).to_bytes())
    }
}

impl std::fmt::Debug for IssuerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IssuerKey(<private>)")
    }
}

impl IssuerPublicKey {
    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        hex::decode_fixed::<32>(s).map(Self)
    }

    /// Verify an attestation over canonical bytes.
    ///
    /// # Errors
    ///
    /// [`CryptoError::KeyError`] if the key bytes are not a valid curve
    /// point; [`CryptoError::VerificationFailed`] if the signature does not
    /// verify.
    pub fn verify(&self, data: &CanonicalBytes, signature: &IssuerSignature) -> Result<(), CryptoError> {
        let vk = ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::KeyError(format!("invalid public key: {e}")))?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        vk.verify(data.as_bytes(), &sig)
            .map_err(|e| CryptoError::VerificationFailed(format!("attestation rejected: {e}")))
    }
}

impl IssuerSignature {
    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        hex::decode_fixed::<64>(s).map(Self)
    }
}

impl std::fmt::Debug for IssuerPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "IssuerPublicKey({prefix}...)")
    }
}

impl std::fmt::Debug for IssuerSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "IssuerSignature({prefix}...)")
    }
}

impl std::fmt::Display for IssuerPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for IssuerPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for IssuerPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for IssuerSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for IssuerSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(v: serde_json::Value) -> CanonicalBytes {
        CanonicalBytes::new(&v).unwrap()
    }

    #[test]
    fn sign_and_verify() {
        let key = IssuerKey::generate();
        let data = canonical(serde_json::json!({"proof": "payload", "n": 7}));
        let sig = key.sign(&data);
        key.public_key().verify(&data, &sig).unwrap();
    }

    #[test]
    fn wrong_key_rejected() {
        let key = IssuerKey::generate();
        let other = IssuerKey::generate();
        let data = canonical(serde_json::json!({"x": 1}));
        let sig = key.sign(&data);
        assert!(other.public_key().verify(&data, &sig).is_err());
    }

    #[test]
    fn tampered_payload_rejected() {
        let key = IssuerKey::generate();
        let sig = key.sign(&canonical(serde_json::json!({"day": "2024-01-15"})));
        let tampered = canonical(serde_json::json!({"day": "2024-01-16"}));
        assert!(key.public_key().verify(&tampered, &sig).is_err());
    }

    #[test]
    fn deterministic_from_seed() {
        let a = IssuerKey::from_seed(&[9; 32]);
        let b = IssuerKey::from_seed(&[9; 32]);
        assert_eq!(a.public_key(), b.public_key());
        let data = canonical(serde_json::json!({"same": true}));
        assert_eq!(a.sign(&data), b.sign(&data));
    }

    #[test]
    fn public_key_hex_roundtrip() {
        let pk = IssuerKey::generate().public_key();
        assert_eq!(IssuerPublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
    }

    #[test]
    fn signature_serde_roundtrip() {
        let key = IssuerKey::generate();
        let sig = key.sign(&canonical(serde_json::json!({"a": 1})));
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json.len(), 128 + 2);
        let back: IssuerSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }

    #[test]
    fn debug_redacts_private_key() {
        assert_eq!(format!("{:?}", IssuerKey::generate()), "IssuerKey(<private>)");
    }
}
