//! # pramaan-crypto — Cryptographic Primitives
//!
//! The cryptographic building blocks of the attendance stack:
//!
//! - **Enrollment salts** — 32 random bytes drawn once per enrollment,
//!   zeroized on drop, never rotated without re-enrollment.
//! - **Ed25519** issuer keys — the proof issuer signs each canonical proof
//!   payload; verifiers check the attestation against the configured
//!   verification key.
//!
//! Digest computation itself lives in `pramaan-core::digest`, next to
//! `CanonicalBytes`, so there is exactly one hashing path in the workspace.
//!
//! ## Crate Policy
//!
//! - Depends only on `pramaan-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   randomness, real Ed25519, real canonical bytes.
//! - `unsafe` prohibited.

pub mod error;
pub mod hex;
pub mod keys;
pub mod salt;

pub use error::CryptoError;
pub use keys::{IssuerKey, IssuerPublicKey, IssuerSignature};
pub use salt::Salt;
