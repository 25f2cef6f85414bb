//! # pramaan-core — Foundational Types for the Pramaan Attendance Stack
//!
//! This crate is the bedrock of the Pramaan stack. It defines the type-system
//! primitives that the commitment, proof, and verification layers build on.
//! Every other crate in the workspace depends on `pramaan-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `IdentityId`,
//!    `OrganizationId`, `ProofId`, `VerifierId` — all newtypes over UUIDs.
//!    No bare strings or naked UUIDs for identifiers.
//!
//! 2. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for digests.
//!    This prevents the canonicalization-split defect class by construction.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision; `AttendanceDay` is the midnight-normalized
//!    calendar day every proof is bound to.
//!
//! 4. **Exhaustive domain enums.** `Modality` and `AttendanceType` are closed
//!    enums matched exhaustively everywhere. Adding a modality forces every
//!    consumer to handle it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pramaan-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize` unless they carry secret material.

pub mod biometric;
pub mod canonical;
pub mod digest;
pub mod domain;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use biometric::BiometricSample;
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use domain::{AttendanceType, DayStatus, GeoPoint, Modality};
pub use error::{CanonicalizationError, PramaanError, ValidationError};
pub use identity::{IdentityId, OrganizationId, ProofId, VerifierId};
pub use temporal::{AttendanceDay, Timestamp};
