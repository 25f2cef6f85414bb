//! # pramaan-zkp — Proof Backend
//!
//! The commitment and proof-of-presence layer behind enrollment, issuance,
//! and verification. The rest of the stack talks to a sealed
//! [`ProofBackend`] capability with three operations:
//!
//! - `bind(sample, salt)` — derive the commitment that enrolls a template.
//! - `prove(circuit)` — produce a payload asserting "the holder of this
//!   commitment authorized this attendance action on this day".
//! - `verify(payload, public)` — check a payload against public inputs.
//!
//! ## Backends
//!
//! - [`TransparentBackend`] — deterministic SHA-256 over the canonical
//!   presence circuit. Verifiable but **not zero-knowledge**: anyone holding
//!   the commitment can recompute the proof. This is the honest restatement
//!   of what the surrounding deployment ships today.
//! - `SchnorrBackend` (feature `schnorr`) — Pedersen commitment plus a
//!   Schnorr-style proof of knowledge of the opening. Data model only until
//!   the curve dependency is integrated.
//!
//! Backend selection is an explicit [`config::ProofMode`] value injected at
//! construction. There is no process-global mode switch: a deployment that
//! wants the Schnorr backend constructs it once and hands it to the services.

pub mod circuit;
pub mod commitment;
pub mod config;
pub mod payload;
#[cfg(feature = "schnorr")]
pub mod schnorr;
pub mod traits;
pub mod transparent;

pub use circuit::{PresenceCircuit, PresenceWitness, PublicInputs};
pub use commitment::{Commitment, LookupHash, Nullifier};
pub use config::{BackendConfig, ProofMode};
pub use payload::{ProofPayload, ProofScheme};
pub use traits::{BindError, ProofBackend, ProofError, ProofVerifyError};
pub use transparent::TransparentBackend;
