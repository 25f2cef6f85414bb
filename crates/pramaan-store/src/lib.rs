//! # pramaan-store — Commitment & Proof Storage
//!
//! The two shared mutable resources of the stack: the commitment store and
//! the proof store. Both are multi-writer (many identities enrolling and
//! attending concurrently) and single-writer-per-key — every compound
//! invariant check runs under one write lock, never as a read-then-write
//! race in service code.
//!
//! ## Uniqueness enforced here, not above
//!
//! - Global `(modality, lookup_hash)` uniqueness among **active**
//!   commitments — the same physical trait cannot back two identities
//!   anywhere in the system.
//! - One active commitment per `(identity, modality)`.
//! - One live proof per `(identity, day, attendance_type)` slot.
//! - Nullifier consumption is recorded atomically with the verification
//!   flag; a nullifier consumed once stays consumed forever.
//!
//! Two concurrent conflicting writes see exactly one success and one typed
//! error; there is no interleaving in which both succeed or state is
//! partially applied.
//!
//! The stores are in-memory (`parking_lot::RwLock`, never held across
//! `.await`). The record shapes and index keys are chosen so a relational
//! backend can mirror them with unique indexes on `(modality, lookup_hash)
//! WHERE active`, `(identity_id, day, attendance_type)`, and `nullifier`.

pub mod commitment;
pub mod commitment_store;
pub mod error;
pub mod proof;
pub mod proof_store;

pub use commitment::{BiometricCommitment, CommitmentHandle, CommitmentStatus};
pub use commitment_store::CommitmentStore;
pub use error::StoreError;
pub use proof::{AttendanceProof, VerificationState};
pub use proof_store::ProofStore;
