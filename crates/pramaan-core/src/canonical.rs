//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes used in
//! digest computation across the stack: commitments, lookup hashes,
//! nullifiers, proof payloads, and issuer attestations all hash or sign
//! canonical bytes and nothing else.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is `CanonicalBytes::new()`, which rejects floats and then
//! serializes with RFC 8785 (JSON Canonicalization Scheme): sorted keys,
//! compact separators, deterministic byte sequence. Any function that needs
//! bytes for a digest must accept `&CanonicalBytes`, so a non-canonical
//! digest path cannot be written by accident.
//!
//! Floats are rejected rather than coerced because JCS number serialization
//! has representation edge cases that differ across runtimes; geographic
//! coordinates are therefore carried as micro-degree integers (see
//! [`crate::domain::GeoPoint`]) and never as floating point.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - No value in the tree is a non-integer number.
/// - Object keys are sorted, separators compact (RFC 8785).
///
/// The inner `Vec<u8>` is private, so downstream code cannot fabricate
/// canonical bytes from an arbitrary buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value contains
    /// a number not representable as `i64`/`u64`, and
    /// [`CanonicalizationError::SerializationFailed`] if JCS serialization
    /// fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk a JSON value tree and reject any float leaf.
///
/// Integers (`i64`/`u64`) pass; everything `serde_json` classifies as `f64`
/// only is refused. Strings, booleans, nulls, and containers recurse.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) if n.is_f64() && !n.is_i64() && !n.is_u64() => {
            // as_f64 always succeeds for an f64-classified number.
            Err(CanonicalizationError::FloatRejected(
                n.as_f64().unwrap_or(f64::NAN),
            ))
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        _ => Ok(()),
    }
}
