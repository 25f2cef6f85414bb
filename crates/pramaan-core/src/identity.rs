//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers that flow through the attendance
//! stack. You cannot pass an `IdentityId` where an `OrganizationId` is
//! expected — the compiler rejects it.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces prevents
//! cross-namespace confusion, e.g. submitting a proof identifier where a
//! verifier identifier is expected during the verification commit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an enrolled person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(pub Uuid);

/// Unique identifier for an organization (campus, office, institution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub Uuid);

/// Unique handle for an issued attendance proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofId(pub Uuid);

/// Unique identifier for the admin/scanner that verifies a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerifierId(pub Uuid);

macro_rules! uuid_id_impls {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse from the canonical hyphenated UUID string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

uuid_id_impls!(IdentityId, "identity");
uuid_id_impls!(OrganizationId, "org");
uuid_id_impls!(ProofId, "proof");
uuid_id_impls!(VerifierId, "verifier");

impl OrganizationId {
    /// The short prefix embedded in scannable tokens: the first 8 hex
    /// characters of the UUID. Enough to catch cross-organization scans
    /// early without disclosing the full identifier in the QR payload.
    pub fn short_prefix(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_namespace_prefix() {
        let id = IdentityId::new();
        assert!(id.to_string().starts_with("identity:"));
        let org = OrganizationId::new();
        assert!(org.to_string().starts_with("org:"));
        let proof = ProofId::new();
        assert!(proof.to_string().starts_with("proof:"));
        let verifier = VerifierId::new();
        assert!(verifier.to_string().starts_with("verifier:"));
    }

    #[test]
    fn distinct_ids_are_unequal() {
        assert_ne!(IdentityId::new(), IdentityId::new());
    }

    #[test]
    fn parse_roundtrip() {
        let id = ProofId::new();
        let parsed = ProofId::parse(&id.as_uuid().to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(IdentityId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn short_prefix_is_8_hex_chars() {
        let org = OrganizationId::new();
        let prefix = org.short_prefix();
        assert_eq!(prefix.len(), 8);
        assert!(prefix.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(org.0.simple().to_string().starts_with(&prefix));
    }

    #[test]
    fn serde_roundtrip() {
        let id = IdentityId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: IdentityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
