//! # Token Encoder
//!
//! Serializes a compact *reference* to an attendance proof into the string
//! a QR code carries. The token deliberately embeds no proof payload — just
//! enough to look the proof up and sanity-check the scan: the proof
//! identifier, a truncated organization prefix, a coarse (epoch-minute)
//! issuance timestamp, and the attendance-type flag.
//!
//! Encoding is base64url (no padding) over the canonical JSON of the
//! reference. Decoding is **total**: every malformed input — bad base64,
//! bad JSON, unknown version, bad field shapes — maps to
//! [`TokenError::InvalidToken`], never to a partial reference or a panic.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use pramaan_core::{AttendanceType, CanonicalBytes, ProofId};
use pramaan_store::AttendanceProof;
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Token format version. Bumped on any wire change; decoders reject
/// versions they do not know.
pub const TOKEN_VERSION: u8 = 1;

/// The scannable token string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceToken(String);

impl AttendanceToken {
    /// The printable token string (the QR payload).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttendanceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The decoded content of a token: a reference, not a proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReference {
    /// The referenced proof.
    pub proof_id: ProofId,
    /// First 8 hex chars of the issuing organization's identifier.
    pub org_prefix: String,
    /// Issuance instant, coarsened to epoch minutes.
    pub issued_minute: i64,
    /// The attendance action the proof asserts.
    pub attendance_type: AttendanceType,
}

/// Wire shape of a token. Field names are single characters to keep the
/// QR payload small and its module count low.
#[derive(Serialize, Deserialize)]
struct TokenWire {
    /// Format version.
    v: u8,
    /// Proof id (hyphenated UUID).
    p: String,
    /// Organization prefix.
    o: String,
    /// Issued epoch-minute.
    m: i64,
    /// Attendance-type flag: "I" or "O".
    t: String,
}

/// Encode a proof into its scannable token.
pub fn encode(proof: &AttendanceProof) -> Result<AttendanceToken, TokenError> {
    let wire = TokenWire {
        v: TOKEN_VERSION,
        p: proof.proof_id.as_uuid().to_string(),
        o: proof.organization_id.short_prefix(),
        m: proof.issued_at.epoch_minutes(),
        t: proof.attendance_type.flag().to_string(),
    };
    let canonical = CanonicalBytes::new(&wire)
        .map_err(|e| TokenError::InvalidToken(format!("encoding failed: {e}")))?;
    Ok(AttendanceToken(URL_SAFE_NO_PAD.encode(canonical.as_bytes())))
}

/// Decode a scanned string into a token reference.
///
/// Total over arbitrary input.
pub fn decode(token: &str) -> Result<TokenReference, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|e| TokenError::InvalidToken(format!("base64: {e}")))?;
    let wire: TokenWire = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::InvalidToken(format!("json: {e}")))?;

    if wire.v != TOKEN_VERSION {
        return Err(TokenError::InvalidToken(format!(
            "unsupported version {}",
            wire.v
        )));
    }
    let proof_id = ProofId::parse(&wire.p)
        .map_err(|e| TokenError::InvalidToken(format!("proof id: {e}")))?;
    if wire.o.len() != 8 || !wire.o.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TokenError::InvalidToken("organization prefix".to_string()));
    }
    let mut flag_chars = wire.t.chars();
    let attendance_type = match (flag_chars.next(), flag_chars.next()) {
        (Some(c), None) => AttendanceType::from_flag(c)
            .ok_or_else(|| TokenError::InvalidToken(format!("attendance flag {c:?}")))?,
        _ => return Err(TokenError::InvalidToken("attendance flag".to_string())),
    };
    if wire.m < 0 {
        return Err(TokenError::InvalidToken("negative timestamp".to_string()));
    }

    Ok(TokenReference {
        proof_id,
        org_prefix: wire.o,
        issued_minute: wire.m,
        attendance_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pramaan_core::{
        AttendanceDay, IdentityId, OrganizationId, Timestamp,
    };
    use pramaan_crypto::IssuerSignature;
    use pramaan_store::VerificationState;
    use pramaan_zkp::{Commitment, Nullifier, ProofPayload, ProofScheme};

    fn proof() -> AttendanceProof {
        AttendanceProof {
            proof_id: ProofId::new(),
            identity_id: IdentityId::new(),
            organization_id: OrganizationId::new(),
            day: AttendanceDay::parse("2024-01-15").unwrap(),
            attendance_type: AttendanceType::CheckOut,
            commitment: Commitment::from_bytes([1; 32]),
            payload: ProofPayload {
                scheme: ProofScheme::TransparentSha256,
                proof_hex: "ab".repeat(32),
            },
            attestation: IssuerSignature::from_bytes([0; 64]),
            nullifier: Nullifier::from_bytes([2; 32]),
            issued_at: Timestamp::parse("2024-01-15T08:30:00Z").unwrap(),
            expires_at: Timestamp::parse("2024-01-15T08:35:00Z").unwrap(),
            location: None,
            verification: VerificationState::default(),
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let p = proof();
        let token = encode(&p).unwrap();
        let reference = decode(token.as_str()).unwrap();
        assert_eq!(reference.proof_id, p.proof_id);
        assert_eq!(reference.org_prefix, p.organization_id.short_prefix());
        assert_eq!(reference.issued_minute, p.issued_at.epoch_minutes());
        assert_eq!(reference.attendance_type, AttendanceType::CheckOut);
    }

    #[test]
    fn token_is_short_and_printable() {
        let token = encode(&proof()).unwrap();
        assert!(token.as_str().len() < 160, "QR payload should stay small");
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn token_does_not_leak_payload_or_nullifier() {
        let p = proof();
        let token = encode(&p).unwrap();
        let decoded_bytes = URL_SAFE_NO_PAD.decode(token.as_str()).unwrap();
        let text = String::from_utf8(decoded_bytes).unwrap();
        assert!(!text.contains(&p.payload.proof_hex));
        assert!(!text.contains(&p.nullifier.to_hex()));
        assert!(!text.contains(&p.commitment.to_hex()));
    }

    #[test]
    fn decode_rejects_garbage() {
        for bad in ["", "!!!", "not a token", "aGVsbG8", &"A".repeat(5000)] {
            assert!(matches!(decode(bad), Err(TokenError::InvalidToken(_))), "accepted {bad:?}");
        }
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let wire = serde_json::json!({"v": 9, "p": ProofId::new().as_uuid().to_string(), "o": "aabbccdd", "m": 123, "t": "I"});
        let token = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&wire).unwrap());
        assert!(matches!(decode(&token), Err(TokenError::InvalidToken(msg)) if msg.contains("version")));
    }

    #[test]
    fn decode_rejects_bad_fields() {
        let cases = [
            serde_json::json!({"v": 1, "p": "not-a-uuid", "o": "aabbccdd", "m": 1, "t": "I"}),
            serde_json::json!({"v": 1, "p": ProofId::new().as_uuid().to_string(), "o": "zz", "m": 1, "t": "I"}),
            serde_json::json!({"v": 1, "p": ProofId::new().as_uuid().to_string(), "o": "aabbccdd", "m": 1, "t": "X"}),
            serde_json::json!({"v": 1, "p": ProofId::new().as_uuid().to_string(), "o": "aabbccdd", "m": -5, "t": "I"}),
            serde_json::json!({"v": 1, "p": ProofId::new().as_uuid().to_string(), "o": "aabbccdd", "m": 1, "t": "IO"}),
        ];
        for wire in cases {
            let token = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&wire).unwrap());
            assert!(decode(&token).is_err(), "accepted {wire}");
        }
    }
}
