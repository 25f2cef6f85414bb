//! Crypto-layer error types.

use thiserror::Error;

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Hex or binary encoding failure.
    #[error("encoding error: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = CryptoError::VerificationFailed("bad attestation".to_string());
        assert!(format!("{err}").contains("bad attestation"));
        let err = CryptoError::KeyError("truncated".to_string());
        assert!(format!("{err}").contains("truncated"));
    }
}
