//! # Error Hierarchy
//!
//! Structured error types shared across the Pramaan stack, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Component-level operations (enrollment, issuance, verification) define
//! their own scoped enums in their own crates; this module holds the errors
//! of the foundational types plus the top-level aggregate used at binary
//! edges.

use thiserror::Error;

/// Top-level error type for the Pramaan stack.
#[derive(Error, Debug)]
pub enum PramaanError {
    /// Canonicalization failure during digest computation.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Cryptographic operation failure.
    #[error("cryptographic error: {0}")]
    Cryptographic(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Coordinates and amounts must be integers or strings.
    #[error("float values are not permitted in canonical representations; use integer or string: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
///
/// Each primitive enforces its format constraints at construction time.
/// The errors carry the offending input characteristics so that callers can
/// surface actionable messages without re-deriving them.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A biometric sample must carry at least one byte of template data.
    #[error("biometric sample is empty")]
    EmptySample,

    /// A biometric sample exceeded the maximum accepted template size.
    #[error("biometric sample of {len} bytes exceeds the {max}-byte limit")]
    OversizedSample {
        /// The submitted sample length.
        len: usize,
        /// The configured maximum.
        max: usize,
    },

    /// Timestamp string is not valid UTC ISO 8601.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Calendar day string is not a valid `YYYY-MM-DD` date.
    #[error("invalid attendance day: \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDay(String),

    /// A latitude/longitude pair is outside the representable range.
    #[error("coordinate out of range: latitude {lat_micro}µ°, longitude {lon_micro}µ°")]
    CoordinateOutOfRange {
        /// Latitude in micro-degrees.
        lat_micro: i64,
        /// Longitude in micro-degrees.
        lon_micro: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalization_error_float_rejected_display() {
        let err = CanonicalizationError::FloatRejected(3.14);
        let msg = format!("{err}");
        assert!(msg.contains("float values are not permitted"));
        assert!(msg.contains("3.14"));
    }

    #[test]
    fn validation_error_empty_sample_display() {
        let err = ValidationError::EmptySample;
        assert!(format!("{err}").contains("empty"));
    }

    #[test]
    fn validation_error_oversized_sample_display() {
        let err = ValidationError::OversizedSample {
            len: 2_000_000,
            max: 1_048_576,
        };
        let msg = format!("{err}");
        assert!(msg.contains("2000000"));
        assert!(msg.contains("1048576"));
    }

    #[test]
    fn validation_error_invalid_day_display() {
        let err = ValidationError::InvalidDay("15-01-2024".to_string());
        assert!(format!("{err}").contains("15-01-2024"));
        assert!(format!("{err}").contains("YYYY-MM-DD"));
    }

    #[test]
    fn pramaan_error_wraps_validation() {
        let err = PramaanError::from(ValidationError::EmptySample);
        assert!(format!("{err}").contains("validation error"));
    }

    #[test]
    fn pramaan_error_wraps_canonicalization() {
        let err = PramaanError::from(CanonicalizationError::FloatRejected(0.5));
        assert!(format!("{err}").contains("canonicalization error"));
    }
}
