//! # Attendance Domain Enums
//!
//! The closed vocabulary of the attendance stack: biometric modalities,
//! attendance actions, per-day status, and the integer-coordinate location
//! type.
//!
//! All enums use `SCREAMING_SNAKE_CASE` wire names and are matched
//! exhaustively — adding a variant forces every consumer to handle it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The biometric trait a commitment is derived from.
///
/// One active commitment may exist per person per modality; global
/// uniqueness of the underlying trait is checked within a modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    /// Fingerprint template.
    Fingerprint,
    /// Face embedding.
    Face,
}

impl Modality {
    /// String representation of this modality.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fingerprint => "FINGERPRINT",
            Self::Face => "FACE",
        }
    }

    /// All supported modalities, in canonical order.
    pub const ALL: [Modality; 2] = [Modality::Fingerprint, Modality::Face];
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The attendance action a proof asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceType {
    /// Arrival for the day.
    CheckIn,
    /// Departure for the day. Only issuable after a verified check-in.
    CheckOut,
}

impl AttendanceType {
    /// String representation of this attendance type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "CHECK_IN",
            Self::CheckOut => "CHECK_OUT",
        }
    }

    /// Single-character flag used in the compact token encoding.
    pub fn flag(&self) -> char {
        match self {
            Self::CheckIn => 'I',
            Self::CheckOut => 'O',
        }
    }

    /// Parse the compact token flag back into an attendance type.
    pub fn from_flag(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::CheckIn),
            'O' => Some(Self::CheckOut),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttendanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verified attendance status of one identity on one day.
///
/// Advanced only by the verifier's atomic commit; issuance alone never
/// changes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    /// No verified proof for the day.
    #[default]
    Absent,
    /// A check-in proof was verified.
    CheckedIn,
    /// Both check-in and check-out proofs were verified.
    CheckedOut,
}

impl DayStatus {
    /// String representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "ABSENT",
            Self::CheckedIn => "CHECKED_IN",
            Self::CheckedOut => "CHECKED_OUT",
        }
    }

    /// The status after a verified proof of the given type.
    pub fn after(self, attendance_type: AttendanceType) -> DayStatus {
        match attendance_type {
            AttendanceType::CheckIn => DayStatus::CheckedIn,
            AttendanceType::CheckOut => DayStatus::CheckedOut,
        }
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geographic point in micro-degrees.
///
/// Coordinates are fixed-point integers (degrees × 10⁶) so that location
/// data survives the canonical pipeline's float rejection and hashes
/// identically on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in micro-degrees, range ±90_000_000.
    pub lat_micro: i64,
    /// Longitude in micro-degrees, range ±180_000_000.
    pub lon_micro: i64,
    /// Reported GPS accuracy in meters, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<u32>,
}

impl GeoPoint {
    const LAT_LIMIT: i64 = 90_000_000;
    const LON_LIMIT: i64 = 180_000_000;

    /// Construct a validated geographic point from micro-degree coordinates.
    pub fn new(lat_micro: i64, lon_micro: i64, accuracy_m: Option<u32>) -> Result<Self, ValidationError> {
        if lat_micro.abs() > Self::LAT_LIMIT || lon_micro.abs() > Self::LON_LIMIT {
            return Err(ValidationError::CoordinateOutOfRange {
                lat_micro,
                lon_micro,
            });
        }
        Ok(Self {
            lat_micro,
            lon_micro,
            accuracy_m,
        })
    }
}
