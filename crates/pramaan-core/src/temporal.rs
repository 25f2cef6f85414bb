//! # Temporal Types
//!
//! `Timestamp` is the UTC-only, second-precision instant every proof and
//! verification event is stamped with. `AttendanceDay` is the
//! midnight-normalized calendar day a proof is bound to: two check-ins at
//! 08:00 and 23:59 on the same date occupy the same day slot.
//!
//! ## Security Invariant
//!
//! Timestamps must be UTC with Z suffix so canonical byte sequences are
//! identical for the same instant everywhere. Non-UTC inputs are rejected
//! at construction — there is no silent conversion on the strict path.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 timestamp, rejecting anything that is not
    /// Z-suffixed UTC — including the semantically equivalent `+00:00`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(ValidationError::InvalidTimestamp {
                value: s.to_string(),
                reason: "must use Z suffix (UTC only)".to_string(),
            });
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| ValidationError::InvalidTimestamp {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// From a Unix epoch timestamp in seconds.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, ValidationError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTimestamp {
                value: secs.to_string(),
                reason: "out of range for epoch seconds".to_string(),
            })
    }

    /// Unix epoch seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Epoch minutes — the coarse timestamp embedded in scannable tokens.
    pub fn epoch_minutes(&self) -> i64 {
        self.0.timestamp() / 60
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// This instant shifted by a signed duration, saturating at the epoch
    /// range boundaries rather than wrapping.
    pub fn plus(&self, delta: chrono::Duration) -> Self {
        Self(truncate_to_seconds(
            self.0.checked_add_signed(delta).unwrap_or(self.0),
        ))
    }

    /// The calendar day this instant falls on (UTC).
    pub fn day(&self) -> AttendanceDay {
        AttendanceDay(self.0.date_naive())
    }

    /// Render as ISO 8601 with Z suffix, e.g. `2024-01-15T08:30:00Z`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// A calendar day in UTC, the normalization target of `date` fields.
///
/// Serializes as `YYYY-MM-DD`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttendanceDay(NaiveDate);

impl AttendanceDay {
    /// Construct from a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Construct from year/month/day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidDay(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::InvalidDay(s.to_string()))
    }

    /// Today in UTC.
    pub fn today() -> Self {
        Timestamp::now().day()
    }

    /// Midnight at the start of this day, as a UTC timestamp.
    pub fn midnight(&self) -> Timestamp {
        let dt = Utc
            .with_ymd_and_hms(self.0.year(), self.0.month(), self.0.day(), 0, 0, 0)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH);
        Timestamp::from_utc(dt)
    }

    /// Access the inner date.
    pub fn as_date(&self) -> &NaiveDate {
        &self.0
    }
}

impl std::fmt::Display for AttendanceDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Discard sub-second components.
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn parse_z_suffix_accepted() {
        let ts = Timestamp::parse("2024-01-15T08:30:00Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2024-01-15T08:30:00Z");
    }

    #[test]
    fn parse_offsets_rejected() {
        assert!(Timestamp::parse("2024-01-15T08:30:00+00:00").is_err());
        assert!(Timestamp::parse("2024-01-15T13:30:00+05:00").is_err());
        assert!(Timestamp::parse("garbage").is_err());
    }

    #[test]
    fn parse_truncates_subseconds() {
        let ts = Timestamp::parse("2024-01-15T08:30:00.987Z").unwrap();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn epoch_roundtrip() {
        let ts = Timestamp::parse("2024-01-15T08:30:00Z").unwrap();
        assert_eq!(Timestamp::from_epoch_secs(ts.epoch_secs()).unwrap(), ts);
    }

    #[test]
    fn plus_advances_time() {
        let ts = Timestamp::parse("2024-01-15T08:30:00Z").unwrap();
        let later = ts.plus(chrono::Duration::minutes(5));
        assert_eq!(later.to_iso8601(), "2024-01-15T08:35:00Z");
        assert!(later > ts);
    }

    #[test]
    fn day_normalizes_to_calendar_date() {
        let morning = Timestamp::parse("2024-01-15T00:00:01Z").unwrap();
        let night = Timestamp::parse("2024-01-15T23:59:59Z").unwrap();
        assert_eq!(morning.day(), night.day());
        assert_eq!(morning.day().to_string(), "2024-01-15");
    }

    #[test]
    fn day_parse_and_display_roundtrip() {
        let day = AttendanceDay::parse("2024-01-15").unwrap();
        assert_eq!(day.to_string(), "2024-01-15");
        assert!(AttendanceDay::parse("15/01/2024").is_err());
        assert!(AttendanceDay::parse("2024-13-40").is_err());
    }

    #[test]
    fn from_ymd_validates() {
        assert!(AttendanceDay::from_ymd(2024, 2, 29).is_ok());
        assert!(AttendanceDay::from_ymd(2023, 2, 29).is_err());
    }

    #[test]
    fn midnight_is_start_of_day() {
        let day = AttendanceDay::parse("2024-01-15").unwrap();
        assert_eq!(day.midnight().to_iso8601(), "2024-01-15T00:00:00Z");
        assert_eq!(day.midnight().day(), day);
    }

    #[test]
    fn day_ordering_is_chronological() {
        let a = AttendanceDay::parse("2024-01-15").unwrap();
        let b = AttendanceDay::parse("2024-01-16").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrips() {
        let ts = Timestamp::parse("2024-01-15T08:30:00Z").unwrap();
        let back: Timestamp = serde_json::from_str(&serde_json::to_string(&ts).unwrap()).unwrap();
        assert_eq!(ts, back);

        let day = AttendanceDay::parse("2024-01-15").unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "\"2024-01-15\"");
        let back: AttendanceDay = serde_json::from_str(&json).unwrap();
        assert_eq!(day, back);
    }
}
