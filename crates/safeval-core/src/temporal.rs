//! # Temporal Values — UTC Millisecond Instants
//!
//! Defines `Timestamp`, the date kind carried by [`crate::Value`]. A
//! timestamp is always UTC and truncated to milliseconds, so its numeric
//! form (epoch milliseconds) is exact and round-trips.
//!
//! A timestamp is a distinguished kind: it is never a plain mapping, so the
//! mapping guard rejects it, while numeric coercion yields its epoch
//! milliseconds.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SafeError;

/// A UTC-only instant, truncated to millisecond precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-milliseconds.
/// - [`Timestamp::from_epoch_millis()`] — from Unix epoch milliseconds.
/// - [`Timestamp::parse()`] — from RFC 3339 text with any offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "DateTime<Utc>")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to milliseconds.
    pub fn now() -> Self {
        Self(truncate_to_millis(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-milliseconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_millis(dt))
    }

    /// Create a timestamp from a Unix epoch offset in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`SafeError::InvalidTimestamp`] when the offset is outside the
    /// range chrono can represent.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, SafeError> {
        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or_else(|| SafeError::InvalidTimestamp(format!("epoch millis out of range: {millis}")))
    }

    /// Parse an RFC 3339 timestamp, converting any offset to UTC.
    ///
    /// # Errors
    ///
    /// Returns [`SafeError::InvalidTimestamp`] if the text is not RFC 3339.
    pub fn parse(s: &str) -> Result<Self, SafeError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| SafeError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_millis(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Milliseconds since the Unix epoch. This is the timestamp's numeric form.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Render as ISO8601 with millisecond precision and Z suffix
    /// (e.g., `2026-01-15T12:00:00.000Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}

fn truncate_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = dt.nanosecond() / 1_000_000 * 1_000_000;
    dt.with_nanosecond(nanos).unwrap_or(dt)
}
