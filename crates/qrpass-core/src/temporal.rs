//! # Temporal Types — Epoch Milliseconds and Expiry Policy
//!
//! Credential timestamps travel as integer milliseconds since the Unix
//! epoch. [`EpochMillis`] wraps that integer so it cannot be confused with
//! other counts, and serializes transparently as a bare JSON number.
//!
//! Expiry is a deterministic cutoff on the holder's *local* calendar day.
//! Two cutoffs have been deployed, so both are modelled by
//! [`ExpiryPolicy`]:
//!
//! - [`ExpiryPolicy::EndOfDay`]: 23:59:59.999 of the issuance day
//!   (default).
//! - [`ExpiryPolicy::NextMidnight`]: 00:00:00.000 of the following day.
//!
//! Both are computed from the start of the next local day, so a DST
//! transition during the day is handled by the time zone rules rather
//! than by wall-clock arithmetic. All functions are generic over
//! [`TimeZone`] so tests can pin a fixed offset instead of the host zone.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    /// Wrap a raw millisecond count.
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// The current instant.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Convert from any zoned datetime.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// The raw millisecond count.
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Convert to a datetime in the given zone.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimestampOutOfRange`] if chrono cannot
    /// represent the instant.
    pub fn to_datetime<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Tz>, ValidationError> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
            .map(|dt| dt.with_timezone(tz))
            .ok_or(ValidationError::TimestampOutOfRange(self.0))
    }

    /// Render in the host's local zone, e.g. `2026-10-19 23:59:59 +08:00`.
    pub fn to_local_string(&self) -> String {
        match self.to_datetime(&Local) {
            Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
            Err(_) => self.0.to_string(),
        }
    }

    /// Milliseconds from `self` until `later` (negative if `later` is in
    /// the past relative to `self`).
    pub fn millis_until(&self, later: EpochMillis) -> i64 {
        later.0.saturating_sub(self.0)
    }
}

impl std::fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which local-calendar cutoff a credential expires at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryPolicy {
    /// 23:59:59.999 of the issuance day.
    #[default]
    EndOfDay,
    /// 00:00:00.000 of the day after issuance.
    NextMidnight,
}

impl ExpiryPolicy {
    /// Returns the policy identifier used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfDay => "end-of-day",
            Self::NextMidnight => "next-midnight",
        }
    }

    /// Compute the expiry instant for a credential issued at `now`.
    ///
    /// The calendar day is taken in `now`'s own time zone. The result is
    /// always strictly later than `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimestampOutOfRange`] if the next day
    /// cannot be represented.
    pub fn expires_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<EpochMillis, ValidationError> {
        let out_of_range = || ValidationError::TimestampOutOfRange(now.timestamp_millis());
        let tomorrow = now.date_naive().succ_opt().ok_or_else(out_of_range)?;
        let next_day = start_of_day(&now.timezone(), tomorrow).ok_or_else(out_of_range)?;
        let next_midnight = EpochMillis::from_datetime(&next_day);

        Ok(match self {
            Self::EndOfDay => EpochMillis(next_midnight.0 - 1),
            Self::NextMidnight => next_midnight,
        })
    }
}

impl std::fmt::Display for ExpiryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpiryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "end-of-day" => Ok(Self::EndOfDay),
            "next-midnight" => Ok(Self::NextMidnight),
            other => Err(format!(
                "unknown expiry policy {other:?} (expected end-of-day or next-midnight)"
            )),
        }
    }
}

/// First instant of `date` in `tz`.
///
/// Zones that skip midnight for DST start the day at the first existing
/// wall-clock time, so 01:00 is tried when 00:00 does not exist.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    [0, 1].into_iter().find_map(|hour| {
        let naive = date.and_hms_opt(hour, 0, 0)?;
        tz.from_local_datetime(&naive).earliest()
    })
}
