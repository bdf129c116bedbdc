//! Timezone offset correction for wire times
//!
//! Wire times are vehicle wall-clock times with a misleading `Z` suffix. The
//! client has no way of knowing where the vehicle is, so it treats them as
//! UTC and corrects by the end user's own UTC offset. This is an
//! approximation: it is exact only when the user and the vehicle share a
//! zone. The offset is evaluated at the moment of conversion so the DST rule
//! in force at that moment applies; one offset is used for a whole edit.

use crate::error::{Result, ZeChargeError};
use crate::schedule::time::{deminuteize, minuteize, wrap_minutes};
use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Signed offset from UTC in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimezoneOffset {
    minutes: i32,
}

impl TimezoneOffset {
    /// No offset
    pub const UTC: TimezoneOffset = TimezoneOffset { minutes: 0 };

    pub fn from_minutes(minutes: i32) -> Self {
        Self { minutes }
    }

    /// Build from an hours/minutes pair; both parts carry the sign
    pub fn from_hours_minutes(hours: i32, minutes: i32) -> Self {
        Self {
            minutes: hours * 60 + minutes,
        }
    }

    pub fn total_minutes(self) -> i32 {
        self.minutes
    }

    /// Whole hours, truncated toward zero
    pub fn hours(self) -> i32 {
        self.minutes / 60
    }

    /// Remaining minutes after [`hours`](Self::hours), same sign
    pub fn minutes(self) -> i32 {
        self.minutes % 60
    }
}

impl From<FixedOffset> for TimezoneOffset {
    fn from(offset: FixedOffset) -> Self {
        Self::from_minutes(offset.local_minus_utc() / 60)
    }
}

impl fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

/// Zone the end user reasons in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserZone {
    /// The system zone
    Local,
    /// A named IANA zone
    Named(Tz),
}

impl UserZone {
    /// Resolve a configured name; empty or `local` selects the system zone
    pub fn resolve(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(UserZone::Local);
        }
        trimmed.parse::<Tz>().map(UserZone::Named).map_err(|_| {
            ZeChargeError::validation("timezone".to_string(), format!("Unknown timezone: {}", trimmed))
        })
    }

    /// Offset in force at `instant`
    pub fn offset_at(self, instant: &DateTime<Utc>) -> TimezoneOffset {
        match self {
            UserZone::Local => local_offset_at(instant),
            UserZone::Named(zone) => offset_at(&zone, instant),
        }
    }
}

/// Offset of `zone` at `instant`
pub fn offset_at(zone: &Tz, instant: &DateTime<Utc>) -> TimezoneOffset {
    zone.offset_from_utc_datetime(&instant.naive_utc()).fix().into()
}

/// Offset of the system zone at `instant`
pub fn local_offset_at(instant: &DateTime<Utc>) -> TimezoneOffset {
    Local.offset_from_utc_datetime(&instant.naive_utc()).into()
}

/// Offset of the named zone right now
pub fn current_offset(zone_name: &str) -> Result<TimezoneOffset> {
    Ok(UserZone::resolve(zone_name)?.offset_at(&Utc::now()))
}

/// Shift a vehicle wire time forward into the user's zone
pub fn apply_offset(wire: &str, offset: TimezoneOffset) -> Result<String> {
    let minutes = i64::from(minuteize(wire)?) + i64::from(offset.total_minutes());
    Ok(deminuteize(wrap_minutes(minutes)))
}

/// Shift a user-zone time back to a vehicle wire time
pub fn remove_offset(local: &str, offset: TimezoneOffset) -> Result<String> {
    let minutes = i64::from(minuteize(local)?) - i64::from(offset.total_minutes());
    Ok(deminuteize(wrap_minutes(minutes)))
}
