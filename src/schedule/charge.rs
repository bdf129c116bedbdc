use super::time::{
    MINUTES_IN_DAY, QUARTER_HOUR, deminuteize, minuteize, round_to_quarter_hour,
    validate_duration, validate_start_time, wrap_minutes,
};
use crate::error::{Result, ZeChargeError};
use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// One charge on one day: a wire start time plus a duration in minutes.
///
/// Construction never fails. Values may be off-grid or out of range until
/// [`ScheduledCharge::validate`] is called, which lets callers assemble a
/// charge from partial input before committing to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledCharge {
    /// Vehicle-local start time in wire form (`T<HH>:<MM>Z`)
    pub start_time: String,

    /// Duration in minutes
    pub duration: i64,
}

impl ScheduledCharge {
    /// Create a charge without checking it
    pub fn new<S: Into<String>>(start_time: S, duration: i64) -> Self {
        Self {
            start_time: start_time.into(),
            duration,
        }
    }

    /// Build a charge covering `start..end`, both floored to the quarter hour.
    ///
    /// The start time is the wall-clock time of `start` in its own zone.
    pub fn between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Result<Self> {
        if end <= start {
            return Err(ZeChargeError::invalid_argument(
                "Start time should be before end time",
            ));
        }

        let local = start.naive_local();
        let start_minute = round_to_quarter_hour(i64::from(local.hour() * 60 + local.minute()));

        let start_abs = round_to_quarter_hour(start.timestamp().div_euclid(60));
        let end_abs = round_to_quarter_hour(end.timestamp().div_euclid(60));
        let duration = end_abs - start_abs;
        if duration < QUARTER_HOUR {
            return Err(ZeChargeError::invalid_schedule(format!(
                "Charge from {} to {} is shorter than {} minutes",
                start.naive_local(),
                end.naive_local(),
                QUARTER_HOUR
            )));
        }

        Ok(Self::new(deminuteize(wrap_minutes(start_minute)), duration))
    }

    /// Check start time format and duration
    pub fn validate(&self) -> Result<()> {
        validate_start_time(&self.start_time)?;
        validate_duration(self.duration)?;
        self.finish_time_minutes().map(|_| ())
    }

    /// Start as minutes since midnight
    pub fn start_minutes(&self) -> Result<u32> {
        minuteize(&self.start_time)
    }

    /// Unwrapped end minute for a charge starting at `start`
    fn end_from(&self, start: u32) -> Result<i64> {
        i64::from(start).checked_add(self.duration).ok_or_else(|| {
            ZeChargeError::invalid_schedule(format!(
                "{} is not a valid duration",
                self.duration
            ))
        })
    }

    /// Finish as minutes since midnight, wrapped into the day
    pub fn finish_time_minutes(&self) -> Result<u32> {
        Ok(wrap_minutes(self.end_from(self.start_minutes()?)?))
    }

    /// Finish time in wire form
    pub fn finish_time(&self) -> Result<String> {
        Ok(deminuteize(self.finish_time_minutes()?))
    }

    /// Whether the charge reaches or crosses midnight
    pub fn spans_midnight(&self) -> Result<bool> {
        Ok(self.end_from(self.start_minutes()?)? >= i64::from(MINUTES_IN_DAY))
    }

    /// Same as [`spans_midnight`](Self::spans_midnight) after shifting the
    /// start by `offset_minutes`, i.e. as seen from another time zone.
    pub fn spans_midnight_in(&self, offset_minutes: i32) -> Result<bool> {
        let shifted = wrap_minutes(i64::from(self.start_minutes()?) + i64::from(offset_minutes));
        Ok(self.end_from(shifted)? >= i64::from(MINUTES_IN_DAY))
    }

    /// Whether this charge runs into the start of `other`.
    ///
    /// One-directional: `a.overlaps(b)` says nothing about `b.overlaps(a)`.
    /// Used for a midnight-spanning charge against the next day's charge.
    pub fn overlaps(&self, other: &ScheduledCharge) -> Result<bool> {
        Ok(self.finish_time_minutes()? >= other.start_minutes()?)
    }

    /// Wire form: `{"startTime": ..., "duration": ...}`
    pub fn for_json(&self) -> Value {
        json!({
            "startTime": self.start_time,
            "duration": self.duration,
        })
    }
}

impl fmt::Display for ScheduledCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Start {}, duration {})", self.start_time, self.duration)
    }
}
