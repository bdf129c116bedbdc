//! Time-of-day arithmetic on the vehicle's wire format.
//!
//! The vehicle API exchanges times of day as `T<HH>:<MM>Z`. Despite the
//! trailing `Z` these are the vehicle's own wall-clock times, not UTC.
//! Internally they are handled as minutes since local midnight.

use crate::error::{Result, ZeChargeError};

/// Minutes in one day
pub const MINUTES_IN_DAY: u32 = 24 * 60;

/// Granularity of start times and durations accepted by the vehicle
pub const QUARTER_HOUR: i64 = 15;

const VALID_MINUTES: [&str; 4] = ["00", "15", "30", "45"];

fn invalid_start_time(wire: &str) -> ZeChargeError {
    ZeChargeError::invalid_schedule(format!("{} is not a valid start time", wire))
}

/// Convert a wire time (`T<HH>:<MM>Z`) to minutes since midnight.
///
/// Hour and minute are read at fixed offsets. Only the shape needed to
/// extract them is checked here; grid alignment and ranges are the job of
/// [`validate_start_time`].
pub fn minuteize(wire: &str) -> Result<u32> {
    let hour = wire
        .get(1..3)
        .and_then(|h| h.parse::<u32>().ok())
        .ok_or_else(|| invalid_start_time(wire))?;
    let minute = wire
        .get(4..6)
        .and_then(|m| m.parse::<u32>().ok())
        .ok_or_else(|| invalid_start_time(wire))?;
    Ok(hour * 60 + minute)
}

/// Convert minutes since midnight back to a wire time.
///
/// Callers reduce `minutes` modulo [`MINUTES_IN_DAY`] where wrapping is
/// wanted.
pub fn deminuteize(minutes: u32) -> String {
    format!("T{:02}:{:02}Z", minutes / 60, minutes % 60)
}

/// Floor a minute count to the quarter-hour grid.
pub fn round_to_quarter_hour(minutes: i64) -> i64 {
    minutes.div_euclid(QUARTER_HOUR) * QUARTER_HOUR
}

/// Reduce a possibly negative minute count to a minute of the day.
pub fn wrap_minutes(minutes: i64) -> u32 {
    // rem_euclid keeps the result in 0..1440, so the cast cannot truncate
    minutes.rem_euclid(i64::from(MINUTES_IN_DAY)) as u32
}

/// Check that `wire` is exactly `T<00-23>:<00|15|30|45>Z`.
pub fn validate_start_time(wire: &str) -> Result<()> {
    let bytes = wire.as_bytes();
    if bytes.len() != 7 || bytes[0] != b'T' || bytes[3] != b':' || bytes[6] != b'Z' {
        return Err(invalid_start_time(wire));
    }

    let hour = &wire[1..3];
    let minute = &wire[4..6];
    if !hour.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_start_time(wire));
    }
    match hour.parse::<u32>() {
        Ok(h) if h < 24 => {}
        _ => return Err(invalid_start_time(wire)),
    }
    if !VALID_MINUTES.contains(&minute) {
        return Err(invalid_start_time(wire));
    }
    Ok(())
}

/// Check that a duration is a positive multiple of fifteen minutes.
pub fn validate_duration(duration: i64) -> Result<()> {
    if duration > 0 && duration % QUARTER_HOUR == 0 {
        Ok(())
    } else {
        Err(ZeChargeError::invalid_schedule(format!(
            "{} is not a valid duration",
            duration
        )))
    }
}
