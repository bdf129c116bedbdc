use super::charge::ScheduledCharge;
use super::day::{DAYS, Day};
use super::time::validate_start_time;
use crate::error::{Result, ZeChargeError};
use crate::timezone::{TimezoneOffset, remove_offset};
use once_cell::sync::OnceCell;
use regex::Regex;

static DAY_VALUE_REGEX: OnceCell<Regex> = OnceCell::new();

fn day_value_regex() -> Result<&'static Regex> {
    DAY_VALUE_REGEX.get_or_try_init(|| {
        Regex::new(r"^(?P<start_time>[0-2][0-9][0-5][05]),(?P<duration>[0-9]+[05])$")
            .map_err(|e| ZeChargeError::config(format!("Bad day value pattern: {}", e)))
    })
}

/// Requested charge for one day, as typed by a user (`HHMM,DURATION`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEdit {
    /// Start in wire form, in whatever zone the user typed it
    pub start_time: String,
    /// Duration in minutes
    pub duration: i64,
}

impl DayEdit {
    pub fn new<S: Into<String>>(start_time: S, duration: i64) -> Self {
        Self {
            start_time: start_time.into(),
            duration,
        }
    }

    /// Parse `HHMM,DURATION`, e.g. `2330,60`
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || {
            ZeChargeError::invalid_argument(format!(
                "Invalid specification for charge schedule: `{}`. Should be of the form HHMM,DURATION",
                raw
            ))
        };

        let caps = day_value_regex()?.captures(raw.trim()).ok_or_else(invalid)?;
        let start = &caps["start_time"];
        let duration = caps["duration"].parse::<i64>().map_err(|_| invalid())?;

        Ok(Self::new(
            format!("T{}:{}Z", &start[..2], &start[2..]),
            duration,
        ))
    }

    /// Turn the edit into a charge, shifting the start out of the user's
    /// zone when `offset` is given.
    pub fn to_charge(&self, offset: Option<TimezoneOffset>) -> Result<ScheduledCharge> {
        let start_time = match offset {
            Some(offset) => {
                // shifting would wrap an out-of-range hour into a valid one
                validate_start_time(&self.start_time)?;
                remove_offset(&self.start_time, offset)?
            }
            None => self.start_time.clone(),
        };
        Ok(ScheduledCharge::new(start_time, self.duration))
    }
}

/// Per-day edit instructions for a bulk schedule update.
///
/// A day without an instruction is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleEdits {
    days: [Option<DayEdit>; 7],
}

impl ScheduleEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse optional `HHMM,DURATION` values per day
    pub fn from_day_values<'a, I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Day, Option<&'a str>)>,
    {
        let mut edits = Self::new();
        for (day, value) in values {
            if let Some(raw) = value {
                edits.set(day, Some(DayEdit::parse(raw)?));
            }
        }
        Ok(edits)
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, day: Day, edit: DayEdit) -> Self {
        self.set(day, Some(edit));
        self
    }

    pub fn set(&mut self, day: Day, edit: Option<DayEdit>) {
        self.days[day.index()] = edit;
    }

    pub fn get(&self, day: Day) -> Option<&DayEdit> {
        self.days[day.index()].as_ref()
    }

    /// Days with an instruction, Monday first
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayEdit)> + '_ {
        DAYS.into_iter()
            .filter_map(move |day| self.get(day).map(|edit| (day, edit)))
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }
}
