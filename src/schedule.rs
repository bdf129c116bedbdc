//! Weekly charge schedules
//!
//! The vehicle keeps a handful of weekly schedules, each with at most one
//! charge per day, and follows whichever one is activated. This module holds
//! the data model, the quarter-hour time arithmetic behind it, and the
//! conversion to and from the vehicle's JSON payloads.
//!
//! Values are built first and validated separately: parsing a payload or
//! assembling a schedule never fails on bad schedule data, and
//! `validate()` must be called before anything is sent to the vehicle.

pub mod charge;
pub mod collection;
pub mod day;
pub mod edit;
pub mod time;
pub mod week;

pub use charge::ScheduledCharge;
pub use collection::ChargeSchedules;
pub use day::{DAYS, Day};
pub use edit::{DayEdit, ScheduleEdits};
pub use time::{MINUTES_IN_DAY, deminuteize, minuteize, round_to_quarter_hour};
pub use week::ChargeSchedule;
