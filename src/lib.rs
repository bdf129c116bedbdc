//! # zecharge - Charge schedules for Renault ZE vehicles
//!
//! Models the weekly charge schedules a vehicle keeps, validates them before
//! they are sent, and converts between the vehicle's clock and the user's
//! timezone for display and editing.
//!
//! ## Features
//!
//! - **Schedule model**: quarter-hour charges, one per day, several weekly
//!   schedules with at most one activated
//! - **Two-phase validation**: payloads always parse, `validate()` gates submission
//! - **Timezones**: IANA zones or the system zone, resolved at the moment of use
//! - **Vehicle seam**: async channel trait with an optional HTTP implementation
//! - **Configuration**: YAML-based configuration with validation
//!
//! ## Architecture
//!
//! - `schedule`: Data model, time arithmetic and JSON conversion
//! - `timezone`: Offsets between the vehicle clock and the user's zone
//! - `display`: Tables for showing schedules
//! - `vehicle`: Channel trait and the fetch/edit/submit cycle
//! - `kamereon`: HTTP channel (feature `kamereon`)
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing

pub mod config;
pub mod display;
pub mod error;
#[cfg(feature = "kamereon")]
pub mod kamereon;
pub mod logging;
pub mod schedule;
pub mod timezone;
pub mod vehicle;


// Re-export commonly used types
pub use config::Config;
pub use error::{Result, ZeChargeError};
pub use schedule::{ChargeSchedule, ChargeSchedules, Day, ScheduleEdits, ScheduledCharge};
pub use timezone::TimezoneOffset;
pub use vehicle::{ChargeMode, ChargeScheduler, VehicleChannel};
