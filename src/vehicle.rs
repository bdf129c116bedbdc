//! Vehicle command and query seam
//!
//! The schedule model never talks to the network. A [`VehicleChannel`]
//! carries payloads to and from the vehicle; [`ChargeScheduler`] drives the
//! fetch, edit, validate and submit cycle on top of one.

use crate::error::{Result, ZeChargeError};
use crate::logging::get_logger;
use crate::schedule::time::{deminuteize, round_to_quarter_hour, wrap_minutes};
use crate::schedule::{ChargeSchedule, ChargeSchedules, Day, ScheduleEdits, ScheduledCharge};
use crate::timezone::TimezoneOffset;
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// How the vehicle decides when to charge once plugged in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeMode {
    /// Charge as soon as plugged in
    Always,
    /// Charge according to the activated schedule
    Scheduled,
}

impl ChargeMode {
    /// Tag used in the charging settings payload
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Scheduled => "scheduled",
        }
    }

    /// Action name used when commanding a mode change
    pub fn action(self) -> &'static str {
        match self {
            Self::Always => "always_charging",
            Self::Scheduled => "schedule_mode",
        }
    }

    /// Accept either the settings tag or the action name
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "always" | "always_charging" => Some(Self::Always),
            "scheduled" | "schedule_mode" => Some(Self::Scheduled),
            _ => None,
        }
    }
}

impl fmt::Display for ChargeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport to one vehicle
#[async_trait::async_trait]
pub trait VehicleChannel: Send + Sync {
    /// Current charging settings, unvalidated
    async fn charge_schedules(&self) -> Result<ChargeSchedules>;

    /// Send a `ChargeSchedules::for_json()` payload
    async fn submit_charge_schedules(&self, payload: Value) -> Result<()>;

    async fn charge_mode(&self) -> Result<ChargeMode>;

    async fn set_charge_mode(&self, mode: ChargeMode) -> Result<()>;
}

/// JSON:API body for a charge schedule command
pub fn charge_schedule_command(payload: Value) -> Value {
    json!({
        "type": "ChargeSchedule",
        "attributes": payload,
    })
}

/// JSON:API body for a charge mode command
pub fn charge_mode_command(mode: ChargeMode) -> Value {
    json!({
        "type": "ChargeMode",
        "attributes": { "action": mode.action() },
    })
}

/// A fresh collection holding one activated schedule with a single charge
/// on the weekday of `start`, starting at the quarter hour at or before it.
pub fn single_charge_schedules<Tz: TimeZone>(
    start: &DateTime<Tz>,
    duration: i64,
) -> Result<ChargeSchedules> {
    let local = start.naive_local();
    let minute_of_day = round_to_quarter_hour(i64::from(local.hour() * 60 + local.minute()));
    let charge = ScheduledCharge::new(deminuteize(wrap_minutes(minute_of_day)), duration);

    let mut schedule = ChargeSchedule::empty();
    schedule.activated = true;
    schedule.set(Day::from(local.weekday()), charge)?;

    let mut schedules = ChargeSchedules::new();
    schedules.add(schedule);
    Ok(schedules)
}

/// Fetch/edit/submit cycle for charge schedules on one vehicle
pub struct ChargeScheduler {
    channel: Option<Box<dyn VehicleChannel>>,
    logger: crate::logging::StructuredLogger,
}

impl Default for ChargeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargeScheduler {
    pub fn new() -> Self {
        let logger = get_logger("vehicle");
        Self {
            channel: None,
            logger,
        }
    }

    pub fn with_channel(channel: Box<dyn VehicleChannel>) -> Self {
        let mut scheduler = Self::new();
        scheduler.set_channel(channel);
        scheduler
    }

    pub fn set_channel(&mut self, channel: Box<dyn VehicleChannel>) {
        self.channel = Some(channel);
    }

    fn channel(&self) -> Result<&dyn VehicleChannel> {
        self.channel
            .as_deref()
            .ok_or_else(|| ZeChargeError::api("No vehicle channel configured"))
    }

    pub async fn fetch_charge_schedules(&self) -> Result<ChargeSchedules> {
        self.channel()?.charge_schedules().await
    }

    /// Validate and submit; invalid schedules never reach the channel
    pub async fn set_charge_schedules(&self, schedules: &ChargeSchedules) -> Result<()> {
        let channel = self.channel()?;
        if let Err(e) = schedules.validate() {
            self.logger
                .warn(&format!("Refusing to submit charge schedules: {}", e));
            return Err(e);
        }
        channel.submit_charge_schedules(schedules.for_json()).await?;
        self.logger.info(&format!(
            "Submitted {} charge schedule(s); the vehicle may take a while to pick them up",
            schedules.len()
        ));
        Ok(())
    }

    /// Fetch the current schedules, apply `edits` to schedule `id`, validate
    /// and submit. Returns what was submitted.
    pub async fn edit_schedule(
        &self,
        id: u32,
        edits: &ScheduleEdits,
        offset: Option<TimezoneOffset>,
    ) -> Result<ChargeSchedules> {
        let mut schedules = self.fetch_charge_schedules().await?;
        schedules.update(id, edits, offset)?;
        self.set_charge_schedules(&schedules).await?;
        Ok(schedules)
    }

    /// Replace all schedules with a single charge at `start` and switch the
    /// vehicle to scheduled charging.
    pub async fn schedule_single_charge<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        duration: i64,
    ) -> Result<ChargeSchedules> {
        let schedules = single_charge_schedules(start, duration)?;
        self.set_charge_schedules(&schedules).await?;
        self.set_charge_mode(ChargeMode::Scheduled).await?;
        Ok(schedules)
    }

    pub async fn charge_mode(&self) -> Result<ChargeMode> {
        self.channel()?.charge_mode().await
    }

    pub async fn set_charge_mode(&self, mode: ChargeMode) -> Result<()> {
        self.channel()?.set_charge_mode(mode).await?;
        self.logger.info(&format!("Charge mode set to {}", mode));
        Ok(())
    }
}
