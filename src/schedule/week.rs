use super::charge::ScheduledCharge;
use super::day::{DAYS, Day};
use crate::error::{Result, ZeChargeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Start time every day gets in a freshly created schedule
pub const DEFAULT_START_TIME: &str = "T12:00Z";

/// Duration every day gets in a freshly created schedule
pub const DEFAULT_DURATION: i64 = 15;

/// A weekly charge plan: at most one charge per day.
///
/// Assigning a day validates only that day's charge. Cross-day consistency
/// is checked by [`ChargeSchedule::validate`], so a multi-day edit may pass
/// through invalid intermediate states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChargeScheduleWire", into = "ChargeScheduleWire")]
pub struct ChargeSchedule {
    /// Identifier, assigned by the owning collection when unset
    pub id: Option<u32>,

    /// Whether this is the schedule the vehicle currently follows
    pub activated: bool,

    days: [Option<ScheduledCharge>; 7],
}

impl Default for ChargeSchedule {
    /// Every day at `T12:00Z` for 15 minutes, not activated, no id
    fn default() -> Self {
        let mut schedule = Self::empty();
        for day in DAYS {
            schedule.days[day.index()] =
                Some(ScheduledCharge::new(DEFAULT_START_TIME, DEFAULT_DURATION));
        }
        schedule
    }
}

impl ChargeSchedule {
    /// Schedule with no charge on any day
    pub fn empty() -> Self {
        Self {
            id: None,
            activated: false,
            days: Default::default(),
        }
    }

    /// Parse a wire schedule (`{"id", "activated", "<day>": {...}}`) without validating it
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Parse the legacy `{"calendar": {"<day>": [<charge>, ...]}}` layout.
    ///
    /// An empty list leaves the day unscheduled; more than one entry is
    /// rejected because a day holds at most one charge.
    pub fn from_calendar(value: &Value) -> Result<Self> {
        let calendar: BTreeMap<Day, Vec<ScheduledCharge>> = match value.get("calendar") {
            Some(raw) => BTreeMap::deserialize(raw)?,
            None => BTreeMap::new(),
        };

        let mut schedule = Self::empty();
        schedule.id = value
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok());
        schedule.activated = value
            .get("activated")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        for (day, mut charges) in calendar {
            if charges.len() > 1 {
                return Err(ZeChargeError::invalid_schedule(format!(
                    "{} charges scheduled for {} (must be at most 1)",
                    charges.len(),
                    day
                )));
            }
            schedule.days[day.index()] = charges.pop();
        }
        Ok(schedule)
    }

    /// Charge for `day`, if any
    pub fn get(&self, day: Day) -> Option<&ScheduledCharge> {
        self.days[day.index()].as_ref()
    }

    /// Mutable charge for `day`, if any
    pub fn get_mut(&mut self, day: Day) -> Option<&mut ScheduledCharge> {
        self.days[day.index()].as_mut()
    }

    /// Charge for `day`, failing when the day has none
    pub fn charge(&self, day: Day) -> Result<&ScheduledCharge> {
        self.get(day)
            .ok_or_else(|| ZeChargeError::not_found(format!("No charge scheduled for {}", day)))
    }

    /// Assign the charge for `day` after validating that charge alone
    pub fn set(&mut self, day: Day, charge: ScheduledCharge) -> Result<()> {
        charge.validate()?;
        self.days[day.index()] = Some(charge);
        Ok(())
    }

    /// Assign by wire day name; non-canonical names are rejected
    pub fn set_by_name(&mut self, day: &str, charge: ScheduledCharge) -> Result<()> {
        self.set(day.parse()?, charge)
    }

    /// Clear `day`, returning the charge it held
    pub fn remove(&mut self, day: Day) -> Option<ScheduledCharge> {
        self.days[day.index()].take()
    }

    /// Days that have a charge, Monday first
    pub fn iter(&self) -> impl Iterator<Item = (Day, &ScheduledCharge)> + '_ {
        DAYS.into_iter()
            .filter_map(move |day| self.get(day).map(|charge| (day, charge)))
    }

    /// Number of days with a charge
    pub fn len(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }

    /// Whether no day has a charge
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate every charge, then check that no charge running past
    /// midnight runs into the next day's charge.
    pub fn validate(&self) -> Result<()> {
        for (day, charge) in self.iter() {
            charge.validate()?;

            if charge.spans_midnight()? {
                let next_day = day.next();
                if let Some(tomorrow) = self.get(next_day)
                    && charge.overlaps(tomorrow)?
                {
                    return Err(ZeChargeError::invalid_schedule(format!(
                        "Charge for {} overlaps charge for {}",
                        day, next_day
                    )));
                }
            }
        }
        Ok(())
    }

    /// Wire form: `{"id", "activated", "<day>": {...}}` with present days only
    pub fn for_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), self.id.map_or(Value::Null, Value::from));
        map.insert("activated".to_string(), Value::Bool(self.activated));
        for (day, charge) in self.iter() {
            map.insert(day.as_str().to_string(), charge.for_json());
        }
        Value::Object(map)
    }
}

/// Serde shape of a schedule on the wire
#[derive(Serialize, Deserialize)]
struct ChargeScheduleWire {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    activated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monday: Option<ScheduledCharge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tuesday: Option<ScheduledCharge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wednesday: Option<ScheduledCharge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thursday: Option<ScheduledCharge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    friday: Option<ScheduledCharge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saturday: Option<ScheduledCharge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sunday: Option<ScheduledCharge>,
}

impl From<ChargeScheduleWire> for ChargeSchedule {
    fn from(wire: ChargeScheduleWire) -> Self {
        Self {
            id: wire.id,
            activated: wire.activated,
            days: [
                wire.monday,
                wire.tuesday,
                wire.wednesday,
                wire.thursday,
                wire.friday,
                wire.saturday,
                wire.sunday,
            ],
        }
    }
}

impl From<ChargeSchedule> for ChargeScheduleWire {
    fn from(schedule: ChargeSchedule) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = schedule.days;
        Self {
            id: schedule.id,
            activated: schedule.activated,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
        }
    }
}
