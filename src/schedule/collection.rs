use super::edit::ScheduleEdits;
use super::week::ChargeSchedule;
use crate::error::{Result, ZeChargeError};
use crate::logging::get_logger;
use crate::timezone::TimezoneOffset;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// All charge schedules of one vehicle, keyed by id.
///
/// At most one schedule may be activated; that and each schedule's own
/// rules are checked by [`ChargeSchedules::validate`], never on parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChargeSchedulesWire", into = "ChargeSchedulesWire")]
pub struct ChargeSchedules {
    /// Charge mode tag reported by the vehicle (informational)
    pub mode: Option<String>,

    schedules: BTreeMap<u32, ChargeSchedule>,

    // Ids a parsed payload carried more than once; later entries won
    duplicate_ids: Vec<u32>,
}

impl ChargeSchedules {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{"mode", "schedules": [...]}` payload without validating it.
    ///
    /// When an id repeats, the last schedule with it is kept and
    /// [`validate`](Self::validate) reports the repetition.
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Parse a saved settings document: either the charging-settings
    /// attributes or a whole `{"data": {"attributes": ...}}` response
    pub fn from_settings_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let attributes = value
            .get("data")
            .and_then(|d| d.get("attributes"))
            .unwrap_or(&value);
        Self::from_value(attributes)
    }

    /// Validated settings document for local storage, `mode` included
    pub fn to_settings_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Schedules in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ChargeSchedule)> + '_ {
        self.schedules.iter().map(|(id, schedule)| (*id, schedule))
    }

    pub fn ids(&self) -> Vec<u32> {
        self.schedules.keys().copied().collect()
    }

    pub fn get(&self, id: u32) -> Option<&ChargeSchedule> {
        self.schedules.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut ChargeSchedule> {
        self.schedules.get_mut(&id)
    }

    /// Schedule `id`, failing when absent
    pub fn schedule(&self, id: u32) -> Result<&ChargeSchedule> {
        self.get(id).ok_or_else(|| missing(id))
    }

    /// Mutable schedule `id`, failing when absent
    pub fn schedule_mut(&mut self, id: u32) -> Result<&mut ChargeSchedule> {
        self.schedules.get_mut(&id).ok_or_else(|| missing(id))
    }

    pub fn remove(&mut self, id: u32) -> Option<ChargeSchedule> {
        self.schedules.remove(&id)
    }

    /// One past the highest id in use (1 when empty). Gaps are not reused.
    pub fn next_id(&self) -> u32 {
        self.schedules
            .keys()
            .next_back()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Create a default schedule under the next free id
    pub fn new_schedule(&mut self) -> &mut ChargeSchedule {
        self.add(ChargeSchedule::default())
    }

    /// Store `schedule`, giving it the next free id if it has none.
    ///
    /// A schedule with an id already present replaces the stored one.
    pub fn add(&mut self, mut schedule: ChargeSchedule) -> &mut ChargeSchedule {
        let id = match schedule.id {
            Some(id) => id,
            None => {
                let id = self.next_id();
                schedule.id = Some(id);
                id
            }
        };

        match self.schedules.entry(id) {
            Entry::Occupied(mut entry) => {
                get_logger("schedule").warn(&format!("Replacing charge schedule {}", id));
                entry.insert(schedule);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(schedule),
        }
    }

    /// The activated schedule, if any
    pub fn active(&self) -> Option<&ChargeSchedule> {
        self.schedules.values().find(|s| s.activated)
    }

    /// Activate schedule `id` and deactivate all others
    pub fn activate(&mut self, id: u32) -> Result<()> {
        if !self.schedules.contains_key(&id) {
            return Err(missing(id));
        }
        for (key, schedule) in &mut self.schedules {
            schedule.activated = *key == id;
        }
        Ok(())
    }

    /// Validate every schedule and require at most one to be activated
    pub fn validate(&self) -> Result<()> {
        if !self.duplicate_ids.is_empty() {
            return Err(ZeChargeError::invalid_schedule(format!(
                "Schedule ids {:?} appear more than once",
                self.duplicate_ids
            )));
        }
        for (id, schedule) in &self.schedules {
            if schedule.id != Some(*id) {
                return Err(ZeChargeError::invalid_schedule(format!(
                    "Schedule stored as {} carries id {:?}",
                    id, schedule.id
                )));
            }
            schedule.validate()?;
        }

        let activated: Vec<u32> = self
            .schedules
            .iter()
            .filter(|(_, s)| s.activated)
            .map(|(id, _)| *id)
            .collect();
        if activated.len() > 1 {
            return Err(ZeChargeError::invalid_schedule(format!(
                "{} schedules are activated ({:?}); at most one may be",
                activated.len(),
                activated
            )));
        }
        Ok(())
    }

    /// Apply per-day edits to schedule `id`.
    ///
    /// With `offset`, edit times are taken to be in the user's zone and are
    /// shifted back to vehicle time first. Each assigned day is validated on
    /// its own; call [`validate`](Self::validate) before submitting.
    pub fn update(
        &mut self,
        id: u32,
        edits: &ScheduleEdits,
        offset: Option<TimezoneOffset>,
    ) -> Result<()> {
        let logger = get_logger("schedule");
        let schedule = self.schedule_mut(id)?;
        for (day, edit) in edits.iter() {
            let charge = edit.to_charge(offset)?;
            logger.debug(&format!("Schedule {}: {} -> {}", id, day, charge));
            schedule.set(day, charge)?;
        }
        Ok(())
    }

    /// Command payload: `{"schedules": [...]}`
    pub fn for_json(&self) -> Value {
        json!({
            "schedules": self
                .schedules
                .values()
                .map(ChargeSchedule::for_json)
                .collect::<Vec<_>>(),
        })
    }
}

fn missing(id: u32) -> ZeChargeError {
    ZeChargeError::not_found(format!("No charge schedule with id {}", id))
}

/// Serde shape of the charging settings payload
#[derive(Serialize, Deserialize)]
struct ChargeSchedulesWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(default)]
    schedules: Vec<ChargeSchedule>,
}

impl From<ChargeSchedulesWire> for ChargeSchedules {
    fn from(wire: ChargeSchedulesWire) -> Self {
        let mut collection = ChargeSchedules {
            mode: wire.mode,
            ..Default::default()
        };
        for schedule in wire.schedules {
            if let Some(id) = schedule.id
                && collection.schedules.contains_key(&id)
            {
                collection.duplicate_ids.push(id);
            }
            collection.add(schedule);
        }
        collection
    }
}

impl From<ChargeSchedules> for ChargeSchedulesWire {
    fn from(collection: ChargeSchedules) -> Self {
        Self {
            mode: collection.mode,
            schedules: collection.schedules.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Day;

    #[test]
    fn new_collection_is_empty() {
        let schedules = ChargeSchedules::new();
        assert_eq!(schedules.len(), 0);
        assert!(schedules.is_empty());
        assert_eq!(schedules.next_id(), 1);
        schedules.validate().unwrap();
    }

    #[test]
    fn add_assigns_missing_ids() {
        let mut schedules = ChargeSchedules::new();
        let mut explicit = ChargeSchedule::empty();
        explicit.id = Some(7);
        schedules.add(explicit);

        let added = schedules.add(ChargeSchedule::empty());
        assert_eq!(added.id, Some(8));
        assert_eq!(schedules.ids(), vec![7, 8]);
    }

    #[test]
    fn activate_is_exclusive() {
        let mut schedules = ChargeSchedules::new();
        schedules.new_schedule().activated = true;
        schedules.new_schedule();
        schedules.activate(2).unwrap();
        assert_eq!(schedules.active().and_then(|s| s.id), Some(2));
        assert!(!schedules.schedule(1).unwrap().activated);
        assert!(schedules.activate(9).is_err());
    }

    #[test]
    fn validate_catches_id_drift() {
        let mut schedules = ChargeSchedules::new();
        schedules.new_schedule();
        schedules.get_mut(1).unwrap().id = Some(5);
        let err = schedules.validate().unwrap_err();
        assert!(err.is_invalid_schedule());
    }

    #[test]
    fn update_touches_only_edited_days() {
        let mut schedules = ChargeSchedules::new();
        schedules.new_schedule();
        let edits = ScheduleEdits::from_day_values([(Day::Thursday, Some("0100,120"))]).unwrap();
        schedules.update(1, &edits, None).unwrap();

        let schedule = schedules.schedule(1).unwrap();
        assert_eq!(schedule.charge(Day::Thursday).unwrap().start_time, "T01:00Z");
        assert_eq!(schedule.charge(Day::Thursday).unwrap().duration, 120);
        assert_eq!(schedule.charge(Day::Friday).unwrap().start_time, "T12:00Z");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut schedules = ChargeSchedules::new();
        let err = schedules.update(4, &ScheduleEdits::new(), None).unwrap_err();
        assert!(matches!(err, ZeChargeError::NotFound { .. }));
    }
}
