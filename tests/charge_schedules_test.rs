use serde_json::{Value, json};
use zecharge::error::ZeChargeError;
use zecharge::schedule::{ChargeSchedule, ChargeSchedules, Day, DayEdit, ScheduleEdits};
use zecharge::timezone::TimezoneOffset;

fn week_payload() -> Value {
    json!({
        "mode": "scheduled",
        "schedules": [
            {
                "id": 1,
                "activated": true,
                "monday": {"startTime": "T00:00Z", "duration": 450},
                "tuesday": {"startTime": "T23:30Z", "duration": 480},
                "wednesday": {"startTime": "T23:30Z", "duration": 480},
                "thursday": {"startTime": "T22:00Z", "duration": 420},
                "friday": {"startTime": "T12:15Z", "duration": 15},
                "saturday": {"startTime": "T12:30Z", "duration": 30},
                "sunday": {"startTime": "T12:45Z", "duration": 45}
            },
            {
                "id": 2,
                "activated": false,
                "monday": {"startTime": "T01:00Z", "duration": 15}
            },
            {"id": 3, "activated": false}
        ]
    })
}

#[test]
fn parses_every_schedule_by_id() {
    let schedules = ChargeSchedules::from_value(&week_payload()).unwrap();
    assert_eq!(schedules.mode.as_deref(), Some("scheduled"));
    assert_eq!(schedules.ids(), vec![1, 2, 3]);
    assert_eq!(schedules.schedule(1).unwrap().len(), 7);
    assert!(schedules.schedule(3).unwrap().is_empty());
    assert_eq!(schedules.active().and_then(|s| s.id), Some(1));
}

#[test]
fn overlapping_week_is_rejected_only_on_validate() {
    // Tuesday to Thursday run past midnight but finish before the next start
    let schedules = ChargeSchedules::from_value(&week_payload()).unwrap();
    assert!(schedules.validate().is_ok());

    let mut broken = week_payload();
    broken["schedules"][0]["friday"] = json!({"startTime": "T05:00Z", "duration": 15});
    let schedules = ChargeSchedules::from_value(&broken).unwrap();
    let err = schedules.validate().unwrap_err();
    assert!(err.to_string().contains("Charge for thursday overlaps charge for friday"));
}

#[test]
fn round_trip_preserves_structure() {
    let raw = week_payload();
    let out = ChargeSchedules::from_value(&raw).unwrap().for_json();

    let raw_list = raw["schedules"].as_array().unwrap();
    let out_list = out["schedules"].as_array().unwrap();
    assert_eq!(raw_list.len(), out_list.len());
    for (a, b) in raw_list.iter().zip(out_list) {
        assert_eq!(a, b);
    }
}

#[test]
fn serde_keeps_the_mode() {
    let schedules = ChargeSchedules::from_value(&week_payload()).unwrap();
    let value = serde_json::to_value(&schedules).unwrap();
    assert_eq!(value["mode"], json!("scheduled"));
    assert!(schedules.for_json().get("mode").is_none());

    let back: ChargeSchedules = serde_json::from_value(value).unwrap();
    assert_eq!(back, schedules);
}

#[test]
fn ids_grow_from_the_highest() {
    let mut schedules = ChargeSchedules::new();
    assert_eq!(schedules.new_schedule().id, Some(1));
    assert_eq!(schedules.new_schedule().id, Some(2));

    schedules.remove(1);
    assert_eq!(schedules.new_schedule().id, Some(3));
    assert_eq!(schedules.ids(), vec![2, 3]);
}

#[test]
fn add_assigns_missing_ids_and_keeps_given_ones() {
    let mut schedules = ChargeSchedules::new();
    let mut explicit = ChargeSchedule::empty();
    explicit.id = Some(7);
    schedules.add(explicit);

    let added = schedules.add(ChargeSchedule::default());
    assert_eq!(added.id, Some(8));

    let payload = json!({"schedules": [{"activated": false}, {"activated": true}]});
    let parsed = ChargeSchedules::from_value(&payload).unwrap();
    assert_eq!(parsed.ids(), vec![1, 2]);
}

#[test]
fn missing_id_is_not_found() {
    let schedules = ChargeSchedules::new();
    assert!(matches!(
        schedules.schedule(5),
        Err(ZeChargeError::NotFound { .. })
    ));
}

#[test]
fn at_most_one_schedule_may_be_active() {
    let mut schedules = ChargeSchedules::new();
    schedules.new_schedule().activated = true;
    schedules.new_schedule();
    assert!(schedules.validate().is_ok());

    schedules.schedule_mut(2).unwrap().activated = true;
    let err = schedules.validate().unwrap_err();
    assert!(err.is_invalid_schedule());

    schedules.activate(2).unwrap();
    assert!(schedules.validate().is_ok());
    assert_eq!(schedules.active().and_then(|s| s.id), Some(2));
    assert!(schedules.activate(9).is_err());
}

#[test]
fn update_applies_only_supplied_days() {
    let mut schedules = ChargeSchedules::from_value(&week_payload()).unwrap();
    let edits = ScheduleEdits::from_day_values([
        (Day::Monday, Some("0715,60")),
        (Day::Tuesday, None),
    ])
    .unwrap();

    schedules.update(2, &edits, None).unwrap();
    let schedule = schedules.schedule(2).unwrap();
    assert_eq!(schedule.charge(Day::Monday).unwrap().start_time, "T07:15Z");
    assert_eq!(schedule.charge(Day::Monday).unwrap().duration, 60);
    assert!(schedule.get(Day::Tuesday).is_none());
}

#[test]
fn update_shifts_local_times_back_to_vehicle_time() {
    let mut schedules = ChargeSchedules::new();
    schedules.new_schedule();

    let edits = ScheduleEdits::new()
        .with(Day::Monday, DayEdit::new("T00:30Z", 60))
        .with(Day::Friday, DayEdit::new("T22:00Z", 30));
    schedules
        .update(1, &edits, Some(TimezoneOffset::from_hours_minutes(1, 0)))
        .unwrap();

    let schedule = schedules.schedule(1).unwrap();
    assert_eq!(schedule.charge(Day::Monday).unwrap().start_time, "T23:30Z");
    assert_eq!(schedule.charge(Day::Friday).unwrap().start_time, "T21:00Z");
    // Untouched days keep the default
    assert_eq!(schedule.charge(Day::Sunday).unwrap().start_time, "T12:00Z");
}

#[test]
fn update_rejects_bad_values_and_unknown_ids() {
    let mut schedules = ChargeSchedules::new();
    schedules.new_schedule();

    assert!(ScheduleEdits::from_day_values([(Day::Monday, Some("7am,60"))]).is_err());

    let edits = ScheduleEdits::new().with(Day::Monday, DayEdit::new("T12:00Z", 20));
    assert!(schedules.update(1, &edits, None).is_err());

    let edits = ScheduleEdits::new().with(Day::Monday, DayEdit::new("T12:00Z", 30));
    assert!(matches!(
        schedules.update(4, &edits, None),
        Err(ZeChargeError::NotFound { .. })
    ));
}

#[test]
fn oversized_edit_duration_is_rejected() {
    let mut schedules = ChargeSchedules::new();
    schedules.new_schedule();

    let edits =
        ScheduleEdits::from_day_values([(Day::Monday, Some("1200,9223372036854775800"))]).unwrap();
    let err = schedules.update(1, &edits, None).unwrap_err();
    assert!(err.is_invalid_schedule());
    assert!(schedules.validate().is_ok());
}

#[test]
fn repeated_ids_keep_the_last_and_fail_validation() {
    let payload = json!({
        "schedules": [
            {"id": 1, "activated": true, "monday": {"startTime": "T01:00Z", "duration": 15}},
            {"id": 1, "activated": true, "tuesday": {"startTime": "T02:00Z", "duration": 15}}
        ]
    });
    let schedules = ChargeSchedules::from_value(&payload).unwrap();
    assert_eq!(schedules.len(), 1);
    assert!(schedules.schedule(1).unwrap().get(Day::Tuesday).is_some());

    let err = schedules.validate().unwrap_err();
    assert!(err.is_invalid_schedule());
    assert!(err.to_string().contains("appear more than once"));
}

#[test]
fn settings_file_round_trip_keeps_mode() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let mut schedules = ChargeSchedules::from_value(&week_payload()).unwrap();
    schedules.activate(2).unwrap();

    std::fs::write(tmp.path(), schedules.to_settings_json().unwrap()).unwrap();
    let raw = std::fs::read_to_string(tmp.path()).unwrap();
    let loaded = ChargeSchedules::from_settings_json(&raw).unwrap();

    assert_eq!(loaded.mode.as_deref(), Some("scheduled"));
    assert_eq!(loaded, schedules);
    assert_eq!(loaded.active().and_then(|s| s.id), Some(2));
}

#[test]
fn settings_accept_a_whole_response_and_refuse_invalid_output() {
    let response = json!({"data": {"type": "Car", "attributes": week_payload()}});
    let mut schedules = ChargeSchedules::from_settings_json(&response.to_string()).unwrap();
    assert_eq!(schedules.ids(), vec![1, 2, 3]);

    schedules.schedule_mut(2).unwrap().activated = true;
    assert!(schedules.to_settings_json().is_err());
}
