use proptest::prelude::*;
use zecharge::schedule::time::{validate_duration, validate_start_time, wrap_minutes};
use zecharge::schedule::{MINUTES_IN_DAY, ScheduledCharge, deminuteize, minuteize, round_to_quarter_hour};

fn wire_time(hour: u32, quarter: u32) -> String {
    format!("T{:02}:{:02}Z", hour, quarter * 15)
}

#[test]
fn wire_times_map_to_minutes_of_day() {
    assert_eq!(minuteize("T00:00Z").unwrap(), 0);
    assert_eq!(minuteize("T07:45Z").unwrap(), 465);
    assert_eq!(minuteize("T23:45Z").unwrap(), 1425);
    assert_eq!(deminuteize(0), "T00:00Z");
    assert_eq!(deminuteize(465), "T07:45Z");
    assert_eq!(deminuteize(1439), "T23:59Z");
}

#[test]
fn malformed_wire_times_are_rejected() {
    assert!(minuteize("").is_err());
    assert!(minuteize("noon").is_err());
    for bad in ["T24:00Z", "T12:10Z", "12:00", "T12:00", "t12:00Z", "T1:00Z", "T12:00Z "] {
        assert!(validate_start_time(bad).is_err(), "{} accepted", bad);
    }
    let err = validate_start_time("T24:00Z").unwrap_err();
    assert!(err.is_invalid_schedule());
    assert!(err.to_string().contains("T24:00Z is not a valid start time"));
}

#[test]
fn durations_must_be_positive_quarters() {
    assert!(validate_duration(15).is_ok());
    assert!(validate_duration(2880).is_ok());
    for bad in [0, -15, 10, 16] {
        assert!(validate_duration(bad).is_err(), "{} accepted", bad);
    }
    assert!(
        validate_duration(10)
            .unwrap_err()
            .to_string()
            .contains("10 is not a valid duration")
    );
}

#[test]
fn wrap_keeps_negative_minutes_in_the_day() {
    assert_eq!(wrap_minutes(-60), 1380);
    assert_eq!(wrap_minutes(1440), 0);
    assert_eq!(wrap_minutes(1500), 60);
}

proptest! {
    #[test]
    fn grid_times_round_trip(hour in 0u32..24, quarter in 0u32..4) {
        let wire = wire_time(hour, quarter);
        prop_assert!(validate_start_time(&wire).is_ok());
        prop_assert_eq!(deminuteize(minuteize(&wire).unwrap()), wire);
    }

    #[test]
    fn minutes_round_trip(minutes in 0u32..MINUTES_IN_DAY) {
        prop_assert_eq!(minuteize(&deminuteize(minutes)).unwrap(), minutes);
    }

    #[test]
    fn rounding_floors_to_grid(v in -10_000i64..10_000) {
        let r = round_to_quarter_hour(v);
        prop_assert!(r <= v);
        prop_assert!(v - r < 15);
        prop_assert_eq!(r.rem_euclid(15), 0);
        prop_assert_eq!(round_to_quarter_hour(r), r);
    }

    #[test]
    fn finish_time_wraps_start_plus_duration(hour in 0u32..24, quarter in 0u32..4, quarters in 1i64..200) {
        let start = wire_time(hour, quarter);
        let duration = quarters * 15;
        let charge = ScheduledCharge::new(start.clone(), duration);
        let begin = i64::from(minuteize(&start).unwrap());

        prop_assert!(charge.validate().is_ok());
        prop_assert_eq!(
            i64::from(charge.finish_time_minutes().unwrap()),
            (begin + duration) % 1440
        );
        prop_assert_eq!(charge.spans_midnight().unwrap(), begin + duration >= 1440);
    }
}
