//! Text rendering of charge schedules
//!
//! Produces the per-schedule day tables shown to end users. Times are shown
//! in the user's zone when an offset is supplied and as raw vehicle times
//! otherwise.

use crate::error::Result;
use crate::schedule::time::minuteize;
use crate::schedule::{ChargeSchedule, ChargeSchedules, ScheduledCharge};
use crate::timezone::{TimezoneOffset, apply_offset};

const HEADERS: [&str; 4] = ["Day", "Start time", "End time", "Duration"];

/// Render minutes as `H:MM:SS`, with a leading day count past 24 hours
pub fn format_duration_minutes(minutes: i64) -> String {
    let days = minutes.div_euclid(1440);
    let rest = minutes.rem_euclid(1440);
    let clock = format!("{}:{:02}:00", rest / 60, rest % 60);
    match days {
        0 => clock,
        1 | -1 => format!("{} day, {}", days, clock),
        _ => format!("{} days, {}", days, clock),
    }
}

/// Render a wire time as `HH:MM`
pub fn format_wire_time(wire: &str) -> Result<String> {
    let minutes = minuteize(wire)?;
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Start, end and duration columns for one charge.
///
/// The end carries a trailing `+` when the charge runs past midnight in the
/// zone it is shown in.
pub fn format_scheduled_charge(
    charge: &ScheduledCharge,
    offset: Option<TimezoneOffset>,
) -> Result<[String; 3]> {
    let finish = charge.finish_time()?;
    let (start, finish) = match offset {
        Some(offset) => (
            apply_offset(&charge.start_time, offset)?,
            apply_offset(&finish, offset)?,
        ),
        None => (charge.start_time.clone(), finish),
    };
    let shift = offset.map_or(0, TimezoneOffset::total_minutes);
    let marker = if charge.spans_midnight_in(shift)? { "+" } else { "" };

    Ok([
        format_wire_time(&start)?,
        format!("{}{}", format_wire_time(&finish)?, marker),
        format_duration_minutes(charge.duration),
    ])
}

/// One row per scheduled day: day, start, end, duration
pub fn format_schedule(
    schedule: &ChargeSchedule,
    offset: Option<TimezoneOffset>,
) -> Result<Vec<[String; 4]>> {
    schedule
        .iter()
        .map(|(day, charge)| {
            let [start, end, duration] = format_scheduled_charge(charge, offset)?;
            Ok([day.title().to_string(), start, end, duration])
        })
        .collect()
}

/// Lay out rows under `headers`, columns two spaces apart
pub fn render_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> Vec<String> {
    let mut widths: [usize; N] = [0; N];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = header.chars().count() + 2;
        for row in rows {
            widths[i] = widths[i].max(row[i].chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers.to_vec()));
    lines.push(line(rules.iter().map(String::as_str).collect()));
    for row in rows {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Full report: every schedule with its id, activation and day table
pub fn render_schedules(
    schedules: &ChargeSchedules,
    offset: Option<TimezoneOffset>,
) -> Result<String> {
    let mut lines = Vec::new();
    for (id, schedule) in schedules.iter() {
        let active = if schedule.activated { " [Active]" } else { "" };
        lines.push(format!("Schedule ID: {}{}", id, active));
        lines.extend(render_table(HEADERS, &format_schedule(schedule, offset)?));
        lines.push(String::new());
    }
    if offset.is_none() {
        lines.push("All times are UTC.".to_string());
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration_minutes(15), "0:15:00");
        assert_eq!(format_duration_minutes(60), "1:00:00");
        assert_eq!(format_duration_minutes(420), "7:00:00");
        assert_eq!(format_duration_minutes(1500), "1 day, 1:00:00");
        assert_eq!(format_duration_minutes(2880), "2 days, 0:00:00");
    }

    #[test]
    fn test_format_wire_time() {
        assert_eq!(format_wire_time("T07:45Z").unwrap(), "07:45");
        assert!(format_wire_time("bogus").is_err());
    }

    #[test]
    fn test_render_table_widths() {
        let rows = [["Thursday".to_string(), "1".to_string()]];
        let lines = render_table(["Day", "N"], &rows);
        assert_eq!(lines, vec!["Day       N", "--------  ---", "Thursday  1"]);
    }
}
