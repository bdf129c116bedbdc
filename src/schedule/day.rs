use crate::error::{Result, ZeChargeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week, in the order the vehicle API lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// All seven days, Monday first
pub const DAYS: [Day; 7] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
    Day::Sunday,
];

impl Day {
    /// Position in [`DAYS`] (Monday = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// The following day; Sunday wraps to Monday
    pub fn next(self) -> Day {
        DAYS[(self.index() + 1) % DAYS.len()]
    }

    /// Canonical lowercase name used as the wire key
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    /// Capitalised name for display
    pub fn title(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        DAYS[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ZeChargeError;

    fn from_str(s: &str) -> Result<Self> {
        DAYS.iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ZeChargeError::invalid_argument(format!("{} is not a valid day", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_sunday_to_monday() {
        assert_eq!(Day::Monday.next(), Day::Tuesday);
        assert_eq!(Day::Saturday.next(), Day::Sunday);
        assert_eq!(Day::Sunday.next(), Day::Monday);
    }

    #[test]
    fn parses_only_canonical_names() {
        assert_eq!("friday".parse::<Day>().unwrap(), Day::Friday);
        let err = "florsday".parse::<Day>().unwrap_err();
        assert!(err.to_string().contains("not a valid day"));
        assert!("Friday".parse::<Day>().is_err());
    }

    #[test]
    fn converts_chrono_weekday() {
        assert_eq!(Day::from(chrono::Weekday::Mon), Day::Monday);
        assert_eq!(Day::from(chrono::Weekday::Sun), Day::Sunday);
    }
}
