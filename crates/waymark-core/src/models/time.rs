//! Time-of-day values attached to plan items.

use std::{fmt, str::FromStr};

use jiff::civil::Time;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A wall-clock time with minute precision, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(Time);

impl TimeOfDay {
    /// Creates a time from hour and minute.
    pub fn new(hour: i8, minute: i8) -> Result<Self, String> {
        Time::new(hour, minute, 0, 0)
            .map(Self)
            .map_err(|e| format!("invalid time {hour:02}:{minute:02}: {e}"))
    }

    pub fn hour(&self) -> i8 {
        self.0.hour()
    }

    pub fn minute(&self) -> i8 {
        self.0.minute()
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Accepts `HH:MM`, `H:MM` and the colon-less `HHMM` form older plan
    /// exports used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (hour, minute) = match s.split_once(':') {
            Some((hour, minute)) => (hour, minute),
            None if s.len() == 4 && s.is_ascii() => s.split_at(2),
            None if s.len() == 3 && s.is_ascii() => s.split_at(1),
            None => return Err(format!("invalid time '{s}', expected HH:MM")),
        };
        if minute.len() != 2 || hour.is_empty() || hour.len() > 2 {
            return Err(format!("invalid time '{s}', expected HH:MM"));
        }
        let hour = hour
            .parse::<i8>()
            .map_err(|_| format!("invalid hour in '{s}'"))?;
        let minute = minute
            .parse::<i8>()
            .map_err(|_| format!("invalid minute in '{s}'"))?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserializes an optional time where an empty string means "no time".
pub(crate) fn optional<'de, D>(deserializer: D) -> Result<Option<TimeOfDay>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
