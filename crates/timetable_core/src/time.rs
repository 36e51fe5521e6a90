//! Time-of-day utilities.
//!
//! # Responsibility
//! - Convert `HH:MM` (24-hour) text to minutes since midnight and back.
//! - Provide the `TimeOfDay` value type used by slots and layout.
//!
//! # Invariants
//! - A `TimeOfDay` always holds `0 <= minutes < 1440`.
//! - Malformed text is rejected with `TimeError::InvalidTimeFormat`; it never
//!   produces a silently wrong minute value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Minutes in one day. Valid minute values are strictly below this bound.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid time regex"));

/// Errors produced by time parsing and formatting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Input is not a well-formed `HH:MM` value.
    #[error("invalid time format `{0}`; expected HH:MM (00:00-23:59)")]
    InvalidTimeFormat(String),
    /// Minute value outside `0..1440`.
    #[error("minutes out of range: {0}; expected 0..1440")]
    OutOfRange(u32),
}

/// Parses `HH:MM` into minutes since midnight.
///
/// Accepts one or two hour digits and exactly two minute digits.
pub fn parse_time(text: &str) -> Result<u16, TimeError> {
    let invalid = || TimeError::InvalidTimeFormat(text.to_string());
    let caps = TIME_RE.captures(text).ok_or_else(invalid)?;
    let hours: u16 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: u16 = caps[2].parse().map_err(|_| invalid())?;
    if hours >= 24 || minutes >= 60 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as zero-padded `HH:MM`.
pub fn format_minutes(minutes: u32) -> Result<String, TimeError> {
    if minutes >= u32::from(MINUTES_PER_DAY) {
        return Err(TimeError::OutOfRange(minutes));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// A validated time of day, stored as minutes since midnight.
///
/// Serialized as `HH:MM` text so persisted and exported documents keep the
/// human-readable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a value from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeError> {
        if minutes >= u32::from(MINUTES_PER_DAY) {
            return Err(TimeError::OutOfRange(minutes));
        }
        Ok(Self(minutes as u16))
    }

    /// Builds a value from whole hour and minute parts.
    pub fn from_hm(hours: u8, minutes: u8) -> Result<Self, TimeError> {
        Self::from_minutes(u32::from(hours) * 60 + u32::from(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s).map(Self)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_minutes, parse_time, TimeError, TimeOfDay};

    #[test]
    fn parses_reference_values() {
        assert_eq!(parse_time("09:00"), Ok(540));
        assert_eq!(parse_time("00:00"), Ok(0));
        assert_eq!(parse_time("23:59"), Ok(1439));
        assert_eq!(parse_time("9:05"), Ok(545));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "9", "09:0", "0900", "ab:cd", "24:00", "12:60", " 09:00", "09:00:00"] {
            assert!(
                matches!(parse_time(text), Err(TimeError::InvalidTimeFormat(_))),
                "`{text}` should be rejected"
            );
        }
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_minutes(540).as_deref(), Ok("09:00"));
        assert_eq!(format_minutes(5).as_deref(), Ok("00:05"));
        assert_eq!(format_minutes(1440), Err(TimeError::OutOfRange(1440)));
    }

    #[test]
    fn time_of_day_displays_like_format_minutes() {
        let value: TimeOfDay = "07:30".parse().expect("valid time");
        assert_eq!(value.minutes(), 450);
        assert_eq!(value.to_string(), "07:30");
        assert!(TimeOfDay::from_hm(24, 0).is_err());
    }
}
