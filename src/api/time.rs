//! Wall-clock and calendar helpers for schedule fields

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A wall-clock time of day at minute precision, exchanged as `"HH:MM"`.
///
/// Values past `24:00` are representable because the timeline's range runs one
/// hour past its last labelled hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    pub fn from_hm(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    /// Minutes since midnight
    pub fn minutes(self) -> i32 {
        self.0 as i32
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    /// Accepts `H:MM`, `HH:MM` and `HH:MM:SS`; seconds are truncated.
    /// `24:00` is the only accepted hour past 23 and means end of day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ValidationError::BadClock(s.to_string());
        let mut parts = s.trim().split(':');
        let hour: u16 = parts.next().and_then(|h| h.parse().ok()).ok_or_else(bad)?;
        let minute: u16 = parts.next().and_then(|m| m.parse().ok()).ok_or_else(bad)?;
        if let Some(sec) = parts.next() {
            sec.parse::<u16>().map_err(|_| bad())?;
        }
        if parts.next().is_some() || minute > 59 || hour > 24 || (hour == 24 && minute > 0) {
            return Err(bad());
        }
        Ok(Self::from_hm(hour, minute))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::BadDate(input.to_string()))
}

/// "Tue Dec 9" style heading for the day view
pub fn format_day_heading(date: NaiveDate) -> String {
    date.format("%a %b %-d").to_string()
}

/// "12/8 - 12/14" style range for the week view
pub fn format_week_range(monday: NaiveDate) -> String {
    let sunday = monday + chrono::Duration::days(6);
    format!(
        "{}/{} - {}/{}",
        monday.month(),
        monday.day(),
        sunday.month(),
        sunday.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_truncates_seconds() {
        let t: ClockTime = "09:05:59".parse().unwrap();
        assert_eq!(t.to_string(), "09:05");
        assert_eq!(t.minutes(), 545);
        assert_eq!("7:30".parse::<ClockTime>().unwrap().to_string(), "07:30");
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<ClockTime>().is_err());
        assert!("9".parse::<ClockTime>().is_err());
        assert!("09:60".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
        assert!("09:00:00:00".parse::<ClockTime>().is_err());
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("24:30".parse::<ClockTime>().is_err());
        assert!("47:30".parse::<ClockTime>().is_err());
    }

    #[test]
    fn midnight_end_of_day_is_allowed() {
        let end: ClockTime = "24:00".parse().unwrap();
        assert_eq!(end.minutes(), 24 * 60);
        assert_eq!(end.to_string(), "24:00");
    }

    #[test]
    fn ordering_matches_zero_padded_strings() {
        let a: ClockTime = "09:00".parse().unwrap();
        let b: ClockTime = "10:30".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn serde_uses_hh_mm() {
        let t = ClockTime::from_hm(14, 15);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"14:15\"");
        let back: ClockTime = serde_json::from_str("\"14:15:00\"").unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn formats_headings() {
        let d = parse_date("2025-12-09").unwrap();
        assert_eq!(format_day_heading(d), "Tue Dec 9");
        let monday = parse_date("2025-12-08").unwrap();
        assert_eq!(format_week_range(monday), "12/8 - 12/14");
        assert!(parse_date("2025-13-01").is_err());
    }
}
