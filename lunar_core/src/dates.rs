//! # Date Types
//!
//! Value types for both calendars. Both serialize as plain
//! `{year, month, day}` JSON objects; conversion lives in
//! [`converter`](crate::converter).
//!
//! A [`SolarDate`] is always a real Gregorian date: construction and
//! deserialization validate it. A [`LunarDate`] is only a record; whether it
//! exists is decided against the year table by
//! [`lunar_to_solar`](crate::converter::lunar_to_solar).
//!
//! ## Example
//!
//! ```rust
//! use lunar_core::dates::{LunarDate, SolarDate};
//!
//! let solar: SolarDate = "2024-02-10".parse().unwrap();
//! assert_eq!(solar.to_string(), "2024-02-10");
//! assert_eq!(solar.month(), 2);
//!
//! let lunar = LunarDate::new(2023, 2, 1, true);
//! assert_eq!(lunar.to_string(), "2023-L02-01");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, CalendarResult};

/// `NaiveDate::num_days_from_ce` of the epoch, 1900-01-31
const EPOCH_DAYS_FROM_CE: i32 = 693_626;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid constant date"),
    }
}

/// A valid Gregorian calendar date.
///
/// ## JSON Example
///
/// ```json
/// { "year": 2024, "month": 2, "day": 10 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "SolarFields", into = "SolarFields")]
pub struct SolarDate(NaiveDate);

/// Wire form of [`SolarDate`]; deserializing goes through [`SolarDate::new`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    /// First supported date, lunar 1900-01-01
    pub const EPOCH: SolarDate = SolarDate(ymd(1900, 1, 31));

    /// Last supported date
    pub const LAST_SUPPORTED: SolarDate = SolarDate(ymd(2100, 12, 31));

    /// Create a validated Gregorian date.
    ///
    /// Fails with `InvalidInput` for impossible dates such as February 30.
    pub fn new(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(SolarDate)
            .ok_or_else(|| {
                CalendarError::invalid_input(
                    "date",
                    format!("{:04}-{:02}-{:02}", year, month, day),
                    "Not a valid Gregorian date",
                )
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The underlying chrono date.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// True if the date is inside the conversion window.
    pub fn is_supported(&self) -> bool {
        (Self::EPOCH..=Self::LAST_SUPPORTED).contains(self)
    }

    /// Signed days from the epoch (1900-01-31); negative before it.
    pub fn days_from_epoch(&self) -> i64 {
        (self.0.num_days_from_ce() - EPOCH_DAYS_FROM_CE) as i64
    }

    /// Days since the epoch, for dates inside the conversion window.
    ///
    /// Fails with `OutOfRange` outside it.
    pub fn epoch_offset(&self) -> CalendarResult<u32> {
        if !self.is_supported() {
            return Err(CalendarError::out_of_range(
                self.to_string(),
                Self::EPOCH.to_string(),
                Self::LAST_SUPPORTED.to_string(),
            ));
        }
        Ok(self.days_from_epoch() as u32)
    }

    /// Inverse of [`SolarDate::epoch_offset`], without the range check.
    pub fn from_epoch_offset(offset: u32) -> CalendarResult<Self> {
        i32::try_from(offset)
            .ok()
            .and_then(|days| days.checked_add(EPOCH_DAYS_FROM_CE))
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(SolarDate)
            .ok_or_else(|| {
                CalendarError::invalid_input("offset", offset.to_string(), "Offset overflows the calendar")
            })
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for SolarDate {
    type Err = CalendarError;

    /// Parse an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(SolarDate)
            .map_err(|e| CalendarError::invalid_input("date", s, e.to_string()))
    }
}

impl From<NaiveDate> for SolarDate {
    fn from(date: NaiveDate) -> Self {
        SolarDate(date)
    }
}

impl TryFrom<SolarFields> for SolarDate {
    type Error = CalendarError;

    fn try_from(fields: SolarFields) -> Result<Self, Self::Error> {
        SolarDate::new(fields.year, fields.month, fields.day)
    }
}

impl From<SolarDate> for SolarFields {
    fn from(date: SolarDate) -> Self {
        SolarFields {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// A date in the Chinese lunisolar calendar.
///
/// `year` is the lunar year, named after the Gregorian year in which it
/// begins. A leap month repeats the number of the month before it.
///
/// ## JSON Example
///
/// ```json
/// { "year": 2023, "month": 2, "day": 1, "is_leap_month": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,

    /// 1-12
    pub month: u32,

    /// 1-30
    pub day: u32,

    #[serde(default)]
    pub is_leap_month: bool,
}

impl LunarDate {
    /// Create a lunar date. Not validated; see
    /// [`lunar_to_solar`](crate::converter::lunar_to_solar).
    pub fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> Self {
        LunarDate {
            year,
            month,
            day,
            is_leap_month,
        }
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { "L" } else { "" };
        write!(f, "{:04}-{}{:02}-{:02}", self.year, leap, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let date: SolarDate = "2024-09-17".parse().unwrap();
        assert_eq!(date, SolarDate::new(2024, 9, 17).unwrap());
        assert_eq!(date.to_string(), "2024-09-17");
        assert!("2024-02-30".parse::<SolarDate>().is_err());
        assert!("not a date".parse::<SolarDate>().is_err());
    }

    #[test]
    fn test_invalid_gregorian() {
        let err = SolarDate::new(2023, 2, 29).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(SolarDate::new(2024, 2, 29).is_ok());
        assert!(SolarDate::new(2024, 13, 1).is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = SolarDate::new(2023, 12, 31).unwrap();
        let b = SolarDate::new(2024, 1, 1).unwrap();
        assert!(a < b);
        assert!(SolarDate::EPOCH < SolarDate::LAST_SUPPORTED);
    }

    #[test]
    fn test_epoch_offset() {
        assert_eq!(SolarDate::EPOCH.epoch_offset(), Ok(0));
        assert_eq!(SolarDate::new(1900, 2, 1).unwrap().epoch_offset(), Ok(1));
        assert_eq!(SolarDate::LAST_SUPPORTED.epoch_offset(), Ok(73_383));
        assert_eq!(SolarDate::from_epoch_offset(73_383), Ok(SolarDate::LAST_SUPPORTED));
        assert_eq!(SolarDate::new(1900, 1, 1).unwrap().days_from_epoch(), -30);
    }

    #[test]
    fn test_out_of_range() {
        let before = SolarDate::new(1900, 1, 30).unwrap();
        let after = SolarDate::new(2101, 1, 1).unwrap();
        assert_eq!(before.epoch_offset().unwrap_err().error_code(), "OUT_OF_RANGE");
        assert_eq!(after.epoch_offset().unwrap_err().error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_weekday() {
        // 2000-01-01 was a Saturday
        assert_eq!(SolarDate::new(2000, 1, 1).unwrap().weekday(), Weekday::Sat);
    }

    #[test]
    fn test_lunar_display() {
        assert_eq!(LunarDate::new(2024, 8, 15, false).to_string(), "2024-08-15");
        assert_eq!(LunarDate::new(2017, 6, 1, true).to_string(), "2017-L06-01");
    }

    #[test]
    fn test_serialization() {
        let json = r#"{"year":2024,"month":1,"day":1}"#;
        let lunar: LunarDate = serde_json::from_str(json).unwrap();
        assert!(!lunar.is_leap_month);

        let solar = SolarDate::new(2024, 2, 10).unwrap();
        let text = serde_json::to_string(&solar).unwrap();
        assert_eq!(text, r#"{"year":2024,"month":2,"day":10}"#);
        let roundtrip: SolarDate = serde_json::from_str(&text).unwrap();
        assert_eq!(solar, roundtrip);
    }

    #[test]
    fn test_deserialize_rejects_impossible_date() {
        let json = r#"{"year":2023,"month":2,"day":29}"#;
        assert!(serde_json::from_str::<SolarDate>(json).is_err());
    }
}
