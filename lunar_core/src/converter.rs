//! # Calendar Conversion
//!
//! Converts between Gregorian dates and the Chinese lunisolar calendar over
//! 1900-01-31 (lunar 1900-01-01) to 2100-12-31.
//!
//! Both directions work on day offsets from the epoch: a solar date becomes
//! an offset, the offset is located in the year table, and the remainder is
//! walked through that year's months (leap month in its slot).
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use lunar_core::converter::{calculate, ConversionDirection, ConversionInput};
//! use lunar_core::festivals::LunarFestival;
//!
//! let input = ConversionInput {
//!     direction: ConversionDirection::SolarToLunar,
//!     year: 2024,
//!     month: 2,
//!     day: 10,
//!     is_leap_month: false,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.lunar.month, 1);
//! assert_eq!(result.lunar.day, 1);
//! assert_eq!(result.metadata.festival, Some(LunarFestival::SpringFestival));
//! assert_eq!(result.lunar_display, "甲辰年 正月初一");
//! ```

use serde::{Deserialize, Serialize};

use crate::dates::{LunarDate, SolarDate};
use crate::errors::{CalendarError, CalendarResult};
use crate::fmt;
use crate::metadata::{derive_metadata, DateMetadata};
use crate::table::{self, FIRST_YEAR, LAST_YEAR};

/// Convert a Gregorian date to its lunar date.
///
/// Fails with `OutOfRange` outside 1900-01-31..=2100-12-31.
pub fn solar_to_lunar(date: &SolarDate) -> CalendarResult<LunarDate> {
    let offset = date.epoch_offset()?;
    let record = table::record_for_offset(offset).ok_or_else(|| out_of_range(date))?;

    let mut remaining = offset - record.epoch_offset;
    for month in record.months() {
        if remaining < month.days {
            let lunar = LunarDate::new(record.year, month.number, remaining + 1, month.is_leap);
            tracing::debug!(solar = %date, lunar = %lunar, "converted solar to lunar");
            return Ok(lunar);
        }
        remaining -= month.days;
    }

    Err(out_of_range(date))
}

/// Convert a lunar date to its Gregorian date.
///
/// Fails with `InvalidLunarDate` when the date does not exist, and with
/// `OutOfRange` when it exists but falls after 2100-12-31.
pub fn lunar_to_solar(date: &LunarDate) -> CalendarResult<SolarDate> {
    let record = table::year_record(date.year).ok_or_else(|| {
        CalendarError::invalid_lunar_date(
            "year",
            date.year.to_string(),
            format!("Lunar year must be between {} and {}", FIRST_YEAR, LAST_YEAR),
        )
    })?;

    if !(1..=12).contains(&date.month) {
        return Err(CalendarError::invalid_lunar_date(
            "month",
            date.month.to_string(),
            "Lunar month must be between 1 and 12",
        ));
    }

    let (index, days) = record
        .month_slot(date.month, date.is_leap_month)
        .ok_or_else(|| {
            let reason = match record.leap_month {
                Some(leap) => format!("Lunar year {} has leap month {}, not {}", date.year, leap, date.month),
                None => format!("Lunar year {} has no leap month", date.year),
            };
            CalendarError::invalid_lunar_date("is_leap_month", date.to_string(), reason)
        })?;

    if date.day == 0 || date.day > days {
        return Err(CalendarError::invalid_lunar_date(
            "day",
            date.day.to_string(),
            format!("Day must be between 1 and {} in this month", days),
        ));
    }

    let solar = SolarDate::from_epoch_offset(record.month_offset(index) + date.day - 1)?;
    if !solar.is_supported() {
        return Err(out_of_range(&solar));
    }

    tracing::debug!(lunar = %date, solar = %solar, "converted lunar to solar");
    Ok(solar)
}

fn out_of_range(date: &SolarDate) -> CalendarError {
    CalendarError::out_of_range(
        date.to_string(),
        SolarDate::EPOCH.to_string(),
        SolarDate::LAST_SUPPORTED.to_string(),
    )
}

/// One month of a lunar year with its Gregorian start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthInfo {
    pub number: u32,
    pub is_leap: bool,
    pub days: u32,
    pub start: SolarDate,
}

/// Month layout of a lunar year, in calendar order.
pub fn months_of(year: i32) -> CalendarResult<Vec<MonthInfo>> {
    let record = table::year_record(year).ok_or_else(|| {
        CalendarError::invalid_lunar_date(
            "year",
            year.to_string(),
            format!("Lunar year must be between {} and {}", FIRST_YEAR, LAST_YEAR),
        )
    })?;

    record
        .months()
        .enumerate()
        .map(|(idx, month)| {
            Ok(MonthInfo {
                number: month.number,
                is_leap: month.is_leap,
                days: month.days,
                start: SolarDate::from_epoch_offset(record.month_offset(idx))?,
            })
        })
        .collect()
}

// ============================================================================
// Calculation interface
// ============================================================================

/// Which calendar the input date is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionDirection {
    SolarToLunar,
    LunarToSolar,
}

/// Input for a single conversion.
///
/// ## JSON Example
///
/// ```json
/// {
///   "direction": "LunarToSolar",
///   "year": 2023,
///   "month": 2,
///   "day": 1,
///   "is_leap_month": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionInput {
    pub direction: ConversionDirection,

    pub year: i32,

    /// 1-12
    pub month: u32,

    pub day: u32,

    /// Only read for lunar input
    #[serde(default)]
    pub is_leap_month: bool,
}

impl ConversionInput {
    /// Validate input parameters.
    ///
    /// Malformed lunar fields are reported as `InvalidLunarDate`, the same
    /// error [`lunar_to_solar`] gives for them.
    pub fn validate(&self) -> CalendarResult<()> {
        let error = |field: &str, value: u32, reason: &str| match self.direction {
            ConversionDirection::SolarToLunar => {
                CalendarError::invalid_input(field, value.to_string(), reason)
            }
            ConversionDirection::LunarToSolar => {
                CalendarError::invalid_lunar_date(field, value.to_string(), reason)
            }
        };
        if !(1..=12).contains(&self.month) {
            return Err(error("month", self.month, "Month must be between 1 and 12"));
        }
        if self.day == 0 {
            return Err(error("day", self.day, "Day must be positive"));
        }
        Ok(())
    }
}

/// Both sides of a conversion plus the date's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub metadata: DateMetadata,

    /// Traditional rendering, e.g. `甲辰年 正月初一`
    pub lunar_display: String,
}

/// Run a conversion in either direction and derive the metadata.
pub fn calculate(input: &ConversionInput) -> CalendarResult<ConversionResult> {
    input.validate()?;

    let (solar, lunar) = match input.direction {
        ConversionDirection::SolarToLunar => {
            let solar = SolarDate::new(input.year, input.month, input.day)?;
            (solar, solar_to_lunar(&solar)?)
        }
        ConversionDirection::LunarToSolar => {
            let lunar = LunarDate::new(input.year, input.month, input.day, input.is_leap_month);
            (lunar_to_solar(&lunar)?, lunar)
        }
    };

    Ok(ConversionResult {
        solar,
        lunar,
        metadata: derive_metadata(&solar, &lunar),
        lunar_display: fmt::lunar_date(&lunar),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::festivals::LunarFestival;
    use crate::ganzhi::Zodiac;

    fn solar(y: i32, m: u32, d: u32) -> SolarDate {
        SolarDate::new(y, m, d).unwrap()
    }

    fn to_lunar(y: i32, m: u32, d: u32) -> LunarDate {
        solar_to_lunar(&solar(y, m, d)).unwrap()
    }

    #[test]
    fn test_known_conversions() {
        assert_eq!(to_lunar(2024, 2, 10), LunarDate::new(2024, 1, 1, false));
        assert_eq!(to_lunar(2024, 9, 17), LunarDate::new(2024, 8, 15, false));
        assert_eq!(to_lunar(2000, 1, 1), LunarDate::new(1999, 11, 25, false));
        assert_eq!(to_lunar(2025, 1, 29), LunarDate::new(2025, 1, 1, false));
        assert_eq!(to_lunar(2024, 2, 9), LunarDate::new(2023, 12, 30, false));
    }

    #[test]
    fn test_leap_months() {
        assert_eq!(to_lunar(2017, 7, 23), LunarDate::new(2017, 6, 1, true));
        assert_eq!(to_lunar(2023, 3, 22), LunarDate::new(2023, 2, 1, true));
        assert_eq!(to_lunar(2020, 5, 23), LunarDate::new(2020, 4, 1, true));
        assert_eq!(to_lunar(2025, 7, 25), LunarDate::new(2025, 6, 1, true));
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(solar_to_lunar(&SolarDate::EPOCH), Ok(LunarDate::new(1900, 1, 1, false)));
        assert_eq!(to_lunar(2100, 12, 31), LunarDate::new(2100, 12, 1, false));

        let err = solar_to_lunar(&solar(1900, 1, 30)).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        let err = solar_to_lunar(&solar(2101, 1, 1)).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_lunar_to_solar() {
        assert_eq!(lunar_to_solar(&LunarDate::new(2024, 1, 1, false)), Ok(solar(2024, 2, 10)));
        assert_eq!(lunar_to_solar(&LunarDate::new(2017, 6, 1, true)), Ok(solar(2017, 7, 23)));
        assert_eq!(lunar_to_solar(&LunarDate::new(2017, 6, 1, false)), Ok(solar(2017, 6, 24)));
    }

    #[test]
    fn test_invalid_leap_month() {
        // 2024 has no leap month
        let err = lunar_to_solar(&LunarDate::new(2024, 4, 1, true)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LUNAR_DATE");
        // 2023's leap month is the second
        let err = lunar_to_solar(&LunarDate::new(2023, 4, 1, true)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LUNAR_DATE");
    }

    #[test]
    fn test_invalid_lunar_fields() {
        for date in [
            LunarDate::new(1899, 1, 1, false),
            LunarDate::new(2101, 1, 1, false),
            LunarDate::new(2024, 0, 1, false),
            LunarDate::new(2024, 13, 1, false),
            LunarDate::new(2024, 1, 0, false),
            LunarDate::new(2024, 1, 31, false),
        ] {
            let err = lunar_to_solar(&date).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_LUNAR_DATE", "{date}");
        }

        // Twelfth month of 2024 has 29 days
        assert_eq!(table::month_days(2024, 12, false), Some(29));
        assert!(lunar_to_solar(&LunarDate::new(2024, 12, 30, false)).is_err());
    }

    #[test]
    fn test_tail_of_2100_is_out_of_range() {
        assert_eq!(lunar_to_solar(&LunarDate::new(2100, 12, 1, false)), Ok(SolarDate::LAST_SUPPORTED));
        let err = lunar_to_solar(&LunarDate::new(2100, 12, 2, false)).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_months_of() {
        let months = months_of(2023).unwrap();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0].start, solar(2023, 1, 22));
        assert!(months[2].is_leap);
        assert_eq!(months[2].number, 2);
        assert_eq!(months[2].start, solar(2023, 3, 22));
        assert!(months_of(2101).is_err());
    }

    #[test]
    fn test_calculate_both_directions() {
        let result = calculate(&ConversionInput {
            direction: ConversionDirection::SolarToLunar,
            year: 2024,
            month: 9,
            day: 17,
            is_leap_month: false,
        })
        .unwrap();
        assert_eq!(result.lunar, LunarDate::new(2024, 8, 15, false));
        assert_eq!(result.metadata.festival, Some(LunarFestival::MidAutumn));
        assert_eq!(result.metadata.zodiac, Zodiac::Dragon);
        assert_eq!(result.lunar_display, "甲辰年 八月十五");

        let result = calculate(&ConversionInput {
            direction: ConversionDirection::LunarToSolar,
            year: 2023,
            month: 2,
            day: 1,
            is_leap_month: true,
        })
        .unwrap();
        assert_eq!(result.solar, solar(2023, 3, 22));
        assert_eq!(result.metadata.festival, None);
        assert_eq!(result.lunar_display, "癸卯年 闰二月初一");
    }

    #[test]
    fn test_calculate_rejects_bad_input() {
        let input = ConversionInput {
            direction: ConversionDirection::SolarToLunar,
            year: 2023,
            month: 2,
            day: 29,
            is_leap_month: false,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let input = ConversionInput { month: 13, ..input };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_calculate_malformed_lunar_input() {
        let input = ConversionInput {
            direction: ConversionDirection::LunarToSolar,
            year: 2024,
            month: 13,
            day: 1,
            is_leap_month: false,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_LUNAR_DATE");

        for (month, day) in [(0, 1), (1, 0), (1, 31)] {
            let input = ConversionInput { month, day, ..input.clone() };
            let via_calculate = calculate(&input).unwrap_err();
            let via_convert = lunar_to_solar(&LunarDate::new(2024, month, day, false)).unwrap_err();
            assert_eq!(via_calculate.error_code(), "INVALID_LUNAR_DATE", "{month}-{day}");
            assert_eq!(via_calculate.error_code(), via_convert.error_code());
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let json = r#"{"direction":"LunarToSolar","year":2017,"month":6,"day":1,"is_leap_month":true}"#;
        let input: ConversionInput = serde_json::from_str(json).unwrap();
        let result = calculate(&input).unwrap();

        let text = serde_json::to_string(&result).unwrap();
        let back: ConversionResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }
}
