//! # Lunar Year Table
//!
//! Month lengths and leap months of every lunar year from 1900 to 2100.
//!
//! ## Packed Format
//!
//! Each year is one `u32` in [`LUNAR_YEAR_DATA`]:
//!
//! - bits 0-3: number of the leap month, or 0 when the year has none
//! - bits 4-15: one flag per common month, month 1 in bit 15 down to month 12
//!   in bit 4; set means a big month (30 days), clear a small one (29 days)
//! - bit 16: size flag of the leap month
//!
//! The table is decoded once into [`LunarYearRecord`]s, which also carry each
//! year's running day offset from the epoch (1900-01-31, the first day of
//! lunar year 1900).
//!
//! ## Example
//!
//! ```rust
//! use lunar_core::table;
//!
//! let year = table::year_record(2023).unwrap();
//! assert_eq!(year.leap_month, Some(2));
//! assert_eq!(year.months().count(), 13);
//! assert_eq!(table::month_days(2023, 2, true), Some(29));
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// First lunar year in the table
pub const FIRST_YEAR: i32 = 1900;

/// Last lunar year in the table
pub const LAST_YEAR: i32 = 2100;

const BIG_MONTH: u32 = 30;
const SMALL_MONTH: u32 = 29;

/// Packed month data for lunar years 1900..=2100, see the module docs.
#[allow(clippy::unreadable_literal)]
pub const LUNAR_YEAR_DATA: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

/// One month of a lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarMonth {
    /// Month number 1-12 (a leap month repeats the number of the month before it)
    pub number: u32,

    /// True for the intercalary month
    pub is_leap: bool,

    /// 29 or 30
    pub days: u32,
}

/// Decoded month layout of a single lunar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarYearRecord {
    /// Lunar year (named after the Gregorian year in which it starts)
    pub year: i32,

    /// Number of the leap month, if the year has one
    pub leap_month: Option<u32>,

    /// Month lengths in calendar order, leap month in its slot
    month_days: [u8; 13],

    /// 12 or 13
    month_count: u8,

    /// Sum of all month lengths
    pub total_days: u32,

    /// Days from the epoch to the first day of this year
    pub epoch_offset: u32,
}

impl LunarYearRecord {
    fn decode(year: i32, packed: u32, epoch_offset: u32) -> Self {
        let leap = packed & 0xf;
        let leap_month = (leap != 0).then_some(leap);

        let mut month_days = [0u8; 13];
        let mut count = 0;
        for number in 1..=12u32 {
            month_days[count] = month_length(packed & (0x10000 >> number) != 0) as u8;
            count += 1;
            if leap_month == Some(number) {
                month_days[count] = month_length(packed & 0x10000 != 0) as u8;
                count += 1;
            }
        }

        let total_days = month_days[..count].iter().map(|&d| d as u32).sum();

        LunarYearRecord {
            year,
            leap_month,
            month_days,
            month_count: count as u8,
            total_days,
            epoch_offset,
        }
    }

    /// Iterate the months of the year in calendar order.
    pub fn months(&self) -> impl Iterator<Item = LunarMonth> + '_ {
        let mut number = 0;
        self.month_days[..self.month_count as usize]
            .iter()
            .enumerate()
            .map(move |(idx, &days)| {
                let is_leap = self.is_leap_slot(idx);
                if !is_leap {
                    number += 1;
                }
                LunarMonth {
                    number,
                    is_leap,
                    days: days as u32,
                }
            })
    }

    /// Position of a month in calendar order, or `None` if the year has no such month.
    pub fn month_index(&self, month: u32, is_leap: bool) -> Option<usize> {
        if !(1..=12).contains(&month) {
            return None;
        }
        match (is_leap, self.leap_month) {
            (false, Some(leap)) if month > leap => Some(month as usize),
            (false, _) => Some(month as usize - 1),
            (true, Some(leap)) if leap == month => Some(month as usize),
            (true, _) => None,
        }
    }

    /// Length of a month, or `None` if the year has no such month.
    pub fn month_days(&self, month: u32, is_leap: bool) -> Option<u32> {
        self.month_slot(month, is_leap).map(|(_, days)| days)
    }

    /// Calendar-order position and length of a month in one lookup.
    pub fn month_slot(&self, month: u32, is_leap: bool) -> Option<(usize, u32)> {
        let idx = self.month_index(month, is_leap)?;
        let days = *self.month_days[..self.month_count as usize].get(idx)?;
        Some((idx, days as u32))
    }

    /// Length of the leap month, if any.
    pub fn leap_month_days(&self) -> Option<u32> {
        self.leap_month.and_then(|m| self.month_days(m, true))
    }

    /// Days from the epoch to the first day of the month at `index`.
    pub fn month_offset(&self, index: usize) -> u32 {
        self.epoch_offset
            + self.month_days[..index]
                .iter()
                .map(|&d| d as u32)
                .sum::<u32>()
    }

    /// Number of months in the year (12, or 13 with a leap month).
    pub fn month_count(&self) -> usize {
        self.month_count as usize
    }

    /// True if `offset` (days from the epoch) falls inside this year.
    pub fn contains_offset(&self, offset: u32) -> bool {
        (self.epoch_offset..self.epoch_offset + self.total_days).contains(&offset)
    }

    fn is_leap_slot(&self, idx: usize) -> bool {
        self.leap_month.is_some_and(|leap| idx == leap as usize)
    }
}

fn month_length(big: bool) -> u32 {
    if big {
        BIG_MONTH
    } else {
        SMALL_MONTH
    }
}

static YEAR_TABLE: Lazy<Vec<LunarYearRecord>> = Lazy::new(|| {
    let mut offset = 0;
    let records: Vec<LunarYearRecord> = (FIRST_YEAR..)
        .zip(LUNAR_YEAR_DATA.iter())
        .map(|(year, &packed)| {
            let record = LunarYearRecord::decode(year, packed, offset);
            offset += record.total_days;
            record
        })
        .collect();
    tracing::trace!(years = records.len(), total_days = offset, "decoded lunar year table");
    records
});

/// All decoded year records, 1900 first.
pub fn records() -> &'static [LunarYearRecord] {
    &YEAR_TABLE
}

/// Look up the record for a lunar year.
///
/// Returns `None` outside 1900..=2100.
pub fn year_record(year: i32) -> Option<&'static LunarYearRecord> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return None;
    }
    YEAR_TABLE.get((year - FIRST_YEAR) as usize)
}

/// Find the lunar year containing a day offset from the epoch.
pub fn record_for_offset(offset: u32) -> Option<&'static LunarYearRecord> {
    let idx = YEAR_TABLE.partition_point(|r| r.epoch_offset <= offset);
    let record = YEAR_TABLE.get(idx.checked_sub(1)?)?;
    record.contains_offset(offset).then_some(record)
}

/// Total days covered by the table.
pub fn total_days() -> u32 {
    YEAR_TABLE
        .last()
        .map(|r| r.epoch_offset + r.total_days)
        .unwrap_or(0)
}

/// Leap month number of a lunar year, if it has one.
pub fn leap_month(year: i32) -> Option<u32> {
    year_record(year).and_then(|r| r.leap_month)
}

/// Length of the leap month of a lunar year, if it has one.
pub fn leap_month_days(year: i32) -> Option<u32> {
    year_record(year).and_then(|r| r.leap_month_days())
}

/// Length of a month of a lunar year, or `None` if that month does not exist.
pub fn month_days(year: i32, month: u32, is_leap: bool) -> Option<u32> {
    year_record(year).and_then(|r| r.month_days(month, is_leap))
}

/// Total days in a lunar year.
pub fn year_days(year: i32) -> Option<u32> {
    year_record(year).map(|r| r.total_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_range() {
        assert_eq!(records().len(), (LAST_YEAR - FIRST_YEAR + 1) as usize);
        assert_eq!(records()[0].epoch_offset, 0);
        assert!(year_record(1899).is_none());
        assert!(year_record(2101).is_none());
    }

    #[test]
    fn test_leap_years() {
        // (year, leap month)
        for (year, leap) in [(2001, 4), (2004, 2), (2006, 7), (2009, 5), (2012, 4), (2014, 9), (2017, 6), (2020, 4), (2023, 2), (2025, 6)] {
            assert_eq!(leap_month(year), Some(leap), "{year}");
        }
        assert_eq!(leap_month(2024), None);
        assert_eq!(leap_month(2000), None);
    }

    #[test]
    fn test_year_lengths() {
        for record in records() {
            let months = record.months().count();
            match record.leap_month {
                Some(_) => {
                    assert_eq!(months, 13);
                    assert!((383..=385).contains(&record.total_days), "{}", record.year);
                }
                None => {
                    assert_eq!(months, 12);
                    assert!((353..=355).contains(&record.total_days), "{}", record.year);
                }
            }
        }
    }

    #[test]
    fn test_single_leap_month_per_year() {
        for record in records() {
            let leaps: Vec<_> = record.months().filter(|m| m.is_leap).collect();
            assert!(leaps.len() <= 1);
            if let Some(leap) = leaps.first() {
                assert_eq!(Some(leap.number), record.leap_month);
            }
        }
    }

    #[test]
    fn test_month_layout_2017() {
        let record = year_record(2017).unwrap();
        let numbers: Vec<_> = record.months().map(|m| (m.number, m.is_leap)).collect();
        assert_eq!(numbers[5], (6, false));
        assert_eq!(numbers[6], (6, true));
        assert_eq!(numbers[7], (7, false));
        assert_eq!(numbers[12], (12, false));
        // 0x15176: bit 16 set, leap 6th month is big
        assert_eq!(record.leap_month_days(), Some(30));
    }

    #[test]
    fn test_month_index() {
        let record = year_record(2023).unwrap();
        assert_eq!(record.month_index(1, false), Some(0));
        assert_eq!(record.month_index(2, false), Some(1));
        assert_eq!(record.month_index(2, true), Some(2));
        assert_eq!(record.month_index(3, false), Some(3));
        assert_eq!(record.month_index(3, true), None);
        assert_eq!(record.month_index(13, false), None);
        assert_eq!(record.month_index(0, false), None);
    }

    #[test]
    fn test_month_slot() {
        let record = year_record(2017).unwrap();
        assert_eq!(record.month_slot(6, true), Some((6, 30)));
        assert_eq!(record.month_slot(7, false).map(|(idx, _)| idx), Some(7));
        assert_eq!(record.month_slot(5, true), None);
        let no_leap = year_record(2024).unwrap();
        assert_eq!(no_leap.month_slot(12, false).map(|(idx, _)| idx), Some(11));
        assert_eq!(no_leap.month_slot(12, false).map(|(_, days)| days), no_leap.months().last().map(|m| m.days));
    }

    #[test]
    fn test_record_for_offset() {
        assert_eq!(record_for_offset(0).map(|r| r.year), Some(1900));
        let y1901 = year_record(1901).unwrap();
        assert_eq!(record_for_offset(y1901.epoch_offset).map(|r| r.year), Some(1901));
        assert_eq!(record_for_offset(y1901.epoch_offset - 1).map(|r| r.year), Some(1900));
        assert!(record_for_offset(total_days()).is_none());
    }

    #[test]
    fn test_month_days_queries() {
        assert_eq!(month_days(2024, 1, false).map(|d| d == 29 || d == 30), Some(true));
        assert_eq!(month_days(2024, 4, true), None);
        assert_eq!(leap_month_days(2024), None);
        assert_eq!(year_days(1800), None);
    }
}
