//! # Lunar Date Names
//!
//! Traditional rendering of lunar dates.
//!
//! ```rust
//! use lunar_core::dates::LunarDate;
//! use lunar_core::fmt;
//!
//! assert_eq!(fmt::month_name(11, false).as_deref(), Some("冬月"));
//! assert_eq!(fmt::month_name(1, true).as_deref(), Some("闰正月"));
//! assert_eq!(fmt::day_name(25).as_deref(), Some("廿五"));
//! assert_eq!(fmt::lunar_date(&LunarDate::new(2024, 1, 1, false)), "甲辰年 正月初一");
//! ```

use crate::dates::LunarDate;
use crate::ganzhi::GanZhi;

/// Chinese numerals; index 0 is 十 so that `d % 10` indexes day names.
const NUMERALS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Month name including 月, with 闰 for a leap month. `None` outside 1-12.
pub fn month_name(month: u32, is_leap: bool) -> Option<String> {
    let base = match month {
        1 => "正",
        2..=9 => NUMERALS[month as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => return None,
    };
    let leap = if is_leap { "闰" } else { "" };
    Some(format!("{leap}{base}月"))
}

/// Day name: 初一 to 初十, 十一 to 十九, 二十, 廿一 to 廿九, 三十. `None` outside 1-30.
pub fn day_name(day: u32) -> Option<String> {
    let prefix = match day {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => return None,
    };
    Some(format!("{prefix}{}", NUMERALS[(day % 10) as usize]))
}

/// Year name from the year pillar, e.g. `甲辰年`
pub fn year_name(lunar_year: i32) -> String {
    format!("{}年", GanZhi::for_year(lunar_year).chinese())
}

/// Full traditional rendering, e.g. `甲辰年 正月初一`.
///
/// Falls back to digits for month or day numbers with no traditional name.
pub fn lunar_date(date: &LunarDate) -> String {
    let month = month_name(date.month, date.is_leap_month)
        .unwrap_or_else(|| format!("{}月", date.month));
    let day = day_name(date.day).unwrap_or_else(|| date.day.to_string());
    format!("{} {}{}", year_name(date.year), month, day)
}
