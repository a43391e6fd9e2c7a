//! # Date Metadata
//!
//! Cultural and astronomical facts about a converted date: zodiac animal,
//! the three Gan-Zhi pillars, solar term, festivals, weekday and star sign.
//!
//! [`derive_metadata`] cannot fail. A fact that does not apply to the date
//! is `None`.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "zodiac": "Dragon",
//!   "year_ganzhi": { "stem": "Jia", "branch": "Chen" },
//!   "month_ganzhi": { "stem": "Bing", "branch": "Yin" },
//!   "day_ganzhi": { "stem": "Jia", "branch": "Chen" },
//!   "solar_term": null,
//!   "festival": "SpringFestival",
//!   "solar_festival": null,
//!   "weekday": "Sat",
//!   "western_zodiac": "Aquarius"
//! }
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::dates::{LunarDate, SolarDate};
use crate::festivals::{LunarFestival, SolarFestival};
use crate::ganzhi::{GanZhi, Zodiac};
use crate::solar_terms::{self, SolarTerm};

/// Everything shown next to a converted date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateMetadata {
    /// Animal of the lunar year
    pub zodiac: Zodiac,

    pub year_ganzhi: GanZhi,

    /// `None` when no solar-term data covers the date
    pub month_ganzhi: Option<GanZhi>,

    pub day_ganzhi: GanZhi,

    /// Solar term starting on this date
    pub solar_term: Option<SolarTerm>,

    /// Lunar festival on this date
    pub festival: Option<LunarFestival>,

    /// Gregorian holiday on this date
    pub solar_festival: Option<SolarFestival>,

    pub weekday: Weekday,

    pub western_zodiac: WesternZodiac,
}

/// Derive metadata for a date pair produced by the converter.
///
/// `lunar` must be the conversion of `solar`; nothing here checks that.
pub fn derive_metadata(solar: &SolarDate, lunar: &LunarDate) -> DateMetadata {
    DateMetadata {
        zodiac: Zodiac::for_year(lunar.year),
        year_ganzhi: GanZhi::for_year(lunar.year),
        month_ganzhi: GanZhi::for_month(solar),
        day_ganzhi: GanZhi::for_day(solar),
        solar_term: solar_terms::term_on(solar),
        festival: LunarFestival::on(lunar),
        solar_festival: SolarFestival::on(solar),
        weekday: solar.weekday(),
        western_zodiac: WesternZodiac::for_date(solar),
    }
}

/// Western star signs, Capricorn first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WesternZodiac {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

/// First day of the second sign in each Gregorian month
const SIGN_CHANGE_DAY: [u32; 12] = [20, 19, 21, 21, 21, 22, 23, 23, 23, 23, 22, 22];

impl WesternZodiac {
    pub const ALL: [WesternZodiac; 12] = [
        WesternZodiac::Capricorn,
        WesternZodiac::Aquarius,
        WesternZodiac::Pisces,
        WesternZodiac::Aries,
        WesternZodiac::Taurus,
        WesternZodiac::Gemini,
        WesternZodiac::Cancer,
        WesternZodiac::Leo,
        WesternZodiac::Virgo,
        WesternZodiac::Libra,
        WesternZodiac::Scorpio,
        WesternZodiac::Sagittarius,
    ];

    pub fn for_date(date: &SolarDate) -> Self {
        let m = date.month() as usize;
        if date.day() < SIGN_CHANGE_DAY[m - 1] {
            Self::ALL[m - 1]
        } else {
            Self::ALL[m % 12]
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WesternZodiac::Capricorn => "Capricorn",
            WesternZodiac::Aquarius => "Aquarius",
            WesternZodiac::Pisces => "Pisces",
            WesternZodiac::Aries => "Aries",
            WesternZodiac::Taurus => "Taurus",
            WesternZodiac::Gemini => "Gemini",
            WesternZodiac::Cancer => "Cancer",
            WesternZodiac::Leo => "Leo",
            WesternZodiac::Virgo => "Virgo",
            WesternZodiac::Libra => "Libra",
            WesternZodiac::Scorpio => "Scorpio",
            WesternZodiac::Sagittarius => "Sagittarius",
        }
    }

    pub fn chinese(&self) -> &'static str {
        [
            "摩羯座", "水瓶座", "双鱼座", "白羊座", "金牛座", "双子座",
            "巨蟹座", "狮子座", "处女座", "天秤座", "天蝎座", "射手座",
        ][*self as usize]
    }
}

pub fn weekday_english(weekday: Weekday) -> &'static str {
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        [weekday.num_days_from_monday() as usize]
}

/// Chinese weekday name, 星期一 to 星期日
pub fn weekday_chinese(weekday: Weekday) -> &'static str {
    ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"]
        [weekday.num_days_from_monday() as usize]
}
