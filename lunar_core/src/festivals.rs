//! # Festivals
//!
//! Traditional lunar festivals keyed by `(month, day)`, and the Gregorian
//! holidays shown alongside them.
//!
//! Leap months never carry a lunar festival. New Year's Eve is the last day
//! of the twelfth month, which is the 29th or the 30th depending on the year.
//! Qingming has no fixed Gregorian date; it falls on the Clear and Bright
//! solar term.

use serde::{Deserialize, Serialize};

use crate::dates::{LunarDate, SolarDate};
use crate::solar_terms::{self, SolarTerm};
use crate::table;

/// Festivals of the lunar calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarFestival {
    SpringFestival,
    Lantern,
    DragonHeadRaising,
    DragonBoat,
    Qixi,
    Ghost,
    MidAutumn,
    DoubleNinth,
    WinterClothing,
    Xiayuan,
    Laba,
    LittleNewYear,
    NewYearsEve,
}

/// Fixed-date festivals, `(month, day, festival)`
const FIXED_LUNAR: [(u32, u32, LunarFestival); 12] = [
    (1, 1, LunarFestival::SpringFestival),
    (1, 15, LunarFestival::Lantern),
    (2, 2, LunarFestival::DragonHeadRaising),
    (5, 5, LunarFestival::DragonBoat),
    (7, 7, LunarFestival::Qixi),
    (7, 15, LunarFestival::Ghost),
    (8, 15, LunarFestival::MidAutumn),
    (9, 9, LunarFestival::DoubleNinth),
    (10, 1, LunarFestival::WinterClothing),
    (10, 15, LunarFestival::Xiayuan),
    (12, 8, LunarFestival::Laba),
    (12, 23, LunarFestival::LittleNewYear),
];

impl LunarFestival {
    /// Festival falling on a lunar date, if any.
    pub fn on(date: &LunarDate) -> Option<Self> {
        if date.is_leap_month {
            return None;
        }
        if let Some(&(_, _, festival)) = FIXED_LUNAR
            .iter()
            .find(|(m, d, _)| *m == date.month && *d == date.day)
        {
            return Some(festival);
        }
        let last_day = table::month_days(date.year, 12, false)?;
        (date.month == 12 && date.day == last_day).then_some(LunarFestival::NewYearsEve)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LunarFestival::SpringFestival => "Spring Festival (Lunar New Year)",
            LunarFestival::Lantern => "Lantern Festival",
            LunarFestival::DragonHeadRaising => "Dragon Head Raising Festival",
            LunarFestival::DragonBoat => "Dragon Boat Festival",
            LunarFestival::Qixi => "Qixi Festival",
            LunarFestival::Ghost => "Ghost Festival",
            LunarFestival::MidAutumn => "Mid-Autumn Festival",
            LunarFestival::DoubleNinth => "Double Ninth Festival",
            LunarFestival::WinterClothing => "Winter Clothing Festival",
            LunarFestival::Xiayuan => "Xiayuan Festival",
            LunarFestival::Laba => "Laba Festival",
            LunarFestival::LittleNewYear => "Little New Year",
            LunarFestival::NewYearsEve => "New Year's Eve",
        }
    }

    pub fn chinese(&self) -> &'static str {
        match self {
            LunarFestival::SpringFestival => "春节",
            LunarFestival::Lantern => "元宵节",
            LunarFestival::DragonHeadRaising => "龙抬头",
            LunarFestival::DragonBoat => "端午节",
            LunarFestival::Qixi => "七夕节",
            LunarFestival::Ghost => "中元节",
            LunarFestival::MidAutumn => "中秋节",
            LunarFestival::DoubleNinth => "重阳节",
            LunarFestival::WinterClothing => "寒衣节",
            LunarFestival::Xiayuan => "下元节",
            LunarFestival::Laba => "腊八节",
            LunarFestival::LittleNewYear => "小年",
            LunarFestival::NewYearsEve => "除夕",
        }
    }
}

/// Gregorian holidays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolarFestival {
    NewYearsDay,
    ValentinesDay,
    WomensDay,
    ArborDay,
    Qingming,
    LabourDay,
    YouthDay,
    ChildrensDay,
    TeachersDay,
    NationalDay,
    Christmas,
}

const FIXED_SOLAR: [(u32, u32, SolarFestival); 10] = [
    (1, 1, SolarFestival::NewYearsDay),
    (2, 14, SolarFestival::ValentinesDay),
    (3, 8, SolarFestival::WomensDay),
    (3, 12, SolarFestival::ArborDay),
    (5, 1, SolarFestival::LabourDay),
    (5, 4, SolarFestival::YouthDay),
    (6, 1, SolarFestival::ChildrensDay),
    (9, 10, SolarFestival::TeachersDay),
    (10, 1, SolarFestival::NationalDay),
    (12, 25, SolarFestival::Christmas),
];

impl SolarFestival {
    /// Holiday falling on a Gregorian date, if any.
    pub fn on(date: &SolarDate) -> Option<Self> {
        let fixed = FIXED_SOLAR
            .iter()
            .find(|(m, d, _)| *m == date.month() && *d == date.day())
            .map(|&(_, _, festival)| festival);
        fixed.or_else(|| {
            (solar_terms::term_on(date) == Some(SolarTerm::ClearAndBright))
                .then_some(SolarFestival::Qingming)
        })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SolarFestival::NewYearsDay => "New Year's Day",
            SolarFestival::ValentinesDay => "Valentine's Day",
            SolarFestival::WomensDay => "International Women's Day",
            SolarFestival::ArborDay => "Arbor Day",
            SolarFestival::Qingming => "Qingming Festival",
            SolarFestival::LabourDay => "Labour Day",
            SolarFestival::YouthDay => "Youth Day",
            SolarFestival::ChildrensDay => "Children's Day",
            SolarFestival::TeachersDay => "Teachers' Day",
            SolarFestival::NationalDay => "National Day",
            SolarFestival::Christmas => "Christmas Day",
        }
    }

    pub fn chinese(&self) -> &'static str {
        match self {
            SolarFestival::NewYearsDay => "元旦",
            SolarFestival::ValentinesDay => "情人节",
            SolarFestival::WomensDay => "妇女节",
            SolarFestival::ArborDay => "植树节",
            SolarFestival::Qingming => "清明节",
            SolarFestival::LabourDay => "劳动节",
            SolarFestival::YouthDay => "青年节",
            SolarFestival::ChildrensDay => "儿童节",
            SolarFestival::TeachersDay => "教师节",
            SolarFestival::NationalDay => "国庆节",
            SolarFestival::Christmas => "圣诞节",
        }
    }
}
