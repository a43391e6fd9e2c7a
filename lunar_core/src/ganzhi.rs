//! # Gan-Zhi (Sexagenary Cycle)
//!
//! Ten Heavenly Stems and twelve Earthly Branches advance together, giving
//! a 60-step cycle. Cycle index `n` names the pair `(n mod 10, n mod 12)`;
//! index 0 is Jia-Zi (甲子).
//!
//! ## Pillars
//!
//! - **Year**: `(lunar year - 4)`, so the year name and zodiac animal change
//!   at the lunar new year (2024-02-10 starts Jia-Chen, the Dragon).
//! - **Month**: switches at each jie solar term (Minor Cold, Start of
//!   Spring, ...), not at the lunar month boundary.
//! - **Day**: counts days continuously; 1900-01-31 is Jia-Chen (index 40).
//!
//! ## Example
//!
//! ```rust
//! use lunar_core::ganzhi::{GanZhi, Zodiac};
//!
//! let year = GanZhi::for_year(2024);
//! assert_eq!(year.chinese(), "甲辰");
//! assert_eq!(year.to_string(), "Jia-Chen");
//! assert_eq!(Zodiac::for_year(2024), Zodiac::Dragon);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dates::SolarDate;
use crate::solar_terms;

/// Cycle index of the epoch day 1900-01-31
const EPOCH_DAY_INDEX: i64 = 40;

/// One of the ten Heavenly Stems (天干)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl HeavenlyStem {
    pub const ALL: [HeavenlyStem; 10] = [
        HeavenlyStem::Jia,
        HeavenlyStem::Yi,
        HeavenlyStem::Bing,
        HeavenlyStem::Ding,
        HeavenlyStem::Wu,
        HeavenlyStem::Ji,
        HeavenlyStem::Geng,
        HeavenlyStem::Xin,
        HeavenlyStem::Ren,
        HeavenlyStem::Gui,
    ];

    /// Stem for any integer, taken modulo 10
    pub fn from_index(n: i64) -> Self {
        Self::ALL[n.rem_euclid(10) as usize]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn chinese(&self) -> &'static str {
        ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"][self.index()]
    }

    pub fn pinyin(&self) -> &'static str {
        ["Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui"][self.index()]
    }
}

/// One of the twelve Earthly Branches (地支)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EarthlyBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl EarthlyBranch {
    pub const ALL: [EarthlyBranch; 12] = [
        EarthlyBranch::Zi,
        EarthlyBranch::Chou,
        EarthlyBranch::Yin,
        EarthlyBranch::Mao,
        EarthlyBranch::Chen,
        EarthlyBranch::Si,
        EarthlyBranch::Wu,
        EarthlyBranch::Wei,
        EarthlyBranch::Shen,
        EarthlyBranch::You,
        EarthlyBranch::Xu,
        EarthlyBranch::Hai,
    ];

    /// Branch for any integer, taken modulo 12
    pub fn from_index(n: i64) -> Self {
        Self::ALL[n.rem_euclid(12) as usize]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn chinese(&self) -> &'static str {
        ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"][self.index()]
    }

    pub fn pinyin(&self) -> &'static str {
        ["Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai"][self.index()]
    }

    /// The animal paired with this branch
    pub fn zodiac(&self) -> Zodiac {
        Zodiac::ALL[self.index()]
    }
}

/// The twelve zodiac animals (生肖), in branch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Zodiac {
    pub const ALL: [Zodiac; 12] = [
        Zodiac::Rat,
        Zodiac::Ox,
        Zodiac::Tiger,
        Zodiac::Rabbit,
        Zodiac::Dragon,
        Zodiac::Snake,
        Zodiac::Horse,
        Zodiac::Goat,
        Zodiac::Monkey,
        Zodiac::Rooster,
        Zodiac::Dog,
        Zodiac::Pig,
    ];

    /// Animal of a lunar year.
    pub fn for_year(lunar_year: i32) -> Self {
        GanZhi::for_year(lunar_year).branch.zodiac()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Zodiac::Rat => "Rat",
            Zodiac::Ox => "Ox",
            Zodiac::Tiger => "Tiger",
            Zodiac::Rabbit => "Rabbit",
            Zodiac::Dragon => "Dragon",
            Zodiac::Snake => "Snake",
            Zodiac::Horse => "Horse",
            Zodiac::Goat => "Goat",
            Zodiac::Monkey => "Monkey",
            Zodiac::Rooster => "Rooster",
            Zodiac::Dog => "Dog",
            Zodiac::Pig => "Pig",
        }
    }

    pub fn chinese(&self) -> &'static str {
        ["鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪"][*self as usize]
    }
}

/// A stem-branch pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GanZhi {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
}

impl GanZhi {
    /// Pair for a cycle index; any integer is accepted and reduced modulo 60.
    pub fn from_cycle(n: i64) -> Self {
        GanZhi {
            stem: HeavenlyStem::from_index(n),
            branch: EarthlyBranch::from_index(n),
        }
    }

    /// Position in the cycle, 0 (Jia-Zi) to 59 (Gui-Hai).
    pub fn cycle_index(&self) -> usize {
        let (s, b) = (self.stem.index(), self.branch.index());
        // s = n - 10p, b = n - 12q gives 6s + 55b = 61n - 60p - 660q
        (6 * s + 55 * b) % 60
    }

    /// Year pillar of a lunar year.
    pub fn for_year(lunar_year: i32) -> Self {
        Self::from_cycle(lunar_year as i64 - 4)
    }

    /// Day pillar of a Gregorian date.
    pub fn for_day(date: &SolarDate) -> Self {
        Self::from_cycle(date.days_from_epoch() + EPOCH_DAY_INDEX)
    }

    /// Month pillar of a Gregorian date.
    ///
    /// Months turn over on the jie solar term inside each Gregorian month;
    /// `None` when no term data exists for the year.
    pub fn for_month(date: &SolarDate) -> Option<Self> {
        let jie = solar_terms::jie_date(date.year(), date.month()).ok()?;
        let mut n = (date.year() as i64 - 1900) * 12 + date.month() as i64 + 11;
        if *date >= jie {
            n += 1;
        }
        Some(Self::from_cycle(n))
    }

    /// Chinese rendering, e.g. `甲辰`
    pub fn chinese(&self) -> String {
        format!("{}{}", self.stem.chinese(), self.branch.chinese())
    }
}

impl fmt::Display for GanZhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stem.pinyin(), self.branch.pinyin())
    }
}
