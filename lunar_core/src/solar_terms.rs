//! # Solar Terms (节气)
//!
//! The 24 moments of the year when the sun's apparent ecliptic longitude
//! reaches a multiple of 15°.
//!
//! ## Method
//!
//! - Sun position from the low-precision solar theory (mean longitude,
//!   mean anomaly, equation of centre, aberration and nutation in longitude),
//!   good to about 0.01°
//! - Each term instant is solved by Newton iteration on the longitude
//! - Dynamical time is reduced to UT with a piecewise polynomial ΔT
//! - The civil date is taken in China Standard Time (UTC+8)
//!
//! The instant is accurate to a few minutes, so a term falling within minutes
//! of midnight can land on the neighbouring day.
//!
//! Dates for 1900-2100 are computed once, on first use.
//!
//! ## Example
//!
//! ```rust
//! use lunar_core::solar_terms::{self, SolarTerm};
//!
//! let date = solar_terms::term_date(2024, SolarTerm::StartOfSpring).unwrap();
//! assert_eq!(date.to_string(), "2024-02-04");
//! ```

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::dates::SolarDate;
use crate::errors::{CalendarError, CalendarResult};

/// First Gregorian year with term data
pub const FIRST_YEAR: i32 = 1900;

/// Last Gregorian year with term data
pub const LAST_YEAR: i32 = 2100;

/// Julian day of J2000.0
const J2000: f64 = 2_451_545.0;

/// Julian day of 0001-01-01 00:00 minus one day, for `num_days_from_ce`
const CE_JULIAN_DAY: f64 = 1_721_424.5;

const DAYS_PER_CENTURY: f64 = 36_525.0;
const TROPICAL_YEAR_DAYS: f64 = 365.2422;

/// China Standard Time, hours east of UTC
const CST_OFFSET_HOURS: f64 = 8.0;

const MAX_ITERATIONS: u32 = 50;
const CONVERGENCE_DEG: f64 = 1e-7;

/// The 24 solar terms in Gregorian-year order, Minor Cold (≈ Jan 6) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolarTerm {
    MinorCold,
    MajorCold,
    StartOfSpring,
    RainWater,
    AwakeningOfInsects,
    SpringEquinox,
    ClearAndBright,
    GrainRain,
    StartOfSummer,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    StartOfAutumn,
    EndOfHeat,
    WhiteDew,
    AutumnEquinox,
    ColdDew,
    FrostsDescent,
    StartOfWinter,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
}

impl SolarTerm {
    pub const ALL: [SolarTerm; 24] = [
        SolarTerm::MinorCold,
        SolarTerm::MajorCold,
        SolarTerm::StartOfSpring,
        SolarTerm::RainWater,
        SolarTerm::AwakeningOfInsects,
        SolarTerm::SpringEquinox,
        SolarTerm::ClearAndBright,
        SolarTerm::GrainRain,
        SolarTerm::StartOfSummer,
        SolarTerm::GrainBuds,
        SolarTerm::GrainInEar,
        SolarTerm::SummerSolstice,
        SolarTerm::MinorHeat,
        SolarTerm::MajorHeat,
        SolarTerm::StartOfAutumn,
        SolarTerm::EndOfHeat,
        SolarTerm::WhiteDew,
        SolarTerm::AutumnEquinox,
        SolarTerm::ColdDew,
        SolarTerm::FrostsDescent,
        SolarTerm::StartOfWinter,
        SolarTerm::MinorSnow,
        SolarTerm::MajorSnow,
        SolarTerm::WinterSolstice,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Apparent solar longitude in degrees at which the term begins
    pub fn longitude(&self) -> f64 {
        ((285 + 15 * self.index()) % 360) as f64
    }

    /// Jie (节) terms open a Gan-Zhi month; the others are qi (气) terms.
    pub fn is_jie(&self) -> bool {
        self.index() % 2 == 0
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SolarTerm::MinorCold => "Minor Cold",
            SolarTerm::MajorCold => "Major Cold",
            SolarTerm::StartOfSpring => "Start of Spring",
            SolarTerm::RainWater => "Rain Water",
            SolarTerm::AwakeningOfInsects => "Awakening of Insects",
            SolarTerm::SpringEquinox => "Spring Equinox",
            SolarTerm::ClearAndBright => "Clear and Bright",
            SolarTerm::GrainRain => "Grain Rain",
            SolarTerm::StartOfSummer => "Start of Summer",
            SolarTerm::GrainBuds => "Grain Buds",
            SolarTerm::GrainInEar => "Grain in Ear",
            SolarTerm::SummerSolstice => "Summer Solstice",
            SolarTerm::MinorHeat => "Minor Heat",
            SolarTerm::MajorHeat => "Major Heat",
            SolarTerm::StartOfAutumn => "Start of Autumn",
            SolarTerm::EndOfHeat => "End of Heat",
            SolarTerm::WhiteDew => "White Dew",
            SolarTerm::AutumnEquinox => "Autumn Equinox",
            SolarTerm::ColdDew => "Cold Dew",
            SolarTerm::FrostsDescent => "Frost's Descent",
            SolarTerm::StartOfWinter => "Start of Winter",
            SolarTerm::MinorSnow => "Minor Snow",
            SolarTerm::MajorSnow => "Major Snow",
            SolarTerm::WinterSolstice => "Winter Solstice",
        }
    }

    pub fn chinese(&self) -> &'static str {
        const NAMES: [&str; 24] = [
            "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
            "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
        ];
        NAMES[self.index()]
    }
}

/// A solar term resolved to its Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarTermDate {
    pub term: SolarTerm,
    pub date: SolarDate,
}

// ============================================================================
// Astronomy
// ============================================================================

/// Sun's apparent ecliptic longitude in degrees, `[0, 360)`, at Julian
/// ephemeris day `jde`.
pub fn sun_apparent_longitude(jde: f64) -> f64 {
    let t = (jde - J2000) / DAYS_PER_CENTURY;

    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.0003032 * t * t;
    let mean_anomaly = (357.52911 + 35_999.05029 * t - 0.0001537 * t * t).to_radians();
    let centre = (1.914602 - 0.004817 * t - 0.000014 * t * t) * mean_anomaly.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000289 * (3.0 * mean_anomaly).sin();
    let node = (125.04 - 1_934.136 * t).to_radians();

    (mean_longitude + centre - 0.00569 - 0.00478 * node.sin()).rem_euclid(360.0)
}

/// ΔT = TT - UT in seconds for a decimal year, valid 1900-2150.
pub fn delta_t_seconds(year: f64) -> f64 {
    if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else {
        -20.0 + 32.0 * ((year - 1820.0) / 100.0).powi(2) - 0.5628 * (2150.0 - year)
    }
}

/// Julian day at 00:00 UT of a date
fn julian_day(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64 + CE_JULIAN_DAY
}

/// Julian ephemeris day at which the sun reaches the term's longitude in `year`.
pub fn term_instant(year: i32, term: SolarTerm) -> Option<f64> {
    let jan_6 = NaiveDate::from_ymd_opt(year, 1, 6)?;
    let target = term.longitude();
    let mut jde = julian_day(jan_6) + term.index() as f64 * TROPICAL_YEAR_DAYS / 24.0;

    for _ in 0..MAX_ITERATIONS {
        let diff = (target - sun_apparent_longitude(jde) + 180.0).rem_euclid(360.0) - 180.0;
        jde += diff * TROPICAL_YEAR_DAYS / 360.0;
        if diff.abs() < CONVERGENCE_DEG {
            break;
        }
    }

    Some(jde)
}

/// Civil date in China Standard Time of a dynamical-time instant.
fn cst_date(jde: f64, year: i32, term: SolarTerm) -> Option<NaiveDate> {
    let decimal_year = year as f64 + (term.index() as f64 + 0.5) / 24.0;
    let jd_ut = jde - delta_t_seconds(decimal_year) / 86_400.0;
    let local = jd_ut + CST_OFFSET_HOURS / 24.0 - CE_JULIAN_DAY;
    NaiveDate::from_num_days_from_ce_opt(local.floor() as i32)
}

fn compute_term_date(year: i32, term: SolarTerm) -> Option<NaiveDate> {
    term_instant(year, term).and_then(|jde| cst_date(jde, year, term))
}

// ============================================================================
// Precomputed table
// ============================================================================

static TERM_TABLE: Lazy<Vec<[Option<NaiveDate>; 24]>> = Lazy::new(|| {
    let table: Vec<_> = (FIRST_YEAR..=LAST_YEAR)
        .map(|year| SolarTerm::ALL.map(|term| compute_term_date(year, term)))
        .collect();
    tracing::trace!(years = table.len(), "computed solar term table");
    table
});

fn year_row(year: i32) -> CalendarResult<&'static [Option<NaiveDate>; 24]> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return Err(CalendarError::out_of_range(
            year.to_string(),
            FIRST_YEAR.to_string(),
            LAST_YEAR.to_string(),
        ));
    }
    Ok(&TERM_TABLE[(year - FIRST_YEAR) as usize])
}

/// Date of one solar term in a Gregorian year.
pub fn term_date(year: i32, term: SolarTerm) -> CalendarResult<SolarDate> {
    year_row(year)?[term.index()]
        .map(SolarDate::from)
        .ok_or_else(|| CalendarError::invalid_input("year", year.to_string(), "No solar term data"))
}

/// All 24 solar terms of a Gregorian year, in date order.
pub fn solar_terms_of(year: i32) -> CalendarResult<Vec<SolarTermDate>> {
    SolarTerm::ALL
        .iter()
        .map(|&term| term_date(year, term).map(|date| SolarTermDate { term, date }))
        .collect()
}

/// The solar term beginning on `date`, if any.
pub fn term_on(date: &SolarDate) -> Option<SolarTerm> {
    let row = year_row(date.year()).ok()?;
    SolarTerm::ALL
        .iter()
        .zip(row.iter())
        .find(|(_, d)| **d == Some(date.naive()))
        .map(|(&term, _)| term)
}

/// Date of the jie term inside a Gregorian month (Minor Cold in January,
/// Start of Spring in February, ...).
pub fn jie_date(year: i32, month: u32) -> CalendarResult<SolarDate> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::invalid_input("month", month.to_string(), "Month must be 1-12"));
    }
    term_date(year, SolarTerm::ALL[2 * (month as usize - 1)])
}
