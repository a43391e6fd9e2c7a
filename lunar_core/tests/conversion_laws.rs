//! Whole-range properties of the solar/lunar conversion.

use lunar_core::ganzhi::{GanZhi, Zodiac};
use lunar_core::table;
use lunar_core::{lunar_to_solar, solar_to_lunar, LunarDate, SolarDate};

fn every_supported_date() -> impl Iterator<Item = SolarDate> {
    let last = SolarDate::LAST_SUPPORTED.epoch_offset().unwrap();
    (0..=last).map(|offset| SolarDate::from_epoch_offset(offset).unwrap())
}

#[test]
fn test_roundtrip_every_date() {
    for solar in every_supported_date() {
        let lunar = solar_to_lunar(&solar).unwrap();
        assert_eq!(lunar_to_solar(&lunar).unwrap(), solar, "{solar} -> {lunar}");
    }
}

#[test]
fn test_roundtrip_every_lunar_date() {
    let mut tail = 0;
    for record in table::records() {
        for month in record.months() {
            for day in 1..=month.days {
                let lunar = LunarDate::new(record.year, month.number, day, month.is_leap);
                match lunar_to_solar(&lunar) {
                    Ok(solar) => assert_eq!(solar_to_lunar(&solar).unwrap(), lunar, "{lunar}"),
                    Err(err) => {
                        assert_eq!(err.error_code(), "OUT_OF_RANGE", "{lunar}");
                        assert_eq!((record.year, month.number), (table::LAST_YEAR, 12), "{lunar}");
                        tail += 1;
                    }
                }
            }
        }
    }
    // Lunar 2100-12-02 onwards falls in January 2101
    let last_month = table::month_days(table::LAST_YEAR, 12, false).unwrap();
    assert_eq!(tail, last_month - 1);
}

#[test]
fn test_lunar_dates_advance_one_day_at_a_time() {
    let mut previous: Option<LunarDate> = None;
    for solar in every_supported_date() {
        let lunar = solar_to_lunar(&solar).unwrap();
        if let Some(prev) = previous {
            let same_month = prev.year == lunar.year
                && prev.month == lunar.month
                && prev.is_leap_month == lunar.is_leap_month;
            if same_month {
                assert_eq!(lunar.day, prev.day + 1, "{solar}");
            } else {
                assert_eq!(lunar.day, 1, "{solar}");
                assert!(prev.day == 29 || prev.day == 30, "{solar}");
            }
        }
        previous = Some(lunar);
    }
}

#[test]
fn test_lunar_order_follows_solar_order() {
    let position = |lunar: &LunarDate| {
        let record = table::year_record(lunar.year).unwrap();
        let index = record.month_index(lunar.month, lunar.is_leap_month).unwrap();
        record.month_offset(index) + lunar.day - 1
    };

    let mut previous = None;
    for solar in every_supported_date() {
        let current = position(&solar_to_lunar(&solar).unwrap());
        if let Some(prev) = previous {
            assert!(current > prev, "{solar}");
        }
        assert_eq!(current, solar.epoch_offset().unwrap());
        previous = Some(current);
    }
}

#[test]
fn test_leap_flag_only_on_declared_leap_month() {
    for solar in every_supported_date() {
        let lunar = solar_to_lunar(&solar).unwrap();
        if lunar.is_leap_month {
            assert_eq!(table::leap_month(lunar.year), Some(lunar.month), "{solar}");
        }
    }
}

#[test]
fn test_year_lengths() {
    for record in table::records() {
        let leap_count = record.months().filter(|m| m.is_leap).count();
        assert!(leap_count <= 1);
        match record.leap_month {
            Some(_) => assert!((383..=385).contains(&record.total_days), "{}", record.year),
            None => assert!((353..=355).contains(&record.total_days), "{}", record.year),
        }
    }
    assert_eq!(table::total_days(), 73_412);
}

#[test]
fn test_zodiac_and_year_pillar_periods() {
    for year in table::FIRST_YEAR..=table::LAST_YEAR - 60 {
        assert_eq!(Zodiac::for_year(year), Zodiac::for_year(year + 12));
        assert_eq!(GanZhi::for_year(year), GanZhi::for_year(year + 60));
        assert_ne!(GanZhi::for_year(year), GanZhi::for_year(year + 12));
    }
}

#[test]
fn test_day_pillar_period() {
    let dates: Vec<SolarDate> = every_supported_date().take(365).collect();
    for window in dates.windows(61) {
        assert_eq!(GanZhi::for_day(&window[0]), GanZhi::for_day(&window[60]));
        assert_ne!(GanZhi::for_day(&window[0]), GanZhi::for_day(&window[1]));
    }
}

#[test]
fn test_boundaries_rejected() {
    for (y, m, d) in [(1900, 1, 30), (2101, 1, 1), (1800, 6, 1)] {
        let err = solar_to_lunar(&SolarDate::new(y, m, d).unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }
}
