//! # Lunar Calendar CLI
//!
//! Command-line front end for `lunar_core`: converts dates in either
//! direction, lists solar terms, and shows the month layout of a lunar year.
//! With no subcommand it prompts for a Gregorian date.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use lunar_core::converter::MonthInfo;
use lunar_core::festivals::{LunarFestival, SolarFestival};
use lunar_core::ganzhi::{GanZhi, Zodiac};
use lunar_core::metadata::{weekday_chinese, weekday_english, WesternZodiac};
use lunar_core::settings::{self, ConverterSettings};
use lunar_core::solar_terms::SolarTermDate;
use lunar_core::{
    calculate, fmt, months_of, solar_terms_of, table, CalendarError, CalendarResult,
    ConversionDirection, ConversionInput, ConversionResult, Locale, SolarDate,
};

#[derive(Parser)]
#[command(name = "lunar_cli", version, about = "Chinese lunar calendar converter (1900-2100)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print results as JSON
    #[arg(long, global = true, conflicts_with = "text")]
    json: bool,

    /// Print results as text, even if the settings file asks for JSON
    #[arg(long, global = true)]
    text: bool,

    /// Language for names: en, zh or both
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Gregorian date to the lunar calendar
    Solar {
        /// Date as YYYY-MM-DD
        date: SolarDate,
    },
    /// Convert a lunar date to the Gregorian calendar
    Lunar {
        year: i32,
        month: u32,
        day: u32,
        /// The date is in the leap month
        #[arg(long)]
        leap: bool,
    },
    /// List the 24 solar terms of a Gregorian year
    Terms { year: i32 },
    /// Show the months of a lunar year
    Year { year: i32 },
}

/// Effective output options after merging flags over the settings file
struct Output {
    locale: Locale,
    json: bool,
    include_solar_festivals: bool,
}

impl Output {
    fn new(cli: &Cli, settings: &ConverterSettings) -> Self {
        Output {
            locale: cli.locale.unwrap_or(settings.locale),
            json: !cli.text && (cli.json || settings.json_output),
            include_solar_festivals: settings.include_solar_festivals,
        }
    }
}

#[derive(Serialize)]
struct YearSummary {
    year: i32,
    zodiac: Zodiac,
    year_ganzhi: GanZhi,
    leap_month: Option<u32>,
    total_days: u32,
    months: Vec<MonthInfo>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let output = match settings::load_or_default(cli.config.as_deref()) {
        Ok(settings) => Output::new(&cli, &settings),
        Err(e) => {
            report_error(&e, cli.json);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(locale = ?output.locale, json = output.json, "resolved output options");

    match run(cli.command, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, output.json);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Option<Commands>, output: &Output) -> CalendarResult<()> {
    match command {
        Some(Commands::Solar { date }) => {
            let input = ConversionInput {
                direction: ConversionDirection::SolarToLunar,
                year: date.year(),
                month: date.month(),
                day: date.day(),
                is_leap_month: false,
            };
            convert(&input, output)
        }
        Some(Commands::Lunar { year, month, day, leap }) => {
            let input = ConversionInput {
                direction: ConversionDirection::LunarToSolar,
                year,
                month,
                day,
                is_leap_month: leap,
            };
            convert(&input, output)
        }
        Some(Commands::Terms { year }) => print_terms(year, output),
        Some(Commands::Year { year }) => print_year(year, output),
        None => interactive(output),
    }
}

fn convert(input: &ConversionInput, output: &Output) -> CalendarResult<()> {
    let mut result = calculate(input)?;
    if !output.include_solar_festivals {
        result.metadata.solar_festival = None;
    }

    if output.json {
        print_json(&result)
    } else {
        print_conversion(&result, output.locale);
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> CalendarResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_conversion(result: &ConversionResult, locale: Locale) {
    let meta = &result.metadata;
    let none = locale.label("-", "无");

    println!("═══════════════════════════════════════");
    println!("  {}", locale.label("CONVERSION RESULT", "转换结果"));
    println!("═══════════════════════════════════════");
    println!();
    println!(
        "  Solar:      {} ({})",
        result.solar,
        locale.label(weekday_english(meta.weekday), weekday_chinese(meta.weekday))
    );
    println!("  Lunar:      {}  {}", result.lunar, result.lunar_display);
    println!("  Zodiac:     {}", zodiac_label(meta.zodiac, locale));
    println!("  Year:       {}", ganzhi_label(&meta.year_ganzhi, locale));
    println!(
        "  Month:      {}",
        meta.month_ganzhi
            .as_ref()
            .map(|g| ganzhi_label(g, locale))
            .unwrap_or_else(|| none.clone())
    );
    println!("  Day:        {}", ganzhi_label(&meta.day_ganzhi, locale));
    println!(
        "  Solar term: {}",
        meta.solar_term
            .map(|t| locale.label(t.display_name(), t.chinese()))
            .unwrap_or_else(|| none.clone())
    );
    println!(
        "  Festival:   {}",
        meta.festival
            .map(|f| lunar_festival_label(f, locale))
            .unwrap_or_else(|| none.clone())
    );
    if let Some(festival) = meta.solar_festival {
        println!("  Holiday:    {}", solar_festival_label(festival, locale));
    }
    println!("  Star sign:  {}", western_label(meta.western_zodiac, locale));
    println!();
}

fn print_terms(year: i32, output: &Output) -> CalendarResult<()> {
    let terms: Vec<SolarTermDate> = solar_terms_of(year)?;
    if output.json {
        return print_json(&terms);
    }

    println!("{} {}", locale_heading(output.locale, "Solar terms", "节气"), year);
    println!();
    for t in &terms {
        println!(
            "  {}  {}",
            t.date,
            output.locale.label(t.term.display_name(), t.term.chinese())
        );
    }
    Ok(())
}

fn print_year(year: i32, output: &Output) -> CalendarResult<()> {
    let months = months_of(year)?;
    let summary = YearSummary {
        year,
        zodiac: Zodiac::for_year(year),
        year_ganzhi: GanZhi::for_year(year),
        leap_month: table::leap_month(year),
        total_days: months.iter().map(|m| m.days).sum(),
        months,
    };
    if output.json {
        return print_json(&summary);
    }

    println!(
        "{} {} ({}, {})",
        locale_heading(output.locale, "Lunar year", "农历年"),
        summary.year,
        ganzhi_label(&summary.year_ganzhi, output.locale),
        zodiac_label(summary.zodiac, output.locale)
    );
    println!(
        "  {} days, leap month: {}",
        summary.total_days,
        summary
            .leap_month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!();
    for m in &summary.months {
        let name = fmt::month_name(m.number, m.is_leap).unwrap_or_else(|| m.number.to_string());
        let leap = if m.is_leap { "L" } else { " " };
        println!("  {}{:>2}  {:<4}  {} days  from {}", leap, m.number, name, m.days, m.start);
    }
    Ok(())
}

fn interactive(output: &Output) -> CalendarResult<()> {
    println!("Lunar Calendar Converter (1900-01-31 to 2100-12-31)");
    println!("===================================================");
    println!();

    let text = prompt_line("Enter a Gregorian date (YYYY-MM-DD) [2024-02-10]: ", "2024-02-10");
    let date: SolarDate = text.parse()?;
    println!();

    run(Some(Commands::Solar { date }), output)
}

fn prompt_line(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn report_error(e: &CalendarError, json: bool) {
    eprintln!("Error: {}", e);
    if json {
        if let Ok(text) = serde_json::to_string_pretty(e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", text);
        }
    }
}

fn locale_heading(locale: Locale, english: &str, chinese: &str) -> String {
    match locale {
        Locale::Chinese => chinese.to_string(),
        _ => english.to_string(),
    }
}

fn ganzhi_label(g: &GanZhi, locale: Locale) -> String {
    locale.label(&g.to_string(), &g.chinese())
}

fn zodiac_label(z: Zodiac, locale: Locale) -> String {
    locale.label(z.display_name(), z.chinese())
}

fn lunar_festival_label(f: LunarFestival, locale: Locale) -> String {
    locale.label(f.display_name(), f.chinese())
}

fn solar_festival_label(f: SolarFestival, locale: Locale) -> String {
    locale.label(f.display_name(), f.chinese())
}

fn western_label(w: WesternZodiac, locale: Locale) -> String {
    locale.label(w.display_name(), w.chinese())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["lunar_cli", "solar", "2024-02-10", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Solar { .. })));

        let cli = Cli::try_parse_from(["lunar_cli", "lunar", "2023", "2", "1", "--leap", "--locale", "zh"]).unwrap();
        assert_eq!(cli.locale, Some(Locale::Chinese));
        match cli.command {
            Some(Commands::Lunar { year, month, day, leap }) => {
                assert_eq!((year, month, day, leap), (2023, 2, 1, true));
            }
            _ => panic!("expected lunar subcommand"),
        }

        assert!(Cli::try_parse_from(["lunar_cli", "solar", "2024-02-30"]).is_err());
        assert!(Cli::try_parse_from(["lunar_cli", "--locale", "fr"]).is_err());
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::try_parse_from(["lunar_cli", "--locale", "both"]).unwrap();
        let settings = ConverterSettings {
            locale: Locale::Chinese,
            include_solar_festivals: false,
            json_output: true,
        };
        let output = Output::new(&cli, &settings);
        assert_eq!(output.locale, Locale::Bilingual);
        assert!(output.json);
        assert!(!output.include_solar_festivals);
    }

    #[test]
    fn test_text_flag_overrides_json_setting() {
        let settings = ConverterSettings {
            json_output: true,
            ..ConverterSettings::default()
        };

        let cli = Cli::try_parse_from(["lunar_cli", "solar", "2024-02-10", "--text"]).unwrap();
        assert!(!Output::new(&cli, &settings).json);

        let cli = Cli::try_parse_from(["lunar_cli", "solar", "2024-02-10"]).unwrap();
        assert!(Output::new(&cli, &settings).json);

        assert!(Cli::try_parse_from(["lunar_cli", "--json", "--text"]).is_err());
    }

    #[test]
    fn test_run_rejects_out_of_range() {
        let output = Output {
            locale: Locale::English,
            json: true,
            include_solar_festivals: true,
        };
        let err = run(Some(Commands::Terms { year: 2200 }), &output).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        let err = run(Some(Commands::Year { year: 1899 }), &output).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LUNAR_DATE");
    }
}
