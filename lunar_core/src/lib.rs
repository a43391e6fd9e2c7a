//! # lunar_core - Chinese Lunisolar Calendar Engine
//!
//! `lunar_core` converts dates between the Gregorian calendar and the
//! traditional Chinese lunisolar calendar for 1900-01-31 to 2100-12-31, and
//! derives the facts usually shown next to a converted date: zodiac animal,
//! Gan-Zhi pillars, solar term and festivals. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Read-only tables**: Reference data is decoded once and shared
//!
//! ## Quick Start
//!
//! ```rust
//! use lunar_core::{solar_to_lunar, lunar_to_solar, derive_metadata, SolarDate};
//!
//! let solar = SolarDate::new(2024, 9, 17).unwrap();
//! let lunar = solar_to_lunar(&solar).unwrap();
//! assert_eq!((lunar.month, lunar.day), (8, 15));
//! assert_eq!(lunar_to_solar(&lunar).unwrap(), solar);
//!
//! let meta = derive_metadata(&solar, &lunar);
//! println!("{}", meta.zodiac.display_name());
//! ```
//!
//! ## Modules
//!
//! - [`converter`] - Solar/lunar conversion and the `calculate` interface
//! - [`metadata`] - Zodiac, Gan-Zhi, solar term and festival for a date
//! - [`table`] - Lunar year table (month lengths, leap months)
//! - [`solar_terms`] - The 24 solar terms
//! - [`ganzhi`] - Heavenly Stems, Earthly Branches, zodiac animals
//! - [`festivals`] - Lunar festivals and Gregorian holidays
//! - [`fmt`] - Traditional month and day names
//! - [`dates`] - Date value types
//! - [`settings`] - Front-end preferences with atomic saves
//! - [`errors`] - Structured error types

pub mod converter;
pub mod dates;
pub mod errors;
pub mod festivals;
pub mod fmt;
pub mod ganzhi;
pub mod metadata;
pub mod settings;
pub mod solar_terms;
pub mod table;

// Re-export commonly used types at crate root for convenience
pub use converter::{calculate, lunar_to_solar, months_of, solar_to_lunar, ConversionDirection, ConversionInput, ConversionResult};
pub use dates::{LunarDate, SolarDate};
pub use errors::{CalendarError, CalendarResult};
pub use metadata::{derive_metadata, DateMetadata};
pub use settings::{ConverterSettings, Locale};
pub use solar_terms::{solar_terms_of, term_date, SolarTerm};
