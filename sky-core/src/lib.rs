//! Core library for the `sky` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Open-Meteo geocoding and forecast clients behind small provider traits
//! - Shared domain models and the WMO weather-code tables
//! - Plain-text rendering of reports and errors
//!
//! It is used by `sky-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod weather_code;

pub use config::Config;
pub use error::SkyError;
pub use model::{Location, Report, Weather, parse_city_name};
pub use provider::{Deadline, Geocoder, OpenMeteo, WeatherProvider, lookup};
pub use report::{render_error, render_weather_report};
