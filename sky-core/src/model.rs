use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::SkyError;

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// ISO 3166-1 alpha-2 country code, e.g. "JP".
    pub country: String,
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Air temperature at 2m, °C.
    pub temperature: f64,
    /// Feels-like temperature, °C.
    pub apparent_temperature: f64,
    /// Wind speed at 10m, km/h.
    pub wind_speed: f64,
    pub weather_code: i32,
    pub description: String,
    /// Local time of the observation at the location, if the provider sent one.
    pub observed_at: Option<NaiveDateTime>,
}

/// Result of a full name → location → weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub location: Location,
    pub weather: Weather,
}

/// Trim surrounding whitespace from user input, rejecting names that end up empty.
///
/// Internal runs of whitespace are kept as typed.
pub fn parse_city_name(raw: &str) -> Result<String, SkyError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SkyError::EmptyCityName);
    }
    Ok(name.to_string())
}
