//! Plain-text rendering of lookup results and errors.

use std::fmt::Display;

use crate::{Location, Weather, weather_code};

/// Render the four-line weather summary, ending with a newline.
pub fn render_weather_report(location: &Location, weather: &Weather) -> String {
    format!(
        "{}, {}\n{} {}\nTemp: {:.1}°C\nFeels like: {:.1}°C\n",
        location.name,
        location.country,
        weather.description,
        weather_code::emoji(weather.weather_code),
        weather.temperature,
        weather.apparent_temperature,
    )
}

/// Render an error as a single `Error: ...` line.
pub fn render_error<E: Display + ?Sized>(err: &E) -> String {
    format!("Error: {err}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkyError;

    fn tokyo() -> Location {
        Location { name: "Tokyo".into(), latitude: 35.6762, longitude: 139.6503, country: "JP".into() }
    }

    fn weather(temperature: f64, apparent_temperature: f64, code: i32) -> Weather {
        Weather {
            temperature,
            apparent_temperature,
            wind_speed: 10.5,
            weather_code: code,
            description: weather_code::describe(code).to_string(),
            observed_at: None,
        }
    }

    #[test]
    fn renders_report_block() {
        let out = render_weather_report(&tokyo(), &weather(15.5, 14.2, 0));
        assert_eq!(out, "Tokyo, JP\nClear ☀️\nTemp: 15.5°C\nFeels like: 14.2°C\n");
    }

    #[test]
    fn negative_temperatures_keep_sign() {
        let out = render_weather_report(&tokyo(), &weather(-15.3, -22.1, 65));

        assert!(out.contains("Heavy rain 🌧️\n"));
        assert!(out.contains("Temp: -15.3°C\n"));
        assert!(out.contains("Feels like: -22.1°C\n"));
    }

    #[test]
    fn rounds_to_one_decimal() {
        let out = render_weather_report(&tokyo(), &weather(20.0, 19.96, 2));

        assert!(out.contains("Temp: 20.0°C\n"));
        assert!(out.contains("Feels like: 20.0°C\n"));
    }

    #[test]
    fn unknown_code_uses_fallbacks() {
        let out = render_weather_report(&tokyo(), &weather(1.0, 1.0, 42));
        assert_eq!(out.lines().nth(1), Some("Unknown 🌡️"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let (location, weather) = (tokyo(), weather(3.4, 1.2, 71));
        assert_eq!(
            render_weather_report(&location, &weather),
            render_weather_report(&location, &weather)
        );
    }

    #[test]
    fn renders_error_line() {
        assert_eq!(render_error(&SkyError::NotFound), "Error: location not found\n");
        assert_eq!(render_error("city name cannot be empty"), "Error: city name cannot be empty\n");
    }
}
