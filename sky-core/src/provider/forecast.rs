use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{SkyError, Weather, weather_code};

use super::{Deadline, OpenMeteo, WeatherProvider};

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,windspeed_10m,weather_code";

/// `current.time` is local time without seconds, e.g. "2024-01-15T14:30".
const OBSERVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    current: Option<Current>,
}

#[derive(Debug, Default, Deserialize)]
struct Current {
    time: Option<String>,
    temperature_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    windspeed_10m: Option<f64>,
    weather_code: Option<i32>,
}

impl From<ForecastResponse> for Weather {
    fn from(response: ForecastResponse) -> Self {
        let current = response.current.unwrap_or_default();
        let code = current.weather_code.unwrap_or_default();

        Weather {
            temperature: current.temperature_2m.unwrap_or_default(),
            apparent_temperature: current.apparent_temperature.unwrap_or_default(),
            wind_speed: current.windspeed_10m.unwrap_or_default(),
            weather_code: code,
            description: weather_code::describe(code).to_string(),
            observed_at: current
                .time
                .and_then(|t| NaiveDateTime::parse_from_str(&t, OBSERVED_AT_FORMAT).ok()),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteo {
    #[instrument(skip(self, deadline))]
    async fn fetch_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        deadline: Deadline,
    ) -> Result<Weather, SkyError> {
        let latitude = format!("{latitude:.4}");
        let longitude = format!("{longitude:.4}");
        debug!("fetching current weather via {}", self.forecast_url);

        let request = self.http.get(&self.forecast_url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", CURRENT_FIELDS),
            ("temperature_unit", "celsius"),
            ("windspeed_unit", "kmh"),
            ("timezone", "auto"),
        ]);

        let parsed: ForecastResponse = self.get_json(request, "fetch weather", deadline).await?;
        Ok(parsed.into())
    }
}
