use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{Location, SkyError};

use super::{Deadline, Geocoder, OpenMeteo};

/// Every field is optional: records with missing or null fields decode to zero values.
#[derive(Debug, Default, Deserialize)]
struct GeoResponse {
    results: Option<Vec<Option<GeoResult>>>,
}

#[derive(Debug, Default, Deserialize)]
struct GeoResult {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    country_code: Option<String>,
}

impl GeoResponse {
    /// Take the first result in provider order.
    fn into_location(self) -> Result<Location, SkyError> {
        let first = self
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(SkyError::NotFound)?
            .unwrap_or_default();

        Ok(Location {
            name: first.name.unwrap_or_default(),
            latitude: first.latitude.unwrap_or_default(),
            longitude: first.longitude.unwrap_or_default(),
            country: first.country_code.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    #[instrument(skip(self, deadline))]
    async fn resolve_location(&self, city: &str, deadline: Deadline) -> Result<Location, SkyError> {
        debug!("geocoding via {}", self.geocoding_url);

        let request = self.http.get(&self.geocoding_url).query(&[
            ("name", city),
            ("count", "1"),
            ("language", self.language.as_str()),
            ("format", "json"),
        ]);

        let parsed: GeoResponse = self.get_json(request, "fetch location", deadline).await?;

        parsed.into_location().inspect_err(|e| {
            if matches!(e, SkyError::NotFound) {
                warn!("no geocoding results for '{city}'");
            }
        })
    }
}
