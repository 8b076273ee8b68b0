use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::geocoding::{GeocodeError, GeocodingPort};
use crate::store::models::{Coordinates, Location};

/// Geocoding adapter for a Nominatim-compatible search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: String,
}

impl NominatimClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("teampool-be")
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: i64,
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
}

#[async_trait]
impl GeocodingPort for NominatimClient {
    async fn resolve(&self, query: &str) -> Result<Location, GeocodeError> {
        let mut url = Url::parse(&format!("{}/search", self.endpoint))
            .map_err(|err| GeocodeError::Rejected(format!("failed to build URL: {}", err)))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::Rejected(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))?;

        let lat = place
            .lat
            .parse::<f64>()
            .map_err(|_| GeocodeError::Rejected(format!("bad latitude: {}", place.lat)))?;
        let lng = place
            .lon
            .parse::<f64>()
            .map_err(|_| GeocodeError::Rejected(format!("bad longitude: {}", place.lon)))?;

        Ok(Location {
            name: place.name.unwrap_or_else(|| query.to_string()),
            address: Some(place.display_name),
            coordinates: Some(Coordinates { lat, lng }),
            place_id: Some(place.place_id.to_string()),
        })
    }
}
