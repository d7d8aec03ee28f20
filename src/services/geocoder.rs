use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::Coordinates;

/// Errors that can occur when resolving a place name to coordinates
///
/// `NotFound` is an expected outcome, not a fault: callers map it to an
/// empty ranking. Transport errors propagate; retry policy belongs to the
/// caller.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("location not found: {0}")]
    NotFound(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// One result row from the Nominatim search API
///
/// Nominatim serializes coordinates as JSON strings.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Nominatim geocoding client
///
/// Resolves free-text place names ("Toronto", "219 Dundas Street E") to
/// coordinates. An optional country bias is appended to every query to keep
/// ambiguous city names inside the catalog's market.
pub struct NominatimGeocoder {
    base_url: String,
    country_bias: Option<String>,
    client: Client,
}

impl NominatimGeocoder {
    pub fn new(
        base_url: String,
        country_bias: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            country_bias,
            client,
        }
    }

    /// Build a geocoder from loaded configuration
    pub fn from_settings(settings: &crate::config::GeocoderSettings) -> Self {
        Self::new(
            settings.endpoint.clone(),
            settings.country_bias.clone(),
            settings.timeout_secs,
            &settings.user_agent,
        )
    }

    /// Resolve a place name to coordinates
    pub async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError> {
        let query = match &self.country_bias {
            Some(bias) => format!("{}, {}", place, bias),
            None => place.to_string(),
        };

        let results: Vec<NominatimResult> = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "0"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(first) = results.first() else {
            tracing::warn!("Address coordinates not found: {}", place);
            return Err(GeocodeError::NotFound(place.to_string()));
        };

        let latitude = parse_coordinate("lat", &first.lat)?;
        let longitude = parse_coordinate("lon", &first.lon)?;

        tracing::info!(
            "Resolved center coordinates: {} -> ({}, {})",
            place,
            latitude,
            longitude
        );

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

fn parse_coordinate(field: &str, value: &str) -> Result<f64, GeocodeError> {
    value
        .parse::<f64>()
        .map_err(|e| GeocodeError::InvalidResponse(format!("{} '{}': {}", field, value, e)))
}
