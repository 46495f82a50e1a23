//! Geocoding client for resolving place names to coordinates
//!
//! Integrates with a Nominatim-compatible search endpoint. The first match is
//! authoritative. Every failure mode (network error, timeout, non-2xx status,
//! unparseable body, empty result list) resolves to "not found" rather than an
//! error, so a flaky lookup can never abort a session.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::GeocoderConfig;
use shared::Coordinate;

/// Geocoding API client
#[derive(Clone)]
pub struct GeocoderClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

/// A single Nominatim search result
///
/// Latitude and longitude arrive as decimal-degree strings.
#[derive(Debug, Deserialize)]
struct NominatimMatch {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl GeocoderClient {
    /// Create a new GeocoderClient from configuration
    pub fn new(config: &GeocoderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Create a new GeocoderClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
        }
    }

    /// Resolve a free-text place name (Kannada or English) to coordinates
    ///
    /// One outbound request per call; no retry, no caching. Returns `None`
    /// when the lookup fails or yields no match.
    pub async fn resolve(&self, location_name: &str) -> Option<Coordinate> {
        let url = format!("{}/search", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[
                ("q", location_name),
                ("format", "json"),
                ("limit", "1"),
            ])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Geocoder request failed for {:?}: {}", location_name, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Geocoder returned status {} for {:?}",
                response.status(),
                location_name
            );
            return None;
        }

        let matches: Vec<NominatimMatch> = match response.json().await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Failed to parse geocoder response: {}", e);
                return None;
            }
        };

        let first = matches.first()?;
        let latitude = first.lat.parse::<f64>().ok()?;
        let longitude = first.lon.parse::<f64>().ok()?;

        tracing::debug!(
            "Resolved {:?} to ({}, {}) [{}]",
            location_name,
            latitude,
            longitude,
            first.display_name.as_deref().unwrap_or("unnamed")
        );

        Some(Coordinate::new(latitude, longitude))
    }
}
