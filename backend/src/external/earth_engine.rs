//! Earth-observation query service client
//!
//! Issues read-only reduceRegion queries against the Earth Engine REST API
//! and composes tile URLs for visualized raster layers. Authentication uses a
//! service-account key: an RS256-signed JWT is exchanged for a bearer token at
//! startup. Credential failure is the one fatal error in the system; every
//! per-query failure degrades to an absent observation instead.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::EarthEngineConfig;
use crate::error::{AppError, AppResult};
use shared::Coordinate;

/// OAuth scope for read-only Earth Engine access
const EARTH_ENGINE_SCOPE: &str = "https://www.googleapis.com/auth/earthengine.readonly";

/// Soil texture class raster (USDA texture taxonomy)
pub const SOIL_TEXTURE_DATASET: &str = "OpenLandMap/SOL/SOL_TEXTURE-CLASS_USDA-TT_M/v02";

/// MODIS land/water mask
pub const WATER_MASK_DATASET: &str = "MODIS/006/MOD44W";

/// ERA5-Land monthly aggregates (lake variables)
pub const LAKE_QUALITY_DATASET: &str = "ECMWF/ERA5_LAND/MONTHLY";

/// Sampling footprint radius for region-based observations, in metres
pub const BUFFER_RADIUS_M: f64 = 1000.0;

/// Aggregation operator applied by the query service over a geometry
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    Mode,
    Mean,
}

/// Query geometry: a point or a circular buffer around it
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Point { latitude: f64, longitude: f64 },
    BufferedPoint {
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    },
}

impl Geometry {
    pub fn point(coordinate: Coordinate) -> Self {
        Geometry::Point {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }

    pub fn buffered_point(coordinate: Coordinate, radius_meters: f64) -> Self {
        Geometry::BufferedPoint {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            radius_meters,
        }
    }
}

/// A reduceRegion query
#[derive(Debug, Clone, Serialize)]
pub struct ReduceRegionRequest {
    pub dataset: String,
    pub bands: Vec<String>,
    pub reducer: Reducer,
    pub geometry: Geometry,
    pub scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pixels: Option<f64>,
}

/// Response from a reduceRegion query
///
/// Fields with no valid pixels are simply absent from the map.
#[derive(Debug, Deserialize)]
struct ReduceRegionResponse {
    #[serde(default)]
    values: HashMap<String, f64>,
}

/// Visualization parameters for a map-tile layer
#[derive(Debug, Clone, Serialize)]
pub struct VisParams {
    pub min: f64,
    pub max: f64,
    pub palette: Vec<String>,
}

/// Mean lake observations over the buffered region
#[derive(Debug, Clone, Copy, Default)]
pub struct LakeQuality {
    pub temperature_k: Option<f64>,
    pub mix_layer_depth_m: Option<f64>,
}

/// Service-account key file contents
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

/// Claims for the service-account token exchange
#[derive(Debug, Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Earth-observation API client
#[derive(Clone)]
pub struct EarthEngineClient {
    client: Client,
    api_endpoint: String,
    project: String,
    access_token: String,
}

impl EarthEngineClient {
    /// Initialize the client, performing the credential exchange
    ///
    /// Fatal on failure: the server refuses to start without a valid token.
    pub async fn initialize(config: &EarthEngineConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client init failed: {}", e)))?;

        let key_json = std::fs::read_to_string(&config.credentials_path).map_err(|e| {
            AppError::Configuration(format!(
                "Cannot read service-account key {}: {}",
                config.credentials_path, e
            ))
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&key_json)
            .map_err(|e| AppError::Configuration(format!("Invalid service-account key: {}", e)))?;

        let access_token = Self::exchange_token(&client, &key).await?;
        tracing::info!("Earth Engine credentials initialized for {}", key.client_email);

        Ok(Self {
            client,
            api_endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            access_token,
        })
    }

    /// Create a client with a pre-issued token (for testing)
    pub fn with_token(api_endpoint: String, project: String, access_token: String) -> Self {
        Self {
            client: Client::new(),
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            project,
            access_token,
        }
    }

    /// Sign a JWT with the service-account key and trade it for a bearer token
    async fn exchange_token(client: &Client, key: &ServiceAccountKey) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            iss: &key.client_email,
            scope: EARTH_ENGINE_SCOPE,
            aud: &key.token_uri,
            iat: now,
            exp: now + 3600,
        };

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AppError::Configuration(format!("Invalid private key: {}", e)))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| AppError::Configuration(format!("JWT signing failed: {}", e)))?;

        let response = client
            .post(&key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Configuration(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Configuration(format!(
                "Token endpoint error: {} - {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Configuration(format!("Invalid token response: {}", e)))?;

        Ok(token.access_token)
    }

    /// Run a reduceRegion query and return the per-band scalar values
    pub async fn reduce_region(
        &self,
        request: &ReduceRegionRequest,
    ) -> AppResult<HashMap<String, f64>> {
        let url = format!(
            "{}/v1/projects/{}/value:reduceRegion",
            self.api_endpoint, self.project
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("reduceRegion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "reduceRegion error: {} - {}",
                status, body
            )));
        }

        let data: ReduceRegionResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse reduceRegion response: {}", e))
        })?;

        Ok(data.values)
    }

    /// Dominant soil texture class code at the point (mode over 250 m pixels)
    ///
    /// Absent on any failure; the classifier treats that as Unknown.
    pub async fn soil_texture_class(&self, coordinate: Coordinate) -> Option<f64> {
        let request = ReduceRegionRequest {
            dataset: SOIL_TEXTURE_DATASET.to_string(),
            bands: vec!["b0".to_string()],
            reducer: Reducer::Mode,
            geometry: Geometry::point(coordinate),
            scale: 250.0,
            max_pixels: None,
        };

        match self.reduce_region(&request).await {
            Ok(values) => values.get("b0").copied(),
            Err(e) => {
                tracing::warn!("Soil texture query failed: {}", e);
                None
            }
        }
    }

    /// Mean water-mask fraction over the buffered region
    pub async fn water_mask_fraction(&self, coordinate: Coordinate) -> Option<f64> {
        let request = ReduceRegionRequest {
            dataset: WATER_MASK_DATASET.to_string(),
            bands: vec!["water_mask".to_string()],
            reducer: Reducer::Mean,
            geometry: Geometry::buffered_point(coordinate, BUFFER_RADIUS_M),
            scale: 250.0,
            max_pixels: None,
        };

        match self.reduce_region(&request).await {
            Ok(values) => values.get("water_mask").copied(),
            Err(e) => {
                tracing::warn!("Water mask query failed: {}", e);
                None
            }
        }
    }

    /// Mean lake temperature and mix-layer depth over the buffered region
    pub async fn lake_quality(&self, coordinate: Coordinate) -> LakeQuality {
        let request = ReduceRegionRequest {
            dataset: LAKE_QUALITY_DATASET.to_string(),
            bands: vec![
                "lake_total_layer_temperature".to_string(),
                "lake_mix_layer_depth".to_string(),
            ],
            reducer: Reducer::Mean,
            geometry: Geometry::buffered_point(coordinate, BUFFER_RADIUS_M),
            scale: 500.0,
            max_pixels: Some(1e13),
        };

        match self.reduce_region(&request).await {
            Ok(values) => LakeQuality {
                temperature_k: values.get("lake_total_layer_temperature").copied(),
                mix_layer_depth_m: values.get("lake_mix_layer_depth").copied(),
            },
            Err(e) => {
                tracing::warn!("Lake quality query failed: {}", e);
                LakeQuality::default()
            }
        }
    }

    /// Compose the tile URL template for a visualized raster layer
    ///
    /// Pure mapping from (layer, visualization parameters) to a URL; the map
    /// widget on the presentation side fetches the tiles itself.
    pub fn map_tile_url(&self, layer: &str, vis: &VisParams) -> String {
        let palette = vis.palette.join(",");
        format!(
            "{}/v1/projects/{}/maps/{}/tiles/{{z}}/{{x}}/{{y}}?min={}&max={}&palette={}",
            self.api_endpoint, self.project, layer, vis.min, vis.max, palette
        )
    }
}
