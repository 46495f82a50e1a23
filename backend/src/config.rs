//! Configuration management for the Bhoomi Field Analysis Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with BHOOMI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Geocoding service configuration
    pub geocoder: GeocoderConfig,

    /// Earth-observation query service configuration
    pub earth_engine: EarthEngineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    /// Geocoding API endpoint (Nominatim-compatible)
    pub endpoint: String,

    /// User-Agent header sent with lookups, required by Nominatim
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EarthEngineConfig {
    /// Earth-observation REST API endpoint
    pub api_endpoint: String,

    /// Cloud project the queries are billed to
    pub project: String,

    /// Path to the service-account key JSON file
    pub credentials_path: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("BHOOMI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("geocoder.endpoint", "https://nominatim.openstreetmap.org")?
            .set_default("geocoder.user_agent", "bhoomi-field-analysis/0.1")?
            .set_default("geocoder.timeout_seconds", 10)?
            .set_default(
                "earth_engine.api_endpoint",
                "https://earthengine.googleapis.com",
            )?
            .set_default("earth_engine.timeout_seconds", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BHOOMI_ prefix)
            .add_source(
                Environment::with_prefix("BHOOMI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
