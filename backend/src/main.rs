//! Bhoomi Field Analysis Platform - Backend Server
//!
//! A bilingual (English/Kannada) satellite field analysis service: geocodes a
//! place name, queries pre-computed Earth-observation layers, and classifies
//! soil and water conditions into crop, irrigation and fishery
//! recommendations through a four-step wizard.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{EarthEngineClient, GeocoderClient};
use services::{SessionService, SoilAnalysisService, WaterAnalysisService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionService,
    pub soil: SoilAnalysisService,
    pub water: WaterAnalysisService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bhoomi_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Bhoomi Field Analysis Server");
    tracing::info!("Environment: {}", config.environment);

    // Initialize the Earth-observation client; credential failure is fatal
    // and halts the server before any session can start.
    let earth_engine = EarthEngineClient::initialize(&config.earth_engine)
        .await
        .map_err(|e| anyhow::anyhow!("Earth Engine initialization failed: {}", e))?;
    tracing::info!("Earth Engine client ready");

    let geocoder = GeocoderClient::new(&config.geocoder);

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        sessions: SessionService::new(geocoder),
        soil: SoilAnalysisService::new(earth_engine.clone()),
        water: WaterAnalysisService::new(earth_engine),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Bhoomi Field Analysis Platform API v1.0"
}
