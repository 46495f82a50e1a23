//! Route definitions for the Bhoomi Field Analysis Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Analysis sessions (the four-step wizard)
        .nest("/sessions", session_routes())
}

/// Analysis session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_session))
        .route("/:session_id", get(handlers::get_session))
        // Step 1 -> 2: collect the location text
        .route("/:session_id/location", post(handlers::submit_location))
        // Step 2 -> 3: geocode and confirm
        .route(
            "/:session_id/confirm-location",
            post(handlers::confirm_location),
        )
        // Step 3 -> 4: move on to water analysis
        .route("/:session_id/advance", post(handlers::advance_session))
        // Per-step read views, recomputed on every request
        .route("/:session_id/soil", get(handlers::get_soil_analysis))
        .route("/:session_id/water", get(handlers::get_water_analysis))
        // Terminal reset back to step 1
        .route("/:session_id/reset", post(handlers::reset_session))
}
