//! HTTP handlers for the stepwise analysis wizard
//!
//! Each handler exposes one read view or one advancement action of the
//! session state machine; the map widget and page chrome live client-side.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::soil::SoilAnalysis;
use crate::AppState;
use shared::{Coordinate, Session, SessionStep, WaterReport};

/// Read view of a session, one per wizard step
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub step: SessionStep,
    pub step_number: u8,
    pub location: Option<String>,
    pub coordinate: Option<Coordinate>,
    /// The single action that advances this step
    pub next_action: &'static str,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            step: session.step,
            step_number: session.step.number(),
            location: session.location,
            coordinate: session.coordinate,
            next_action: session.step.next_action(),
        }
    }
}

/// Start a new analysis session
pub async fn create_session(State(state): State<AppState>) -> AppResult<Json<SessionView>> {
    let session = state.sessions.create().await;
    Ok(Json(session.into()))
}

/// Get the current session view
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session.into()))
}

/// Input for submitting the location text
#[derive(Debug, Deserialize)]
pub struct SubmitLocationInput {
    pub location: String,
}

/// Submit the free-text location (Kannada or English)
pub async fn submit_location(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<SubmitLocationInput>,
) -> AppResult<Json<SessionView>> {
    let session = state
        .sessions
        .submit_location(session_id, &input.location)
        .await?;
    Ok(Json(session.into()))
}

/// Geocode the submitted location and advance to soil analysis
pub async fn confirm_location(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let session = state.sessions.confirm_location(session_id).await?;
    Ok(Json(session.into()))
}

/// Advance from soil analysis to water analysis
pub async fn advance_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let session = state.sessions.advance_to_water(session_id).await?;
    Ok(Json(session.into()))
}

/// Reset the session back to location entry
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let session = state.sessions.reset(session_id).await?;
    Ok(Json(session.into()))
}

/// Soil classification and crop recommendations for the session location
pub async fn get_soil_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SoilAnalysis>> {
    let coordinate = state.sessions.soil_coordinate(session_id).await?;
    let analysis = state.soil.analyze(coordinate).await;
    Ok(Json(analysis))
}

/// Water body detection and lake quality for the session location
pub async fn get_water_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<WaterReport>> {
    let coordinate = state.sessions.water_coordinate(session_id).await?;
    let report = state.water.analyze(coordinate).await;
    Ok(Json(report))
}
