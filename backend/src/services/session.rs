//! Session service driving the stepwise analysis wizard
//!
//! Owns the in-memory session store and the geocoder. Sessions are ephemeral:
//! they live only for the process lifetime and are never persisted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::GeocoderClient;
use shared::{Coordinate, Session, SessionStep};

/// Session service managing wizard state
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    geocoder: GeocoderClient,
}

impl SessionService {
    /// Create a new SessionService with an empty store
    pub fn new(geocoder: GeocoderClient) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            geocoder,
        }
    }

    /// Start a fresh analysis session
    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        tracing::debug!("Created session {}", session.id);
        session
    }

    /// Fetch a session by id
    pub async fn get(&self, session_id: Uuid) -> AppResult<Session> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(AppError::SessionNotFound)
    }

    /// Store the location text and advance to confirmation
    pub async fn submit_location(&self, session_id: Uuid, location: &str) -> AppResult<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound)?;
        session.submit_location(location)?;
        Ok(session.clone())
    }

    /// Geocode the stored location and, on success, advance to soil analysis
    ///
    /// A failed lookup surfaces as LocationNotFound and leaves the session
    /// unchanged so the user can re-prompt with a different name.
    pub async fn confirm_location(&self, session_id: Uuid) -> AppResult<Session> {
        let (step, location) = {
            let sessions = self.sessions.read().await;
            let session = sessions.get(&session_id).ok_or(AppError::SessionNotFound)?;
            (session.step, session.location.clone())
        };

        if step != SessionStep::AwaitConfirmation {
            return Err(AppError::InvalidStateTransition(format!(
                "confirm_location is not allowed in step {:?}",
                step
            )));
        }
        let location = location.ok_or_else(|| {
            AppError::InvalidStateTransition("No location submitted yet".to_string())
        })?;

        // One lookup per confirmation; repeated attempts repeat the request.
        let coordinate = self
            .geocoder
            .resolve(&location)
            .await
            .ok_or(AppError::LocationNotFound(location.clone()))?;

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound)?;
        session.confirm_location(coordinate)?;
        tracing::info!(
            "Session {}: {:?} resolved to ({}, {})",
            session_id,
            location,
            coordinate.latitude,
            coordinate.longitude
        );
        Ok(session.clone())
    }

    /// Advance from soil analysis to water analysis
    pub async fn advance_to_water(&self, session_id: Uuid) -> AppResult<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound)?;
        session.advance_to_water_analysis()?;
        Ok(session.clone())
    }

    /// Reset the session back to location entry
    pub async fn reset(&self, session_id: Uuid) -> AppResult<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound)?;
        session.reset();
        Ok(session.clone())
    }

    /// Coordinate for the soil view; valid once soil analysis is reached
    pub async fn soil_coordinate(&self, session_id: Uuid) -> AppResult<Coordinate> {
        let session = self.get(session_id).await?;
        if session.step < SessionStep::SoilAndCrop {
            return Err(AppError::InvalidStateTransition(
                "Soil analysis is not available before the location is confirmed".to_string(),
            ));
        }
        Ok(session.analysis_coordinate()?)
    }

    /// Coordinate for the water view; valid only in the water analysis step
    pub async fn water_coordinate(&self, session_id: Uuid) -> AppResult<Coordinate> {
        let session = self.get(session_id).await?;
        if session.step != SessionStep::WaterAnalysis {
            return Err(AppError::InvalidStateTransition(
                "Water analysis is not available in the current step".to_string(),
            ));
        }
        Ok(session.analysis_coordinate()?)
    }
}
