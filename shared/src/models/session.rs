//! Analysis session and its stepwise wizard state machine
//!
//! A session walks forward through four steps; the only backwards move is an
//! explicit reset. The coordinate is fixed once the location is confirmed and
//! every later query reuses it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::Coordinate;
use crate::validation::{validate_coordinate, validate_location_name};

/// Wizard step of an analysis session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SessionStep {
    AwaitLocation,
    AwaitConfirmation,
    SoilAndCrop,
    WaterAnalysis,
}

impl SessionStep {
    /// 1-based step number for display
    pub fn number(&self) -> u8 {
        match self {
            SessionStep::AwaitLocation => 1,
            SessionStep::AwaitConfirmation => 2,
            SessionStep::SoilAndCrop => 3,
            SessionStep::WaterAnalysis => 4,
        }
    }

    /// The single action that advances out of this step
    pub fn next_action(&self) -> &'static str {
        match self {
            SessionStep::AwaitLocation => "submit_location",
            SessionStep::AwaitConfirmation => "confirm_location",
            SessionStep::SoilAndCrop => "advance",
            SessionStep::WaterAnalysis => "reset",
        }
    }
}

/// Errors raised by invalid wizard transitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid location name: {0}")]
    InvalidLocation(&'static str),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),

    #[error("Action not allowed in step {step:?}: {action}")]
    WrongStep {
        step: SessionStep,
        action: &'static str,
    },

    #[error("Coordinate must be confirmed before analysis")]
    MissingCoordinate,
}

/// One interactive analysis session
///
/// Ephemeral; lives only in the in-memory session store and is never
/// persisted across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub step: SessionStep,
    pub location: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session at the location-entry step
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            step: SessionStep::AwaitLocation,
            location: None,
            coordinate: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Store the location text and move to confirmation
    pub fn submit_location(&mut self, location: &str) -> Result<(), SessionError> {
        if self.step != SessionStep::AwaitLocation {
            return Err(SessionError::WrongStep {
                step: self.step,
                action: "submit_location",
            });
        }
        validate_location_name(location).map_err(SessionError::InvalidLocation)?;
        self.location = Some(location.trim().to_string());
        self.step = SessionStep::AwaitConfirmation;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record the resolved coordinate and move to soil analysis
    ///
    /// Called only after the geocoder returned a match; a failed lookup
    /// leaves the session in `AwaitConfirmation`. The coordinate must fall
    /// within valid WGS84 ranges, so a malformed geocoder response cannot
    /// poison the session.
    pub fn confirm_location(&mut self, coordinate: Coordinate) -> Result<(), SessionError> {
        if self.step != SessionStep::AwaitConfirmation {
            return Err(SessionError::WrongStep {
                step: self.step,
                action: "confirm_location",
            });
        }
        validate_coordinate(&coordinate).map_err(SessionError::InvalidCoordinate)?;
        self.coordinate = Some(coordinate);
        self.step = SessionStep::SoilAndCrop;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move from soil analysis to water analysis
    pub fn advance_to_water_analysis(&mut self) -> Result<(), SessionError> {
        if self.step != SessionStep::SoilAndCrop {
            return Err(SessionError::WrongStep {
                step: self.step,
                action: "advance",
            });
        }
        if self.coordinate.is_none() {
            return Err(SessionError::MissingCoordinate);
        }
        self.step = SessionStep::WaterAnalysis;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reset back to location entry, clearing all collected state
    pub fn reset(&mut self) {
        self.step = SessionStep::AwaitLocation;
        self.location = None;
        self.coordinate = None;
        self.updated_at = Utc::now();
    }

    /// Coordinate for analysis steps, enforcing the confirmed-first invariant
    pub fn analysis_coordinate(&self) -> Result<Coordinate, SessionError> {
        self.coordinate.ok_or(SessionError::MissingCoordinate)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mysuru() -> Coordinate {
        Coordinate::new(12.2958, 76.6394)
    }

    #[test]
    fn happy_path_walks_all_four_steps() {
        let mut session = Session::new();
        assert_eq!(session.step, SessionStep::AwaitLocation);

        session.submit_location("Mysuru").unwrap();
        assert_eq!(session.step, SessionStep::AwaitConfirmation);
        assert_eq!(session.location.as_deref(), Some("Mysuru"));

        session.confirm_location(mysuru()).unwrap();
        assert_eq!(session.step, SessionStep::SoilAndCrop);
        assert_eq!(session.coordinate, Some(mysuru()));

        session.advance_to_water_analysis().unwrap();
        assert_eq!(session.step, SessionStep::WaterAnalysis);
    }

    #[test]
    fn blank_location_is_rejected_and_step_holds() {
        let mut session = Session::new();
        assert!(session.submit_location("   ").is_err());
        assert_eq!(session.step, SessionStep::AwaitLocation);
        assert!(session.location.is_none());
    }

    #[test]
    fn steps_cannot_be_skipped() {
        let mut session = Session::new();
        assert!(matches!(
            session.confirm_location(mysuru()),
            Err(SessionError::WrongStep { .. })
        ));
        assert!(matches!(
            session.advance_to_water_analysis(),
            Err(SessionError::WrongStep { .. })
        ));
        assert_eq!(session.step, SessionStep::AwaitLocation);
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let mut session = Session::new();
        session.submit_location("Mysuru").unwrap();
        let err = session
            .confirm_location(Coordinate::new(91.0, 76.6394))
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidCoordinate(_)));
        assert_eq!(session.step, SessionStep::AwaitConfirmation);
        assert!(session.coordinate.is_none());
    }

    #[test]
    fn reset_clears_location_and_coordinate() {
        let mut session = Session::new();
        session.submit_location("Mysuru").unwrap();
        session.confirm_location(mysuru()).unwrap();

        session.reset();
        assert_eq!(session.step, SessionStep::AwaitLocation);
        assert!(session.location.is_none());
        assert!(session.coordinate.is_none());
    }

    #[test]
    fn failed_lookup_leaves_session_in_confirmation() {
        let mut session = Session::new();
        session.submit_location("Atlantis").unwrap();
        // Geocoder found nothing, so confirm_location is never called;
        // the session simply stays where it is.
        assert_eq!(session.step, SessionStep::AwaitConfirmation);
        assert!(session.coordinate.is_none());
    }

    #[test]
    fn analysis_coordinate_requires_confirmation() {
        let session = Session::new();
        assert_eq!(
            session.analysis_coordinate(),
            Err(SessionError::MissingCoordinate)
        );
    }

    #[test]
    fn step_numbers_are_ordered() {
        assert!(SessionStep::AwaitLocation < SessionStep::AwaitConfirmation);
        assert!(SessionStep::AwaitConfirmation < SessionStep::SoilAndCrop);
        assert!(SessionStep::SoilAndCrop < SessionStep::WaterAnalysis);
    }
}
