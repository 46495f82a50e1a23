//! Error handling for the Bhoomi Field Analysis Platform
//!
//! Provides consistent error responses in English and Kannada

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use shared::SessionError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    // Lookup errors
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Session not found")]
    SessionNotFound,

    // Workflow errors
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidLocation(msg) | SessionError::InvalidCoordinate(msg) => {
                AppError::ValidationError(msg.to_string())
            }
            other => AppError::InvalidStateTransition(other.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_kn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_kn: format!("ತಪ್ಪಾದ ಮಾಹಿತಿ: {}", msg),
                    field: None,
                },
            ),
            AppError::LocationNotFound(location) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "LOCATION_NOT_FOUND".to_string(),
                    message_en: format!(
                        "Could not find coordinates for \"{}\". Please try another name.",
                        location
                    ),
                    message_kn: format!(
                        "\"{}\" ಸ್ಥಳದ ನಿರ್ದೇಶಾಂಕಗಳು ಸಿಗಲಿಲ್ಲ. ದಯವಿಟ್ಟು ಬೇರೆ ಹೆಸರು ಪ್ರಯತ್ನಿಸಿ.",
                        location
                    ),
                    field: Some("location".to_string()),
                },
            ),
            AppError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "SESSION_NOT_FOUND".to_string(),
                    message_en: "Analysis session not found".to_string(),
                    message_kn: "ವಿಶ್ಲೇಷಣಾ ಸೆಷನ್ ಕಂಡುಬಂದಿಲ್ಲ".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidStateTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_STATE_TRANSITION".to_string(),
                    message_en: msg.clone(),
                    message_kn: format!("ಈ ಹಂತದಲ್ಲಿ ಆ ಕ್ರಿಯೆ ಸಾಧ್ಯವಿಲ್ಲ: {}", msg),
                    field: None,
                },
            ),
            AppError::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "EXTERNAL_SERVICE_ERROR".to_string(),
                    message_en: format!("External service error: {}", msg),
                    message_kn: format!("ಬಾಹ್ಯ ಸೇವೆಯಲ್ಲಿ ದೋಷ: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_kn: format!("ಸಂರಚನೆಯಲ್ಲಿ ದೋಷ: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_kn: "ಆಂತರಿಕ ಸರ್ವರ್ ದೋಷ ಸಂಭವಿಸಿದೆ".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_kn: "ಆಂತರಿಕ ಸರ್ವರ್ ದೋಷ ಸಂಭವಿಸಿದೆ".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
