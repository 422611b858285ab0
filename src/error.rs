//! Domain-specific error types for coursecraft

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the content analyzer
#[derive(Error, Debug)]
pub enum CourseCraftError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Analysis error: {message}")]
    Analysis { message: String },
}

/// Generic label reported for every failed analysis
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// Failure envelope returned to HTTP callers.
///
/// The `error` field is always the generic label; `message` carries the
/// underlying fault description.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisFailure {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl AnalysisFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ANALYSIS_FAILED.to_string(),
            message: message.into(),
        }
    }
}

/// Convert CourseCraftError to the failure envelope
impl From<CourseCraftError> for AnalysisFailure {
    fn from(err: CourseCraftError) -> Self {
        AnalysisFailure::new(err.to_string())
    }
}

impl IntoResponse for AnalysisFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

impl IntoResponse for CourseCraftError {
    fn into_response(self) -> Response {
        AnalysisFailure::from(self).into_response()
    }
}

/// Result type alias for coursecraft operations
pub type Result<T> = std::result::Result<T, CourseCraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_carries_fault_message() {
        let err = CourseCraftError::Validation {
            message: "content must be a string".to_string(),
        };
        let failure = AnalysisFailure::from(err);
        assert!(!failure.success);
        assert_eq!(failure.error, "Analysis failed");
        assert_eq!(
            failure.message,
            "Validation error: content must be a string"
        );
    }

    #[test]
    fn error_response_is_internal_server_error() {
        let resp = CourseCraftError::Analysis {
            message: "question set has 0 entries".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
