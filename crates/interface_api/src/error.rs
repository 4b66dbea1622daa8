//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_assessment::{AssessmentError, ErrorKind};

pub const QUERY_REQUIRED: &str = "Query is required";
pub const CONFIGURATION_MISSING: &str =
    "Completion service API key is not configured. Set OPENAI_API_KEY in the environment or a .env file.";
pub const INVALID_API_KEY: &str =
    "Invalid completion service API key. Please check your API key configuration.";
pub const QUOTA_EXCEEDED: &str =
    "Completion service quota exceeded. Please check your usage limits.";
pub const PROCESSING_FAILED: &str = "Failed to process insurance query";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Completion service API key is not configured")]
    ConfigurationMissing,

    #[error("Completion service rejected the API key")]
    Unauthorized,

    #[error("Completion service quota exceeded")]
    QuotaExceeded,

    /// Detail is logged, never returned to the client
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ConfigurationMissing | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::ConfigurationMissing => CONFIGURATION_MISSING.to_string(),
            ApiError::Unauthorized => INVALID_API_KEY.to_string(),
            ApiError::QuotaExceeded => QUOTA_EXCEEDED.to_string(),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Insurance query failed");
                PROCESSING_FAILED.to_string()
            }
        };

        (self.status(), Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err.kind() {
            ErrorKind::ConfigurationMissing => ApiError::ConfigurationMissing,
            ErrorKind::InvalidQuery => ApiError::BadRequest(QUERY_REQUIRED.to_string()),
            ErrorKind::Unauthorized => ApiError::Unauthorized,
            ErrorKind::QuotaExceeded => ApiError::QuotaExceeded,
            ErrorKind::MalformedUpstreamResponse | ErrorKind::Unknown => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::CompletionError;
    use domain_assessment::Stage;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AssessmentError::ConfigurationMissing, StatusCode::INTERNAL_SERVER_ERROR),
            (AssessmentError::EmptyQuery, StatusCode::BAD_REQUEST),
            (
                AssessmentError::upstream(
                    Stage::Interpret,
                    CompletionError::classify(Some(401), None, "Incorrect API key provided"),
                ),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AssessmentError::upstream(
                    Stage::Retrieve,
                    CompletionError::classify(Some(429), Some("insufficient_quota"), "quota"),
                ),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AssessmentError::malformed(Stage::Evaluate, "missing justification"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AssessmentError::upstream(Stage::Evaluate, CompletionError::unknown("reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_empty_query_message() {
        match ApiError::from(AssessmentError::EmptyQuery) {
            ApiError::BadRequest(msg) => assert_eq!(msg, QUERY_REQUIRED),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
