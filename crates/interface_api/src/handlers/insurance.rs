//! Insurance query handler

use axum::{body::Bytes, extract::State, Json};
use tracing::debug;
use validator::Validate;

use crate::dto::{AssessmentEnvelope, InsuranceQueryRequest};
use crate::error::{ApiError, QUERY_REQUIRED};
use crate::AppState;

/// Assesses a free-form insurance query
///
/// The credential is checked before the body, so an unconfigured server
/// answers 500 whatever the request contains. The body is read as JSON
/// whatever its `Content-Type`; an unreadable body is treated like a
/// missing query.
pub async fn assess_query(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AssessmentEnvelope>, ApiError> {
    if !state.pipeline.is_configured() {
        return Err(ApiError::ConfigurationMissing);
    }

    let request: InsuranceQueryRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Unreadable insurance query body");
        ApiError::BadRequest(QUERY_REQUIRED.to_string())
    })?;

    request
        .validate()
        .map_err(|_| ApiError::BadRequest(QUERY_REQUIRED.to_string()))?;

    let query = request.query.unwrap_or_default();
    let assessment = state.pipeline.assess(&query).await?;

    Ok(Json(AssessmentEnvelope::success(assessment)))
}
