//! HTTP API Layer
//!
//! Serves the insurance query pipeline over HTTP using Axum.
//!
//! # Routes
//!
//! - `POST /api/insurance`: assess a free-form query
//! - `GET /health`: liveness
//! - `GET /health/ready`: 503 until a usable completion key is configured
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pipeline);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_assessment::AssessmentPipeline;

use crate::handlers::{health, insurance};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AssessmentPipeline>,
}

/// Creates the main API router
pub fn create_router(pipeline: Arc<AssessmentPipeline>) -> Router {
    let state = AppState { pipeline };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/insurance", post(insurance::assess_query))
        .layer(axum_middleware::from_fn(audit_middleware));

    // Request ids are assigned outermost so tracing and audit both see them
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
