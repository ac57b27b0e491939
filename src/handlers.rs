// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the posting service.
//!
//! Each `POST` is one function invocation: the body is decoded, run through
//! [`PostingService::create_post`] and the outcome mapped to a JSON response.

use crate::error::PostError;
use crate::models::CreatePostRequest;
use crate::service::PostingService;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared application state.
pub struct AppState {
    pub service: PostingService,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/", post(create_post))
        .route("/posts", post(create_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "posting-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create a feed post.
///
/// Accepts the request object directly or wrapped as `{"body": "<json>"}`.
pub async fn create_post(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    debug!(len = body.len(), "Processing post invocation");

    let request = match CreatePostRequest::from_invocation(&body) {
        Ok(request) => request,
        Err(err) => return error_response(err),
    };

    match state.service.create_post(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: PostError) -> Response {
    (
        err.status_code(),
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.kind().code(),
        }),
    )
        .into_response()
}
