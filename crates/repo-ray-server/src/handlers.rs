//! REST API handlers for the Repo-Ray server

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use repo_ray_core::{
    check_invariants, render_mermaid, transform, DataQualityIssue, Listing, TransformError,
    TransformStats,
};
use serde::Serialize;
use serde_json::Value;

use crate::ServerState;

/// Response structure for the visualize API
#[derive(Debug, Serialize)]
pub struct VisualizeResponse {
    pub diagram: String,
    pub status: &'static str,
    pub stats: TransformStats,
    pub issues: Vec<DataQualityIssue>,
}

/// Body of every 4xx response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// A listing the caller got wrong.
#[derive(Debug)]
pub struct ApiError(TransformError);

impl From<TransformError> for ApiError {
    fn from(err: TransformError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejecting listing: {}", self.0);
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Turn a listing into a diagram.
///
/// The body is either the raw listing (flat array or `{tree: [...]}`) or an envelope
/// `{"listing": ..., "name": "owner/repo"}` whose name labels the root node.
pub async fn visualize(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> Result<Json<VisualizeResponse>, ApiError> {
    let value: Value = serde_json::from_str(&body).map_err(TransformError::from)?;

    let mut config = state.transform.clone();
    let listing_value = match value {
        Value::Object(mut map) if map.contains_key("listing") => {
            if let Some(name) = map.get("name").and_then(Value::as_str) {
                config.root_label = name.to_string();
            }
            map.remove("listing").unwrap_or(Value::Null)
        }
        other => other,
    };

    let listing = Listing::from_value(listing_value)?;
    let result = transform(&listing, &config);

    let violations = check_invariants(&result, config.cap_for(listing.mode));
    if !violations.is_empty() {
        tracing::error!("Transform produced a malformed graph: {:?}", violations);
    }

    Ok(Json(VisualizeResponse {
        diagram: render_mermaid(&result, config.direction),
        status: "SUCCESS",
        stats: result.stats,
        issues: result.issues,
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}
