//! HTTP API surface.

pub mod auth;
pub mod handlers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by API handlers.
///
/// Extraction itself never fails; these cover the request surface around it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request is missing a valid bearer token
    #[error("missing or invalid API token")]
    Unauthorized,

    /// The request body cannot be served
    #[error("{0}")]
    BadRequest(String),

    /// The chat-completion upstream failed
    #[error("completion upstream failed: {0}")]
    Upstream(anyhow::Error),

    /// Archive assembly failed
    #[error("failed to package project: {0}")]
    Packaging(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Packaging(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::BadRequest("nope".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Upstream(anyhow::anyhow!("boom")).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
