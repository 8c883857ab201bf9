//! Bearer-token authentication.
//!
//! Accepted tokens live in the injected [`AppState`] configuration rather
//! than a process-global set, so each service instance (and each test)
//! carries its own. An empty configured set disables the check, which keeps
//! local development one command.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use super::handlers::AppState;
use super::ApiError;

/// Middleware that requires a configured bearer token on every request.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.config.api_tokens.is_empty() {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if state.config.api_tokens.contains(token) => Ok(next.run(request).await),
        _ => {
            warn!(path = %request.uri().path(), "Rejected request without valid API token");
            Err(ApiError::Unauthorized)
        }
    }
}
