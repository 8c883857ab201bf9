//! HTTP request handlers for the app-builder service.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::ApiError;
use crate::archive::ProjectArchive;
use crate::extract::FileExtractor;
use crate::llm::{app_builder_messages, CompletionBackend, CompletionRequest};
use crate::types::{AppConfig, GenerateAppRequest, GenerateAppResponse, PackageRequest};

/// Name used when the caller does not provide one.
const DEFAULT_PROJECT_NAME: &str = "generated-app";

/// Application state shared across handlers.
///
/// The completion backend and accepted API tokens are injected here rather
/// than living in module-level globals, so every dependency is visible at
/// construction and swappable in tests.
pub struct AppState {
    pub backend: Arc<dyn CompletionBackend>,
    pub extractor: FileExtractor,
    pub config: AppConfig,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Generate a project from a natural-language prompt.
///
/// A successful upstream call always answers 200: when the completion
/// contains no recognizable file blocks the response carries `fileCount: 0`
/// and the raw text, so the caller can inspect what the model actually said.
pub async fn generate_app(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateAppRequest>,
) -> Result<Json<GenerateAppResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("prompt must not be empty".to_string()));
    }

    let model = request
        .model
        .clone()
        .unwrap_or_else(|| state.config.model.clone());
    let project_name = request
        .project_name
        .clone()
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

    info!(model = %model, project = %project_name, "Received app generation request");

    let completion = CompletionRequest {
        model: model.clone(),
        messages: app_builder_messages(&request.prompt, request.project_name.as_deref()),
        max_tokens: state.config.max_completion_tokens,
    };

    let raw = state
        .backend
        .complete(&completion)
        .await
        .map_err(ApiError::Upstream)?;

    let files = state.extractor.extract(&raw);
    let file_count = files.len();

    info!(files = file_count, chars = raw.len(), "Extracted files from completion");

    Ok(Json(GenerateAppResponse {
        project_id: Uuid::new_v4(),
        project_name,
        model,
        files,
        file_count,
        raw,
        generated_at: Utc::now(),
    }))
}

/// Package submitted files into a downloadable archive.
///
/// The caller resubmits the records it got from the generate endpoint; the
/// service keeps no state between the two requests.
pub async fn package_app(
    State(_state): State<Arc<AppState>>,
    Json(request): Json<PackageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = request
        .project_name
        .as_deref()
        .map(archive_file_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

    let archive = ProjectArchive::from_files(&request.files);

    info!(project = %name, entries = archive.len(), "Packaging project archive");

    let bytes = archive.into_tar_gz().map_err(ApiError::Packaging)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/gzip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.tar.gz\"", name),
            ),
        ],
        bytes,
    ))
}

/// Header-safe archive name derived from a project name.
fn archive_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
