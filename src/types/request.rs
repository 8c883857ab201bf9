//! Request/response definitions for the app-builder API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeneratedFile;

/// Request to generate a project from a natural-language prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAppRequest {
    /// What the user wants built
    pub prompt: String,

    /// Optional display name for the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Optional model override for this request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Response carrying the extracted project files.
///
/// `file_count` of zero is a valid success: the completion arrived but
/// contained no recognizable file blocks, and `raw` holds the text for
/// manual inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAppResponse {
    /// Id assigned to this generation
    pub project_id: Uuid,

    /// Project display name
    pub project_name: String,

    /// Model that produced the completion
    pub model: String,

    /// Extracted files, in order of appearance in the completion
    pub files: Vec<GeneratedFile>,

    /// Number of extracted files
    pub file_count: usize,

    /// Raw completion text
    pub raw: String,

    /// When the completion was produced
    pub generated_at: DateTime<Utc>,
}

/// Request to package previously generated files into an archive.
///
/// The files are resubmitted by the caller rather than looked up, so the
/// service holds no state between the generate and package requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    /// Optional name used for the downloaded archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Files to package, in the same shape the generate endpoint returned
    pub files: Vec<GeneratedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_shape() {
        let response = GenerateAppResponse {
            project_id: Uuid::nil(),
            project_name: "demo".to_string(),
            model: "gpt-4o".to_string(),
            files: vec![GeneratedFile::new("a.ts", "const a = 1;", "typescript")],
            file_count: 1,
            raw: "FILE: a.ts".to_string(),
            generated_at: Utc::now(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["fileCount"], 1);
        assert_eq!(value["files"][0]["path"], "a.ts");
        assert_eq!(value["files"][0]["language"], "typescript");
    }

    #[test]
    fn test_request_accepts_minimal_body() {
        let request: GenerateAppRequest =
            serde_json::from_str(r#"{"prompt":"a todo app"}"#).unwrap();

        assert_eq!(request.prompt, "a todo app");
        assert!(request.project_name.is_none());
        assert!(request.model.is_none());
    }
}
