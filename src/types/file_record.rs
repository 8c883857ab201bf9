//! Generated file records.

use serde::{Deserialize, Serialize};

/// One file extracted from a model completion.
///
/// Records carry everything a preview or packaging step needs: a relative
/// path, the trimmed file body, and a short language tag for syntax
/// highlighting. Path sanitization beyond leading-slash stripping is the
/// packaging side's concern, not the record's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Relative path of the file within the generated project
    pub path: String,

    /// Literal text body, leading/trailing whitespace trimmed
    pub content: String,

    /// Short language tag (e.g. "typescript", "json", "plaintext")
    pub language: String,
}

impl GeneratedFile {
    /// Create a new record.
    pub fn new(path: &str, content: &str, language: &str) -> Self {
        Self {
            path: path.to_string(),
            content: content.to_string(),
            language: language.to_string(),
        }
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the record has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
