//! Language tags for generated files.
//!
//! A fence annotation from the model wins when present; otherwise the tag is
//! derived from the file extension via a fixed lookup.

use std::path::Path;

/// Tag used when no better language can be determined.
pub const PLAINTEXT: &str = "plaintext";

/// Derive a language tag from a file path's extension.
///
/// The lookup is case-insensitive and falls back to [`PLAINTEXT`] for
/// missing or unrecognized extensions.
pub fn language_for_path(path: &str) -> &'static str {
    let ext = match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_lowercase(),
        None => return PLAINTEXT,
    };

    match ext.as_str() {
        "ts" => "typescript",
        "tsx" => "tsx",
        "js" => "javascript",
        "jsx" => "jsx",
        "py" => "python",
        "json" => "json",
        "html" => "html",
        "css" => "css",
        "md" => "markdown",
        "yml" | "yaml" => "yaml",
        "sql" => "sql",
        "env" | "gitignore" => PLAINTEXT,
        _ => PLAINTEXT,
    }
}

/// Resolve the language for a record.
///
/// An explicit fence tag is used verbatim; absent that, the tag comes from
/// the path's extension.
pub fn resolve_language(tag: Option<&str>, path: &str) -> String {
    match tag {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ => language_for_path(path).to_string(),
    }
}
