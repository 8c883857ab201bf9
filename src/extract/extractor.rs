//! Generated-file extraction from model completions.
//!
//! Models format multi-file output inconsistently. The extractor accepts the
//! documented `FILE: <path>` format first and, only when that yields nothing,
//! falls back to a documentation-style shape where each file sits under a
//! markdown heading. Unmatched spans of text are skipped silently; there is
//! no input that makes extraction fail.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use super::language::resolve_language;
use crate::types::GeneratedFile;

lazy_static! {
    /// `FILE: <path>` at the start of a line, followed by a fenced code
    /// block with an optional language tag.
    static ref FILE_BLOCK: Regex = Regex::new(
        r"(?ms)^FILE:[ \t]*(?P<path>[^\r\n]+?)[ \t\r]*\n+[ \t]*```(?P<lang>[A-Za-z0-9_.+#-]*)[ \t\r]*\n(?P<body>.*?)\n[ \t]*```"
    ).unwrap();

    /// `##`/`###` heading with an optionally backticked path token, followed
    /// by a fenced code block in the same shape.
    static ref HEADING_BLOCK: Regex = Regex::new(
        r"(?ms)^#{2,3}[ \t]+`?(?P<path>[^`\r\n]+?)`?[ \t\r]*\n+[ \t]*```(?P<lang>[A-Za-z0-9_.+#-]*)[ \t\r]*\n(?P<body>.*?)\n[ \t]*```"
    ).unwrap();
}

/// Splits one model completion into an ordered list of generated files.
///
/// Records appear in source-text order. Duplicate paths are all emitted;
/// deduplication is the packaging side's policy. Zero records is a valid
/// outcome, not an error, and the raw completion stays available to the
/// caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtractor;

impl FileExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract every file block from `text`, in order of appearance.
    pub fn extract(&self, text: &str) -> Vec<GeneratedFile> {
        let files = scan(&FILE_BLOCK, text, false);
        if !files.is_empty() {
            debug!(files = files.len(), "Extracted files from FILE: markers");
            return files;
        }

        let files = scan(&HEADING_BLOCK, text, true);
        if !files.is_empty() {
            debug!(files = files.len(), "Extracted files from heading blocks");
        }
        files
    }
}

/// Run one pattern over the text, left to right.
///
/// `captures_iter` yields non-overlapping matches and resumes scanning after
/// each consumed block, so a malformed or nested fence never causes
/// re-matching of text that an earlier block already consumed.
fn scan(pattern: &Regex, text: &str, require_dot: bool) -> Vec<GeneratedFile> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| build_record(&caps, require_dot))
        .collect()
}

/// Turn one match into a record, or drop it.
///
/// A heading token without a `.` is a prose section title, not a filename,
/// and must not be treated as a file. Records with an empty path or empty
/// trimmed content are dropped without comment.
fn build_record(caps: &Captures<'_>, require_dot: bool) -> Option<GeneratedFile> {
    let path = caps.name("path").map(|m| m.as_str()).unwrap_or("").trim();
    if path.is_empty() || (require_dot && !path.contains('.')) {
        return None;
    }

    let content = caps.name("body").map(|m| m.as_str()).unwrap_or("").trim();
    if content.is_empty() {
        return None;
    }

    let tag = caps
        .name("lang")
        .map(|m| m.as_str())
        .filter(|t| !t.is_empty());

    Some(GeneratedFile::new(path, content, &resolve_language(tag, path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Vec<GeneratedFile> {
        FileExtractor::new().extract(text)
    }

    #[test]
    fn test_two_marked_blocks_in_order() {
        let text = "FILE: package.json\n```json\n{\"name\":\"demo\"}\n```\n\nFILE: src/index.ts\n```typescript\nconsole.log(\"hi\");\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "package.json");
        assert_eq!(files[0].language, "json");
        assert_eq!(files[0].content, "{\"name\":\"demo\"}");
        assert_eq!(files[1].path, "src/index.ts");
        assert_eq!(files[1].language, "typescript");
        assert_eq!(files[1].content, "console.log(\"hi\");");
    }

    #[test]
    fn test_explicit_fence_tag_is_used_verbatim() {
        let text = "FILE: app.config\n```toml\nkey = true\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].language, "toml");
    }

    #[test]
    fn test_missing_fence_tag_derives_from_extension() {
        let text = "FILE: src/App.tsx\n```\nexport default function App() {}\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].language, "tsx");
    }

    #[test]
    fn test_unrecognized_extension_falls_back_to_plaintext() {
        let text = "FILE: main.rs\n```\nfn main() {}\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].language, "plaintext");
    }

    #[test]
    fn test_content_is_trimmed() {
        let text = "FILE: notes.md\n```markdown\n\n# Notes\n\nbody\n\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, "# Notes\n\nbody");
    }

    #[test]
    fn test_prose_around_blocks_is_skipped() {
        let text = "Here is your project.\n\nFILE: index.html\n```html\n<!doctype html>\n```\n\nLet me know if you need more.";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "index.html");
    }

    #[test]
    fn test_pure_prose_yields_nothing() {
        let files = extract("I would structure the app in three layers.");
        assert!(files.is_empty());
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_unterminated_fence_yields_fewer_records() {
        let text = "FILE: a.ts\n```typescript\nconst a = 1;\n```\n\nFILE: b.ts\n```typescript\nconst b = 2;";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "a.ts");
    }

    #[test]
    fn test_scan_resumes_after_consumed_block() {
        // The nested fence closes the first block early; the scanner must
        // carry on from there and still find the second block.
        let text = "FILE: doc.md\n```markdown\nusage:\n```\nleftover\n\nFILE: b.ts\n```typescript\nconst b = 2;\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "doc.md");
        assert_eq!(files[0].content, "usage:");
        assert_eq!(files[1].path, "b.ts");
    }

    #[test]
    fn test_duplicate_paths_are_all_emitted() {
        let text = "FILE: a.ts\n```typescript\nfirst\n```\n\nFILE: a.ts\n```typescript\nsecond\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].content, "first");
        assert_eq!(files[1].content, "second");
    }

    #[test]
    fn test_empty_content_block_is_dropped() {
        let text = "FILE: a.ts\n```typescript\n   \n```\n\nFILE: b.ts\n```typescript\nconst b = 2;\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "b.ts");
    }

    #[test]
    fn test_heading_fallback_with_backticked_path() {
        let text = "## `src/app.ts`\n\n```typescript\nexport {};\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/app.ts");
        assert_eq!(files[0].language, "typescript");
    }

    #[test]
    fn test_heading_fallback_with_bare_path() {
        let text = "### server/index.js\n```\nrequire(\"http\");\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "server/index.js");
        assert_eq!(files[0].language, "javascript");
    }

    #[test]
    fn test_prose_heading_is_never_a_file() {
        let text = "## Overview\n\n```typescript\nconsole.log(\"example\");\n```\n";
        assert!(extract(text).is_empty());
    }

    #[test]
    fn test_fallback_only_runs_when_markers_match_nothing() {
        // One well-formed marker block wins; the heading block alongside it
        // is ignored entirely.
        let text = "## `ignored.ts`\n\n```typescript\nnope\n```\n\nFILE: kept.ts\n```typescript\nyes\n```\n";
        let files = extract(text);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "kept.ts");
    }

    #[test]
    fn test_top_level_heading_is_not_a_marker() {
        let text = "# readme.md\n```markdown\nhello\n```\n";
        assert!(extract(text).is_empty());
    }
}
