//! AppForge Service Library
//!
//! A generative app-builder service: a chat-completion upstream produces a
//! free-form completion, the extractor turns it into an ordered list of
//! project files, and the packaging endpoint bundles those files into a
//! downloadable archive.

pub mod api;
pub mod archive;
pub mod extract;
pub mod llm;
pub mod types;

pub use archive::ProjectArchive;
pub use extract::{language_for_path, FileExtractor};
pub use llm::{ChatClient, CompletionBackend};
pub use types::{AppConfig, GeneratedFile};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::archive::*;
    pub use crate::extract::*;
    pub use crate::llm::*;
    pub use crate::types::*;
}

/// Default chat-completion upstream
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com";

/// Default model for app generation
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default completion token budget per generation
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 4096;

/// Default upstream request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
