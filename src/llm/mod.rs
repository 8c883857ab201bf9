//! Chat-completion upstream client and prompt construction.

mod chat;

pub use chat::{ChatClient, ChatMessage, CompletionBackend, CompletionRequest};

/// System prompt for the app-builder flow.
///
/// The format instruction matches what the extractor's primary pass parses:
/// a `FILE:` marker line followed by a fenced code block per file.
pub const APP_BUILDER_SYSTEM_PROMPT: &str = "You are an expert full-stack developer. \
Generate a complete, working project for the user's request. Output every file as:\n\n\
FILE: relative/path/to/file\n```language\nfile contents\n```\n\n\
Emit nothing but file blocks: no commentary between files, no placeholders, \
no truncated contents.";

/// Build the message list for one app-generation call.
pub fn app_builder_messages(prompt: &str, project_name: Option<&str>) -> Vec<ChatMessage> {
    let user = match project_name {
        Some(name) => format!("Project name: {}\n\n{}", name, prompt),
        None => prompt.to_string(),
    };

    vec![
        ChatMessage::system(APP_BUILDER_SYSTEM_PROMPT),
        ChatMessage::user(&user),
    ]
}
