//! Suggestion Engine
//!
//! Produces natural-language stability guidance by asking an ordered chain
//! of chat-completion providers, falling back to the rule-based analyzers
//! when none of them answers.

mod chain;
mod chat;
mod prompt;
mod provider;

pub use chain::{Suggestion, SuggestionChain};
pub use chat::{ChatCompletionConfig, ChatCompletionProvider};
pub use prompt::{descriptor_prompt, profile_prompt};
pub use provider::{HeuristicProvider, SuggestionProvider, SuggestionRequest};

use thiserror::Error;

/// Errors from a suggestion provider
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },
    #[error("{provider} request timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },
    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },
    #[error("Failed to parse {provider} response: {message}")]
    Malformed { provider: String, message: String },
    #[error("{provider} returned no content")]
    Empty { provider: String },
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl SuggestionError {
    /// Whether a second attempt may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SuggestionError::Transport { .. } | SuggestionError::Timeout { .. } => true,
            SuggestionError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Short label for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            SuggestionError::Transport { .. } => "transport",
            SuggestionError::Timeout { .. } => "timeout",
            SuggestionError::Status { .. } => "status",
            SuggestionError::Malformed { .. } => "malformed",
            SuggestionError::Empty { .. } => "empty",
            SuggestionError::Client(_) => "client",
        }
    }
}
