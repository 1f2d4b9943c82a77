//! Chat-Completion Provider
//!
//! Client for OpenAI-compatible `/chat/completions` endpoints (Hugging Face
//! router, OpenAI, LM Studio and similar).

use crate::provider::{SuggestionProvider, SuggestionRequest};
use crate::SuggestionError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for one chat-completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCompletionConfig {
    /// Provider name for logs and responses
    pub name: String,
    /// Base URL of the API (e.g. "https://router.huggingface.co/v1")
    pub base_url: String,
    /// Model to use
    pub model: String,
    /// Inline API key; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
    /// Retries after a transient failure
    pub max_retries: u32,
    /// Delay before a retry (ms)
    pub retry_backoff_ms: u64,
}

impl Default for ChatCompletionConfig {
    fn default() -> Self {
        Self {
            name: "openai-compatible".to_string(),
            base_url: "http://localhost:1234/v1".to_string(),
            model: "local-model".to_string(),
            api_key: None,
            api_key_env: None,
            max_tokens: 300,
            timeout_secs: 30,
            max_retries: 1,
            retry_backoff_ms: 500,
        }
    }
}

impl ChatCompletionConfig {
    /// Hugging Face inference router
    pub fn hugging_face() -> Self {
        Self {
            name: "huggingface".to_string(),
            base_url: "https://router.huggingface.co/v1".to_string(),
            model: "HuggingFaceTB/SmolLM3-3B:hf-inference".to_string(),
            api_key_env: Some("HF_TOKEN".to_string()),
            ..Default::default()
        }
    }

    /// OpenAI chat completions
    pub fn openai() -> Self {
        Self {
            name: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            ..Default::default()
        }
    }

    /// The configured credential, inline or from the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        let inline = self.api_key.clone().filter(|k| !k.trim().is_empty());
        inline.or_else(|| {
            self.api_key_env
                .as_deref()
                .and_then(|var| std::env::var(var).ok())
                .filter(|k| !k.trim().is_empty())
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion suggestion provider
pub struct ChatCompletionProvider {
    config: ChatCompletionConfig,
    api_key: String,
    client: Client,
}

impl ChatCompletionProvider {
    /// Create a provider with an explicit credential
    pub fn new(config: ChatCompletionConfig, api_key: String) -> Result<Self, SuggestionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SuggestionError::Client(e.to_string()))?;

        info!(
            "Creating chat-completion provider '{}' ({} at {})",
            config.name, config.model, config.base_url
        );
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Create a provider from config, or `None` when no credential is set
    pub fn from_config(config: ChatCompletionConfig) -> Result<Option<Self>, SuggestionError> {
        match config.resolve_api_key() {
            Some(key) => Self::new(config, key).map(Some),
            None => {
                warn!("{} credential missing: provider skipped", config.name);
                Ok(None)
            }
        }
    }

    pub fn config(&self) -> &ChatCompletionConfig {
        &self.config
    }

    /// Send a request, retrying transient failures
    async fn send_request(&self, prompt: &str) -> Result<String, SuggestionError> {
        let mut attempt = 0;
        loop {
            match self.try_request(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        "{} request failed (attempt {}/{}), retrying: {}",
                        self.config.name,
                        attempt,
                        self.config.max_retries + 1,
                        e
                    );
                    tokio::time::sleep(Duration::from_millis(self.config.retry_backoff_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Try a single request
    async fn try_request(&self, prompt: &str) -> Result<String, SuggestionError> {
        let request = ChatCompletionsRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SuggestionError::Status {
                provider: self.config.name.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionsResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.request_error(e)
            } else {
                SuggestionError::Malformed {
                    provider: self.config.name.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(SuggestionError::Empty {
                provider: self.config.name.clone(),
            });
        }

        debug!("{} returned {} characters", self.config.name, text.len());
        Ok(text)
    }

    fn request_error(&self, error: reqwest::Error) -> SuggestionError {
        if error.is_timeout() {
            SuggestionError::Timeout {
                provider: self.config.name.clone(),
                timeout_ms: self.config.timeout_secs * 1000,
            }
        } else {
            SuggestionError::Transport {
                provider: self.config.name.clone(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl SuggestionProvider for ChatCompletionProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestionError> {
        self.send_request(&request.prompt()).await
    }
}
