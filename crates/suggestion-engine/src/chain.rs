//! Provider Chain
//!
//! Tries each configured provider in order and ends at the heuristic
//! analyzer, so a chain always yields a suggestion.

use crate::chat::{ChatCompletionConfig, ChatCompletionProvider};
use crate::provider::{HeuristicProvider, SuggestionProvider, SuggestionRequest};
use crate::SuggestionError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Guidance returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub text: String,
    /// Name of the provider that answered
    pub provider: String,
    /// True when the heuristic analyzer produced the text
    pub used_fallback: bool,
}

/// Ordered providers with a heuristic terminal step
#[derive(Clone)]
pub struct SuggestionChain {
    providers: Vec<Arc<dyn SuggestionProvider>>,
    heuristic: HeuristicProvider,
}

impl SuggestionChain {
    pub fn new(providers: Vec<Arc<dyn SuggestionProvider>>) -> Self {
        Self {
            providers,
            heuristic: HeuristicProvider,
        }
    }

    /// A chain that answers from the rule-based analyzers only
    pub fn heuristic_only() -> Self {
        Self::new(Vec::new())
    }

    /// Build from provider configs. Providers without a credential are skipped.
    pub fn from_configs(configs: &[ChatCompletionConfig]) -> Result<Self, SuggestionError> {
        let mut providers: Vec<Arc<dyn SuggestionProvider>> = Vec::with_capacity(configs.len());
        for config in configs {
            if let Some(provider) = ChatCompletionProvider::from_config(config.clone())? {
                providers.push(Arc::new(provider));
            }
        }
        info!(
            "Suggestion chain ready with {} remote provider(s)",
            providers.len()
        );
        Ok(Self::new(providers))
    }

    /// Names of the remote providers, in order
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Ask each provider in turn. The first non-empty answer wins.
    pub async fn suggest(&self, request: &SuggestionRequest) -> Suggestion {
        for provider in &self.providers {
            let name = provider.name().to_string();
            let outcome = match provider.suggest(request).await {
                Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
                Ok(_) => Err(SuggestionError::Empty {
                    provider: name.clone(),
                }),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(text) => {
                    debug!("{} answered {} request", name, request.kind());
                    metrics::counter!("suggestions_served_total", "provider" => name.clone())
                        .increment(1);
                    return Suggestion {
                        text,
                        provider: name,
                        used_fallback: false,
                    };
                }
                Err(e) => {
                    warn!("{} failed, trying next provider: {}", name, e);
                    metrics::counter!(
                        "suggestion_provider_failures_total",
                        "provider" => name,
                        "reason" => e.reason()
                    )
                    .increment(1);
                }
            }
        }

        info!("Using heuristic analysis for {} request", request.kind());
        metrics::counter!("heuristic_fallbacks_total").increment(1);
        metrics::counter!("suggestions_served_total", "provider" => HeuristicProvider::NAME)
            .increment(1);
        Suggestion {
            text: self.heuristic.report(request),
            provider: HeuristicProvider::NAME.to_string(),
            used_fallback: true,
        }
    }
}
