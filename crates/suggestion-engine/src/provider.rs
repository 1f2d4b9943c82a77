//! Suggestion Providers

use crate::prompt::{descriptor_prompt, profile_prompt};
use crate::SuggestionError;
use async_trait::async_trait;
use fallback::{analyze, analyze_profile, AnalysisReport};
use material_descriptors::{CategoricalProfile, MaterialDescriptors};

/// Input a provider is asked to comment on
#[derive(Debug, Clone)]
pub enum SuggestionRequest {
    Descriptors(MaterialDescriptors),
    Profile(CategoricalProfile),
}

impl SuggestionRequest {
    /// Prompt sent to chat-completion providers
    pub fn prompt(&self) -> String {
        match self {
            SuggestionRequest::Descriptors(d) => descriptor_prompt(d),
            SuggestionRequest::Profile(p) => profile_prompt(p),
        }
    }

    /// Rule-based judgment of the same input
    pub fn heuristic_report(&self) -> AnalysisReport {
        match self {
            SuggestionRequest::Descriptors(d) => analyze(d),
            SuggestionRequest::Profile(p) => analyze_profile(p),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SuggestionRequest::Descriptors(_) => "descriptors",
            SuggestionRequest::Profile(_) => "profile",
        }
    }
}

/// A source of natural-language stability guidance
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Name used in logs, metrics and responses
    fn name(&self) -> &str;

    /// Produce guidance for `request`
    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestionError>;
}

/// Terminal provider backed by the rule-based analyzers. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicProvider;

impl HeuristicProvider {
    pub const NAME: &'static str = "heuristic";

    /// Rendered analyzer report for `request`
    pub fn report(&self, request: &SuggestionRequest) -> String {
        request.heuristic_report().to_string()
    }
}

#[async_trait]
impl SuggestionProvider for HeuristicProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestionError> {
        Ok(self.report(request))
    }
}
