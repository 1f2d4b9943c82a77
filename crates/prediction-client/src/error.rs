use thiserror::Error;

/// Prediction backend errors
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Prediction request failed: {0}")]
    Transport(String),

    #[error("Prediction request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Backend error ({status}): {body}")]
    Backend { status: u16, body: String },

    #[error("Failed to parse prediction response: {0}")]
    Malformed(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl PredictionError {
    /// Short label for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            PredictionError::Transport(_) => "transport",
            PredictionError::Timeout { .. } => "timeout",
            PredictionError::Backend { .. } => "backend",
            PredictionError::Malformed(_) => "malformed",
            PredictionError::Client(_) => "client",
        }
    }
}
