use crate::PredictionError;
use material_descriptors::{CategoricalProfile, MaterialDescriptors};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Prediction backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Backend base URL
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://material-backend-bvpw.onrender.com".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Unified predictor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// Fast, lower fidelity
    Quick,
    /// Slower, detailed analysis
    Accurate,
}

impl PredictionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMode::Quick => "quick",
            PredictionMode::Accurate => "accurate",
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `/predict` response. Fields the backend adds are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StabilityPrediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_energy_above_hull: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/predict/unified` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRequest {
    pub mode: PredictionMode,
    pub user_input: CategoricalProfile,
}

/// Energy-above-hull verdict
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyAboveHull {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/predict/unified` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedPrediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PredictionMode>,
    #[serde(default)]
    pub predicted_properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_above_hull_result: Option<EnergyAboveHull>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UnifiedPrediction {
    /// Explicitly reported as not stable
    pub fn is_unstable(&self) -> bool {
        self.energy_above_hull_result
            .as_ref()
            .and_then(|e| e.stable)
            == Some(false)
    }
}

/// HTTP client for the prediction backend
#[derive(Debug, Clone)]
pub struct PredictionClient {
    config: PredictionConfig,
    client: Client,
}

impl PredictionClient {
    pub fn new(config: PredictionConfig) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PredictionError::Client(e.to_string()))?;

        info!("Prediction backend at {}", config.api_url);
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Energy above hull for a descriptor record.
    ///
    /// The body is decoded whatever the status code.
    pub async fn predict(
        &self,
        descriptors: &MaterialDescriptors,
    ) -> Result<StabilityPrediction, PredictionError> {
        let result = self.post_predict(descriptors).await;
        record("predict", &result);
        result
    }

    async fn post_predict(
        &self,
        descriptors: &MaterialDescriptors,
    ) -> Result<StabilityPrediction, PredictionError> {
        let response = self
            .client
            .post(self.url("/predict"))
            .json(descriptors)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("/predict answered {}", status);
        }
        self.decode(response).await
    }

    /// Property predictions for a categorical profile
    pub async fn predict_unified(
        &self,
        request: &UnifiedRequest,
    ) -> Result<UnifiedPrediction, PredictionError> {
        let result = self.post_unified(request).await;
        record("predict_unified", &result);
        result
    }

    async fn post_unified(
        &self,
        request: &UnifiedRequest,
    ) -> Result<UnifiedPrediction, PredictionError> {
        debug!(
            "Unified prediction in {} mode over {} features",
            request.mode,
            request.user_input.len()
        );
        let response = self
            .client
            .post(self.url("/predict/unified"))
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.request_error(e))?;
            return Err(PredictionError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, PredictionError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.request_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| PredictionError::Malformed(e.to_string()))
    }

    fn request_error(&self, error: reqwest::Error) -> PredictionError {
        if error.is_timeout() {
            PredictionError::Timeout {
                timeout_ms: self.config.timeout_secs * 1000,
            }
        } else {
            PredictionError::Transport(error.to_string())
        }
    }
}

fn record<T>(endpoint: &'static str, result: &Result<T, PredictionError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.reason(),
    };
    metrics::counter!(
        "prediction_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}
