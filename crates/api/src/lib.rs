//! Material Advisor API Server
//!
//! REST API for descriptor validation, heuristic stability analysis,
//! suggestion chains and the prediction backend.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use descriptor_validator::Validator;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prediction_client::{PredictionClient, RecommendationAdvisor};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use suggestion_engine::SuggestionChain;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;

pub use crate::config::{AppConfig, LoggingConfig, ServerConfig};
pub use crate::error::{ApiError, ApiResult};

use crate::rate_limit::create_governor_config;

/// Application state shared across handlers
pub struct AppState {
    pub validator: Validator,
    pub chain: SuggestionChain,
    pub prediction: PredictionClient,
    /// Last quick and accurate unified runs
    pub advisor: RecommendationAdvisor,
    /// Present when the Prometheus recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        validator: Validator,
        chain: SuggestionChain,
        prediction: PredictionClient,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            validator,
            chain,
            prediction,
            advisor: RecommendationAdvisor::new(),
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Build state from configuration
    pub fn from_config(
        config: &AppConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, ApiError> {
        let chain = SuggestionChain::from_configs(&config.providers)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let prediction = PredictionClient::new(config.prediction.clone())
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(Self::new(
            Validator::new(config.validation.clone()),
            chain,
            prediction,
            metrics,
        ))
    }
}

pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    /// Remote suggestion providers, in order
    pub providers: Vec<String>,
    pub prediction_backend: String,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/validate", post(routes::validate::validate_form))
        .route("/api/v1/analyze", post(routes::analyze::analyze_descriptors))
        .route("/api/v1/analyze/profile", post(routes::analyze::analyze_profile))
        .route("/api/v1/suggestions", post(routes::suggestions::get_suggestions))
        .route("/api/v1/predict", post(routes::predict::predict))
        .route("/api/v1/predict/unified", post(routes::predict::predict_unified))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        providers: state.chain.provider_names(),
        prediction_backend: state.prediction.config().api_url.clone(),
    })
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    match &state.read().await.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| ApiError::Settings(format!("unknown log level '{}'", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| ApiError::Internal(format!("Failed to set tracing subscriber: {e}")))
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    }
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), ApiError> {
    let state = Arc::new(RwLock::new(AppState::from_config(
        &config,
        install_metrics(),
    )?));
    let governor = create_governor_config(&config.server.rate_limit)?;
    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{get, offline_state};

    #[tokio::test]
    async fn test_health() {
        let state = offline_state().await;
        let (status, body) = get(&state, "/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["providers"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let state = offline_state().await;
        let (status, _) = get(&state, "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_with_handle() {
        let state = offline_state().await;
        let handle = PrometheusBuilder::new().build_recorder().handle();
        state.write().await.metrics = Some(handle);

        let (status, _) = get(&state, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            json: false,
        };
        assert!(matches!(init_logging(&config), Err(ApiError::Settings(_))));
    }

    #[test]
    fn test_state_from_default_config() {
        let mut config = AppConfig::default();
        config.providers.clear();
        let state = AppState::from_config(&config, None).unwrap();
        assert!(state.chain.provider_names().is_empty());
        assert_eq!(
            state.prediction.config().api_url,
            "https://material-backend-bvpw.onrender.com"
        );
    }
}
