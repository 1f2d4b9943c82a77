use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use descriptor_validator::ValidationReport;
use prediction_client::PredictionError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(ValidationReport),

    /// Body that is not JSON or does not decode into the request type
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Prediction backend error: {0}")]
    Backend(#[from] PredictionError),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": self.to_string(),
                    "fields": report.messages(),
                    "warnings": report.warnings,
                }),
            ),
            ApiError::InvalidBody { status, .. } => (*status, json!({ "error": self.to_string() })),
            ApiError::Backend(_) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": self.to_string() }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
