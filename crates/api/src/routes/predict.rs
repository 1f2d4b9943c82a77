//! Prediction Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use descriptor_validator::{DescriptorForm, ExtremeWarning};
use prediction_client::{StabilityPrediction, UnifiedPrediction, UnifiedRequest};
use serde::Serialize;
use suggestion_engine::{Suggestion, SuggestionRequest};
use tracing::warn;

use crate::{ApiError, ApiResult, SharedState};

/// Shown in place of a prediction the backend could not produce
pub const PREDICTION_FAILED: &str = "Prediction failed. Please check inputs or try again.";

/// Response for predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Option<StabilityPrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_error: Option<&'static str>,
    pub warnings: Vec<ExtremeWarning>,
    pub suggestion: Suggestion,
}

/// Response for unified predict endpoint
#[derive(Debug, Serialize)]
pub struct UnifiedResponse {
    #[serde(flatten)]
    pub prediction: UnifiedPrediction,
    pub recommendation: &'static str,
    pub ai_summary: Suggestion,
}

/// Validate, predict and suggest for a descriptor submission
pub async fn predict(
    State(state): State<SharedState>,
    payload: Result<Json<DescriptorForm>, JsonRejection>,
) -> ApiResult<Json<PredictResponse>> {
    let Json(form) = payload?;
    let (validated, client, chain) = {
        let state = state.read().await;
        (
            state.validator.parse(&form),
            state.prediction.clone(),
            state.chain.clone(),
        )
    };
    let validated = validated.map_err(ApiError::Validation)?;

    let (prediction, prediction_error) = match client.predict(&validated.descriptors).await {
        Ok(prediction) => (Some(prediction), None),
        Err(e) => {
            warn!("Prediction failed: {}", e);
            (None, Some(PREDICTION_FAILED))
        }
    };

    let suggestion = chain
        .suggest(&SuggestionRequest::Descriptors(validated.descriptors))
        .await;

    Ok(Json(PredictResponse {
        prediction,
        prediction_error,
        warnings: validated.warnings,
        suggestion,
    }))
}

/// Unified prediction for a categorical profile
pub async fn predict_unified(
    State(state): State<SharedState>,
    payload: Result<Json<UnifiedRequest>, JsonRejection>,
) -> ApiResult<Json<UnifiedResponse>> {
    let Json(request) = payload?;
    let (client, chain) = {
        let state = state.read().await;
        (state.prediction.clone(), state.chain.clone())
    };

    let prediction = client.predict_unified(&request).await?;
    let recommendation = state
        .write()
        .await
        .advisor
        .recommend(request.mode, &prediction);

    let ai_summary = chain
        .suggest(&SuggestionRequest::Profile(request.user_input))
        .await;

    Ok(Json(UnifiedResponse {
        prediction,
        recommendation: recommendation.message(),
        ai_summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{offline_state, post, spawn_backend, state};
    use axum::http::StatusCode;
    use axum::routing::post as post_route;
    use axum::Router;
    use serde_json::{json, Value};

    fn valid_form() -> Value {
        json!({
            "energy_per_atom": "-3.2",
            "density_atomic": "0.05",
            "efermi": "4.1",
            "volume": "120.5",
            "density": "7.8",
            "band_gap": "1.2",
            "chemsys": "Ag-Te",
            "total_magnetization": "0",
            "total_magnetization_normalized_vol": "0",
            "total_magnetization_normalized_formula_units": "0",
            "num_magnetic_sites": "0",
            "num_unique_magnetic_sites": "0",
            "formation_energy_per_atom": "-0.4",
            "elements": {"Ag": 1, "Te": 1}
        })
    }

    #[tokio::test]
    async fn test_predict_rejects_invalid_form() {
        let state = offline_state().await;
        let mut form = valid_form();
        form["density"] = json!("0");

        let (status, body) = post(&state, "/api/v1/predict", form).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["fields"]["density"],
            "Must be > 0. Reason: physically meaningful density"
        );
    }

    #[tokio::test]
    async fn test_predict_forwards_and_suggests() {
        let backend = Router::new().route(
            "/predict",
            post_route(|Json(body): Json<Value>| async move {
                assert_eq!(body["chemsys"], "Ag-Te");
                assert_eq!(body["elements"]["Te"].to_string(), "1");
                Json(json!({
                    "material": "Ag-Te",
                    "predicted_energy_above_hull": 0.012,
                    "stability": "Stable"
                }))
            }),
        );
        let state = state(spawn_backend(backend).await);

        let (status, body) = post(&state, "/api/v1/predict", valid_form()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"]["stability"], "Stable");
        assert!(body.get("prediction_error").is_none());
        assert_eq!(body["suggestion"]["provider"], "heuristic");
        assert_eq!(
            body["suggestion"]["text"],
            "Analysis:\n✅ Values appear reasonable for a stable material.\n"
        );
    }

    #[tokio::test]
    async fn test_prediction_failure_still_suggests() {
        let state = offline_state().await;

        let (status, body) = post(&state, "/api/v1/predict", valid_form()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["prediction"].is_null());
        assert_eq!(body["prediction_error"], PREDICTION_FAILED);
        assert_eq!(body["suggestion"]["used_fallback"], true);
    }

    fn unified_backend() -> Router {
        Router::new().route(
            "/predict/unified",
            post_route(|Json(body): Json<Value>| async move {
                let density = if body["mode"] == "quick" { 2.0 } else { 3.1 };
                Json(json!({
                    "mode": body["mode"],
                    "predicted_properties": {"density": density},
                    "energy_above_hull_result": {"value": 0.02, "stable": true}
                }))
            }),
        )
    }

    #[tokio::test]
    async fn test_unified_compares_cached_runs() {
        let state = state(spawn_backend(unified_backend()).await);
        let profile = json!({"Brittleness": "Low", "Corrosion Resistance": "Low"});

        let (status, first) = post(
            &state,
            "/api/v1/predict/unified",
            json!({"mode": "quick", "user_input": profile}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["recommendation"], "Material appears stable and optimized.");
        assert_eq!(first["predicted_properties"]["density"], 2.0);

        let (status, second) = post(
            &state,
            "/api/v1/predict/unified",
            json!({"mode": "accurate", "user_input": profile}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            second["recommendation"],
            "Match density closer to accurate mode predictions."
        );
        assert_eq!(second["energy_above_hull_result"]["stable"], true);
        assert!(second["ai_summary"]["text"]
            .as_str()
            .unwrap()
            .contains("• Low corrosion resistance limits long-term stability\n"));
    }

    #[tokio::test]
    async fn test_unified_unknown_mode_is_a_json_error() {
        let state = offline_state().await;
        let (status, body) = post(
            &state,
            "/api/v1/predict/unified",
            json!({"mode": "thorough", "user_input": {}}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("mode"));
    }

    #[tokio::test]
    async fn test_unified_backend_error_is_bad_gateway() {
        let backend = Router::new().route(
            "/predict/unified",
            post_route(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model offline") }),
        );
        let state = state(spawn_backend(backend).await);

        let (status, body) = post(
            &state,
            "/api/v1/predict/unified",
            json!({"mode": "quick", "user_input": {"Brittleness": "High"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("model offline"));
    }
}
