//! Heuristic Analysis Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use fallback::{AnalysisReport, Finding};
use material_descriptors::{CategoricalProfile, MaterialDescriptors};
use serde::Serialize;

use crate::{ApiError, ApiResult, SharedState};

/// Response for analysis endpoints
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub stable: bool,
    pub findings: Vec<Finding>,
    /// Rendered report
    pub text: String,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            stable: report.is_stable(),
            findings: report.findings().to_vec(),
            text: report.to_string(),
        }
    }
}

/// Analyze a descriptor record
pub async fn analyze_descriptors(
    payload: Result<Json<MaterialDescriptors>, JsonRejection>,
) -> ApiResult<Json<AnalysisResponse>> {
    let Json(descriptors) = payload?;
    Ok(Json(fallback::analyze(&descriptors).into()))
}

/// Analyze a categorical profile
pub async fn analyze_profile(
    State(state): State<SharedState>,
    payload: Result<Json<CategoricalProfile>, JsonRejection>,
) -> ApiResult<Json<AnalysisResponse>> {
    let Json(profile) = payload?;
    let report = state.read().await.validator.validate_profile(&profile);
    if !report.is_valid() {
        return Err(ApiError::Validation(report));
    }

    Ok(Json(fallback::analyze_profile(&profile).into()))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{offline_state, post};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_analyze_reports_issues_in_rule_order() {
        let state = offline_state().await;
        let (status, body) = post(
            &state,
            "/api/v1/analyze",
            json!({
                "energy_per_atom": 7.5,
                "density_atomic": 0.05,
                "efermi": 3.0,
                "volume": 80.0,
                "density": 5.0,
                "band_gap": 1.0,
                "chemsys": "Fe-Fe",
                "total_magnetization": 0.0,
                "total_magnetization_normalized_vol": 0.0,
                "total_magnetization_normalized_formula_units": 0.0,
                "num_magnetic_sites": 0,
                "num_unique_magnetic_sites": 0,
                "formation_energy_per_atom": -0.5,
                "elements": {"Fe": 2.0}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stable"], false);
        assert_eq!(
            body["findings"][0]["issue"],
            "Energy per atom is unusually high or low"
        );
        assert_eq!(
            body["findings"][1]["issue"],
            "Chemical system has duplicate elements"
        );
        assert!(body["text"]
            .as_str()
            .unwrap()
            .starts_with("Analysis:\n⚠️ Issues found:\n"));
    }

    #[tokio::test]
    async fn test_fractional_site_count_is_a_json_error() {
        let state = offline_state().await;
        let (status, body) = post(
            &state,
            "/api/v1/analyze",
            json!({"chemsys": "Fe-O", "num_magnetic_sites": 1.5}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Invalid request body"));
        assert!(error.contains("num_magnetic_sites"));
    }

    #[tokio::test]
    async fn test_analyze_profile() {
        let state = offline_state().await;
        let (status, body) = post(
            &state,
            "/api/v1/analyze/profile",
            json!({"Brittleness": "High", "Reactivity": "Low"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["findings"].as_array().unwrap().len(), 1);
        assert_eq!(
            body["findings"][0]["suggestion"],
            "Reduce brittleness to Low or Medium (e.g. through alloying or heat treatment)"
        );
    }

    #[tokio::test]
    async fn test_analyze_profile_rejects_unknown_options() {
        let state = offline_state().await;
        let (status, body) = post(
            &state,
            "/api/v1/analyze/profile",
            json!({"Brittleness": "Extreme"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Validation failed");
        assert!(body["fields"]["Brittleness"].is_string());
    }
}
