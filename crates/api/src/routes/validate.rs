//! Validation Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use descriptor_validator::{DescriptorForm, ExtremeWarning};
use material_descriptors::MaterialDescriptors;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{ApiResult, SharedState};

/// Response for validate endpoint
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    /// Field name to error message
    pub errors: BTreeMap<String, String>,
    pub warnings: Vec<ExtremeWarning>,
    /// Parsed record when valid
    pub descriptors: Option<MaterialDescriptors>,
}

/// Validate a submission
pub async fn validate_form(
    State(state): State<SharedState>,
    payload: Result<Json<DescriptorForm>, JsonRejection>,
) -> ApiResult<Json<ValidateResponse>> {
    let Json(form) = payload?;
    let state = state.read().await;

    let response = match state.validator.parse(&form) {
        Ok(validated) => ValidateResponse {
            valid: true,
            errors: BTreeMap::new(),
            warnings: validated.warnings,
            descriptors: Some(validated.descriptors),
        },
        Err(report) => ValidateResponse {
            valid: false,
            errors: report.messages(),
            warnings: report.warnings,
            descriptors: None,
        },
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{offline_state, post};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_valid_submission() {
        let state = offline_state().await;
        let (status, body) = post(
            &state,
            "/api/v1/validate",
            json!({
                "energy_per_atom": "-2.1",
                "density_atomic": "0.06",
                "efermi": 5,
                "volume": "2000000",
                "density": "4.5",
                "band_gap": "0.8",
                "chemsys": "Fe-O",
                "total_magnetization": "0",
                "total_magnetization_normalized_vol": "0",
                "total_magnetization_normalized_formula_units": "0",
                "num_magnetic_sites": "0",
                "num_unique_magnetic_sites": "0",
                "formation_energy_per_atom": "-1.2",
                "elements": "{\"Fe\": 2, \"O\": 3}"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["descriptors"]["chemsys"], "Fe-O");
        assert_eq!(body["descriptors"]["elements"]["O"].to_string(), "3");
        assert_eq!(body["warnings"][0]["field"], "volume");
    }

    #[tokio::test]
    async fn test_invalid_submission_lists_fields() {
        let state = offline_state().await;
        let (status, body) = post(
            &state,
            "/api/v1/validate",
            json!({"volume": "-4", "ordering": "Spiral", "elements": "not json"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert!(body["descriptors"].is_null());
        for field in ["volume", "ordering", "elements", "chemsys"] {
            assert!(body["errors"][field].is_string(), "missing error for {field}");
        }
    }
}
