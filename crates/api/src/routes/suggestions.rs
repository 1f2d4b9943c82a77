//! Suggestion Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use material_descriptors::MaterialDescriptors;
use suggestion_engine::{Suggestion, SuggestionRequest};

use crate::{ApiResult, SharedState};

/// Guidance for a descriptor record
pub async fn get_suggestions(
    State(state): State<SharedState>,
    payload: Result<Json<MaterialDescriptors>, JsonRejection>,
) -> ApiResult<Json<Suggestion>> {
    let Json(descriptors) = payload?;
    let chain = state.read().await.chain.clone();
    Ok(Json(
        chain.suggest(&SuggestionRequest::Descriptors(descriptors)).await,
    ))
}
