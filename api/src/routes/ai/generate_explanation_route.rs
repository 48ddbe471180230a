//! POST /api/ai/generate-explanation

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use interview_ai::{Explanation, generate_concept_explanation};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::ai::ai_request::GenerateExplanationRequest,
};

/// Handler: POST /api/ai/generate-explanation
///
/// The model text is returned unparsed as `{"explanation": "<text>"}`.
pub async fn generate_explanation(
    State(state): State<AppState>,
    payload: Result<Json<GenerateExplanationRequest>, JsonRejection>,
) -> AppResult<Json<Explanation>> {
    let Json(body) = payload?;
    let question = body.validate()?;

    let explanation = generate_concept_explanation(state.llm.as_ref(), question)
        .await
        .map_err(|e| AppError::generation("Failed to generate explanation", e))?;

    Ok(Json(explanation))
}
