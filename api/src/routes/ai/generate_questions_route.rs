//! POST /api/ai/generate-questions

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use interview_ai::{GeneratedPayload, QaPair, generate_interview_questions};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::ai::ai_request::GenerateQuestionsRequest,
};

/// Handler: POST /api/ai/generate-questions
///
/// Responds with the model's JSON array when it parses, otherwise with
/// `{"result": "<raw text>"}`.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/ai/generate-questions \
///   -H 'authorization: Bearer <token>' \
///   -H 'content-type: application/json' \
///   -d '{"role":"Backend Developer","experience":3,"topicsToFocus":"Rust, SQL","numberOfQuestions":5}'
/// ```
pub async fn generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<GenerateQuestionsRequest>, JsonRejection>,
) -> AppResult<Json<GeneratedPayload<Vec<QaPair>>>> {
    let Json(body) = payload?;
    let params = body.validate()?;

    let generated = generate_interview_questions(state.llm.as_ref(), &params)
        .await
        .map_err(|e| AppError::generation("Failed to generate questions", e))?;

    Ok(Json(generated))
}
