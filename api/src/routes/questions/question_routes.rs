//! Question operations under /api/questions.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use interview_store::Question;
use uuid::Uuid;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::auth::AuthUser,
    routes::{
        ai::ai_request::MISSING_FIELDS,
        questions::question_request::{AddQuestionsRequest, QuestionResponse, UpdateNoteRequest},
    },
};

/// Handler: POST /api/questions/add
pub async fn add_questions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AddQuestionsRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Vec<Question>>)> {
    let Json(body) = payload?;
    let (Some(session_id), Some(questions)) = (body.session_id, body.questions) else {
        return Err(AppError::BadRequest(MISSING_FIELDS.into()));
    };

    let created = state
        .store
        .add_questions(session_id, &user.id, questions)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler: POST /api/questions/{id}/pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<QuestionResponse>> {
    let Path(id) = id?;
    let question = state.store.toggle_pin(id, &user.id).await?;
    Ok(Json(question.into()))
}

/// Handler: POST /api/questions/{id}/note
pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> AppResult<Json<QuestionResponse>> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let question = state.store.update_note(id, &user.id, body.note).await?;
    Ok(Json(question.into()))
}
