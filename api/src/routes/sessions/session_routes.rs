//! Session CRUD under /api/sessions.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use interview_store::{SessionWithQuestions, StoreError};
use uuid::Uuid;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::auth::AuthUser,
    routes::sessions::session_request::{
        CreateSessionRequest, CreatedSession, MessageResponse, SessionResponse,
    },
};

/// Handler: POST /api/sessions/create
pub async fn create_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedSession>)> {
    let Json(body) = payload?;
    let new = body.into_new_session()?;

    let session = state.store.create_session(&user.id, new).await;
    Ok((StatusCode::CREATED, Json(SessionResponse::new(session))))
}

/// Handler: GET /api/sessions/my-sessions
pub async fn my_sessions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<Vec<SessionWithQuestions>> {
    Json(state.store.sessions_for_user(&user.id).await)
}

/// Handler: GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<SessionResponse<SessionWithQuestions>>> {
    let Path(id) = id?;
    let session = state.store.session_by_id(id, &user.id).await?;
    Ok(Json(SessionResponse::new(session)))
}

/// Handler: DELETE /api/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state
        .store
        .delete_session(id, &user.id)
        .await
        .map_err(|e| match e {
            StoreError::NotOwner { .. } => {
                AppError::Unauthorized("Not authorized to delete this session")
            }
            other => other.into(),
        })?;

    Ok(Json(MessageResponse {
        message: "Session deleted successfully",
    }))
}
