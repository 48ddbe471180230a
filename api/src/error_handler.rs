use ai_llm_service::AiLlmError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use interview_ai::InterviewAiError;
use interview_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("invalid value for {var}: {reason}")]
    InvalidConfig { var: &'static str, reason: String },

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    // --- IO / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    /// A generation pipeline failed; `context` is the client-facing message.
    #[error("{context}")]
    Generation {
        context: &'static str,
        #[source]
        source: InterviewAiError,
    },
}

impl AppError {
    pub fn generation(context: &'static str, source: InterviewAiError) -> Self {
        AppError::Generation { context, source }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            AppError::InvalidConfig { .. }
            | AppError::Llm(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Generation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidConfig { .. } => "CONFIG_ERROR",
            AppError::Llm(e) => e.code(),
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Generation { source, .. } => source.code(),
        }
    }

    /// Lower-level detail placed in the `error` field of the body.
    fn detail(&self) -> Option<String> {
        match self {
            AppError::Generation { source, .. } => Some(source.to_string()),
            AppError::Llm(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    code: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = ?self, "request failed");
        }

        let body = ErrorBody {
            success: false,
            code: self.error_code(),
            message: self.to_string(),
            error: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionNotFound(_) => AppError::NotFound("Session not found"),
            StoreError::QuestionNotFound(_) => AppError::NotFound("Question not found"),
            StoreError::NotOwner { .. } => {
                AppError::Unauthorized("Not authorized to access this session")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn store_errors_map_to_http_status() {
        let id = Uuid::new_v4();
        assert_eq!(
            AppError::from(StoreError::SessionNotFound(id)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::QuestionNotFound(id)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::NotOwner { session: id }).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn generation_errors_carry_context_and_detail() {
        let err = AppError::generation("Failed to generate questions", InterviewAiError::EmptyResponse);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "UPSTREAM_EMPTY");
        assert_eq!(err.to_string(), "Failed to generate questions");
        assert_eq!(err.detail().as_deref(), Some("empty response from the model"));
    }
}
