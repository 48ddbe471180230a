use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session not found")]
    SessionNotFound(Uuid),

    #[error("Question not found")]
    QuestionNotFound(Uuid),

    /// The caller does not own the session the operation targets.
    #[error("Not authorized to access this session")]
    NotOwner { session: Uuid },
}
