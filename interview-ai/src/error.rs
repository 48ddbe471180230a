//! Typed error for the interview-ai crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterviewAiError {
    /// The generation call itself failed (transport, provider, timeout).
    #[error(transparent)]
    Generation(#[from] AiLlmError),

    /// The call succeeded but the envelope carried no text.
    #[error("empty response from the model")]
    EmptyResponse,
}

impl InterviewAiError {
    /// Short machine-readable label for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            InterviewAiError::Generation(e) => e.code(),
            InterviewAiError::EmptyResponse => "UPSTREAM_EMPTY",
        }
    }
}
