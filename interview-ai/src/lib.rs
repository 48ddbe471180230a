//! Interview content generation on top of a [`GenerationClient`].
//!
//! Two pipelines, both `prompt -> generate -> normalize`:
//! - [`generate_interview_questions`]: asks for a JSON array of
//!   question/answer pairs and degrades to raw text when the model does not
//!   return JSON.
//! - [`generate_concept_explanation`]: asks for an explanation and returns
//!   the model text verbatim.
//!
//! [`GenerationClient`]: ai_llm_service::GenerationClient

mod error;
pub mod normalize;
mod pipeline;
pub mod prompt;
mod types;

pub use error::InterviewAiError;
pub use pipeline::{generate_concept_explanation, generate_interview_questions};
pub use types::{ConceptExplanation, Explanation, GeneratedPayload, QaPair, QuestionsParams};
