//! Generative-text client used by the interview prep backend.
//!
//! - [`client::GenerationClient`] is the seam handlers depend on; it returns the
//!   provider envelope ([`envelope::GenerateContentResponse`]) untouched.
//! - [`services::gemini_service::GeminiService`] talks to the Gemini REST API.
//! - [`resilience::ResilientClient`] adds a per-attempt timeout and a bounded
//!   retry with exponential backoff around any client.
//! - [`config::default_config`] builds everything from environment variables.
//!
//! Errors from every layer are unified in [`error_handler::AiLlmError`].

pub mod client;
pub mod envelope;
pub mod error_handler;
pub mod resilience;
pub mod telemetry;

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
    pub mod llm_provider;
}

pub mod services {
    pub mod gemini_service;
}

pub use client::GenerationClient;
pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use envelope::GenerateContentResponse;
pub use error_handler::{AiLlmError, Result};
pub use resilience::{ResilientClient, RetryPolicy};
pub use services::gemini_service::GeminiService;
