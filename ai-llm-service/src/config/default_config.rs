//! Default LLM configs loaded from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_KIND`             = provider kind (only `gemini`; default `gemini`)
//! - `GEMINI_API_KEY`       = provider credential (optional at startup)
//! - `GEMINI_MODEL`         = model id (default `gemini-1.5-flash`)
//! - `GEMINI_URL`           = API base (default `https://generativelanguage.googleapis.com`)
//! - `LLM_MAX_TOKENS`       = optional `maxOutputTokens` (u32)
//! - `LLM_TEMPERATURE`      = optional temperature (0.0..=2.0)
//! - `LLM_TOP_P`            = optional nucleus sampling cutoff (0.0..=1.0)
//! - `LLM_TIMEOUT_SECS`     = per-attempt timeout (default 60)
//! - `LLM_MAX_RETRIES`      = retries after the first attempt (default 2)
//! - `LLM_RETRY_BACKOFF_MS` = first backoff in ms, doubled per retry (default 250)
//!
//! Every loader has a `*_from` twin that takes a lookup closure instead of
//! reading the process environment.

use std::{sync::Arc, time::Duration};

use crate::{
    client::GenerationClient,
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, opt_number, opt_var, validate_http_endpoint, validate_range_f32,
    },
    resilience::{ResilientClient, RetryPolicy},
    services::gemini_service::GeminiService,
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Gemini config from the process environment.
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    config_gemini_from(process_env)
}

/// Gemini config from an arbitrary lookup.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::InvalidFormat`] for a non-http(s) `GEMINI_URL`
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for bad numeric knobs
pub fn config_gemini_from<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(kind) = opt_var(&lookup, "LLM_KIND") {
        kind.parse::<LlmProvider>()
            .map_err(ConfigError::UnsupportedProvider)?;
    }

    let endpoint = opt_var(&lookup, "GEMINI_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.into());
    validate_http_endpoint("GEMINI_URL", endpoint.trim())?;

    let model = opt_var(&lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());

    let temperature = opt_number::<_, f32>(&lookup, "LLM_TEMPERATURE", "expected f32")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }

    let top_p = opt_number::<_, f32>(&lookup, "LLM_TOP_P", "expected f32")?;
    if let Some(p) = top_p {
        validate_range_f32("top_p", p, 0.0, 1.0)?;
    }

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: model.trim().to_string(),
        endpoint: endpoint.trim().to_string(),
        api_key: opt_var(&lookup, "GEMINI_API_KEY").map(|k| k.trim().to_string()),
        max_tokens: opt_number(&lookup, "LLM_MAX_TOKENS", "expected u32")?,
        temperature,
        top_p,
        timeout_secs: Some(
            opt_number(&lookup, "LLM_TIMEOUT_SECS", "expected u64")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    })
}

/// Retry policy from the process environment.
pub fn retry_policy() -> Result<RetryPolicy, AiLlmError> {
    retry_policy_from(process_env)
}

/// Retry policy from an arbitrary lookup.
pub fn retry_policy_from<F>(lookup: F) -> Result<RetryPolicy, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = RetryPolicy::default();

    Ok(RetryPolicy {
        max_retries: opt_number(&lookup, "LLM_MAX_RETRIES", "expected u32")?
            .unwrap_or(defaults.max_retries),
        initial_backoff: opt_number(&lookup, "LLM_RETRY_BACKOFF_MS", "expected u64")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.initial_backoff),
        attempt_timeout: opt_number(&lookup, "LLM_TIMEOUT_SECS", "expected u64")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.attempt_timeout),
    })
}

/// Builds the production client: Gemini wrapped in timeout + retry.
///
/// The result is constructed once at startup and injected into request
/// handlers.
pub fn gemini_client() -> Result<Arc<dyn GenerationClient>, AiLlmError> {
    let cfg = config_gemini()?;
    let policy = retry_policy()?;
    let service = GeminiService::new(cfg)?;
    Ok(Arc::new(ResilientClient::new(service, policy)))
}
