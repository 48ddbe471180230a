//! Gemini service for text generation.
//!
//! Minimal, non-streaming client around the Generative Language REST API:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! The API key travels in the `x-goog-api-key` header, so request URLs (and
//! any error that quotes them) never contain the credential.
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Gemini`
//! - `cfg.model` must not be empty
//! - `cfg.endpoint` must start with http:// or https://
//!
//! A missing API key is logged but not fatal: the service is still built and
//! every call fails with `MissingApiKey` until the process is restarted with
//! a key.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, error, info};

use crate::{
    client::GenerationClient,
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    envelope::{GenerateContentRequest, GenerateContentResponse},
    error_handler::{
        AiLlmError, ConfigError, HttpError, Provider, ProviderError, ProviderErrorKind,
        make_snippet,
    },
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Thin client for the Gemini API.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Gemini
    /// - [`AiLlmError::Config`] with `EmptyModel` if the model name is blank
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(
                ProviderError::new(Provider::Gemini, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = cfg.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            let mut value = header::HeaderValue::from_str(key.trim()).map_err(|e| {
                ProviderError::new(
                    Provider::Gemini,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?;
            value.set_sensitive(true);
            headers.insert("x-goog-api-key", value);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_generate = format!("{base}/v1beta/models/{}:generateContent", cfg.model.trim());

        if cfg.has_api_key() {
            info!(
                provider = cfg.provider.as_str(),
                model = %cfg.model,
                endpoint = %cfg.endpoint,
                timeout_secs = timeout.as_secs(),
                "GeminiService initialized"
            );
        } else {
            error!(
                provider = cfg.provider.as_str(),
                model = %cfg.model,
                "GEMINI_API_KEY is missing; generation requests will fail"
            );
        }

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Full URL of the `generateContent` call.
    pub fn url(&self) -> &str {
        &self.url_generate
    }

    /// Performs a single non-streaming `generateContent` request.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `MissingApiKey` when no key is configured
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    pub async fn generate_content(
        &self,
        prompt: &str,
    ) -> Result<GenerateContentResponse, AiLlmError> {
        if !self.cfg.has_api_key() {
            return Err(
                ProviderError::new(Provider::Gemini, ProviderErrorKind::MissingApiKey).into(),
            );
        }

        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode generateContent response"
                );
                return Err(ProviderError::new(
                    Provider::Gemini,
                    ProviderErrorKind::Decode(format!("serde error: {e}")),
                )
                .into());
            }
        };

        info!(
            model = %self.cfg.model,
            candidates = out.candidate_count(),
            latency_ms = started.elapsed().as_millis(),
            "generateContent completed"
        );

        Ok(out)
    }
}

#[async_trait]
impl GenerationClient for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, AiLlmError> {
        self.generate_content(prompt).await
    }

    fn model(&self) -> &str {
        &self.cfg.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-1.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/".into(),
            api_key: Some("secret-key".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn url_is_derived_from_endpoint_and_model() {
        let svc = GeminiService::new(cfg()).unwrap();
        assert_eq!(
            svc.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(!svc.url().contains("secret-key"));
    }

    #[test]
    fn rejects_bad_endpoint_and_empty_model() {
        let mut bad = cfg();
        bad.endpoint = "ftp://nope".into();
        assert!(matches!(
            GeminiService::new(bad),
            Err(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::InvalidEndpoint(_),
                ..
            }))
        ));

        let mut empty = cfg();
        empty.model = "  ".into();
        assert!(matches!(
            GeminiService::new(empty),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }

    #[tokio::test]
    async fn missing_key_builds_but_every_call_fails() {
        let mut no_key = cfg();
        no_key.api_key = None;
        let svc = GeminiService::new(no_key).unwrap();

        let err = svc.generate("hello").await.unwrap_err();
        assert_eq!(err.code(), "LLM_MISSING_API_KEY");
        assert!(!err.is_transient());
    }
}
