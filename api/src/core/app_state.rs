use std::{path::PathBuf, sync::Arc};

use ai_llm_service::{GenerationClient, config::default_config::gemini_client};
use axum::http::HeaderValue;
use interview_store::InterviewStore;

use crate::{
    error_handler::AppError,
    middleware_layer::auth::{StaticTokenVerifier, TokenVerifier},
};

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// HTTP-level settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listener address, e.g. "0.0.0.0:8000".
    pub address: String,
    /// The single origin allowed by CORS.
    pub frontend_origin: HeaderValue,
    /// Directory served under `/uploads`.
    pub uploads_dir: PathBuf,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name: &str| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let origin = var("FRONTEND_ORIGIN", DEFAULT_FRONTEND_ORIGIN);
        let frontend_origin =
            HeaderValue::from_str(&origin).map_err(|e| AppError::InvalidConfig {
                var: "FRONTEND_ORIGIN",
                reason: e.to_string(),
            })?;

        Ok(Self {
            address: var("API_ADDRESS", DEFAULT_API_ADDRESS),
            frontend_origin,
            uploads_dir: PathBuf::from(var("UPLOADS_DIR", DEFAULT_UPLOADS_DIR)),
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    /// Generation client; the model id is fixed by its configuration.
    pub llm: Arc<dyn GenerationClient>,
    pub store: Arc<InterviewStore>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        llm: Arc<dyn GenerationClient>,
        store: Arc<InterviewStore>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            config,
            llm,
            store,
            verifier,
        }
    }

    /// Production state: Gemini client, empty store, tokens from `AUTH_TOKENS`.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(
            ApiConfig::from_env()?,
            gemini_client()?,
            Arc::new(InterviewStore::new()),
            Arc::new(StaticTokenVerifier::from_env()?),
        ))
    }
}
