//! Bearer-token guard for the `/api` routes.
//!
//! Tokens are issued elsewhere; this layer only maps a presented token to a
//! user id through a [`TokenVerifier`].

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{core::app_state::AppState, error_handler::AppError};

/// The caller, as resolved by [`protect`]. Handlers read it via `Extension`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns the user a token belongs to, or `None` if it is not valid.
    async fn verify(&self, token: &str) -> Option<AuthUser>;
}

/// Verifier backed by a fixed `token -> user id` table.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    /// Reads `AUTH_TOKENS` (`token=user_id` pairs, comma separated).
    pub fn from_env() -> Result<Self, AppError> {
        let raw = std::env::var("AUTH_TOKENS").unwrap_or_default();
        let verifier = Self::parse(&raw)?;
        if verifier.tokens.is_empty() {
            warn!("AUTH_TOKENS is empty; every protected route will answer 401");
        }
        Ok(verifier)
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let mut tokens = HashMap::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (token, user) = entry
                .split_once('=')
                .map(|(t, u)| (t.trim(), u.trim()))
                .filter(|(t, u)| !t.is_empty() && !u.is_empty())
                .ok_or_else(|| AppError::InvalidConfig {
                    var: "AUTH_TOKENS",
                    reason: "expected comma separated token=user_id pairs".into(),
                })?;
            tokens.insert(token.to_string(), user.to_string());
        }
        Ok(Self { tokens })
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Option<AuthUser> {
        self.tokens
            .get(token)
            .map(|id| AuthUser { id: id.clone() })
    }
}

/// Rejects requests without a valid `Authorization: Bearer <token>` header
/// and attaches [`AuthUser`] to the rest.
pub async fn protect(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized("Not authorized, no token"))?;

    let user = state.verifier.verify(token).await.ok_or_else(|| {
        debug!(path = %req.uri().path(), "rejected unknown bearer token");
        AppError::Unauthorized("Not authorized, token failed")
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_token_pairs() {
        let v = StaticTokenVerifier::parse(" t1=alice , t2 = bob,").unwrap();
        assert_eq!(v.verify("t1").await, Some(AuthUser { id: "alice".into() }));
        assert_eq!(v.verify("t2").await, Some(AuthUser { id: "bob".into() }));
        assert_eq!(v.verify("t3").await, None);

        assert!(StaticTokenVerifier::parse("").unwrap().tokens.is_empty());
    }

    #[test]
    fn rejects_malformed_pairs() {
        for raw in ["t1", "=alice", "t1=", "t1=alice,broken"] {
            assert!(StaticTokenVerifier::parse(raw).is_err(), "{raw}");
        }
    }
}
