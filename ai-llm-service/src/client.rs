use std::sync::Arc;

use async_trait::async_trait;

use crate::{envelope::GenerateContentResponse, error_handler::Result};

/// A generative-text backend.
///
/// Implementations perform one logical generation per call and return the
/// provider envelope as-is. The model is part of the implementation's own
/// configuration.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Sends `prompt` to the model and returns the raw response envelope.
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse>;

    /// Model identifier used for every call (for logs).
    fn model(&self) -> &str;
}

#[async_trait]
impl<C> GenerationClient for Arc<C>
where
    C: GenerationClient + ?Sized,
{
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse> {
        (**self).generate(prompt).await
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}
