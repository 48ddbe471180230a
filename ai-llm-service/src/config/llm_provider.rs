/// Represents the provider (backend) used for text generation.
///
/// Only Google Gemini is wired today. Adding another backend means adding a
/// variant here and a matching client under `services`.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// assert_eq!(LlmProvider::Gemini.as_str(), "gemini");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Generative Language API (`generateContent`).
    Gemini,
}

impl LlmProvider {
    /// Stable lowercase name, used in logs and in `LLM_KIND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            other => Err(other.to_string()),
        }
    }
}
