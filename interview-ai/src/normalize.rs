//! Response normalizer: envelope → text → typed payload.

use ai_llm_service::GenerateContentResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::GeneratedPayload;

/// Concatenates the text of every part of the first candidate.
///
/// Missing fields at any depth (no candidates, no content, no parts, parts
/// without text) yield an empty contribution; this never fails.
pub fn extract_text(resp: &GenerateContentResponse) -> String {
    resp.candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.as_ref())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Removes a surrounding Markdown code fence (```` ```json ... ``` ````), if any.
///
/// Text without a leading fence is returned trimmed but otherwise untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Decodes model text into `T`, with graceful degradation.
///
/// - JSON matching `T` → [`GeneratedPayload::Structured`]
/// - JSON of any other shape → [`GeneratedPayload::Json`] (passed through)
/// - not JSON at all → [`GeneratedPayload::RawText`] holding the original text
pub fn decode_payload<T>(text: &str) -> GeneratedPayload<T>
where
    T: DeserializeOwned,
{
    let candidate = strip_code_fence(text);

    let value: Value = match serde_json::from_str(candidate) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                error = %e,
                text_len = text.len(),
                "model response was not valid JSON, returning text"
            );
            return GeneratedPayload::RawText(text.to_string());
        }
    };

    match serde_json::from_value::<T>(value.clone()) {
        Ok(t) => {
            debug!("model response matched the expected shape");
            GeneratedPayload::Structured(t)
        }
        Err(e) => {
            warn!(
                error = %e,
                "model response is JSON of an unexpected shape, passing it through"
            );
            GeneratedPayload::Json(value)
        }
    }
}
