use std::time::Instant;

use ai_llm_service::GenerationClient;
use tracing::{debug, info, instrument};

use crate::{
    error::InterviewAiError,
    normalize::{decode_payload, extract_text},
    prompt::{build_concept_explanation_prompt, build_question_answer_prompt},
    types::{ConceptExplanation, Explanation, GeneratedPayload, QaPair, QuestionsParams},
};

/// Generates interview questions with answers.
///
/// Non-JSON model output is not an error: it comes back as
/// [`GeneratedPayload::RawText`].
///
/// # Errors
/// - [`InterviewAiError::Generation`] if the client call fails
/// - [`InterviewAiError::EmptyResponse`] if the envelope carries no text
#[instrument(
    name = "generate_interview_questions",
    skip_all,
    fields(model = client.model(), count = params.question_count)
)]
pub async fn generate_interview_questions(
    client: &dyn GenerationClient,
    params: &QuestionsParams,
) -> Result<GeneratedPayload<Vec<QaPair>>, InterviewAiError> {
    let started = Instant::now();
    let prompt = build_question_answer_prompt(
        &params.role,
        &params.experience,
        &params.focus_topics,
        params.question_count,
    );

    info!("generating interview questions");

    let text = generate_text(client, &prompt).await?;
    let payload = decode_payload::<Vec<QaPair>>(&text);

    if let GeneratedPayload::Structured(pairs) = &payload {
        if pairs.len() != params.question_count as usize {
            debug!(
                requested = params.question_count,
                returned = pairs.len(),
                "model returned a different number of questions"
            );
        }
    }

    info!(
        kind = payload.kind(),
        latency_ms = started.elapsed().as_millis(),
        "interview questions generated"
    );

    Ok(payload)
}

/// Generates a concept explanation for `question`.
///
/// The model text is returned as-is, without JSON decoding: explanations are
/// prose and must survive a model that ignores the JSON instruction.
///
/// # Errors
/// - [`InterviewAiError::Generation`] if the client call fails
/// - [`InterviewAiError::EmptyResponse`] if the envelope carries no text
#[instrument(name = "generate_concept_explanation", skip_all, fields(model = client.model()))]
pub async fn generate_concept_explanation(
    client: &dyn GenerationClient,
    question: &str,
) -> Result<Explanation, InterviewAiError> {
    let started = Instant::now();
    let prompt = build_concept_explanation_prompt(question);

    info!("generating concept explanation");

    let text = generate_text(client, &prompt).await?;

    debug!(
        follows_json_contract = decode_payload::<ConceptExplanation>(&text).is_structured(),
        latency_ms = started.elapsed().as_millis(),
        "concept explanation generated"
    );

    Ok(Explanation { explanation: text })
}

/// One client call, reduced to its text. Empty text is an error.
async fn generate_text(
    client: &dyn GenerationClient,
    prompt: &str,
) -> Result<String, InterviewAiError> {
    let response = client.generate(prompt).await?;
    let text = extract_text(&response);

    if text.is_empty() {
        return Err(InterviewAiError::EmptyResponse);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::{
        AiLlmError, GenerateContentResponse,
        error_handler::{Provider, ProviderError, ProviderErrorKind},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stand-in client returning a fixed text and remembering prompts.
    struct StubClient {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubClient {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationClient for StubClient {
        async fn generate(&self, prompt: &str) -> ai_llm_service::Result<GenerateContentResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Some(text) => Ok(GenerateContentResponse::from_text(text.clone())),
                None => Err(AiLlmError::from(ProviderError::new(
                    Provider::Gemini,
                    ProviderErrorKind::MissingApiKey,
                ))),
            }
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn params() -> QuestionsParams {
        QuestionsParams {
            role: "Frontend Developer".into(),
            experience: "2".into(),
            focus_topics: "React, CSS".into(),
            question_count: 1,
        }
    }

    #[tokio::test]
    async fn questions_structured() {
        let client = StubClient::replying(r#"[{"question":"Q1","answer":"A1"}]"#);
        let out = generate_interview_questions(&client, &params()).await.unwrap();

        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"[{"question":"Q1","answer":"A1"}]"#
        );
        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("<user_input>Frontend Developer</user_input>"));
    }

    #[tokio::test]
    async fn questions_soft_fallback() {
        let client = StubClient::replying("not json");
        let out = generate_interview_questions(&client, &params()).await.unwrap();
        assert_eq!(out, GeneratedPayload::RawText("not json".into()));
    }

    #[tokio::test]
    async fn empty_text_is_an_error() {
        let client = StubClient::replying("");
        let err = generate_interview_questions(&client, &params()).await.unwrap_err();
        assert!(matches!(err, InterviewAiError::EmptyResponse));

        let err = generate_concept_explanation(&client, "q").await.unwrap_err();
        assert!(matches!(err, InterviewAiError::EmptyResponse));
    }

    #[tokio::test]
    async fn whitespace_text_is_passed_through() {
        let client = StubClient::replying("  \n");
        let out = generate_interview_questions(&client, &params()).await.unwrap();
        assert_eq!(out, GeneratedPayload::RawText("  \n".into()));

        let out = generate_concept_explanation(&client, "q").await.unwrap();
        assert_eq!(out.explanation, "  \n");
    }

    #[tokio::test]
    async fn client_errors_propagate() {
        let client = StubClient::failing();
        let err = generate_interview_questions(&client, &params()).await.unwrap_err();
        assert_eq!(err.code(), "LLM_MISSING_API_KEY");
    }

    #[tokio::test]
    async fn explanation_is_returned_verbatim() {
        let json_text = r#"{"title":"T","explanation":"E"}"#;
        let client = StubClient::replying(json_text);
        let out = generate_concept_explanation(&client, "What is T?").await.unwrap();
        assert_eq!(out.explanation, json_text);

        let prose = "Ownership means each value has a single owner.";
        let client = StubClient::replying(prose);
        let out = generate_concept_explanation(&client, "What is ownership?").await.unwrap();
        assert_eq!(serde_json::to_value(&out).unwrap(), serde_json::json!({ "explanation": prose }));
    }
}
