use interview_ai::QuestionsParams;
use serde::Deserialize;

use crate::error_handler::AppError;

pub const MISSING_FIELDS: &str = "Missing required fields";

const MAX_ROLE_CHARS: usize = 200;
const MAX_EXPERIENCE_CHARS: usize = 50;
const MAX_TOPICS_CHARS: usize = 1000;
const MAX_QUESTION_CHARS: usize = 2000;
const MAX_QUESTION_COUNT: u32 = 50;

/// A scalar the frontend may send either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Number(serde_json::Number),
    Text(String),
}

impl LooseValue {
    /// The value as text, or `None` for `""` and `0` (both count as absent).
    pub fn present(&self) -> Option<String> {
        match self {
            LooseValue::Text(s) if s.is_empty() => None,
            LooseValue::Text(s) => Some(s.clone()),
            LooseValue::Number(n) if n.as_f64() == Some(0.0) => None,
            LooseValue::Number(n) => Some(n.to_string()),
        }
    }
}

fn present(v: &Option<LooseValue>) -> Option<String> {
    v.as_ref().and_then(LooseValue::present)
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Body of `POST /api/ai/generate-questions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    pub role: Option<LooseValue>,
    pub experience: Option<LooseValue>,
    pub topics_to_focus: Option<LooseValue>,
    pub number_of_questions: Option<LooseValue>,
}

impl GenerateQuestionsRequest {
    /// Checks presence first, then length caps and the question count range.
    pub fn validate(&self) -> Result<QuestionsParams, AppError> {
        let missing = || AppError::BadRequest(MISSING_FIELDS.into());

        let role = present(&self.role).ok_or_else(missing)?;
        let experience = present(&self.experience).ok_or_else(missing)?;
        let focus_topics = present(&self.topics_to_focus).ok_or_else(missing)?;
        let count = present(&self.number_of_questions).ok_or_else(missing)?;

        check_len("role", &role, MAX_ROLE_CHARS)?;
        check_len("experience", &experience, MAX_EXPERIENCE_CHARS)?;
        check_len("topicsToFocus", &focus_topics, MAX_TOPICS_CHARS)?;

        let question_count = count
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (1..=MAX_QUESTION_COUNT).contains(n))
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "numberOfQuestions must be an integer between 1 and {MAX_QUESTION_COUNT}"
                ))
            })?;

        Ok(QuestionsParams {
            role,
            experience,
            focus_topics,
            question_count,
        })
    }
}

/// Body of `POST /api/ai/generate-explanation`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateExplanationRequest {
    pub question: Option<String>,
}

impl GenerateExplanationRequest {
    pub fn validate(&self) -> Result<&str, AppError> {
        let question = self
            .question
            .as_deref()
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.into()))?;
        check_len("question", question, MAX_QUESTION_CHARS)?;
        Ok(question)
    }
}
