use interview_store::{NewQuestion, Question};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/questions/add`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionsRequest {
    pub session_id: Option<Uuid>,
    pub questions: Option<Vec<NewQuestion>>,
}

/// Body of `POST /api/questions/{id}/note`. A missing note clears it to `""`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub note: String,
}

/// `{ "success": true, "question": ... }`
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub success: bool,
    pub question: Question,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            success: true,
            question,
        }
    }
}
