use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question/answer record linked to one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub session: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Insertion counter; breaks `created_at` ties.
    #[serde(skip)]
    pub(crate) seq: u64,
}

/// A user's interview-prep session. `questions` holds ids in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: String,
    pub role: String,
    pub experience: String,
    pub topics_to_focus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub(crate) seq: u64,
}

/// A session with its question documents populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionWithQuestions {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: String,
    pub role: String,
    pub experience: String,
    pub topics_to_focus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionWithQuestions {
    pub(crate) fn from_parts(session: &Session, questions: Vec<Question>) -> Self {
        Self {
            id: session.id,
            user: session.user.clone(),
            role: session.role.clone(),
            experience: session.experience.clone(),
            topics_to_focus: session.topics_to_focus.clone(),
            description: session.description.clone(),
            questions,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// Input for a new question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// Input for a new session, with its initial questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub role: String,
    pub experience: String,
    pub topics_to_focus: String,
    pub description: Option<String>,
    pub questions: Vec<NewQuestion>,
}
