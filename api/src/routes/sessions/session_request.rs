use interview_store::{NewQuestion, NewSession, Session};
use serde::{Deserialize, Serialize};

use crate::{
    error_handler::AppError,
    routes::ai::ai_request::{LooseValue, MISSING_FIELDS},
};

/// Body of `POST /api/sessions/create`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub role: Option<String>,
    pub experience: Option<LooseValue>,
    pub topics_to_focus: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

impl CreateSessionRequest {
    pub fn into_new_session(self) -> Result<NewSession, AppError> {
        let missing = || AppError::BadRequest(MISSING_FIELDS.into());

        Ok(NewSession {
            role: self.role.filter(|r| !r.is_empty()).ok_or_else(missing)?,
            experience: self
                .experience
                .as_ref()
                .and_then(LooseValue::present)
                .ok_or_else(missing)?,
            topics_to_focus: self
                .topics_to_focus
                .filter(|t| !t.is_empty())
                .ok_or_else(missing)?,
            description: self.description.filter(|d| !d.is_empty()),
            questions: self.questions,
        })
    }
}

/// `{ "success": true, "session": ... }`
#[derive(Debug, Serialize)]
pub struct SessionResponse<T: Serialize> {
    pub success: bool,
    pub session: T,
}

impl<T: Serialize> SessionResponse<T> {
    pub fn new(session: T) -> Self {
        Self {
            success: true,
            session,
        }
    }
}

pub type CreatedSession = SessionResponse<Session>;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
