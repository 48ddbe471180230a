use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::StoreError,
    models::{NewQuestion, NewSession, Question, Session, SessionWithQuestions},
};

#[derive(Default)]
struct Inner {
    sessions: HashMap<Uuid, Session>,
    questions: HashMap<Uuid, Question>,
    seq: u64,
}

impl Inner {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn owned_session(&self, id: Uuid, user: &str) -> Result<&Session, StoreError> {
        let session = self
            .sessions
            .get(&id)
            .ok_or(StoreError::SessionNotFound(id))?;
        if session.user != user {
            return Err(StoreError::NotOwner { session: id });
        }
        Ok(session)
    }

    fn insert_questions(&mut self, session_id: Uuid, new: Vec<NewQuestion>) -> Vec<Question> {
        let now = Utc::now();
        let mut created = Vec::with_capacity(new.len());
        for q in new {
            let question = Question {
                id: Uuid::new_v4(),
                session: session_id,
                question: q.question,
                answer: q.answer,
                note: None,
                is_pinned: false,
                created_at: now,
                updated_at: now,
                seq: self.next_seq(),
            };
            self.questions.insert(question.id, question.clone());
            created.push(question);
        }
        created
    }

    /// Questions of `session` in link order.
    fn linked(&self, session: &Session) -> Vec<Question> {
        session
            .questions
            .iter()
            .filter_map(|id| self.questions.get(id).cloned())
            .collect()
    }

    /// Questions of `session`, pinned first, then oldest first.
    fn pinned_first(&self, session: &Session) -> SessionWithQuestions {
        let mut questions = self.linked(session);
        questions.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.seq.cmp(&b.seq))
        });
        SessionWithQuestions::from_parts(session, questions)
    }

    /// Runs `f` on a question whose session `user` owns.
    fn update_question<F>(&mut self, id: Uuid, user: &str, f: F) -> Result<Question, StoreError>
    where
        F: FnOnce(&mut Question),
    {
        let session_id = self
            .questions
            .get(&id)
            .map(|q| q.session)
            .ok_or(StoreError::QuestionNotFound(id))?;
        self.owned_session(session_id, user)?;

        let question = self
            .questions
            .get_mut(&id)
            .ok_or(StoreError::QuestionNotFound(id))?;
        f(question);
        question.updated_at = Utc::now();
        Ok(question.clone())
    }
}

/// Shared, in-memory store of sessions and questions.
#[derive(Default)]
pub struct InterviewStore {
    inner: RwLock<Inner>,
}

impl InterviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session for `user` together with its initial questions.
    ///
    /// The returned session lists question ids in the input order.
    pub async fn create_session(&self, user: &str, new: NewSession) -> Session {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let id = Uuid::new_v4();

        let created = inner.insert_questions(id, new.questions);
        let session = Session {
            id,
            user: user.to_string(),
            role: new.role,
            experience: new.experience,
            topics_to_focus: new.topics_to_focus,
            description: new.description,
            questions: created.iter().map(|q| q.id).collect(),
            created_at: now,
            updated_at: now,
            seq: inner.next_seq(),
        };
        inner.sessions.insert(id, session.clone());

        info!(session = %id, user, questions = created.len(), "session created");
        session
    }

    /// Sessions owned by `user`, newest first, questions in link order.
    pub async fn sessions_for_user(&self, user: &str) -> Vec<SessionWithQuestions> {
        let inner = self.inner.read().await;
        let mut owned: Vec<&Session> = inner
            .sessions
            .values()
            .filter(|s| s.user == user)
            .collect();
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        owned
            .into_iter()
            .map(|s| SessionWithQuestions::from_parts(s, inner.linked(s)))
            .collect()
    }

    /// One session owned by `user`, questions pinned first then oldest first.
    pub async fn session_by_id(
        &self,
        id: Uuid,
        user: &str,
    ) -> Result<SessionWithQuestions, StoreError> {
        let inner = self.inner.read().await;
        let session = inner.owned_session(id, user)?;
        Ok(inner.pinned_first(session))
    }

    /// Deletes a session and every question linked to it.
    ///
    /// Returns the number of questions removed.
    pub async fn delete_session(&self, id: Uuid, user: &str) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_session(id, user)?;

        let before = inner.questions.len();
        inner.questions.retain(|_, q| q.session != id);
        let removed = before - inner.questions.len();
        inner.sessions.remove(&id);

        info!(session = %id, user, removed_questions = removed, "session deleted");
        Ok(removed)
    }

    /// Appends questions to a session owned by `user`.
    pub async fn add_questions(
        &self,
        session_id: Uuid,
        user: &str,
        questions: Vec<NewQuestion>,
    ) -> Result<Vec<Question>, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_session(session_id, user)?;

        let created = inner.insert_questions(session_id, questions);
        if let Some(session) = inner.sessions.get_mut(&session_id) {
            session.questions.extend(created.iter().map(|q| q.id));
            session.updated_at = Utc::now();
        }

        debug!(session = %session_id, added = created.len(), "questions added");
        Ok(created)
    }

    /// Flips the pinned flag of a question.
    pub async fn toggle_pin(&self, id: Uuid, user: &str) -> Result<Question, StoreError> {
        let mut inner = self.inner.write().await;
        inner.update_question(id, user, |q| q.is_pinned = !q.is_pinned)
    }

    /// Replaces the note of a question.
    pub async fn update_note(
        &self,
        id: Uuid,
        user: &str,
        note: String,
    ) -> Result<Question, StoreError> {
        let mut inner = self.inner.write().await;
        inner.update_question(id, user, |q| q.note = Some(note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session(role: &str, questions: &[&str]) -> NewSession {
        NewSession {
            role: role.into(),
            experience: "3".into(),
            topics_to_focus: "Rust".into(),
            description: None,
            questions: questions
                .iter()
                .map(|q| NewQuestion {
                    question: q.to_string(),
                    answer: format!("answer to {q}"),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn create_links_questions_in_order() {
        let store = InterviewStore::new();
        let session = store.create_session("u1", new_session("Dev", &["a", "b", "c"])).await;

        assert_eq!(session.questions.len(), 3);
        let full = store.session_by_id(session.id, "u1").await.unwrap();
        let texts: Vec<_> = full.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
        assert!(full.questions.iter().all(|q| q.session == session.id && !q.is_pinned));
    }

    #[tokio::test]
    async fn sessions_are_listed_newest_first_per_user() {
        let store = InterviewStore::new();
        let first = store.create_session("u1", new_session("First", &[])).await;
        let second = store.create_session("u1", new_session("Second", &[])).await;
        store.create_session("u2", new_session("Other", &[])).await;

        let mine = store.sessions_for_user("u1").await;
        let ids: Vec<_> = mine.iter().map(|s| s.id).collect();
        assert_eq!(ids, [second.id, first.id]);
        assert!(store.sessions_for_user("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn pinned_questions_come_first() {
        let store = InterviewStore::new();
        let session = store.create_session("u1", new_session("Dev", &["a", "b", "c"])).await;

        let pinned = store.toggle_pin(session.questions[2], "u1").await.unwrap();
        assert!(pinned.is_pinned);

        let full = store.session_by_id(session.id, "u1").await.unwrap();
        let texts: Vec<_> = full.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, ["c", "a", "b"]);

        let listed = store.sessions_for_user("u1").await;
        let texts: Vec<_> = listed[0].questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);

        let unpinned = store.toggle_pin(session.questions[2], "u1").await.unwrap();
        assert!(!unpinned.is_pinned);
    }

    #[tokio::test]
    async fn delete_removes_questions_and_checks_owner() {
        let store = InterviewStore::new();
        let session = store.create_session("u1", new_session("Dev", &["a", "b"])).await;
        let keep = store.create_session("u1", new_session("Keep", &["z"])).await;

        assert_eq!(
            store.delete_session(session.id, "u2").await,
            Err(StoreError::NotOwner { session: session.id })
        );
        assert_eq!(store.delete_session(session.id, "u1").await, Ok(2));
        assert_eq!(
            store.session_by_id(session.id, "u1").await,
            Err(StoreError::SessionNotFound(session.id))
        );
        assert_eq!(
            store.toggle_pin(session.questions[0], "u1").await,
            Err(StoreError::QuestionNotFound(session.questions[0]))
        );
        assert_eq!(store.session_by_id(keep.id, "u1").await.unwrap().questions.len(), 1);
    }

    #[tokio::test]
    async fn add_questions_appends_to_owned_session() {
        let store = InterviewStore::new();
        let session = store.create_session("u1", new_session("Dev", &["a"])).await;

        let added = store
            .add_questions(
                session.id,
                "u1",
                vec![NewQuestion {
                    question: "b".into(),
                    answer: "B".into(),
                }],
            )
            .await
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(store.session_by_id(session.id, "u1").await.unwrap().questions.len(), 2);

        assert!(matches!(
            store.add_questions(session.id, "u2", vec![]).await,
            Err(StoreError::NotOwner { .. })
        ));
        let missing = Uuid::new_v4();
        assert_eq!(
            store.add_questions(missing, "u1", vec![]).await,
            Err(StoreError::SessionNotFound(missing))
        );
    }

    #[tokio::test]
    async fn notes_are_owner_only() {
        let store = InterviewStore::new();
        let session = store.create_session("u1", new_session("Dev", &["a"])).await;
        let qid = session.questions[0];

        let q = store.update_note(qid, "u1", "remember lifetimes".into()).await.unwrap();
        assert_eq!(q.note.as_deref(), Some("remember lifetimes"));
        assert!(q.updated_at >= q.created_at);

        assert!(matches!(
            store.update_note(qid, "u2", "x".into()).await,
            Err(StoreError::NotOwner { .. })
        ));
    }

    #[tokio::test]
    async fn documents_serialize_like_the_api_expects() {
        let store = InterviewStore::new();
        let session = store.create_session("u1", new_session("Dev", &["a"])).await;
        let full = store.session_by_id(session.id, "u1").await.unwrap();

        let v = serde_json::to_value(&full).unwrap();
        assert_eq!(v["_id"], session.id.to_string());
        assert_eq!(v["topicsToFocus"], "Rust");
        assert_eq!(v["questions"][0]["isPinned"], false);
        assert!(v["questions"][0].get("seq").is_none());
        assert!(v.get("description").is_none());
    }
}
