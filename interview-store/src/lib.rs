//! Sessions and their questions, kept in process memory.
//!
//! A [`Session`] belongs to one user and links an ordered list of
//! [`Question`] ids. All operations go through [`InterviewStore`], which
//! serializes writers behind a single `RwLock` so a session and its
//! questions are always updated together.

mod errors;
mod models;
mod store;

pub use errors::StoreError;
pub use models::{NewQuestion, NewSession, Question, Session, SessionWithQuestions};
pub use store::InterviewStore;
