//! Quiz service error types.
//!
//! Defined in `drillpad-core` so stores, the engine, and request handlers
//! share one classification without string matching. Stores surface
//! `StorageUnavailable`/`MalformedRecord` instead of substituting zeroed
//! results; "no answers yet" is an empty document, not an error.

use thiserror::Error;

/// Errors that can occur across the quiz engine and its stores.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The referenced problem or user does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A required submission field is missing or unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backing store could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A persisted record failed structural validation.
    #[error("malformed record in {store}: {detail}")]
    MalformedRecord { store: String, detail: String },
}

impl QuizError {
    pub fn problem_not_found(problem_id: u32) -> Self {
        QuizError::NotFound {
            kind: "problem",
            id: problem_id.to_string(),
        }
    }

    pub fn user_not_found(user_id: &str) -> Self {
        QuizError::NotFound {
            kind: "user",
            id: user_id.to_string(),
        }
    }

    /// Returns `true` when the caller sent a bad request, as opposed to a
    /// server-side storage fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QuizError::NotFound { .. } | QuizError::InvalidInput(_)
        )
    }
}
