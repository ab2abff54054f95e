//! Handler error mapping.

use drillpad_core::error::QuizError;
use thiserror::Error;

/// A handler failure carrying its HTTP-equivalent status code.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub QuizError);

impl ApiError {
    /// The status code an HTTP binding should respond with.
    pub fn status(&self) -> u16 {
        match &self.0 {
            QuizError::NotFound { .. } => 404,
            QuizError::InvalidInput(_) => 400,
            QuizError::MalformedRecord { .. } => 500,
            QuizError::StorageUnavailable(_) => 503,
        }
    }
}
