//! Storage trait definitions for the quiz engine.
//!
//! These async traits are implemented by the `drillpad-store` crate. The
//! engine only ever sees the seams, so the same code path runs against the
//! flat-file JSON store in production and an in-memory fake in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::QuizError;
use crate::model::{Answer, Problem, Review, UserRecord};

/// Catalog of problems. Read-mostly; `replace_problems` exists for the
/// import path and whole-document seeding.
#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    /// All problems, ordered by id.
    async fn all_problems(&self) -> Result<Vec<Problem>, QuizError>;

    async fn problem_by_id(&self, problem_id: u32) -> Result<Option<Problem>, QuizError>;

    /// Overwrite the catalog document with the given problems.
    async fn replace_problems(&self, problems: Vec<Problem>) -> Result<(), QuizError>;
}

/// Latest answer per `(user, problem)`. A put overwrites any previous
/// answer for the same key; no history is retained.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn answer(&self, user_id: &str, problem_id: u32)
        -> Result<Option<Answer>, QuizError>;

    async fn put_answer(&self, answer: &Answer) -> Result<(), QuizError>;

    async fn answers_for_user(&self, user_id: &str)
        -> Result<BTreeMap<u32, Answer>, QuizError>;

    /// The complete store, `user_id → problem_id → Answer`. The scoring
    /// engine needs the whole thing to compute the population baseline.
    async fn all_answers(
        &self,
    ) -> Result<BTreeMap<String, BTreeMap<u32, Answer>>, QuizError>;
}

/// Append-only review lists, one per problem.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn append_review(&self, review: &Review) -> Result<(), QuizError>;

    /// Reviews in append order.
    async fn reviews_for_problem(&self, problem_id: u32)
        -> Result<Vec<Review>, QuizError>;
}

/// Persisted per-user stats snapshots. Derived data, not source of truth:
/// the engine recomputes from the answer store and writes through here.
#[async_trait]
pub trait UserStatsStore: Send + Sync {
    async fn user_record(&self, user_id: &str) -> Result<Option<UserRecord>, QuizError>;

    async fn put_user_record(
        &self,
        user_id: &str,
        record: &UserRecord,
    ) -> Result<(), QuizError>;
}

/// Opaque media storage for review attachments.
///
/// The engine never inspects media content; it only threads the returned
/// reference through a `Review`.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Validate and persist an uploaded file, returning its stored
    /// reference (an opaque URL/path).
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, QuizError>;
}
