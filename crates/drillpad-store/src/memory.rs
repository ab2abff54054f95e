//! In-memory store for testing.
//!
//! Implements every storage trait over plain maps so the engine and
//! handlers can be exercised without touching the filesystem.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use drillpad_core::error::QuizError;
use drillpad_core::model::{Answer, Problem, Review, UserRecord};
use drillpad_core::traits::{AnswerStore, ProblemCatalog, ReviewStore, UserStatsStore};

/// An in-memory fake of the whole persistence layer.
#[derive(Default)]
pub struct MemoryStore {
    problems: RwLock<Vec<Problem>>,
    answers: RwLock<BTreeMap<String, BTreeMap<u32, Answer>>>,
    reviews: RwLock<BTreeMap<u32, Vec<Review>>>,
    stats: RwLock<BTreeMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a catalog.
    pub fn with_problems(problems: Vec<Problem>) -> Self {
        Self {
            problems: RwLock::new(problems),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ProblemCatalog for MemoryStore {
    async fn all_problems(&self) -> Result<Vec<Problem>, QuizError> {
        let mut problems = self.problems.read().await.clone();
        problems.sort_by_key(|p| p.id);
        Ok(problems)
    }

    async fn problem_by_id(&self, problem_id: u32) -> Result<Option<Problem>, QuizError> {
        Ok(self
            .problems
            .read()
            .await
            .iter()
            .find(|p| p.id == problem_id)
            .cloned())
    }

    async fn replace_problems(&self, problems: Vec<Problem>) -> Result<(), QuizError> {
        *self.problems.write().await = problems;
        Ok(())
    }
}

#[async_trait]
impl AnswerStore for MemoryStore {
    async fn answer(
        &self,
        user_id: &str,
        problem_id: u32,
    ) -> Result<Option<Answer>, QuizError> {
        Ok(self
            .answers
            .read()
            .await
            .get(user_id)
            .and_then(|rows| rows.get(&problem_id))
            .cloned())
    }

    async fn put_answer(&self, answer: &Answer) -> Result<(), QuizError> {
        self.answers
            .write()
            .await
            .entry(answer.user_id.clone())
            .or_default()
            .insert(answer.problem_id, answer.clone());
        Ok(())
    }

    async fn answers_for_user(
        &self,
        user_id: &str,
    ) -> Result<BTreeMap<u32, Answer>, QuizError> {
        Ok(self
            .answers
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn all_answers(
        &self,
    ) -> Result<BTreeMap<String, BTreeMap<u32, Answer>>, QuizError> {
        Ok(self.answers.read().await.clone())
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn append_review(&self, review: &Review) -> Result<(), QuizError> {
        self.reviews
            .write()
            .await
            .entry(review.problem_id)
            .or_default()
            .push(review.clone());
        Ok(())
    }

    async fn reviews_for_problem(
        &self,
        problem_id: u32,
    ) -> Result<Vec<Review>, QuizError> {
        Ok(self
            .reviews
            .read()
            .await
            .get(&problem_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl UserStatsStore for MemoryStore {
    async fn user_record(&self, user_id: &str) -> Result<Option<UserRecord>, QuizError> {
        Ok(self.stats.read().await.get(user_id).cloned())
    }

    async fn put_user_record(
        &self,
        user_id: &str,
        record: &UserRecord,
    ) -> Result<(), QuizError> {
        self.stats
            .write()
            .await
            .insert(user_id.to_string(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn put_overwrites_same_key() {
        let store = MemoryStore::new();
        let mut answer = Answer {
            user_id: "alice".into(),
            problem_id: 1,
            answer: "C".into(),
            is_correct: true,
            timestamp: Utc::now(),
            time_taken_secs: None,
            review: None,
            review_timestamp: None,
        };
        store.put_answer(&answer).await.unwrap();
        answer.answer = "D".into();
        answer.is_correct = false;
        store.put_answer(&answer).await.unwrap();

        let stored = store.answer("alice", 1).await.unwrap().unwrap();
        assert_eq!(stored.answer, "D");
        assert_eq!(store.answers_for_user("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeded_catalog_is_sorted() {
        let make = |id: u32| Problem {
            id,
            title: format!("p{id}"),
            description: String::new(),
            options: vec![],
            correct_answer: "A".into(),
            difficulty: Default::default(),
            category: String::new(),
        };
        let store = MemoryStore::with_problems(vec![make(2), make(1)]);
        let ids: Vec<u32> = store
            .all_problems()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
