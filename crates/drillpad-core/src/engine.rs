//! Central quiz engine.
//!
//! Consolidates the submission, scoring, and review flows behind the
//! storage trait seams: one authoritative path instead of the divergent
//! per-route variants the legacy system accumulated. Submissions mutate
//! and recompute; stats queries derive views without writing.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::achievements;
use crate::error::QuizError;
use crate::model::{
    Achievement, Answer, Problem, ProblemStats, Review, UserRecord, UserStats,
};
use crate::scoring;
use crate::stats;
use crate::traits::{AnswerStore, ProblemCatalog, ReviewStore, UserStatsStore};

/// Outcome of a graded submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub answer: Answer,
    pub stats: UserStats,
    pub achievements: Vec<Achievement>,
}

/// The central engine, generic over its stores.
#[derive(Clone)]
pub struct QuizEngine {
    catalog: Arc<dyn ProblemCatalog>,
    answers: Arc<dyn AnswerStore>,
    reviews: Arc<dyn ReviewStore>,
    user_stats: Arc<dyn UserStatsStore>,
}

impl QuizEngine {
    pub fn new(
        catalog: Arc<dyn ProblemCatalog>,
        answers: Arc<dyn AnswerStore>,
        reviews: Arc<dyn ReviewStore>,
        user_stats: Arc<dyn UserStatsStore>,
    ) -> Self {
        Self {
            catalog,
            answers,
            reviews,
            user_stats,
        }
    }

    pub async fn problems(&self) -> Result<Vec<Problem>, QuizError> {
        self.catalog.all_problems().await
    }

    /// A single problem; unknown ids are a hard error.
    pub async fn problem(&self, problem_id: u32) -> Result<Problem, QuizError> {
        self.catalog
            .problem_by_id(problem_id)
            .await?
            .ok_or_else(|| QuizError::problem_not_found(problem_id))
    }

    /// Grade and persist a submission, then recompute the user's stats
    /// from the full answer store and persist the snapshot.
    ///
    /// A resubmission for the same problem overwrites the previous answer;
    /// derived stats only ever reflect the final state.
    pub async fn submit_answer(
        &self,
        user_id: &str,
        problem_id: u32,
        answer_text: &str,
        time_taken_secs: Option<f64>,
    ) -> Result<SubmissionOutcome, QuizError> {
        if user_id.trim().is_empty() {
            return Err(QuizError::InvalidInput("user id must not be empty".into()));
        }
        let answer_text = answer_text.trim();
        if answer_text.is_empty() {
            return Err(QuizError::InvalidInput("answer must not be empty".into()));
        }

        let problem = self
            .catalog
            .problem_by_id(problem_id)
            .await?
            .ok_or_else(|| QuizError::problem_not_found(problem_id))?;

        let now = Utc::now();
        let is_correct = scoring::check_answer(answer_text, &problem.correct_answer);
        let answer = Answer {
            user_id: user_id.to_string(),
            problem_id,
            answer: answer_text.to_string(),
            is_correct,
            timestamp: now,
            time_taken_secs,
            review: None,
            review_timestamp: None,
        };
        self.answers.put_answer(&answer).await?;

        let stats = self.recompute_stats(user_id, now).await?;
        let achievements = achievements::evaluate(&stats);
        self.user_stats
            .put_user_record(
                user_id,
                &UserRecord {
                    stats: stats.clone(),
                    achievements: achievements.clone(),
                },
            )
            .await?;

        tracing::info!(
            user = user_id,
            problem = problem_id,
            correct = is_correct,
            "answer recorded"
        );

        Ok(SubmissionOutcome {
            answer,
            stats,
            achievements,
        })
    }

    /// Current stats for a user, derived fresh from the answer store.
    /// Queries never persist.
    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats, QuizError> {
        self.recompute_stats(user_id, Utc::now()).await
    }

    pub async fn achievements(&self, user_id: &str) -> Result<Vec<Achievement>, QuizError> {
        let stats = self.user_stats(user_id).await?;
        Ok(achievements::evaluate(&stats))
    }

    /// Aggregate view of a problem. A problem missing from the catalog
    /// yields the zeroed stats rather than an error.
    pub async fn problem_stats(&self, problem_id: u32) -> Result<ProblemStats, QuizError> {
        if self.catalog.problem_by_id(problem_id).await?.is_none() {
            return Ok(ProblemStats::default());
        }
        let all = self.answers.all_answers().await?;
        Ok(stats::compute_problem_stats(problem_id, &all))
    }

    /// Append a review, and stamp it onto the user's stored answer for the
    /// problem when one exists so problem views pick it up.
    pub async fn submit_review(
        &self,
        user_id: &str,
        problem_id: u32,
        content: &str,
        media_url: Option<String>,
    ) -> Result<Review, QuizError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(QuizError::InvalidInput(
                "review content must not be empty".into(),
            ));
        }
        if self.catalog.problem_by_id(problem_id).await?.is_none() {
            return Err(QuizError::problem_not_found(problem_id));
        }

        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            problem_id,
            content: content.to_string(),
            media_url,
            timestamp: now,
        };
        self.reviews.append_review(&review).await?;

        if let Some(mut answer) = self.answers.answer(user_id, problem_id).await? {
            answer.review = Some(content.to_string());
            answer.review_timestamp = Some(now);
            self.answers.put_answer(&answer).await?;
        }

        Ok(review)
    }

    /// Reviews for a problem, newest first.
    pub async fn reviews(&self, problem_id: u32) -> Result<Vec<Review>, QuizError> {
        let mut reviews = self.reviews.reviews_for_problem(problem_id).await?;
        reviews.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(reviews)
    }

    pub async fn user_answer(
        &self,
        user_id: &str,
        problem_id: u32,
    ) -> Result<Option<Answer>, QuizError> {
        self.answers.answer(user_id, problem_id).await
    }

    pub async fn user_answers(
        &self,
        user_id: &str,
    ) -> Result<BTreeMap<u32, Answer>, QuizError> {
        self.answers.answers_for_user(user_id).await
    }

    async fn recompute_stats(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UserStats, QuizError> {
        let all = self.answers.all_answers().await?;
        let total_problems = self.catalog.all_problems().await?.len() as u32;
        let baseline = scoring::global_baseline(&all);
        let rows: Vec<Answer> = all
            .get(user_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        Ok(scoring::compute_user_stats(&rows, &baseline, total_problems, now))
    }
}
