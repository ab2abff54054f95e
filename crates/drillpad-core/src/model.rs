//! Core data model types for drillpad.
//!
//! These are the fundamental types the entire system uses to represent
//! problems, graded answers, reviews, and derived statistics.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single practice problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Unique identifier, ≥ 1.
    pub id: u32,
    /// Human-readable title.
    pub title: String,
    /// The question text shown to the user.
    #[serde(default)]
    pub description: String,
    /// Answer choices in display order.
    #[serde(default)]
    pub options: Vec<ProblemOption>,
    /// The expected answer, compared case-insensitively after trimming.
    pub correct_answer: String,
    /// Difficulty tier.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Subject category (e.g. "Physics"). Older seed documents omit it.
    #[serde(default)]
    pub category: String,
}

/// One answer choice of a problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemOption {
    /// Choice letter (e.g. "A").
    pub id: String,
    /// Choice text.
    pub text: String,
}

/// Problem difficulty tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A user's graded submission for a problem.
///
/// Keyed by `(user_id, problem_id)` in the answer store; a new submission
/// overwrites the previous one, so no history is retained. `is_correct` is
/// fixed at submission time and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub user_id: String,
    pub problem_id: u32,
    /// The submitted answer text, trimmed.
    pub answer: String,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
    /// Self-reported solve time. Frequently absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken_secs: Option<f64>,
    /// Review text stamped onto the answer, if the user reviewed after
    /// answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_timestamp: Option<DateTime<Utc>>,
}

/// A free-text review of a problem, optionally carrying a media reference.
///
/// Reviews are append-only; many may exist per `(user, problem)`,
/// independent of the one-answer-per-key model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: String,
    pub problem_id: u32,
    pub content: String,
    /// Opaque reference returned by the media store (e.g. "/uploads/...").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Derived per-user statistics.
///
/// Recomputed wholesale from the full answer set on every submission,
/// never patched incrementally, so it is consistent with the answer store
/// at computation time and stale between computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Distinct problems whose latest submission is correct.
    pub problems_solved: u32,
    /// Percentage over unique latest-per-problem answers.
    pub accuracy_rate: f64,
    /// Consecutive active calendar days ending today or yesterday.
    pub study_streak: u32,
    /// Summed per-day active spans, floored at 1h once any answer exists.
    pub time_spent_hours: u32,
    /// Every stored row for the user, superseded submissions included.
    pub total_attempts: u32,
    /// Catalog size at computation time.
    pub total_problems: u32,
    pub average_time_secs: f64,
    /// 10 points per problem solved.
    pub total_points: u32,
    /// Integer in [1, 1000]; lower is better.
    pub rank: u32,
    /// This user's accuracy as a percentage of the population mean.
    pub relative_accuracy: f64,
    /// Population mean solve time as a percentage of this user's.
    pub relative_speed: f64,
    pub last_updated: DateTime<Utc>,
}

impl UserStats {
    /// Stats for a user with no stored answers: everything zero, worst
    /// rank, relative metrics at their 100% default.
    pub fn zeroed(total_problems: u32, now: DateTime<Utc>) -> Self {
        Self {
            problems_solved: 0,
            accuracy_rate: 0.0,
            study_streak: 0,
            time_spent_hours: 0,
            total_attempts: 0,
            total_problems,
            average_time_secs: 0.0,
            total_points: 0,
            rank: 1000,
            relative_accuracy: 100.0,
            relative_speed: 100.0,
            last_updated: now,
        }
    }
}

/// Population-wide baseline over users with at least one stored answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub avg_accuracy: f64,
    pub avg_solve_time_secs: f64,
    pub avg_problems_per_user: f64,
    pub top_accuracy: f64,
    /// Minimum nonzero average solve time; 0 when no user has one.
    pub fastest_solve_time_secs: f64,
}

/// Aggregated view of a single problem across all stored answer rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemStats {
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub accuracy: f64,
    /// Distinct submitted answer value → occurrence count.
    pub answer_distribution: HashMap<String, u32>,
    /// Most recent submissions, newest first, capped.
    pub latest_submissions: Vec<SubmissionView>,
    /// Submission rows carrying review text, newest first.
    pub reviews: Vec<EmbeddedReview>,
    /// Distinct users with at least one stored row for this problem.
    pub unique_users: u32,
}

/// One submission row in a problem view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionView {
    pub user_id: String,
    pub answer: String,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// A review carried on a stored answer, surfaced in problem views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedReview {
    pub user_id: String,
    pub review: String,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// An earned badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Per-user snapshot persisted after each submission: the derived stats
/// plus the badges they earned at that point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub stats: UserStats,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}
