//! Request and response payloads for the handler surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drillpad_core::model::{
    Achievement, Answer, Difficulty, Problem, ProblemOption, Review, UserStats,
};

/// Public view of a problem. Never carries the correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemView {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub options: Vec<ProblemOption>,
    pub difficulty: Difficulty,
    pub category: String,
}

impl From<Problem> for ProblemView {
    fn from(p: Problem) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            options: p.options,
            difficulty: p.difficulty,
            category: p.category,
        }
    }
}

/// A graded submission as returned to the submitting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerView {
    pub answer: String,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<Answer> for AnswerView {
    fn from(a: Answer) -> Self {
        Self {
            answer: a.answer,
            is_correct: a.is_correct,
            timestamp: a.timestamp,
        }
    }
}

/// Body of a submission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
    #[serde(default)]
    pub time_taken_secs: Option<f64>,
}

/// Response to a graded submission: the stored answer plus the freshly
/// recomputed stats and badges.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub answer: AnswerView,
    pub stats: UserStats,
    pub achievements: Vec<Achievement>,
}

/// Body of a review request. `media_url` comes from a prior upload call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
}

/// Public view of a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Review> for ReviewView {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            content: r.content,
            media_url: r.media_url,
            author: r.user_id,
            timestamp: r.timestamp,
        }
    }
}

/// Response to a media upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// The client-supplied filename.
    pub filename: String,
    /// The stored reference to thread into a review.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_view_hides_correct_answer() {
        let problem = Problem {
            id: 1,
            title: "Equilibrium".into(),
            description: "desc".into(),
            options: vec![ProblemOption {
                id: "C".into(),
                text: "Both rates become equal".into(),
            }],
            correct_answer: "C".into(),
            difficulty: Difficulty::Easy,
            category: "Chemistry".into(),
        };
        let view = ProblemView::from(problem);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("correct_answer"));
        assert!(json.contains("Both rates become equal"));
    }
}
