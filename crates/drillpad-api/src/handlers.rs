//! Request handlers delegating to the quiz engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use drillpad_core::engine::QuizEngine;
use drillpad_core::model::{Achievement, ProblemStats, UserStats};
use drillpad_core::traits::MediaStore;

use crate::error::ApiError;
use crate::types::{
    AnswerView, ProblemView, ReviewRequest, ReviewView, SubmitAnswerRequest,
    SubmitAnswerResponse, UploadResponse,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: QuizEngine,
    pub media: Arc<dyn MediaStore>,
}

pub async fn list_problems(state: &AppState) -> Result<Vec<ProblemView>, ApiError> {
    let problems = state.engine.problems().await?;
    Ok(problems.into_iter().map(ProblemView::from).collect())
}

pub async fn get_problem(state: &AppState, problem_id: u32) -> Result<ProblemView, ApiError> {
    Ok(state.engine.problem(problem_id).await?.into())
}

pub async fn submit_answer(
    state: &AppState,
    user_id: &str,
    problem_id: u32,
    request: SubmitAnswerRequest,
) -> Result<SubmitAnswerResponse, ApiError> {
    let outcome = state
        .engine
        .submit_answer(user_id, problem_id, &request.answer, request.time_taken_secs)
        .await?;
    Ok(SubmitAnswerResponse {
        answer: outcome.answer.into(),
        stats: outcome.stats,
        achievements: outcome.achievements,
    })
}

/// The user's stored answer for a problem, if any. Absence is not an
/// error; clients render an unanswered state.
pub async fn get_user_answer(
    state: &AppState,
    user_id: &str,
    problem_id: u32,
) -> Result<Option<AnswerView>, ApiError> {
    Ok(state
        .engine
        .user_answer(user_id, problem_id)
        .await?
        .map(AnswerView::from))
}

pub async fn get_user_answers(
    state: &AppState,
    user_id: &str,
) -> Result<BTreeMap<u32, AnswerView>, ApiError> {
    let answers = state.engine.user_answers(user_id).await?;
    Ok(answers
        .into_iter()
        .map(|(problem_id, answer)| (problem_id, answer.into()))
        .collect())
}

pub async fn get_user_stats(state: &AppState, user_id: &str) -> Result<UserStats, ApiError> {
    Ok(state.engine.user_stats(user_id).await?)
}

pub async fn get_achievements(
    state: &AppState,
    user_id: &str,
) -> Result<Vec<Achievement>, ApiError> {
    Ok(state.engine.achievements(user_id).await?)
}

pub async fn get_problem_stats(
    state: &AppState,
    problem_id: u32,
) -> Result<ProblemStats, ApiError> {
    Ok(state.engine.problem_stats(problem_id).await?)
}

pub async fn submit_review(
    state: &AppState,
    user_id: &str,
    problem_id: u32,
    request: ReviewRequest,
) -> Result<ReviewView, ApiError> {
    let review = state
        .engine
        .submit_review(user_id, problem_id, &request.content, request.media_url)
        .await?;
    Ok(review.into())
}

pub async fn list_reviews(
    state: &AppState,
    problem_id: u32,
) -> Result<Vec<ReviewView>, ApiError> {
    let reviews = state.engine.reviews(problem_id).await?;
    Ok(reviews.into_iter().map(ReviewView::from).collect())
}

pub async fn upload_media(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> Result<UploadResponse, ApiError> {
    let path = state.media.store(filename, bytes).await?;
    Ok(UploadResponse {
        filename: filename.to_string(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubmitAnswerRequest;
    use drillpad_core::model::{Difficulty, Problem, ProblemOption};
    use drillpad_store::{LocalMediaStore, MemoryStore};

    fn test_state(upload_dir: &std::path::Path) -> AppState {
        let problems = vec![Problem {
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
        }];
        let store = Arc::new(MemoryStore::with_problems(problems));
        AppState {
            engine: QuizEngine::new(store.clone(), store.clone(), store.clone(), store),
            media: Arc::new(LocalMediaStore::new(upload_dir, 1024)),
        }
    }

    #[tokio::test]
    async fn submit_then_stats_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let response = submit_answer(
            &state,
            "alice",
            1,
            SubmitAnswerRequest {
                answer: "c".into(),
                time_taken_secs: Some(12.0),
            },
        )
        .await
        .unwrap();
        assert!(response.answer.is_correct);
        assert_eq!(response.stats.problems_solved, 1);

        let stats = get_user_stats(&state, "alice").await.unwrap();
        assert_eq!(stats.problems_solved, 1);

        let answer = get_user_answer(&state, "alice", 1).await.unwrap().unwrap();
        assert!(answer.is_correct);

        let answers = get_user_answers(&state, "alice").await.unwrap();
        assert_eq!(answers.len(), 1);
        assert!(answers.contains_key(&1));
    }

    #[tokio::test]
    async fn unknown_problem_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = get_problem(&state, 99).await.unwrap_err();
        assert_eq!(err.status(), 404);

        let err = submit_answer(
            &state,
            "alice",
            99,
            SubmitAnswerRequest {
                answer: "C".into(),
                time_taken_secs: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn blank_submission_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = submit_answer(
            &state,
            "alice",
            1,
            SubmitAnswerRequest {
                answer: "  ".into(),
                time_taken_secs: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), 400);
    }

    #[tokio::test]
    async fn unanswered_problem_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        assert!(get_user_answer(&state, "alice", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upload_then_review_threads_reference() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let upload = upload_media(&state, "sketch.png", b"bytes").await.unwrap();
        assert!(upload.path.starts_with("/uploads/"));

        let review = submit_review(
            &state,
            "alice",
            1,
            ReviewRequest {
                content: "nice one".into(),
                media_url: Some(upload.path.clone()),
            },
        )
        .await
        .unwrap();
        assert_eq!(review.media_url.as_deref(), Some(upload.path.as_str()));

        let listed = list_reviews(&state, 1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].author, "alice");
    }

    #[tokio::test]
    async fn upload_rejects_bad_extension_as_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = upload_media(&state, "run.sh", b"#!/bin/sh").await.unwrap_err();
        assert_eq!(err.status(), 400);
    }
}
