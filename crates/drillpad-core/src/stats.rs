//! Per-problem aggregation over the stored answer rows.
//!
//! Unlike user scoring, this layer does not reduce to latest-per-user: it
//! counts every stored row for the problem (one per user under overwrite
//! semantics). The divergence is intentional, per-feature behavior.

use std::collections::BTreeMap;

use crate::model::{Answer, EmbeddedReview, ProblemStats, SubmissionView};

/// Most-recent submissions kept in a problem view.
pub const LATEST_SUBMISSION_CAP: usize = 10;

/// Aggregate a problem's statistics from the complete answer store.
///
/// A problem nobody has attempted aggregates to the default (all-zero)
/// stats; existence checks against the catalog are the caller's concern.
pub fn compute_problem_stats(
    problem_id: u32,
    all_answers: &BTreeMap<String, BTreeMap<u32, Answer>>,
) -> ProblemStats {
    let mut stats = ProblemStats::default();

    for (user_id, user_answers) in all_answers {
        let Some(answer) = user_answers.get(&problem_id) else {
            continue;
        };

        stats.total_attempts += 1;
        if answer.is_correct {
            stats.correct_attempts += 1;
        }
        *stats
            .answer_distribution
            .entry(answer.answer.clone())
            .or_insert(0) += 1;

        if let Some(review) = answer.review.as_deref().filter(|r| !r.is_empty()) {
            stats.reviews.push(EmbeddedReview {
                user_id: user_id.clone(),
                review: review.to_string(),
                is_correct: answer.is_correct,
                timestamp: answer.timestamp,
            });
        }

        stats.latest_submissions.push(SubmissionView {
            user_id: user_id.clone(),
            answer: answer.answer.clone(),
            is_correct: answer.is_correct,
            timestamp: answer.timestamp,
        });
    }

    stats.unique_users = all_answers
        .values()
        .filter(|rows| rows.contains_key(&problem_id))
        .count() as u32;

    if stats.total_attempts > 0 {
        stats.accuracy =
            round2(stats.correct_attempts as f64 / stats.total_attempts as f64 * 100.0);
    }

    stats
        .latest_submissions
        .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    stats.latest_submissions.truncate(LATEST_SUBMISSION_CAP);
    stats.reviews.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    stats
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
