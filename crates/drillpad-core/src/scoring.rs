//! User scoring: grading, streak detection, and ranking against the
//! population baseline.
//!
//! Everything here is pure over in-memory data; `now` is injected so the
//! streak window and `last_updated` are controllable in tests.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{Answer, GlobalStats, UserStats};

/// Points awarded per distinct correctly-solved problem.
pub const POINTS_PER_SOLVED: u32 = 10;

/// Case-insensitive, whitespace-trimmed answer comparison.
pub fn check_answer(submitted: &str, correct: &str) -> bool {
    submitted.trim().to_lowercase() == correct.trim().to_lowercase()
}

/// Per-user scan over stored answer rows, reduced to the latest submission
/// per problem. Used both for the target user and for the baseline.
#[derive(Debug, Default, Clone, Copy)]
struct UserSummary {
    /// Every stored row, superseded submissions included.
    total_attempts: u32,
    /// Distinct problems attempted.
    distinct_attempted: u32,
    /// Distinct problems whose latest submission is correct.
    correct_unique: u32,
    accuracy_rate: f64,
    average_time_secs: f64,
}

fn summarize<'a, I>(answers: I) -> UserSummary
where
    I: IntoIterator<Item = &'a Answer>,
{
    let mut latest: BTreeMap<u32, &Answer> = BTreeMap::new();
    let mut total_attempts = 0u32;

    for answer in answers {
        total_attempts += 1;
        match latest.get(&answer.problem_id) {
            // On equal timestamps the first-seen entry stands.
            Some(prev) if prev.timestamp >= answer.timestamp => {}
            _ => {
                latest.insert(answer.problem_id, answer);
            }
        }
    }

    let distinct_attempted = latest.len() as u32;
    let correct_unique = latest.values().filter(|a| a.is_correct).count() as u32;
    let total_time: f64 = latest
        .values()
        .filter_map(|a| a.time_taken_secs)
        .sum();

    let accuracy_rate = if distinct_attempted > 0 {
        correct_unique as f64 / distinct_attempted as f64 * 100.0
    } else {
        0.0
    };
    // Time totals come from latest-per-problem rows but are averaged over
    // the raw attempt count.
    let average_time_secs = if total_attempts > 0 {
        total_time / total_attempts as f64
    } else {
        0.0
    };

    UserSummary {
        total_attempts,
        distinct_attempted,
        correct_unique,
        accuracy_rate,
        average_time_secs,
    }
}

/// Compute the population baseline over users with at least one stored
/// answer. All-zero when nobody has attempted anything.
pub fn global_baseline(
    all_answers: &BTreeMap<String, BTreeMap<u32, Answer>>,
) -> GlobalStats {
    let summaries: Vec<UserSummary> = all_answers
        .values()
        .filter(|rows| !rows.is_empty())
        .map(|rows| summarize(rows.values()))
        .collect();

    if summaries.is_empty() {
        return GlobalStats::default();
    }

    let n = summaries.len() as f64;
    let avg_accuracy = summaries.iter().map(|s| s.accuracy_rate).sum::<f64>() / n;
    let avg_solve_time_secs =
        summaries.iter().map(|s| s.average_time_secs).sum::<f64>() / n;
    let avg_problems_per_user =
        summaries.iter().map(|s| s.correct_unique as f64).sum::<f64>() / n;
    let top_accuracy = summaries
        .iter()
        .map(|s| s.accuracy_rate)
        .fold(0.0, f64::max);
    let fastest_solve_time_secs = summaries
        .iter()
        .map(|s| s.average_time_secs)
        .filter(|t| *t > 0.0)
        .fold(f64::INFINITY, f64::min);

    GlobalStats {
        avg_accuracy,
        avg_solve_time_secs,
        avg_problems_per_user,
        top_accuracy,
        fastest_solve_time_secs: if fastest_solve_time_secs.is_finite() {
            fastest_solve_time_secs
        } else {
            0.0
        },
    }
}

/// Rank from the weighted score: raw correct count dominates, relative
/// metrics nudge. Lower rank is better; clamped to [1, 1000].
fn rank_for(correct_unique: u32, relative_accuracy: f64, relative_speed: f64) -> u32 {
    let rank_score = correct_unique as f64 * 50.0
        + relative_accuracy * 0.3
        + relative_speed * 0.2;
    ((1000.0 - rank_score) as i64).clamp(1, 1000) as u32
}

/// Compute a user's full statistics from their stored answer rows and the
/// population baseline.
///
/// A user with no rows gets the zeroed stats (rank 1000) regardless of the
/// baseline. "No answers yet" is a legitimate result, never an error.
pub fn compute_user_stats(
    user_answers: &[Answer],
    baseline: &GlobalStats,
    total_problems: u32,
    now: DateTime<Utc>,
) -> UserStats {
    let summary = summarize(user_answers);
    if summary.total_attempts == 0 {
        return UserStats::zeroed(total_problems, now);
    }

    let relative_accuracy = if baseline.avg_accuracy > 0.0 {
        summary.accuracy_rate / baseline.avg_accuracy * 100.0
    } else {
        100.0
    };
    let relative_speed = if summary.average_time_secs > 0.0 {
        baseline.avg_solve_time_secs / summary.average_time_secs * 100.0
    } else {
        100.0
    };

    UserStats {
        problems_solved: summary.correct_unique,
        accuracy_rate: round2(summary.accuracy_rate),
        study_streak: current_streak(user_answers, now),
        time_spent_hours: active_hours(user_answers),
        total_attempts: summary.total_attempts,
        total_problems,
        average_time_secs: round2(summary.average_time_secs),
        total_points: summary.correct_unique * POINTS_PER_SOLVED,
        rank: rank_for(summary.correct_unique, relative_accuracy, relative_speed),
        relative_accuracy: round2(relative_accuracy),
        relative_speed: round2(relative_speed),
        last_updated: now,
    }
}

/// Current study streak: consecutive active calendar days ending at the
/// most recent activity day, which must be today or yesterday relative to
/// `now`. Multiple answers on one day count once; the first gap of more
/// than one day terminates the streak.
pub fn current_streak(answers: &[Answer], now: DateTime<Utc>) -> u32 {
    let mut sorted: Vec<&Answer> = answers.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let today = now.date_naive();
    let mut streak = 0u32;
    let mut last_active: Option<NaiveDate> = None;

    for answer in sorted {
        let day = answer.timestamp.date_naive();
        match last_active {
            None => {
                if today.signed_duration_since(day) <= Duration::days(1) {
                    streak = 1;
                    last_active = Some(day);
                }
            }
            Some(prev) => {
                if day == prev - Duration::days(1) {
                    streak += 1;
                    last_active = Some(day);
                } else if day == prev {
                    // Same calendar day, already counted.
                } else {
                    break;
                }
            }
        }
    }

    streak
}

/// Estimated active hours: for each calendar day with answers, the span
/// between that day's first and last submission, summed and rounded.
/// Floored at one hour once any activity exists, so a lone answer still
/// registers.
pub fn active_hours(answers: &[Answer]) -> u32 {
    if answers.is_empty() {
        return 0;
    }

    let mut days: BTreeMap<NaiveDate, (DateTime<Utc>, DateTime<Utc>)> = BTreeMap::new();
    for answer in answers {
        let entry = days
            .entry(answer.timestamp.date_naive())
            .or_insert((answer.timestamp, answer.timestamp));
        if answer.timestamp < entry.0 {
            entry.0 = answer.timestamp;
        }
        if answer.timestamp > entry.1 {
            entry.1 = answer.timestamp;
        }
    }

    let total_secs: i64 = days
        .values()
        .map(|(first, last)| (*last - *first).num_seconds())
        .sum();
    let hours = (total_secs as f64 / 3600.0).round() as i64;
    hours.max(1) as u32
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn answer(problem_id: u32, correct: bool, at: DateTime<Utc>) -> Answer {
        Answer {
            user_id: "alice".into(),
            problem_id,
            answer: if correct { "C".into() } else { "D".into() },
            is_correct: correct,
            timestamp: at,
            time_taken_secs: None,
            review: None,
            review_timestamp: None,
        }
    }

    #[test]
    fn check_answer_trims_and_ignores_case() {
        assert!(check_answer(" C ", "C"));
        assert!(check_answer("c", "C"));
        assert!(check_answer("both rates become equal", "Both Rates Become Equal"));
        assert!(!check_answer("c1", "C"));
        assert!(!check_answer("", "C"));
    }

    #[test]
    fn no_answers_yields_zeroed_stats() {
        let baseline = GlobalStats {
            avg_accuracy: 75.0,
            avg_solve_time_secs: 30.0,
            ..GlobalStats::default()
        };
        let now = ts(2026, 8, 7, 12, 0);
        let stats = compute_user_stats(&[], &baseline, 10, now);
        assert_eq!(stats.accuracy_rate, 0.0);
        assert_eq!(stats.problems_solved, 0);
        assert_eq!(stats.study_streak, 0);
        assert_eq!(stats.rank, 1000);
        assert_eq!(stats.total_problems, 10);
    }

    #[test]
    fn latest_submission_wins_and_attempts_count_all() {
        let now = ts(2026, 8, 7, 12, 0);
        let rows = vec![
            answer(1, true, ts(2026, 8, 7, 9, 0)),
            answer(1, false, ts(2026, 8, 7, 10, 0)),
        ];
        let stats = compute_user_stats(&rows, &GlobalStats::default(), 3, now);
        // The later, incorrect submission supersedes the correct one.
        assert_eq!(stats.problems_solved, 0);
        assert_eq!(stats.accuracy_rate, 0.0);
        assert_eq!(stats.total_attempts, 2);
        assert_eq!(stats.total_points, 0);
    }

    #[test]
    fn accuracy_over_unique_problems() {
        let now = ts(2026, 8, 7, 12, 0);
        let rows = vec![
            answer(1, true, ts(2026, 8, 7, 9, 0)),
            answer(2, false, ts(2026, 8, 7, 9, 30)),
            answer(3, true, ts(2026, 8, 7, 10, 0)),
            answer(4, true, ts(2026, 8, 7, 10, 30)),
        ];
        let stats = compute_user_stats(&rows, &GlobalStats::default(), 10, now);
        assert_eq!(stats.problems_solved, 3);
        assert_eq!(stats.accuracy_rate, 75.0);
        assert_eq!(stats.total_points, 30);
    }

    #[test]
    fn streak_counts_consecutive_days_once_each() {
        let now = ts(2026, 8, 7, 12, 0);
        let rows = vec![
            answer(1, true, ts(2026, 8, 7, 9, 0)),
            answer(2, true, ts(2026, 8, 7, 11, 0)), // same day, counted once
            answer(3, true, ts(2026, 8, 6, 9, 0)),
            answer(4, true, ts(2026, 8, 5, 9, 0)),
        ];
        assert_eq!(current_streak(&rows, now), 3);
    }

    #[test]
    fn streak_truncated_by_gap() {
        let now = ts(2026, 8, 7, 12, 0);
        let rows = vec![
            answer(1, true, ts(2026, 8, 7, 9, 0)),
            answer(2, true, ts(2026, 8, 6, 9, 0)),
            // 2-day gap
            answer(3, true, ts(2026, 8, 3, 9, 0)),
            answer(4, true, ts(2026, 8, 2, 9, 0)),
        ];
        assert_eq!(current_streak(&rows, now), 2);
    }

    #[test]
    fn streak_starts_only_today_or_yesterday() {
        let now = ts(2026, 8, 7, 12, 0);
        let yesterday = vec![answer(1, true, ts(2026, 8, 6, 9, 0))];
        assert_eq!(current_streak(&yesterday, now), 1);

        let stale = vec![
            answer(1, true, ts(2026, 8, 4, 9, 0)),
            answer(2, true, ts(2026, 8, 3, 9, 0)),
        ];
        assert_eq!(current_streak(&stale, now), 0);
    }

    #[test]
    fn active_hours_spans_per_day_with_floor() {
        // Single answer: zero span, but the floor applies.
        let lone = vec![answer(1, true, ts(2026, 8, 7, 9, 0))];
        assert_eq!(active_hours(&lone), 1);

        // Two days: 2h + 1h spans.
        let rows = vec![
            answer(1, true, ts(2026, 8, 7, 9, 0)),
            answer(2, true, ts(2026, 8, 7, 11, 0)),
            answer(3, true, ts(2026, 8, 6, 14, 0)),
            answer(4, true, ts(2026, 8, 6, 15, 0)),
        ];
        assert_eq!(active_hours(&rows), 3);

        assert_eq!(active_hours(&[]), 0);
    }

    #[test]
    fn rank_never_worsens_with_more_solved() {
        for correct in 0..30u32 {
            let lower = rank_for(correct + 1, 100.0, 100.0);
            let higher = rank_for(correct, 100.0, 100.0);
            assert!(
                lower <= higher,
                "rank worsened from {higher} to {lower} at correct={correct}"
            );
        }
        // Both ends stay clamped.
        assert_eq!(rank_for(0, 0.0, 0.0), 1000);
        assert_eq!(rank_for(100, 100.0, 100.0), 1);
    }

    #[test]
    fn relative_metrics_default_to_100_without_baseline() {
        let now = ts(2026, 8, 7, 12, 0);
        let rows = vec![answer(1, true, ts(2026, 8, 7, 9, 0))];
        let stats = compute_user_stats(&rows, &GlobalStats::default(), 5, now);
        assert_eq!(stats.relative_accuracy, 100.0);
        assert_eq!(stats.relative_speed, 100.0);
    }

    #[test]
    fn relative_metrics_against_population() {
        let now = ts(2026, 8, 7, 12, 0);
        let baseline = GlobalStats {
            avg_accuracy: 50.0,
            avg_solve_time_secs: 60.0,
            ..GlobalStats::default()
        };
        let mut row = answer(1, true, ts(2026, 8, 7, 9, 0));
        row.time_taken_secs = Some(30.0);
        let stats = compute_user_stats(&[row], &baseline, 5, now);
        // 100% accuracy against a 50% mean, 30s against a 60s mean.
        assert_eq!(stats.relative_accuracy, 200.0);
        assert_eq!(stats.relative_speed, 200.0);
        assert_eq!(stats.average_time_secs, 30.0);
    }

    #[test]
    fn baseline_over_active_users_only() {
        let mut all: BTreeMap<String, BTreeMap<u32, Answer>> = BTreeMap::new();

        let mut alice = BTreeMap::new();
        alice.insert(1, answer(1, true, ts(2026, 8, 7, 9, 0)));
        all.insert("alice".into(), alice);

        let mut bob = BTreeMap::new();
        let mut bob_row = answer(1, false, ts(2026, 8, 7, 9, 0));
        bob_row.user_id = "bob".into();
        bob_row.time_taken_secs = Some(40.0);
        bob.insert(1, bob_row);
        all.insert("bob".into(), bob);

        all.insert("idle".into(), BTreeMap::new());

        let baseline = global_baseline(&all);
        assert_eq!(baseline.avg_accuracy, 50.0);
        assert_eq!(baseline.avg_problems_per_user, 0.5);
        assert_eq!(baseline.top_accuracy, 100.0);
        // Alice reports no time, so the only nonzero average is Bob's.
        assert_eq!(baseline.avg_solve_time_secs, 20.0);
        assert_eq!(baseline.fastest_solve_time_secs, 40.0);
    }

    #[test]
    fn baseline_empty_population_is_all_zero() {
        let all = BTreeMap::new();
        assert_eq!(global_baseline(&all), GlobalStats::default());
    }
}
