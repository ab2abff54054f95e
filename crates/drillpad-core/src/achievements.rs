//! Achievement badges, evaluated fresh over a stats snapshot.
//!
//! Badges are recomputed on every call, never tracked incrementally, so a
//! snapshot that drops below a threshold simply stops earning the badge.

use crate::model::{Achievement, UserStats};

/// Evaluate every badge against the given snapshot.
pub fn evaluate(stats: &UserStats) -> Vec<Achievement> {
    let mut earned = Vec::new();

    if stats.problems_solved >= 5 {
        earned.push(Achievement {
            name: "Problem Solver".into(),
            description: "Solved 5 or more problems correctly".into(),
            icon: "🎯".into(),
        });
    }

    if stats.accuracy_rate >= 80.0 && stats.problems_solved >= 3 {
        earned.push(Achievement {
            name: "Accuracy Master".into(),
            description: "Maintained 80% or higher accuracy with at least 3 problems".into(),
            icon: "🎯".into(),
        });
    }

    if stats.study_streak >= 3 {
        earned.push(Achievement {
            name: "Consistent Learner".into(),
            description: "Maintained a 3-day study streak".into(),
            icon: "🔥".into(),
        });
    }

    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(solved: u32, accuracy: f64, streak: u32) -> UserStats {
        UserStats {
            problems_solved: solved,
            accuracy_rate: accuracy,
            study_streak: streak,
            ..UserStats::zeroed(10, Utc::now())
        }
    }

    #[test]
    fn no_badges_below_thresholds() {
        assert!(evaluate(&snapshot(4, 79.9, 2)).is_empty());
    }

    #[test]
    fn badges_at_thresholds() {
        let names: Vec<String> = evaluate(&snapshot(5, 80.0, 3))
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(
            names,
            vec!["Problem Solver", "Accuracy Master", "Consistent Learner"]
        );
    }

    #[test]
    fn accuracy_master_needs_volume() {
        // 100% accuracy on 2 problems is not enough.
        let badges = evaluate(&snapshot(2, 100.0, 0));
        assert!(badges.iter().all(|a| a.name != "Accuracy Master"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let stats = snapshot(6, 85.0, 4);
        assert_eq!(evaluate(&stats), evaluate(&stats));
    }
}
