use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drillpad_core::model::Answer;
use drillpad_core::scoring::{compute_user_stats, global_baseline};
use drillpad_core::stats::compute_problem_stats;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()
}

/// Synthetic answer store: `users` users, each with one row per problem.
fn make_store(users: usize, problems: u32) -> BTreeMap<String, BTreeMap<u32, Answer>> {
    let t0 = base_time();
    let mut all = BTreeMap::new();
    for u in 0..users {
        let user_id = format!("user{u:04}");
        let mut rows = BTreeMap::new();
        for p in 1..=problems {
            rows.insert(
                p,
                Answer {
                    user_id: user_id.clone(),
                    problem_id: p,
                    answer: if (u as u32 + p) % 3 == 0 { "C" } else { "D" }.into(),
                    is_correct: (u as u32 + p) % 3 == 0,
                    timestamp: t0 + Duration::hours((u as i64 % 48) + p as i64),
                    time_taken_secs: if p % 2 == 0 { Some(20.0 + p as f64) } else { None },
                    review: None,
                    review_timestamp: None,
                },
            );
        }
        all.insert(user_id, rows);
    }
    all
}

fn bench_user_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_user_stats");
    let now = base_time() + Duration::days(3);

    for (users, problems) in [(50usize, 20u32), (200, 50)] {
        let store = make_store(users, problems);
        let rows: Vec<Answer> = store["user0000"].values().cloned().collect();

        group.bench_function(format!("users={users},problems={problems}"), |b| {
            b.iter(|| {
                let baseline = global_baseline(black_box(&store));
                compute_user_stats(black_box(&rows), &baseline, problems, now)
            })
        });
    }

    group.finish();
}

fn bench_problem_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_problem_stats");

    for (users, problems) in [(50usize, 20u32), (200, 50)] {
        let store = make_store(users, problems);
        group.bench_function(format!("users={users},problems={problems}"), |b| {
            b.iter(|| compute_problem_stats(black_box(1), black_box(&store)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_user_stats, bench_problem_stats);
criterion_main!(benches);
