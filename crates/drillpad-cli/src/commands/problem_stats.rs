//! The `drillpad problem-stats` command.

use std::path::PathBuf;

use anyhow::Result;

use drillpad_api::handlers;

pub async fn execute(problem: u32, config: Option<PathBuf>) -> Result<()> {
    let ctx = super::open(config.as_deref())?;
    let stats = handlers::get_problem_stats(&ctx.state, problem).await?;

    println!("Problem {problem}:");
    println!(
        "  {} attempt(s), {} correct ({:.1}%), {} unique user(s)",
        stats.total_attempts, stats.correct_attempts, stats.accuracy, stats.unique_users
    );

    if !stats.answer_distribution.is_empty() {
        use comfy_table::{Cell, Table};

        let mut distribution: Vec<(&String, &u32)> =
            stats.answer_distribution.iter().collect();
        distribution.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let mut table = Table::new();
        table.set_header(vec!["Answer", "Count"]);
        for (answer, count) in distribution {
            table.add_row(vec![Cell::new(answer), Cell::new(count)]);
        }
        println!("{table}");
    }

    if !stats.latest_submissions.is_empty() {
        println!("Recent submissions:");
        for s in &stats.latest_submissions {
            let mark = if s.is_correct { "correct" } else { "wrong" };
            println!("  {} answered '{}' ({mark}) at {}", s.user_id, s.answer, s.timestamp);
        }
    }

    if !stats.reviews.is_empty() {
        println!("Reviews on submissions:");
        for r in &stats.reviews {
            println!("  {}: {}", r.user_id, r.review);
        }
    }

    Ok(())
}
