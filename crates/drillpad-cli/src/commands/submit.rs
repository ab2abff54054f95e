//! The `drillpad submit` command.

use std::path::PathBuf;

use anyhow::Result;

use drillpad_api::handlers;
use drillpad_api::types::SubmitAnswerRequest;

pub async fn execute(
    user: String,
    problem: u32,
    answer: String,
    time_secs: Option<f64>,
    config: Option<PathBuf>,
) -> Result<()> {
    let ctx = super::open(config.as_deref())?;
    let response = handlers::submit_answer(
        &ctx.state,
        &user,
        problem,
        SubmitAnswerRequest {
            answer,
            time_taken_secs: time_secs,
        },
    )
    .await?;

    if response.answer.is_correct {
        println!("Correct!");
    } else {
        println!("Incorrect.");
    }

    super::print_stats(&response.stats);

    if !response.achievements.is_empty() {
        println!("Achievements:");
        for a in &response.achievements {
            println!("  {} {}: {}", a.icon, a.name, a.description);
        }
    }

    Ok(())
}
