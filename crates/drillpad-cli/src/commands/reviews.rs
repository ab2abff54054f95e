//! The `drillpad reviews` command.

use std::path::PathBuf;

use anyhow::Result;

use drillpad_api::handlers;

pub async fn execute(problem: u32, config: Option<PathBuf>) -> Result<()> {
    let ctx = super::open(config.as_deref())?;
    let reviews = handlers::list_reviews(&ctx.state, problem).await?;

    if reviews.is_empty() {
        println!("No reviews for problem {problem}.");
        return Ok(());
    }

    println!("{} review(s) for problem {problem}:", reviews.len());
    for review in &reviews {
        match &review.media_url {
            Some(url) => println!(
                "  {} at {}: {} [media: {url}]",
                review.author, review.timestamp, review.content
            ),
            None => println!(
                "  {} at {}: {}",
                review.author, review.timestamp, review.content
            ),
        }
    }

    Ok(())
}
