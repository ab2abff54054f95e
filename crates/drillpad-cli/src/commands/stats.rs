//! The `drillpad stats` command.

use std::path::PathBuf;

use anyhow::Result;

use drillpad_api::handlers;

pub async fn execute(user: String, config: Option<PathBuf>) -> Result<()> {
    let ctx = super::open(config.as_deref())?;
    let stats = handlers::get_user_stats(&ctx.state, &user).await?;
    let achievements = handlers::get_achievements(&ctx.state, &user).await?;

    println!("Stats for {user}:");
    super::print_stats(&stats);

    if achievements.is_empty() {
        println!("No achievements yet.");
    } else {
        println!("Achievements:");
        for a in &achievements {
            println!("  {} {}: {}", a.icon, a.name, a.description);
        }
    }

    Ok(())
}
