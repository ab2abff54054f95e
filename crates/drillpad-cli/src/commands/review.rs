//! The `drillpad review` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use drillpad_api::handlers;
use drillpad_api::types::ReviewRequest;

pub async fn execute(
    user: String,
    problem: u32,
    content: String,
    media: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let ctx = super::open(config.as_deref())?;

    let media_url = match media {
        Some(path) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read media file: {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let uploaded = handlers::upload_media(&ctx.state, &filename, &bytes).await?;
            println!("Uploaded {} to {}", uploaded.filename, uploaded.path);
            Some(uploaded.path)
        }
        None => None,
    };

    let review = handlers::submit_review(
        &ctx.state,
        &user,
        problem,
        ReviewRequest { content, media_url },
    )
    .await?;

    println!("Review recorded for problem {problem} ({})", review.id);
    Ok(())
}
