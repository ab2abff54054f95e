//! Subcommand implementations.

pub mod import;
pub mod init;
pub mod problem_stats;
pub mod problems;
pub mod review;
pub mod reviews;
pub mod stats;
pub mod submit;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use drillpad_api::handlers::AppState;
use drillpad_core::engine::QuizEngine;
use drillpad_core::model::UserStats;
use drillpad_store::{JsonStore, LocalMediaStore};

/// Wiring shared by every data-touching command: config, flat-file store,
/// and the handler state built on top of it.
pub(crate) struct CliContext {
    pub store: Arc<JsonStore>,
    pub state: AppState,
}

pub(crate) fn open(config_path: Option<&Path>) -> Result<CliContext> {
    let config = drillpad_store::load_config_from(config_path)?;
    let store = Arc::new(JsonStore::new(&config.data_dir));
    let media = Arc::new(LocalMediaStore::new(
        &config.upload_dir,
        config.max_upload_bytes,
    ));
    let engine = QuizEngine::new(store.clone(), store.clone(), store.clone(), store.clone());
    Ok(CliContext {
        store,
        state: AppState { engine, media },
    })
}

pub(crate) fn print_stats(stats: &UserStats) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Problems solved"),
        Cell::new(stats.problems_solved),
    ]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!("{:.1}%", stats.accuracy_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Study streak"),
        Cell::new(format!("{} day(s)", stats.study_streak)),
    ]);
    table.add_row(vec![
        Cell::new("Time spent"),
        Cell::new(format!("{}h", stats.time_spent_hours)),
    ]);
    table.add_row(vec![
        Cell::new("Total attempts"),
        Cell::new(stats.total_attempts),
    ]);
    table.add_row(vec![
        Cell::new("Points"),
        Cell::new(stats.total_points),
    ]);
    table.add_row(vec![Cell::new("Rank"), Cell::new(stats.rank)]);

    println!("{table}");
}
