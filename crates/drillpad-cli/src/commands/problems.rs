//! The `drillpad problems` command.

use std::path::PathBuf;

use anyhow::Result;

use drillpad_api::handlers;

pub async fn execute(config: Option<PathBuf>) -> Result<()> {
    let ctx = super::open(config.as_deref())?;
    let problems = handlers::list_problems(&ctx.state).await?;

    if problems.is_empty() {
        println!("No problems in the catalog. Run `drillpad import` to add some.");
        return Ok(());
    }

    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Difficulty", "Category", "Options"]);
    for problem in &problems {
        table.add_row(vec![
            Cell::new(problem.id),
            Cell::new(&problem.title),
            Cell::new(problem.difficulty),
            Cell::new(&problem.category),
            Cell::new(problem.options.len()),
        ]);
    }

    println!("{table}");
    println!("{} problem(s).", problems.len());
    Ok(())
}
