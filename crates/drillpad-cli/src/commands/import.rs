//! The `drillpad import` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use drillpad_core::model::Problem;
use drillpad_core::parser;
use drillpad_core::traits::ProblemCatalog;

pub async fn execute(problem_set_path: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let set = parser::parse_problem_set(&problem_set_path)?;

    let warnings = parser::validate_problem_set(&set);
    for w in &warnings {
        let prefix = w
            .problem_id
            .map(|id| format!("[{id}]"))
            .unwrap_or_default();
        println!("{prefix} WARNING: {}", w.message);
    }

    let ctx = super::open(config.as_deref())?;

    // Merge by id: imported problems overwrite existing ones, everything
    // else in the catalog stays.
    let mut by_id: BTreeMap<u32, Problem> = ctx
        .store
        .all_problems()
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let imported = set.problems.len();
    for problem in set.problems {
        by_id.insert(problem.id, problem);
    }
    ctx.store
        .replace_problems(by_id.into_values().collect())
        .await?;

    println!("Imported {imported} problem(s) from '{}'.", set.name);
    Ok(())
}
