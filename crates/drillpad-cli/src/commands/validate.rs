//! The `drillpad validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(problem_set: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let path = match problem_set {
        Some(path) => path,
        None => drillpad_store::load_config_from(config.as_deref())?.problem_sets_dir,
    };

    let sets = if path.is_dir() {
        drillpad_core::parser::load_problem_directory(&path)?
    } else {
        vec![drillpad_core::parser::parse_problem_set(&path)?]
    };

    let mut total_warnings = 0;

    for set in &sets {
        println!("Problem set: {} ({} problems)", set.name, set.problems.len());

        let warnings = drillpad_core::parser::validate_problem_set(set);
        for w in &warnings {
            let prefix = w
                .problem_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All problem sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
