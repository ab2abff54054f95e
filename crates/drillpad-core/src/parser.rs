//! TOML problem-set parser.
//!
//! Loads authored problem sets from TOML files and directories, and
//! validates them before import into the catalog.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, Problem, ProblemOption};
use crate::scoring::check_answer;

/// Intermediate TOML structure for parsing problem-set files.
#[derive(Debug, Deserialize)]
struct TomlProblemFile {
    problem_set: TomlProblemSetHeader,
    #[serde(default)]
    problems: Vec<TomlProblem>,
}

#[derive(Debug, Deserialize)]
struct TomlProblemSetHeader {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_category")]
    default_category: String,
    #[serde(default = "default_difficulty")]
    default_difficulty: String,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlProblem {
    id: u32,
    title: String,
    #[serde(default)]
    description: String,
    correct_answer: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    id: String,
    text: String,
}

/// A parsed, authored problem set.
#[derive(Debug, Clone)]
pub struct ProblemSet {
    pub name: String,
    pub description: String,
    pub problems: Vec<Problem>,
}

/// Parse a single TOML file into a `ProblemSet`.
pub fn parse_problem_set(path: &Path) -> Result<ProblemSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read problem set file: {}", path.display()))?;

    parse_problem_set_str(&content, path)
}

/// Parse a TOML string into a `ProblemSet` (useful for testing).
pub fn parse_problem_set_str(content: &str, source_path: &Path) -> Result<ProblemSet> {
    let parsed: TomlProblemFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_difficulty: Difficulty = parsed
        .problem_set
        .default_difficulty
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let problems = parsed
        .problems
        .into_iter()
        .map(|p| {
            let difficulty = match p.difficulty {
                Some(d) => d.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?,
                None => default_difficulty,
            };

            let options = p
                .options
                .into_iter()
                .map(|o| ProblemOption {
                    id: o.id,
                    text: o.text,
                })
                .collect();

            Ok(Problem {
                id: p.id,
                title: p.title,
                description: p.description,
                options,
                correct_answer: p.correct_answer,
                difficulty,
                category: p
                    .category
                    .unwrap_or_else(|| parsed.problem_set.default_category.clone()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ProblemSet {
        name: parsed.problem_set.name,
        description: parsed.problem_set.description,
        problems,
    })
}

/// Recursively load all `.toml` problem-set files from a directory.
pub fn load_problem_directory(dir: &Path) -> Result<Vec<ProblemSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_problem_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_problem_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from problem-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The problem id (if applicable).
    pub problem_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a problem set for common authoring mistakes.
pub fn validate_problem_set(set: &ProblemSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate problem ids
    let mut seen_ids = std::collections::HashSet::new();
    for problem in &set.problems {
        if !seen_ids.insert(problem.id) {
            warnings.push(ValidationWarning {
                problem_id: Some(problem.id),
                message: format!("duplicate problem id: {}", problem.id),
            });
        }
    }

    for problem in &set.problems {
        if problem.id == 0 {
            warnings.push(ValidationWarning {
                problem_id: Some(problem.id),
                message: "problem ids start at 1".into(),
            });
        }

        if problem.description.trim().is_empty() {
            warnings.push(ValidationWarning {
                problem_id: Some(problem.id),
                message: "description is empty".into(),
            });
        }

        if problem.options.is_empty() {
            warnings.push(ValidationWarning {
                problem_id: Some(problem.id),
                message: "problem has no options".into(),
            });
        } else if !problem
            .options
            .iter()
            .any(|o| check_answer(&o.id, &problem.correct_answer))
        {
            warnings.push(ValidationWarning {
                problem_id: Some(problem.id),
                message: format!(
                    "correct_answer '{}' matches no option id",
                    problem.correct_answer
                ),
            });
        }
    }

    warnings
}
