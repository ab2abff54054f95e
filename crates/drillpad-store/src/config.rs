//! Application configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::media::DEFAULT_MAX_UPLOAD_BYTES;

/// Top-level drillpad configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the JSON store documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory review attachments are written to.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Upload size cap in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Directory of authored problem-set TOML files.
    #[serde(default = "default_problem_sets_dir")]
    pub problem_sets_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}
fn default_problem_sets_dir() -> PathBuf {
    PathBuf::from("./problem-sets")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            problem_sets_dir: default_problem_sets_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `drillpad.toml` in the current directory
/// 2. `~/.config/drillpad/config.toml`
///
/// Environment variable overrides: `DRILLPAD_DATA_DIR`,
/// `DRILLPAD_UPLOAD_DIR`.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("drillpad.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AppConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AppConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("DRILLPAD_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("DRILLPAD_UPLOAD_DIR") {
        config.upload_dir = PathBuf::from(dir);
    }

    // Resolve env vars in path fields
    config.data_dir = resolve_path(&config.data_dir);
    config.upload_dir = resolve_path(&config.upload_dir);
    config.problem_sets_dir = resolve_path(&config.problem_sets_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("drillpad"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_DRILLPAD_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_DRILLPAD_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_DRILLPAD_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_DRILLPAD_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn parse_config_toml() {
        let toml_str = r#"
data_dir = "/var/lib/drillpad/data"
upload_dir = "/var/lib/drillpad/uploads"
max_upload_bytes = 1048576
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/drillpad/data"));
        assert_eq!(config.max_upload_bytes, 1_048_576);
        // Unset fields fall back to defaults.
        assert_eq!(config.problem_sets_dir, PathBuf::from("./problem-sets"));
    }

    #[test]
    fn explicit_missing_path_errors() {
        let result = load_config_from(Some(Path::new("/no/such/drillpad.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn explicit_path_with_env_reference() {
        std::env::set_var("_DRILLPAD_TEST_BASE", "/srv/drillpad");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drillpad.toml");
        std::fs::write(&path, "data_dir = \"${_DRILLPAD_TEST_BASE}/data\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/drillpad/data"));
        std::env::remove_var("_DRILLPAD_TEST_BASE");
    }
}
