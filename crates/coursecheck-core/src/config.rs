//! coursecheck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level coursecheck configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursecheckConfig {
    /// TOML catalog replacing the built-in questionnaire.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Emit per-answer scoring diagnostics at trace level.
    #[serde(default)]
    pub trace_scoring: bool,
    /// Refuse to score answers that fail validation.
    #[serde(default)]
    pub strict: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./coursecheck-results")
}

impl Default for CoursecheckConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            output_dir: default_output_dir(),
            trace_scoring: false,
            strict: false,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `coursecheck.toml` in the current directory
/// 2. `~/.config/coursecheck/config.toml`
///
/// Environment variable overrides: `COURSECHECK_CATALOG`, `COURSECHECK_TRACE`,
/// `COURSECHECK_STRICT`.
pub fn load_config() -> Result<CoursecheckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CoursecheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("coursecheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CoursecheckConfig::default(),
    };

    apply_env_overrides(&mut config);

    config.catalog = config.catalog.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

/// Parse a config TOML string.
pub fn parse_config_str(content: &str) -> Result<CoursecheckConfig> {
    Ok(toml::from_str::<CoursecheckConfig>(content)?)
}

fn apply_env_overrides(config: &mut CoursecheckConfig) {
    if let Ok(catalog) = std::env::var("COURSECHECK_CATALOG") {
        if !catalog.trim().is_empty() {
            config.catalog = Some(PathBuf::from(catalog));
        }
    }
    if let Some(trace) = env_flag("COURSECHECK_TRACE") {
        config.trace_scoring = trace;
    }
    if let Some(strict) = env_flag("COURSECHECK_STRICT") {
        config.strict = strict;
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("coursecheck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_COURSECHECK_TEST_VAR", "courses");
        assert_eq!(resolve_env_vars("${_COURSECHECK_TEST_VAR}"), "courses");
        assert_eq!(
            resolve_env_vars("/srv/${_COURSECHECK_TEST_VAR}/catalog.toml"),
            "/srv/courses/catalog.toml"
        );
        assert_eq!(resolve_env_vars("no-vars"), "no-vars");
        std::env::remove_var("_COURSECHECK_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_reexpand_values() {
        std::env::set_var("_COURSECHECK_SELF_REF", "${_COURSECHECK_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_COURSECHECK_SELF_REF}/x"),
            "${_COURSECHECK_SELF_REF}/x"
        );
        std::env::remove_var("_COURSECHECK_SELF_REF");

        assert_eq!(resolve_env_vars("a/${UNCLOSED"), "a/${UNCLOSED");
        assert_eq!(
            resolve_env_vars("${_COURSECHECK_UNSET_A}-${_COURSECHECK_UNSET_B}"),
            "-"
        );
    }

    #[test]
    fn default_config() {
        let config = CoursecheckConfig::default();
        assert!(config.catalog.is_none());
        assert!(!config.trace_scoring);
        assert!(!config.strict);
        assert_eq!(config.output_dir, PathBuf::from("./coursecheck-results"));
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config_str(
            r#"
catalog = "catalogs/stem.toml"
output_dir = "reports"
trace_scoring = true
strict = true
"#,
        )
        .unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("catalogs/stem.toml")));
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert!(config.trace_scoring);
        assert!(config.strict);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coursecheck.toml");
        std::fs::write(&path, "output_dir = \"out\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
