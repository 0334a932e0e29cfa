//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag or `$SEMLINT_CONFIG` (explicit path)
//! 2. `{project}/semlint.toml` or `.semlint.toml`
//! 3. `$SEMLINT_CONFIG_DIR/config.toml`, else `~/.semlint/config.toml`
//! 4. No config found → defaults

use anyhow::{Context, Result};
use semlint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    /// An explicit path that does not exist is an error, not a fallback.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["semlint.toml", ".semlint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Returns the global config directory path.
///
/// Resolution: `$SEMLINT_CONFIG_DIR` > `~/.semlint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("SEMLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".semlint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use semlint_core::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = TempDir::new().unwrap();
        touch(project.path(), "semlint.toml", "");

        let explicit = Path::new("/nonexistent/semlint.toml");
        let result = resolve_inner(project.path(), Some(explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit.to_path_buf()));
        assert!(result.load().is_err());
    }

    #[test]
    fn project_names_in_priority_order() {
        let project = TempDir::new().unwrap();
        let dotted = touch(project.path(), ".semlint.toml", "");
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(dotted)
        );

        let plain = touch(project.path(), "semlint.toml", "");
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(plain)
        );
    }

    #[test]
    fn global_is_a_fallback_only() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_file = touch(global.path(), "config.toml", "");

        assert_eq!(
            resolve_inner(project.path(), None, Some(global.path().to_path_buf())),
            ConfigSource::Global(global_file)
        );

        touch(project.path(), "semlint.toml", "");
        assert!(matches!(
            resolve_inner(project.path(), None, Some(global.path().to_path_buf())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn nothing_found_means_defaults() {
        let project = TempDir::new().unwrap();
        let empty_global = TempDir::new().unwrap();
        let source = resolve_inner(
            project.path(),
            None,
            Some(empty_global.path().to_path_buf()),
        );
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
        assert!(source.load().unwrap().rules.is_empty());
    }

    #[test]
    fn load_reads_project_config() {
        let project = TempDir::new().unwrap();
        touch(
            project.path(),
            "semlint.toml",
            "preset = \"minimal\"\nfail_on = \"high\"\n",
        );
        let config = resolve_inner(project.path(), None, None).load().unwrap();
        assert_eq!(config.preset.as_deref(), Some("minimal"));
        assert_eq!(config.fail_on(), Severity::High);
    }

    #[test]
    fn load_reports_invalid_toml() {
        let project = TempDir::new().unwrap();
        touch(project.path(), "semlint.toml", "preset = ");
        let err = resolve_inner(project.path(), None, None)
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
