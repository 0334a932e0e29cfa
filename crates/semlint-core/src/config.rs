//! Configuration types for semlint.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::dom::ParserMode;
use crate::scoring::WeightTable;
use crate::types::Severity;

/// Top-level configuration for semlint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing exit status (default: critical).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Minimum acceptable score; lower scores fail.
    #[serde(default)]
    pub fail_under: Option<u8>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Scoring configuration.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Severity at which a report counts as failing.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Critical)
    }

    /// Built-in weights with `[scoring.weights]` applied on top.
    #[must_use]
    pub fn weight_table(&self) -> WeightTable {
        WeightTable::new().with_overrides(&self.scoring.weights)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Parser selection.
    #[serde(default)]
    pub parser: ParserMode,

    /// Whether to drop non-content subtrees before rules run.
    #[serde(default = "default_true")]
    pub strip_hygiene: bool,

    /// Tags removed by the hygiene pass.
    #[serde(default = "default_hygiene_tags")]
    pub hygiene_tags: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            parser: ParserMode::default(),
            strip_hygiene: true,
            hygiene_tags: default_hygiene_tags(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_hygiene_tags() -> Vec<String> {
    vec!["script".to_string(), "style".to_string()]
}

/// Scoring configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight overrides keyed by `rule` or `rule:subject`.
    #[serde(default)]
    pub weights: BTreeMap<String, u32>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a non-negative integer option with a default value.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }

    /// Gets a string array option, `None` when absent.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Option<Vec<String>> {
        self.options.get(key).and_then(|v| v.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_ascii_lowercase))
                .collect()
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.strip_hygiene);
        assert_eq!(config.analyzer.parser, ParserMode::Auto);
        assert_eq!(config.fail_on(), Severity::Critical);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "high"
fail_under = 70

[analyzer]
parser = "lenient"
strip_hygiene = false

[scoring.weights]
missing-alt = 7
"missing-landmark:nav" = 4

[rules.heading-hierarchy]
enabled = false

[rules.generic-main-content]
severity = "critical"
min_text_length = 250
landmarks = ["MAIN", "nav"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_on(), Severity::High);
        assert_eq!(config.fail_under, Some(70));
        assert_eq!(config.analyzer.parser, ParserMode::Lenient);
        assert!(!config.analyzer.strip_hygiene);
        assert!(!config.is_rule_enabled("heading-hierarchy"));
        assert!(config.is_rule_enabled("missing-h1"));
        assert_eq!(
            config.rule_severity("generic-main-content"),
            Some(Severity::Critical)
        );

        let rule_config = config.rules.get("generic-main-content").unwrap();
        assert_eq!(rule_config.get_usize("min_text_length", 400), 250);
        assert_eq!(
            rule_config.get_str_array("landmarks"),
            Some(vec!["main".to_string(), "nav".to_string()])
        );

        let table = config.weight_table();
        let weights: HashMap<&str, u32> = table.iter().collect();
        assert_eq!(weights.get("missing-alt"), Some(&7));
        assert_eq!(weights.get("missing-landmark:nav"), Some(&4));
        assert_eq!(weights.get("missing-h1"), Some(&20));
    }

    #[test]
    fn test_parser_modes() {
        for (name, mode) in [
            ("auto", ParserMode::Auto),
            ("strict", ParserMode::Strict),
            ("lenient", ParserMode::Lenient),
        ] {
            let config = Config::parse(&format!("[analyzer]\nparser = \"{name}\"\n"))
                .expect("parser mode should parse");
            assert_eq!(config.analyzer.parser, mode);
        }
        assert!(Config::parse("[analyzer]\nparser = \"html4\"\n").is_err());
    }

    #[test]
    fn test_invalid_severity_is_rejected() {
        let err = Config::parse("fail_on = \"fatal\"").expect_err("unknown severity");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
