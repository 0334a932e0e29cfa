//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "semlint.toml";

const DEFAULT_CONFIG: &str = r#"# semlint configuration

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Exit non-zero when a finding at or above this severity is present
fail_on = "critical"

# Exit non-zero when a document scores below this value
# fail_under = 70

[analyzer]
# "auto" keeps source lines when the markup allows it, "strict" does the same
# but warns when it has to fall back, "lenient" always reports ordinal
# locations such as "img #2"
parser = "auto"

# Drop non-content subtrees before the rules run
strip_hygiene = true
hygiene_tags = ["script", "style"]

# Score deductions, keyed by rule or rule:subject
[scoring.weights]
# missing-h1 = 20
# "missing-landmark:main" = 15

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.missing-landmark]
enabled = true
landmarks = ["main", "nav", "header", "footer"]
# severities = { nav = "medium" }

[rules.generic-main-content]
min_text_length = 400

# [rules.anchor-as-button]
# severity = "medium"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);
    write_config(config_path, force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: semlint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use semlint::{Config, ParserMode, Severity};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.fail_on(), Severity::Critical);
        assert_eq!(config.fail_under, None);
        assert_eq!(config.analyzer.parser, ParserMode::Auto);
        assert!(config.scoring.weights.is_empty());
        assert!(config.is_rule_enabled("missing-landmark"));
        assert_eq!(
            config.rules["generic-main-content"].get_usize("min_text_length", 0),
            400
        );
    }

    #[test]
    fn default_config_matches_default_behaviour() {
        let markup = r##"<div class="header"><h2>Blog</h2></div>
<div><p>text</p><h4>Deep</h4><img src="a.png"><a href="#">Go</a></div>"##;
        let written = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(
            semlint::analyze(markup, &written),
            semlint::analyze(markup, &Config::default())
        );
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "preset = \"strict\"").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "preset = \"strict\"");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
