//! Check command implementation.

use anyhow::{bail, Context, Result};
use semlint::{Analyzer, Config, Report, RuleBox, Severity};
use semlint_rules::all_rules;

use crate::config_resolver::ConfigSource;
use crate::loader;
use crate::OutputFormat;

/// Arguments of `semlint check`.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Files, directories, URLs or `-`.
    pub targets: Vec<String>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Exclude patterns for directory walks.
    pub exclude: Vec<String>,
    /// Minimum acceptable score, overriding the config.
    pub fail_under: Option<u8>,
}

/// One audited document.
#[derive(Debug, Clone)]
pub struct Audit {
    /// Display name of the target.
    pub name: String,
    /// Raw markup, kept for source-annotated output.
    pub source: String,
    /// Analysis result.
    pub report: Report,
}

/// Runs the check command.
pub fn run(options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let analyzer = build_analyzer(&config, options.rules.as_deref())?;

    let targets = loader::resolve_targets(&options.targets, &options.exclude)
        .context("Failed to resolve targets")?;
    if targets.is_empty() {
        bail!("No HTML documents found in {}", options.targets.join(", "));
    }

    tracing::info!(
        "Auditing {} document(s) with {} rule(s)",
        targets.len(),
        analyzer.rule_count()
    );

    let mut audits = Vec::with_capacity(targets.len());
    for target in &targets {
        let name = target.name();
        let markup = target
            .load()
            .with_context(|| format!("Failed to load {name}"))?;
        let report = analyzer.analyze(&markup);
        audits.push(Audit {
            name,
            source: markup,
            report,
        });
    }

    super::output::print(&audits, options.format)?;

    let fail_under = options.fail_under.or(config.fail_under);
    if is_failing(&audits, config.fail_on(), fail_under) {
        std::process::exit(1);
    }

    Ok(())
}

fn build_analyzer(config: &Config, filter: Option<&str>) -> Result<Analyzer> {
    let Some(filter) = filter else {
        return semlint::analyzer_for(config).context("Invalid configuration");
    };

    let names: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();
    let preset = semlint::resolve_preset(config).context("Invalid configuration")?;
    let rules = filter_rules(preset.rules(), &names);
    if rules.is_empty() {
        bail!("--rules matched no known rule: {filter}");
    }

    Ok(Analyzer::builder()
        .rules(rules)
        .config(config.clone())
        .build())
}

/// Selects rules by name or code, keeping evaluation order.
///
/// Rules the preset configures keep the preset's settings; the others run
/// with their defaults.
fn filter_rules(mut configured: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    let matches = |rule: &RuleBox, name: &str| {
        rule.name().eq_ignore_ascii_case(name) || rule.code().eq_ignore_ascii_case(name)
    };

    let available: Vec<RuleBox> = all_rules()
        .into_iter()
        .map(|rule| {
            match configured.iter().position(|r| r.name() == rule.name()) {
                Some(index) => configured.swap_remove(index),
                None => rule,
            }
        })
        .collect();
    for name in names {
        if !available.iter().any(|r| matches(r, name)) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    available
        .into_iter()
        .filter(|r| names.iter().any(|n| matches(r, n)))
        .collect()
}

/// Whether any audit crosses the failure thresholds.
fn is_failing(audits: &[Audit], fail_on: Severity, fail_under: Option<u8>) -> bool {
    audits.iter().any(|audit| {
        audit.report.has_findings_at(fail_on)
            || fail_under.is_some_and(|minimum| audit.report.score < minimum)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audit(markup: &str) -> Audit {
        Audit {
            name: "test.html".to_string(),
            source: markup.to_string(),
            report: semlint::analyze(markup, &Config::default()),
        }
    }

    #[test]
    fn filter_by_name_and_code() {
        let rules = filter_rules(Vec::new(), &["missing-alt", "SEM001", "sem002"]);
        let codes: Vec<_> = rules.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["SEM001", "SEM002", "SEM007"]);
    }

    #[test]
    fn filter_ignores_unknown() {
        assert!(filter_rules(Vec::new(), &["no-such-rule"]).is_empty());
        assert_eq!(filter_rules(Vec::new(), &["fake-button", "bogus"]).len(), 1);
    }

    #[test]
    fn empty_filter_is_rejected() {
        assert!(build_analyzer(&Config::default(), Some(" , ")).is_err());
        assert!(build_analyzer(&Config::default(), Some("nope")).is_err());
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let config = Config::parse("preset = \"lax\"").unwrap();
        assert!(build_analyzer(&config, None).is_err());
    }

    #[test]
    fn filter_keeps_preset_settings() {
        let markup = format!("<div><p>{}</p></div>", "x".repeat(350));
        let analyzed = |toml: &str| {
            let config = Config::parse(toml).unwrap();
            build_analyzer(&config, Some("generic-main-content"))
                .unwrap()
                .analyze(&markup)
        };

        let strict = analyzed("preset = \"strict\"");
        assert_eq!(strict.by_rule("generic-main-content").len(), 1);

        let recommended = analyzed("");
        assert!(recommended.by_rule("generic-main-content").is_empty());
    }

    #[test]
    fn filter_reaches_rules_outside_the_preset() {
        let config = Config::parse("preset = \"minimal\"").unwrap();
        let analyzer = build_analyzer(&config, Some("fake-button")).unwrap();
        assert_eq!(analyzer.rule_count(), 1);
    }

    #[test]
    fn failing_thresholds() {
        let clean = audit(
            "<header></header><nav></nav><main><h1>T</h1></main><footer></footer>",
        );
        let no_h1 = audit("<main><p>x</p></main>");

        assert!(!is_failing(&[clean.clone()], Severity::Critical, None));
        assert!(is_failing(&[clean.clone(), no_h1.clone()], Severity::Critical, None));
        assert!(!is_failing(&[clean.clone()], Severity::Critical, Some(100)));
        assert!(is_failing(&[no_h1], Severity::Critical, Some(0)));

        let low_only = audit("<main><h1>T</h1></main>");
        assert!(!is_failing(&[low_only.clone()], Severity::Critical, None));
        assert!(is_failing(&[low_only], Severity::Low, None));
    }
}
