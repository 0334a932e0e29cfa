//! Rule to require landmark elements.
//!
//! # Rationale
//!
//! Landmarks let assistive tech jump straight to a region ("skip to
//! content"). A page without `<main>` is hard to navigate; missing
//! `<nav>`, `<header>` or `<footer>` is a smaller loss.
//!
//! # Options
//!
//! ```toml
//! [rules.missing-landmark]
//! landmarks = ["main", "nav"]
//! severities = { nav = "medium" }
//! ```

use std::collections::HashMap;

use semlint_core::{Finding, Rule, RuleContext, Severity};

/// Rule code for missing-landmark.
pub const CODE: &str = "SEM003";

/// Rule name for missing-landmark.
pub const NAME: &str = "missing-landmark";

/// Landmarks checked by default.
pub const DEFAULT_LANDMARKS: &[&str] = &["main", "nav", "header", "footer"];

/// Requires the configured landmark elements to be present.
#[derive(Debug, Clone)]
pub struct MissingLandmark {
    /// Landmark tags to require, in reporting order.
    pub landmarks: Vec<String>,
    /// Per-landmark severities; unlisted landmarks fall back to
    /// [`MissingLandmark::default_severity_for`].
    pub severities: HashMap<String, Severity>,
}

impl Default for MissingLandmark {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingLandmark {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            landmarks: DEFAULT_LANDMARKS.iter().map(ToString::to_string).collect(),
            severities: HashMap::new(),
        }
    }

    /// Sets the landmark tags to require.
    #[must_use]
    pub fn landmarks<I, S>(mut self, landmarks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.landmarks = landmarks
            .into_iter()
            .map(|l| l.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Sets the severity for one landmark.
    #[must_use]
    pub fn landmark_severity(mut self, landmark: impl Into<String>, severity: Severity) -> Self {
        self.severities
            .insert(landmark.into().to_ascii_lowercase(), severity);
        self
    }

    /// Built-in severity: Critical for `main`, Low otherwise.
    #[must_use]
    pub fn default_severity_for(landmark: &str) -> Severity {
        if landmark == "main" {
            Severity::Critical
        } else {
            Severity::Low
        }
    }
}

impl Rule for MissingLandmark {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires <main> and the configured landmark elements"
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let landmarks = ctx
            .options
            .get_str_array("landmarks")
            .unwrap_or_else(|| self.landmarks.clone());
        let configured: HashMap<String, Severity> = ctx
            .options
            .get_option::<HashMap<String, Severity>>("severities")
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        landmarks
            .iter()
            .filter(|tag| ctx.document.find_first(tag).is_none())
            .map(|tag| {
                let severity = configured
                    .get(tag)
                    .or_else(|| self.severities.get(tag))
                    .copied()
                    .unwrap_or_else(|| Self::default_severity_for(tag));

                let (description, fix) = if tag == "main" {
                    (
                        "Without <main>, users cannot skip straight to the content.".to_string(),
                        "Wrap the unique page content in <main>.".to_string(),
                    )
                } else {
                    (
                        format!("No <{tag}> landmark is available for regional navigation."),
                        format!("Mark up the {tag} region with <{tag}>."),
                    )
                };

                Finding::new(
                    CODE,
                    NAME,
                    self.category(),
                    severity,
                    format!("Missing <{tag}> landmark"),
                )
                .with_description(description)
                .with_fix(fix)
                .with_subject(tag.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semlint_core::dom::parse;
    use semlint_core::{Config, RuleConfig};

    fn check_html(rule: &MissingLandmark, html: &str) -> Vec<Finding> {
        let doc = parse(html);
        let options = RuleConfig::default();
        rule.check(&RuleContext::new(&doc, &options))
    }

    fn subjects(findings: &[Finding]) -> Vec<&str> {
        findings
            .iter()
            .filter_map(|f| f.subject.as_deref())
            .collect()
    }

    #[test]
    fn test_all_missing() {
        let findings = check_html(&MissingLandmark::new(), "<div>x</div>");
        assert_eq!(subjects(&findings), vec!["main", "nav", "header", "footer"]);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings[1..].iter().all(|f| f.severity == Severity::Low));
        assert!(findings.iter().all(|f| f.node.is_none()));
    }

    #[test]
    fn test_present_landmarks_are_clean() {
        let findings = check_html(
            &MissingLandmark::new(),
            "<header></header><nav></nav><main></main><footer></footer>",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_builder_settings() {
        let rule = MissingLandmark::new()
            .landmarks(["MAIN", "aside"])
            .landmark_severity("aside", Severity::High);
        let findings = check_html(&rule, "<main></main>");
        assert_eq!(subjects(&findings), vec!["aside"]);
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn test_options_override_builder() {
        let config = Config::parse(
            r#"
[rules.missing-landmark]
landmarks = ["main", "nav"]
severities = { nav = "medium" }
"#,
        )
        .unwrap();
        let options = config.rules.get(NAME).unwrap();
        let doc = parse("<main></main>");
        let findings = MissingLandmark::new().check(&RuleContext::new(&doc, options));
        assert_eq!(subjects(&findings), vec!["nav"]);
        assert_eq!(findings[0].severity, Severity::Medium);
    }
}
