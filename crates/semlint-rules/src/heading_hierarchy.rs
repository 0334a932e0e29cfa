//! Rule to detect skipped heading levels.
//!
//! Headings are walked once in document order. Going down any number of
//! levels, staying level, or going up by exactly one is fine; going up by
//! more (`h2` followed by `h4`) is a skip and is reported on the skipping
//! heading.

use semlint_core::dom::heading_level;
use semlint_core::{Finding, Rule, RuleContext, Severity};

/// Rule code for heading-hierarchy.
pub const CODE: &str = "SEM002";

/// Rule name for heading-hierarchy.
pub const NAME: &str = "heading-hierarchy";

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Flags headings that skip a level.
#[derive(Debug, Clone)]
pub struct HeadingHierarchy {
    /// Severity level.
    pub severity: Severity,
}

impl Default for HeadingHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingHierarchy {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Medium,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for HeadingHierarchy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids skipping heading levels"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let doc = ctx.document;
        let mut findings = Vec::new();
        let mut previous: u8 = 0;

        for node in doc.elements_named(HEADINGS) {
            let Some(level) = doc.tag_name(node).and_then(heading_level) else {
                continue;
            };

            if previous != 0 && level > previous + 1 {
                findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        self.category(),
                        self.severity,
                        format!("Skipped heading level (h{previous} → h{level})"),
                    )
                    .with_description(format!(
                        "Heading jumps from h{previous} to h{level}; assistive tech users lose the document structure."
                    ))
                    .with_fix(format!("Use <h{}> here or add the missing level.", previous + 1))
                    .with_node(node),
                );
            }

            previous = level;
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semlint_core::dom::parse;
    use semlint_core::RuleConfig;

    fn check_html(html: &str) -> Vec<Finding> {
        let doc = parse(html);
        let options = RuleConfig::default();
        HeadingHierarchy::new().check(&RuleContext::new(&doc, &options))
    }

    #[test]
    fn test_detects_skip() {
        let doc = parse("<h1>a</h1><h2>b</h2><h4>c</h4>");
        let options = RuleConfig::default();
        let findings = HeadingHierarchy::new().check(&RuleContext::new(&doc, &options));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].title.contains("h2 → h4"));
        let node = findings[0].node.expect("node");
        assert_eq!(doc.tag_name(node), Some("h4"));
    }

    #[test]
    fn test_decrease_is_legal() {
        let findings = check_html("<h1>a</h1><h3>b</h3><h2>c</h2>");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].title.contains("h1 → h3"));
    }

    #[test]
    fn test_first_heading_may_be_any_level() {
        assert!(check_html("<h3>a</h3><h4>b</h4><h2>c</h2><h1>d</h1>").is_empty());
    }

    #[test]
    fn test_previous_updates_after_violation() {
        // h2 -> h5 fires, then h5 -> h6 is a legal step.
        let findings = check_html("<h2>a</h2><h5>b</h5><h6>c</h6>");
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_no_headings() {
        assert!(check_html("<p>plain</p>").is_empty());
    }
}
