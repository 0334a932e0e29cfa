//! Rule to require exactly one `<h1>`.
//!
//! # Rationale
//!
//! The `<h1>` is the primary topical signal of a page for crawlers and the
//! first stop for screen reader users jumping between headings:
//! - A page without one has no stated topic
//! - Several compete with each other and dilute focus
//!
//! # Detected Patterns
//!
//! - No `<h1>` anywhere: one finding without a node
//! - Every `<h1>` after the first: one finding each

use semlint_core::{Category, Finding, Rule, RuleContext, Severity};

/// Rule code for missing-h1.
pub const CODE: &str = "SEM001";

/// Rule name for missing-h1.
pub const NAME: &str = "missing-h1";

/// Weight subject for surplus `<h1>` findings.
pub const SURPLUS_SUBJECT: &str = "surplus";

/// Requires exactly one `<h1>` per document.
#[derive(Debug, Clone)]
pub struct MissingH1 {
    /// Severity when no `<h1>` exists.
    pub severity: Severity,
    /// Severity for each surplus `<h1>`.
    pub surplus_severity: Severity,
}

impl Default for MissingH1 {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingH1 {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Critical,
            surplus_severity: Severity::Medium,
        }
    }

    /// Sets the severity for a missing `<h1>`.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the severity for surplus `<h1>` elements.
    #[must_use]
    pub fn surplus_severity(mut self, severity: Severity) -> Self {
        self.surplus_severity = severity;
        self
    }
}

impl Rule for MissingH1 {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires exactly one <h1> per document"
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let h1s: Vec<_> = ctx.document.elements_named(&["h1"]).collect();

        if h1s.is_empty() {
            return vec![Finding::new(CODE, NAME, self.category(), self.severity, "Missing H1")
                .with_description("The <h1> is the primary relevance signal of the page.")
                .with_fix("Add exactly one <h1> containing the main topic.")];
        }

        h1s.into_iter()
            .skip(1)
            .map(|node| {
                Finding::new(
                    CODE,
                    NAME,
                    self.category(),
                    self.surplus_severity,
                    "Multiple H1",
                )
                .with_description("Multiple <h1> elements dilute the page's topical focus.")
                .with_fix("Change this heading to <h2> or a lower level.")
                .with_node(node)
                .with_subject(SURPLUS_SUBJECT)
            })
            .collect()
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
        MissingH1::new().check(&RuleContext::new(&doc, &options))
    }

    #[test]
    fn test_detects_missing_h1() {
        let findings = check_html("<main><h2>Sub</h2></main>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, CODE);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings[0].node.is_none());
        assert!(findings[0].subject.is_none());
    }

    #[test]
    fn test_single_h1_is_clean() {
        assert!(check_html("<h1>Title</h1><h2>Sub</h2>").is_empty());
    }

    #[test]
    fn test_surplus_h1_references_second() {
        let doc = parse("<h1>One</h1>\n<h1>Two</h1>");
        let options = RuleConfig::default();
        let findings = MissingH1::new().check(&RuleContext::new(&doc, &options));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "Multiple H1");
        assert_eq!(findings[0].severity, Severity::Medium);
        assert_eq!(findings[0].subject.as_deref(), Some(SURPLUS_SUBJECT));

        let node = findings[0].node.expect("node");
        assert_eq!(doc.text_content(node), "Two");
    }

    #[test]
    fn test_one_finding_per_surplus() {
        assert_eq!(check_html("<h1>a</h1><h1>b</h1><h1>c</h1>").len(), 2);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(check_html("").len(), 1);
    }
}
