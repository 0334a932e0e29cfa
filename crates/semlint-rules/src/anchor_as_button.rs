//! Rule to detect anchors used as buttons.
//!
//! # Detected Patterns
//!
//! An `<a>` whose trimmed `href` is:
//! - absent or empty
//! - exactly `#`
//! - a `javascript:` URL (any case)
//!
//! Each offending anchor is reported on its own.

use semlint_core::{Category, Finding, Rule, RuleContext, Severity};

/// Rule code for anchor-as-button.
pub const CODE: &str = "SEM006";

/// Rule name for anchor-as-button.
pub const NAME: &str = "anchor-as-button";

const JAVASCRIPT_SCHEME: &str = "javascript:";

/// Flags `<a>` elements that do not navigate anywhere.
#[derive(Debug, Clone)]
pub struct AnchorAsButton {
    /// Severity level.
    pub severity: Severity,
}

impl Default for AnchorAsButton {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorAsButton {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Low,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Returns true if an `href` value does not navigate.
fn is_non_navigating(href: Option<&str>) -> bool {
    let href = href.map_or("", str::trim);
    href.is_empty()
        || href == "#"
        || href
            .get(..JAVASCRIPT_SCHEME.len())
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case(JAVASCRIPT_SCHEME))
}

impl Rule for AnchorAsButton {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags <a> elements without a navigable href"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        ctx.document
            .elements_named(&["a"])
            .filter(|&a| is_non_navigating(ctx.document.attr(a, "href")))
            .map(|a| {
                Finding::new(
                    CODE,
                    NAME,
                    self.category(),
                    self.severity,
                    "Anchor <a> used as button",
                )
                .with_description("Anchors are for navigation; buttons are for actions.")
                .with_fix("Use <button type=\"button\"> for script-driven actions.")
                .with_node(a)
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
        AnchorAsButton::new().check(&RuleContext::new(&doc, &options))
    }

    #[test]
    fn test_non_navigating_hrefs() {
        assert!(is_non_navigating(None));
        assert!(is_non_navigating(Some("")));
        assert!(is_non_navigating(Some("  # ")));
        assert!(is_non_navigating(Some("javascript:void(0)")));
        assert!(is_non_navigating(Some("JavaScript:go()")));
        assert!(!is_non_navigating(Some("/about")));
        assert!(!is_non_navigating(Some("#section")));
        assert!(!is_non_navigating(Some("java")));
    }

    #[test]
    fn test_one_finding_per_anchor() {
        let findings = check_html(
            r##"<a>x</a><a href="#">y</a><a href="javascript:go()">z</a><a href="/ok">ok</a>"##,
        );
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.severity == Severity::Low));
        assert!(findings.iter().all(|f| f.node.is_some()));
    }

    #[test]
    fn test_real_links_are_clean() {
        assert!(check_html(r#"<a href="https://example.com">x</a>"#).is_empty());
    }
}
