//! Rule to detect styled containers posing as buttons.
//!
//! # Detected Patterns
//!
//! ```html
//! <div class="btn btn-primary" onclick="buy()">Buy</div>
//! ```
//!
//! A `div`/`span` with a button-like class that wraps no `<a>` or
//! `<button>` is not focusable or announced as a control.

use semlint_core::{Category, Finding, Rule, RuleContext, Severity};

use crate::keywords::has_button_token;

/// Rule code for fake-button.
pub const CODE: &str = "SEM008";

/// Rule name for fake-button.
pub const NAME: &str = "fake-button";

const INTERACTIVE: &[&str] = &["a", "button"];

/// Flags `div`/`span` elements styled as buttons without a real control.
#[derive(Debug, Clone)]
pub struct FakeButton {
    /// Severity level.
    pub severity: Severity,
}

impl Default for FakeButton {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeButton {
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

impl Rule for FakeButton {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags <div>/<span> styled as buttons without a real control"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let doc = ctx.document;
        doc.elements_named(&["div", "span"])
            .filter(|&node| doc.attr(node, "class").is_some_and(has_button_token))
            .filter(|&node| !doc.has_descendant_named(node, INTERACTIVE))
            .map(|node| {
                let tag = doc.tag_name(node).unwrap_or("div");
                Finding::new(
                    CODE,
                    NAME,
                    self.category(),
                    self.severity,
                    format!("Generic <{tag}> styled as a button"),
                )
                .with_description("It is neither keyboard-focusable nor announced as a button.")
                .with_fix(format!("Replace the <{tag}> with <button>."))
                .with_node(node)
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
        FakeButton::new().check(&RuleContext::new(&doc, &options))
    }

    #[test]
    fn test_detects_div_button() {
        let findings = check_html(r#"<div class="btn btn-primary">Buy</div>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert_eq!(findings[0].title, "Generic <div> styled as a button");
    }

    #[test]
    fn test_wrapper_with_real_control_is_clean() {
        assert!(check_html(r#"<div class="btn"><button>Buy</button></div>"#).is_empty());
        assert!(check_html(r#"<span class="button"><a href="/buy">Buy</a></span>"#).is_empty());
    }

    #[test]
    fn test_unrelated_classes_are_clean() {
        assert!(check_html(r#"<div class="buttons-row">x</div><div>y</div>"#).is_empty());
    }
}
