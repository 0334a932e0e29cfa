//! Rule trait for defining audit rules.

use crate::context::RuleContext;
use crate::types::{Category, Finding, Severity};

/// A document audit rule.
///
/// A rule is a pure function of the document and its options: it must not
/// keep state between calls and must never panic, whatever the tree looks
/// like. Absence of data (no headings, no images) yields no findings.
///
/// Findings reference nodes through [`Finding::with_node`]; the analyzer
/// resolves locations and snippets afterwards.
///
/// # Example
///
/// ```ignore
/// use semlint_core::{Category, Finding, Rule, RuleContext, Severity};
///
/// pub struct NoMarquee;
///
/// impl Rule for NoMarquee {
///     fn name(&self) -> &'static str { "no-marquee" }
///     fn code(&self) -> &'static str { "SEM100" }
///     fn category(&self) -> Category { Category::Quality }
///
///     fn check(&self, ctx: &RuleContext) -> Vec<Finding> {
///         ctx.document
///             .elements_named(&["marquee"])
///             .map(|id| {
///                 Finding::new(self.code(), self.name(), self.category(), Severity::Low, "Marquee")
///                     .with_node(id)
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "missing-h1").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SEM001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the category of this rule's findings.
    fn category(&self) -> Category {
        Category::Structure
    }

    /// Returns the default severity for findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    /// Checks the document and returns findings in discovery order.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
