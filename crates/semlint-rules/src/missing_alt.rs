//! Rule to require alternative text on images.
//!
//! An `alt` that is absent, empty, or only whitespace counts as missing.

use semlint_core::{Category, Finding, Rule, RuleContext, Severity};

/// Rule code for missing-alt.
pub const CODE: &str = "SEM007";

/// Rule name for missing-alt.
pub const NAME: &str = "missing-alt";

/// Requires a non-empty `alt` on every `<img>`.
#[derive(Debug, Clone)]
pub struct MissingAlt {
    /// Severity level.
    pub severity: Severity,
}

impl Default for MissingAlt {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingAlt {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::High,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MissingAlt {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires alt text on <img> elements"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        ctx.document
            .elements_named(&["img"])
            .filter(|&img| {
                ctx.document
                    .attr(img, "alt")
                    .map_or(true, |alt| alt.trim().is_empty())
            })
            .map(|img| {
                Finding::new(CODE, NAME, self.category(), self.severity, "Missing alt text")
                    .with_description("Screen readers cannot describe this image.")
                    .with_fix("Add alt=\"Description of image\".")
                    .with_node(img)
            })
            .collect()
    }
}
