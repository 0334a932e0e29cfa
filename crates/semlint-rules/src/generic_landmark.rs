//! Rule to detect generic containers standing in for landmarks ("divitis").
//!
//! # Detected Patterns
//!
//! A `div` or `span` whose `class`/`id` names a landmark role, outside any
//! real element of that role:
//!
//! ```html
//! <div class="main-nav"><a href="/">Home</a></div>
//! ```
//!
//! Only the first match per implied tag is reported.

use std::collections::HashSet;

use semlint_core::{Finding, Rule, RuleContext, Severity};
use tracing::trace;

use crate::keywords::implied_landmark;

/// Rule code for generic-landmark.
pub const CODE: &str = "SEM004";

/// Rule name for generic-landmark.
pub const NAME: &str = "generic-landmark";

const GENERIC_CONTAINERS: &[&str] = &["div", "span"];

/// Flags `div`/`span` elements that should be landmark elements.
#[derive(Debug, Clone)]
pub struct GenericLandmark {
    /// Severity level.
    pub severity: Severity,
}

impl Default for GenericLandmark {
    fn default() -> Self {
        Self::new()
    }
}

impl GenericLandmark {
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

impl Rule for GenericLandmark {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags <div>/<span> used where a landmark element belongs"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let doc = ctx.document;
        let mut reported: HashSet<&'static str> = HashSet::new();
        let mut findings = Vec::new();

        for node in doc.elements_named(GENERIC_CONTAINERS) {
            let Some(implied) = implied_landmark(&ctx.class_and_id(node)) else {
                continue;
            };
            if reported.contains(implied) {
                continue;
            }
            if doc.has_ancestor_named(node, implied) {
                trace!("{implied} keyword inside a real <{implied}>, skipping");
                continue;
            }

            let tag = doc.tag_name(node).unwrap_or("div");
            reported.insert(implied);
            findings.push(
                Finding::new(
                    CODE,
                    NAME,
                    self.category(),
                    self.severity,
                    format!("Generic <{tag}> used as <{implied}>"),
                )
                .with_description(format!(
                    "Assistive tech can jump directly to <{implied}> landmarks, not to a <{tag}>."
                ))
                .with_fix(format!("Rename <{tag}> to <{implied}>."))
                .with_node(node)
                .with_subject(implied),
            );
        }

        findings
    }
}
