//! Rule to detect the main content living in a generic container.
//!
//! The densest container (by paragraph text below it) is taken to be the
//! primary content. When it holds more than `min_text_length` characters of
//! paragraph text and is not a `<main>` or `<article>`, it is reported.
//!
//! # Options
//!
//! ```toml
//! [rules.generic-main-content]
//! min_text_length = 400
//! ```

use std::collections::HashMap;

use semlint_core::{Finding, NodeId, Rule, RuleContext, Severity};
use tracing::debug;

/// Rule code for generic-main-content.
pub const CODE: &str = "SEM005";

/// Rule name for generic-main-content.
pub const NAME: &str = "generic-main-content";

/// Default paragraph text threshold in characters.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 400;

const CANDIDATES: &[&str] = &["div", "section", "main", "article"];
const SEMANTIC_CONTAINERS: &[&str] = &["main", "article"];

/// Flags a primary content block that is not `<main>`/`<article>`.
#[derive(Debug, Clone)]
pub struct GenericMainContent {
    /// Severity level.
    pub severity: Severity,
    /// Paragraph text length the densest block must exceed.
    pub min_text_length: usize,
}

impl Default for GenericMainContent {
    fn default() -> Self {
        Self::new()
    }
}

impl GenericMainContent {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::High,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the text length threshold.
    #[must_use]
    pub fn min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }
}

/// Paragraph text length below each candidate container.
///
/// Only outermost `<p>` elements count, so nested paragraphs are not
/// counted twice.
fn paragraph_lengths(ctx: &RuleContext<'_>) -> HashMap<NodeId, usize> {
    let doc = ctx.document;
    let mut totals: HashMap<NodeId, usize> = HashMap::new();

    for p in doc.elements_named(&["p"]) {
        if doc.has_ancestor_named(p, "p") {
            continue;
        }
        let length = doc.text_content(p).chars().count();
        if length == 0 {
            continue;
        }
        for ancestor in doc.ancestors(p) {
            if doc
                .tag_name(ancestor)
                .is_some_and(|t| CANDIDATES.contains(&t))
            {
                *totals.entry(ancestor).or_insert(0) += length;
            }
        }
    }

    totals
}

impl Rule for GenericMainContent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the densest content block to be <main> or <article>"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let doc = ctx.document;
        let threshold = ctx.options.get_usize("min_text_length", self.min_text_length);
        let totals = paragraph_lengths(ctx);

        // Document order with a strict comparison: the first maximum wins.
        let mut best: Option<(NodeId, usize)> = None;
        for node in doc.elements_named(CANDIDATES) {
            let length = totals.get(&node).copied().unwrap_or(0);
            if best.map_or(true, |(_, max)| length > max) {
                best = Some((node, length));
            }
        }

        let Some((node, length)) = best else {
            return Vec::new();
        };
        debug!("Densest container holds {length} chars of paragraph text");

        let tag = doc.tag_name(node).unwrap_or("div");
        if length <= threshold || SEMANTIC_CONTAINERS.contains(&tag) {
            return Vec::new();
        }

        vec![Finding::new(
            CODE,
            NAME,
            self.category(),
            self.severity,
            "Main content container is generic",
        )
        .with_description(format!(
            "The block holding most of the text ({length} characters) is a <{tag}>, so crawlers and screen readers cannot identify the primary content."
        ))
        .with_fix(format!("Change this <{tag}> to <main> (or <article> for a standalone piece)."))
        .with_node(node)]
    }
}
