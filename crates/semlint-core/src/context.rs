//! Context types for rule execution.

use crate::config::RuleConfig;
use crate::dom::{Document, NodeId};

/// Context provided to rules.
///
/// Holds the immutable document under analysis and the rule's configured
/// options. Rules receive nothing else, so they cannot share state.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The document being analyzed (after the hygiene pass).
    pub document: &'a Document,
    /// Options from `[rules.<name>]`, or defaults when absent.
    pub options: &'a RuleConfig,
}

impl<'a> RuleContext<'a> {
    /// Creates a new rule context.
    #[must_use]
    pub fn new(document: &'a Document, options: &'a RuleConfig) -> Self {
        Self { document, options }
    }

    /// Lower-cased `class` and `id` values of an element, space-joined.
    ///
    /// Used by keyword-based inference rules.
    #[must_use]
    pub fn class_and_id(&self, node: NodeId) -> String {
        let class = self.document.attr(node, "class").unwrap_or_default();
        let id = self.document.attr(node, "id").unwrap_or_default();
        format!("{class} {id}").trim().to_ascii_lowercase()
    }
}
