//! Human-readable node locations.

use std::collections::HashMap;

use crate::dom::{Document, NodeId};

/// Resolves nodes to location labels for one analysis run.
///
/// With line info the label is `"Line {n}"`. Otherwise it is
/// `"{tag} #{count}"`, where the count is a per-tag-name running counter
/// bumped each time a new node of that tag is located. Labels are memoized per
/// node, so locating the same element twice yields the same label.
///
/// A `Locator` must not outlive the run it was created for.
#[derive(Debug)]
pub struct Locator<'a> {
    document: &'a Document,
    counters: HashMap<String, usize>,
    resolved: HashMap<NodeId, String>,
}

impl<'a> Locator<'a> {
    /// Creates a locator with fresh counters.
    #[must_use]
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            counters: HashMap::new(),
            resolved: HashMap::new(),
        }
    }

    /// Returns the location label for `node`.
    pub fn locate(&mut self, node: NodeId) -> String {
        if let Some(label) = self.resolved.get(&node) {
            return label.clone();
        }

        let label = match self.document.line(node) {
            Some(line) if self.document.has_line_info() => format!("Line {line}"),
            _ => {
                let tag = self.document.tag_name(node).unwrap_or("#text");
                let count = self.counters.entry(tag.to_string()).or_insert(0);
                *count += 1;
                format!("{tag} #{count}")
            }
        };

        self.resolved.insert(node, label.clone());
        label
    }
}
