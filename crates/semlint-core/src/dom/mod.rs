//! Arena-backed document tree.
//!
//! Every node lives in a single `Vec` owned by [`Document`] and is addressed by
//! a copyable [`NodeId`]. Parent links are plain indices used for lookup only;
//! ownership flows strictly from the arena.

mod lenient;
mod parser;
mod strict;

pub use parser::{parse, parse_with, ParseStrategy, ParserMode};
pub use strict::StrictParseError;

/// Elements that never have content or an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose contents never count as document text.
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Attributes whose values are whitespace-separated token lists.
const MULTI_VALUED_ATTRIBUTES: &[&str] = &[
    "class",
    "rel",
    "rev",
    "accept-charset",
    "headers",
    "accesskey",
    "dropzone",
];

/// Returns true if `name` is a void element.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Node identifier (index into the document arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The document root.
    pub const ROOT: Self = Self(0);

    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered attribute list of an element.
///
/// Names are lower-cased. Multi-valued attributes (`class`, `rel`, ...) are
/// normalized to single-space separated tokens at insertion time. When an
/// attribute repeats, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Creates an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attribute, keeping the first value for duplicate names.
    pub fn insert(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if self.0.iter().any(|(n, _)| *n == name) {
            return;
        }
        let value = if MULTI_VALUED_ATTRIBUTES.contains(&name.as_str()) {
            value.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            value.to_string()
        };
        self.0.push((name, value));
    }

    /// Gets an attribute value by (case-insensitive) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the attribute is present, whatever its value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates attributes in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// Element data: lower-cased tag name plus attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Attributes,
}

impl Element {
    /// Creates a new element. The tag name is lower-cased.
    #[must_use]
    pub fn new(name: &str, attrs: Attributes) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs,
        }
    }

    /// Lower-cased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute list.
    #[must_use]
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Heading level (1-6) for `h1`..`h6`, `None` otherwise.
    #[must_use]
    pub fn heading_level(&self) -> Option<u8> {
        heading_level(&self.name)
    }
}

/// Heading level for a tag name, `None` if it is not `h1`..`h6`.
#[must_use]
pub fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root.
    Document,
    /// An element.
    Element(Element),
    /// Character data.
    Text(String),
    /// A comment.
    Comment(String),
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
    line: Option<u64>,
}

impl Node {
    /// Parent node, `None` for the root and for detached nodes.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Node payload.
    #[must_use]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Source line (1-indexed) when the parser preserved it.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Element payload, if this node is an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    strategy: ParseStrategy,
}

impl Document {
    /// Creates an empty document containing only the root.
    #[must_use]
    pub fn new(strategy: ParseStrategy) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
                line: None,
            }],
            strategy,
        }
    }

    /// Appends a node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData, line: Option<u64>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
            line,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends text under `parent`, merging with a trailing text sibling.
    pub fn append_text(&mut self, parent: NodeId, text: &str, line: Option<u64>) {
        if let Some(&last) = self.nodes[parent.0].children.last() {
            if let NodeData::Text(existing) = &mut self.nodes[last.0].data {
                existing.push_str(text);
                return;
            }
        }
        self.append(parent, NodeData::Text(text.to_string()), line);
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Which strategy built this tree.
    #[must_use]
    pub fn strategy(&self) -> ParseStrategy {
        self.strategy
    }

    /// Whether nodes carry source line numbers.
    #[must_use]
    pub fn has_line_info(&self) -> bool {
        self.strategy == ParseStrategy::Strict
    }

    /// Gets a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Element payload of a node.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(Node::as_element)
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::name)
    }

    /// Attribute value of an element node.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attrs().get(name))
    }

    /// Source line of a node.
    #[must_use]
    pub fn line(&self, id: NodeId) -> Option<u64> {
        self.get(id).and_then(Node::line)
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Children of a node (empty for unknown ids).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    /// Previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&s| s == id)?;
        pos.checked_sub(1).map(|i| siblings[i])
    }

    /// Next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Ancestors of a node, nearest first, excluding the node itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Descendants of a node in document (pre-)order, excluding the node itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants {
            document: self,
            stack,
        }
    }

    /// All attached elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(NodeId::ROOT)
            .filter(move |&id| self.element(id).is_some())
    }

    /// All attached elements whose tag name is one of `names`, in document order.
    pub fn elements_named<'a>(&'a self, names: &'a [&'a str]) -> impl Iterator<Item = NodeId> + 'a {
        self.elements()
            .filter(move |&id| self.tag_name(id).is_some_and(|t| names.contains(&t)))
    }

    /// First element with the given tag name.
    #[must_use]
    pub fn find_first(&self, name: &str) -> Option<NodeId> {
        self.elements().find(|&id| self.tag_name(id) == Some(name))
    }

    /// Number of attached element nodes.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    /// Returns true if some ancestor of `id` is a `name` element.
    #[must_use]
    pub fn has_ancestor_named(&self, id: NodeId, name: &str) -> bool {
        self.ancestors(id).any(|a| self.tag_name(a) == Some(name))
    }

    /// Returns true if some descendant of `id` has one of the tag names.
    #[must_use]
    pub fn has_descendant_named(&self, id: NodeId, names: &[&str]) -> bool {
        self.descendants(id)
            .any(|d| self.tag_name(d).is_some_and(|t| names.contains(&t)))
    }

    /// Whitespace-normalized text of all descendants.
    ///
    /// Text inside `script`/`style` and comments is excluded. Separate text
    /// nodes are joined with a space.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut chunks: Vec<&str> = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            match &node.data {
                NodeData::Text(text) => chunks.push(text),
                NodeData::Element(e) if current != id && NON_TEXT_ELEMENTS.contains(&e.name()) => {}
                NodeData::Comment(_) => {}
                _ => stack.extend(node.children.iter().rev()),
            }
        }
        chunks
            .iter()
            .flat_map(|c| c.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Detaches a node (and its subtree) from its parent.
    ///
    /// The subtree stays in the arena but is no longer reachable by traversal.
    pub fn detach(&mut self, id: NodeId) {
        if id == NodeId::ROOT {
            return;
        }
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
    }

    /// Detaches every element whose tag name is one of `names`.
    ///
    /// Returns the number of subtrees removed.
    pub fn strip_elements(&mut self, names: &[&str]) -> usize {
        let targets: Vec<NodeId> = self.elements_named(names).collect();
        for &id in &targets {
            self.detach(id);
        }
        targets.len()
    }
}

/// Pre-order iterator over descendants. See [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(ParseStrategy::Lenient);
        let body = doc.append(
            NodeId::ROOT,
            NodeData::Element(Element::new("BODY", Attributes::new())),
            None,
        );
        let p = doc.append(
            body,
            NodeData::Element(Element::new("p", Attributes::new())),
            None,
        );
        doc.append_text(p, "  Hello\n", None);
        doc.append_text(p, " world ", None);
        let script = doc.append(
            body,
            NodeData::Element(Element::new("script", Attributes::new())),
            None,
        );
        doc.append_text(script, "var x = 1;", None);
        (doc, body, p, script)
    }

    #[test]
    fn tag_names_are_lowercased() {
        let (doc, body, _, _) = sample();
        assert_eq!(doc.tag_name(body), Some("body"));
    }

    #[test]
    fn class_values_are_normalized() {
        let attrs: Attributes = [("CLASS", "  btn\tprimary  "), ("id", " x ")]
            .into_iter()
            .collect();
        assert_eq!(attrs.get("class"), Some("btn primary"));
        assert_eq!(attrs.get("ID"), Some(" x "));
    }

    #[test]
    fn duplicate_attribute_keeps_first() {
        let mut attrs = Attributes::new();
        attrs.insert("href", "/a");
        attrs.insert("HREF", "/b");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("href"), Some("/a"));
    }

    #[test]
    fn text_content_skips_script_and_normalizes() {
        let (doc, body, p, _) = sample();
        assert_eq!(doc.text_content(p), "Hello world");
        assert_eq!(doc.text_content(body), "Hello world");
    }

    #[test]
    fn siblings_and_ancestors() {
        let (doc, body, p, script) = sample();
        assert_eq!(doc.next_sibling(p), Some(script));
        assert_eq!(doc.prev_sibling(script), Some(p));
        assert_eq!(doc.prev_sibling(p), None);
        let ancestors: Vec<_> = doc.ancestors(p).collect();
        assert_eq!(ancestors, vec![body, NodeId::ROOT]);
    }

    #[test]
    fn strip_elements_detaches_subtrees() {
        let (mut doc, body, p, _) = sample();
        assert_eq!(doc.strip_elements(&["script"]), 1);
        assert_eq!(doc.children(body), &[p]);
        assert!(doc.find_first("script").is_none());
    }

    #[test]
    fn descendants_are_in_document_order() {
        let (doc, body, p, script) = sample();
        let elements: Vec<_> = doc.elements().collect();
        assert_eq!(elements, vec![body, p, script]);
    }
}
