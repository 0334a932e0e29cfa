//! Lenient tree builder.
//!
//! Runs the full HTML5 tree-construction algorithm (which recovers from any
//! input) into an `RcDom` and copies the result into our arena. Source lines
//! are not available on this path.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::{Attributes, Document, Element, NodeData, NodeId, ParseStrategy};

/// Builds a document without line information. Never fails.
pub fn parse(markup: &str) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(markup);

    let mut document = Document::new(ParseStrategy::Lenient);
    convert(&dom.document, &mut document);

    tracing::debug!(
        "Lenient parse produced {} element(s)",
        document.element_count()
    );
    document
}

/// Copies an `RcDom` subtree into the arena.
///
/// Uses an explicit work list so deeply nested input cannot exhaust the stack.
fn convert(root: &Handle, document: &mut Document) {
    let mut work: Vec<(Handle, NodeId)> = vec![(root.clone(), NodeId::ROOT)];

    while let Some((handle, parent)) = work.pop() {
        let target = match &handle.data {
            RcNodeData::Document => parent,
            RcNodeData::Element { name, attrs, .. } => {
                let attrs: Attributes = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (&*attr.name.local, &*attr.value))
                    .collect();
                document.append(
                    parent,
                    NodeData::Element(Element::new(&name.local, attrs)),
                    None,
                )
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    document.append_text(parent, &text, None);
                }
                continue;
            }
            RcNodeData::Comment { contents } => {
                document.append(parent, NodeData::Comment(contents.to_string()), None);
                continue;
            }
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => continue,
        };

        for child in handle.children.borrow().iter().rev() {
            work.push((child.clone(), target));
        }
    }
}
