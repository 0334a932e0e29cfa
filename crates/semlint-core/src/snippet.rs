//! Snippet reconstruction.
//!
//! Rebuilds a short, display-ready view of an element from the parsed tree
//! instead of slicing the original source, so the result does not depend on
//! how the markup was formatted or minified. The output is raw, unescaped
//! document text: callers that render it as markup must escape it.

use std::fmt::Write;

use crate::dom::{is_void_element, Document, NodeId};

/// Maximum characters of text preview.
pub const PREVIEW_CHARS: usize = 60;

/// Maximum characters of a single attribute value.
pub const ATTRIBUTE_VALUE_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

/// Truncates `text` to at most `max` characters, appending `...` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => format!("{}{ELLIPSIS}", &text[..byte]),
        None => text.to_string(),
    }
}

/// Reconstructs the opening tag of an element: `<tag a="v" b="w">`.
///
/// Non-element nodes yield an empty string.
#[must_use]
pub fn opening_tag(document: &Document, node: NodeId) -> String {
    let Some(element) = document.element(node) else {
        return String::new();
    };
    let mut out = format!("<{}", element.name());
    for (name, value) in element.attrs().iter() {
        let _ = write!(out, " {name}=\"{}\"", truncate(value, ATTRIBUTE_VALUE_CHARS));
    }
    out.push('>');
    out
}

/// Reconstructs an element for display.
///
/// Void elements render as their opening tag only. Other elements add a text
/// preview line (when there is text) and a closing tag line.
#[must_use]
pub fn snippet(document: &Document, node: NodeId) -> String {
    let Some(name) = document.tag_name(node) else {
        return String::new();
    };
    let mut out = opening_tag(document, node);
    if is_void_element(name) {
        return out;
    }
    let text = document.text_content(node);
    if !text.is_empty() {
        let _ = write!(out, "\n  {}", truncate(&text, PREVIEW_CHARS));
    }
    let _ = write!(out, "\n</{name}>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn void_element_is_opening_tag_only() {
        let doc = parse(r#"<img src="cat.png" class="hero  wide">"#);
        let img = doc.find_first("img").expect("img");
        insta::assert_snapshot!(snippet(&doc, img), @r#"<img src="cat.png" class="hero wide">"#);
    }

    #[test]
    fn element_has_preview_and_closing_tag() {
        let doc = parse(r#"<div id="nav"><a href="/">Home</a> <a href="/blog">Blog</a></div>"#);
        let div = doc.find_first("div").expect("div");
        assert_eq!(snippet(&doc, div), "<div id=\"nav\">\n  Home Blog\n</div>");
    }

    #[test]
    fn empty_element_has_no_preview_line() {
        let doc = parse("<main></main>");
        let main = doc.find_first("main").expect("main");
        assert_eq!(snippet(&doc, main), "<main>\n</main>");
    }

    #[test]
    fn long_text_is_truncated() {
        let body = "word ".repeat(40);
        let doc = parse(&format!("<p>{body}</p>"));
        let p = doc.find_first("p").expect("p");
        let preview = snippet(&doc, p);
        let line = preview.lines().nth(1).expect("preview line");
        assert!(line.ends_with("..."));
        assert_eq!(line.trim_start().chars().count(), PREVIEW_CHARS + ELLIPSIS.len());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate(&text, 3), "ééé...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn attribute_values_are_not_escaped() {
        let doc = parse(r#"<a href="/?q=<b>&amp;x" title='say "hi"'>x</a>"#);
        let a = doc.find_first("a").expect("a");
        insta::assert_snapshot!(opening_tag(&doc, a), @r#"<a href="/?q=<b>&x" title="say "hi"">"#);
    }
}
