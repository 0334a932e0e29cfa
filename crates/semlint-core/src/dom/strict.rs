//! Line-preserving tree builder.
//!
//! Drives the `html5ever` tokenizer directly (it reports the current source
//! line with every token) and assembles the tree with an explicit stack of
//! open elements. Unlike full HTML5 tree construction it refuses to guess:
//! tokenizer errors, stray end tags and unclosed elements abort the build so
//! the caller can fall back to the lenient builder.
//!
//! The tokenizer reports the line a token *ends* on. Elements are recorded at
//! the line of their opening `<` instead, found by scanning the source forward
//! from a cursor that follows the token stream.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use super::{is_void_element, Attributes, Document, Element, NodeData, NodeId, ParseStrategy};

/// Elements whose end tag may be omitted.
const OPTIONAL_END_TAGS: &[&str] = &[
    "html", "head", "body", "p", "li", "dt", "dd", "option", "optgroup", "tr", "td", "th",
    "thead", "tbody", "tfoot", "colgroup", "caption", "rb", "rt", "rp",
];

/// Start tags that implicitly close an open element from the listed set.
const IMPLIED_CLOSE: &[(&str, &[&str])] = &[
    ("li", &["li"]),
    ("dt", &["dt", "dd"]),
    ("dd", &["dt", "dd"]),
    ("option", &["option"]),
    ("tr", &["tr", "td", "th"]),
    ("td", &["td", "th"]),
    ("th", &["td", "th"]),
];

/// Start tags that close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Why the strict builder gave up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrictParseError {
    /// The tokenizer reported malformed markup.
    #[error("tokenizer error at line {line}: {message}")]
    Tokenizer {
        /// Source line of the error.
        line: u64,
        /// Tokenizer message.
        message: String,
    },

    /// An end tag closes nothing that is open.
    #[error("unexpected </{tag}> at line {line}")]
    UnexpectedEndTag {
        /// Tag name.
        tag: String,
        /// Source line of the end tag.
        line: u64,
    },

    /// An element that requires an end tag was never closed.
    #[error("<{tag}> opened at line {line} is never closed")]
    Unclosed {
        /// Tag name.
        tag: String,
        /// Source line of the start tag.
        line: u64,
    },
}

/// Builds a document with per-node line numbers.
///
/// # Errors
///
/// Returns [`StrictParseError`] when the markup is not cleanly nested.
pub fn parse(markup: &str) -> Result<Document, StrictParseError> {
    let sink = TreeSink {
        state: RefCell::new(TreeState::new(markup)),
    };

    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(markup));

    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let state = tokenizer.sink.state.replace(TreeState::new(""));
    state.finish()
}

struct TreeSink<'a> {
    state: RefCell<TreeState<'a>>,
}

impl TokenSink for TreeSink<'_> {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        if state.error.is_some() {
            return TokenSinkResult::Continue;
        }
        match token {
            Token::TagToken(tag) => return state.tag(&tag, line_number),
            Token::CharacterTokens(text) => state.text(&text, line_number),
            Token::CommentToken(text) => {
                let line = state.source.comment_line(line_number);
                state.comment(&text, line);
            }
            Token::ParseError(message) => state.fail(StrictParseError::Tokenizer {
                line: line_number,
                message: message.into_owned(),
            }),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Forward-only cursor over the markup, tracking its line.
struct SourceCursor<'a> {
    source: &'a str,
    offset: usize,
    line: u64,
}

impl<'a> SourceCursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
        }
    }

    fn advance_to(&mut self, offset: usize) {
        let offset = offset.min(self.source.len());
        if offset <= self.offset {
            return;
        }
        let newlines = self.source.as_bytes()[self.offset..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.line += u64::try_from(newlines).unwrap_or_default();
        self.offset = offset;
    }

    /// Moves to the start of `line` if the cursor is above it.
    fn advance_to_line(&mut self, line: u64) {
        while self.line < line {
            let Some(newline) = self.source.as_bytes()[self.offset..]
                .iter()
                .position(|&b| b == b'\n')
            else {
                return;
            };
            self.offset += newline + 1;
            self.line += 1;
        }
    }

    /// Finds `prefix` followed by `name` (ASCII case-insensitive) and a tag
    /// delimiter, starting at the cursor.
    fn find_tag(&self, prefix: &str, name: &str) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let mut from = self.offset;
        while let Some(pos) = self.source.get(from..)?.find(prefix) {
            let start = from + pos;
            let name_start = start + prefix.len();
            let name_end = name_start + name.len();
            let name_matches = bytes
                .get(name_start..name_end)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()));
            let delimited = bytes
                .get(name_end)
                .map_or(true, |b| b.is_ascii_whitespace() || *b == b'/' || *b == b'>');
            if name_matches && delimited {
                return Some(start);
            }
            from = start + 1;
        }
        None
    }

    /// Line of the `<` opening the next `prefix{name}` tag, consuming it.
    ///
    /// `end_line` is the line the tokenizer reported for the finished token;
    /// the cursor moves at least to its start so attribute values on earlier
    /// lines are never mistaken for tags.
    fn tag_line(&mut self, prefix: &str, name: &str, end_line: u64) -> u64 {
        let line = match self.find_tag(prefix, name) {
            Some(start) => {
                self.advance_to(start);
                let line = self.line;
                self.advance_to(start + prefix.len() + name.len());
                line
            }
            None => end_line,
        };
        self.advance_to_line(end_line);
        line
    }

    /// Line of the `<!--` opening the next comment, consuming it.
    fn comment_line(&mut self, end_line: u64) -> u64 {
        let found = self.source.get(self.offset..).and_then(|rest| {
            let start = self.offset + rest.find("<!--")?;
            let body = start + "<!--".len();
            let close = self.source.get(body..)?.find("-->")?;
            Some((start, body + close + "-->".len()))
        });
        let line = match found {
            Some((start, end)) => {
                self.advance_to(start);
                let line = self.line;
                self.advance_to(end);
                line
            }
            _ => end_line,
        };
        self.advance_to_line(end_line);
        line
    }
}

struct TreeState<'a> {
    document: Document,
    open: Vec<NodeId>,
    error: Option<StrictParseError>,
    source: SourceCursor<'a>,
}

impl<'a> TreeState<'a> {
    fn new(markup: &'a str) -> Self {
        Self {
            document: Document::new(ParseStrategy::Strict),
            open: Vec::new(),
            error: None,
            source: SourceCursor::new(markup),
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn current_tag(&self) -> Option<&str> {
        self.open.last().and_then(|&id| self.document.tag_name(id))
    }

    fn fail(&mut self, error: StrictParseError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn tag(&mut self, tag: &Tag, line: u64) -> TokenSinkResult<()> {
        let name = tag.name.to_string();
        match tag.kind {
            TagKind::StartTag => {
                let line = self.source.tag_line("<", &name, line);
                self.start_tag(&name, tag, line)
            }
            TagKind::EndTag => {
                let line = self.source.tag_line("</", &name, line);
                self.end_tag(&name, line);
                TokenSinkResult::Continue
            }
        }
    }

    fn start_tag(&mut self, name: &str, tag: &Tag, line: u64) -> TokenSinkResult<()> {
        self.close_implied(name);

        let attrs: Attributes = tag
            .attrs
            .iter()
            .map(|attr| (&*attr.name.local, &*attr.value))
            .collect();
        let parent = self.current();
        let id = self.document.append(
            parent,
            NodeData::Element(Element::new(name, attrs)),
            Some(line),
        );

        if is_void_element(name) || tag.self_closing {
            return TokenSinkResult::Continue;
        }
        self.open.push(id);

        match name {
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }

    fn close_implied(&mut self, name: &str) {
        if CLOSES_PARAGRAPH.contains(&name) && self.current_tag() == Some("p") {
            self.open.pop();
        }
        if let Some((_, closes)) = IMPLIED_CLOSE.iter().find(|(opener, _)| *opener == name) {
            if self.current_tag().is_some_and(|t| closes.contains(&t)) {
                self.open.pop();
            }
        }
    }

    fn end_tag(&mut self, name: &str, line: u64) {
        if is_void_element(name) {
            return;
        }
        let Some(pos) = self
            .open
            .iter()
            .rposition(|&id| self.document.tag_name(id) == Some(name))
        else {
            self.fail(StrictParseError::UnexpectedEndTag {
                tag: name.to_string(),
                line,
            });
            return;
        };
        if let Some(err) = self.first_unclosed(&self.open[pos + 1..]) {
            self.fail(err);
            return;
        }
        self.open.truncate(pos);
    }

    fn first_unclosed(&self, ids: &[NodeId]) -> Option<StrictParseError> {
        ids.iter().find_map(|&id| {
            let tag = self.document.tag_name(id)?;
            (!OPTIONAL_END_TAGS.contains(&tag)).then(|| StrictParseError::Unclosed {
                tag: tag.to_string(),
                line: self.document.line(id).unwrap_or_default(),
            })
        })
    }

    fn text(&mut self, text: &str, line: u64) {
        let parent = self.current();
        self.document.append_text(parent, text, Some(line));
    }

    fn comment(&mut self, text: &str, line: u64) {
        let parent = self.current();
        self.document
            .append(parent, NodeData::Comment(text.to_string()), Some(line));
    }

    fn finish(self) -> Result<Document, StrictParseError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Some(err) = self.first_unclosed(&self.open) {
            return Err(err);
        }
        Ok(self.document)
    }
}
