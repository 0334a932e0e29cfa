//! Parsing strategy selection.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{lenient, strict, Document};

/// Which tree builder produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStrategy {
    /// Tokenizer-driven builder with source line numbers.
    Strict,
    /// HTML5 tree construction, no line numbers.
    Lenient,
}

impl std::fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

/// Parser selection from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserMode {
    /// Try the strict builder first, fall back to lenient.
    #[default]
    Auto,
    /// Require the strict builder; falling back is logged as a warning.
    Strict,
    /// Always use the lenient builder.
    Lenient,
}

/// Parses markup, preferring the line-preserving strategy.
///
/// Never fails: markup the strict builder rejects goes through the lenient one.
#[must_use]
pub fn parse(markup: &str) -> Document {
    parse_with(markup, ParserMode::Auto)
}

/// Parses markup with an explicit parser mode.
#[must_use]
pub fn parse_with(markup: &str, mode: ParserMode) -> Document {
    if mode == ParserMode::Lenient {
        return lenient::parse(markup);
    }
    match strict::parse(markup) {
        Ok(document) => document,
        Err(e) => {
            if mode == ParserMode::Strict {
                warn!("Strict parse failed ({e}); falling back to lenient parser");
            } else {
                debug!("Strict parse failed ({e}); falling back to lenient parser");
            }
            lenient::parse(markup)
        }
    }
}
