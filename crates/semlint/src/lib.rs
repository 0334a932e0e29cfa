//! # semlint
//!
//! Semantic HTML structure auditor.
//!
//! This is the main facade crate that re-exports the core engine and the
//! built-in rules.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use semlint::Config;
//!
//! let report = semlint::analyze("<main><h1>Hello</h1></main>", &Config::default());
//! for finding in &report.findings {
//!     println!("{finding}");
//! }
//! println!("score: {}", report.score);
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use semlint::Analyzer;
//! use semlint::rules::{MissingAlt, Preset};
//!
//! let analyzer = Analyzer::builder()
//!     .rules(Preset::Minimal.rules())
//!     .rule(MissingAlt::new().severity(semlint::Severity::Critical))
//!     .build();
//!
//! let report = analyzer.analyze(markup);
//! ```
//!
//! Snippets and outline text are copied from the audited document and may
//! contain arbitrary markup; escape them before rendering as HTML.

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use semlint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use semlint_rules::*;
}

mod runner;

pub use runner::{analyze, analyzer_for, analyzer_with, resolve_preset, RunError, DEFAULT_PRESET};
