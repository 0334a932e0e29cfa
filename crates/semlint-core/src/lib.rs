//! # semlint-core
//!
//! Core framework for semantic HTML auditing.
//!
//! This crate provides the foundational pieces for building document audits.
//! It includes:
//!
//! - [`dom`] for parsing markup into a navigable tree (with source lines
//!   when the markup allows it)
//! - [`Rule`] trait for document rules
//! - [`Analyzer`] for orchestrating rule execution into a [`Report`]
//! - [`Locator`] and [`snippet`] for pointing findings back at the source
//! - [`scoring`] for the severity-weighted health score
//!
//! ## Example
//!
//! ```ignore
//! use semlint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .config(Config::default())
//!     .build();
//!
//! let report = analyzer.analyze("<main><h1>Hello</h1></main>");
//! println!("{}", report.format_text());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod locator;
mod rule;
mod types;

/// Document tree and parsers.
pub mod dom;
/// Severity-weighted scoring.
pub mod scoring;
/// Snippet reconstruction.
pub mod snippet;

pub use analyzer::{Analyzer, AnalyzerBuilder, LANDMARK_TAGS};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, ScoringConfig};
pub use context::RuleContext;
pub use dom::{Document, NodeId, ParseStrategy, ParserMode};
pub use locator::Locator;
pub use rule::{Rule, RuleBox};
pub use scoring::WeightTable;
pub use types::{
    line_span, Category, Finding, FindingDiagnostic, OutlineEntry, Report, Severity,
    SeverityCounts, GLOBAL_LOCATION,
};
