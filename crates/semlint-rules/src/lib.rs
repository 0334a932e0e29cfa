//! # semlint-rules
//!
//! Built-in audit rules for semlint.
//!
//! This crate provides the structural, accessibility and SEO checks run
//! against a parsed HTML document.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SEM001 | `missing-h1` | Requires exactly one `<h1>` |
//! | SEM002 | `heading-hierarchy` | Forbids skipping heading levels |
//! | SEM003 | `missing-landmark` | Requires `<main>` and the configured landmarks |
//! | SEM004 | `generic-landmark` | Flags `<div>`/`<span>` standing in for landmarks |
//! | SEM005 | `generic-main-content` | Flags a primary content block that is not `<main>`/`<article>` |
//! | SEM006 | `anchor-as-button` | Flags `<a>` elements without a navigable `href` |
//! | SEM007 | `missing-alt` | Requires alt text on images |
//! | SEM008 | `fake-button` | Flags containers styled as buttons |
//!
//! ## Usage
//!
//! ```ignore
//! use semlint_core::Analyzer;
//! use semlint_rules::{MissingAlt, MissingH1};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MissingH1::new())
//!     .rule(MissingAlt::new())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anchor_as_button;
mod fake_button;
mod generic_landmark;
mod generic_main_content;
mod heading_hierarchy;
/// Keyword tables used by inference rules.
pub mod keywords;
mod missing_alt;
mod missing_h1;
mod missing_landmark;
mod presets;

pub use anchor_as_button::AnchorAsButton;
pub use fake_button::FakeButton;
pub use generic_landmark::GenericLandmark;
pub use generic_main_content::GenericMainContent;
pub use heading_hierarchy::HeadingHierarchy;
pub use missing_alt::MissingAlt;
pub use missing_h1::MissingH1;
pub use missing_landmark::MissingLandmark;
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};

/// Re-export core types for convenience.
pub use semlint_core::{Finding, Rule, Severity};
