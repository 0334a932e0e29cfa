//! Severity-weighted health score.
//!
//! Each finding deducts a fixed weight from 100. Weights are looked up in a
//! table rather than derived from severity, because findings with the same
//! severity can matter very differently (a missing `<h1>` costs more than one
//! skipped heading level). Lookup order for a finding:
//!
//! 1. `"{rule}:{subject}"` (e.g., `missing-landmark:main`)
//! 2. `"{rule}"`
//! 3. the per-severity fallback
//!
//! All deductions are summed first and the result is clamped to zero once.

use std::collections::BTreeMap;

use crate::types::{Finding, Severity};

/// Highest possible score.
pub const MAX_SCORE: u8 = 100;

/// Built-in deduction table.
///
/// | Key | Weight |
/// |-----|--------|
/// | `missing-h1` | 20 |
/// | `missing-landmark:main` | 15 |
/// | `generic-main-content` | 10 |
/// | `missing-h1:surplus` | 5 |
/// | `heading-hierarchy` | 5 |
/// | `generic-landmark` | 5 |
/// | `missing-alt` | 5 |
/// | `missing-landmark` | 3 |
/// | `anchor-as-button` | 2 |
/// | `fake-button` | 2 |
pub const DEFAULT_WEIGHTS: &[(&str, u32)] = &[
    ("missing-h1", 20),
    ("missing-landmark:main", 15),
    ("generic-main-content", 10),
    ("missing-h1:surplus", 5),
    ("heading-hierarchy", 5),
    ("generic-landmark", 5),
    ("missing-alt", 5),
    ("missing-landmark", 3),
    ("anchor-as-button", 2),
    ("fake-button", 2),
];

/// Fallback weight for findings with no table entry.
#[must_use]
pub fn severity_weight(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 15,
        Severity::High => 8,
        Severity::Medium => 5,
        Severity::Low => 2,
    }
}

/// Deduction lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: BTreeMap<String, u32>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|&(key, weight)| (key.to_string(), weight))
                .collect(),
        }
    }
}

impl WeightTable {
    /// Creates the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or overrides) the weight for a key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, weight: u32) -> Self {
        self.weights.insert(key.into(), weight);
        self
    }

    /// Applies every override from `overrides`.
    #[must_use]
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a u32)>,
    {
        for (key, weight) in overrides {
            self.weights.insert(key.clone(), *weight);
        }
        self
    }

    /// Returns the deduction for one finding.
    #[must_use]
    pub fn weight_for(&self, finding: &Finding) -> u32 {
        finding
            .subject
            .as_ref()
            .and_then(|s| self.weights.get(&format!("{}:{s}", finding.rule)))
            .or_else(|| self.weights.get(&finding.rule))
            .copied()
            .unwrap_or_else(|| severity_weight(finding.severity))
    }

    /// Iterates table entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.weights.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Computes `max(0, 100 - sum(weights))`.
#[must_use]
pub fn score(findings: &[Finding], weights: &WeightTable) -> u8 {
    let total: u64 = findings
        .iter()
        .map(|f| u64::from(weights.weight_for(f)))
        .sum();
    let remaining = u64::from(MAX_SCORE).saturating_sub(total);
    u8::try_from(remaining).unwrap_or(0)
}
