//! Core analyzer for orchestrating audit execution.

use crate::config::{Config, RuleConfig};
use crate::context::RuleContext;
use crate::dom::{heading_level, parse_with, Document, NodeId};
use crate::locator::Locator;
use crate::rule::{Rule, RuleBox};
use crate::scoring::{score, WeightTable};
use crate::snippet::{snippet, truncate};
use crate::types::{Finding, OutlineEntry, Report};

use tracing::{debug, info};

/// Document scaffolding that carries no structure of its own.
const SCAFFOLD_TAGS: &[&str] = &["html", "head", "body"];

/// Landmark tags shown in the outline.
pub const LANDMARK_TAGS: &[&str] = &["main", "nav", "header", "footer", "article", "aside"];

/// Maximum characters of outline text.
pub const OUTLINE_TEXT_CHARS: usize = 40;

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let config = self.config.unwrap_or_default();
        let weights = config.weight_table();
        Analyzer {
            rules: self.rules,
            config,
            weights,
        }
    }
}

/// The main analyzer that turns markup into a [`Report`].
///
/// An analyzer holds only immutable configuration, so one instance can serve
/// any number of (concurrent) `analyze` calls.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
    weights: WeightTable,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes a document and returns its report.
    ///
    /// Never fails: any input, including the empty string, yields a report.
    #[must_use]
    pub fn analyze(&self, markup: &str) -> Report {
        info!("Starting analysis of {} byte(s)", markup.len());

        let mut document = parse_with(markup, self.config.analyzer.parser);
        if self.config.analyzer.strip_hygiene {
            let tags: Vec<&str> = self
                .config
                .analyzer
                .hygiene_tags
                .iter()
                .map(String::as_str)
                .collect();
            let removed = document.strip_elements(&tags);
            debug!("Hygiene pass removed {removed} subtree(s)");
        }

        self.analyze_document(&document)
    }

    /// Analyzes an already parsed document.
    ///
    /// A document without elements (the lenient builder's implied
    /// `html`/`head`/`body` do not count) has no structure to audit and
    /// yields a clean report.
    #[must_use]
    pub fn analyze_document(&self, document: &Document) -> Report {
        let elements_analyzed = document.element_count();
        let has_structure = document.elements().any(|id| {
            document
                .tag_name(id)
                .is_some_and(|tag| !SCAFFOLD_TAGS.contains(&tag))
        });
        let findings = if !has_structure {
            debug!("No elements found, skipping rules");
            Vec::new()
        } else {
            self.run_rules(document)
        };

        let mut locator = Locator::new(document);
        let mut findings: Vec<Finding> = findings
            .into_iter()
            .map(|finding| resolve(finding, document, &mut locator))
            .collect();

        // Stable sort: equal severities keep rule evaluation order.
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));

        let outline = build_outline(document, &mut locator);
        let score = score(&findings, &self.weights);

        info!(
            "Analysis complete: score {score}, {} finding(s), {} outline entr(ies), {} parser",
            findings.len(),
            outline.len(),
            document.strategy()
        );

        Report {
            score,
            findings,
            outline,
            strategy: document.strategy(),
            has_line_info: document.has_line_info(),
            elements_analyzed,
        }
    }

    /// Runs every enabled rule in registration order.
    fn run_rules(&self, document: &Document) -> Vec<Finding> {
        let default_options = RuleConfig::default();
        let mut findings = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let options = self
                .config
                .rules
                .get(rule.name())
                .unwrap_or(&default_options);
            let ctx = RuleContext::new(document, options);
            let rule_findings = rule.check(&ctx);
            debug!("{} produced {} finding(s)", rule.name(), rule_findings.len());

            findings.extend(self.apply_severity_override(rule.name(), rule_findings));
        }

        findings
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, rule_name: &str, mut findings: Vec<Finding>) -> Vec<Finding> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for f in &mut findings {
                f.severity = severity;
            }
        }
        findings
    }
}

/// Fills in location, line and snippet for a finding.
fn resolve(mut finding: Finding, document: &Document, locator: &mut Locator<'_>) -> Finding {
    if let Some(node) = finding.node {
        finding.location = locator.locate(node);
        finding.line = document.line(node).filter(|_| document.has_line_info());
        finding.snippet = Some(snippet(document, node));
    }
    finding
}

/// Collects headings and landmarks in document order.
fn build_outline(document: &Document, locator: &mut Locator<'_>) -> Vec<OutlineEntry> {
    let nodes: Vec<NodeId> = document
        .elements()
        .filter(|&id| {
            document
                .tag_name(id)
                .is_some_and(|t| heading_level(t).is_some() || LANDMARK_TAGS.contains(&t))
        })
        .collect();

    nodes
        .into_iter()
        .filter_map(|id| {
            let tag = document.tag_name(id)?;
            Some(OutlineEntry {
                tag: tag.to_string(),
                text: truncate(&document.text_content(id), OUTLINE_TEXT_CHARS),
                depth: heading_level(tag).unwrap_or(0),
                location: locator.locate(id),
            })
        })
        .collect()
}
