//! Core types for findings and reports.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::dom::{NodeId, ParseStrategy};

/// Location label used for findings that do not point at a node.
pub const GLOBAL_LOCATION: &str = "Global";

/// Severity level for findings, ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor polish.
    Low,
    /// Should be addressed.
    Medium,
    /// Hurts accessibility or ranking noticeably.
    High,
    /// Breaks the document's navigable structure.
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Parses a severity name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Search-engine relevance signals.
    Seo,
    /// Document structure and semantics.
    Structure,
    /// Assistive-technology support.
    Accessibility,
    /// General markup quality.
    Quality,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seo => write!(f, "seo"),
            Self::Structure => write!(f, "structure"),
            Self::Accessibility => write!(f, "accessibility"),
            Self::Quality => write!(f, "quality"),
        }
    }
}

/// One detected issue.
///
/// Rules create findings with a referenced node; the analyzer fills in
/// `location` and `snippet` before the report is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule code (e.g., "SEM001").
    pub code: String,
    /// Rule name (e.g., "missing-h1").
    pub rule: String,
    /// Finding category.
    pub category: Category,
    /// Severity of this finding.
    pub severity: Severity,
    /// Short label.
    pub title: String,
    /// Why it matters.
    pub description: String,
    /// Actionable instruction.
    pub fix: String,
    /// Rule-specific qualifier used for weight lookup (e.g., the missing landmark tag).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Human-readable location ("Line 12", "div #3", or "Global").
    pub location: String,
    /// Reconstructed markup of the referenced node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Source line of the referenced node, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    /// Referenced node in the analyzed document.
    #[serde(skip)]
    pub node: Option<NodeId>,
}

impl Finding {
    /// Creates a new finding that does not reference a node.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        category: Category,
        severity: Severity,
        title: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            category,
            severity,
            title: title.into(),
            description: String::new(),
            fix: String::new(),
            subject: None,
            location: GLOBAL_LOCATION.to_string(),
            snippet: None,
            line: None,
            node: None,
        }
    }

    /// Sets the explanation of why the issue matters.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the fix instruction.
    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = fix.into();
        self
    }

    /// Points the finding at a node.
    #[must_use]
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Sets the weight-lookup subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} at {}\n", self.code, self.rule, self.location);
        let _ = writeln!(output, "  {}: {}", self.severity, self.title);
        if !self.description.is_empty() {
            let _ = writeln!(output, "  = why: {}", self.description);
        }
        if !self.fix.is_empty() {
            let _ = writeln!(output, "  = help: {}", self.fix);
        }
        if let Some(snippet) = &self.snippet {
            for line in snippet.lines() {
                let _ = writeln!(output, "  | {line}");
            }
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location, self.severity, self.code, self.title
        )
    }
}

/// One heading or landmark in the document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Tag name.
    pub tag: String,
    /// Truncated text content.
    pub text: String,
    /// Heading level for headings, 0 for landmarks.
    pub depth: u8,
    /// Location label.
    pub location: String,
}

/// Per-severity finding counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    /// Critical findings.
    pub critical: usize,
    /// High findings.
    pub high: usize,
    /// Medium findings.
    pub medium: usize,
    /// Low findings.
    pub low: usize,
}

impl SeverityCounts {
    /// Total number of findings.
    #[must_use]
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Health score in `[0, 100]`.
    pub score: u8,
    /// Findings, most severe first; ties keep discovery order.
    pub findings: Vec<Finding>,
    /// Headings and landmarks in document order.
    pub outline: Vec<OutlineEntry>,
    /// Which parser built the tree.
    pub strategy: ParseStrategy,
    /// Whether locations are source lines.
    pub has_line_info: bool,
    /// Number of element nodes analyzed.
    pub elements_analyzed: usize,
}

impl Report {
    /// Counts findings by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for finding in &self.findings {
            match finding.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }

    /// Returns findings with exactly the given severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Returns findings produced by the named rule.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule == rule).collect()
    }

    /// Checks if any finding meets or exceeds the given severity.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }

    /// Formats the whole report as plain text.
    #[must_use]
    pub fn format_text(&self) -> String {
        use std::fmt::Write;

        let mut output = String::new();
        for finding in &self.findings {
            let _ = writeln!(output, "{}", finding.format());
        }

        if !self.outline.is_empty() {
            let _ = writeln!(output, "Outline:");
            for entry in &self.outline {
                let indent = "  ".repeat(usize::from(entry.depth));
                let _ = writeln!(
                    output,
                    "  {indent}<{}> {} ({})",
                    entry.tag, entry.text, entry.location
                );
            }
            let _ = writeln!(output);
        }

        let counts = self.count_by_severity();
        let _ = writeln!(
            output,
            "Score {}/100: {} critical, {} high, {} medium, {} low ({} parser, {} elements)",
            self.score,
            counts.critical,
            counts.high,
            counts.medium,
            counts.low,
            self.strategy,
            self.elements_analyzed
        );
        output
    }
}

/// Byte offset and length of a 1-indexed line in `source`.
///
/// The length excludes the line terminator. Returns `None` past the last line.
#[must_use]
pub fn line_span(source: &str, line: u64) -> Option<(usize, usize)> {
    let index = usize::try_from(line.checked_sub(1)?).ok()?;
    let mut offset = 0;
    for (i, content) in source.split('\n').enumerate() {
        if i == index {
            let content = content.strip_suffix('\r').unwrap_or(content);
            return Some((offset, content.len()));
        }
        offset += content.len() + 1;
    }
    None
}

/// A finding rendered as a `miette` diagnostic over the analyzed source.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{code}] {title}")]
pub struct FindingDiagnostic {
    code: String,
    title: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label}")]
    span: Option<SourceSpan>,
    label: String,
}

impl FindingDiagnostic {
    /// Builds a diagnostic for `finding` over `source`, named `name`.
    ///
    /// The label spans the finding's source line when it is known.
    #[must_use]
    pub fn new(finding: &Finding, name: &str, source: &str) -> Self {
        let span = finding
            .line
            .and_then(|line| line_span(source, line))
            .map(SourceSpan::from);
        let help = (!finding.fix.is_empty()).then(|| finding.fix.clone());
        Self {
            code: finding.code.clone(),
            title: finding.title.clone(),
            help,
            source_code: NamedSource::new(name, source.to_string()),
            span,
            label: format!("{} ({})", finding.rule, finding.severity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(severity: Severity) -> Finding {
        Finding::new(
            "SEM001",
            "missing-h1",
            Category::Seo,
            severity,
            "Missing H1",
        )
        .with_fix("Add exactly one <h1>.")
    }

    fn make_report(findings: Vec<Finding>) -> Report {
        Report {
            score: 80,
            findings,
            outline: Vec::new(),
            strategy: ParseStrategy::Strict,
            has_line_info: true,
            elements_analyzed: 3,
        }
    }

    #[test]
    fn severity_orders_critical_highest() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn severity_from_name_is_case_insensitive() {
        assert_eq!(Severity::from_name("HIGH"), Some(Severity::High));
        assert_eq!(Severity::from_name("nope"), None);
    }

    #[test]
    fn new_finding_is_global() {
        let f = make_finding(Severity::Critical);
        assert_eq!(f.location, GLOBAL_LOCATION);
        assert!(f.node.is_none());
        assert!(f.snippet.is_none());
    }

    #[test]
    fn format_includes_help_and_snippet() {
        let mut f = make_finding(Severity::High);
        f.snippet = Some("<img src=\"a.png\">".to_string());
        let text = f.format();
        assert!(text.contains("= help: Add exactly one <h1>."));
        assert!(text.contains("| <img src=\"a.png\">"));
    }

    #[test]
    fn counts_and_thresholds() {
        let report = make_report(vec![
            make_finding(Severity::Critical),
            make_finding(Severity::Low),
            make_finding(Severity::Low),
        ]);
        let counts = report.count_by_severity();
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.low, 2);
        assert_eq!(counts.total(), 3);
        assert!(report.has_findings_at(Severity::High));

        let mild = make_report(vec![make_finding(Severity::Medium)]);
        assert!(!mild.has_findings_at(Severity::High));
    }

    #[test]
    fn format_text_has_summary_line() {
        let report = make_report(vec![make_finding(Severity::Critical)]);
        let text = report.format_text();
        assert!(text.contains("Score 80/100: 1 critical, 0 high, 0 medium, 0 low"));
    }

    #[test]
    fn line_span_finds_offsets() {
        let source = "line1\r\nline2\nline3";
        assert_eq!(line_span(source, 1), Some((0, 5)));
        assert_eq!(line_span(source, 2), Some((7, 5)));
        assert_eq!(line_span(source, 3), Some((13, 5)));
        assert_eq!(line_span(source, 4), None);
        assert_eq!(line_span(source, 0), None);
    }

    #[test]
    fn diagnostic_spans_finding_line() {
        let mut f = make_finding(Severity::High);
        f.line = Some(2);
        let diagnostic = FindingDiagnostic::new(&f, "page.html", "<html>\n<img>\n</html>");
        assert_eq!(diagnostic.span, Some(SourceSpan::from((7, 5))));
        assert_eq!(diagnostic.to_string(), "[SEM001] Missing H1");
    }
}
