//! Integration test: custom rules end-to-end via Analyzer.
//!
//! Exercises the public core API the way a downstream crate would: a rule
//! defined outside this crate, configured purely through TOML.

use semlint_core::{
    Analyzer, Category, Config, Finding, ParseStrategy, Rule, RuleContext, Severity,
};

/// Flags every `<marquee>`, up to the `max` option.
struct NoMarquee;

impl Rule for NoMarquee {
    fn name(&self) -> &'static str {
        "no-marquee"
    }

    fn code(&self) -> &'static str {
        "SEM100"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let max = ctx.options.get_usize("max", usize::MAX);
        ctx.document
            .elements_named(&["marquee"])
            .take(max)
            .map(|id| {
                Finding::new(
                    self.code(),
                    self.name(),
                    self.category(),
                    self.default_severity(),
                    "Marquee",
                )
                .with_fix("Use CSS animation sparingly.")
                .with_node(id)
            })
            .collect()
    }
}

/// Reports a missing `<title>` once per document.
struct NeedsTitle;

impl Rule for NeedsTitle {
    fn name(&self) -> &'static str {
        "needs-title"
    }

    fn code(&self) -> &'static str {
        "SEM101"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if ctx.document.find_first("title").is_some() {
            return Vec::new();
        }
        vec![Finding::new(
            self.code(),
            self.name(),
            Category::Seo,
            Severity::High,
            "Missing title",
        )]
    }
}

const PAGE: &str = "<body>
<marquee>Hello</marquee>
<aside>
  <marquee>Ad</marquee>
</aside>
</body>";

fn analyzer(toml: &str) -> Analyzer {
    let config = Config::parse(toml).expect("fixture config should parse");
    Analyzer::builder()
        .rule(NoMarquee)
        .rule(NeedsTitle)
        .config(config)
        .build()
}

// ── Defaults ──

#[test]
fn custom_rules_run_in_order_and_sort_by_severity() {
    let report = analyzer("").analyze(PAGE);

    let codes: Vec<&str> = report.findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec!["SEM101", "SEM100", "SEM100"]);
    assert_eq!(report.strategy, ParseStrategy::Strict);

    let first = &report.findings[1];
    assert_eq!(first.location, "Line 2");
    assert_eq!(first.line, Some(2));
    assert_eq!(first.snippet.as_deref(), Some("<marquee>\n  Hello\n</marquee>"));
    assert_eq!(report.findings[2].location, "Line 4");

    // 8 (high fallback) + 2 * 5 (medium fallback)
    assert_eq!(report.score, 82);
}

#[test]
fn outline_lists_landmarks() {
    let report = analyzer("").analyze(PAGE);
    assert_eq!(report.outline.len(), 1);
    assert_eq!(report.outline[0].tag, "aside");
    assert_eq!(report.outline[0].location, "Line 3");
    assert_eq!(report.outline[0].text, "Ad");
}

// ── Configuration ──

#[test]
fn rule_options_reach_the_rule() {
    let report = analyzer("[rules.no-marquee]\nmax = 1\n").analyze(PAGE);
    assert_eq!(report.by_rule("no-marquee").len(), 1);
}

#[test]
fn severity_override_and_weights() {
    let report = analyzer(
        r#"
[rules.no-marquee]
severity = "critical"

[rules.needs-title]
enabled = false

[scoring.weights]
no-marquee = 30
"#,
    )
    .analyze(PAGE);

    assert!(report.by_rule("needs-title").is_empty());
    assert!(report
        .findings
        .iter()
        .all(|f| f.severity == Severity::Critical));
    assert_eq!(report.score, 40);
}

#[test]
fn hygiene_tags_are_configurable() {
    let stripped = analyzer("[analyzer]\nhygiene_tags = [\"aside\"]\n").analyze(PAGE);
    assert_eq!(stripped.by_rule("no-marquee").len(), 1);
    assert!(stripped.outline.is_empty());

    let kept = analyzer("[analyzer]\nstrip_hygiene = false\nhygiene_tags = [\"aside\"]\n")
        .analyze(PAGE);
    assert_eq!(kept.by_rule("no-marquee").len(), 2);
}

#[test]
fn lenient_parser_uses_ordinals() {
    let report = analyzer("[analyzer]\nparser = \"lenient\"\n").analyze(PAGE);
    assert_eq!(report.strategy, ParseStrategy::Lenient);
    assert!(!report.has_line_info);

    let marquees: Vec<&str> = report
        .by_rule("no-marquee")
        .iter()
        .map(|f| f.location.as_str())
        .collect();
    assert_eq!(marquees, vec!["marquee #1", "marquee #2"]);
    assert!(report.findings.iter().all(|f| f.line.is_none()));
    assert_eq!(report.outline[0].location, "aside #1");
}

// ── Degenerate input ──

#[test]
fn text_only_input_runs_no_rules() {
    for markup in ["", "plain words", "<!-- only a comment -->"] {
        let report = analyzer("").analyze(markup);
        assert!(report.findings.is_empty(), "{markup:?}");
        assert_eq!(report.score, 100);
    }
}

#[test]
fn analyzer_is_reusable() {
    let analyzer = analyzer("");
    let first = analyzer.analyze(PAGE);
    let _ = analyzer.analyze("<marquee>other</marquee>");
    assert_eq!(analyzer.analyze(PAGE), first);
}
