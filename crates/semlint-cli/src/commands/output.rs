//! Shared output formatting for audit reports.

use std::fmt::Write as _;

use anyhow::Result;
use semlint::{FindingDiagnostic, Report, Severity};
use serde::Serialize;

use super::check::Audit;
use crate::OutputFormat;

const RESET: &str = "\x1b[0m";

/// Print audit reports in the specified format.
pub fn print(audits: &[Audit], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(audits)),
        OutputFormat::Json => return print_json(audits),
        OutputFormat::Compact => print!("{}", render_compact(audits)),
        OutputFormat::Pretty => print_pretty(audits),
    }
    Ok(())
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[1;31m",
        Severity::High => "\x1b[31m",
        Severity::Medium => "\x1b[33m",
        Severity::Low => "\x1b[34m",
    }
}

fn score_color(score: u8) -> &'static str {
    match score {
        90..=100 => "\x1b[32m",
        50..=89 => "\x1b[33m",
        _ => "\x1b[31m",
    }
}

fn summary_line(report: &Report) -> String {
    let counts = report.count_by_severity();
    format!(
        "{}Score {}/100{RESET}: {} critical, {} high, {} medium, {} low ({} parser, {} elements)",
        score_color(report.score),
        report.score,
        counts.critical,
        counts.high,
        counts.medium,
        counts.low,
        report.strategy,
        report.elements_analyzed,
    )
}

fn render_text(audits: &[Audit]) -> String {
    let mut out = String::new();

    for audit in audits {
        let report = &audit.report;
        let _ = writeln!(out, "\x1b[1m{}{RESET}\n", audit.name);

        for finding in &report.findings {
            let _ = writeln!(
                out,
                "{} {} at {}",
                finding.code, finding.rule, finding.location
            );
            let _ = writeln!(
                out,
                "  {}{}{RESET}: {}",
                severity_color(finding.severity),
                finding.severity,
                finding.title
            );
            if !finding.description.is_empty() {
                let _ = writeln!(out, "  = why: {}", finding.description);
            }
            if !finding.fix.is_empty() {
                let _ = writeln!(out, "  = help: {}", finding.fix);
            }
            if let Some(snippet) = &finding.snippet {
                for line in snippet.lines() {
                    let _ = writeln!(out, "  | {line}");
                }
            }
            out.push('\n');
        }

        if !report.outline.is_empty() {
            out.push_str("Outline:\n");
            for entry in &report.outline {
                let indent = "  ".repeat(usize::from(entry.depth));
                let _ = writeln!(
                    out,
                    "  {indent}<{}> {} ({})",
                    entry.tag, entry.text, entry.location
                );
            }
            out.push('\n');
        }

        let _ = writeln!(out, "{}\n", summary_line(report));
    }

    if audits.len() > 1 {
        let total: usize = audits.iter().map(|a| a.report.findings.len()).sum();
        let _ = writeln!(
            out,
            "Found {total} finding(s) in {} document(s)",
            audits.len()
        );
    }

    out
}

fn render_compact(audits: &[Audit]) -> String {
    let mut out = String::new();
    for audit in audits {
        for finding in &audit.report.findings {
            let _ = writeln!(out, "{}: {finding}", audit.name);
        }
        let _ = writeln!(out, "{}: score {}", audit.name, audit.report.score);
    }
    out
}

#[derive(Serialize)]
struct JsonAudit<'a> {
    target: &'a str,
    #[serde(flatten)]
    report: &'a Report,
}

fn print_json(audits: &[Audit]) -> Result<()> {
    let entries: Vec<JsonAudit<'_>> = audits
        .iter()
        .map(|audit| JsonAudit {
            target: &audit.name,
            report: &audit.report,
        })
        .collect();
    let json = serde_json::to_string_pretty(&entries)?;
    println!("{json}");
    Ok(())
}

fn print_pretty(audits: &[Audit]) {
    for audit in audits {
        for finding in &audit.report.findings {
            let diagnostic = FindingDiagnostic::new(finding, &audit.name, &audit.source);
            println!("{:?}", miette::Report::new(diagnostic));
        }
        println!("{}: {}\n", audit.name, summary_line(&audit.report));
    }
}
