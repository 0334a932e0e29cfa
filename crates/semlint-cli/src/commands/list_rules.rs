//! List rules command implementation.

use semlint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<8} {:<22} {:<15} {:<9} Description",
        "Code", "Name", "Category", "Severity"
    );
    println!("{}", "-".repeat(96));

    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {:<15} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.category().to_string(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for (name, preset) in [
        ("recommended", Preset::Recommended),
        ("strict", Preset::Strict),
        ("minimal", Preset::Minimal),
    ] {
        let codes: Vec<&str> = preset.rules().iter().map(|r| r.code()).collect();
        let suffix = if preset == Preset::Recommended {
            " (default)"
        } else {
            ""
        };
        println!("  {name:<12} - {}{suffix}", codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  semlint check --rules missing-h1,missing-alt");
    println!("  semlint check --rules SEM001,SEM002,SEM003");
}
