//! semlint CLI tool.
//!
//! Usage:
//! ```bash
//! semlint check [OPTIONS] [TARGET]...
//! semlint list-rules
//! semlint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod loader;

/// Semantic structure auditor for HTML documents
#[derive(Parser)]
#[command(name = "semlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SEMLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit HTML files, directories, URLs or stdin (`-`)
    Check {
        /// Targets to audit (default: current directory)
        #[arg(default_value = ".")]
        targets: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns for directory walks (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Fail when a document scores below this value
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        fail_under: Option<u8>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for audit reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
    /// Source-annotated diagnostics.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            targets,
            format,
            rules,
            exclude,
            fail_under,
        } => {
            let source = config_resolver::resolve(
                std::path::Path::new("."),
                cli.config.as_deref(),
            );
            let options = commands::check::CheckOptions {
                targets,
                format,
                rules,
                exclude,
                fail_under,
            };
            commands::check::run(&options, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
