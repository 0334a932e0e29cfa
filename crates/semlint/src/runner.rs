//! Builds analyzers from configuration.

use semlint_core::{Analyzer, Config, Report};
use semlint_rules::Preset;
use tracing::warn;

/// Preset used when the configuration names none.
pub const DEFAULT_PRESET: Preset = Preset::Recommended;

/// Errors resolving a configuration into an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// The configured preset does not exist.
    #[error("unknown preset `{0}`. Valid presets: recommended, strict, minimal")]
    UnknownPreset(String),
}

/// Resolves the effective preset from config > default.
///
/// # Errors
///
/// Returns [`RunError::UnknownPreset`] for an unrecognized name.
pub fn resolve_preset(config: &Config) -> Result<Preset, RunError> {
    match config.preset.as_deref() {
        None => Ok(DEFAULT_PRESET),
        Some(name) => {
            Preset::from_name(name).ok_or_else(|| RunError::UnknownPreset(name.to_string()))
        }
    }
}

/// Builds an analyzer running the given preset under `config`.
#[must_use]
pub fn analyzer_with(preset: Preset, config: &Config) -> Analyzer {
    Analyzer::builder()
        .rules(preset.rules())
        .config(config.clone())
        .build()
}

/// Builds an analyzer for the configured preset.
///
/// # Errors
///
/// Returns an error if the configured preset is unknown.
pub fn analyzer_for(config: &Config) -> Result<Analyzer, RunError> {
    resolve_preset(config).map(|preset| analyzer_with(preset, config))
}

/// Analyzes markup with the configured preset.
///
/// An unknown preset name falls back to the default preset with a warning,
/// so this never fails.
#[must_use]
pub fn analyze(markup: &str, config: &Config) -> Report {
    let preset = resolve_preset(config).unwrap_or_else(|e| {
        warn!("{e}; using the recommended preset");
        DEFAULT_PRESET
    });
    analyzer_with(preset, config).analyze(markup)
}
