//! Rule presets for common configurations.

use crate::{
    AnchorAsButton, FakeButton, GenericLandmark, GenericMainContent, HeadingHierarchy,
    MissingAlt, MissingH1, MissingLandmark,
};
use semlint_core::RuleBox;

/// Preset configurations for semlint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Every rule, with a lower content-density threshold.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Parses a preset name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `missing-h1` (SEM001) - Requires exactly one `<h1>`
/// - `heading-hierarchy` (SEM002) - Forbids skipped heading levels
/// - `missing-landmark` (SEM003) - Requires `<main>` and friends
/// - `generic-landmark` (SEM004) - Flags `<div>` landmarks
/// - `generic-main-content` (SEM005) - Flags a generic primary content block
/// - `anchor-as-button` (SEM006) - Flags non-navigating anchors
/// - `missing-alt` (SEM007) - Requires image alt text
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MissingH1::new()),
        Box::new(HeadingHierarchy::new()),
        Box::new(MissingLandmark::new()),
        Box::new(GenericLandmark::new()),
        Box::new(GenericMainContent::new()),
        Box::new(AnchorAsButton::new()),
        Box::new(MissingAlt::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus:
/// - Stricter `generic-main-content` (300 characters)
/// - `fake-button` (SEM008) - Flags styled `<div>` buttons
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MissingH1::new()),
        Box::new(HeadingHierarchy::new()),
        Box::new(MissingLandmark::new()),
        Box::new(GenericLandmark::new()),
        Box::new(GenericMainContent::new().min_text_length(300)),
        Box::new(AnchorAsButton::new()),
        Box::new(MissingAlt::new()),
        Box::new(FakeButton::new()),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `missing-h1`
/// - `missing-landmark`
/// - `missing-alt`
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MissingH1::new()),
        Box::new(MissingLandmark::new()),
        Box::new(MissingAlt::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MissingH1::new()),
        Box::new(HeadingHierarchy::new()),
        Box::new(MissingLandmark::new()),
        Box::new(GenericLandmark::new()),
        Box::new(GenericMainContent::new()),
        Box::new(AnchorAsButton::new()),
        Box::new(MissingAlt::new()),
        Box::new(FakeButton::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.code()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 7);
        assert_eq!(Preset::Strict.rules().len(), 8);
        assert_eq!(
            codes(&Preset::Minimal.rules()),
            vec!["SEM001", "SEM003", "SEM007"]
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Preset::from_name("Strict"), Some(Preset::Strict));
        assert_eq!(Preset::from_name("minimal"), Some(Preset::Minimal));
        assert_eq!(Preset::from_name("lax"), None);
    }

    #[test]
    fn test_all_rules_are_unique_and_ordered() {
        let all = codes(&all_rules());
        let mut sorted = all.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(all, sorted);
    }
}
