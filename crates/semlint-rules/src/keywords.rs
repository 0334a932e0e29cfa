//! Keyword tables for inferring intent from `class`/`id` values.

/// Implied landmark tags with the keywords that suggest them.
///
/// Order matters: the first entry whose keywords match wins.
pub const IMPLIED_LANDMARKS: &[(&str, &[&str])] = &[
    ("nav", &["nav", "menu", "navigation"]),
    ("header", &["header", "banner", "top-bar"]),
    ("footer", &["footer", "bottom", "copyright"]),
    ("article", &["post", "article", "content-body", "entry"]),
    ("aside", &["sidebar", "widget", "related"]),
];

/// Class segments that mark an element as a button.
pub const BUTTON_TOKENS: &[&str] = &["btn", "button"];

/// Returns the landmark implied by lower-cased `class`/`id` text.
///
/// Keywords match as substrings, so `main-nav` implies `nav`.
#[must_use]
pub fn implied_landmark(class_and_id: &str) -> Option<&'static str> {
    if class_and_id.is_empty() {
        return None;
    }
    IMPLIED_LANDMARKS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| class_and_id.contains(k)))
        .map(|(tag, _)| *tag)
}

/// Returns true if a class list carries a button-like token.
///
/// Each class is split on `-` and `_`, so `btn-primary` and `cta_button`
/// match while `btnx` does not.
#[must_use]
pub fn has_button_token(class: &str) -> bool {
    class
        .split_whitespace()
        .flat_map(|token| token.split(['-', '_']))
        .any(|segment| {
            BUTTON_TOKENS
                .iter()
                .any(|b| segment.eq_ignore_ascii_case(b))
        })
}
