//! Compiled regex patterns used across the extraction pipeline.
//!
//! All patterns are compiled once on first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Visibility
// =============================================================================

/// Inline styles that remove an element's box from layout.
pub static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*(?:display\s*:\s*none|visibility\s*:\s*hidden)\b")
        .expect("HIDDEN_STYLE regex")
});

// =============================================================================
// Declarative shadow DOM
// =============================================================================

/// Opening `<template` tags (any attributes).
///
/// html5ever moves `<template>` contents out of the tree, which would hide
/// declarative shadow roots from selectors. Templates are renamed to an
/// ordinary element before parsing so their contents stay addressable.
pub static TEMPLATE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<template\b").expect("TEMPLATE_OPEN regex"));

/// Closing `</template>` tags.
pub static TEMPLATE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</template\s*>").expect("TEMPLATE_CLOSE regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_style_matches_display_none() {
        assert!(HIDDEN_STYLE.is_match("display:none"));
        assert!(HIDDEN_STYLE.is_match("color: red; display : none"));
        assert!(HIDDEN_STYLE.is_match("visibility: hidden;"));
        assert!(!HIDDEN_STYLE.is_match("display: block"));
        assert!(!HIDDEN_STYLE.is_match("visibility: visible"));
    }

    #[test]
    fn template_patterns_are_case_insensitive() {
        assert!(TEMPLATE_OPEN.is_match("<TEMPLATE shadowrootmode=\"open\">"));
        assert!(TEMPLATE_CLOSE.is_match("</Template >"));
        assert!(!TEMPLATE_OPEN.is_match("<templates>"));
    }
}
