//! Configuration options for extraction and retrieval.
//!
//! The `Options` struct controls the quality gate threshold, the wait and
//! fetch timeouts, the request identity used for out-of-band fetches, and
//! the endpoints of the bypass strategies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;

/// Desktop browser identity sent with every out-of-band fetch.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// What the escalator does when the settled live page is a legal / consent page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalPagePolicy {
    /// Go straight to the bypass chain, even if the live DOM holds an article.
    #[default]
    Bypass,

    /// Run the local extraction chain on the live DOM first and only bypass
    /// when it finds nothing.
    ExtractFirst,
}

/// Configuration options for extraction and retrieval.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rs_article_extract::{LegalPagePolicy, Options};
///
/// let options = Options {
///     wait_timeout: Duration::from_secs(5),
///     legal_page_policy: LegalPagePolicy::ExtractFirst,
///     ..Options::default()
/// };
/// assert_eq!(options.min_length, 250);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Candidate texts must be strictly longer than this (characters).
    ///
    /// Default: `250`
    pub min_length: usize,

    /// Hard upper bound on waiting for the live page to settle.
    ///
    /// Default: 20 seconds
    pub wait_timeout: Duration,

    /// Per-request timeout for out-of-band fetches.
    ///
    /// Default: 15 seconds
    pub fetch_timeout: Duration,

    /// `User-Agent` header for out-of-band fetches.
    ///
    /// Default: [`DESKTOP_USER_AGENT`]
    pub user_agent: String,

    /// `Referer` header for fetches that present as a search click-through.
    ///
    /// Default: `"https://www.google.com/"`
    pub referrer: String,

    /// Paths tried in place of a legal path segment, in order.
    ///
    /// Default: `["/news", "/story", "/health", "/article", "/content"]`
    pub bypass_paths: Vec<String>,

    /// Search engine queried for `<url> news`.
    ///
    /// Default: `"https://www.google.com/search"`
    pub search_endpoint: String,

    /// Path segments a search result link must contain (any of).
    ///
    /// Default: `["/news", "/story"]`
    pub search_result_paths: Vec<String>,

    /// Web archive availability API, queried with `?url=<page url>`.
    ///
    /// Default: `"https://archive.org/wayback/available"`
    pub archive_endpoint: String,

    /// Run the bypass chain on legal pages at all.
    ///
    /// Default: `true`
    pub enable_bypass: bool,

    /// Precedence between legal-page routing and live-DOM extraction.
    ///
    /// Default: [`LegalPagePolicy::Bypass`]
    pub legal_page_policy: LegalPagePolicy,

    /// Privacy-notice and legal-page keyword configuration.
    pub classifier: Classifier,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_length: 250,
            wait_timeout: Duration::from_secs(20),
            fetch_timeout: Duration::from_secs(15),
            user_agent: DESKTOP_USER_AGENT.to_string(),
            referrer: "https://www.google.com/".to_string(),
            bypass_paths: ["/news", "/story", "/health", "/article", "/content"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            search_endpoint: "https://www.google.com/search".to_string(),
            search_result_paths: vec!["/news".to_string(), "/story".to_string()],
            archive_endpoint: "https://archive.org/wayback/available".to_string(),
            enable_bypass: true,
            legal_page_policy: LegalPagePolicy::Bypass,
            classifier: Classifier::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.min_length, 250);
        assert_eq!(opts.wait_timeout, Duration::from_secs(20));
        assert_eq!(opts.fetch_timeout, Duration::from_secs(15));
        assert!(opts.user_agent.contains("Chrome/120"));
        assert_eq!(opts.referrer, "https://www.google.com/");
        assert_eq!(
            opts.bypass_paths,
            vec!["/news", "/story", "/health", "/article", "/content"]
        );
        assert_eq!(opts.search_result_paths, vec!["/news", "/story"]);
        assert!(opts.enable_bypass);
        assert_eq!(opts.legal_page_policy, LegalPagePolicy::Bypass);
        assert_eq!(opts.classifier, Classifier::default());
    }

    #[test]
    fn test_custom_options() {
        let opts = Options {
            min_length: 100,
            enable_bypass: false,
            legal_page_policy: LegalPagePolicy::ExtractFirst,
            ..Options::default()
        };

        assert_eq!(opts.min_length, 100);
        assert!(!opts.enable_bypass);
        assert_eq!(opts.legal_page_policy, LegalPagePolicy::ExtractFirst);
    }

    #[test]
    fn test_legal_page_policy_serde_names() {
        let json = serde_json::to_string(&LegalPagePolicy::ExtractFirst).unwrap();
        assert_eq!(json, "\"extract_first\"");
        let policy: LegalPagePolicy = serde_json::from_str("\"bypass\"").unwrap();
        assert_eq!(policy, LegalPagePolicy::Bypass);
    }
}
