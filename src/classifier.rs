//! Privacy / legal classification.
//!
//! Two checks with different scopes:
//!
//! - [`Classifier::is_privacy_notice`] decides whether a single candidate text is
//!   a privacy or cookie notice. It gates acceptance, so it is tuned for recall:
//!   any keyword hit classifies the text.
//! - [`Classifier::is_legal_page`] decides whether the whole page is a terms,
//!   policy or consent page, which routes the escalator to the bypass chain.
//!
//! Keywords live in [`KeywordSet`]s (keyword → weight, plus a threshold) that
//! can be loaded from JSON, so tuning never touches control flow.

use std::collections::BTreeMap;
use std::fmt;

use dom_query::Document;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom;
use crate::error::{Error, Result};
use crate::selector::legal::{CONSENT_CONTAINERS, LEGAL_META};

const PRIVACY_KEYWORDS: &[&str] = &[
    "privacy",
    "cookies",
    "data collection",
    "advertising",
    "opt-out",
    "personal information",
    "tracking technologies",
    "third parties",
];

const LEGAL_KEYWORDS: &[&str] = &[
    "terms of service",
    "usage policy",
    "user agreement",
    "privacy",
    "data collection",
    "cookies",
    "advertising",
    "opt-out",
];

const LEGAL_PATH_SEGMENTS: &[&str] = &["/terms", "/policy", "/privacy"];

fn default_threshold() -> f64 {
    1.0
}

/// Weighted keyword list.
///
/// A text matches when the summed weight of the keywords it contains
/// (case-insensitive substring match) reaches `threshold`. Weights are
/// non-negative, so adding text to a matching text never un-matches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    /// Keyword → weight. Keywords are matched lowercase.
    pub keywords: BTreeMap<String, f64>,

    /// Minimum summed weight for a match.
    ///
    /// Default: `1.0`
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl KeywordSet {
    /// Every keyword weighted 1.0 with threshold 1.0: any single hit matches.
    #[must_use]
    pub fn any_of(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (k.to_lowercase(), 1.0)).collect(),
            threshold: default_threshold(),
        }
    }

    /// Summed weight of the keywords contained in an already-lowercased text.
    #[must_use]
    pub fn score_lowercase(&self, lower: &str) -> f64 {
        self.keywords
            .iter()
            .filter(|(keyword, _)| lower.contains(keyword.to_lowercase().as_str()))
            .map(|(_, weight)| *weight)
            .sum()
    }

    /// Whether an already-lowercased text reaches the threshold.
    #[must_use]
    pub fn matches_lowercase(&self, lower: &str) -> bool {
        self.score_lowercase(lower) >= self.threshold
    }

    /// Whether the text reaches the threshold.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.matches_lowercase(&text.to_lowercase())
    }

    /// First keyword (in key order) found in the text, for diagnostics.
    #[must_use]
    pub fn first_hit(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.keywords
            .keys()
            .find(|keyword| lower.contains(keyword.to_lowercase().as_str()))
            .map(String::as_str)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(Error::Config(format!(
                "{name}: threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        if let Some((keyword, weight)) = self
            .keywords
            .iter()
            .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
        {
            return Err(Error::Config(format!(
                "{name}: weight for {keyword:?} must be non-negative, got {weight}"
            )));
        }
        if self.keywords.keys().any(|k| k.trim().is_empty()) {
            return Err(Error::Config(format!("{name}: empty keyword")));
        }
        Ok(())
    }
}

/// Why a page was classified as a legal / consent page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegalSignal {
    /// The URL path contains a legal segment.
    UrlPath(String),
    /// The document carries a consent / ToS marker element.
    Marker,
    /// The rendered page text contains a legal keyword.
    Keyword(String),
}

impl fmt::Display for LegalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UrlPath(segment) => write!(f, "url path contains {segment}"),
            Self::Marker => f.write_str("consent marker element"),
            Self::Keyword(keyword) => write!(f, "page text contains {keyword:?}"),
        }
    }
}

/// Privacy-notice and legal-page classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    /// Keywords marking a text as a privacy notice.
    pub privacy: KeywordSet,

    /// Keywords marking a page as a legal / consent page.
    pub legal: KeywordSet,

    /// URL path segments marking a legal page.
    ///
    /// Default: `["/terms", "/policy", "/privacy"]`
    pub legal_path_segments: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            privacy: KeywordSet::any_of(PRIVACY_KEYWORDS),
            legal: KeywordSet::any_of(LEGAL_KEYWORDS),
            legal_path_segments: LEGAL_PATH_SEGMENTS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Classifier {
    /// Load a classifier from JSON and validate it.
    ///
    /// ```rust
    /// use rs_article_extract::Classifier;
    ///
    /// let json = r#"{
    ///     "privacy": {"keywords": {"cookies": 1.0}},
    ///     "legal": {"keywords": {"terms of service": 1.0}},
    ///     "legal_path_segments": ["/terms"]
    /// }"#;
    /// let classifier = Classifier::from_json(json)?;
    /// assert!(classifier.is_privacy_notice("We use COOKIES."));
    /// # Ok::<(), rs_article_extract::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let classifier: Self = serde_json::from_str(json)?;
        classifier.validate()?;
        Ok(classifier)
    }

    /// Reject thresholds and weights that would break monotonic matching.
    pub fn validate(&self) -> Result<()> {
        self.privacy.validate("privacy")?;
        self.legal.validate("legal")
    }

    /// Whether the text is a privacy / cookie notice rather than article text.
    #[must_use]
    pub fn is_privacy_notice(&self, text: &str) -> bool {
        self.privacy.matches(text)
    }

    /// Whether the URL path contains a legal segment.
    #[must_use]
    pub fn legal_path_segment(&self, url: &Url) -> Option<&str> {
        let path = url.path().to_lowercase();
        self.legal_path_segments
            .iter()
            .find(|segment| path.contains(segment.to_lowercase().as_str()))
            .map(String::as_str)
    }

    /// Whether the page as a whole is a legal / consent page.
    #[must_use]
    pub fn is_legal_page(&self, doc: &Document, url: &Url) -> bool {
        self.legal_signal(doc, url).is_some()
    }

    /// The first legal-page indicator found, cheapest checks first.
    #[must_use]
    pub fn legal_signal(&self, doc: &Document, url: &Url) -> Option<LegalSignal> {
        if let Some(segment) = self.legal_path_segment(url) {
            return Some(LegalSignal::UrlPath(segment.to_string()));
        }
        if doc.select(LEGAL_META).exists() || doc.select(CONSENT_CONTAINERS).exists() {
            return Some(LegalSignal::Marker);
        }
        let body_text = body_text(doc);
        if self.legal.matches(&body_text) {
            let keyword = self.legal.first_hit(&body_text).unwrap_or_default();
            return Some(LegalSignal::Keyword(keyword.to_string()));
        }
        None
    }
}

/// Rendered text of the document body.
#[must_use]
pub fn body_text(doc: &Document) -> String {
    dom::selection_text(&doc.select("body"))
}
