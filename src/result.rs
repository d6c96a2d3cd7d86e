//! Result types for extraction and retrieval output.

use serde::{Deserialize, Serialize};
use url::Url;

/// Local extraction strategy that produced a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Own-text density scoring.
    Heuristic,
    /// Schema.org / microdata / meta / JSON-LD.
    Structured,
    /// Union of paragraph-like elements.
    Paragraphs,
    /// Paragraphs inside shadow roots.
    ShadowDom,
}

/// Retrieval step in the escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Out-of-band fetch of the page's own URL.
    RawFetch,
    /// Local chain against the settled live page.
    LiveDom,
    /// Legal path segment replaced by a guessed content path.
    UrlSubstitution,
    /// Result link found through a search engine.
    SearchReferral,
    /// Snapshot from a web archive.
    Archive,
}

/// Accepted article text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Quality-gated text, handed to the summarizer as-is.
    pub text: String,

    /// Retrieval step that found it.
    pub step: Step,

    /// Local strategy that produced it.
    pub strategy: Strategy,

    /// Document the text was extracted from.
    pub url: Url,
}

/// Final answer of an extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Text passed the quality gate.
    Extracted(Article),

    /// The page is a legal / consent page and every bypass failed.
    BlockedByLegalPage,

    /// No strategy produced acceptable text.
    NotFound,
}

impl Outcome {
    /// Extracted text, or an empty string.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Extracted(article) => &article.text,
            Self::BlockedByLegalPage | Self::NotFound => "",
        }
    }

    /// Whether a legal / consent page blocked extraction.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::BlockedByLegalPage)
    }

    /// The accepted article, if any.
    #[must_use]
    pub fn article(&self) -> Option<&Article> {
        match self {
            Self::Extracted(article) => Some(article),
            Self::BlockedByLegalPage | Self::NotFound => None,
        }
    }
}

/// One retrieval step as it was tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Which step.
    pub step: Step,

    /// Document fetched or snapshotted for this step, when known.
    pub url: Option<Url>,

    /// Length in characters of the best candidate the step produced.
    pub candidate_len: usize,

    /// Whether the candidate passed the quality gate.
    pub accepted: bool,

    /// Swallowed failure (network, snapshot), if any.
    pub error: Option<String>,
}

impl Attempt {
    pub(crate) fn new(step: Step, url: Option<Url>) -> Self {
        Self {
            step,
            url,
            candidate_len: 0,
            accepted: false,
            error: None,
        }
    }

    pub(crate) fn failed(step: Step, url: Option<Url>, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(step, url)
        }
    }
}

/// Outcome plus the ordered log of every step tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Final answer.
    pub outcome: Outcome,

    /// Steps in the order they ran.
    pub attempts: Vec<Attempt>,
}

impl Report {
    /// Whether any attempt ran the given step.
    #[must_use]
    pub fn tried(&self, step: Step) -> bool {
        self.attempts.iter().any(|a| a.step == step)
    }

    /// Steps in the order they ran.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.attempts.iter().map(|a| a.step).collect()
    }
}
