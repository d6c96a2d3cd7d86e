//! Local extraction chain.
//!
//! Every strategy takes the document explicitly, so the same code runs against
//! a live-page snapshot or a freshly fetched page.
//!
//! # Module Structure
//!
//! - `heuristic`: own-text density scoring (runs the noise filter first)
//! - `structured`: schema.org / microdata / meta description / JSON-LD
//! - `paragraphs`: union of paragraph-like elements
//! - `shadow`: paragraphs inside declarative shadow roots, one nested level
//! - `pipeline`: the ordered chain with the quality gate applied after each step
//!
//! # Usage
//!
//! ```rust
//! use rs_article_extract::{extractor, Options, Strategy};
//!
//! let body = "Council members voted on the new transit plan after hours of debate. ".repeat(6);
//! let html = format!("<html><body><div>{body}</div></body></html>");
//! let extracted = extractor::extract_from_html(&html, &Options::default());
//! assert_eq!(extracted.map(|e| e.strategy), Some(Strategy::Heuristic));
//! ```

pub mod heuristic;
pub mod paragraphs;
pub mod pipeline;
pub mod shadow;
pub mod structured;

pub use pipeline::{extract_from_document, extract_from_html, run_chain, Candidate, ChainOutcome, Extracted};

use crate::classifier::Classifier;
use crate::dom::text_len;
use crate::Options;

/// The acceptance check applied identically after every strategy.
///
/// A candidate passes when it is strictly longer than `min_length`
/// characters and is not a privacy notice.
#[derive(Debug, Clone, Copy)]
pub struct QualityGate<'a> {
    /// Exclusive lower bound on candidate length, in characters.
    pub min_length: usize,
    /// Privacy-notice classifier.
    pub classifier: &'a Classifier,
}

impl<'a> QualityGate<'a> {
    /// Gate with an explicit threshold.
    #[must_use]
    pub fn new(min_length: usize, classifier: &'a Classifier) -> Self {
        Self {
            min_length,
            classifier,
        }
    }

    /// Gate configured from extraction options.
    #[must_use]
    pub fn from_options(options: &'a Options) -> Self {
        Self::new(options.min_length, &options.classifier)
    }

    /// Whether the text is long enough, ignoring classification.
    #[must_use]
    pub fn long_enough(&self, text: &str) -> bool {
        text_len(text) > self.min_length
    }

    /// Whether the text passes the gate.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        self.long_enough(text) && !self.classifier.is_privacy_notice(text)
    }

    /// `Some(text)` if it passes the gate.
    #[must_use]
    pub fn admit(&self, text: String) -> Option<String> {
        self.accepts(&text).then_some(text)
    }
}
