//! # rs-article-extract
//!
//! Main-article extraction for arbitrary, unstructured HTML, with tiered
//! retrieval for pages that hide their content behind consent interstitials
//! or render it lazily.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_article_extract::{extract, Strategy};
//!
//! let body = "The river crested overnight and crews worked until dawn to reinforce the levee. ".repeat(5);
//! let html = format!("<html><body><nav>Home</nav><div>{body}</div></body></html>");
//!
//! let extracted = extract(&html).expect("article text");
//! assert_eq!(extracted.strategy, Strategy::Heuristic);
//! assert!(extracted.text.starts_with("The river crested"));
//! ```
//!
//! ## Features
//!
//! - **Local chain**: own-text density scoring, structured data (microdata,
//!   article containers, meta description, JSON-LD), paragraph aggregation,
//!   declarative shadow roots
//! - **Quality gate**: every candidate must exceed the minimum length and not
//!   read as a privacy notice
//! - **Escalation**: raw fetch, bounded wait on the live page, then
//!   URL substitution, search referral and archive lookup for legal pages
//! - **Configurable**: keyword weights, thresholds, timeouts and endpoints

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter: parsing, visibility and rendered text.
pub mod dom;

/// Selector lists and rule-based queries.
pub mod selector;

/// Privacy-notice and legal-page classification.
pub mod classifier;

/// Local extraction strategies and the chain that runs them.
pub mod extractor;

/// Character encoding detection for fetched bodies.
pub mod encoding;

/// URL derivation for the bypass strategies.
pub mod url_utils;

/// Live page boundary.
pub mod page;

/// Out-of-band HTTP fetching.
pub mod fetch;

/// Bounded wait for dynamic content.
pub mod waiter;

/// Bypass strategies for legal / consent pages.
pub mod bypass;

/// Top-level retrieval orchestration.
pub mod escalator;

// Public API - re-exports
pub use classifier::{Classifier, KeywordSet, LegalSignal};
pub use error::{Error, Result};
pub use escalator::Escalator;
pub use extractor::{Extracted, QualityGate};
pub use fetch::{FetchRequest, Fetcher, HttpFetcher};
pub use options::{LegalPagePolicy, Options, DESKTOP_USER_AGENT};
pub use page::{Interaction, LivePage, PageEvent, StaticPage};
pub use result::{Article, Attempt, Outcome, Report, Step, Strategy};
pub use waiter::{ContentWaiter, Settlement};

/// Runs the local extraction chain over an HTML document with default options.
///
/// Returns `None` when no strategy produces text that passes the quality gate.
///
/// # Example
///
/// ```rust
/// use rs_article_extract::extract;
///
/// assert!(extract("<html><body><p>Too short.</p></body></html>").is_none());
/// ```
#[must_use]
pub fn extract(html: &str) -> Option<Extracted> {
    extract_with_options(html, &Options::default())
}

/// Runs the local extraction chain with custom options.
///
/// # Example
///
/// ```rust
/// use rs_article_extract::{extract_with_options, Options};
///
/// let options = Options {
///     min_length: 10,
///     ..Options::default()
/// };
/// let html = "<html><body><div>A short but sufficient story.</div></body></html>";
/// assert!(extract_with_options(html, &options).is_some());
/// ```
#[must_use]
pub fn extract_with_options(html: &str, options: &Options) -> Option<Extracted> {
    extractor::extract_from_html(html, options)
}

/// Runs the local extraction chain over raw bytes, detecting the encoding.
///
/// The charset comes from `content_type` when given, then from the
/// document's meta tags, then defaults to UTF-8.
///
/// # Example
///
/// ```rust
/// use rs_article_extract::{extract_bytes_with_options, Options};
///
/// let options = Options {
///     min_length: 3,
///     ..Options::default()
/// };
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div>Caf\xE9 news</div></body></html>";
/// let extracted = extract_bytes_with_options(html, None, &options).expect("text");
/// assert!(extracted.text.contains("Café"));
/// ```
#[must_use]
pub fn extract_bytes_with_options(
    html: &[u8],
    content_type: Option<&str>,
    options: &Options,
) -> Option<Extracted> {
    let decoded = encoding::decode_body(html, content_type);
    extract_with_options(&decoded, options)
}
