//! Paragraph Aggregator
//!
//! Last-resort text source: every visible paragraph-like element in document
//! order, minus those that read as privacy notices.

use dom_query::Document;

use crate::classifier::Classifier;
use crate::dom;
use crate::selector::content::PARAGRAPHS;

/// Separator placed between aggregated paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Join the rendered text of all visible paragraphs.
///
/// Paragraphs inside shadow roots are not visible from the light DOM and are
/// left to the shadow-tree walker. The result is not gated.
#[must_use]
pub fn aggregate_paragraphs(doc: &Document, classifier: &Classifier) -> String {
    doc.select(PARAGRAPHS)
        .nodes()
        .iter()
        .filter(|node| dom::is_visible(node))
        .map(dom::rendered_text)
        .filter(|text| !text.is_empty() && !classifier.is_privacy_notice(text))
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}
