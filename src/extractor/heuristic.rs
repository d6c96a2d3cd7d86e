//! Heuristic Scorer
//!
//! Ranks visible elements by the amount of text they contribute directly:
//!
//! ```text
//! score = len(rendered_text(element)) - Σ len(rendered_text(child element))
//! ```
//!
//! An article container holds most of its text in its own text nodes and
//! inline markup; layout wrappers only pass through text from deep children
//! and score near zero.

use dom_query::{Document, NodeRef};
use tracing::trace;

use super::QualityGate;
use crate::dom::{self, rendered_text, text_len};
use crate::selector::discard::{count_noise, filter_noise};

/// Winning element of a scoring pass.
#[derive(Debug, Clone)]
pub struct ScoredElement<'a> {
    /// The element.
    pub node: NodeRef<'a>,
    /// Own-text score.
    pub score: i64,
    /// The element's rendered text.
    pub text: String,
}

/// Own-text score of an element whose rendered text is already known.
#[must_use]
pub fn own_text_score(node: &NodeRef, text: &str) -> i64 {
    let children_len: usize = dom::element_children(node)
        .iter()
        .map(|child| text_len(&rendered_text(child)))
        .sum();
    text_len(text) as i64 - children_len as i64
}

/// Highest-scoring visible element under `<body>`, without filtering noise.
///
/// Elements shorter than the gate's minimum length, or whose text is a
/// privacy notice, are not scored. Ties keep the first element in document
/// order.
#[must_use]
pub fn best_element<'a>(doc: &'a Document, gate: &QualityGate) -> Option<ScoredElement<'a>> {
    let body = doc.select("body");
    let body_node = *body.nodes().first()?;

    let mut best: Option<ScoredElement<'a>> = None;
    for node in body_node.descendants() {
        if !node.is_element() || !dom::is_visible(&node) {
            continue;
        }
        let text = rendered_text(&node);
        if text_len(&text) < gate.min_length || gate.classifier.is_privacy_notice(&text) {
            continue;
        }

        let score = own_text_score(&node, &text);
        trace!(
            tag = %node.node_name().unwrap_or_default(),
            score,
            "scored element"
        );
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(ScoredElement { node, score, text });
        }
    }
    best
}

/// Filter noise, then return the best element's rendered text (or empty).
#[must_use]
pub fn extract_by_heuristic(doc: &Document, gate: &QualityGate) -> String {
    let noise = count_noise(doc);
    filter_noise(doc);
    trace!(noise, "noise filtered");
    best_element(doc, gate).map(|best| best.text).unwrap_or_default()
}
