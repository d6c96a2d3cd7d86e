//! Shadow-Tree Walker
//!
//! Some publishers ship the article inside encapsulated component trees.
//! Declarative shadow roots survive [`dom::parse`] as `inert-template`
//! elements; each root is re-parsed as its own document so the paragraph
//! aggregator sees its contents as ordinary light DOM.
//!
//! Traversal stops one level below the outermost roots.

use dom_query::{Document, Selection};
use tracing::debug;

use super::paragraphs::{aggregate_paragraphs, PARAGRAPH_SEPARATOR};
use super::QualityGate;
use crate::dom::{self, TEMPLATE_TAG};
use crate::selector;

/// Shadow roots not nested inside another shadow root.
fn is_top_level_shadow_root(sel: &Selection) -> bool {
    if dom::tag_name(sel).as_deref() != Some(TEMPLATE_TAG) {
        return false;
    }
    let Some(node) = sel.nodes().first() else {
        return false;
    };
    if !node.has_attr("shadowrootmode") && !node.has_attr("shadowroot") {
        return false;
    }
    !node
        .ancestors(None)
        .iter()
        .any(|anc| anc.node_name().is_some_and(|n| n.eq_ignore_ascii_case(TEMPLATE_TAG)))
}

/// Each top-level shadow root re-parsed as a standalone document.
fn shadow_documents(doc: &Document) -> Vec<Document> {
    selector::query_all(&doc.select("html"), is_top_level_shadow_root)
        .iter()
        .map(|root| dom::parse(&root.inner_html()))
        .collect()
}

/// Aggregate paragraphs of every shadow root plus one nested level.
///
/// Each root's fragment is gated on its own; accepted fragments are joined
/// in document order (outer root, then its nested roots).
#[must_use]
pub fn extract_from_shadow_roots(doc: &Document, gate: &QualityGate) -> String {
    let mut fragments = Vec::new();

    for scoped in shadow_documents(doc) {
        if let Some(text) = gate.admit(aggregate_paragraphs(&scoped, gate.classifier)) {
            fragments.push(text);
        }
        for nested in shadow_documents(&scoped) {
            if let Some(text) = gate.admit(aggregate_paragraphs(&nested, gate.classifier)) {
                fragments.push(text);
            }
        }
    }

    debug!(fragments = fragments.len(), "shadow roots walked");
    fragments.join(PARAGRAPH_SEPARATOR)
}
