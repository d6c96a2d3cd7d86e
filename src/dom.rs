//! DOM Operations Adapter
//!
//! Thin layer over `dom_query` that gives the extraction strategies the view of
//! a document a browser would give them: which elements have a visible box,
//! and what text an element renders (`innerText`), as opposed to its raw
//! `textContent`.
//!
//! Both live-page snapshots and fetched HTML go through [`parse`], so every
//! strategy runs the same way against either source.

pub use dom_query::{Document, NodeRef, Selection};

use crate::patterns::{HIDDEN_STYLE, TEMPLATE_CLOSE, TEMPLATE_OPEN};

/// Tag name that `<template>` elements are renamed to during [`parse`].
pub const TEMPLATE_TAG: &str = "inert-template";

/// Selector for declarative shadow roots after [`parse`].
pub const SHADOW_ROOT_SELECTOR: &str =
    "inert-template[shadowrootmode], inert-template[shadowroot]";

/// Elements that never produce a layout box.
const NON_RENDERED_TAGS: &[&str] = &[
    "head", "title", "meta", "link", "base", "script", "style", "noscript", "template",
    TEMPLATE_TAG, "iframe", "object", "svg", "canvas", "audio", "video", "source", "track",
    "datalist", "param", "dialog",
];

/// Elements whose rendered text starts and ends on its own line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

// === Parsing ===

/// Parse an HTML string into a document.
///
/// `<template>` elements are renamed to [`TEMPLATE_TAG`] first, which keeps
/// declarative shadow roots (`<template shadowrootmode="open">`) in the tree
/// where selectors can reach them.
#[must_use]
pub fn parse(html: &str) -> Document {
    let lifted = TEMPLATE_OPEN.replace_all(html, format!("<{TEMPLATE_TAG}").as_str());
    let lifted = TEMPLATE_CLOSE.replace_all(&lifted, format!("</{TEMPLATE_TAG}>").as_str());
    Document::from(lifted.as_ref())
}

// === Attribute / tag helpers ===

/// Lowercase tag name of the first node in the selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Element children of a node, in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

// === Visibility ===

/// Whether this element, considered on its own, produces a layout box.
///
/// Ancestors are not consulted; see [`is_visible`].
#[must_use]
pub fn renders_box(node: &NodeRef) -> bool {
    if !node.is_element() {
        return false;
    }
    let Some(name) = node.node_name() else {
        return false;
    };
    if NON_RENDERED_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
        return false;
    }
    if node.has_attr("hidden") {
        return false;
    }
    if name.eq_ignore_ascii_case("input")
        && node.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
    {
        return false;
    }
    !node.attr("style").is_some_and(|style| HIDDEN_STYLE.is_match(&style))
}

/// Whether the element and all of its element ancestors produce a layout box.
#[must_use]
pub fn is_visible(node: &NodeRef) -> bool {
    renders_box(node)
        && node
            .ancestors(None)
            .iter()
            .filter(|anc| anc.is_element())
            .all(|anc| {
                // <html> is outside the rendered body but always laid out
                anc.node_name().is_some_and(|n| n.eq_ignore_ascii_case("html")) || renders_box(anc)
            })
}

// === Rendered text ===

/// Text an element renders, approximating `HTMLElement.innerText`.
///
/// Invisible subtrees contribute nothing, whitespace is collapsed, and block
/// elements and `<br>` break lines. Returns an empty string when the element
/// itself renders no box.
#[must_use]
pub fn rendered_text(node: &NodeRef) -> String {
    if !renders_box(node) {
        return String::new();
    }
    let mut out = String::new();
    collect_rendered(node, &mut out);
    finish_rendered(&out)
}

/// [`rendered_text`] of the first node in a selection, or empty.
#[must_use]
pub fn selection_text(sel: &Selection) -> String {
    sel.nodes().first().map(rendered_text).unwrap_or_default()
}

/// Length of a text in characters, the unit every threshold is expressed in.
#[inline]
#[must_use]
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

fn collect_rendered(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            push_collapsed(out, &child.text());
            continue;
        }
        if !renders_box(&child) {
            continue;
        }
        let name = child.node_name().map(|n| n.to_ascii_lowercase()).unwrap_or_default();
        if name == "br" {
            break_line(out);
            continue;
        }
        let block = BLOCK_TAGS.contains(&name.as_str());
        if block {
            break_line(out);
        }
        collect_rendered(&child, out);
        if block {
            break_line(out);
        }
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('\n') {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
    }
}

fn break_line(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn finish_rendered(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
