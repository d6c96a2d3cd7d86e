//! Selector Infrastructure
//!
//! CSS selector lists used by the extraction strategies, plus rule-based
//! queries for element tests that CSS cannot express (visibility, shadow
//! root ancestry).

use dom_query::Selection;

pub mod content;
pub mod discard;
pub mod legal;

/// A predicate over a single-element selection.
pub type Rule = fn(&Selection) -> bool;

/// Every descendant of `root` the rule accepts, in document order.
///
/// # Example
///
/// ```rust
/// use rs_article_extract::{dom, selector};
///
/// fn is_lead(sel: &dom_query::Selection) -> bool {
///     sel.attr("class").is_some_and(|c| c.contains("lead"))
/// }
///
/// let doc = dom::parse(r#"<div><p class="lead">a</p><p>b</p><p class="lead">c</p></div>"#);
/// let leads = selector::query_all(&doc.select("div"), is_lead);
/// assert_eq!(leads.len(), 2);
/// ```
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}
