//! Structured-Data Extractor
//!
//! Cheaper and more precise than scoring when the page embeds clean markup:
//! microdata article bodies, known CMS article containers, a long meta
//! description, or a JSON-LD `articleBody`.

use dom_query::{Document, Selection};
use serde_json::Value;
use tracing::debug;

use super::QualityGate;
use crate::dom;
use crate::selector::content::{ARTICLE_BODY, ARTICLE_CONTAINERS, JSON_LD, META_DESCRIPTION};

/// Try microdata, article containers, meta description and JSON-LD in order.
///
/// Returns the first candidate that passes the gate, or an empty string.
#[must_use]
pub fn extract_structured(doc: &Document, gate: &QualityGate) -> String {
    if let Some(text) = gate.admit(article_body_text(doc)) {
        debug!(source = "itemprop", "structured data matched");
        return text;
    }

    for container in ARTICLE_CONTAINERS {
        if let Some(text) = gate.admit(container_paragraphs(doc, container)) {
            debug!(source = %container, "structured data matched");
            return text;
        }
    }

    if let Some(text) = meta_description(doc, gate) {
        debug!(source = "meta", "structured data matched");
        return text;
    }

    if let Some(text) = json_ld_article_body(doc).and_then(|body| gate.admit(body)) {
        debug!(source = "json-ld", "structured data matched");
        return text;
    }

    String::new()
}

/// Rendered text of the first `[itemprop="articleBody"]` element.
fn article_body_text(doc: &Document) -> String {
    dom::selection_text(&doc.select(ARTICLE_BODY).first())
}

/// Paragraphs of the first element matching `container`, joined by blank lines.
fn container_paragraphs(doc: &Document, container: &str) -> String {
    let root = doc.select(container).first();
    if root.is_empty() {
        return String::new();
    }
    root.select("p")
        .nodes()
        .iter()
        .map(dom::rendered_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First description meta tag whose content is long enough and not a notice.
fn meta_description(doc: &Document, gate: &QualityGate) -> Option<String> {
    doc.select(META_DESCRIPTION)
        .iter()
        .filter_map(|meta| meta.attr("content").map(|c| c.trim().to_string()))
        .find(|content| gate.accepts(content))
}

/// Recursively find `articleBody` in JSON-LD data.
fn find_article_body(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                if key.eq_ignore_ascii_case("articlebody") {
                    if let Value::String(s) = val {
                        return Some(s.as_str());
                    }
                }
            }
            map.values().find_map(find_article_body)
        }
        Value::Array(items) => items.iter().find_map(find_article_body),
        _ => None,
    }
}

/// `articleBody` from the first JSON-LD block that has one.
///
/// Bodies embedded as HTML are reduced to their rendered text.
#[must_use]
pub fn json_ld_article_body(doc: &Document) -> Option<String> {
    for script in doc.select(JSON_LD).nodes() {
        let json_text = Selection::from(*script).text();
        let Ok(data) = serde_json::from_str::<Value>(json_text.trim()) else {
            continue;
        };

        let Some(body) = find_article_body(&data).map(str::trim) else {
            continue;
        };
        if body.is_empty() {
            continue;
        }
        if body.contains('<') && body.contains('>') {
            let fragment = dom::parse(&format!("<html><body>{body}</body></html>"));
            return Some(dom::selection_text(&fragment.select("body")));
        }
        return Some(body.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;

    fn sentence(marker: &str) -> String {
        format!("{marker} The committee published its findings on regional water quality this week. ")
    }

    fn gate(classifier: &Classifier) -> QualityGate<'_> {
        QualityGate::new(250, classifier)
    }

    #[test]
    fn test_itemprop_article_body() {
        let classifier = Classifier::default();
        let html = format!(
            r#"<html><body><div itemprop="articleBody">{}</div></body></html>"#,
            sentence("ITEMPROP").repeat(5)
        );
        let doc = dom::parse(&html);
        assert!(extract_structured(&doc, &gate(&classifier)).starts_with("ITEMPROP"));
    }

    #[test]
    fn test_article_container_paragraphs_are_joined() {
        let classifier = Classifier::default();
        let html = format!(
            r#"<html><body><article><p>{}</p><p>{}</p><p>{}</p></article></body></html>"#,
            sentence("ONE").repeat(2),
            sentence("TWO").repeat(2),
            sentence("THREE").repeat(2)
        );
        let doc = dom::parse(&html);
        let text = extract_structured(&doc, &gate(&classifier));
        assert!(text.starts_with("ONE"));
        assert!(text.contains("\n\nTWO"));
        assert!(text.contains("\n\nTHREE"));
    }

    #[test]
    fn test_container_priority_ignores_document_order() {
        let classifier = Classifier::default();
        let html = format!(
            r#"<html><body>
                <article><p>{}</p></article>
                <div itemtype="https://schema.org/NewsArticle"><p>{}</p></div>
            </body></html>"#,
            sentence("TEASER").repeat(5),
            sentence("SCHEMA").repeat(5)
        );
        let doc = dom::parse(&html);
        assert!(extract_structured(&doc, &gate(&classifier)).starts_with("SCHEMA"));
    }

    #[test]
    fn test_news_article_itemtype_takes_priority_over_article() {
        let classifier = Classifier::default();
        let html = format!(
            r#"<html><body>
                <div itemtype="https://schema.org/NewsArticle"><p>{}</p></div>
                <article><p>{}</p></article>
            </body></html>"#,
            sentence("SCHEMA").repeat(5),
            sentence("ARTICLE").repeat(5)
        );
        let doc = dom::parse(&html);
        assert!(extract_structured(&doc, &gate(&classifier)).starts_with("SCHEMA"));
    }

    #[test]
    fn test_short_schema_falls_through_to_meta() {
        let classifier = Classifier::default();
        let description = sentence("META").repeat(5);
        let html = format!(
            r#"<html><head><meta name="description" content="{description}"></head>
            <body><div itemprop="articleBody">Too short.</div></body></html>"#
        );
        let doc = dom::parse(&html);
        assert_eq!(extract_structured(&doc, &gate(&classifier)), description.trim());
    }

    #[test]
    fn test_og_description_privacy_notice_is_rejected() {
        let classifier = Classifier::default();
        let html = format!(
            r#"<html><head><meta property="og:description" content="{} We value your privacy."></head><body></body></html>"#,
            sentence("OG").repeat(5)
        );
        let doc = dom::parse(&html);
        assert_eq!(extract_structured(&doc, &gate(&classifier)), "");
    }

    #[test]
    fn test_json_ld_article_body() {
        let classifier = Classifier::default();
        let body = sentence("JSONLD").repeat(5);
        let html = format!(
            r#"<html><head><script type="application/ld+json">
                {{"@context": "https://schema.org", "@graph": [{{"@type": "NewsArticle", "articleBody": "{body}"}}]}}
            </script></head><body></body></html>"#
        );
        let doc = dom::parse(&html);
        assert_eq!(extract_structured(&doc, &gate(&classifier)), body.trim());
    }

    #[test]
    fn test_json_ld_html_body_is_rendered() {
        let html = r#"<html><head><script type="application/ld+json">
            {"articleBody": "<p>First para.</p><p>Second para.</p>"}
        </script></head><body></body></html>"#;
        let doc = dom::parse(html);
        assert_eq!(
            json_ld_article_body(&doc),
            Some("First para.\nSecond para.".to_string())
        );
    }

    #[test]
    fn test_malformed_json_ld_is_skipped() {
        let html = r#"<html><head>
            <script type="application/ld+json">{not json</script>
            <script type="application/ld+json">{"articleBody": "second block"}</script>
        </head><body></body></html>"#;
        let doc = dom::parse(html);
        assert_eq!(json_ld_article_body(&doc), Some("second block".to_string()));
    }

    #[test]
    fn test_nothing_structured() {
        let classifier = Classifier::default();
        let doc = dom::parse("<html><body><div>plain</div></body></html>");
        assert_eq!(extract_structured(&doc, &gate(&classifier)), "");
    }
}
