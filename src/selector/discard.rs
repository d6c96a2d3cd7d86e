//! Noise Filter
//!
//! Removes structural non-content elements (navigation, footers, sidebars, ads,
//! comments, share widgets, scripts and styles, consent banners, ARIA landmark
//! roles) from a document before it is analysed.

use dom_query::{Document, Selection};

/// Elements that never hold article text.
///
/// JSON-LD scripts are spared: they render nothing, and the structured-data
/// extractor reads `articleBody` from them after filtering.
pub static NOISE_SELECTOR: &str = concat!(
    "header, footer, nav, .nav, .navbar, .sidebar, .ad, .advert, ",
    ".comment, .comments, .share, .social, .related, .author, .meta, ",
    "script:not([type=\"application/ld+json\"]), style, aside, ",
    "[role=\"navigation\"], [role=\"complementary\"], [role=\"banner\"], [role=\"contentinfo\"], ",
    ".privacy-notice, .consent-modal, .gdpr-consent, .cookie-consent"
);

/// Remove every element matching [`NOISE_SELECTOR`] from the document.
///
/// Mutates in place. Running it again on a filtered document removes nothing.
pub fn filter_noise(doc: &Document) {
    // Innermost first, so removing an outer match never detaches a node we still hold
    let discarded = doc.select(NOISE_SELECTOR).nodes().to_vec();
    for node in discarded.into_iter().rev() {
        Selection::from(node).remove();
    }
}

/// Number of noise elements currently in the document.
#[must_use]
pub fn count_noise(doc: &Document) -> usize {
    doc.select(NOISE_SELECTOR).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    const PAGE: &str = r#"
        <html><body>
            <header>Site header</header>
            <nav><a href="/">Home</a></nav>
            <div class="navbar">menu</div>
            <main>
                <article>
                    <p>Article text stays.</p>
                    <div class="share">Share this</div>
                    <div class="comments"><p>A comment</p></div>
                </article>
                <aside>Sidebar</aside>
                <div role="complementary">Related</div>
            </main>
            <div class="cookie-consent">We use cookies</div>
            <script>track();</script>
            <script type="application/ld+json">{"articleBody": "kept"}</script>
            <style>.x{}</style>
            <footer>Footer</footer>
        </body></html>
    "#;

    #[test]
    fn test_filter_removes_denylisted_elements() {
        let doc = dom::parse(PAGE);
        filter_noise(&doc);

        for sel in [
            "header", "nav", ".navbar", ".share", ".comments", "aside",
            "[role=\"complementary\"]", ".cookie-consent", "style", "footer",
        ] {
            assert!(doc.select(sel).is_empty(), "{sel} should be removed");
        }
        assert!(doc.select("article p").exists());
        assert_eq!(doc.select("script").length(), 1);
        assert!(doc.select(r#"script[type="application/ld+json"]"#).exists());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let doc = dom::parse(PAGE);
        filter_noise(&doc);
        let once = doc.html().to_string();

        assert_eq!(count_noise(&doc), 0);
        filter_noise(&doc);
        assert_eq!(doc.html().to_string(), once);
    }

    #[test]
    fn test_filter_on_clean_document_is_noop() {
        let doc = dom::parse("<html><body><p>Only content</p></body></html>");
        let before = doc.html().to_string();
        filter_noise(&doc);
        assert_eq!(doc.html().to_string(), before);
    }
}
