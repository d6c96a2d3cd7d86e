//! Content selectors
//!
//! Markers that identify article bodies and paragraph-like elements.

/// Microdata article body; its whole text is the article.
pub static ARTICLE_BODY: &str = r#"[itemprop="articleBody"]"#;

/// Containers whose paragraphs make up the article, tried in this order.
pub static ARTICLE_CONTAINERS: &[&str] = &[
    r#"[itemtype*="NewsArticle"]"#,
    "article",
    ".article-content",
    ".story-body",
    ".story-content",
    ".post-content",
];

/// Meta tags that may carry a long-form description.
pub static META_DESCRIPTION: &str =
    r#"meta[name="description"], meta[property="og:description"]"#;

/// JSON-LD blocks.
pub static JSON_LD: &str = r#"script[type="application/ld+json"]"#;

/// Paragraph-like elements collected by the paragraph aggregator.
pub static PARAGRAPHS: &str = concat!(
    "p, .content p, article p, .article-content p, ",
    ".story-body p, .story-content p, .post-content p"
);
