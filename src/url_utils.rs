//! URL Utility Functions
//!
//! URL derivation for the bypass strategies: guessed sibling paths for legal
//! pages, search and archive query URLs, and resolution of result links.

use url::Url;

use crate::error::Result;

/// Query parameters search engines use to wrap the real result URL.
const REDIRECT_PARAMS: &[&str] = &["q", "url", "uddg"];

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Resolve a link (relative or absolute) against the page it appeared on.
///
/// Special schemes (`javascript:`, `mailto:`, ...) and fragment-only links
/// resolve to `None`.
#[must_use]
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if let (true, Some(url)) = is_absolute_url(href) {
        return Some(url);
    }
    let resolved = base.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

/// Whether `link` is served by `site`'s host or one of its subdomains, on
/// the same port.
#[must_use]
pub fn is_on_host(link: &Url, site: &Url) -> bool {
    let (Some(host), Some(site_host)) = (link.host_str(), site.host_str()) else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    let site_host = site_host.to_ascii_lowercase();
    let matches_host = host == site_host
        || host
            .strip_suffix(site_host.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'));
    matches_host && link.port_or_known_default() == site.port_or_known_default()
}

/// Byte offset of the first legal segment in the URL path, if any.
#[must_use]
pub fn legal_segment_offset(url: &Url, segments: &[String]) -> Option<usize> {
    let path = url.path().to_lowercase();
    segments
        .iter()
        .filter_map(|segment| path.find(segment.to_lowercase().as_str()))
        .min()
}

/// Replace the legal segment and the rest of the path with `guess`.
///
/// `https://host/en/privacy/cookies?x=1` with guess `/news` becomes
/// `https://host/en/news`. Returns `None` when the path has no legal segment.
#[must_use]
pub fn substitute_legal_path(url: &Url, segments: &[String], guess: &str) -> Option<Url> {
    let offset = legal_segment_offset(url, segments)?;
    let prefix = &url.path()[..offset];

    let mut guessed = url.clone();
    guessed.set_path(&format!("{prefix}{guess}"));
    guessed.set_query(None);
    guessed.set_fragment(None);
    Some(guessed)
}

/// Search query URL for `<page url> news`.
pub fn search_url(endpoint: &str, page: &Url) -> Result<Url> {
    let query = format!("{page} news");
    Ok(Url::parse_with_params(endpoint, &[("q", query.as_str())])?)
}

/// Archive availability lookup URL for a page.
pub fn archive_lookup_url(endpoint: &str, page: &Url) -> Result<Url> {
    Ok(Url::parse_with_params(endpoint, &[("url", page.as_str())])?)
}

/// Unwrap a search-engine redirect link (`/url?q=<target>`) to its target.
///
/// Links that do not wrap an absolute http(s) URL are returned unchanged.
#[must_use]
pub fn unwrap_redirect(link: Url) -> Url {
    let target = link
        .query_pairs()
        .filter(|(key, _)| REDIRECT_PARAMS.contains(&key.as_ref()))
        .find_map(|(_, value)| is_absolute_url(&value).1);
    target.unwrap_or(link)
}
