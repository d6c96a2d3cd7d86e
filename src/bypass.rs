//! Bypass chain for legal / consent pages.
//!
//! Three independent ways around an interstitial, tried in order:
//!
//! 1. URL substitution: swap the legal path segment for a guessed content path
//! 2. Search referral: find a result link on the page's host under a news path
//! 3. Archive: fetch the closest archived snapshot
//!
//! Every fetched document goes through the full local chain and the quality
//! gate. Failures are logged, recorded as attempts and never propagated.

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::dom;
use crate::escalator::fetch_and_extract;
use crate::fetch::{FetchRequest, Fetcher};
use crate::result::{Article, Attempt, Step};
use crate::url_utils::{
    archive_lookup_url, is_on_host, resolve_link, search_url, substitute_legal_path,
    unwrap_redirect,
};
use crate::Options;

/// Runs the bypass strategies against one page URL.
pub struct Bypass<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    options: &'a Options,
    cancel: &'a CancellationToken,
}

impl<'a, F: Fetcher + ?Sized> Bypass<'a, F> {
    /// Bypass chain sharing the escalator's fetcher, options and cancellation.
    pub fn new(fetcher: &'a F, options: &'a Options, cancel: &'a CancellationToken) -> Self {
        Self {
            fetcher,
            options,
            cancel,
        }
    }

    /// First accepted article from any strategy, recording every attempt.
    pub async fn run(&self, page_url: &Url, attempts: &mut Vec<Attempt>) -> Option<Article> {
        if let Some(article) = self.substitute_url(page_url, attempts).await {
            return Some(article);
        }
        if self.cancel.is_cancelled() {
            return None;
        }
        if let Some(article) = self.search_referral(page_url, attempts).await {
            return Some(article);
        }
        if self.cancel.is_cancelled() {
            return None;
        }
        let article = self.archive(page_url, attempts).await;
        if article.is_none() {
            info!(url = %page_url, "all bypass strategies failed");
        }
        article
    }

    async fn fetch_step(
        &self,
        step: Step,
        url: Url,
        attempts: &mut Vec<Attempt>,
    ) -> Option<Article> {
        let (attempt, article) =
            fetch_and_extract(self.fetcher, self.options, step, url).await;
        attempts.push(attempt);
        article
    }

    /// Guess sibling content paths for a URL under a legal segment.
    pub async fn substitute_url(
        &self,
        page_url: &Url,
        attempts: &mut Vec<Attempt>,
    ) -> Option<Article> {
        let segments = &self.options.classifier.legal_path_segments;
        for guess in &self.options.bypass_paths {
            if self.cancel.is_cancelled() {
                return None;
            }
            let Some(candidate) = substitute_legal_path(page_url, segments, guess) else {
                debug!(url = %page_url, "no legal path segment to substitute");
                return None;
            };
            if let Some(article) = self.fetch_step(Step::UrlSubstitution, candidate, attempts).await {
                return Some(article);
            }
        }
        None
    }

    /// Look the page up on the search engine and follow a same-host news link.
    pub async fn search_referral(
        &self,
        page_url: &Url,
        attempts: &mut Vec<Attempt>,
    ) -> Option<Article> {
        let search = match search_url(&self.options.search_endpoint, page_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "search URL could not be built");
                attempts.push(Attempt::failed(Step::SearchReferral, None, e));
                return None;
            }
        };

        let request = FetchRequest::new(search.clone()).with_referrer(&self.options.referrer);
        let results = match self.fetcher.fetch(&request).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %search, error = %e, "search request failed");
                attempts.push(Attempt::failed(Step::SearchReferral, Some(search), e));
                return None;
            }
        };

        let Some(link) = find_result_link(&results, &search, page_url, &self.options.search_result_paths)
        else {
            debug!(url = %page_url, "no matching search result");
            attempts.push(Attempt::failed(
                Step::SearchReferral,
                Some(search),
                "no matching result link",
            ));
            return None;
        };

        self.fetch_step(Step::SearchReferral, link, attempts).await
    }

    /// Fetch the closest archived snapshot of the page.
    pub async fn archive(&self, page_url: &Url, attempts: &mut Vec<Attempt>) -> Option<Article> {
        let lookup = match archive_lookup_url(&self.options.archive_endpoint, page_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "archive lookup URL could not be built");
                attempts.push(Attempt::failed(Step::Archive, None, e));
                return None;
            }
        };

        let body = match self.fetcher.fetch(&FetchRequest::new(lookup.clone())).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %lookup, error = %e, "archive lookup failed");
                attempts.push(Attempt::failed(Step::Archive, Some(lookup), e));
                return None;
            }
        };

        let snapshot = match closest_snapshot(&body) {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!(url = %page_url, "no archived snapshot");
                attempts.push(Attempt::failed(Step::Archive, Some(lookup), "no archived snapshot"));
                return None;
            }
            Err(e) => {
                warn!(url = %lookup, error = %e, "archive response unreadable");
                attempts.push(Attempt::failed(Step::Archive, Some(lookup), e));
                return None;
            }
        };

        self.fetch_step(Step::Archive, snapshot, attempts).await
    }
}

/// First result link on the page's host (or a subdomain of it) whose path
/// has a result segment.
///
/// Search-engine redirect wrappers are unwrapped before matching.
#[must_use]
pub fn find_result_link(
    results_html: &str,
    results_url: &Url,
    page_url: &Url,
    result_paths: &[String],
) -> Option<Url> {
    let doc = dom::parse(results_html);

    doc.select("a[href]")
        .iter()
        .filter_map(|a| a.attr("href"))
        .filter_map(|href| resolve_link(&href, results_url))
        .map(unwrap_redirect)
        .find(|link| {
            is_on_host(link, page_url)
                && result_paths.iter().any(|p| link.path().contains(p.as_str()))
        })
}

#[derive(Debug, Deserialize)]
struct Availability {
    #[serde(default)]
    archived_snapshots: ArchivedSnapshots,
}

#[derive(Debug, Default, Deserialize)]
struct ArchivedSnapshots {
    closest: Option<Snapshot>,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default = "default_available")]
    available: bool,
    url: String,
}

fn default_available() -> bool {
    true
}

/// URL of the closest available snapshot in an availability API response.
pub fn closest_snapshot(body: &str) -> crate::Result<Option<Url>> {
    let availability: Availability = serde_json::from_str(body)?;
    match availability.archived_snapshots.closest {
        Some(snapshot) if snapshot.available => Ok(Some(Url::parse(&snapshot.url)?)),
        _ => Ok(None),
    }
}
