//! Retrieval Escalator
//!
//! Top-level algorithm. Steps run strictly in order and the first accepted
//! candidate ends the request:
//!
//! 1. Raw fetch of the page's own URL through the local chain
//! 2. Wait for the live page to settle
//! 3. Legal / consent page: bypass chain, else report the block
//! 4. Otherwise the local chain against the live snapshot
//! 5. Nothing found
//!
//! Every step is attempted at most once. Errors degrade to the next step.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::bypass::Bypass;
use crate::classifier::LegalSignal;
use crate::dom;
use crate::extractor::run_chain;
use crate::fetch::{FetchRequest, Fetcher};
use crate::page::LivePage;
use crate::result::{Article, Attempt, Outcome, Report, Step};
use crate::waiter::{ContentWaiter, Settlement};
use crate::{Error, LegalPagePolicy, Options};

/// Run the local chain over a document and record it as one attempt.
pub(crate) fn extract_attempt(
    options: &Options,
    step: Step,
    url: Url,
    html: &str,
) -> (Attempt, Option<Article>) {
    let doc = dom::parse(html);
    let chain = run_chain(&doc, options);

    let mut attempt = Attempt::new(step, Some(url.clone()));
    attempt.candidate_len = chain.best_len();
    attempt.accepted = chain.accepted.is_some();

    let article = chain.accepted.map(|extracted| Article {
        text: extracted.text,
        step,
        strategy: extracted.strategy,
        url,
    });
    (attempt, article)
}

/// Fetch a URL with the configured referrer and run the local chain over it.
pub(crate) async fn fetch_and_extract<F: Fetcher + ?Sized>(
    fetcher: &F,
    options: &Options,
    step: Step,
    url: Url,
) -> (Attempt, Option<Article>) {
    let request = FetchRequest::new(url.clone()).with_referrer(&options.referrer);
    match fetcher.fetch(&request).await {
        Ok(html) => {
            let (attempt, article) = extract_attempt(options, step, url, &html);
            debug!(
                ?step,
                len = attempt.candidate_len,
                accepted = attempt.accepted,
                "fetched document extracted"
            );
            (attempt, article)
        }
        Err(e) => {
            warn!(?step, url = %url, error = %e, "fetch failed");
            (Attempt::failed(step, Some(url), e), None)
        }
    }
}

/// Orchestrates retrieval for one page.
///
/// # Example
///
/// ```rust,no_run
/// use rs_article_extract::{Escalator, HttpFetcher, Options, StaticPage};
/// use url::Url;
///
/// # async fn run() -> rs_article_extract::Result<()> {
/// let options = Options::default();
/// let escalator = Escalator::new(HttpFetcher::new(&options)?, options);
/// let page = StaticPage::new(Url::parse("https://example.com/news/1")?, "<html></html>");
/// let report = escalator.extract(&page).await;
/// println!("{}", report.outcome.text());
/// # Ok(())
/// # }
/// ```
pub struct Escalator<F: Fetcher> {
    fetcher: F,
    options: Options,
    cancel: CancellationToken,
}

impl<F: Fetcher> Escalator<F> {
    /// Escalator with its own cancellation token.
    pub fn new(fetcher: F, options: Options) -> Self {
        Self {
            fetcher,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Use a host-provided cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts the wait and any remaining steps when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The fetcher in use.
    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Extract article text for the page, escalating as needed.
    pub async fn extract(&self, page: &dyn LivePage) -> Report {
        let url = page.url();
        let mut attempts = Vec::new();
        info!(url = %url, "extraction requested");

        let (attempt, article) =
            fetch_and_extract(&self.fetcher, &self.options, Step::RawFetch, url.clone()).await;
        attempts.push(attempt);
        if let Some(article) = article {
            return finish(Outcome::Extracted(article), attempts);
        }

        let settlement = ContentWaiter::new(&self.options).wait(page, &self.cancel).await;
        if settlement == Settlement::Cancelled {
            info!(url = %url, "extraction cancelled");
            return finish(Outcome::NotFound, attempts);
        }

        let snapshot = tokio::select! {
            biased;

            () = self.cancel.cancelled() => {
                info!(url = %url, "extraction cancelled");
                return finish(Outcome::NotFound, attempts);
            }

            snapshot = tokio::time::timeout(self.options.fetch_timeout, page.snapshot()) => {
                snapshot.unwrap_or_else(|_| {
                    Err(Error::Snapshot(format!(
                        "no snapshot within {:?}",
                        self.options.fetch_timeout
                    )))
                })
            }
        };

        let html = match snapshot {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "live snapshot failed");
                attempts.push(Attempt::failed(Step::LiveDom, Some(url), e));
                return finish(Outcome::NotFound, attempts);
            }
        };

        let Some(signal) = self.legal_signal(&html, &url) else {
            let (attempt, article) = extract_attempt(&self.options, Step::LiveDom, url, &html);
            attempts.push(attempt);
            let outcome = article.map_or(Outcome::NotFound, Outcome::Extracted);
            return finish(outcome, attempts);
        };

        info!(url = %url, %signal, "legal page detected");
        if self.options.legal_page_policy == LegalPagePolicy::ExtractFirst {
            let (attempt, article) =
                extract_attempt(&self.options, Step::LiveDom, url.clone(), &html);
            attempts.push(attempt);
            if let Some(article) = article {
                return finish(Outcome::Extracted(article), attempts);
            }
        }

        if self.options.enable_bypass {
            let bypass = Bypass::new(&self.fetcher, &self.options, &self.cancel);
            if let Some(article) = bypass.run(&url, &mut attempts).await {
                return finish(Outcome::Extracted(article), attempts);
            }
        }

        if self.cancel.is_cancelled() {
            info!(url = %url, "extraction cancelled during bypass");
            return finish(Outcome::NotFound, attempts);
        }
        finish(Outcome::BlockedByLegalPage, attempts)
    }

    fn legal_signal(&self, html: &str, url: &Url) -> Option<LegalSignal> {
        let doc = dom::parse(html);
        self.options.classifier.legal_signal(&doc, url)
    }
}

fn finish(outcome: Outcome, attempts: Vec<Attempt>) -> Report {
    match &outcome {
        Outcome::Extracted(article) => {
            info!(step = ?article.step, strategy = ?article.strategy, "article extracted");
        }
        Outcome::BlockedByLegalPage => info!("blocked by legal page"),
        Outcome::NotFound => info!("no article text found"),
    }
    Report { outcome, attempts }
}
