//! Network collaborator.
//!
//! Every out-of-band request the escalator makes (the page itself, guessed
//! sibling URLs, the search engine, the archive) goes through [`Fetcher`],
//! so tests and embedders can swap the transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER};
use tracing::{debug, warn};
use url::Url;

use crate::encoding::decode_body;
use crate::error::{Error, Result};
use crate::Options;

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Target URL.
    pub url: Url,
    /// `Referer` header to send, if any.
    pub referrer: Option<String>,
}

impl FetchRequest {
    /// Request without a referrer.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            referrer: None,
        }
    }

    /// Attach a referrer.
    #[must_use]
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

/// Fetches a document as decoded text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET the URL and return its body, or an error on transport failure or
    /// a non-success status.
    async fn fetch(&self, request: &FetchRequest) -> Result<String>;
}

/// [`Fetcher`] over `reqwest` with a desktop browser identity.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a client with the configured User-Agent and per-fetch timeout.
    pub fn new(options: &Options) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .default_headers(headers)
            .timeout(options.fetch_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            timeout: options.fetch_timeout,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String> {
        let mut builder = self
            .client
            .get(request.url.clone())
            .timeout(self.timeout);
        if let Some(referrer) = &request.referrer {
            builder = builder.header(REFERER, referrer.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %request.url, status = status.as_u16(), "fetch rejected");
            return Err(Error::Status {
                url: request.url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let bytes = response.bytes().await?;
        debug!(url = %request.url, bytes = bytes.len(), "fetched");

        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}
