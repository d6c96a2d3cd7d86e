//! Dynamic-Content Waiter
//!
//! Bounded wait for the live page to populate. Settles once, on whichever
//! comes first:
//!
//! - the page already satisfies the settle condition on entry
//! - a body mutation after which the condition holds
//! - the first click, scroll or resize (each kind checked once) after which
//!   the condition holds
//! - the timeout, regardless of content
//! - cancellation by the host
//!
//! The settle condition is "body text longer than `min_length` and not a
//! legal page". Settling does not promise usable content; extraction still
//! gates its candidates.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::classifier::{body_text, Classifier};
use crate::dom::{self, text_len};
use crate::page::{Interaction, LivePage, PageEvent};
use crate::Options;

/// How the wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    /// Content was already there.
    Immediate,
    /// A DOM mutation brought the page into shape.
    Mutation,
    /// A user interaction brought the page into shape.
    Interaction(Interaction),
    /// The timeout expired first.
    TimedOut,
    /// The host cancelled the wait.
    Cancelled,
}

impl Settlement {
    /// Whether the settle condition held when the wait ended.
    #[must_use]
    pub fn content_ready(self) -> bool {
        matches!(self, Self::Immediate | Self::Mutation | Self::Interaction(_))
    }
}

/// Waits for the live page to settle.
#[derive(Debug, Clone, Copy)]
pub struct ContentWaiter<'a> {
    timeout: Duration,
    min_length: usize,
    classifier: &'a Classifier,
}

impl<'a> ContentWaiter<'a> {
    /// Waiter using the configured timeout, threshold and classifier.
    #[must_use]
    pub fn new(options: &'a Options) -> Self {
        Self {
            timeout: options.wait_timeout,
            min_length: options.min_length,
            classifier: &options.classifier,
        }
    }

    /// Override the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wait until the page settles, times out, or `cancel` fires.
    ///
    /// Subscribes before the entry check so no event is missed between the
    /// two. Every snapshot races the deadline and the token, so a stalled
    /// page cannot hold the wait past its timeout. The subscription is
    /// dropped when this returns.
    pub async fn wait(&self, page: &dyn LivePage, cancel: &CancellationToken) -> Settlement {
        let mut events = page.subscribe();
        let url = page.url();
        let deadline = Instant::now() + self.timeout;

        match self.check_until(page, &url, deadline, cancel).await {
            Ok(true) => {
                debug!("content present on entry");
                return Settlement::Immediate;
            }
            Ok(false) => {}
            Err(settlement) => {
                debug!(?settlement, "wait finished during entry check");
                return settlement;
            }
        }

        let expiry = sleep_until(deadline);
        tokio::pin!(expiry);
        let mut interactions_seen: HashSet<Interaction> = HashSet::new();
        let mut listening = true;

        let settlement = loop {
            let trigger = tokio::select! {
                biased;

                () = cancel.cancelled() => break Settlement::Cancelled,

                () = &mut expiry => break Settlement::TimedOut,

                event = events.recv(), if listening => match event {
                    Ok(PageEvent::Mutation) | Err(RecvError::Lagged(_)) => Settlement::Mutation,
                    Ok(PageEvent::Interaction(kind)) if interactions_seen.insert(kind) => {
                        Settlement::Interaction(kind)
                    }
                    Ok(PageEvent::Interaction(_)) => continue,
                    Err(RecvError::Closed) => {
                        listening = false;
                        continue;
                    }
                },
            };

            match self.check_until(page, &url, deadline, cancel).await {
                Ok(true) => break trigger,
                Ok(false) => {}
                Err(settlement) => break settlement,
            }
        };

        debug!(?settlement, "wait finished");
        settlement
    }

    /// One settle check, abandoned when the deadline passes or `cancel` fires.
    async fn check_until(
        &self,
        page: &dyn LivePage,
        url: &Url,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<bool, Settlement> {
        tokio::select! {
            biased;

            () = cancel.cancelled() => Err(Settlement::Cancelled),

            () = sleep_until(deadline) => {
                warn!("snapshot still pending at deadline");
                Err(Settlement::TimedOut)
            }

            settled = self.check(page, url) => Ok(settled),
        }
    }

    async fn check(&self, page: &dyn LivePage, url: &Url) -> bool {
        match page.snapshot().await {
            Ok(html) => self.is_settled(&html, url),
            Err(e) => {
                warn!(error = %e, "snapshot failed while waiting");
                false
            }
        }
    }

    /// Settle condition against one snapshot.
    #[must_use]
    pub fn is_settled(&self, html: &str, url: &Url) -> bool {
        let doc = dom::parse(html);
        text_len(&body_text(&doc)) > self.min_length && !self.classifier.is_legal_page(&doc, url)
    }
}
