//! Live page boundary.
//!
//! The host owns the live document. The core only needs its URL, a
//! serialized snapshot of the current DOM (declarative shadow roots
//! included), and a stream of events telling it the page changed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use url::Url;

use crate::error::Result;

/// Capacity of the event channel created by [`StaticPage`].
pub const EVENT_CAPACITY: usize = 64;

/// User interactions that prompt a recheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Pointer click anywhere on the page.
    Click,
    /// Viewport scroll.
    Scroll,
    /// Window resize.
    Resize,
}

/// Something happened on the live page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEvent {
    /// The body subtree changed.
    Mutation,
    /// The user interacted with the page.
    Interaction(Interaction),
}

/// The current page as seen by the host.
#[async_trait]
pub trait LivePage: Send + Sync {
    /// URL of the current document.
    fn url(&self) -> Url;

    /// Serialize the current DOM to HTML.
    async fn snapshot(&self) -> Result<String>;

    /// New receiver for page events; dropping it unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<PageEvent>;
}

/// A page whose DOM never changes, e.g. one built from fetched HTML.
#[derive(Debug)]
pub struct StaticPage {
    url: Url,
    html: String,
    events: broadcast::Sender<PageEvent>,
}

impl StaticPage {
    /// Wrap a URL and its HTML.
    #[must_use]
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            url,
            html: html.into(),
            events,
        }
    }
}

#[async_trait]
impl LivePage for StaticPage {
    fn url(&self) -> Url {
        self.url.clone()
    }

    async fn snapshot(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }
}
