//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rs_article_extract::{Error, LivePage, PageEvent, Result};
use tokio::sync::broadcast;
use url::Url;

/// Article prose free of any privacy or legal keyword.
pub fn article_text(marker: &str) -> String {
    format!(
        "{marker} {}",
        "Volunteers cleared debris from the riverbank as water levels fell through the afternoon. "
            .repeat(5)
    )
    .trim_end()
    .to_string()
}

/// A full page whose main div holds `article_text(marker)`.
pub fn article_page(marker: &str) -> String {
    format!(
        "<html><head><title>{marker}</title></head><body><nav>Home | World</nav><div class=\"story\">{}</div><footer>Contact</footer></body></html>",
        article_text(marker)
    )
}

/// A page with too little text for any strategy.
pub fn thin_page() -> String {
    "<html><body><div id=\"app\">Loading...</div></body></html>".to_string()
}

/// A terms-of-service interstitial.
pub fn terms_page() -> String {
    "<html><body><h1>Terms of Service</h1><p>Please accept to continue.</p></body></html>"
        .to_string()
}

/// Live page whose DOM and events are driven by the test.
pub struct ScriptedPage {
    url: Url,
    html: Mutex<String>,
    events: broadcast::Sender<PageEvent>,
    snapshots: AtomicUsize,
    fail_snapshots: bool,
    stall_after: Option<usize>,
}

impl ScriptedPage {
    pub fn new(url: &str, html: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            url: Url::parse(url).unwrap(),
            html: Mutex::new(html.into()),
            events,
            snapshots: AtomicUsize::new(0),
            fail_snapshots: false,
            stall_after: None,
        }
    }

    /// A page whose snapshots always fail.
    pub fn broken(url: &str) -> Self {
        Self {
            fail_snapshots: true,
            ..Self::new(url, "")
        }
    }

    /// A page that answers `answered` snapshots and then hangs on every
    /// later one.
    pub fn stalling_after(url: &str, html: impl Into<String>, answered: usize) -> Self {
        Self {
            stall_after: Some(answered),
            ..Self::new(url, html)
        }
    }

    /// Replace the DOM without notifying anyone.
    pub fn set_html(&self, html: impl Into<String>) {
        *self.html.lock().unwrap() = html.into();
    }

    /// Broadcast an event to current subscribers.
    pub fn emit(&self, event: PageEvent) {
        let _ = self.events.send(event);
    }

    /// Number of live subscriptions.
    pub fn subscribers(&self) -> usize {
        self.events.receiver_count()
    }

    /// Number of snapshots taken so far.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LivePage for ScriptedPage {
    fn url(&self) -> Url {
        self.url.clone()
    }

    async fn snapshot(&self) -> Result<String> {
        let taken = self.snapshots.fetch_add(1, Ordering::SeqCst);
        if self.stall_after.is_some_and(|answered| taken >= answered) {
            std::future::pending::<()>().await;
        }
        if self.fail_snapshots {
            return Err(Error::Snapshot("page detached".to_string()));
        }
        Ok(self.html.lock().unwrap().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }
}
