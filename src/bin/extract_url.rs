//! Fetch a URL and run the full retrieval escalation on it.
//!
//! The fetched HTML stands in for the live page. Prints the report as JSON.
//!
//! Usage: `extract_url <url> [wait-seconds]`
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

use std::env;
use std::time::Duration;

use rs_article_extract::{Escalator, FetchRequest, Fetcher, HttpFetcher, Options, StaticPage};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(raw_url) = args.next() else {
        eprintln!("usage: extract_url <url> [wait-seconds]");
        std::process::exit(2);
    };
    let url = match Url::parse(&raw_url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("invalid URL {raw_url:?}: {e}");
            std::process::exit(2);
        }
    };

    let mut options = Options::default();
    if let Some(secs) = args.next().and_then(|s| s.parse::<u64>().ok()) {
        options.wait_timeout = Duration::from_secs(secs);
    }

    let fetcher = match HttpFetcher::new(&options) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    // Without a browser, the page as served is the best available live DOM
    let html = fetcher
        .fetch(&FetchRequest::new(url.clone()).with_referrer(&options.referrer))
        .await
        .unwrap_or_default();
    let page = StaticPage::new(url, html);

    let escalator = Escalator::new(fetcher, options);
    let report = escalator.extract(&page).await;

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize report: {e}");
            std::process::exit(1);
        }
    }
}
