//! Simple CLI that reads HTML from stdin and outputs JSON to stdout.
//!
//! Runs only the local extraction chain; no network access.

use rs_article_extract::{extract, Strategy};
use serde::Serialize;
use std::io::{self, Read};

#[derive(Serialize)]
struct Output {
    strategy: Option<Strategy>,
    main_content: String,
}

fn main() {
    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let output = match extract(&html) {
        Some(extracted) => Output {
            strategy: Some(extracted.strategy),
            main_content: extracted.text,
        },
        None => Output {
            strategy: None,
            main_content: String::new(),
        },
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
