//! Performance benchmarks for rs-article-extract.
//!
//! Run with: `cargo bench`
//!
//! Each document is built so a different strategy accepts it, which shows
//! the cost of falling further down the chain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_article_extract::{dom, extract, extractor, Options};

const SENTENCE: &str =
    "The regional transit authority approved a revised timetable after months of public hearings. ";

fn heuristic_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Transit</title></head>
<body>
    <nav><a href="/">Home</a><a href="/about">About</a></nav>
    <div class="story">{}</div>
    <aside><h3>Related</h3><ul><li>One</li><li>Two</li></ul></aside>
    <footer><p>Copyright 2024</p></footer>
</body>
</html>"#,
        SENTENCE.repeat(8)
    )
}

fn paragraph_page() -> String {
    let sections: String = (0..12)
        .map(|_| format!("<section><p>{SENTENCE}</p></section>"))
        .collect();
    format!("<html><body><nav>Menu</nav>{sections}</body></html>")
}

fn shadow_page() -> String {
    format!(
        r#"<html><body><news-story><template shadowrootmode="open">
            <p>{}</p><div><template shadowrootmode="open"><p>{}</p></template></div>
        </template></news-story></body></html>"#,
        SENTENCE.repeat(4),
        SENTENCE.repeat(4)
    )
}

fn bench_extract_default(c: &mut Criterion) {
    let html = heuristic_page();
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(&html)));
    });
}

fn bench_chain_depth(c: &mut Criterion) {
    let options = Options::default();
    let pages = [
        ("heuristic", heuristic_page()),
        ("paragraphs", paragraph_page()),
        ("shadow_dom", shadow_page()),
    ];

    let mut group = c.benchmark_group("chain_depth");
    for (name, html) in &pages {
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("run_chain", name), html, |b, html| {
            b.iter(|| {
                let doc = dom::parse(black_box(html));
                extractor::run_chain(&doc, &options)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract_default, bench_chain_depth);
criterion_main!(benches);
