use rs_article_extract::extractor::heuristic::{best_element, extract_by_heuristic};
use rs_article_extract::{dom, Classifier, QualityGate};

fn prose(len: usize, marker: &str) -> String {
    let mut text = format!("{marker} ");
    while text.chars().count() < len {
        text.push_str("storm drains overflowed along the harbour road ");
    }
    text.chars().take(len).collect::<String>().trim_end().to_string()
}

#[test]
fn scenario_div_with_direct_text_wins_over_short_paragraphs() {
    let classifier = Classifier::default();
    let gate = QualityGate::new(250, &classifier);
    let direct = prose(400, "DIRECT");
    let html = format!(
        "<html><body><div id=\"story\">{direct}<p>First short one.</p><p>Second short.</p><p>Third bit.</p></div></body></html>"
    );
    let doc = dom::parse(&html);

    let best = best_element(&doc, &gate).unwrap();
    assert_eq!(best.node.attr("id").as_deref(), Some("story"));
    assert!(best.text.starts_with("DIRECT"));
    assert!(best.text.contains("Third bit."));
    let children = ["First short one.", "Second short.", "Third bit."]
        .iter()
        .map(|t| t.len() as i64)
        .sum::<i64>();
    assert_eq!(best.score, dom::text_len(&best.text) as i64 - children);
}

#[test]
fn wrapper_layers_lose_to_the_text_holder() {
    let classifier = Classifier::default();
    let gate = QualityGate::new(250, &classifier);
    let html = format!(
        "<html><body><main><section><div class=\"wrap\"><div id=\"holder\">{}</div></div></section></main></body></html>",
        prose(600, "HOLDER")
    );
    let doc = dom::parse(&html);

    let best = best_element(&doc, &gate).unwrap();
    assert_eq!(best.node.attr("id").as_deref(), Some("holder"));
}

#[test]
fn strictly_greater_score_wins_and_ties_keep_document_order() {
    let classifier = Classifier::default();
    let gate = QualityGate::new(250, &classifier);
    let html = format!(
        "<html><body><div id=\"a\">{}</div><div id=\"b\">{}</div><div id=\"c\">{}</div></body></html>",
        prose(300, "A"),
        prose(500, "B"),
        prose(500, "C")
    );
    let doc = dom::parse(&html);

    let best = best_element(&doc, &gate).unwrap();
    assert_eq!(best.node.attr("id").as_deref(), Some("b"));
}

#[test]
fn noise_containers_never_win() {
    let classifier = Classifier::default();
    let gate = QualityGate::new(250, &classifier);
    let html = format!(
        "<html><body><aside>{}</aside><div class=\"comments\">{}</div><div id=\"body\">{}</div></body></html>",
        prose(900, "ASIDE"),
        prose(900, "COMMENTS"),
        prose(300, "BODY")
    );
    let doc = dom::parse(&html);

    assert!(extract_by_heuristic(&doc, &gate).starts_with("BODY"));
}

#[test]
fn nothing_long_enough_yields_empty() {
    let classifier = Classifier::default();
    let gate = QualityGate::new(250, &classifier);
    let doc = dom::parse("<html><body><div>short</div><p>also short</p></body></html>");

    assert_eq!(extract_by_heuristic(&doc, &gate), "");
}
