//! Local extraction chain.
//!
//! Heuristic scoring, structured data, paragraph aggregation and the shadow
//! walker run in that order against one document. The quality gate is
//! applied after each; the first accepted candidate ends the chain.

use dom_query::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::heuristic::extract_by_heuristic;
use super::paragraphs::aggregate_paragraphs;
use super::shadow::extract_from_shadow_roots;
use super::structured::extract_structured;
use super::QualityGate;
use crate::dom::{self, text_len};
use crate::{Options, Strategy};

/// Accepted output of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extracted {
    /// Gated text.
    pub text: String,
    /// Strategy that produced it.
    pub strategy: Strategy,
}

/// One strategy's result as seen by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Strategy that ran.
    pub strategy: Strategy,
    /// Candidate length in characters.
    pub len: usize,
    /// Whether the gate accepted it.
    pub accepted: bool,
}

/// Everything one pass of the chain produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainOutcome {
    /// First accepted candidate, if any.
    pub accepted: Option<Extracted>,
    /// Candidates in the order the strategies ran.
    pub candidates: Vec<Candidate>,
}

impl ChainOutcome {
    /// Length of the longest candidate, accepted or not.
    #[must_use]
    pub fn best_len(&self) -> usize {
        self.candidates.iter().map(|c| c.len).max().unwrap_or(0)
    }
}

/// Run every strategy in order until one passes the gate.
///
/// The heuristic step removes noise from `doc` in place; later strategies
/// see the filtered tree.
#[must_use]
pub fn run_chain(doc: &Document, options: &Options) -> ChainOutcome {
    let gate = QualityGate::from_options(options);
    let mut outcome = ChainOutcome::default();

    let strategies: [(Strategy, &dyn Fn() -> String); 4] = [
        (Strategy::Heuristic, &|| extract_by_heuristic(doc, &gate)),
        (Strategy::Structured, &|| extract_structured(doc, &gate)),
        (Strategy::Paragraphs, &|| aggregate_paragraphs(doc, &options.classifier)),
        (Strategy::ShadowDom, &|| extract_from_shadow_roots(doc, &gate)),
    ];

    for (strategy, run) in strategies {
        let text = run();
        let len = text_len(&text);
        let accepted = gate.accepts(&text);
        debug!(?strategy, len, accepted, "strategy finished");
        outcome.candidates.push(Candidate {
            strategy,
            len,
            accepted,
        });

        if accepted {
            info!(?strategy, len, "article text accepted");
            outcome.accepted = Some(Extracted { text, strategy });
            break;
        }
    }

    outcome
}

/// Accepted text from a document, if any strategy produced one.
#[must_use]
pub fn extract_from_document(doc: &Document, options: &Options) -> Option<Extracted> {
    run_chain(doc, options).accepted
}

/// Parse HTML and run the chain over it.
#[must_use]
pub fn extract_from_html(html: &str, options: &Options) -> Option<Extracted> {
    let doc = dom::parse(html);
    extract_from_document(&doc, options)
}
