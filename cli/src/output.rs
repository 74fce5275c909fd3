//! Rendering of query outcomes for the terminal or as JSON lines.

use lsi_core::{QueryOutcome, RankedList};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

pub const NO_MATCHING_TERMS: &str =
    "The query you entered consists entirely of stop list words or words that don't appear in any documents";

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    #[serde(flatten)]
    outcome: &'a QueryOutcome,
}

pub fn render(format: Format, query: &str, outcome: &QueryOutcome) -> String {
    match format {
        Format::Text => format_text(outcome),
        Format::Json => format_json(query, outcome),
    }
}

pub fn format_json(query: &str, outcome: &QueryOutcome) -> String {
    serde_json::to_string(&JsonOutput { query, outcome }).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_text(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::NoMatchingTerms => format!("{NO_MATCHING_TERMS}\n"),
        QueryOutcome::Ranked(list) => format_ranked(list),
    }
}

fn format_ranked(list: &RankedList) -> String {
    let mut out = String::from("\n");
    for hit in &list.hits {
        let _ = writeln!(out, "{}. Document: {}, Relevance score: {}", hit.rank, hit.document, hit.score);
        let _ = writeln!(out, "{}\n", hit.snippet.as_deref().unwrap_or(""));
    }
    if list.is_short() {
        let _ = writeln!(out, "Only {} relevant documents were there", list.hits.len());
    }
    out
}
