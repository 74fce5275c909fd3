//! The built model and per-query orchestration.

use crate::corpus::{SnippetSource, DEFAULT_CONTEXT_WORDS};
use crate::factorize::{Factorization, Factorizer};
use crate::query::QueryVector;
use crate::rank::{top_n, SimilarityRanker};
use crate::truncate::truncate;
use crate::weighting::term_document_matrix;
use crate::{InvertedIndex, Result};
use nalgebra::DMatrix;
use serde::Serialize;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub top_n: usize,
    pub context_words: usize,
}

impl Default for SearchConfig {
    fn default() -> Self { Self { top_n: DEFAULT_TOP_N, context_words: DEFAULT_CONTEXT_WORDS } }
}

/// Index, weighted matrix and truncated factors, built once and read-only afterwards.
pub struct LsiModel {
    index: InvertedIndex,
    matrix: DMatrix<f64>,
    factors: Factorization,
    rank: usize,
    ranker: SimilarityRanker,
}

impl LsiModel {
    /// Weights, decomposes and truncates to `k` (`None` keeps full rank).
    pub fn build<F: Factorizer + ?Sized>(index: InvertedIndex, k: Option<usize>, factorizer: &F) -> Result<Self> {
        let matrix = term_document_matrix(&index)?;
        let mut factors = factorizer.decompose(&matrix)?;
        let rank = truncate(&mut factors, k);
        let ranker = SimilarityRanker::new(&factors, &matrix);
        tracing::info!(
            num_terms = index.num_terms(),
            num_docs = index.num_docs(),
            full_rank = factors.rank(),
            rank,
            "model ready"
        );
        Ok(Self { index, matrix, factors, rank, ranker })
    }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn matrix(&self) -> &DMatrix<f64> { &self.matrix }

    pub fn factorization(&self) -> &Factorization { &self.factors }

    /// Rank in effect after truncation.
    pub fn rank(&self) -> usize { self.rank }

    pub fn vectorize(&self, query: &str) -> QueryVector { QueryVector::new(query, self.index.terms()) }

    /// Scores by document position.
    pub fn scores(&self, query: &QueryVector) -> Vec<Option<f64>> { self.ranker.scores(query) }

    /// Ranked hits without snippets.
    pub fn search(&self, query: &str, top: usize) -> QueryOutcome {
        self.search_with(query, top, |_| None)
    }

    fn search_with<S>(&self, query: &str, top: usize, mut snippet: S) -> QueryOutcome
    where
        S: FnMut(&str) -> Option<String>,
    {
        let vector = self.vectorize(query);
        if !vector.is_eligible() {
            tracing::debug!(query, "no vocabulary terms in query");
            return QueryOutcome::NoMatchingTerms;
        }
        let scores = self.scores(&vector);
        let docs = self.index.documents();
        let hits = top_n(&scores, top)
            .into_iter()
            .enumerate()
            .filter_map(|(i, r)| {
                let document = docs.name(r.position)?.to_string();
                let snippet = snippet(&document);
                Some(SearchHit { rank: i + 1, document, score: r.score, snippet })
            })
            .collect::<Vec<_>>();
        tracing::debug!(query, matched_terms = vector.matched_terms(), hits = hits.len(), "ranked query");
        QueryOutcome::Ranked(RankedList { requested: top, available: docs.len(), hits })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub document: String,
    pub score: f64,
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedList {
    pub requested: usize,
    /// Corpus size
    pub available: usize,
    pub hits: Vec<SearchHit>,
}

impl RankedList {
    /// Fewer hits than asked for, either because the corpus is smaller or
    /// because the remaining documents had no defined score.
    pub fn is_short(&self) -> bool { self.hits.len() < self.requested }

    /// Ranking ran out of scorable documents before `min(requested, available)`.
    pub fn stopped_early(&self) -> bool { self.hits.len() < self.requested.min(self.available) }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Every query token was a stop word or outside the vocabulary
    NoMatchingTerms,
    Ranked(RankedList),
}

/// Runs queries against a model and attaches excerpts from the corpus.
pub struct QueryOrchestrator<'a, S: SnippetSource + ?Sized> {
    model: &'a LsiModel,
    snippets: &'a S,
    config: SearchConfig,
}

impl<'a, S: SnippetSource + ?Sized> QueryOrchestrator<'a, S> {
    pub fn new(model: &'a LsiModel, snippets: &'a S, config: SearchConfig) -> Self {
        Self { model, snippets, config }
    }

    pub fn handle(&self, query: &str) -> QueryOutcome {
        let words = self.config.context_words;
        self.model.search_with(query, self.config.top_n, |doc| self.snippets.snippet(doc, words))
    }
}
