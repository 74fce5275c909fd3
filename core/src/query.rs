use crate::index::OrderedIndex;
use crate::tokenizer::tokenize;
use nalgebra::DVector;
use std::collections::HashSet;

/// Presence vector over the full vocabulary: 1 where the query mentions the term.
#[derive(Debug, Clone)]
pub struct QueryVector {
    vector: DVector<f64>,
    matched: usize,
}

impl QueryVector {
    pub fn new(query: &str, terms: &OrderedIndex) -> Self {
        let tokens: HashSet<String> = tokenize(query).collect();
        let mut vector = DVector::zeros(terms.len());
        let mut matched = 0;
        for (pos, term) in terms.iter() {
            if tokens.contains(term) {
                vector[pos] = 1.0;
                matched += 1;
            }
        }
        Self { vector, matched }
    }

    /// False when every query token is a stop word or outside the vocabulary.
    pub fn is_eligible(&self) -> bool { self.matched > 0 }

    pub fn matched_terms(&self) -> usize { self.matched }

    pub fn as_vector(&self) -> &DVector<f64> { &self.vector }
}
