//! Query/document similarity over the truncated factors, and top-N selection.
//!
//! A document's representation is its column of `U·Σ·Vᵗ`, a full term-space
//! vector. The score is
//!
//! ```text
//! dot(q, d) / (‖Uᵗq‖ · ‖Uᵗd‖)
//! ```
//!
//! The numerator uses the term-space vectors while the norms are taken in
//! concept space. The textbook LSI cosine projects both vectors before the
//! dot product; this one does not.

use crate::factorize::Factorization;
use crate::query::QueryVector;
use nalgebra::{DMatrix, DVector};

/// Document vectors and their concept-space norms, computed once from the
/// truncated factors.
#[derive(Debug, Clone)]
pub struct SimilarityRanker {
    u_t: DMatrix<f64>,
    documents: DMatrix<f64>,
    /// `None` for documents that can never be scored
    doc_norms: Vec<Option<f64>>,
    query_tolerance: f64,
}

impl SimilarityRanker {
    /// `matrix` is the term-document matrix the factors came from. A document
    /// whose column is all zero has no indexed terms and stays unscored even
    /// though its reconstruction carries rounding noise.
    pub fn new(factors: &Factorization, matrix: &DMatrix<f64>) -> Self {
        let u_t = factors.u.transpose();
        let documents = factors.reconstruct();
        let scale = matrix.nrows().max(matrix.ncols()) as f64 * f64::EPSILON;
        let sigma_max = factors.singular_values().max();
        let doc_tolerance = scale * sigma_max;
        let doc_norms = documents
            .column_iter()
            .zip(matrix.column_iter())
            .map(|(d, original)| {
                if original.iter().all(|w| *w == 0.0) {
                    return None;
                }
                let norm = (&u_t * d).norm();
                (norm > doc_tolerance).then_some(norm)
            })
            .collect();
        Self { u_t, documents, doc_norms, query_tolerance: scale }
    }

    pub fn num_documents(&self) -> usize { self.documents.ncols() }

    /// `U·Σ·V[c,:]ᵗ` for document position `c`.
    pub fn document_vector(&self, c: usize) -> DVector<f64> { self.documents.column(c).into_owned() }

    /// One score per document position; `None` where the score is undefined.
    pub fn scores(&self, query: &QueryVector) -> Vec<Option<f64>> {
        let q = query.as_vector();
        let q_norm = (&self.u_t * q).norm();
        if q_norm <= self.query_tolerance {
            return vec![None; self.num_documents()];
        }
        (0..self.num_documents())
            .map(|c| {
                let d_norm = self.doc_norms[c]?;
                similarity(q.dot(&self.document_vector(c)), q_norm, d_norm)
            })
            .collect()
    }
}

fn similarity(dot: f64, q_norm: f64, d_norm: f64) -> Option<f64> {
    let denominator = q_norm * d_norm;
    if denominator == 0.0 {
        return None;
    }
    let score = dot / denominator;
    score.is_finite().then_some(score)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Document position (matrix column)
    pub position: usize,
    pub score: f64,
}

/// Repeatedly take the best remaining defined score. Ties go to the lower
/// position. Stops at `min(requested, scores.len())` or when nothing defined
/// is left.
pub fn top_n(scores: &[Option<f64>], requested: usize) -> Vec<Ranked> {
    let wanted = requested.min(scores.len());
    let mut remaining = scores.to_vec();
    let mut ranked = Vec::with_capacity(wanted);
    while ranked.len() < wanted {
        let mut best: Option<Ranked> = None;
        for (position, score) in remaining.iter().enumerate() {
            let Some(score) = *score else { continue };
            if best.map_or(true, |b| score > b.score) {
                best = Some(Ranked { position, score });
            }
        }
        let Some(best) = best else { break };
        remaining[best.position] = None;
        ranked.push(best);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factorize::{Factorizer, SvdFactorizer};
    use crate::index::OrderedIndex;
    use crate::truncate::truncate;

    #[test]
    fn top_n_orders_by_score_and_breaks_ties_by_position() {
        let scores = [Some(0.2), Some(0.9), Some(0.2), Some(0.5)];
        let ranked = top_n(&scores, 3);
        let positions: Vec<usize> = ranked.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 3, 0]);
    }

    #[test]
    fn top_n_clamps_to_corpus_size() {
        let scores = [Some(0.1), Some(0.3)];
        assert_eq!(top_n(&scores, 10).len(), 2);
        assert!(top_n(&scores, 0).is_empty());
    }

    #[test]
    fn top_n_stops_at_undefined_scores() {
        let scores = [None, Some(-0.4), None];
        let ranked = top_n(&scores, 3);
        assert_eq!(ranked, vec![Ranked { position: 1, score: -0.4 }]);
    }

    #[test]
    fn undefined_when_denominator_is_zero() {
        assert_eq!(similarity(1.0, 0.0, 2.0), None);
        assert_eq!(similarity(0.0, 1.0, 0.0), None);
        assert_eq!(similarity(3.0, 1.0, 2.0), Some(1.5));
    }

    #[test]
    fn identity_factors_give_cosine_on_unit_documents() {
        // M = I: every document is its own term
        let m = DMatrix::<f64>::identity(3, 3);
        let f = SvdFactorizer::default().decompose(&m).unwrap();
        let ranker = SimilarityRanker::new(&f, &m);
        let vocab = OrderedIndex::from_names(["a", "b", "c"].map(String::from));
        let scores = ranker.scores(&QueryVector::new("b", &vocab));
        assert!(scores[0].unwrap().abs() < 1e-9);
        assert!((scores[1].unwrap() - 1.0).abs() < 1e-9);
        assert!(scores[2].unwrap().abs() < 1e-9);
    }

    #[test]
    fn rank_zero_makes_every_score_undefined() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut f = SvdFactorizer::default().decompose(&m).unwrap();
        truncate(&mut f, Some(0));
        let ranker = SimilarityRanker::new(&f, &m);
        let vocab = OrderedIndex::from_names(["a", "b"].map(String::from));
        let scores = ranker.scores(&QueryVector::new("a b", &vocab));
        assert!(scores.iter().all(Option::is_none));
        assert!(top_n(&scores, 5).is_empty());
    }

    #[test]
    fn document_vectors_reconstruct_columns_at_full_rank() {
        let m = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 2.0, 1.0, 0.0, 3.0]);
        let f = SvdFactorizer::default().decompose(&m).unwrap();
        let ranker = SimilarityRanker::new(&f, &m);
        assert_eq!(ranker.num_documents(), 2);
        for c in 0..2 {
            let d = ranker.document_vector(c);
            assert_eq!(d.len(), 3);
            assert!((d - m.column(c)).amax() < 1e-9);
        }
    }

    #[test]
    fn empty_document_column_is_never_scored() {
        // middle document has no indexed terms
        let m = DMatrix::from_row_slice(3, 3, &[
            1.0, 0.0, 0.0,
            1.0, 0.0, 1.0,
            0.0, 0.0, 1.0,
        ]);
        let f = SvdFactorizer::default().decompose(&m).unwrap();
        let ranker = SimilarityRanker::new(&f, &m);
        let vocab = OrderedIndex::from_names(["a", "b", "c"].map(String::from));
        for query in ["a", "b", "c", "a b c"] {
            let scores = ranker.scores(&QueryVector::new(query, &vocab));
            assert_eq!(scores[1], None, "query {query:?}");
            assert!(top_n(&scores, 3).iter().all(|r| r.position != 1));
        }
    }
}
