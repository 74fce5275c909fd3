//! TF-IDF weights and the dense term-document matrix.

use crate::{InvertedIndex, LsiError, Result};
use nalgebra::DMatrix;

/// `1 + log10(count)`, or 0 when the term does not occur in the document.
pub fn tf(index: &InvertedIndex, term: &str, doc: &str) -> f64 {
    match index.raw_count(term, doc) {
        0 => 0.0,
        count => 1.0 + f64::from(count).log10(),
    }
}

/// `1 + log10(N) - log10(df)`. Terms outside the vocabulary have no IDF.
pub fn idf(index: &InvertedIndex, term: &str) -> Result<f64> {
    match index.document_frequency(term) {
        0 => Err(LsiError::UnknownTerm(term.to_string())),
        df => Ok(1.0 + (index.num_docs() as f64).log10() - f64::from(df).log10()),
    }
}

pub fn weight(index: &InvertedIndex, term: &str, doc: &str) -> Result<f64> {
    Ok(tf(index, term, doc) * idf(index, term)?)
}

/// Rows follow vocabulary order, columns follow document order.
pub fn term_document_matrix(index: &InvertedIndex) -> Result<DMatrix<f64>> {
    let mut matrix = DMatrix::zeros(index.num_terms(), index.num_docs());
    for (row, term) in index.terms().iter() {
        let idf = idf(index, term)?;
        for (col, doc) in index.documents().iter() {
            matrix[(row, col)] = tf(index, term, doc) * idf;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StopList;

    const EPS: f64 = 1e-3;

    fn pets() -> InvertedIndex {
        let docs = vec![("doc1", "cat dog"), ("doc2", "cat bird"), ("doc3", "dog dog bird")];
        InvertedIndex::build(docs, &StopList::new()).unwrap()
    }

    #[test]
    fn tf_is_zero_for_absent_term() {
        let idx = pets();
        assert_eq!(tf(&idx, "bird", "doc1"), 0.0);
        assert_eq!(tf(&idx, "unicorn", "doc1"), 0.0);
        assert_eq!(tf(&idx, "cat", "doc1"), 1.0);
    }

    #[test]
    fn pets_scenario_values() {
        let idx = pets();
        assert!((idf(&idx, "dog").unwrap() - 1.176).abs() < EPS);
        assert!((tf(&idx, "dog", "doc3") - 1.301).abs() < EPS);
        assert!((weight(&idx, "dog", "doc3").unwrap() - 1.531).abs() < EPS);

        let m = term_document_matrix(&idx).unwrap();
        assert_eq!(m.shape(), (3, 3));
        let row = idx.terms().position("dog").unwrap();
        let col = idx.documents().position("doc3").unwrap();
        assert_eq!((row, col), (2, 2));
        assert!((m[(row, col)] - 1.531).abs() < EPS);
        assert_eq!(m[(idx.terms().position("bird").unwrap(), 0)], 0.0);
    }

    #[test]
    fn idf_is_one_when_term_is_everywhere() {
        let docs = vec![("a", "x y"), ("b", "x"), ("c", "x x z")];
        let idx = InvertedIndex::build(docs, &StopList::new()).unwrap();
        assert!((idf(&idx, "x").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_term_is_an_error_not_zero() {
        let idx = pets();
        assert!(matches!(idf(&idx, "unicorn"), Err(LsiError::UnknownTerm(t)) if t == "unicorn"));
        assert!(weight(&idx, "unicorn", "doc1").is_err());
    }
}
