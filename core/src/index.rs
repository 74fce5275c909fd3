use crate::tokenizer::{tokenize, StopList};
use crate::{LsiError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Lexicographically ordered names with fixed positions.
///
/// Term positions are matrix rows and document positions are matrix columns.
/// The order is materialized once and every later stage indexes through it.
#[derive(Debug, Clone, Default)]
pub struct OrderedIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl OrderedIndex {
    /// Sorts and deduplicates `names`.
    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        let names: Vec<String> = names.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let positions = names.iter().enumerate().map(|(pos, name)| (name.clone(), pos)).collect();
        Self { names, positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> { self.positions.get(name).copied() }

    pub fn name(&self, pos: usize) -> Option<&str> { self.names.get(pos).map(String::as_str) }

    pub fn len(&self) -> usize { self.names.len() }

    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    pub fn names(&self) -> &[String] { &self.names }

    /// `(position, name)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}

/// term -> (document -> raw occurrence count)
pub type Postings = BTreeMap<String, BTreeMap<String, u32>>;

#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    terms: OrderedIndex,
    df: Vec<u32>,
    docs: OrderedIndex,
    doc_lengths: Vec<u32>,
    postings: Postings,
}

impl InvertedIndex {
    /// Index every `(name, content)` pair in one pass.
    pub fn build<I, N, C>(documents: I, stop: &StopList) -> Result<Self>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: AsRef<str>,
    {
        let mut builder = IndexBuilder::new(stop);
        for (name, content) in documents {
            builder.add_document(name, content.as_ref())?;
        }
        Ok(builder.finish())
    }

    pub fn terms(&self) -> &OrderedIndex { &self.terms }

    pub fn documents(&self) -> &OrderedIndex { &self.docs }

    pub fn postings(&self) -> &Postings { &self.postings }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    /// Number of distinct documents containing `term`; 0 when unknown.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.terms.position(&term.to_lowercase()).map_or(0, |pos| self.df[pos])
    }

    /// Token count of the document, stop words included.
    pub fn doc_length(&self, doc: &str) -> Result<u32> {
        self.docs
            .position(doc)
            .map(|pos| self.doc_lengths[pos])
            .ok_or_else(|| LsiError::UnknownDocument(doc.to_string()))
    }

    pub fn raw_count(&self, term: &str, doc: &str) -> u32 {
        self.postings
            .get(&term.to_lowercase())
            .and_then(|docs| docs.get(doc))
            .copied()
            .unwrap_or(0)
    }
}

/// Accumulates postings while scanning documents; `finish` fixes the orderings.
pub struct IndexBuilder<'a> {
    stop: &'a StopList,
    postings: Postings,
    df: BTreeMap<String, u32>,
    doc_lengths: BTreeMap<String, u32>,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(stop: &'a StopList) -> Self {
        Self { stop, postings: BTreeMap::new(), df: BTreeMap::new(), doc_lengths: BTreeMap::new() }
    }

    pub fn add_document<N: Into<String>>(&mut self, name: N, content: &str) -> Result<()> {
        let name = name.into();
        if self.doc_lengths.contains_key(&name) {
            return Err(LsiError::DuplicateDocument(name));
        }

        let mut length = 0u32;
        for token in tokenize(content) {
            // stop words still count toward document length
            length += 1;
            if self.stop.contains(&token) { continue; }
            let counts = self.postings.entry(token.clone()).or_default();
            match counts.get_mut(&name) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(name.clone(), 1);
                    *self.df.entry(token).or_insert(0) += 1;
                }
            }
        }
        tracing::trace!(doc = %name, length, "indexed document");
        self.doc_lengths.insert(name, length);
        Ok(())
    }

    pub fn finish(self) -> InvertedIndex {
        let terms = OrderedIndex::from_names(self.df.keys().cloned());
        let df = terms.iter().map(|(_, t)| self.df[t]).collect();
        let docs = OrderedIndex::from_names(self.doc_lengths.keys().cloned());
        let doc_lengths = docs.iter().map(|(_, d)| self.doc_lengths[d]).collect();
        tracing::info!(num_docs = docs.len(), num_terms = terms.len(), "built inverted index");
        InvertedIndex { terms, df, docs, doc_lengths, postings: self.postings }
    }
}
