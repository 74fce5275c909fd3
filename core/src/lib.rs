//! Latent semantic indexing over a fixed corpus.
//!
//! Pipeline: [`InvertedIndex`] -> TF-IDF [`weighting`] -> SVD ([`Factorizer`])
//! -> rank-k [`truncate`] -> per query [`QueryVector`] -> [`rank`].

pub mod corpus;
pub mod error;
pub mod factorize;
pub mod index;
pub mod model;
pub mod query;
pub mod rank;
pub mod tokenizer;
pub mod truncate;
pub mod weighting;

pub use corpus::{Corpus, Document, SnippetSource};
pub use error::{LsiError, Result};
pub use factorize::{Factorization, Factorizer, SvdFactorizer};
pub use index::{IndexBuilder, InvertedIndex, OrderedIndex};
pub use model::{LsiModel, QueryOrchestrator, QueryOutcome, RankedList, SearchConfig, SearchHit};
pub use query::QueryVector;
pub use tokenizer::StopList;
