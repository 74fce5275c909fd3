use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LsiError {
    /// Corpus document or stop list could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Term is not in the vocabulary, so it has no IDF
    #[error("no such term: {0}")]
    UnknownTerm(String),
    #[error("no such document: {0}")]
    UnknownDocument(String),
    #[error("duplicate document name: {0}")]
    DuplicateDocument(String),
    #[error("corpus has no indexable terms or no documents")]
    EmptyCorpus,
    #[error("matrix decomposition failed: {0}")]
    Decomposition(String),
}

pub type Result<T> = std::result::Result<T, LsiError>;
