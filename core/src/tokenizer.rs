use crate::{LsiError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Split text on whitespace and lowercase each token. No normalization, no stemming.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}

/// Case-insensitive set of words excluded from indexing.
#[derive(Debug, Clone, Default)]
pub struct StopList {
    words: HashSet<String>,
}

impl StopList {
    pub fn new() -> Self { Self::default() }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line; surrounding whitespace and blank lines are ignored.
    pub fn parse(text: &str) -> Self { Self::from_words(text.lines()) }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LsiError::Io { path: path.to_path_buf(), source })?;
        let list = Self::parse(&String::from_utf8_lossy(&bytes));
        tracing::debug!(path = %path.display(), words = list.len(), "loaded stop list");
        Ok(list)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}
