use crate::{LsiError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_CONTEXT_WORDS: usize = 15;

#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub content: String,
}

/// Every document of one corpus directory, read eagerly.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub root: PathBuf,
    pub documents: Vec<Document>,
}

impl Corpus {
    /// Reads the regular, non-hidden files directly under `root`, sorted by name.
    /// Any unreadable entry fails the whole load; invalid UTF-8 does not.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let mut documents = Vec::new();
        let walker = WalkDir::new(root).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                LsiError::Io { path, source: e.into() }
            })?;
            if !entry.file_type().is_file() { continue; }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') { continue; }
            let bytes = fs::read(entry.path())
                .map_err(|source| LsiError::Io { path: entry.path().to_path_buf(), source })?;
            // undecodable bytes become U+FFFD rather than failing the load
            let content = String::from_utf8_lossy(&bytes).into_owned();
            documents.push(Document { name, content });
        }
        tracing::info!(root = %root.display(), num_docs = documents.len(), "loaded corpus");
        Ok(Self { root: root.to_path_buf(), documents })
    }

    pub fn from_documents<I, N, C>(documents: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let documents = documents
            .into_iter()
            .map(|(name, content)| Document { name: name.into(), content: content.into() })
            .collect();
        Self { root: PathBuf::new(), documents }
    }

    /// `(name, content)` pairs suitable for [`crate::InvertedIndex::build`].
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents.iter().map(|d| (d.name.as_str(), d.content.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }
}

/// Supplies the short excerpt printed under each ranked document.
pub trait SnippetSource {
    fn snippet(&self, document: &str, words: usize) -> Option<String>;
}

impl SnippetSource for Corpus {
    fn snippet(&self, document: &str, words: usize) -> Option<String> {
        let doc = self.get(document)?;
        Some(doc.content.split_whitespace().take(words).collect::<Vec<_>>().join(" "))
    }
}
