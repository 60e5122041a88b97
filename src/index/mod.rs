pub mod scoring;
pub mod shared;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    config::DEFAULT_TOP_K,
    error::{Error, Result},
    index::scoring::{cosine_scores, HitEntry, Hits},
    store::{validate_id, DocumentSource, RawDocument},
    utils::math::vector::ZeroSpVec,
    vectorizer::{tfidf::{DefaultTFIDFEngine, TFIDFEngine}, Vectorizer},
};

/// A stored document, text trimmed. Empty text is kept but never indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            text: text.trim().to_string(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Vectorizer and matrix only ever exist together
#[derive(Debug, Clone)]
struct Fitted<E>
where
    E: TFIDFEngine,
{
    vectorizer: Vectorizer<E>,
    /// one row per non-empty document
    matrix: Vec<ZeroSpVec<f64>>,
    /// row -> position in `documents`
    rows: Vec<usize>,
}

/// Index (document store)
/// Owns the corpus read from a [`DocumentSource`], one vectorizer fitted on it,
/// and the document-term matrix, and answers top-k cosine queries.
///
/// Every `load` is a full rebuild; `add_document` writes through to the source
/// and reloads. Documents, vectorizer and matrix are replaced together.
#[derive(Debug)]
pub struct Index<S, E = DefaultTFIDFEngine>
where
    S: DocumentSource,
    E: TFIDFEngine,
{
    source: S,
    documents: Vec<Document>,
    fitted: Option<Fitted<E>>,
    default_top_k: usize,
}

impl<S, E> Index<S, E>
where
    S: DocumentSource,
    E: TFIDFEngine,
{
    /// Create an empty, unloaded index over `source`
    pub fn new(source: S) -> Self {
        Self {
            source,
            documents: Vec::new(),
            fitted: None,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Create an index and load it immediately
    pub fn open(source: S) -> Result<Self> {
        let mut index = Self::new(source);
        index.load()?;
        Ok(index)
    }

    /// `k` used when a query passes `None`
    ///
    /// # Errors
    /// * `Error::Config` - `k` is 0
    pub fn with_default_top_k(mut self, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::Config {
                reason: "default_top_k must be at least 1".to_string(),
            });
        }
        self.default_top_k = k;
        Ok(self)
    }

    /// Re-read every document from the source and rebuild the vectorizer and matrix.
    ///
    /// Unreadable or non UTF-8 documents are kept with empty text.
    /// Duplicate ids resolve to the entry listed last.
    ///
    /// # Errors
    /// * `Error::StoreList` - the source could not be enumerated; the previous state is kept
    pub fn load(&mut self) -> Result<()> {
        let raw = self.source.list()?;
        let documents = Self::decode_all(raw);
        let fitted = Self::build(&documents);

        info!(
            documents = documents.len(),
            indexed = fitted.as_ref().map_or(0, |f| f.rows.len()),
            vocabulary = fitted.as_ref().map_or(0, |f| f.vectorizer.vocab_size()),
            "loaded document index"
        );
        self.documents = documents;
        self.fitted = fitted;
        Ok(())
    }

    fn decode_all(raw: Vec<RawDocument>) -> Vec<Document> {
        let mut by_id: IndexMap<String, String> = IndexMap::with_capacity(raw.len());
        for RawDocument { id, bytes } in raw {
            let text = match bytes {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(id = %id, error = %err, "document is not valid UTF-8, treating as empty");
                        String::new()
                    }
                },
                Err(err) => {
                    warn!(id = %id, error = %err, "failed to read document, treating as empty");
                    String::new()
                }
            };
            by_id.insert(id, text);
        }
        by_id.sort_unstable_keys();
        by_id
            .into_iter()
            .map(|(id, text)| Document::new(id, &text))
            .collect()
    }

    fn build(documents: &[Document]) -> Option<Fitted<E>> {
        let rows: Vec<usize> = documents
            .iter()
            .enumerate()
            .filter(|(_, doc)| !doc.is_empty())
            .map(|(pos, _)| pos)
            .collect();
        let texts: Vec<&str> = rows.iter().map(|&pos| documents[pos].text.as_str()).collect();
        match Vectorizer::<E>::fit_transform(&texts) {
            Ok((vectorizer, matrix)) => {
                debug_assert_eq!(matrix.len(), rows.len());
                Some(Fitted { vectorizer, matrix, rows })
            }
            // 空のコーパスは「未学習」状態として扱う
            Err(Error::EmptyCorpus) => None,
            Err(err) => {
                warn!(error = %err, "failed to fit vectorizer");
                None
            }
        }
    }

    /// Store `text` under `id` (replacing any previous document) and reload.
    ///
    /// # Errors
    /// * `Error::InvalidId` - checked before anything is written
    /// * `Error::StoreWrite` - the write failed; the index is not reloaded
    /// * `Error::StoreList` - the write succeeded but the reload could not list the source
    pub fn add_document(&mut self, id: &str, text: &str) -> Result<()> {
        validate_id(id)?;
        self.source.write(id, text.as_bytes())?;
        info!(id = %id, bytes = text.len(), "stored document");
        self.load()
    }

    /// Top-k documents by cosine similarity to `text`, best first.
    ///
    /// `k = None` uses the default (3). Returns at most the number of non-empty
    /// documents; equal scores keep document order. Never fails: with nothing
    /// to rank against the result is empty.
    pub fn query(&self, text: &str, k: Option<usize>) -> Hits {
        let k = k.unwrap_or(self.default_top_k);
        let Some(fitted) = self.fitted.as_ref() else {
            return Hits::default();
        };
        if k == 0 || self.documents.is_empty() {
            return Hits::default();
        }
        let query = fitted.vectorizer.transform(text);
        let scores = cosine_scores(&fitted.matrix, &query);
        let list = fitted
            .rows
            .iter()
            .zip(scores)
            .map(|(&pos, score)| HitEntry {
                id: self.documents[pos].id.clone(),
                score,
            })
            .collect();
        let mut hits = Hits::new(list);
        hits.sort_by_score().truncate(k);
        hits
    }

    /// Every document of the last load, empty ones included, sorted by id
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents
            .binary_search_by(|doc| doc.id.as_str().cmp(id))
            .ok()
            .map(|pos| &self.documents[pos])
    }

    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    /// Number of matrix rows (non-empty documents)
    pub fn indexed_num(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.rows.len())
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn vectorizer(&self) -> Option<&Vectorizer<E>> {
        self.fitted.as_ref().map(|f| &f.vectorizer)
    }

    /// Document-term matrix, row-aligned with the non-empty documents in `documents()` order
    pub fn matrix(&self) -> Option<&[ZeroSpVec<f64>]> {
        self.fitted.as_ref().map(|f| f.matrix.as_slice())
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
