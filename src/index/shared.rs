use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::{
    error::Result,
    index::{scoring::Hits, Index},
    store::DocumentSource,
    vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine},
};

/// Thread-safe handle to an [`Index`]
///
/// The whole index (documents, vectorizer, matrix) sits behind one `RwLock`:
/// `load` and `add_document` take the write lock for the full write-then-rebuild,
/// queries share the read lock. A reader therefore always sees a consistent triple,
/// and concurrent adds serialize (last write wins) before their reloads.
///
/// Cloning is cheap and yields another handle to the same index.
#[derive(Debug)]
pub struct SharedIndex<S, E = DefaultTFIDFEngine>
where
    S: DocumentSource,
    E: TFIDFEngine,
{
    inner: Arc<RwLock<Index<S, E>>>,
}

impl<S, E> Clone for SharedIndex<S, E>
where
    S: DocumentSource,
    E: TFIDFEngine,
{
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S, E> SharedIndex<S, E>
where
    S: DocumentSource,
    E: TFIDFEngine,
{
    pub fn new(index: Index<S, E>) -> Self {
        Self { inner: Arc::new(RwLock::new(index)) }
    }

    pub fn load(&self) -> Result<()> {
        self.inner.write().load()
    }

    pub fn add_document(&self, id: &str, text: &str) -> Result<()> {
        self.inner.write().add_document(id, text)
    }

    pub fn query(&self, text: &str, k: Option<usize>) -> Hits {
        self.inner.read().query(text, k)
    }

    /// Read access to the current state; holds off writers while alive
    pub fn read(&self) -> RwLockReadGuard<'_, Index<S, E>> {
        self.inner.read()
    }
}

impl<S, E> From<Index<S, E>> for SharedIndex<S, E>
where
    S: DocumentSource,
    E: TFIDFEngine,
{
    fn from(index: Index<S, E>) -> Self {
        Self::new(index)
    }
}
