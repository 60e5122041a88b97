//! Backing stores the index reads documents from and writes documents to.

pub mod fs;
pub mod memory;

use std::sync::Arc;

use crate::error::{Error, Result};

pub use fs::FsStore;
pub use memory::MemoryStore;

/// One listed entry: the document id and its raw bytes,
/// or the per-document read failure.
#[derive(Debug)]
pub struct RawDocument {
    pub id: String,
    pub bytes: Result<Vec<u8>>,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { id: id.into(), bytes: Ok(bytes) }
    }
}

/// Document source
/// Anything that can enumerate named text blobs and persist new ones.
///
/// `list` should return entries in a stable order; the index sorts by id
/// regardless, so ordering here only affects which duplicate id wins
/// (the later one).
pub trait DocumentSource {
    /// Enumerate every stored document.
    ///
    /// # Errors
    /// * `Error::StoreList` - the store could not be enumerated at all.
    ///   Per-document failures belong inside the entry instead.
    fn list(&self) -> Result<Vec<RawDocument>>;

    /// Store `bytes` under `id`, replacing any previous content.
    ///
    /// # Errors
    /// * `Error::InvalidId`, `Error::StoreWrite`
    fn write(&self, id: &str, bytes: &[u8]) -> Result<()>;
}

impl<S> DocumentSource for Arc<S>
where
    S: DocumentSource + ?Sized,
{
    fn list(&self) -> Result<Vec<RawDocument>> {
        (**self).list()
    }

    fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        (**self).write(id, bytes)
    }
}

impl<S> DocumentSource for &S
where
    S: DocumentSource + ?Sized,
{
    fn list(&self) -> Result<Vec<RawDocument>> {
        (**self).list()
    }

    fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        (**self).write(id, bytes)
    }
}

/// Reject ids that cannot name a single stored document
/// (empty, `.`/`..`, path separators, NUL).
pub fn validate_id(id: &str) -> Result<()> {
    let reason = if id.trim().is_empty() {
        "id is empty"
    } else if id == "." || id == ".." {
        "id is a relative path component"
    } else if id.contains(['/', '\\']) {
        "id contains a path separator"
    } else if id.contains('\0') {
        "id contains a NUL byte"
    } else {
        return Ok(());
    };
    Err(Error::InvalidId { id: id.to_string(), reason })
}
