use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::{error::Result, store::{validate_id, DocumentSource, RawDocument}};

/// In-process document store, ids kept in lexicographic order
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `(id, text)` pairs
    pub fn with_documents<I, K, V>(docs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let docs = docs
            .into_iter()
            .map(|(id, text)| (id.into(), text.into()))
            .collect();
        Self { docs: Mutex::new(docs) }
    }

    /// Delete a document at the storage layer; the index observes it on the next load
    pub fn remove(&self, id: &str) -> Option<Vec<u8>> {
        self.docs.lock().remove(id)
    }

    pub fn len(&self) -> usize {
        self.docs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.lock().is_empty()
    }
}

impl DocumentSource for MemoryStore {
    fn list(&self) -> Result<Vec<RawDocument>> {
        Ok(self
            .docs
            .lock()
            .iter()
            .map(|(id, bytes)| RawDocument::new(id.clone(), bytes.clone()))
            .collect())
    }

    fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        validate_id(id)?;
        self.docs.lock().insert(id.to_string(), bytes.to_vec());
        Ok(())
    }
}
