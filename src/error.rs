//! Error kinds of the document store.
//!
//! Only `StoreWrite`, `StoreList`, `StoreOpen`, `InvalidId` and `Config` ever
//! reach a caller. `EmptyCorpus` stays inside [`Index::load`](crate::Index::load)
//! and `StoreRead` is substituted with empty text per document.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// fit was attempted on zero usable documents
    #[error("cannot fit a vectorizer on an empty corpus")]
    EmptyCorpus,

    /// a single document could not be read from the backing store
    #[error("failed to read document '{id}': {source}")]
    StoreRead {
        id: String,
        source: std::io::Error,
    },

    /// the backing store could not be enumerated at all
    #[error("failed to list documents: {source}")]
    StoreList {
        source: std::io::Error,
    },

    /// the backing store could not be opened or created
    #[error("failed to open document store at '{path}': {source}")]
    StoreOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// a document could not be written; the index is not reloaded
    #[error("failed to write document '{id}': {source}")]
    StoreWrite {
        id: String,
        source: std::io::Error,
    },

    /// the id cannot name a stored document
    #[error("invalid document id '{id}': {reason}")]
    InvalidId {
        id: String,
        reason: &'static str,
    },

    #[error("invalid configuration: {reason}")]
    Config {
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_document() {
        let err = Error::StoreWrite {
            id: "a.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write document 'a.txt': denied");

        let err = Error::InvalidId { id: "../x".to_string(), reason: "contains a path separator" };
        assert!(err.to_string().contains("../x"));
    }
}
