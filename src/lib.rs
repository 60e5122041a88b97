/// This crate is a small in-memory document retrieval engine built on a TF-IDF vectorizer.
pub mod config;
pub mod error;
pub mod index;
pub mod store;
pub mod utils;
pub mod vectorizer;

/// Index (document store)
/// The top-level struct of this crate.
/// It reads every document from a `DocumentSource`, fits one `Vectorizer`
/// on the non-empty ones and answers top-k cosine similarity queries.
///
/// Internally, it holds:
/// - The documents of the last load, sorted by id
/// - The fitted vectorizer (vocabulary + IDF)
/// - The document-term matrix, one L2-normalized row per non-empty document
///
/// The vectorizer and the matrix exist together or not at all, and a `load`
/// replaces documents, vectorizer and matrix in one step.
///
/// `Index<S, E>` has the following generic parameters:
/// - `S`: Document source (e.g., `FsStore`, `MemoryStore`)
/// - `E`: TF-IDF calculation engine type (e.g., `DefaultTFIDFEngine`)
///
/// # Mutation
/// `add_document` writes through to the source and rebuilds the whole index.
/// There is no incremental update.
pub use index::{Document, Index};

/// Shared Index
/// `Index` behind a single `RwLock` for use from many threads.
/// Writes (load, add) are exclusive; queries run concurrently on a consistent snapshot.
pub use index::shared::SharedIndex;

/// Search Hits and Hit Entry structures
/// - `Hits`: ranked results, best first, printable as `<score>\t<id>` lines
/// - `HitEntry`: a single result, containing the document id and its cosine score
pub use index::scoring::{HitEntry, Hits};

/// TF-IDF Vectorizer
/// Learns a vocabulary and smoothed IDF weights from a corpus and transforms
/// text into L2-normalized sparse TF-IDF vectors over that vocabulary.
pub use vectorizer::Vectorizer;

/// Analyzer
/// Case-insensitive tokenizer splitting on non-alphanumeric characters
/// with an English stop word list.
pub use vectorizer::analyzer::Analyzer;

/// Corpus
/// Document count and per-term document frequency of one fit.
/// The term order is the vocabulary dimension order.
pub use vectorizer::corpus::Corpus;

/// Term Frequency structure
/// Occurrence counts of the terms of one text.
pub use vectorizer::term::TermFrequency;

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug a different weighting into `Vectorizer<E>`.
/// `DefaultTFIDFEngine` uses raw counts and `ln((1 + N) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Document sources
/// - `DocumentSource`: list / write named text blobs
/// - `FsStore`: one file per document in a directory
/// - `MemoryStore`: in-process map
pub use store::{DocumentSource, FsStore, MemoryStore, RawDocument};

pub use config::Config;
pub use error::{Error, Result};

/// Sparse vector used for every transformed text
pub use utils::math::vector::ZeroSpVec;
