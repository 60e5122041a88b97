use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Keeps the document count and, per term, the number of documents containing it.
///
/// Term order is the order of first appearance while the corpus is built,
/// and that order is the dimension order of the fitted vocabulary:
/// `term_index(t)` is the dimension of `t` in every transformed vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// number of documents added
    doc_num: u64,
    /// term -> document frequency
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add one document's distinct terms to the corpus
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            match self.term_counts.get_mut(term.as_ref()) {
                Some(count) => *count += 1,
                None => {
                    self.term_counts.insert(term.as_ref().into(), 1);
                }
            }
        }
    }

    /// Add one document given as a term frequency
    #[inline]
    pub fn add_freq(&mut self, freq: &TermFrequency) {
        self.add_set(&freq.term_set_ref_str());
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Document frequency of `term`, 0 when unseen
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Dimension of `term` in the vocabulary
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.term_counts.get_index_of(term)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// `(term, document frequency)` in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(term, df)| (term.as_ref(), *df))
    }
}
