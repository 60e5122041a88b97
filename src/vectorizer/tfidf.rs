use crate::{utils::math::vector::ZeroSpVec, vectorizer::{corpus::Corpus, term::TermFrequency}};

/// TF-IDF calculation engine
/// The weighting seam of [`Vectorizer`](crate::Vectorizer).
/// Implementations decide how IDF is derived from corpus statistics
/// and how raw counts become term weights; the vectorizer owns
/// vocabulary, sparsity and normalization.
///
/// Engines are shared across rayon workers, hence `Send + Sync`.
pub trait TFIDFEngine: Send + Sync {
    /// IDF vector in vocabulary (dimension) order
    ///
    /// # Arguments
    /// * `corpus` - fitted corpus statistics
    fn idf_vec(corpus: &Corpus) -> Vec<f64>;

    /// Weight of a term occurring `count` times in a text of `total` terms
    fn tf(count: u64, total: u64) -> f64;

    /// Unnormalized TF-IDF vector of `freq` over the corpus vocabulary.
    /// Terms outside the vocabulary are ignored.
    fn tfidf_vec(freq: &TermFrequency, corpus: &Corpus, idf_vec: &[f64]) -> ZeroSpVec<f64> {
        let total = freq.term_sum();
        let pairs = freq
            .iter()
            .filter_map(|(term, count)| {
                let idx = corpus.term_index(term)?;
                Some((idx as u32, Self::tf(count, total) * idf_vec[idx]))
            })
            .collect();
        ZeroSpVec::from_pairs(corpus.vocab_size(), pairs)
    }
}

/// Default TF-IDF engine
/// - tf(t) = raw occurrence count
/// - idf(t) = ln((1 + N) / (1 + df(t))) + 1
///
/// The smoothed IDF never divides by zero and stays > 0 for every
/// term that occurs in at least one document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        corpus
            .iter()
            .map(|(_, doc_freq)| Self::idf_calc(doc_num, doc_freq))
            .collect()
    }

    #[inline]
    fn tf(count: u64, _total: u64) -> f64 {
        count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn smoothed_idf_values() {
        // term in every document: ln(1) + 1
        assert!((DefaultTFIDFEngine::idf_calc(4, 4) - 1.0).abs() < EPS);
        // term in one of three documents: ln(4 / 2) + 1
        assert!((DefaultTFIDFEngine::idf_calc(3, 1) - (2.0_f64.ln() + 1.0)).abs() < EPS);
        // rarer terms weigh more
        assert!(DefaultTFIDFEngine::idf_calc(10, 1) > DefaultTFIDFEngine::idf_calc(10, 5));
    }

    #[test]
    fn idf_vec_follows_dimension_order() {
        let mut corpus = Corpus::new();
        corpus.add_set(&["cat", "mat"]);
        corpus.add_set(&["cat"]);
        let idf = DefaultTFIDFEngine::idf_vec(&corpus);
        assert_eq!(idf.len(), 2);
        assert!((idf[0] - 1.0).abs() < EPS);
        assert!((idf[1] - ((3.0_f64 / 2.0).ln() + 1.0)).abs() < EPS);
    }

    #[test]
    fn tfidf_vec_weights_raw_counts() {
        let mut corpus = Corpus::new();
        corpus.add_set(&["cat", "mat"]);
        corpus.add_set(&["dog"]);
        let idf = DefaultTFIDFEngine::idf_vec(&corpus);

        let mut freq = TermFrequency::new();
        freq.add_terms(&["cat", "cat", "bird"]);
        let vec = DefaultTFIDFEngine::tfidf_vec(&freq, &corpus, &idf);
        assert_eq!(vec.len(), 3);
        assert_eq!(vec.nnz(), 1);
        assert!((vec.get(0).unwrap() - 2.0 * idf[0]).abs() < EPS);
    }
}
