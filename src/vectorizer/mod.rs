pub mod analyzer;
pub mod corpus;
pub mod term;
pub mod tfidf;

use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::{Error, Result},
    utils::math::vector::ZeroSpVec,
    vectorizer::{analyzer::Analyzer, corpus::Corpus, term::TermFrequency, tfidf::{DefaultTFIDFEngine, TFIDFEngine}},
};

/// Fitted IDF weights, one per vocabulary dimension
#[derive(Debug, Clone)]
pub struct IDFVector {
    /// IDF Vector it is not sparse because every vocabulary term has a weight
    pub idf_vec: Vec<f64>,
    /// document count the weights were computed from
    pub doc_num: u64,
}

/// TF-IDF Vectorizer
/// Learns a vocabulary and IDF weights from a corpus (`fit`) and maps any text
/// onto that fixed vocabulary as an L2-normalized sparse TF-IDF vector (`transform`).
///
/// Because every vector is unit length (or zero), cosine similarity between two
/// transformed texts is their plain dot product.
///
/// The vocabulary is rebuilt wholesale on every fit; there is no incremental growth.
/// A `Vectorizer` only exists in fitted form, so `transform` can never run unfit.
#[derive(Debug, Clone)]
pub struct Vectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    analyzer: Analyzer,
    /// vocabulary and document frequencies, dimension order
    corpus: Corpus,
    idf: IDFVector,
    _marker: PhantomData<E>,
}

impl<E> Vectorizer<E>
where
    E: TFIDFEngine,
{
    /// Fit on `texts` with the default analyzer
    ///
    /// Blank texts are skipped and do not count towards N.
    ///
    /// # Errors
    /// * `Error::EmptyCorpus` - no non-empty text
    pub fn fit<T>(texts: &[T]) -> Result<Self>
    where
        T: AsRef<str> + Sync,
    {
        Self::fit_with(Analyzer::new(), texts)
    }

    /// Fit on `texts` with a specific analyzer
    pub fn fit_with<T>(analyzer: Analyzer, texts: &[T]) -> Result<Self>
    where
        T: AsRef<str> + Sync,
    {
        let freqs = Self::analyze(&analyzer, texts);
        Self::from_freqs(analyzer, &freqs)
    }

    /// Fit on `texts` and transform the same texts in one pass.
    /// Row `i` of the returned matrix belongs to the `i`-th non-empty text.
    pub fn fit_transform<T>(texts: &[T]) -> Result<(Self, Vec<ZeroSpVec<f64>>)>
    where
        T: AsRef<str> + Sync,
    {
        let analyzer = Analyzer::new();
        let freqs = Self::analyze(&analyzer, texts);
        let vectorizer = Self::from_freqs(analyzer, &freqs)?;
        let matrix = freqs
            .par_iter()
            .map(|freq| vectorizer.transform_freq(freq))
            .collect();
        Ok((vectorizer, matrix))
    }

    /// Tokenize every non-empty text, keeping input order
    fn analyze<T>(analyzer: &Analyzer, texts: &[T]) -> Vec<TermFrequency>
    where
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .filter(|text| !text.as_ref().trim().is_empty())
            .map(|text| analyzer.term_frequency(text.as_ref()))
            .collect()
    }

    fn from_freqs(analyzer: Analyzer, freqs: &[TermFrequency]) -> Result<Self> {
        if freqs.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        // 語彙の次元順は追加順で決まるので逐次で構築する
        let mut corpus = Corpus::new();
        for freq in freqs {
            corpus.add_freq(freq);
        }
        let idf = IDFVector {
            idf_vec: E::idf_vec(&corpus),
            doc_num: corpus.get_doc_num(),
        };
        debug!(
            documents = idf.doc_num,
            vocabulary = corpus.vocab_size(),
            "fitted vectorizer"
        );
        Ok(Self {
            analyzer,
            corpus,
            idf,
            _marker: PhantomData,
        })
    }

    /// Transform `text` into an L2-normalized TF-IDF vector.
    /// Text without any vocabulary term becomes the zero vector.
    pub fn transform(&self, text: &str) -> ZeroSpVec<f64> {
        let freq = self.analyzer.term_frequency(text);
        self.transform_freq(&freq)
    }

    /// Transform many texts in parallel, output in input order
    pub fn transform_batch<T>(&self, texts: &[T]) -> Vec<ZeroSpVec<f64>>
    where
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.transform(text.as_ref()))
            .collect()
    }

    /// Transform an already analyzed text
    pub fn transform_freq(&self, freq: &TermFrequency) -> ZeroSpVec<f64> {
        let mut vec = E::tfidf_vec(freq, &self.corpus, &self.idf.idf_vec);
        vec.l2_normalize();
        vec
    }

    /// Number of vocabulary terms, which is the dimension of every vector
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.corpus.vocab_size()
    }

    /// Number of documents the vectorizer was fitted on
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.idf.doc_num
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.corpus.term_index(term).is_some()
    }

    /// IDF weight of a vocabulary term
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.corpus
            .term_index(term)
            .map(|idx| self.idf.idf_vec[idx])
    }

    /// Dimension of a vocabulary term
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.corpus.term_index(term)
    }

    #[inline]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }
}
