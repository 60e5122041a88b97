use crate::vectorizer::term::TermFrequency;

/// English function words dropped by the default analyzer.
/// Kept sorted so membership is a binary search.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing",
    "done", "down", "due", "during", "each", "eg", "either", "else", "elsewhere", "enough",
    "etc", "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few",
    "for", "former", "formerly", "from", "further", "had", "has", "have", "having", "he",
    "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "i", "ie", "if", "in", "indeed", "into", "is",
    "it", "its", "itself", "just", "last", "latter", "latterly", "least", "less", "many", "may",
    "me", "meanwhile", "might", "more", "moreover", "most", "mostly", "much", "must", "my",
    "myself", "namely", "neither", "never", "nevertheless", "next", "no", "nobody", "none",
    "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves",
    "out", "over", "own", "per", "perhaps", "please", "rather", "same", "several", "she",
    "should", "since", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "thereupon", "these", "they", "this", "those", "though", "through", "throughout", "thru",
    "thus", "to", "together", "too", "toward", "towards", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Analyzer
/// Turns raw text into terms:
/// - case-insensitive (every span is lowercased)
/// - split on every non-alphanumeric character
/// - empty spans and stop words are discarded
///
/// The same analyzer must be used for fit and for transform,
/// otherwise query terms will not line up with the vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    stop_words: &'static [&'static str],
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Analyzer with the English stop word list
    pub fn new() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS,
        }
    }

    /// Analyzer that keeps every term
    pub fn without_stop_words() -> Self {
        Self { stop_words: &[] }
    }

    /// # Arguments
    /// * `stop_words` - must be sorted ascending and lowercase
    pub fn with_stop_words(stop_words: &'static [&'static str]) -> Self {
        debug_assert!(
            stop_words.windows(2).all(|w| w[0] < w[1]),
            "stop words must be sorted and unique"
        );
        Self { stop_words }
    }

    #[inline]
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.binary_search(&term).is_ok()
    }

    /// Iterate the terms of `text` in order of appearance
    pub fn terms<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|span| !span.is_empty())
            .map(|span| span.to_lowercase())
            .filter(move |term| !self.is_stop_word(term))
    }

    /// Count the terms of `text`
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        for term in self.terms(text) {
            freq.add_term(&term);
        }
        freq
    }
}
