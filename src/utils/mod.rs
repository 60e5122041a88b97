/// Numeric helpers shared by the vectorizer and the index
pub mod math;
