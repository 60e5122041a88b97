use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use serde::Serialize;

use crate::utils::math::vector::ZeroSpVec;

/// One ranked result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitEntry {
    /// Document id
    pub id: String,
    /// Cosine similarity to the query, in `[0, 1]`
    pub score: f64,
}

/// Structure to store search results, best first
#[derive(Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Create a new Hits instance
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score.
    /// The sort is stable: equal scores keep their current order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Keep the first `k` entries
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    pub fn ids(&self) -> Vec<&str> {
        self.list.iter().map(|hit| hit.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry> {
        self.list.iter()
    }
}

impl IntoIterator for Hits {
    type Item = HitEntry;
    type IntoIter = std::vec::IntoIter<HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Hits {
    type Item = &'a HitEntry;
    type IntoIter = std::slice::Iter<'a, HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.id, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// `<score>\t<id>` per line
impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{:.6}\t{}", hit.score, hit.id)?;
        }
        Ok(())
    }
}

/// Score every matrix row against `query`.
/// Both sides are unit length, so the dot product is the cosine similarity.
/// Output is in row order regardless of how the work was split.
pub(crate) fn cosine_scores(matrix: &[ZeroSpVec<f64>], query: &ZeroSpVec<f64>) -> Vec<f64> {
    matrix
        .par_iter()
        .map(|row| row.dot::<f64>(query).clamp(0.0, 1.0))
        .collect()
}
