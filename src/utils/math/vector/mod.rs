pub mod math;

use std::fmt::Debug;

use num::Num;

/// ZeroSpVec is a sparse vector that treats zero elements as sparse.
/// It keeps `inds` (the element indices) and `vals` (the element values)
/// side by side, plus the logical dimension `len`.
///
/// Elements are guaranteed to be sorted by ascending index,
/// which lets `dot` run as a single merge pass.
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
        }
    }

    /// Capacity is for non-zero elements, not the logical dimension
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
        }
    }

    /// Build a vector of dimension `len` from `(index, value)` pairs in any order.
    /// Zero values are dropped and duplicate indices are summed.
    ///
    /// # Arguments
    /// * `len` - logical dimension
    /// * `pairs` - non-zero candidates, every index must be `< len`
    pub fn from_pairs(len: usize, mut pairs: Vec<(u32, N)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut vec = Self::with_capacity(pairs.len());
        vec.len = len;
        for (idx, val) in pairs {
            debug_assert!((idx as usize) < len, "index {idx} out of range for dimension {len}");
            match vec.inds.last() {
                Some(&last) if last == idx => {
                    if let Some(acc) = vec.vals.last_mut() {
                        *acc = *acc + val;
                    }
                }
                _ => {
                    vec.inds.push(idx);
                    vec.vals.push(val);
                }
            }
        }
        // 合算で 0 になった要素は落とす
        vec.prune_zeros();
        vec
    }

    #[inline]
    fn prune_zeros(&mut self) {
        if self.vals.iter().all(|v| *v != N::zero()) {
            return;
        }
        let (inds, vals): (Vec<u32>, Vec<N>) = self
            .inds
            .iter()
            .zip(self.vals.iter())
            .filter(|(_, v)| **v != N::zero())
            .map(|(i, v)| (*i, *v))
            .unzip();
        self.inds = inds;
        self.vals = vals;
    }

    /// Append one dense element; zeros only grow the dimension
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len as u32);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// `None` outside the dimension, `Some(zero)` for an unstored element
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate the stored elements as `(index, value)` in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(i, v)| (*i as usize, *v))
    }

    #[inline]
    pub fn as_ind_slice(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn as_val_slice(&self) -> &[N] {
        &self.vals
    }

    #[inline]
    pub(crate) fn val_slice_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }

    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = val;
        }
        dense
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn from(dense: Vec<N>) -> Self {
        let mut vec = Self::with_capacity(dense.len());
        for elem in dense {
            vec.push(elem);
        }
        vec.shrink_to_fit();
        vec
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "ZeroSpVec {{ len: {}, nnz: {} }} [", self.len, self.nnz())?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {}: {:?}", idx, val)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("inds", &self.inds)
                .field("vals", &self.vals)
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_only_non_zero() {
        let vec = ZeroSpVec::from(vec![0.0_f64, 2.0, 0.0, 3.5]);
        assert_eq!(vec.len(), 4);
        assert_eq!(vec.nnz(), 2);
        assert_eq!(vec.get(1), Some(2.0));
        assert_eq!(vec.get(2), Some(0.0));
        assert_eq!(vec.get(4), None);
        assert_eq!(vec.to_dense(), vec![0.0, 2.0, 0.0, 3.5]);
    }

    #[test]
    fn from_pairs_sorts_and_merges() {
        let vec = ZeroSpVec::from_pairs(6, vec![(4, 1.0_f64), (1, 2.0), (4, 0.5), (2, 0.0)]);
        assert_eq!(vec.as_ind_slice(), &[1, 4]);
        assert_eq!(vec.as_val_slice(), &[2.0, 1.5]);
        assert_eq!(vec.len(), 6);
    }

    #[test]
    fn from_pairs_drops_cancelled_elements() {
        let vec = ZeroSpVec::from_pairs(3, vec![(0, 1_i32), (0, -1), (2, 4)]);
        assert_eq!(vec.as_ind_slice(), &[2]);
        assert_eq!(vec.nnz(), 1);
    }

    #[test]
    fn empty_vector() {
        let vec: ZeroSpVec<f32> = ZeroSpVec::new();
        assert!(vec.is_empty());
        assert_eq!(vec.raw_iter().count(), 0);
        assert!(vec.to_dense().is_empty());
    }
}
