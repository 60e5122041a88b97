use std::{cmp::Ordering, ops::AddAssign};

use num::{Float, Num};

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Dot product computed as a merge over both index lists
    ///
    /// # Arguments
    /// * `other` - vector of the same dimension
    ///
    /// # Returns
    /// * `R` - accumulated product
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let self_inds = self.as_ind_slice();
        let self_vals = self.as_val_slice();
        let other_inds = other.as_ind_slice();
        let other_vals = other.as_val_slice();

        if self_inds.is_empty() || other_inds.is_empty() {
            return result;
        }

        let mut i = 0;
        let mut j = 0;
        while i < self_inds.len() && j < other_inds.len() {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    let a: R = self_vals[i].into();
                    let b: R = other_vals[j].into();
                    result += a * b;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for &val in self.as_val_slice() {
            let val: R = val.into();
            result += val * val;
        }
        result
    }

    /// cosθ = A・B / (|A||B|)
    /// 0 when either side is the zero vector
    pub fn cosine_similarity(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        let norm = (self.norm_sq::<f64>() * other.norm_sq::<f64>()).sqrt();
        if norm == 0.0 {
            return 0.0;
        }
        self.dot::<f64>(other) / norm
    }
}

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    /// Divide every element by the Euclidean norm in place.
    /// The zero vector is left untouched.
    ///
    /// # Returns
    /// * `N` - the norm before normalization
    pub fn l2_normalize(&mut self) -> N {
        let norm = self
            .as_val_slice()
            .iter()
            .fold(N::zero(), |acc, v| acc + *v * *v)
            .sqrt();
        if norm > N::zero() {
            for val in self.val_slice_mut() {
                *val = *val / norm;
            }
        }
        norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn dot_only_counts_shared_indices() {
        let a = ZeroSpVec::from(vec![1.0_f64, 0.0, 2.0, 0.0, 3.0]);
        let b = ZeroSpVec::from(vec![0.0_f64, 5.0, 4.0, 0.0, 1.0]);
        let dot: f64 = a.dot(&b);
        assert!((dot - 11.0).abs() < EPS);
        assert_eq!(a.dot::<f64>(&ZeroSpVec::from(vec![0.0; 5])), 0.0);
    }

    #[test]
    fn dot_widens_integer_values() {
        let a = ZeroSpVec::from(vec![3_u32, 0, 7]);
        let b = ZeroSpVec::from(vec![2_u32, 9, 1]);
        assert_eq!(a.dot::<u64>(&b), 13);
        assert_eq!(a.norm_sq::<u64>(), 58);
    }

    #[test]
    fn normalized_dot_equals_cosine() {
        let mut a = ZeroSpVec::from(vec![1.0_f64, 2.0, 0.0, 2.0]);
        let mut b = ZeroSpVec::from(vec![0.0_f64, 3.0, 4.0, 0.0]);
        let cosine = a.cosine_similarity(&b);

        assert!((a.l2_normalize() - 3.0).abs() < EPS);
        assert!((b.l2_normalize() - 5.0).abs() < EPS);
        assert!((a.norm_sq::<f64>() - 1.0).abs() < EPS);
        assert!((a.dot::<f64>(&b) - cosine).abs() < EPS);
        assert!((a.dot::<f64>(&a) - 1.0).abs() < EPS);
    }

    #[test]
    fn zero_vector_normalizes_to_itself() {
        let mut zero = ZeroSpVec::from(vec![0.0_f64; 3]);
        assert_eq!(zero.l2_normalize(), 0.0);
        assert_eq!(zero.nnz(), 0);
        assert_eq!(zero.cosine_similarity(&ZeroSpVec::from(vec![1.0, 0.0, 0.0])), 0.0);
    }
}
