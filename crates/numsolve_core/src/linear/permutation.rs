//! Row index map used by LU decomposition.

use std::ops::Index;

/// A bijection over `0..n`: entry `k` is the physical row playing logical row `k`.
///
/// # Example
///
/// ```
/// use numsolve_core::linear::Permutation;
///
/// let mut p = Permutation::identity(3);
/// p.swap(0, 2);
/// assert_eq!(p.apply(&[10.0, 20.0, 30.0]), vec![30.0, 20.0, 10.0]);
/// assert_eq!(p.invert().apply(&p.apply(&[1.0, 2.0, 3.0])), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation {
    map: Vec<usize>,
}

impl Permutation {
    /// The identity map of size `n`.
    pub fn identity(n: usize) -> Self {
        Self {
            map: (0..n).collect(),
        }
    }

    /// Exchange entries `a` and `b`.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.map.swap(a, b);
    }

    /// Gather `values` through the map: `out[k] = values[self[k]]`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.len()`.
    pub fn apply<T: Copy>(&self, values: &[T]) -> Vec<T> {
        assert_eq!(values.len(), self.map.len(), "length must match permutation size");
        self.map.iter().map(|&i| values[i]).collect()
    }

    /// The inverse map, so that `p.invert().apply(&p.apply(v)) == v`.
    pub fn invert(&self) -> Self {
        let mut inverse = vec![0; self.map.len()];
        for (k, &i) in self.map.iter().enumerate() {
            inverse[i] = k;
        }
        Self { map: inverse }
    }

    /// Returns `true` if an odd number of transpositions separates this map from the identity.
    pub fn is_odd(&self) -> bool {
        let mut seen = vec![false; self.map.len()];
        let mut transpositions = 0;
        for start in 0..self.map.len() {
            let mut length = 0;
            let mut i = start;
            while !seen[i] {
                seen[i] = true;
                i = self.map[i];
                length += 1;
            }
            if length > 0 {
                transpositions += length - 1;
            }
        }
        transpositions % 2 == 1
    }

    /// Map entries.
    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }

    /// Size of the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` for the empty map.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    #[inline]
    fn index(&self, k: usize) -> &usize {
        &self.map[k]
    }
}
