//! Sparse feature vectors produced by the vectorizer

use std::collections::BTreeMap;

/// A single-row sparse vector with sorted, unique column indices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// An all-zero vector of the given dimension
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from column → value entries. Columns at or past `dim` are dropped.
    pub fn from_entries(dim: usize, entries: BTreeMap<usize, f64>) -> Self {
        let (indices, values): (Vec<usize>, Vec<f64>) =
            entries.into_iter().filter(|(i, _)| *i < dim).unzip();
        Self {
            dim,
            indices,
            values,
        }
    }

    /// Declared number of columns
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Iterate stored `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Columns holding a non-zero value
    pub fn nonzero(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().filter(|(_, v)| *v != 0.0).map(|(i, _)| i)
    }

    /// Value at a column (0.0 when not stored)
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Dot product with a dense weight row. Columns past the row length contribute nothing.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(i, v)| weights.get(i).map(|w| w * v))
            .sum()
    }

    /// Apply a function to every stored value
    pub fn map_values(&mut self, mut f: impl FnMut(usize, f64) -> f64) {
        for (i, v) in self.indices.iter().zip(self.values.iter_mut()) {
            *v = f(*i, *v);
        }
    }

    /// Scale to unit L2 norm; zero vectors are left untouched
    pub fn normalize_l2(&mut self) {
        let norm = self.values.iter().map(|v| v * v).sum::<f64>().sqrt();
        self.scale_by(norm);
    }

    /// Scale to unit L1 norm; zero vectors are left untouched
    pub fn normalize_l1(&mut self) {
        let norm = self.values.iter().map(|v| v.abs()).sum::<f64>();
        self.scale_by(norm);
    }

    fn scale_by(&mut self, norm: f64) {
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(dim: usize, entries: &[(usize, f64)]) -> SparseVector {
        SparseVector::from_entries(dim, entries.iter().copied().collect())
    }

    #[test]
    fn test_entries_are_sorted_and_bounded() {
        let v = vector(4, &[(3, 1.0), (0, 2.0), (9, 5.0)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(0, 2.0), (3, 1.0)]);
        assert_eq!(v.get(3), 1.0);
        assert_eq!(v.get(1), 0.0);
    }

    #[test]
    fn test_nonzero_skips_explicit_zeros() {
        let v = vector(5, &[(1, 0.0), (2, 3.0)]);
        assert_eq!(v.nonzero().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_dot() {
        let v = vector(3, &[(0, 1.0), (2, 2.0)]);
        assert_eq!(v.dot(&[0.5, 10.0, -1.0]), -1.5);
    }

    #[test]
    fn test_normalize() {
        let mut v = vector(2, &[(0, 3.0), (1, 4.0)]);
        v.normalize_l2();
        assert!((v.get(0) - 0.6).abs() < 1e-12);
        assert!((v.get(1) - 0.8).abs() < 1e-12);

        let mut v = vector(2, &[(0, 1.0), (1, 3.0)]);
        v.normalize_l1();
        assert!((v.get(1) - 0.75).abs() < 1e-12);

        let mut zero = SparseVector::zeros(3);
        zero.normalize_l2();
        assert_eq!(zero.nnz(), 0);
    }
}
