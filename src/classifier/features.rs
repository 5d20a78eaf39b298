//! Sparse feature vectors
//!
//! Produced by a `FeatureExtractor`, consumed by a `Scorer`.

/// Sparse numeric representation of a document against a fixed vocabulary.
///
/// Entries are `(column, weight)` pairs sorted by column with no duplicate
/// columns and no zero weights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build a vector from arbitrary `(column, weight)` pairs.
    ///
    /// Pairs are sorted, duplicate columns are summed and zero weights are
    /// dropped so that `nnz()` always counts real terms.
    pub fn from_entries(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(col, _)| col);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (col, weight) in entries {
            debug_assert!(col < dimension, "column {col} out of range {dimension}");
            match merged.last_mut() {
                Some((last_col, last_weight)) if *last_col == col => *last_weight += weight,
                _ => merged.push((col, weight)),
            }
        }
        merged.retain(|&(_, w)| w != 0.0);

        Self {
            dimension,
            entries: merged,
        }
    }

    /// An all-zero vector of the given dimension.
    pub fn empty(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Number of columns (vocabulary size).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Count of non-zero weighted terms.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-zero `(column, weight)` pairs in column order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product against a dense weight row.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(col, w)| dense.get(col).copied().unwrap_or(0.0) * w)
            .sum()
    }

    /// Euclidean norm of the weights.
    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale every weight in place.
    pub(crate) fn scale(&mut self, factor: f64) {
        for (_, w) in &mut self.entries {
            *w *= factor;
        }
    }
}
