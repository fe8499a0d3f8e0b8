//! Dense row-major matrix container
//!
//! [`Matrix`] is the container callers hand to the dispatcher and the
//! container results are wrapped in when `matricize` is requested. It holds
//! a flat row-major buffer and an n-dimensional shape; decompositions only
//! accept the 2-D square case.

use crate::error::{Error, Result};
use std::ops::Index;

/// Owned, row-major n-dimensional array of entries
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<T> Matrix<T> {
    /// Create a matrix from flat row-major data and a shape
    ///
    /// Fails if the shape's element count does not match `data.len()`.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::invalid_argument(
                "data",
                format!(
                    "shape {:?} needs {} elements, got {}",
                    shape,
                    expected,
                    data.len()
                ),
            ));
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    /// Create a 2-D matrix from nested rows
    ///
    /// Fails on ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::invalid_argument(
                    "rows",
                    format!("row {} has {} columns, expected {}", i, row.len(), n_cols),
                ));
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            shape: vec![n_rows, n_cols],
        })
    }

    /// Create a 1-D vector
    pub fn vector(data: Vec<T>) -> Self {
        let len = data.len();
        Self {
            data,
            shape: vec![len],
        }
    }

    /// Shape of the matrix (`[rows, cols]` for 2-D)
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the matrix has no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view of the entries
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix, returning its flat row-major buffer
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Order of a square 2-D matrix, if this is one
    pub fn square_order(&self) -> Option<usize> {
        match self.shape.as_slice() {
            [rows, cols] if rows == cols => Some(*rows),
            _ => None,
        }
    }

    /// Entry at `(row, col)` of a 2-D matrix
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        match self.shape.as_slice() {
            [rows, cols] if row < *rows && col < *cols => self.data.get(row * cols + col),
            _ => None,
        }
    }

    /// Apply `f` to every entry, keeping the shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            shape: self.shape.clone(),
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Nested rows of a 2-D matrix (a 1-D vector becomes a single row)
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        let cols = self.shape.last().copied().unwrap_or(0);
        if cols == 0 {
            return vec![Vec::new(); self.shape.first().copied().unwrap_or(0)];
        }
        self.data.chunks(cols).map(<[T]>::to_vec).collect()
    }
}

impl Matrix<f64> {
    /// Identity matrix of order `n`
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            data,
            shape: vec![n, n],
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        let cols = self.shape.get(1).copied().unwrap_or(1);
        &self.data[row * cols + col]
    }
}
