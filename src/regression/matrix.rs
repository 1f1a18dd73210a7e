//! Dense square matrix used for per-pair statistics

use core::ops::{Index, IndexMut};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Row-major `dim × dim` matrix stored contiguously
///
/// Entry `(i, j)` lives at `i * dim + j`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim],
        }
    }

    /// Build a matrix from `f(i, j)` over every entry
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                data.push(f(i, j));
            }
        }
        Self { dim, data }
    }

    /// Build a symmetric matrix, evaluating `f(i, j)` only for `i <= j`
    ///
    /// The lower triangle is a copy of the upper one, so `m[(i, j)]` and
    /// `m[(j, i)]` are bitwise identical.
    pub fn symmetric_from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            for j in i..dim {
                let v = f(i, j);
                m.data[i * dim + j] = v;
                m.data[j * dim + i] = v;
            }
        }
        m
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at row `i`, column `j`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.dim && j < self.dim {
            Some(self.data[i * self.dim + j])
        } else {
            None
        }
    }

    /// Row `i` as a slice
    ///
    /// # Panics
    ///
    /// Panics if `i >= dim`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0, and a zero-dim matrix has no rows anyway
        self.data.chunks_exact(self.dim.max(1))
    }

    /// Contiguous row-major storage
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Check that every `(i, j)` entry equals its `(j, i)` mirror exactly
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| {
            (i + 1..self.dim)
                .all(|j| self.data[i * self.dim + j].to_bits() == self.data[j * self.dim + i].to_bits())
        })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.dim && j < self.dim, "matrix index out of bounds");
        &self.data[i * self.dim + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(i < self.dim && j < self.dim, "matrix index out of bounds");
        &mut self.data[i * self.dim + j]
    }
}
