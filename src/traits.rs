//! Storage contracts for the dense solver kernel
//!
//! This module defines the abstractions the kernel consumes instead of a
//! concrete matrix representation:
//! - [`Scalar`]: bound on element types (real floating point)
//! - [`MatrixStore`]: square, mutable, element-addressable matrix storage
//! - [`VectorStore`]: mutable, element-addressable vector storage
//!
//! Implementations are provided for `ndarray::Array2`/`Array1` and `Vec<T>`,
//! but callers are free to plug in row-major, column-major, or any other
//! backing store that can answer the accessor contract.

use ndarray::{Array1, Array2};
use num_traits::{Float, NumAssign};
use std::fmt::Debug;

/// Scalar types the kernel can factor: real floating-point numbers.
///
/// Pivot selection compares absolute values, so the element type must be an
/// ordered real field. `f32` and `f64` satisfy the bound via the blanket
/// implementation. `Send + Sync` lets the inversion driver share the
/// factored matrix across column-solve threads.
pub trait Scalar: Float + NumAssign + Debug + Send + Sync + 'static {}

impl<T> Scalar for T where T: Float + NumAssign + Debug + Send + Sync + 'static {}

/// Square matrix storage addressed by a (row, column) pair.
///
/// The kernel mutates the store in place during factorization and inversion
/// but never retains a reference past the call. Indices passed by the kernel
/// are always below [`dim`](MatrixStore::dim).
pub trait MatrixStore<T: Scalar> {
    /// Dimension N of the N×N matrix.
    fn dim(&self) -> usize;

    /// Element at (`row`, `col`).
    fn get(&self, row: usize, col: usize) -> T;

    /// Overwrite the element at (`row`, `col`).
    fn set(&mut self, row: usize, col: usize, value: T);

    /// Exchange two full rows.
    ///
    /// The default goes through `get`/`set`; stores with contiguous rows can
    /// override with a bulk swap.
    fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        for j in 0..self.dim() {
            let tmp = self.get(r1, j);
            self.set(r1, j, self.get(r2, j));
            self.set(r2, j, tmp);
        }
    }
}

/// Vector storage addressed by a single index.
pub trait VectorStore<T: Scalar> {
    /// A zero-initialized vector of the given length.
    fn zeros(len: usize) -> Self
    where
        Self: Sized;

    /// Number of elements.
    fn len(&self) -> usize;

    /// True when the vector has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`.
    fn get(&self, index: usize) -> T;

    /// Overwrite the element at `index`.
    fn set(&mut self, index: usize, value: T);
}

impl<T: Scalar> MatrixStore<T> for Array2<T> {
    fn dim(&self) -> usize {
        debug_assert_eq!(self.nrows(), self.ncols(), "matrix must be square");
        self.nrows()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> T {
        self[[row, col]]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) {
        self[[row, col]] = value;
    }
}

impl<T: Scalar> VectorStore<T> for Array1<T> {
    fn zeros(len: usize) -> Self {
        Array1::from_elem(len, T::zero())
    }

    fn len(&self) -> usize {
        Array1::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T: Scalar> VectorStore<T> for Vec<T> {
    fn zeros(len: usize) -> Self {
        vec![T::zero(); len]
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_array2_store() {
        let mut a = array![[1.0_f64, 2.0], [3.0, 4.0]];
        assert_eq!(MatrixStore::dim(&a), 2);
        assert_eq!(MatrixStore::get(&a, 0, 1), 2.0);

        a.set(1, 0, 7.0);
        assert_eq!(MatrixStore::get(&a, 1, 0), 7.0);
    }

    #[test]
    fn test_swap_rows_default() {
        let mut a = array![[1.0_f64, 2.0], [3.0, 4.0]];
        a.swap_rows(0, 1);
        assert_eq!(MatrixStore::get(&a, 0, 0), 3.0);
        assert_eq!(MatrixStore::get(&a, 0, 1), 4.0);
        assert_eq!(MatrixStore::get(&a, 1, 0), 1.0);
        assert_eq!(MatrixStore::get(&a, 1, 1), 2.0);

        // Swapping a row with itself is a no-op.
        a.swap_rows(1, 1);
        assert_eq!(MatrixStore::get(&a, 1, 1), 2.0);
    }

    #[test]
    fn test_array1_store() {
        let mut v: Array1<f64> = VectorStore::zeros(3);
        assert_eq!(VectorStore::len(&v), 3);
        assert_eq!(VectorStore::get(&v, 2), 0.0);

        VectorStore::set(&mut v, 2, 5.0);
        assert_eq!(VectorStore::get(&v, 2), 5.0);
    }

    #[test]
    fn test_vec_store() {
        let mut v: Vec<f32> = VectorStore::zeros(4);
        assert_eq!(VectorStore::len(&v), 4);
        assert!(!VectorStore::is_empty(&v));

        VectorStore::set(&mut v, 0, 1.5);
        assert_eq!(VectorStore::get(&v, 0), 1.5);
    }
}
