//! LU decomposition kernel
//!
//! Crout's method with scaled partial pivoting, the triangular solves that
//! consume the factored form, and the inversion driver built on both. The
//! routines are generic over [`MatrixStore`]/[`VectorStore`] so callers can
//! supply any element-addressable storage; they mutate the caller's matrix
//! in place and retain nothing between calls.
//!
//! The factorization follows the classic treatment in Press et al.,
//! "Numerical Recipes: The Art of Scientific Computing".

use crate::parallel::parallel_map_indexed;
use crate::traits::{MatrixStore, Scalar, VectorStore};
use ndarray::Array1;
use thiserror::Error;

/// Errors that can occur during LU factorization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LuError {
    #[error("matrix is singular to working precision (row {row} has no entry above machine epsilon)")]
    SingularMatrix { row: usize },
    #[error("matrix dimension must be at least 1")]
    EmptyMatrix,
}

/// Pivot record produced by [`decompose`].
///
/// `swapped_row(j)` is the row that was swapped into position `j` at
/// elimination step `j` — the swap history, not a destination map. Back
/// substitution replays the same swaps in the same order on the right-hand
/// side. A record is only valid together with the factorization that
/// produced it; reusing it against a different matrix is a caller error the
/// kernel does not detect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuPivots {
    swaps: Vec<usize>,
    parity: i8,
    clamped: bool,
}

impl LuPivots {
    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.swaps.len()
    }

    /// Row swapped into position `step` during elimination.
    #[inline]
    pub fn swapped_row(&self, step: usize) -> usize {
        self.swaps[step]
    }

    /// +1 for an even number of row interchanges, -1 for odd.
    ///
    /// Used by [`determinant_from_decomposition`] to restore the sign the
    /// row exchanges flipped.
    pub fn parity(&self) -> i8 {
        self.parity
    }

    /// True when some pivot was clamped to machine epsilon.
    ///
    /// The factorization is still usable, but it came from a near-singular
    /// matrix and results derived from it deserve suspicion.
    pub fn clamped(&self) -> bool {
        self.clamped
    }
}

/// Factor a square matrix in place into its combined LU form.
///
/// On success `a` holds the unit-lower-triangular factor L below the
/// diagonal and the upper-triangular factor U on and above it, for a
/// row-permuted version of the input; the returned [`LuPivots`] records the
/// permutation. Pivot rows are chosen by largest scaled magnitude.
///
/// A matrix with a row whose largest absolute element is at or below
/// machine epsilon is rejected with [`LuError::SingularMatrix`] before any
/// element is written, so the caller's data is untouched on failure. A
/// pivot that only turns out near-zero during elimination is clamped to
/// machine epsilon instead (see [`LuPivots::clamped`]): the factorization
/// stays usable for near-singular input at a known cost in accuracy.
pub fn decompose<T, M>(a: &mut M) -> Result<LuPivots, LuError>
where
    T: Scalar,
    M: MatrixStore<T>,
{
    let n = a.dim();
    if n == 0 {
        return Err(LuError::EmptyMatrix);
    }
    let small = T::epsilon();

    // Scale pass: reciprocal of each row's largest magnitude. This only
    // reads the matrix, so singular input is rejected before any mutation.
    let mut scale = vec![T::zero(); n];
    for (i, slot) in scale.iter_mut().enumerate() {
        let mut max = T::zero();
        for j in 0..n {
            let v = a.get(i, j).abs();
            if v > max {
                max = v;
            }
        }
        if max <= small {
            return Err(LuError::SingularMatrix { row: i });
        }
        *slot = T::one() / max;
    }

    let mut swaps = vec![0usize; n];
    let mut parity: i8 = 1;
    let mut clamped = false;
    let stride = (n / 10).max(1);

    for j in 0..n {
        if n >= 100 && j % stride == 0 {
            log::debug!("lu decomposition {}% complete", 100 * j / n);
        }

        // Entries of column j above the diagonal.
        for i in 0..j {
            let mut sum = a.get(i, j);
            for k in 0..i {
                sum = sum - a.get(i, k) * a.get(k, j);
            }
            a.set(i, j, sum);
        }

        // Diagonal and below, tracking the best scaled pivot as we go. The
        // diagonal entries can be computed here because no row moves until
        // the largest candidate is known.
        let mut best = T::zero();
        let mut pivot_row = j;
        for i in j..n {
            let mut sum = a.get(i, j);
            for k in 0..j {
                sum = sum - a.get(i, k) * a.get(k, j);
            }
            a.set(i, j, sum);
            let merit = scale[i] * sum.abs();
            if merit >= best {
                best = merit;
                pivot_row = i;
            }
        }

        if pivot_row != j {
            a.swap_rows(j, pivot_row);
            scale[pivot_row] = scale[j];
            parity = -parity;
        }
        swaps[j] = pivot_row;

        let mut pivot = a.get(j, j);
        if pivot.abs() <= small {
            pivot = if pivot < T::zero() { -small } else { small };
            a.set(j, j, pivot);
            clamped = true;
        }
        if j + 1 < n {
            // Divide the sub-diagonal column by the pivot, yielding the
            // multipliers stored as L.
            let inv_pivot = T::one() / pivot;
            for i in (j + 1)..n {
                a.set(i, j, a.get(i, j) * inv_pivot);
            }
        }
    }

    Ok(LuPivots {
        swaps,
        parity,
        clamped,
    })
}

/// Solve A·x = b against a factored matrix, in place.
///
/// `a` and `pivots` must come from the same [`decompose`] call; `b` is the
/// right-hand side on entry and the solution on return. The recorded row
/// swaps are replayed on `b` first, then forward substitution runs against
/// L and backward substitution against U. A leading run of zeros in the
/// permuted right-hand side (unit basis columns during inversion) skips the
/// forward inner loop; this is an optimization only and does not change the
/// result.
pub fn back_substitute<T, M, V>(a: &M, pivots: &LuPivots, b: &mut V)
where
    T: Scalar,
    M: MatrixStore<T>,
    V: VectorStore<T>,
{
    let n = a.dim();
    debug_assert_eq!(pivots.dim(), n);
    debug_assert_eq!(b.len(), n);

    let small = T::epsilon();

    // Replay the recorded swaps while forward-substituting. `first` is the
    // index of the first non-zero entry of the permuted vector; rows before
    // it contribute nothing.
    let mut first: Option<usize> = None;
    for i in 0..n {
        let l = pivots.swapped_row(i);
        let mut sum = b.get(l);
        b.set(l, b.get(i));
        match first {
            Some(f) => {
                for j in f..i {
                    sum = sum - a.get(i, j) * b.get(j);
                }
            }
            None => {
                if sum.abs() > small {
                    first = Some(i);
                }
            }
        }
        b.set(i, sum);
    }

    // Backward substitution against U.
    for i in (0..n).rev() {
        let mut sum = b.get(i);
        for j in (i + 1)..n {
            sum = sum - a.get(i, j) * b.get(j);
        }
        b.set(i, sum / a.get(i, i));
    }
}

/// Replace a factored matrix with the inverse of the original matrix.
///
/// `a` must hold the output of [`decompose`] and `pivots` the matching
/// record. Each identity column is solved independently against the shared,
/// read-only factored matrix (in parallel under the `native` feature); only
/// after every column solve has finished is `a` overwritten, in one pass,
/// with the assembled inverse.
pub fn invert_from_decomposition<T, M>(a: &mut M, pivots: &LuPivots)
where
    T: Scalar,
    M: MatrixStore<T> + Sync,
{
    let n = a.dim();
    debug_assert_eq!(pivots.dim(), n);

    // Collecting the columns forms the barrier before the overwrite below:
    // no write happens while a solve still reads the factored matrix.
    let columns: Vec<Array1<T>> = {
        let factored: &M = &*a;
        parallel_map_indexed(n, |j| {
            let mut col: Array1<T> = VectorStore::zeros(n);
            col[j] = T::one();
            back_substitute(factored, pivots, &mut col);
            col
        })
    };

    for (j, col) in columns.iter().enumerate() {
        for i in 0..n {
            a.set(i, j, col[i]);
        }
    }
}

/// Replace a matrix with its inverse.
///
/// Factors via [`decompose`] and assembles the inverse via
/// [`invert_from_decomposition`]. The returned record carries the parity
/// and near-singular diagnostics of the factorization.
pub fn invert<T, M>(a: &mut M) -> Result<LuPivots, LuError>
where
    T: Scalar,
    M: MatrixStore<T> + Sync,
{
    let pivots = decompose(a)?;
    invert_from_decomposition(a, &pivots);
    Ok(pivots)
}

/// Solve A·x = b, factoring `a` in place and overwriting `b` with x.
///
/// Convenience wrapper combining [`decompose`] and [`back_substitute`]; the
/// returned record can solve further right-hand sides against the same
/// factorization.
pub fn solve<T, M, V>(a: &mut M, b: &mut V) -> Result<LuPivots, LuError>
where
    T: Scalar,
    M: MatrixStore<T>,
    V: VectorStore<T>,
{
    let pivots = decompose(a)?;
    back_substitute(a, &pivots, b);
    Ok(pivots)
}

/// Determinant of the original matrix from its factored form.
///
/// The product of U's diagonal, signed by the recorded swap parity.
pub fn determinant_from_decomposition<T, M>(a: &M, pivots: &LuPivots) -> T
where
    T: Scalar,
    M: MatrixStore<T>,
{
    let mut det = if pivots.parity() >= 0 {
        T::one()
    } else {
        -T::one()
    };
    for i in 0..a.dim() {
        det = det * a.get(i, i);
    }
    det
}

/// Determinant of a matrix, factoring it in place.
pub fn determinant<T, M>(a: &mut M) -> Result<T, LuError>
where
    T: Scalar,
    M: MatrixStore<T>,
{
    let pivots = decompose(a)?;
    Ok(determinant_from_decomposition(a, &pivots))
}
