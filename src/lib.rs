//! Dense direct solvers over pluggable storage
//!
//! This crate provides LU decomposition with scaled partial pivoting,
//! forward/back substitution, and matrix inversion for small-to-moderate
//! dense systems, as needed by simulation code solving normal-mode or
//! implicit-integration problems.
//!
//! # Features
//!
//! - **Storage-agnostic**: the kernel only consumes the [`MatrixStore`] and
//!   [`VectorStore`] accessor contracts; implementations for
//!   `ndarray::Array2`/`Array1` and `Vec<T>` are included
//! - **In-place**: factorization and inversion overwrite the caller's
//!   matrix, with nothing retained between calls
//! - **Near-singular tolerance**: vanishing pivots are clamped to machine
//!   epsilon and flagged instead of aborting a factorization that already
//!   passed the singularity screen
//! - **Parallel inversion**: independent column solves run on rayon under
//!   the `native` feature
//!
//! # Example
//!
//! ```
//! use dense_solvers::{back_substitute, decompose};
//! use ndarray::array;
//!
//! let mut a = array![[4.0_f64, 1.0], [1.0, 3.0]];
//! let pivots = decompose(&mut a)?;
//!
//! let mut b = array![1.0_f64, 2.0];
//! back_substitute(&a, &pivots, &mut b); // b now holds x with A·x = b
//! # Ok::<(), dense_solvers::LuError>(())
//! ```

pub mod direct;
pub mod parallel;
pub mod traits;

// Re-export main types
pub use traits::{MatrixStore, Scalar, VectorStore};

// Re-export the kernel operations
pub use direct::{
    back_substitute, decompose, determinant, determinant_from_decomposition, invert,
    invert_from_decomposition, solve, LuError, LuPivots,
};
