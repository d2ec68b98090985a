//! Direct solvers for dense linear systems
//!
//! This module provides the LU kernel:
//! - [`decompose`]: in-place LU factorization with scaled partial pivoting
//! - [`back_substitute`]: triangular solves against the factored form
//! - [`invert`] / [`invert_from_decomposition`]: full matrix inversion
//! - [`solve`], [`determinant`]: convenience wrappers over the above

mod lu;

pub use lu::{
    back_substitute, decompose, determinant, determinant_from_decomposition, invert,
    invert_from_decomposition, solve, LuError, LuPivots,
};
