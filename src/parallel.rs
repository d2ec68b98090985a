//! Parallel utilities with feature-gated implementations
//!
//! Provides the parallel abstraction used by the inversion driver, with a
//! sequential fallback when the `native` feature is disabled.

/// Parallel map with index
#[cfg(feature = "native")]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

/// Sequential map with index (fallback)
#[cfg(not(feature = "native"))]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    F: Fn(usize) -> U,
{
    (0..count).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_indexed() {
        let result = parallel_map_indexed(5, |i| i * 2);
        assert_eq!(result, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_parallel_map_indexed_empty() {
        let result: Vec<usize> = parallel_map_indexed(0, |i| i);
        assert!(result.is_empty());
    }
}
