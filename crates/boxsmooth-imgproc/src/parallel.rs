use rayon::prelude::*;
use thiserror::Error;

use boxsmooth_image::ImageError;

/// Number of pixels from which [`ExecutionStrategy::Auto`] switches to parallel execution.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 100_000;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0, got {0}")]
    InvalidRowStride(usize),

    /// The destination buffer is not a whole number of rows.
    #[error("buffer of length {0} is not a multiple of the row stride {1}")]
    SizeMismatch(usize, usize),
}

impl From<ParallelError> for ImageError {
    fn from(err: ParallelError) -> Self {
        ImageError::ParallelExecution(err.to_string())
    }
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Parallel rows for images with at least [`PARALLEL_PIXEL_THRESHOLD`] pixels,
    /// serial otherwise.
    #[default]
    Auto,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// Every task owns one destination row, so writes never overlap.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether the strategy runs in parallel for an image with `num_pixels` pixels.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => num_pixels >= PARALLEL_PIXEL_THRESHOLD,
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::ParallelRows | ExecutionStrategy::Fixed(_) => true,
        }
    }

    /// Replace [`ExecutionStrategy::Auto`] by the concrete strategy for `num_pixels` pixels.
    ///
    /// Other strategies are returned unchanged.
    pub fn resolve(self, num_pixels: usize) -> ExecutionStrategy {
        match self {
            ExecutionStrategy::Auto if self.is_parallel(num_pixels) => {
                ExecutionStrategy::ParallelRows
            }
            ExecutionStrategy::Auto => ExecutionStrategy::Serial,
            other => other,
        }
    }
}

/// Apply a function to every row of a destination buffer.
///
/// # Arguments
///
/// * `dst` - The destination buffer, a whole number of rows of `row_len` elements.
/// * `row_len` - The number of elements per row (width * channels).
/// * `strategy` - The execution strategy.
/// * `f` - Called once per row with the row index and the mutable row slice.
///
/// [`ExecutionStrategy::Auto`] is resolved against the element count of `dst`;
/// callers that know the pixel count should call [`ExecutionStrategy::resolve`] first.
///
/// # Errors
///
/// Returns an error for a zero row stride, a buffer that is not a multiple of
/// the stride, or a thread pool that cannot be built.
pub fn for_each_row<T, F>(
    dst: &mut [T],
    row_len: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return Err(ParallelError::InvalidRowStride(row_len));
    }
    if dst.len() % row_len != 0 {
        return Err(ParallelError::SizeMismatch(dst.len(), row_len));
    }

    let num_rows = dst.len() / row_len;

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::Auto => {
            let resolved = strategy.resolve(dst.len());
            log::trace!("auto strategy resolved to {resolved:?} for {num_rows} rows");
            return for_each_row(dst, row_len, resolved, f);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(r, row)| f(r, row));
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_with_row_index(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![0usize; 12];
        for_each_row(&mut dst, 3, strategy, |r, row| {
            row.iter_mut().for_each(|v| *v = r);
        })?;
        Ok(dst)
    }

    #[test]
    fn test_for_each_row_strategies() -> Result<(), ParallelError> {
        let expected = vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3];
        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelRows,
            ExecutionStrategy::Auto,
            ExecutionStrategy::Fixed(2),
        ] {
            assert_eq!(fill_with_row_index(strategy)?, expected, "{strategy:?}");
        }
        Ok(())
    }

    #[test]
    fn test_for_each_row_invalid_stride() {
        let mut dst = vec![0u8; 4];
        let res = for_each_row(&mut dst, 0, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowStride(0)));

        let res = for_each_row(&mut dst, 3, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::SizeMismatch(4, 3)));
    }

    #[test]
    fn test_for_each_row_fixed_error() {
        let mut dst = vec![0u8; 4];
        let res = for_each_row(&mut dst, 2, ExecutionStrategy::Fixed(0), |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_is_parallel() {
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::ParallelRows.is_parallel(1));
        assert!(ExecutionStrategy::Fixed(4).is_parallel(1));
        assert!(!ExecutionStrategy::Auto.is_parallel(PARALLEL_PIXEL_THRESHOLD - 1));
        assert!(ExecutionStrategy::Auto.is_parallel(PARALLEL_PIXEL_THRESHOLD));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            ExecutionStrategy::Auto.resolve(10),
            ExecutionStrategy::Serial
        );
        assert_eq!(
            ExecutionStrategy::Auto.resolve(PARALLEL_PIXEL_THRESHOLD),
            ExecutionStrategy::ParallelRows
        );
        assert_eq!(
            ExecutionStrategy::Fixed(3).resolve(10),
            ExecutionStrategy::Fixed(3)
        );
    }

    #[test]
    fn test_parallel_error_into_image_error() {
        let err: ImageError = ParallelError::InvalidThreadCount(0).into();
        assert_eq!(
            err,
            ImageError::ParallelExecution("thread count must be > 0, got 0".to_string())
        );
    }
}
