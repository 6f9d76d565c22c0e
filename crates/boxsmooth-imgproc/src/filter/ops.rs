use boxsmooth_image::{Image, ImageError, ImageSize, Rgba8Image};

use super::{summed_area::SummedAreaTable, KernelSize};
use crate::parallel::{self, ExecutionStrategy};

/// Algorithm used to compute the neighborhood sums of the mean filter.
///
/// Both methods produce bit-identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingMethod {
    /// Visit every in-bounds neighbor of every pixel, `O(k^2)` per pixel.
    #[default]
    Direct,
    /// Look the window sums up in a summed-area table, `O(1)` per pixel.
    ///
    /// Needs an extra `(H + 1) x (W + 1) x C` table of `u64`.
    SummedArea,
}

/// Smooth an RGBA image with a `kernel_size x kernel_size` mean filter.
///
/// Each output channel is the truncated integer mean of the same channel over
/// the in-bounds pixels of the window centered on it. Neighbors that fall
/// outside the image are skipped, so border pixels average fewer samples.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 4).
/// * `kernel_size` - The side of the square kernel, an odd integer >= 1.
///
/// # Returns
///
/// A new image with the same size as `src`.
///
/// # Errors
///
/// [`ImageError::InvalidKernelSize`] for an even or zero kernel size,
/// [`ImageError::InvalidDimensions`] for an empty image.
///
/// # Example
///
/// ```
/// use boxsmooth_image::{Image, ImageSize};
/// use boxsmooth_imgproc::filter::smooth;
///
/// let src = Image::<u8, 4>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![
///         10, 0, 0, 255, 20, 0, 0, 255, //
///         30, 0, 0, 255, 40, 0, 0, 255,
///     ],
/// )
/// .unwrap();
///
/// let dst = smooth(&src, 3).unwrap();
/// assert_eq!(dst.pixel(0, 0).unwrap(), [25, 0, 0, 255]);
/// ```
pub fn smooth(src: &Rgba8Image, kernel_size: usize) -> Result<Rgba8Image, ImageError> {
    let kernel_size = KernelSize::new(kernel_size)?;
    mean_filter(src, kernel_size)
}

/// Blur an image with a mean filter excluding out-of-bounds neighbors.
///
/// Generic over the number of channels; see [`smooth`] for the semantics.
/// Uses [`ExecutionStrategy::Auto`] and [`SmoothingMethod::Direct`].
pub fn mean_filter<const C: usize>(
    src: &Image<u8, C>,
    kernel_size: KernelSize,
) -> Result<Image<u8, C>, ImageError> {
    mean_filter_with(
        src,
        kernel_size,
        ExecutionStrategy::Auto,
        SmoothingMethod::Direct,
    )
}

/// Blur an image with a mean filter, choosing the execution strategy and method.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The side of the square kernel.
/// * `strategy` - How the destination rows are scheduled.
/// * `method` - How the window sums are computed.
pub fn mean_filter_with<const C: usize>(
    src: &Image<u8, C>,
    kernel_size: KernelSize,
    strategy: ExecutionStrategy,
    method: SmoothingMethod,
) -> Result<Image<u8, C>, ImageError> {
    validate_mean_filter_args(src)?;
    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    mean_filter_into_with(src, &mut dst, kernel_size, strategy, method)?;
    Ok(dst)
}

/// Blur an image with a mean filter into a preallocated destination.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The side of the square kernel.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn mean_filter_into<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: KernelSize,
) -> Result<(), ImageError> {
    mean_filter_into_with(
        src,
        dst,
        kernel_size,
        ExecutionStrategy::Auto,
        SmoothingMethod::Direct,
    )
}

/// Blur an image with a mean filter into a preallocated destination, choosing
/// the execution strategy and method.
///
/// Every argument is validated before any pixel is written.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn mean_filter_into_with<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: KernelSize,
    strategy: ExecutionStrategy,
    method: SmoothingMethod,
) -> Result<(), ImageError> {
    validate_mean_filter_args(src)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let size = src.size();
    let strategy = strategy.resolve(size.num_pixels());
    let offset = kernel_size.offset();
    // width * height * C fits in usize after validation
    let row_len = size.width * C;

    log::debug!(
        "mean filter {kernel_size} on {}x{}x{} using {method:?}, {strategy:?}",
        size.width,
        size.height,
        C
    );

    match method {
        SmoothingMethod::Direct => {
            let src_data = src.as_slice();
            parallel::for_each_row(dst.as_slice_mut(), row_len, strategy, |y, row| {
                direct_row::<C>(src_data, size, offset, y, row)
            })?;
        }
        SmoothingMethod::SummedArea => {
            let table = SummedAreaTable::new(src);
            parallel::for_each_row(dst.as_slice_mut(), row_len, strategy, |y, row| {
                summed_area_row::<C>(&table, size, offset, y, row)
            })?;
        }
    }

    Ok(())
}

/// Check that an image can be smoothed.
///
/// # Errors
///
/// [`ImageError::InvalidDimensions`] when the width or height is zero and
/// [`ImageError::BufferSizeMismatch`] when the buffer does not hold
/// `width * height * C` elements, including when that product overflows.
pub fn validate_mean_filter_args<const C: usize>(src: &Image<u8, C>) -> Result<(), ImageError> {
    let size = src.size();
    if size.width == 0 || size.height == 0 {
        return Err(ImageError::InvalidDimensions(size.width, size.height));
    }

    let expected = size.buffer_len(C).unwrap_or(usize::MAX);
    if src.as_slice().len() != expected {
        return Err(ImageError::BufferSizeMismatch(src.as_slice().len(), expected));
    }

    Ok(())
}

/// Inclusive bounds of the window centered on `center`, clipped to `[0, len)`.
#[inline]
fn clipped_window(center: usize, offset: usize, len: usize) -> (usize, usize) {
    (
        center.saturating_sub(offset),
        center.saturating_add(offset).min(len - 1),
    )
}

/// Compute one destination row by visiting every in-bounds neighbor.
fn direct_row<const C: usize>(
    src_data: &[u8],
    size: ImageSize,
    offset: usize,
    y: usize,
    dst_row: &mut [u8],
) {
    let (y0, y1) = clipped_window(y, offset, size.height);

    for (x, dst_px) in dst_row.chunks_exact_mut(C).enumerate() {
        let (x0, x1) = clipped_window(x, offset, size.width);

        let mut acc = [0u64; C];
        for ny in y0..=y1 {
            let row_start = (ny * size.width + x0) * C;
            let row_end = (ny * size.width + x1 + 1) * C;
            for px in src_data[row_start..row_end].chunks_exact(C) {
                for (a, &v) in acc.iter_mut().zip(px) {
                    *a += v as u64;
                }
            }
        }

        // the center pixel is always in bounds, count >= 1
        let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as u64;
        for (d, a) in dst_px.iter_mut().zip(acc) {
            *d = (a / count) as u8;
        }
    }
}

/// Compute one destination row from the summed-area table.
fn summed_area_row<const C: usize>(
    table: &SummedAreaTable<C>,
    size: ImageSize,
    offset: usize,
    y: usize,
    dst_row: &mut [u8],
) {
    let (y0, y1) = clipped_window(y, offset, size.height);

    for (x, dst_px) in dst_row.chunks_exact_mut(C).enumerate() {
        let (x0, x1) = clipped_window(x, offset, size.width);
        let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as u64;
        for (ch, d) in dst_px.iter_mut().enumerate() {
            *d = (table.rect_sum(x0, y0, x1, y1, ch) / count) as u8;
        }
    }
}
