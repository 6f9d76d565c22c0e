/// An error type for the image and image processing modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the kernel size is even or not positive.
    #[error("Invalid kernel size {0}: must be an odd integer >= 1")]
    InvalidKernelSize(i64),

    /// Error when the image has a zero width or height.
    #[error("Invalid image dimensions {0}x{1}: width and height must be >= 1")]
    InvalidDimensions(usize, usize),

    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    BufferSizeMismatch(usize, usize),

    /// Error when the source and destination image sizes differ.
    #[error("Image size mismatch: source {0}x{1}, destination {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the parallel execution backend could not run.
    #[error("Parallel execution failed: {0}")]
    ParallelExecution(String),
}
