#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access and
/// encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// Every function produces or consumes 8-bit RGBA images, the raster layout
/// of the smoothing engine. See [`functional::read_image_any_rgba8`].
pub mod functional;
