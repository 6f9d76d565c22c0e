//! Filter operations
//!
//! This module provides the mean (box) smoothing filter for 8-bit images.

/// Kernel size definition
mod kernel;
pub use kernel::KernelSize;

/// Filter operations
mod ops;
pub use ops::*;

/// Summed-area tables for constant-time window sums
mod summed_area;
