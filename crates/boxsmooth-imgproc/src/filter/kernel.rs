use boxsmooth_image::ImageError;

/// Side length of a square, odd-sized smoothing kernel.
///
/// The value is always odd and at least one, so every kernel has a well-defined
/// center pixel and `offset` neighbors on each side of it.
///
/// # Examples
///
/// ```
/// use boxsmooth_imgproc::filter::KernelSize;
///
/// let k = KernelSize::new(5).unwrap();
/// assert_eq!(k.get(), 5);
/// assert_eq!(k.offset(), 2);
///
/// assert!(KernelSize::new(4).is_err());
/// assert!(KernelSize::try_from(-3i64).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelSize(usize);

impl KernelSize {
    /// The 1x1 kernel, which leaves every pixel unchanged.
    pub const IDENTITY: KernelSize = KernelSize(1);

    /// Create a kernel size, rejecting even and zero values.
    pub fn new(size: usize) -> Result<Self, ImageError> {
        if size == 0 || size % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(
                i64::try_from(size).unwrap_or(i64::MAX),
            ));
        }
        Ok(Self(size))
    }

    /// The side length `k` of the kernel.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Number of neighbors on each side of the center, `(k - 1) / 2`.
    pub fn offset(&self) -> usize {
        (self.0 - 1) / 2
    }

    /// Number of samples covered by the full kernel, `k * k`.
    pub fn area(&self) -> usize {
        self.0.saturating_mul(self.0)
    }
}

impl Default for KernelSize {
    fn default() -> Self {
        KernelSize(3)
    }
}

impl TryFrom<usize> for KernelSize {
    type Error = ImageError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        KernelSize::new(size)
    }
}

impl TryFrom<i64> for KernelSize {
    type Error = ImageError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        let size = usize::try_from(size).map_err(|_| ImageError::InvalidKernelSize(size))?;
        KernelSize::new(size)
    }
}

impl From<KernelSize> for usize {
    fn from(size: KernelSize) -> Self {
        size.0
    }
}

impl std::fmt::Display for KernelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_size_valid() -> Result<(), ImageError> {
        let k = KernelSize::new(1)?;
        assert_eq!(k, KernelSize::IDENTITY);
        assert_eq!(k.offset(), 0);
        assert_eq!(k.area(), 1);

        let k = KernelSize::new(3)?;
        assert_eq!(k.offset(), 1);
        assert_eq!(k.area(), 9);
        assert_eq!(k.to_string(), "3x3");

        let k = KernelSize::try_from(7i64)?;
        assert_eq!(usize::from(k), 7);
        assert_eq!(KernelSize::default().get(), 3);

        Ok(())
    }

    #[test]
    fn test_kernel_size_invalid() {
        assert_eq!(KernelSize::new(0), Err(ImageError::InvalidKernelSize(0)));
        assert_eq!(KernelSize::new(4), Err(ImageError::InvalidKernelSize(4)));
        assert_eq!(
            KernelSize::try_from(-1i64),
            Err(ImageError::InvalidKernelSize(-1))
        );
        assert_eq!(
            KernelSize::try_from(-3i64),
            Err(ImageError::InvalidKernelSize(-3))
        );
        assert_eq!(
            KernelSize::try_from(2usize),
            Err(ImageError::InvalidKernelSize(2))
        );
    }
}
