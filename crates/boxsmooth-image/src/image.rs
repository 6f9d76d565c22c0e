use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use boxsmooth_image::ImageSize;
///
/// let image_size = ImageSize {
///     width: 10,
///     height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size, saturating at `usize::MAX`.
    pub fn num_pixels(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of scalars of a buffer with `channels` values per pixel.
    ///
    /// Returns `None` when `width * height * channels` overflows `usize`.
    pub fn buffer_len(&self, channels: usize) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(channels)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored in row-major order with `CHANNELS` interleaved
/// scalars per pixel, i.e. a buffer of shape (H, W, C).
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

/// An 8-bit image with four interleaved channels (R, G, B, A).
pub type Rgba8Image = Image<u8, 4>;

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    /// A size whose buffer length overflows `usize` reports `usize::MAX` as the
    /// expected length.
    ///
    /// # Examples
    ///
    /// ```
    /// use boxsmooth_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 4],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 4);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.buffer_len(CHANNELS).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(ImageError::BufferSizeMismatch(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use boxsmooth_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::from_size_val([3, 2].into(), 7u8).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 3 * 2 * 4);
    /// assert!(image.as_slice().iter().all(|&v| v == 7));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let len = size
            .buffer_len(CHANNELS)
            .ok_or(ImageError::BufferSizeMismatch(0, usize::MAX))?;
        Image::new(size, vec![val; len])
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to the element at `[row, col, channel]`.
    ///
    /// Returns `None` if any of the indices is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, ch] = index;
        if y >= self.height() || x >= self.width() || ch >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + ch)
    }

    /// Get the pixel data of the image.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the pixel.
    /// * `y` - The y-coordinate of the pixel.
    /// * `ch` - The channel index of the pixel.
    ///
    /// # Returns
    ///
    /// The pixel value at the given coordinates.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(self.data[(y * self.width() + x) * CHANNELS + ch])
    }

    /// Get all the channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<[T; CHANNELS], ImageError>
    where
        T: Copy + Default,
    {
        let mut out = [T::default(); CHANNELS];
        for (ch, v) in out.iter_mut().enumerate() {
            *v = self.get_pixel(x, y, ch)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.num_pixels(), 200);
        assert_eq!(image_size.buffer_len(4), Some(800));
        assert_eq!(
            image_size.to_string(),
            "ImageSize { width: 10, height: 20 }"
        );
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 4>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 4],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.cols(), 10);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.num_channels(), 4);

        Ok(())
    }

    #[test]
    fn image_buffer_mismatch() {
        let res = Image::<u8, 4>::new([2, 2].into(), vec![0u8; 15]);
        assert_eq!(res, Err(ImageError::BufferSizeMismatch(15, 16)));
    }

    #[test]
    fn image_size_overflow() {
        let size = ImageSize {
            width: usize::MAX / 2,
            height: 1,
        };
        assert_eq!(size.buffer_len(4), None);
        assert_eq!(size.num_pixels(), usize::MAX / 2);

        let huge = ImageSize {
            width: usize::MAX,
            height: 2,
        };
        assert_eq!(huge.num_pixels(), usize::MAX);

        assert_eq!(
            Image::<u8, 4>::new(size, vec![]),
            Err(ImageError::BufferSizeMismatch(0, usize::MAX))
        );
        assert_eq!(
            Image::<u8, 4>::from_size_val(size, 0),
            Err(ImageError::BufferSizeMismatch(0, usize::MAX))
        );
    }

    #[test]
    fn image_get_pixel() -> Result<(), ImageError> {
        // 2x1 rgba: pixel (1, 0) is the second group of four
        let image = Image::<u8, 4>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6, 7, 8])?;

        assert_eq!(image.get([0, 1, 2]), Some(&7));
        assert_eq!(image.get([1, 0, 0]), None);
        assert_eq!(image.get_pixel(1, 0, 3)?, 8);
        assert_eq!(image.pixel(0, 0)?, [1, 2, 3, 4]);

        assert_eq!(
            image.get_pixel(2, 0, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 1))
        );
        assert_eq!(
            image.get_pixel(0, 0, 4),
            Err(ImageError::ChannelIndexOutOfBounds(4, 4))
        );

        Ok(())
    }

    #[test]
    fn image_into_vec() -> Result<(), ImageError> {
        let data = vec![9u8; 3 * 4];
        let image = Image::<u8, 4>::new([3, 1].into(), data.clone())?;
        assert_eq!(image.into_vec(), data);
        Ok(())
    }
}
