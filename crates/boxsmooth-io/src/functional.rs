use std::{io::Cursor, path::Path};

use boxsmooth_image::{ImageSize, Rgba8Image};
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};

use crate::error::IoError;

/// Decodes an image of any format supported by the image crate from raw bytes.
///
/// The decoded pixels are converted to 8-bit RGBA regardless of the source
/// color type; images without alpha get a fully opaque alpha channel.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the encoded image.
///
/// # Returns
///
/// An RGBA image with four channels (rgba8).
pub fn decode_image_rgba8(bytes: &[u8]) -> Result<Rgba8Image, IoError> {
    let img = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {:?} image of {size}", img.color());

    Ok(Rgba8Image::new(size, img.into_rgba8().into_raw())?)
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGBA image with four channels (rgba8).
pub fn read_image_any_rgba8(file_path: impl AsRef<Path>) -> Result<Rgba8Image, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    log::debug!("reading image from {}", file_path.display());

    let bytes = std::fs::read(file_path)?;
    decode_image_rgba8(&bytes)
}

/// Encodes an RGBA image as PNG.
///
/// # Arguments
///
/// * `image` - The image to encode.
///
/// # Returns
///
/// The bytes of the PNG file.
pub fn encode_image_png_rgba8(image: &Rgba8Image) -> Result<Vec<u8>, IoError> {
    let invalid = || IoError::InvalidImageDimensions(image.width(), image.height());
    let width = u32::try_from(image.width()).map_err(|_| invalid())?;
    let height = u32::try_from(image.height()).map_err(|_| invalid())?;

    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        image.as_slice(),
        width,
        height,
        ExtendedColorType::Rgba8,
    )?;

    Ok(buf)
}

/// Writes an RGBA image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG image.
/// * `image` - The image to write.
pub fn write_image_png_rgba8(
    file_path: impl AsRef<Path>,
    image: &Rgba8Image,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let png_data = encode_image_png_rgba8(image)?;

    std::fs::write(file_path, png_data)?;
    log::debug!("wrote {} to {}", image.size(), file_path.display());

    Ok(())
}
