//! Image file import and export.
//!
//! Decoding and encoding are delegated to the `image` crate; this module
//! only maps between its buffers and [`PixelBuffer`].

use std::path::Path;

use image::{ColorType, DynamicImage, GenericImageView};
use thiserror::Error;

use crate::pixel_buffer::{BufferError, Channels, PixelBuffer};

/// Errors that can occur while loading or saving images.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid pixel buffer: {0}")]
    Buffer(#[from] BufferError),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Load an image file into a new buffer.
///
/// Images with alpha load as RGBA, everything else as RGB. Greyscale is
/// expanded and high bit depth data is narrowed to 8 bits.
pub fn load(path: impl AsRef<Path>) -> CodecResult<PixelBuffer> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let buffer = from_dynamic(img)?;

    log::debug!(
        "Loaded image: {} ({}x{}, {} channels)",
        path.display(),
        buffer.width(),
        buffer.height(),
        buffer.channels().count()
    );

    Ok(buffer)
}

/// Save a buffer. The format is picked from the file extension.
pub fn save(buffer: &PixelBuffer, path: impl AsRef<Path>) -> CodecResult<()> {
    let path = path.as_ref();
    let color_type = match buffer.channels() {
        Channels::Rgb => ColorType::Rgb8,
        Channels::Rgba => ColorType::Rgba8,
    };

    image::save_buffer(
        path,
        buffer.as_bytes(),
        buffer.width(),
        buffer.height(),
        color_type,
    )?;

    log::debug!(
        "Saved image: {} ({}x{})",
        path.display(),
        buffer.width(),
        buffer.height()
    );

    Ok(())
}

fn from_dynamic(img: DynamicImage) -> CodecResult<PixelBuffer> {
    let color = img.color();
    if color.bytes_per_pixel() / color.channel_count() > 1 {
        log::warn!("Narrowing {:?} image to 8 bits per channel", color);
    }

    let (width, height) = img.dimensions();
    let buffer = if color.has_alpha() {
        PixelBuffer::from_raw(width, height, Channels::Rgba, img.into_rgba8().into_raw())?
    } else {
        PixelBuffer::from_raw(width, height, Channels::Rgb, img.into_rgb8().into_raw())?
    };
    Ok(buffer)
}
