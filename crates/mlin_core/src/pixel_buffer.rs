//! Owned 8-bit pixel storage with clipped access.
//!
//! Pixels are stored row-major, `channels` bytes each, at byte offset
//! `(y * width + x) * channels`. Reads outside the buffer return
//! [`Color::BLACK`]; writes outside the buffer are dropped.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::Color;

/// Errors that can occur while constructing a pixel buffer.
#[derive(Error, Debug)]
pub enum BufferError {
    #[error("Buffer dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Buffer of {width}x{height}x{channels} bytes does not fit in memory")]
    TooLarge {
        width: u32,
        height: u32,
        channels: usize,
    },

    #[error("Failed to allocate pixel storage: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(u8),

    #[error("Pixel data is {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type BufferResult<T> = Result<T, BufferError>;

/// Per-pixel channel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb = 3,
    Rgba = 4,
}

impl Channels {
    /// Bytes per pixel.
    pub const fn count(self) -> usize {
        self as usize
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

impl TryFrom<u8> for Channels {
    type Error = BufferError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(BufferError::UnsupportedChannels(other)),
        }
    }
}

/// A 2D grid of 8-bit color samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: Channels) -> BufferResult<Self> {
        let len = byte_len(width, height, channels)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, 0);

        log::debug!("Allocated {}x{} buffer ({} bytes)", width, height, len);

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap existing pixel bytes laid out as described in the module docs.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> BufferResult<Self> {
        let expected = byte_len(width, height, channels)?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw pixel bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Bytes in one row of pixels.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    /// Mutable rows, top to bottom. Each chunk is `row_stride()` bytes.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let stride = self.row_stride();
        self.data.chunks_exact_mut(stride)
    }

    /// Byte offset of pixel (x, y), or `None` if it lies outside the buffer.
    pub fn pixel_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels.count())
    }

    /// Write a pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(offset) = self.pixel_offset(x, y) {
            let end = offset + self.channels.count();
            write_pixel(&mut self.data[offset..end], color);
        }
    }

    /// Read a pixel. Out-of-bounds reads return opaque black.
    pub fn get(&self, x: i32, y: i32) -> Color {
        match self.pixel_offset(x, y) {
            Some(offset) => {
                let end = offset + self.channels.count();
                read_pixel(&self.data[offset..end])
            }
            None => Color::BLACK,
        }
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        let channels = self.channels.count();
        for pixel in self.data.chunks_exact_mut(channels) {
            write_pixel(pixel, color);
        }
    }
}

/// Write `color` into a 3 or 4 byte pixel slot. Alpha is only stored for 4.
#[inline]
pub fn write_pixel(slot: &mut [u8], color: Color) {
    slot[0] = color.r;
    slot[1] = color.g;
    slot[2] = color.b;
    if slot.len() == 4 {
        slot[3] = color.a;
    }
}

#[inline]
fn read_pixel(slot: &[u8]) -> Color {
    let a = if slot.len() == 4 { slot[3] } else { 255 };
    Color::rgba(slot[0], slot[1], slot[2], a)
}

fn byte_len(width: u32, height: u32, channels: Channels) -> BufferResult<usize> {
    if width == 0 || height == 0 {
        return Err(BufferError::ZeroDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels.count()))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(BufferError::TooLarge {
            width,
            height,
            channels: channels.count(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buf = PixelBuffer::new(4, 3, Channels::Rgba).unwrap();
        assert_eq!(buf.as_bytes().len(), 4 * 3 * 4);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buf.get(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 10, Channels::Rgb),
            Err(BufferError::ZeroDimension { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(10, 0, Channels::Rgb),
            Err(BufferError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_channels_try_from() {
        assert_eq!(Channels::try_from(3).unwrap(), Channels::Rgb);
        assert_eq!(Channels::try_from(4).unwrap(), Channels::Rgba);
        assert!(matches!(
            Channels::try_from(2),
            Err(BufferError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn test_set_get_rgba() {
        let mut buf = PixelBuffer::new(5, 5, Channels::Rgba).unwrap();
        let c = Color::rgba(10, 20, 30, 40);
        buf.set(2, 3, c);
        assert_eq!(buf.get(2, 3), c);
        let offset = (3 * 5 + 2) * 4;
        assert_eq!(&buf.as_bytes()[offset..offset + 4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_rgb_ignores_alpha() {
        let mut buf = PixelBuffer::new(2, 2, Channels::Rgb).unwrap();
        buf.set(1, 1, Color::rgba(1, 2, 3, 4));
        assert_eq!(buf.get(1, 1), Color::rgba(1, 2, 3, 255));
        assert_eq!(buf.as_bytes().len(), 12);
    }

    #[test]
    fn test_out_of_bounds_get_is_opaque_black() {
        let buf = PixelBuffer::new(3, 3, Channels::Rgba).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MIN, i32::MIN), (i32::MAX, i32::MAX)] {
            assert_eq!(buf.get(x, y), Color::BLACK);
        }
    }

    #[test]
    fn test_out_of_bounds_set_is_noop() {
        let mut buf = PixelBuffer::new(3, 3, Channels::Rgba).unwrap();
        let before = buf.clone();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MIN, i32::MAX), (i32::MAX, 1)] {
            buf.set(x, y, Color::WHITE);
        }
        assert_eq!(buf, before);
        assert_eq!((buf.width(), buf.height()), (3, 3));
    }

    #[test]
    fn test_clear() {
        let mut buf = PixelBuffer::new(4, 2, Channels::Rgb).unwrap();
        buf.clear(Color::SKY_BLUE);
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(buf.get(x, y), Color::SKY_BLUE);
            }
        }
    }

    #[test]
    fn test_from_raw_length_checked() {
        assert!(PixelBuffer::from_raw(2, 2, Channels::Rgb, vec![0; 12]).is_ok());
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, Channels::Rgb, vec![0; 11]),
            Err(BufferError::LengthMismatch { expected: 12, actual: 11 })
        ));
    }

    #[test]
    fn test_rows_mut() {
        let mut buf = PixelBuffer::new(3, 2, Channels::Rgba).unwrap();
        let rows: Vec<_> = buf.rows_mut().map(|r| r.len()).collect();
        assert_eq!(rows, vec![12, 12]);
    }
}
