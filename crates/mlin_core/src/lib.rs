//! mlin core - pixel storage, 2D rasterization and scene description.
//!
//! This crate provides:
//!
//! - **Pixels**: `Color`, `PixelBuffer` with clipped get/set
//! - **Rasterization**: Bresenham lines, rectangles, midpoint circles
//! - **Scene types**: `Sphere`, `Scene`, JSON scene files
//! - **Codec**: loading and saving buffers through the `image` crate
//!
//! # Example
//!
//! ```ignore
//! use mlin_core::{codec, raster, Channels, Color, PixelBuffer, Style};
//!
//! let mut buffer = PixelBuffer::new(64, 64, Channels::Rgba)?;
//! buffer.clear(Color::WHITE);
//! raster::draw_circle(&mut buffer, 32, 32, 20, Color::rgb(255, 0, 0), Style::Filled);
//! codec::save(&buffer, "circle.png")?;
//! ```

pub mod codec;
pub mod color;
pub mod pixel_buffer;
pub mod raster;
pub mod scene;

// Re-export commonly used types
pub use codec::{CodecError, CodecResult};
pub use color::Color;
pub use pixel_buffer::{BufferError, BufferResult, Channels, PixelBuffer};
pub use raster::Style;
pub use scene::{Scene, SceneError, SceneResult, Sphere};
