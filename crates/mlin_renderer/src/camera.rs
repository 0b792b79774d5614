//! Pinhole camera for primary ray generation.

use mlin_math::{normalize, Ray, Vec3};
use std::f32::consts::PI;

/// A fixed-orientation pinhole camera looking down +Z.
///
/// The same field of view is applied horizontally and vertically, so
/// non-square images are stretched rather than letterboxed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Full field of view in radians
    pub fov: f32,
}

impl Camera {
    /// Create a camera at `position` with a full field of view of `fov` radians.
    pub fn new(position: Vec3, fov: f32) -> Self {
        Self { position, fov }
    }

    /// Move the camera, keeping the field of view.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Generate the normalized ray through the centre of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner of the image.
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let scale = (self.fov as f64 / 2.0).tan();
        let u = (2.0 * (x as f64 + 0.5) / width as f64 - 1.0) * scale;
        let v = (1.0 - 2.0 * (y as f64 + 0.5) / height as f64) * scale;

        let direction = normalize(Vec3::new(u as f32, v as f32, 1.0));
        Ray::new(self.position, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            fov: PI / 3.0,
        }
    }
}
